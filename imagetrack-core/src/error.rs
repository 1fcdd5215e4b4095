//! Error types for imagetrack
//!
//! Only configuration loading and validation can fail. Lifecycle and
//! gesture processing degrade to no-ops on missing references instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Duplicate spawn rule for image '{0}'")]
    DuplicateSpawnRule(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Content '{content}' part {part} has invalid parent {parent}")]
    InvalidPartParent {
        content: String,
        part: usize,
        parent: usize,
    },
}

impl TrackerError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        TrackerError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

//! Recorded tick sequences
//!
//! A scenario is a JSON list of frames that can be replayed through a
//! session, which is how the CLI and the integration tests drive the core.

use crate::ar::{ArSession, Frame, TickReport};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    pub ticks: Vec<Frame>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Feed every frame through `session`, in order
    pub fn replay(&self, session: &mut ArSession) -> Vec<TickReport> {
        self.ticks.iter().map(|frame| session.tick(frame)).collect()
    }
}

//! Configuration handling for the imagetrack CLI

use anyhow::{Context, Result};
use imagetrack_core::TrackerConfig;
use std::path::{Path, PathBuf};

/// Default config location under the user's home directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".imagetrack").join("config.toml"))
}

/// Load configuration from file or use defaults
pub fn load_config(path: Option<PathBuf>) -> Result<TrackerConfig> {
    if let Some(path) = path {
        read_config(&path)
    } else if let Some(default_path) = default_config_path() {
        if default_path.exists() {
            read_config(&default_path)
        } else {
            Ok(TrackerConfig::default())
        }
    } else {
        Ok(TrackerConfig::default())
    }
}

/// Parse and validate one configuration file
pub fn read_config(path: &Path) -> Result<TrackerConfig> {
    let config = TrackerConfig::load(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config in {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_explicit_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tracker.toml");
        fs::write(
            &path,
            r#"
[gesture]
rotation_speed = 50.0

[[spawn_rules]]
image_name = "poster"

[spawn_rules.content]
name = "robot"
"#,
        )
        .unwrap();

        let config = load_config(Some(path)).unwrap();
        assert_eq!(config.gesture.rotation_speed, 50.0);
        assert_eq!(config.spawn_rules.len(), 1);
        assert_eq!(config.spawn_rules[0].content.name, "robot");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tracker.json");
        fs::write(&path, r#"{ "gesture": { "rotation_speed": -1.0 } }"#).unwrap();

        let err = load_config(Some(path)).unwrap_err();
        assert!(err.to_string().contains("Invalid config"));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = read_config(Path::new("/nonexistent/tracker.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/tracker.toml"));
    }
}

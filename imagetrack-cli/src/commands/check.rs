//! Validate a tracker configuration file

use crate::config::read_config;
use anyhow::Result;
use colored::*;
use imagetrack_core::TrackerConfig;
use std::path::Path;

/// Parse and validate `path`, then print its spawn table
pub fn check_config(path: &Path) -> Result<()> {
    let config = read_config(path)?;

    println!("{} {} is valid", "✓".green().bold(), path.display());
    if config.spawn_rules.is_empty() {
        println!("{} No spawn rules; recognized images will not spawn content", "!".yellow());
    }
    for line in spawn_table(&config) {
        println!("  {}", line);
    }
    println!(
        "  gesture: rotation speed {}, twist deadband {}°",
        config.gesture.rotation_speed, config.gesture.twist_deadband_deg
    );
    println!(
        "  selection: {} occluder(s), default radius {}",
        config.selection.occluders.len(),
        config.selection.default_radius
    );
    Ok(())
}

/// `image -> content (n parts)` per spawn rule, in file order
pub fn spawn_table(config: &TrackerConfig) -> Vec<String> {
    config
        .spawn_rules
        .iter()
        .map(|rule| {
            format!(
                "{} -> {} ({} part{})",
                rule.image_name,
                rule.content.name,
                rule.content.part_count(),
                if rule.content.part_count() == 1 { "" } else { "s" }
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use imagetrack_core::{ContentDescriptor, ContentPart, SpawnRule};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_spawn_table() {
        let config = TrackerConfig::default()
            .with_rule(SpawnRule::new("poster", ContentDescriptor::new("robot")))
            .with_rule(SpawnRule::new(
                "card",
                ContentDescriptor::new("car")
                    .with_part(ContentPart::new("body", Vec3::ZERO))
                    .with_part(ContentPart::new("wheel", Vec3::X).with_parent(0)),
            ));

        assert_eq!(
            spawn_table(&config),
            vec!["poster -> robot (1 part)", "card -> car (2 parts)"]
        );
    }

    #[test]
    fn test_duplicate_rules_fail_check() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tracker.toml");
        fs::write(
            &path,
            r#"
[[spawn_rules]]
image_name = "poster"
content = { name = "robot" }

[[spawn_rules]]
image_name = "poster"
content = { name = "car" }
"#,
        )
        .unwrap();

        assert!(check_config(&path).is_err());
    }

    #[test]
    fn test_unknown_extension_fails_check() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tracker.yaml");
        fs::write(&path, "gesture: {}").unwrap();

        assert!(check_config(&path).is_err());
    }
}

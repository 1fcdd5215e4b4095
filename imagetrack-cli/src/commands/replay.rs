//! Replay a recorded scenario through a tracking session

use anyhow::{Context, Result};
use colored::*;
use glam::EulerRot;
use imagetrack_core::{ArSession, GestureEvent, Scenario, SpawnedEntity, TickReport, TrackerConfig};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Final state of one entity after the replay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityRow {
    pub id: u64,
    pub target: String,
    pub content: String,
    pub visible: bool,
    pub position: [f32; 3],
    /// Yaw, pitch and roll in degrees
    pub rotation_deg: [f32; 3],
}

impl From<&SpawnedEntity> for EntityRow {
    fn from(entity: &SpawnedEntity) -> Self {
        let (yaw, pitch, roll) = entity.pose.rotation.to_euler(EulerRot::YXZ);
        Self {
            id: entity.id.0,
            target: entity.target.to_string(),
            content: entity.content.name.clone(),
            visible: entity.visible,
            position: entity.pose.position.to_array(),
            rotation_deg: [yaw.to_degrees(), pitch.to_degrees(), roll.to_degrees()],
        }
    }
}

#[derive(Debug, Serialize)]
struct ReplayOutput<'a> {
    scenario: Option<&'a str>,
    ticks: &'a [TickReport],
    entities: Vec<EntityRow>,
}

/// Run `scenario_path` through a fresh session and print what happened
pub fn replay(config: &TrackerConfig, scenario_path: &Path, json: bool) -> Result<()> {
    let scenario = Scenario::load(scenario_path)
        .with_context(|| format!("Failed to load scenario from {}", scenario_path.display()))?;
    info!("Replaying {} ticks from {}", scenario.len(), scenario_path.display());

    let mut session = ArSession::new(config);
    let reports = scenario.replay(&mut session);
    let entities: Vec<EntityRow> = session
        .registry()
        .sorted()
        .into_iter()
        .map(EntityRow::from)
        .collect();

    if json {
        let output = ReplayOutput {
            scenario: scenario.name.as_deref(),
            ticks: &reports,
            entities,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let title = scenario
        .name
        .clone()
        .unwrap_or_else(|| scenario_path.display().to_string());
    println!("{} Replaying {}", "→".blue().bold(), title);
    for report in &reports {
        if let Some(line) = summarize_tick(report) {
            println!("  {}", line);
        }
    }

    println!("\n{}", "─".repeat(60));
    if entities.is_empty() {
        println!("{} No entities alive", "!".yellow());
    }
    for row in &entities {
        println!("  {}", describe_entity(row));
    }
    Ok(())
}

/// One line per tick that changed something, `None` for quiet ticks
pub fn summarize_tick(report: &TickReport) -> Option<String> {
    if report.is_empty() {
        return None;
    }

    let lifecycle = &report.lifecycle;
    let mut parts = Vec::new();
    for (label, ids) in [
        ("spawned", &lifecycle.spawned),
        ("reset", &lifecycle.reset),
        ("hidden", &lifecycle.hidden),
        ("destroyed", &lifecycle.destroyed),
    ] {
        if !ids.is_empty() {
            let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
            parts.push(format!("{} {}", label, ids.join(", ")));
        }
    }
    if !report.followed.is_empty() {
        let ids: Vec<String> = report.followed.iter().map(ToString::to_string).collect();
        parts.push(format!("followed {}", ids.join(", ")));
    }
    parts.extend(report.gestures.iter().map(describe_event));

    Some(format!("[{:>4}] {}", report.frame, parts.join("; ")))
}

fn describe_event(event: &GestureEvent) -> String {
    match event {
        GestureEvent::Selected { entity } => format!("selected {}", entity),
        GestureEvent::Deselected { entity } => format!("deselected {}", entity),
        GestureEvent::Yaw { entity, degrees } => format!("yaw {} {:+.2}°", entity, degrees),
        GestureEvent::Rotate {
            entity,
            euler_degrees,
        } => format!(
            "rotate {} pitch {:+.2}° twist {:+.2}° roll {:+.2}°",
            entity, euler_degrees.x, euler_degrees.y, euler_degrees.z
        ),
    }
}

fn describe_entity(row: &EntityRow) -> String {
    let visibility = if row.visible {
        "visible".green()
    } else {
        "hidden".dimmed()
    };
    format!(
        "entity#{} {} -> {} [{}] at ({:.3}, {:.3}, {:.3}) yaw {:.1}° pitch {:.1}° roll {:.1}°",
        row.id,
        row.target,
        row.content,
        visibility,
        row.position[0],
        row.position[1],
        row.position[2],
        row.rotation_deg[0],
        row.rotation_deg[1],
        row.rotation_deg[2],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};
    use imagetrack_core::{
        ContentDescriptor, EntityId, Frame, Pose, SpawnRule, TargetsChanged, TrackedTarget,
        TrackingState,
    };
    use std::fs;
    use tempfile::TempDir;

    fn config() -> TrackerConfig {
        TrackerConfig::default()
            .with_rule(SpawnRule::new("poster", ContentDescriptor::new("robot")))
    }

    #[test]
    fn test_quiet_tick_has_no_summary() {
        assert_eq!(summarize_tick(&TickReport::default()), None);
    }

    #[test]
    fn test_summary_lists_lifecycle_and_gestures() {
        let mut report = TickReport {
            frame: 7,
            ..Default::default()
        };
        report.lifecycle.spawned.push(EntityId(1));
        report.gestures.push(GestureEvent::Yaw {
            entity: EntityId(1),
            degrees: 32.0,
        });

        let line = summarize_tick(&report).unwrap();
        assert_eq!(line, "[   7] spawned entity#1; yaw entity#1 +32.00°");
    }

    #[test]
    fn test_summary_lists_followers() {
        let report = TickReport {
            frame: 3,
            followed: vec![EntityId(2)],
            ..Default::default()
        };

        let line = summarize_tick(&report).unwrap();
        assert_eq!(line, "[   3] followed entity#2");
    }

    #[test]
    fn test_entity_row_reports_yaw() {
        let mut session = ArSession::new(&config());
        let pose = Pose::new(
            Vec3::new(0.0, 0.0, -2.0),
            Quat::from_rotation_y(90f32.to_radians()),
        );
        session.tick(&Frame::new(0.016).with_targets(TargetsChanged::added([TrackedTarget::new(
            "poster",
            pose,
            TrackingState::Tracking,
        )])));

        let rows: Vec<EntityRow> = session
            .registry()
            .sorted()
            .into_iter()
            .map(EntityRow::from)
            .collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].content, "robot");
        assert!(rows[0].visible);
        assert!((rows[0].rotation_deg[0] - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_replay_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scenario.json");
        fs::write(
            &path,
            r#"{ "ticks": [
                { "targets": { "added": [
                    { "id": "poster", "pose": { "position": [0.0, 0.0, -2.0] }, "tracking_state": "tracking" }
                ] } },
                { "touches": [ { "id": 0, "position": [540.0, 960.0], "phase": "began" } ] }
            ] }"#,
        )
        .unwrap();

        replay(&config(), &path, true).unwrap();
        replay(&config(), &path, false).unwrap();
    }

    #[test]
    fn test_missing_scenario_is_an_error() {
        let err = replay(&config(), Path::new("/nonexistent/scenario.json"), false).unwrap_err();
        assert!(err.to_string().contains("Failed to load scenario"));
    }
}

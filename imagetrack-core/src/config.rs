//! Tracker configuration
//!
//! Everything here is static for the lifetime of a session: the spawn
//! table, gesture tuning, the viewing camera and the selection colliders.
//! Files are TOML or JSON, picked by extension.

use crate::ar::entity::SpawnRule;
use crate::error::{Result, TrackerError};
use crate::three_d::Camera3D;
use glam::{Vec2, Vec3};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub spawn_rules: Vec<SpawnRule>,

    #[serde(default)]
    pub gesture: GestureConfig,

    #[serde(default)]
    pub camera: CameraConfig,

    #[serde(default)]
    pub selection: SelectionConfig,

    #[serde(default)]
    pub follow: FollowConfig,
}

/// Touch gesture tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Degrees per screen unit per second
    #[serde(default = "default_rotation_speed")]
    pub rotation_speed: f32,

    /// Twist angles at or below this are ignored (degrees)
    #[serde(default = "default_twist_deadband")]
    pub twist_deadband_deg: f32,

    /// Both contacts must move further than this for a parallel swipe
    #[serde(default = "default_swipe_min_movement")]
    pub swipe_min_movement: f32,

    /// Scale applied to the twist angle
    #[serde(default = "default_twist_gain")]
    pub twist_gain: f32,

    /// Scale applied to parallel two-finger swipes
    #[serde(default = "default_swipe_gain")]
    pub swipe_gain: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    #[serde(default)]
    pub position: Vec3,

    #[serde(default = "default_camera_target")]
    pub target: Vec3,

    #[serde(default = "default_fov_deg")]
    pub fov_deg: f32,

    #[serde(default = "default_near")]
    pub near: f32,

    #[serde(default = "default_far")]
    pub far: f32,

    /// Screen size in touch units (width, height)
    #[serde(default = "default_viewport")]
    pub viewport: Vec2,
}

/// A static collider that can block selection rays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occluder {
    pub name: String,
    pub center: Vec3,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Collider radius for content parts that do not declare one
    #[serde(default = "default_part_radius")]
    pub default_radius: f32,

    #[serde(default)]
    pub occluders: Vec<Occluder>,
}

/// Follow-the-goal motion tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowConfig {
    #[serde(default = "default_follow_speed")]
    pub speed: f32,

    #[serde(default = "default_arrive_distance")]
    pub arrive_distance: f32,

    #[serde(default = "default_turn_rate")]
    pub turn_rate: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            rotation_speed: default_rotation_speed(),
            twist_deadband_deg: default_twist_deadband(),
            swipe_min_movement: default_swipe_min_movement(),
            twist_gain: default_twist_gain(),
            swipe_gain: default_swipe_gain(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            target: default_camera_target(),
            fov_deg: default_fov_deg(),
            near: default_near(),
            far: default_far(),
            viewport: default_viewport(),
        }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            default_radius: default_part_radius(),
            occluders: Vec::new(),
        }
    }
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self {
            speed: default_follow_speed(),
            arrive_distance: default_arrive_distance(),
            turn_rate: default_turn_rate(),
        }
    }
}

fn default_rotation_speed() -> f32 { 100.0 }
fn default_twist_deadband() -> f32 { 0.5 }
fn default_swipe_min_movement() -> f32 { 1.0 }
fn default_twist_gain() -> f32 { 0.015 }
fn default_swipe_gain() -> f32 { 0.5 }
fn default_camera_target() -> Vec3 { Vec3::NEG_Z }
fn default_fov_deg() -> f32 { 60.0 }
fn default_near() -> f32 { 0.01 }
fn default_far() -> f32 { 100.0 }
fn default_viewport() -> Vec2 { Vec2::new(1080.0, 1920.0) }
fn default_part_radius() -> f32 { 0.1 }
fn default_follow_speed() -> f32 { 1.2 }
fn default_arrive_distance() -> f32 { 0.1 }
fn default_turn_rate() -> f32 { 10.0 }

impl CameraConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.viewport.x / self.viewport.y
    }

    /// Build the viewing camera this configuration describes
    pub fn camera(&self) -> Camera3D {
        Camera3D::new_perspective(
            self.position,
            self.target,
            self.fov_deg.to_radians(),
            self.aspect_ratio(),
        )
        .with_clip_planes(self.near, self.far)
    }
}

impl TrackerConfig {
    /// Load a configuration file, choosing the parser by extension
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            other => Err(TrackerError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn with_rule(mut self, rule: SpawnRule) -> Self {
        self.spawn_rules.push(rule);
        self
    }

    /// Check the configuration for values the session cannot work with
    pub fn validate(&self) -> Result<()> {
        let mut seen = FxHashSet::default();
        for rule in &self.spawn_rules {
            if !seen.insert(rule.image_name.as_str()) {
                return Err(TrackerError::DuplicateSpawnRule(rule.image_name.clone()));
            }
            for (index, part) in rule.content.parts.iter().enumerate() {
                if let Some(parent) = part.parent {
                    if parent >= index {
                        return Err(TrackerError::InvalidPartParent {
                            content: rule.content.name.clone(),
                            part: index,
                            parent,
                        });
                    }
                }
                if let Some(radius) = part.radius {
                    positive(&format!("{}.{}.radius", rule.content.name, part.name), radius)?;
                }
            }
        }

        let gesture = &self.gesture;
        non_negative("gesture.rotation_speed", gesture.rotation_speed)?;
        non_negative("gesture.twist_deadband_deg", gesture.twist_deadband_deg)?;
        non_negative("gesture.swipe_min_movement", gesture.swipe_min_movement)?;
        non_negative("gesture.twist_gain", gesture.twist_gain)?;
        non_negative("gesture.swipe_gain", gesture.swipe_gain)?;

        let camera = &self.camera;
        positive("camera.fov_deg", camera.fov_deg)?;
        positive("camera.near", camera.near)?;
        if !(camera.far > camera.near) {
            return Err(TrackerError::invalid("camera.far", "must exceed camera.near"));
        }
        positive("camera.viewport.x", camera.viewport.x)?;
        positive("camera.viewport.y", camera.viewport.y)?;
        if !camera.position.is_finite() || !camera.target.is_finite() {
            return Err(TrackerError::invalid("camera", "position and target must be finite"));
        }
        if camera.position == camera.target {
            return Err(TrackerError::invalid("camera.target", "must differ from camera.position"));
        }

        positive("selection.default_radius", self.selection.default_radius)?;
        for occluder in &self.selection.occluders {
            positive(&format!("selection.occluders.{}.radius", occluder.name), occluder.radius)?;
        }

        non_negative("follow.speed", self.follow.speed)?;
        non_negative("follow.arrive_distance", self.follow.arrive_distance)?;
        non_negative("follow.turn_rate", self.follow.turn_rate)?;

        Ok(())
    }
}

fn non_negative(field: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TrackerError::invalid(field, format!("must be finite and >= 0, got {}", value)))
    }
}

fn positive(field: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TrackerError::invalid(field, format!("must be finite and > 0, got {}", value)))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

//! Physical image targets as reported by the recognition feed

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a reference image (its name in the image library)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(String);

impl TargetId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TargetId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Detection confidence of a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingState {
    /// Fully tracked, pose is reliable
    Tracking,
    /// Tracking is limited or paused
    Limited,
    /// Tracking stopped
    None,
}

impl TrackingState {
    pub fn is_tracking(self) -> bool {
        matches!(self, TrackingState::Tracking)
    }
}

/// Position and orientation in world space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    /// Position in world space
    #[serde(default)]
    pub position: Vec3,
    /// Rotation
    #[serde(default)]
    pub rotation: Quat,
}

impl Pose {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// Get the transformation matrix
    pub fn transform(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }
}

/// A target snapshot carried by a lifecycle event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedTarget {
    pub id: TargetId,
    #[serde(default)]
    pub pose: Pose,
    pub tracking_state: TrackingState,
}

impl TrackedTarget {
    pub fn new(id: impl Into<TargetId>, pose: Pose, tracking_state: TrackingState) -> Self {
        Self {
            id: id.into(),
            pose,
            tracking_state,
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking_state.is_tracking()
    }
}

/// One tick's worth of recognition events, already split into disjoint batches
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetsChanged {
    #[serde(default)]
    pub added: Vec<TrackedTarget>,
    #[serde(default)]
    pub updated: Vec<TrackedTarget>,
    #[serde(default)]
    pub removed: Vec<TrackedTarget>,
}

impl TargetsChanged {
    pub fn added(targets: impl IntoIterator<Item = TrackedTarget>) -> Self {
        Self {
            added: targets.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn updated(targets: impl IntoIterator<Item = TrackedTarget>) -> Self {
        Self {
            updated: targets.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn removed(targets: impl IntoIterator<Item = TrackedTarget>) -> Self {
        Self {
            removed: targets.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

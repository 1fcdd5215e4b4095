//! Applying gesture rotations to the selected entity

use crate::ar::entity::EntityId;
use crate::ar::gesture_recognition::GestureSession;
use crate::ar::registry::EntityRegistry;
use glam::{EulerRot, Quat, Vec3};
use tracing::{debug, trace};

/// A single rotation step, already resolved per axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotationDelta {
    /// Rotation in the entity's own frame
    Local(Quat),
    /// Rotation about world axes
    World(Quat),
}

impl RotationDelta {
    /// Yaw about the entity's own up axis
    pub fn yaw(degrees: f32) -> Self {
        RotationDelta::Local(Quat::from_rotation_y(degrees.to_radians()))
    }

    /// Compose pitch (x), twist (y) and roll (z) into one world rotation.
    ///
    /// Roll applies first, then pitch, then twist, all in a single step.
    pub fn world_euler(degrees: Vec3) -> Self {
        RotationDelta::World(Quat::from_euler(
            EulerRot::YXZ,
            degrees.y.to_radians(),
            degrees.x.to_radians(),
            degrees.z.to_radians(),
        ))
    }

    pub fn apply_to(self, rotation: Quat) -> Quat {
        match self {
            RotationDelta::Local(delta) => (rotation * delta).normalize(),
            RotationDelta::World(delta) => (delta * rotation).normalize(),
        }
    }
}

/// Result of one application attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied(EntityId),
    /// The selected entity no longer exists; selection was cleared
    Discarded(EntityId),
    NoSelection,
}

/// Mutates the selected entity's orientation
#[derive(Debug, Clone, Copy, Default)]
pub struct RotationApplicator;

impl RotationApplicator {
    pub fn new() -> Self {
        Self
    }

    /// Apply `delta` to whatever the session has selected.
    ///
    /// The selection is checked against the registry first; a stale handle
    /// is dropped instead of being dereferenced.
    pub fn apply(
        &self,
        registry: &mut EntityRegistry,
        session: &mut GestureSession,
        delta: RotationDelta,
    ) -> ApplyOutcome {
        let Some(id) = session.selected() else {
            return ApplyOutcome::NoSelection;
        };

        match registry.get_mut(id) {
            Some(entity) => {
                entity.pose.rotation = delta.apply_to(entity.pose.rotation);
                trace!("Rotated {} to {:?}", id, entity.pose.rotation);
                ApplyOutcome::Applied(id)
            }
            None => {
                debug!("Selected {} is gone, dropping rotation", id);
                session.invalidate(id);
                ApplyOutcome::Discarded(id)
            }
        }
    }
}

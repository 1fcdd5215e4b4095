//! Virtual content spawned for recognized targets

use crate::ar::target::{Pose, TargetId};
use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to a spawned entity.
///
/// Ids are never reused within a registry, so a stale handle simply stops
/// resolving once its entity is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

/// One collider node of a content prefab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPart {
    /// Part name
    pub name: String,
    /// Offset from the parent part
    #[serde(default)]
    pub offset: Vec3,
    /// Collider radius; the selection default applies when absent
    #[serde(default)]
    pub radius: Option<f32>,
    /// Parent part index. Non-root parts without one hang off the root.
    #[serde(default)]
    pub parent: Option<usize>,
}

impl ContentPart {
    pub fn new(name: impl Into<String>, offset: Vec3) -> Self {
        Self {
            name: name.into(),
            offset,
            radius: None,
            parent: None,
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn with_parent(mut self, parent: usize) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// Prefabricated content spawned for a target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDescriptor {
    pub name: String,
    /// Collider tree; part 0 is the root
    #[serde(default)]
    pub parts: Vec<ContentPart>,
    /// Drive toward the frame's reticle instead of staying on the image
    #[serde(default)]
    pub follows_reticle: bool,
}

impl ContentDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parts: Vec::new(),
            follows_reticle: false,
        }
    }

    pub fn following_reticle(mut self) -> Self {
        self.follows_reticle = true;
        self
    }

    pub fn with_part(mut self, part: ContentPart) -> Self {
        self.parts.push(part);
        self
    }

    /// Number of collider nodes; content without parts still has its root
    pub fn part_count(&self) -> usize {
        self.parts.len().max(1)
    }

    /// Parent of a part, `None` for the root.
    ///
    /// Parents that do not precede the part are treated as the root.
    pub fn parent_of(&self, index: usize) -> Option<usize> {
        if index == 0 {
            return None;
        }
        let parent = self
            .parts
            .get(index)
            .and_then(|part| part.parent)
            .filter(|&parent| parent < index)
            .unwrap_or(0);
        Some(parent)
    }

    pub fn radius_of(&self, index: usize) -> Option<f32> {
        self.parts.get(index).and_then(|part| part.radius)
    }

    fn offset_of(&self, index: usize) -> Vec3 {
        self.parts
            .get(index)
            .map(|part| part.offset)
            .unwrap_or(Vec3::ZERO)
    }
}

/// Static mapping from an image name to the content spawned for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnRule {
    pub image_name: String,
    pub content: ContentDescriptor,
}

impl SpawnRule {
    pub fn new(image_name: impl Into<String>, content: ContentDescriptor) -> Self {
        Self {
            image_name: image_name.into(),
            content,
        }
    }
}

/// Content bound 1:1 to a tracked target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnedEntity {
    pub id: EntityId,
    pub target: TargetId,
    pub content: ContentDescriptor,
    pub pose: Pose,
    pub visible: bool,
    /// Rotation captured at spawn, restored when tracking is reacquired
    pub original_rotation: Quat,
}

impl SpawnedEntity {
    pub fn new(
        id: EntityId,
        target: TargetId,
        content: ContentDescriptor,
        pose: Pose,
        visible: bool,
    ) -> Self {
        Self {
            id,
            target,
            content,
            original_rotation: pose.rotation,
            pose,
            visible,
        }
    }

    pub fn transform(&self) -> Mat4 {
        self.pose.transform()
    }

    pub fn reset_rotation(&mut self) {
        self.pose.rotation = self.original_rotation;
    }

    /// World transform of every collider part, indexed like the parts
    pub fn part_transforms(&self) -> Vec<Mat4> {
        let count = self.content.part_count();
        let mut transforms: Vec<Mat4> = Vec::with_capacity(count);
        for index in 0..count {
            let parent = match self.content.parent_of(index) {
                Some(parent) => transforms[parent],
                None => self.transform(),
            };
            transforms.push(parent * Mat4::from_translation(self.content.offset_of(index)));
        }
        transforms
    }
}

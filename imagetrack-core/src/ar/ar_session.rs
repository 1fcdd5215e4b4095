//! Per-frame session driver
//!
//! Ties the lifecycle manager and the gesture path together. Both run on
//! the caller's thread inside [`ArSession::tick`]; lifecycle events are
//! always applied before touches so a selection never outlives its entity.

use crate::ar::entity::EntityId;
use crate::ar::follow::{FollowStatus, Follower};
use crate::ar::gesture_recognition::{GestureClassifier, GestureEvent, GestureState, SceneQuery};
use crate::ar::lifecycle::{LifecycleManager, LifecycleReport};
use crate::ar::registry::EntityRegistry;
use crate::ar::rotation::{ApplyOutcome, RotationApplicator};
use crate::ar::selector::EntitySelector;
use crate::ar::target::{Pose, TargetsChanged};
use crate::ar::touch::Touch;
use crate::config::{FollowConfig, TrackerConfig};
use crate::three_d::Camera3D;
use glam::{Quat, Vec2, Vec3};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything that happened to the world in one rendered frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Frame time in seconds
    #[serde(default = "default_delta_time")]
    pub delta_time: f32,
    /// Device camera pose, when the tracker reported one
    #[serde(default)]
    pub camera: Option<Pose>,
    #[serde(default)]
    pub targets: TargetsChanged,
    #[serde(default)]
    pub touches: Vec<Touch>,
    /// World point that reticle-following content drives toward
    #[serde(default)]
    pub reticle: Option<Vec3>,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            delta_time: default_delta_time(),
            camera: None,
            targets: TargetsChanged::default(),
            touches: Vec::new(),
            reticle: None,
        }
    }
}

fn default_delta_time() -> f32 {
    1.0 / 60.0
}

impl Frame {
    pub fn new(delta_time: f32) -> Self {
        Self {
            delta_time,
            ..Default::default()
        }
    }

    pub fn with_targets(mut self, targets: TargetsChanged) -> Self {
        self.targets = targets;
        self
    }

    pub fn with_touches(mut self, touches: impl IntoIterator<Item = Touch>) -> Self {
        self.touches = touches.into_iter().collect();
        self
    }

    pub fn with_camera(mut self, pose: Pose) -> Self {
        self.camera = Some(pose);
        self
    }

    pub fn with_reticle(mut self, point: Vec3) -> Self {
        self.reticle = Some(point);
        self
    }
}

/// Outcome of one tick
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TickReport {
    pub frame: u64,
    pub lifecycle: LifecycleReport,
    /// Reticle followers that moved this frame
    pub followed: Vec<EntityId>,
    pub gestures: Vec<GestureEvent>,
}

impl TickReport {
    pub fn is_empty(&self) -> bool {
        self.lifecycle.is_empty() && self.followed.is_empty() && self.gestures.is_empty()
    }
}

/// Read-only view of the scene handed to the gesture classifier
struct SceneView<'a> {
    registry: &'a EntityRegistry,
    selector: &'a EntitySelector,
}

impl SceneQuery for SceneView<'_> {
    fn pick(&self, screen_point: Vec2) -> Option<EntityId> {
        self.selector.resolve(self.registry, screen_point)
    }

    fn rotation_of(&self, entity: EntityId) -> Option<Quat> {
        self.registry.get(entity).map(|entity| entity.pose.rotation)
    }
}

/// Image-tracking session: entity pool plus touch manipulation
pub struct ArSession {
    registry: EntityRegistry,
    lifecycle: LifecycleManager,
    selector: EntitySelector,
    classifier: GestureClassifier,
    applicator: RotationApplicator,
    follow: FollowConfig,
    followers: FxHashMap<EntityId, Follower>,
    frame_count: u64,
}

impl ArSession {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            registry: EntityRegistry::new(),
            lifecycle: LifecycleManager::new(&config.spawn_rules),
            selector: EntitySelector::new(
                &config.selection,
                config.camera.camera(),
                config.camera.viewport,
            ),
            classifier: GestureClassifier::new(config.gesture.clone()),
            applicator: RotationApplicator::new(),
            follow: config.follow.clone(),
            followers: FxHashMap::default(),
            frame_count: 0,
        }
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn selected(&self) -> Option<EntityId> {
        self.classifier.selected()
    }

    pub fn gesture_state(&self) -> GestureState {
        self.classifier.state()
    }

    pub fn camera(&self) -> &Camera3D {
        self.selector.camera()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Apply a batch of recognition events.
    ///
    /// Returns the lifecycle report and a `Deselected` event for a selection
    /// that was reset or destroyed by the batch.
    pub fn on_targets_changed(
        &mut self,
        changes: &TargetsChanged,
    ) -> (LifecycleReport, Vec<GestureEvent>) {
        let report = self.lifecycle.on_targets_changed(&mut self.registry, changes);
        for entity in &report.destroyed {
            self.followers.remove(entity);
        }
        for &id in &report.spawned {
            let Some(entity) = self.registry.get(id) else {
                continue;
            };
            if entity.content.follows_reticle {
                let follower = Follower::new(entity.pose.position, &self.follow)
                    .with_rotation(entity.pose.rotation);
                self.followers.insert(id, follower);
            }
        }

        let events = report
            .invalidated()
            .filter_map(|entity| self.classifier.invalidate(entity))
            .collect();
        (report, events)
    }

    /// Move reticle-following content one frame toward `reticle`.
    ///
    /// Followers keep their own position, so target updates do not snap
    /// them back onto the image. Hidden followers hold still. Returns the
    /// followers that moved, in id order.
    pub fn follow_reticle(&mut self, reticle: Option<Vec3>, dt: f32) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.followers.keys().copied().collect();
        ids.sort();

        let mut moved = Vec::new();
        for id in ids {
            let (Some(follower), Some(entity)) =
                (self.followers.get_mut(&id), self.registry.get_mut(id))
            else {
                continue;
            };
            // Manual rotation and reacquire resets carry over into the drive
            follower.rotation = entity.pose.rotation;
            if let Some(goal) = reticle.filter(|_| entity.visible) {
                if follower.step(goal, dt) == FollowStatus::Moving {
                    moved.push(id);
                }
            }
            entity.pose.position = follower.position;
            entity.pose.rotation = follower.rotation;
        }
        moved
    }

    /// Classify touches and apply any resulting rotation to the selection
    pub fn process_touches(&mut self, touches: &[Touch], dt: f32) -> Vec<GestureEvent> {
        let scene = SceneView {
            registry: &self.registry,
            selector: &self.selector,
        };
        let classified = self.classifier.process(touches, dt, &scene);

        let mut events = Vec::with_capacity(classified.len());
        for event in classified {
            events.push(event);
            let Some(delta) = event.rotation() else {
                continue;
            };
            let outcome = self
                .applicator
                .apply(&mut self.registry, self.classifier.session_mut(), delta);
            if let ApplyOutcome::Discarded(entity) = outcome {
                events.push(GestureEvent::Deselected { entity });
            }
        }
        events
    }

    /// Run one frame: camera, lifecycle, followers, then gestures
    pub fn tick(&mut self, frame: &Frame) -> TickReport {
        self.frame_count += 1;

        if let Some(pose) = &frame.camera {
            self.selector.camera_mut().apply_pose(pose);
        }

        let (lifecycle, mut gestures) = self.on_targets_changed(&frame.targets);
        let followed = self.follow_reticle(frame.reticle, frame.delta_time);
        gestures.extend(self.process_touches(&frame.touches, frame.delta_time));

        let report = TickReport {
            frame: self.frame_count,
            lifecycle,
            followed,
            gestures,
        };
        if !report.is_empty() {
            debug!(
                "Frame {}: {} spawned, {} reset, {} destroyed, {} followed, {} gesture events",
                report.frame,
                report.lifecycle.spawned.len(),
                report.lifecycle.reset.len(),
                report.lifecycle.destroyed.len(),
                report.followed.len(),
                report.gestures.len()
            );
        }
        report
    }
}

//! Touch gesture classification
//!
//! A small state machine driven purely by the number of active contacts:
//!
//! - one contact selects on touch-down and yaws the selection while it moves
//! - two contacts twist (vertical axis), and parallel swipes pitch or roll
//! - zero contacts end the session and drop the selection
//!
//! Three or more contacts freeze the machine: nothing is emitted and the
//! session is left as it was.

use crate::ar::entity::EntityId;
use crate::ar::rotation::RotationDelta;
use crate::ar::touch::Touch;
use crate::config::GestureConfig;
use glam::{Quat, Vec2, Vec3};
use serde::Serialize;
use tracing::{debug, trace};

/// Scene access the classifier needs while interpreting touches
pub trait SceneQuery {
    /// Entity under a screen point, if any
    fn pick(&self, screen_point: Vec2) -> Option<EntityId>;

    /// Current rotation of an entity, `None` once it no longer exists
    fn rotation_of(&self, entity: EntityId) -> Option<Quat>;
}

/// Recognized gesture events
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GestureEvent {
    /// An entity became the selection
    Selected { entity: EntityId },
    /// One-finger yaw about the entity's own up axis
    Yaw { entity: EntityId, degrees: f32 },
    /// Two-finger world-space rotation: x pitch, y twist, z roll
    Rotate {
        entity: EntityId,
        euler_degrees: Vec3,
    },
    /// The selection was dropped
    Deselected { entity: EntityId },
}

impl GestureEvent {
    pub fn entity(&self) -> EntityId {
        match *self {
            GestureEvent::Selected { entity }
            | GestureEvent::Yaw { entity, .. }
            | GestureEvent::Rotate { entity, .. }
            | GestureEvent::Deselected { entity } => entity,
        }
    }

    /// Rotation this event asks for, if it is a rotation event
    pub fn rotation(&self) -> Option<RotationDelta> {
        match *self {
            GestureEvent::Yaw { degrees, .. } => Some(RotationDelta::yaw(degrees)),
            GestureEvent::Rotate { euler_degrees, .. } => {
                Some(RotationDelta::world_euler(euler_degrees))
            }
            _ => None,
        }
    }
}

/// Classifier state, derived from the active contact count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureState {
    Idle,
    OneFingerTrack,
    TwoFingerTrack,
    /// Three or more contacts; input is ignored
    Frozen,
}

/// Reference captured when a two-finger gesture (re)starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoFingerBaseline {
    /// Contact ids the baseline was measured from, in frame order
    pub contact_ids: [u64; 2],
    pub first_start: Vec2,
    pub second_start: Vec2,
    /// Angle of the first-to-second contact vector, degrees
    pub start_angle_deg: f32,
    /// Selection rotation at baseline time, kept for continuity or rollback
    pub start_rotation: Quat,
}

/// Transient state of an in-progress interaction
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GestureSession {
    selected: Option<EntityId>,
    touch_start: Option<Vec2>,
    baseline: Option<TwoFingerBaseline>,
}

impl GestureSession {
    pub fn selected(&self) -> Option<EntityId> {
        self.selected
    }

    pub fn touch_start(&self) -> Option<Vec2> {
        self.touch_start
    }

    pub fn baseline(&self) -> Option<&TwoFingerBaseline> {
        self.baseline.as_ref()
    }

    pub fn select(&mut self, entity: EntityId) {
        self.selected = Some(entity);
    }

    /// Drop the selection if it refers to `entity`; returns whether it did
    pub fn invalidate(&mut self, entity: EntityId) -> bool {
        if self.selected != Some(entity) {
            return false;
        }
        self.selected = None;
        self.baseline = None;
        true
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_none() && self.touch_start.is_none() && self.baseline.is_none()
    }
}

/// Turns per-frame touch snapshots into gesture events
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    config: GestureConfig,
    session: GestureSession,
    state: GestureState,
}

impl GestureClassifier {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            session: GestureSession::default(),
            state: GestureState::Idle,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn session(&self) -> &GestureSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GestureSession {
        &mut self.session
    }

    pub fn selected(&self) -> Option<EntityId> {
        self.session.selected()
    }

    /// Drop the selection because its entity was reset or destroyed
    pub fn invalidate(&mut self, entity: EntityId) -> Option<GestureEvent> {
        if self.session.invalidate(entity) {
            debug!("Selection of {} invalidated", entity);
            Some(GestureEvent::Deselected { entity })
        } else {
            None
        }
    }

    /// Classify one frame of touches.
    ///
    /// `touches` is the frame's ordered contact list; its length is the
    /// active contact count. `dt` is the frame time in seconds.
    pub fn process(
        &mut self,
        touches: &[Touch],
        dt: f32,
        scene: &dyn SceneQuery,
    ) -> Vec<GestureEvent> {
        let mut events = Vec::new();

        match touches {
            [] => {
                if self.state != GestureState::Idle {
                    trace!("All contacts ended");
                }
                self.state = GestureState::Idle;
                if let Some(entity) = self.session.selected() {
                    debug!("Contacts ended, deselecting {}", entity);
                    events.push(GestureEvent::Deselected { entity });
                }
                self.session.clear();
            }
            [touch] => {
                self.state = GestureState::OneFingerTrack;
                self.one_finger(touch, dt, scene, &mut events);
            }
            [first, second] => {
                self.state = GestureState::TwoFingerTrack;
                self.two_finger(first, second, dt, scene, &mut events);
            }
            _ => {
                self.state = GestureState::Frozen;
                trace!("Ignoring frame with {} contacts", touches.len());
            }
        }

        events
    }

    fn one_finger(
        &mut self,
        touch: &Touch,
        dt: f32,
        scene: &dyn SceneQuery,
        events: &mut Vec<GestureEvent>,
    ) {
        if touch.just_began() {
            self.session.touch_start = Some(touch.position);
            self.try_select(touch.position, scene, events);
        } else if touch.just_moved() {
            let Some(entity) = self.session.selected() else {
                return;
            };
            // Rightward movement yaws negatively so the entity follows the finger
            let degrees = -touch.delta.x * self.config.rotation_speed * dt;
            if degrees != 0.0 {
                trace!("Yaw {} by {:.3} degrees", entity, degrees);
                events.push(GestureEvent::Yaw { entity, degrees });
            }
        }
        // Ending a single contact keeps the selection for follow-up gestures
    }

    fn two_finger(
        &mut self,
        first: &Touch,
        second: &Touch,
        dt: f32,
        scene: &dyn SceneQuery,
        events: &mut Vec<GestureEvent>,
    ) {
        let any_began = first.just_began() || second.just_began();

        if self.session.selected().is_none() && any_began {
            self.try_select(first.position, scene, events);
        }

        let Some(entity) = self.session.selected() else {
            return;
        };

        if any_began {
            self.rebaseline(entity, first, second, scene, events);
            return;
        }
        if !(first.just_moved() || second.just_moved()) {
            return;
        }

        // A different pair of fingers (e.g. after a third one lifted) needs its own baseline
        let Some(baseline) = self
            .session
            .baseline
            .filter(|baseline| baseline.contact_ids == [first.id, second.id])
        else {
            self.rebaseline(entity, first, second, scene, events);
            return;
        };

        let euler_degrees = self.two_finger_rotation(&baseline, first, second, dt);
        if euler_degrees != Vec3::ZERO {
            trace!("Rotate {} by {:?} degrees", entity, euler_degrees);
            events.push(GestureEvent::Rotate { entity, euler_degrees });
        }
    }

    /// Per-axis rotation for one two-finger frame, composed by the caller
    fn two_finger_rotation(
        &self,
        baseline: &TwoFingerBaseline,
        first: &Touch,
        second: &Touch,
        dt: f32,
    ) -> Vec3 {
        let config = &self.config;
        let mut euler = Vec3::ZERO;

        let current_angle = contact_angle(first.position, second.position);
        let angle_delta = delta_angle(baseline.start_angle_deg, current_angle);

        let both_moving = first.delta.length() > config.swipe_min_movement
            && second.delta.length() > config.swipe_min_movement;

        // Parallel vertical swipe tips the entity toward or away from the viewer
        if both_moving && same_sign(first.delta.y, second.delta.y) {
            let average = (first.delta.y + second.delta.y) * 0.5;
            euler.x = average * config.rotation_speed * config.swipe_gain * dt;
        }

        // Parallel horizontal swipe rolls it about the depth axis
        if both_moving && same_sign(first.delta.x, second.delta.x) {
            let average = (first.delta.x + second.delta.x) * 0.5;
            euler.z = -average * config.rotation_speed * config.swipe_gain * dt;
        }

        if angle_delta.abs() > config.twist_deadband_deg {
            euler.y = angle_delta * config.rotation_speed * config.twist_gain * dt;
        }

        euler
    }

    fn try_select(&mut self, point: Vec2, scene: &dyn SceneQuery, events: &mut Vec<GestureEvent>) {
        let Some(entity) = scene.pick(point) else {
            return;
        };
        if self.session.selected() != Some(entity) {
            debug!("Selected {} at {:?}", entity, point);
            events.push(GestureEvent::Selected { entity });
        }
        self.session.select(entity);
    }

    fn rebaseline(
        &mut self,
        entity: EntityId,
        first: &Touch,
        second: &Touch,
        scene: &dyn SceneQuery,
        events: &mut Vec<GestureEvent>,
    ) {
        let Some(start_rotation) = scene.rotation_of(entity) else {
            // Destroyed behind our back
            if let Some(event) = self.invalidate(entity) {
                events.push(event);
            }
            return;
        };

        let baseline = TwoFingerBaseline {
            contact_ids: [first.id, second.id],
            first_start: first.position,
            second_start: second.position,
            start_angle_deg: contact_angle(first.position, second.position),
            start_rotation,
        };
        trace!("Two-finger baseline at {:.2} degrees", baseline.start_angle_deg);
        self.session.baseline = Some(baseline);
    }
}

/// Angle of the vector from `first` to `second`, in degrees
pub fn contact_angle(first: Vec2, second: Vec2) -> f32 {
    let offset = second - first;
    offset.y.atan2(offset.x).to_degrees()
}

/// Shortest signed difference from `from` to `to`, in degrees within [-180, 180]
pub fn delta_angle(from: f32, to: f32) -> f32 {
    let delta = (to - from).rem_euclid(360.0);
    if delta > 180.0 {
        delta - 360.0
    } else {
        delta
    }
}

/// Sign comparison where zero counts as positive
fn same_sign(a: f32, b: f32) -> bool {
    (a >= 0.0) == (b >= 0.0)
}

#[cfg(test)]
#[path = "gesture_tests.rs"]
mod tests;

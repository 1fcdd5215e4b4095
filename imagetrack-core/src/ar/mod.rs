//! Image-target tracking and touch manipulation
//!
//! Recognized images spawn content through the [`LifecycleManager`], and
//! touches are turned into rotations of the selected content by the
//! [`GestureClassifier`]. [`ArSession`] runs both once per frame.

pub mod entity;
pub mod target;
pub mod touch;
pub mod registry;
pub mod lifecycle;
pub mod selector;
pub mod gesture_recognition;
pub mod rotation;
pub mod follow;
pub mod ar_session;

pub use entity::{ContentDescriptor, ContentPart, EntityId, SpawnRule, SpawnedEntity};
pub use target::{Pose, TargetId, TargetsChanged, TrackedTarget, TrackingState};
pub use touch::{Touch, TouchPhase};
pub use registry::EntityRegistry;
pub use lifecycle::{LifecycleManager, LifecycleReport};
pub use selector::{EntitySelector, RayHit};
pub use gesture_recognition::{
    GestureClassifier, GestureEvent, GestureSession, GestureState, SceneQuery,
};
pub use rotation::{ApplyOutcome, RotationApplicator, RotationDelta};
pub use follow::{FollowStatus, Follower};
pub use ar_session::{ArSession, Frame, TickReport};

//! Imagetrack - image-target tracking and touch manipulation for AR content
//!
//! This crate keeps virtual content bound to physical reference images as
//! the recognition feed adds, updates and removes them, and lets the user
//! rotate that content with one- and two-finger gestures.
//!
//! Rendering, image recognition and plane detection live outside this
//! crate; it consumes their events and produces entity poses.

pub mod ar;
pub mod config;
pub mod error;
pub mod scenario;
pub mod three_d;

pub use ar::{
    ArSession, ContentDescriptor, ContentPart, EntityId, EntityRegistry, Frame, GestureEvent,
    GestureState, Pose, SpawnRule, SpawnedEntity, TargetId, TargetsChanged, TickReport, Touch,
    TouchPhase, TrackedTarget, TrackingState,
};
pub use config::TrackerConfig;
pub use error::{Result, TrackerError};
pub use scenario::Scenario;
pub use three_d::{Camera3D, Ray};

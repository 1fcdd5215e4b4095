#![allow(dead_code)]
//! Test helpers shared by the session integration tests
use glam::{Quat, Vec2, Vec3};
use imagetrack_core::{
    ArSession, ContentDescriptor, EntityId, Pose, SpawnRule, TrackedTarget, TrackerConfig,
    TrackingState,
};

/// Frame time used throughout the tests
pub const DT: f32 = 0.016;

/// Config with one rule: image "poster" spawns "robot"
pub fn test_config() -> TrackerConfig {
    TrackerConfig::default().with_rule(SpawnRule::new("poster", ContentDescriptor::new("robot")))
}

pub fn test_session() -> ArSession {
    ArSession::new(&test_config())
}

/// Pose two units in front of the camera, under `screen_point`
pub fn pose_under(session: &ArSession, screen_point: Vec2) -> Pose {
    let viewport = test_config().camera.viewport;
    let ray = session
        .camera()
        .screen_point_to_ray(screen_point, viewport)
        .expect("camera produces a ray");
    Pose::new(ray.at(2.0), Quat::from_rotation_x(0.3))
}

pub fn poster(pose: Pose, state: TrackingState) -> TrackedTarget {
    TrackedTarget::new("poster", pose, state)
}

pub fn only_entity(session: &ArSession) -> EntityId {
    let entities = session.registry().sorted();
    assert_eq!(entities.len(), 1, "expected exactly one entity");
    entities[0].id
}

/// Rotation difference in degrees
pub fn degrees_between(a: Quat, b: Quat) -> f32 {
    a.angle_between(b).to_degrees()
}

pub fn offset(pose: Pose, by: Vec3) -> Pose {
    Pose::new(pose.position + by, pose.rotation)
}

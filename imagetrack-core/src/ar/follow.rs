//! Content that drives toward a goal point
//!
//! Used for vehicle-style content that chases a moving marker: it turns
//! smoothly toward the goal and moves at a fixed speed until it is close
//! enough to stop.

use crate::config::FollowConfig;
use glam::{Mat3, Quat, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowStatus {
    /// Within the arrive distance; nothing moved
    Arrived,
    Moving,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Follower {
    pub position: Vec3,
    pub rotation: Quat,
    /// Units per second
    pub speed: f32,
    pub arrive_distance: f32,
    /// Fraction of the remaining turn covered per second
    pub turn_rate: f32,
}

impl Follower {
    pub fn new(position: Vec3, config: &FollowConfig) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            speed: config.speed,
            arrive_distance: config.arrive_distance,
            turn_rate: config.turn_rate,
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Advance one frame toward `goal`
    pub fn step(&mut self, goal: Vec3, dt: f32) -> FollowStatus {
        let to_goal = goal - self.position;
        let distance = to_goal.length();
        if distance < self.arrive_distance {
            return FollowStatus::Arrived;
        }

        if let Some(look) = look_rotation(to_goal) {
            let t = (dt * self.turn_rate).clamp(0.0, 1.0);
            self.rotation = self.rotation.slerp(look, t).normalize();
        }

        let max_step = self.speed * dt;
        if distance <= max_step {
            self.position = goal;
        } else {
            self.position += to_goal / distance * max_step;
        }
        FollowStatus::Moving
    }
}

/// Rotation that points the local -Z axis along `direction`, keeping +Y up
pub fn look_rotation(direction: Vec3) -> Option<Quat> {
    let forward = direction.try_normalize()?;
    let right = match forward.cross(Vec3::Y).try_normalize() {
        Some(right) => right,
        // Looking straight up or down
        None => return Some(Quat::from_rotation_arc(Vec3::NEG_Z, forward)),
    };
    let up = right.cross(forward);
    Some(Quat::from_mat3(&Mat3::from_cols(right, up, -forward)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn follower() -> Follower {
        Follower::new(Vec3::ZERO, &FollowConfig::default())
    }

    #[test]
    fn test_moves_at_most_speed_per_frame() {
        let mut car = follower();
        let status = car.step(Vec3::new(0.0, 0.0, -10.0), 0.5);

        assert_eq!(status, FollowStatus::Moving);
        assert!((car.position - Vec3::new(0.0, 0.0, -0.6)).length() < 1e-5);
    }

    #[test]
    fn test_does_not_overshoot() {
        let mut car = follower();
        car.step(Vec3::new(0.3, 0.0, 0.0), 1.0);
        assert!((car.position - Vec3::new(0.3, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_stops_inside_arrive_distance() {
        let mut car = follower();
        let status = car.step(Vec3::new(0.05, 0.0, 0.0), 1.0);
        assert_eq!(status, FollowStatus::Arrived);
        assert_eq!(car.position, Vec3::ZERO);
    }

    #[test]
    fn test_turns_toward_goal() {
        let mut car = follower();
        // Large dt saturates the turn so it faces the goal immediately
        car.step(Vec3::new(5.0, 0.0, 0.0), 1.0);
        let forward = car.rotation * Vec3::NEG_Z;
        assert!((forward - Vec3::X).length() < 1e-4);
    }

    #[test]
    fn test_partial_turn_is_smooth() {
        let mut car = follower();
        car.step(Vec3::new(5.0, 0.0, 0.0), 0.01);
        let forward = car.rotation * Vec3::NEG_Z;
        assert!(forward.x > 0.0);
        assert!(forward.z < 0.0);
    }

    #[test]
    fn test_look_rotation_straight_up() {
        let rotation = look_rotation(Vec3::Y).unwrap();
        assert!((rotation * Vec3::NEG_Z - Vec3::Y).length() < 1e-4);
        assert!(look_rotation(Vec3::ZERO).is_none());
    }
}

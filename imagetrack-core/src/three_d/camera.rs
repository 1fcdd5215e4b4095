//! Perspective camera for the device view

use crate::ar::target::Pose;
use crate::three_d::Ray;
use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Camera that looks at the scene from the device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera3D {
    /// Camera position in world space
    pub position: Vec3,
    /// Target position the camera is looking at
    pub target: Vec3,
    /// Up vector (usually Y-axis)
    pub up: Vec3,
    /// Field of view in radians
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Aspect ratio (width / height)
    pub aspect_ratio: f32,
}

impl Camera3D {
    /// Create a new perspective camera
    pub fn new_perspective(position: Vec3, target: Vec3, fov: f32, aspect_ratio: f32) -> Self {
        Self {
            position,
            target,
            up: Vec3::Y,
            fov,
            near: 0.1,
            far: 1000.0,
            aspect_ratio,
        }
    }

    pub fn with_clip_planes(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Get the view matrix (world to camera space)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect_ratio, self.near, self.far)
    }

    /// Get the combined view-projection matrix
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update aspect ratio (e.g., when the screen rotates)
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Move the camera to a tracked device pose, looking down its -Z axis
    pub fn apply_pose(&mut self, pose: &Pose) {
        let distance = (self.target - self.position).length().max(1.0);
        self.position = pose.position;
        self.target = pose.position + pose.rotation * Vec3::NEG_Z * distance;
        self.up = pose.rotation * Vec3::Y;
    }

    /// Cast a ray from the camera through a screen point.
    ///
    /// Screen coordinates start at the bottom-left corner with y pointing
    /// up, in the same units as `viewport`.
    pub fn screen_point_to_ray(&self, point: Vec2, viewport: Vec2) -> Option<Ray> {
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return None;
        }

        let ndc = Vec2::new(
            2.0 * point.x / viewport.x - 1.0,
            2.0 * point.y / viewport.y - 1.0,
        );
        let inverse = self.view_projection_matrix().inverse();
        // perspective_rh maps the near plane to depth 0 and the far plane to 1
        let near = inverse.project_point3(ndc.extend(0.0));
        let far = inverse.project_point3(ndc.extend(1.0));
        if !near.is_finite() || !far.is_finite() {
            return None;
        }
        Ray::new(near, far - near)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    fn camera() -> Camera3D {
        Camera3D::new_perspective(Vec3::ZERO, Vec3::NEG_Z, 60f32.to_radians(), 1.0)
            .with_clip_planes(0.01, 100.0)
    }

    #[test]
    fn test_center_ray_points_forward() {
        let viewport = Vec2::new(1000.0, 1000.0);
        let ray = camera()
            .screen_point_to_ray(Vec2::new(500.0, 500.0), viewport)
            .unwrap();
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4);
        assert!(ray.origin.length() < 0.02);
    }

    #[test]
    fn test_screen_axes_follow_bottom_left_origin() {
        let viewport = Vec2::new(1000.0, 1000.0);
        let cam = camera();
        let right = cam.screen_point_to_ray(Vec2::new(900.0, 500.0), viewport).unwrap();
        let top = cam.screen_point_to_ray(Vec2::new(500.0, 900.0), viewport).unwrap();
        assert!(right.direction.x > 0.0);
        assert!(top.direction.y > 0.0);
    }

    #[test]
    fn test_degenerate_viewport_has_no_ray() {
        assert!(camera().screen_point_to_ray(Vec2::ZERO, Vec2::ZERO).is_none());
    }

    #[test]
    fn test_apply_pose_turns_camera() {
        let mut cam = camera();
        let pose = Pose::new(
            Vec3::new(1.0, 0.0, 0.0),
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        );
        cam.apply_pose(&pose);

        assert_eq!(cam.position, Vec3::new(1.0, 0.0, 0.0));
        let forward = (cam.target - cam.position).normalize();
        // Yawing +90 degrees turns -Z into -X
        assert!((forward - Vec3::NEG_X).length() < 1e-5);
    }
}

//! Viewing camera and ray casting
//!
//! Screen points are turned into world-space rays here so that touches can
//! be hit-tested against spawned content.

pub mod camera;
pub mod ray;

pub use camera::Camera3D;
pub use ray::Ray;

//! Seams to the physics engine
//!
//! The locomotion core never integrates bodies or detects collisions itself.
//! It asks a [`GroundQuery`] what is below the character and tells a
//! [`BodyDriver`] how to adjust the character's rigid body.

use glam::Vec3;

/// A ray hit reported by the physics engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance along the ray to the hit point
    pub distance: f32,
    /// Surface normal at the hit point
    pub normal: Vec3,
}

/// Synchronous collision-world query used by the ground sensor
pub trait GroundQuery {
    /// Cast a ray against colliders in `mask`, ignoring the character itself
    fn ray_cast(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: u32) -> Option<RayHit>;
}

/// The character's rigid body as seen by the locomotion core
pub trait BodyDriver {
    /// Centre of the body in world space
    fn position(&self) -> Vec3;
    /// Half of the body's current vertical extent
    fn half_height(&self) -> f32;
    /// Current linear velocity
    fn velocity(&self) -> Vec3;
    /// Add a mass-independent velocity change
    fn apply_velocity_delta(&mut self, delta: Vec3);
    /// Apply a mass-relative impulse
    fn apply_impulse(&mut self, impulse: Vec3);
    /// Enable or disable world gravity for the body
    fn set_gravity_enabled(&mut self, enabled: bool);
    /// Scale the body's height relative to its spawn height
    fn set_height_scale(&mut self, scale: f32);
    /// Face the body toward `yaw_degrees` around world up
    fn set_yaw(&mut self, yaw_degrees: f32);
}

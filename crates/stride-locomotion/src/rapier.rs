//! rapier3d implementation of the physics seams

use glam::Vec3;
use stride_physics::{CharacterBody, PhysicsWorld};

use crate::error::LocomotionError;
use crate::physics::{BodyDriver, GroundQuery, RayHit};

/// A character body in a rapier world, borrowed for one tick
pub struct RapierCharacter<'w> {
    world: &'w mut PhysicsWorld,
    body: &'w mut CharacterBody,
}

impl<'w> RapierCharacter<'w> {
    /// Bind a spawned body to its world
    ///
    /// Fails if the body or its collider are not part of `world`.
    pub fn new(world: &'w mut PhysicsWorld, body: &'w mut CharacterBody) -> Result<Self, LocomotionError> {
        if world.get_rigid_body(body.body_handle).is_none() {
            return Err(LocomotionError::MissingBody);
        }
        if world.get_collider(body.collider_handle).is_none() {
            return Err(LocomotionError::MissingCollider);
        }
        Ok(Self { world, body })
    }
}

impl GroundQuery for RapierCharacter<'_> {
    fn ray_cast(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: u32) -> Option<RayHit> {
        self.world
            .raycast_masked(origin, direction, max_distance, mask, Some(self.body.body_handle))
            .map(|hit| RayHit {
                distance: hit.distance,
                normal: hit.normal,
            })
    }
}

impl BodyDriver for RapierCharacter<'_> {
    fn position(&self) -> Vec3 {
        self.body.center(&*self.world).unwrap_or_default()
    }

    fn half_height(&self) -> f32 {
        self.body.half_height()
    }

    fn velocity(&self) -> Vec3 {
        self.body.velocity(&*self.world).unwrap_or_default()
    }

    fn apply_velocity_delta(&mut self, delta: Vec3) {
        self.body.apply_velocity_delta(self.world, delta);
    }

    fn apply_impulse(&mut self, impulse: Vec3) {
        self.body.apply_impulse(self.world, impulse);
    }

    fn set_gravity_enabled(&mut self, enabled: bool) {
        self.body.set_gravity_enabled(self.world, enabled);
    }

    fn set_height_scale(&mut self, scale: f32) {
        self.body.set_height_scale(self.world, scale);
    }

    fn set_yaw(&mut self, yaw_degrees: f32) {
        self.body.set_yaw(self.world, yaw_degrees);
    }
}

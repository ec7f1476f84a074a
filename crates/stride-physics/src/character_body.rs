//! Dynamic capsule body driven by velocity changes and impulses

use glam::Vec3;
use nalgebra::{UnitQuaternion, Vector3};
use rapier3d::prelude::*;
use tracing::debug;

use crate::{PhysicsWorld, CHARACTER_GROUP};

/// Character body configuration
#[derive(Debug, Clone)]
pub struct CharacterBodyConfig {
    /// Standing capsule height (default: 1.8m)
    pub height: f32,
    /// Capsule radius (default: 0.4m)
    pub radius: f32,
    /// Body mass in kilograms (default: 1.0, impulses are mass-relative)
    pub mass: f32,
}

impl Default for CharacterBodyConfig {
    fn default() -> Self {
        Self {
            height: 1.8,
            radius: 0.4,
            mass: 1.0,
        }
    }
}

/// A rotation-locked dynamic capsule living in a [`PhysicsWorld`]
#[derive(Debug, Clone)]
pub struct CharacterBody {
    /// Configuration
    pub config: CharacterBodyConfig,
    /// Rigid body handle
    pub body_handle: RigidBodyHandle,
    /// Capsule collider handle
    pub collider_handle: ColliderHandle,
    /// Current height scale (1.0 = standing height)
    height_scale: f32,
}

impl CharacterBody {
    /// Spawn the character with its feet at `feet_position`
    pub fn spawn(physics: &mut PhysicsWorld, config: CharacterBodyConfig, feet_position: Vec3) -> Self {
        let center = feet_position + Vec3::Y * (config.height / 2.0);
        let rigid_body = RigidBodyBuilder::dynamic()
            .translation(vector![center.x, center.y, center.z])
            .lock_rotations()
            .ccd_enabled(true)
            .build();
        let collider = Self::capsule(&config, 1.0);
        let (body_handle, collider_handle) = physics.add_dynamic_body(rigid_body, collider);

        debug!(?center, "spawned character body");

        Self {
            config,
            body_handle,
            collider_handle,
            height_scale: 1.0,
        }
    }

    fn capsule(config: &CharacterBodyConfig, height_scale: f32) -> Collider {
        let height = config.height * height_scale;
        let half_segment = (height - 2.0 * config.radius) / 2.0;
        ColliderBuilder::capsule_y(half_segment.max(0.01), config.radius)
            .collision_groups(InteractionGroups::new(
                Group::from_bits_truncate(CHARACTER_GROUP),
                Group::ALL,
            ))
            .mass(config.mass)
            // Walls should not hold the character up
            .friction(0.0)
            .friction_combine_rule(CoefficientCombineRule::Min)
            .restitution(0.0)
            .build()
    }

    /// Current height scale
    pub fn height_scale(&self) -> f32 {
        self.height_scale
    }

    /// Half of the current total capsule height
    pub fn half_height(&self) -> f32 {
        self.config.height * self.height_scale / 2.0
    }

    /// Resize the capsule to `scale` times the standing height
    pub fn set_height_scale(&mut self, physics: &mut PhysicsWorld, scale: f32) {
        if scale == self.height_scale {
            return;
        }
        let half_segment = (self.config.height * scale - 2.0 * self.config.radius) / 2.0;
        if let Some(collider) = physics.get_collider_mut(self.collider_handle) {
            collider.set_shape(SharedShape::capsule_y(half_segment.max(0.01), self.config.radius));
            self.height_scale = scale;
        }
    }

    /// Capsule centre in world space
    pub fn center(&self, physics: &PhysicsWorld) -> Option<Vec3> {
        physics.get_rigid_body(self.body_handle).map(|body| {
            let t = body.translation();
            Vec3::new(t.x, t.y, t.z)
        })
    }

    /// Current linear velocity
    pub fn velocity(&self, physics: &PhysicsWorld) -> Option<Vec3> {
        physics.get_rigid_body(self.body_handle).map(|body| {
            let v = body.linvel();
            Vec3::new(v.x, v.y, v.z)
        })
    }

    /// Add `delta` to the linear velocity (mass-independent)
    pub fn apply_velocity_delta(&self, physics: &mut PhysicsWorld, delta: Vec3) {
        if let Some(body) = physics.get_rigid_body_mut(self.body_handle) {
            let v = *body.linvel() + vector![delta.x, delta.y, delta.z];
            body.set_linvel(v, true);
        }
    }

    /// Apply an impulse at the centre of mass
    pub fn apply_impulse(&self, physics: &mut PhysicsWorld, impulse: Vec3) {
        if let Some(body) = physics.get_rigid_body_mut(self.body_handle) {
            body.apply_impulse(vector![impulse.x, impulse.y, impulse.z], true);
        }
    }

    /// Toggle world gravity for this body
    pub fn set_gravity_enabled(&self, physics: &mut PhysicsWorld, enabled: bool) {
        if let Some(body) = physics.get_rigid_body_mut(self.body_handle) {
            let scale = if enabled { 1.0 } else { 0.0 };
            if body.gravity_scale() != scale {
                body.set_gravity_scale(scale, true);
            }
        }
    }

    /// Turn the body to face `yaw_degrees` around world up
    pub fn set_yaw(&self, physics: &mut PhysicsWorld, yaw_degrees: f32) {
        if let Some(body) = physics.get_rigid_body_mut(self.body_handle) {
            let rotation = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), yaw_degrees.to_radians());
            body.set_rotation(rotation, true);
        }
    }
}

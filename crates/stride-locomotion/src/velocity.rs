//! Velocity tracking toward the input target
//!
//! Each tick the controller compares the body's planar velocity to the
//! velocity the input asks for and emits a bounded correction. Bounding the
//! correction per axis turns a snap into an acceleration.

use glam::{Quat, Vec2, Vec3};

use crate::body::LocomotionBody;
use crate::contact::ContactState;
use crate::input::InputSnapshot;
use crate::settings::LocomotionSettings;

/// What the physics body should do this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityCommand {
    /// Velocity change to add to the body
    pub delta: Vec3,
    /// Whether world gravity acts on the body
    pub gravity_enabled: bool,
}

impl VelocityCommand {
    /// No correction, gravity on
    pub const IDLE: Self = Self {
        delta: Vec3::ZERO,
        gravity_enabled: true,
    };
}

/// Computes velocity corrections from input and contact state
#[derive(Debug, Clone, Copy, Default)]
pub struct VelocityController;

impl VelocityController {
    /// World-space planar direction for `move_axis` when facing `yaw_degrees`
    ///
    /// Yaw 0 faces +Z; input x strafes along +X.
    pub fn move_direction(move_axis: Vec2, yaw_degrees: f32) -> Vec3 {
        let local = Vec3::new(move_axis.x, 0.0, move_axis.y).clamp_length_max(1.0);
        Quat::from_rotation_y(yaw_degrees.to_radians()) * local
    }

    /// Speed the input is asking for
    pub fn target_speed(
        input: &InputSnapshot,
        contact: ContactState,
        settings: &LocomotionSettings,
        crouching: bool,
    ) -> f32 {
        let can_sprint =
            settings.enable_sprint && input.sprint && contact.is_grounded() && !crouching;
        if can_sprint {
            settings.sprint_speed
        } else {
            settings.effective_walk_speed(crouching)
        }
    }

    /// Planar correction toward the target, each axis clamped to `max_velocity_change`
    pub fn planar_delta(target: Vec3, current: Vec3, max_velocity_change: f32) -> Vec3 {
        let raw = target - current;
        Vec3::new(
            raw.x.clamp(-max_velocity_change, max_velocity_change),
            0.0,
            raw.z.clamp(-max_velocity_change, max_velocity_change),
        )
    }

    /// Compute this tick's velocity command
    pub fn step(
        input: &InputSnapshot,
        contact: ContactState,
        settings: &LocomotionSettings,
        current_velocity: Vec3,
        body: &LocomotionBody,
        dt: f32,
    ) -> VelocityCommand {
        if !settings.enable_movement {
            return VelocityCommand::IDLE;
        }

        let direction = Self::move_direction(input.move_axis, body.yaw);
        let speed = Self::target_speed(input, contact, settings, body.is_crouching());
        let target = Vec3::new(direction.x, 0.0, direction.z) * speed;
        let planar = Self::planar_delta(target, current_velocity, settings.max_velocity_change);

        match contact {
            // No air control
            ContactState::Airborne => VelocityCommand::IDLE,
            ContactState::GroundedSteep { .. } => VelocityCommand {
                delta: Vec3::NEG_Y * settings.steep_push_acceleration * dt,
                gravity_enabled: true,
            },
            // Anchoring needs a fresh ray hit; a coyote hold off a ledge falls normally
            ContactState::GroundedSlope { normal } if !body.exiting_slope && body.ground_hit => {
                let along_surface = planar - normal * planar.dot(normal);
                let limit = settings.max_velocity_change;
                let mut delta = along_surface * settings.slope_multiplier;
                // Projection can lengthen a single axis past the clamp
                delta.x = delta.x.clamp(-limit, limit);
                delta.z = delta.z.clamp(-limit, limit);
                if current_velocity.y > 0.0 {
                    delta.y -= settings.slope_anchor_acceleration * dt;
                }
                VelocityCommand {
                    delta,
                    gravity_enabled: !settings.anchor_replaces_gravity,
                }
            }
            ContactState::GroundedFlat | ContactState::GroundedSlope { .. } => VelocityCommand {
                delta: planar,
                gravity_enabled: true,
            },
        }
    }
}

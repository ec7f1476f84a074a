//! Ground sensing with coyote-time hysteresis

use glam::Vec3;
use tracing::debug;

use crate::body::{JumpPhase, LocomotionBody, TIMER_EPSILON};
use crate::contact::ContactState;
use crate::physics::GroundQuery;
use crate::settings::LocomotionSettings;

/// Classifies what the character stands on each physics tick
///
/// A single missed ray does not make the character airborne: the last
/// grounded contact is kept until `time_before_not_grounded` seconds pass
/// without a hit. This smooths over seams and small steps. No hold is
/// granted while a jump cooldown runs, so leaving the ground by jumping is
/// immediate.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroundSensor;

impl GroundSensor {
    /// Probe origin, halfway between the body centre and its feet
    pub fn ray_origin(position: Vec3, half_height: f32) -> Vec3 {
        position - Vec3::Y * (half_height / 2.0)
    }

    /// Probe the ground below `position` and update the body's coyote timer
    pub fn sense<Q: GroundQuery + ?Sized>(
        query: &Q,
        position: Vec3,
        half_height: f32,
        settings: &LocomotionSettings,
        body: &mut LocomotionBody,
        dt: f32,
    ) -> ContactState {
        let origin = Self::ray_origin(position, half_height);
        let hit = query.ray_cast(
            origin,
            Vec3::NEG_Y,
            settings.ground_check_distance,
            settings.ground_mask,
        );

        match hit {
            Some(hit) => {
                let contact = ContactState::classify(hit.normal, settings.max_slope_angle);
                if contact.name() != body.last_ground.name() {
                    debug!(
                        contact = contact.name(),
                        angle = contact.slope_angle().unwrap_or(0.0),
                        "ground contact changed"
                    );
                }
                // No coyote hold while a jump is lifting off
                body.ground_timer = if body.jump_phase == JumpPhase::Jumped {
                    0.0
                } else {
                    settings.time_before_not_grounded
                };
                body.last_ground = contact;
                body.ground_hit = true;
                contact
            }
            None => {
                body.ground_hit = false;
                body.ground_timer -= dt;
                if body.ground_timer > TIMER_EPSILON {
                    body.last_ground
                } else {
                    body.ground_timer = 0.0;
                    if body.last_ground.is_grounded() {
                        debug!("ground lost");
                    }
                    body.last_ground = ContactState::Airborne;
                    ContactState::Airborne
                }
            }
        }
    }
}

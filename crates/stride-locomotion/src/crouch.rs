//! Crouch stance transitions

use tracing::debug;

use crate::body::{LocomotionBody, Stance};
use crate::contact::ContactState;
use crate::settings::LocomotionSettings;

/// A stance transition the physics body has to follow
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StanceChange {
    /// Stance after the transition
    pub stance: Stance,
    /// Height scale to apply to the body
    pub height_scale: f32,
}

/// Standing ⇄ Crouching on crouch input edges
#[derive(Debug, Clone, Copy, Default)]
pub struct CrouchController;

impl CrouchController {
    /// Follow the crouch input level for this tick
    ///
    /// Crouching starts on a press while grounded. Standing up happens on
    /// release wherever the body is, and restores the height cached at spawn.
    pub fn step(
        crouch_held: bool,
        contact: ContactState,
        settings: &LocomotionSettings,
        body: &mut LocomotionBody,
    ) -> Option<StanceChange> {
        let pressed = crouch_held && !body.crouch_was_held;
        let released = !crouch_held && body.crouch_was_held;
        body.crouch_was_held = crouch_held;

        match body.stance {
            Stance::Standing if pressed && settings.enable_crouch && contact.is_grounded() => {
                body.stance = Stance::Crouching;
                body.height_scale = body.standing_height_scale() * settings.crouch_scale_height;
                debug!(height_scale = body.height_scale, "crouch");
                Some(StanceChange {
                    stance: Stance::Crouching,
                    height_scale: body.height_scale,
                })
            }
            Stance::Crouching if released => {
                body.stance = Stance::Standing;
                body.height_scale = body.standing_height_scale();
                debug!("stand");
                Some(StanceChange {
                    stance: Stance::Standing,
                    height_scale: body.height_scale,
                })
            }
            _ => None,
        }
    }
}

//! Jump gating
//!
//! A jump fires on a fresh press while grounded and then locks out further
//! jumps until the cooldown runs down. Rejected presses are dropped rather
//! than buffered.

use glam::Vec3;
use tracing::debug;

use crate::body::{JumpPhase, LocomotionBody, TIMER_EPSILON};
use crate::contact::ContactState;
use crate::input::InputSnapshot;
use crate::settings::LocomotionSettings;

/// Ready → Jumped → Ready state machine
#[derive(Debug, Clone, Copy, Default)]
pub struct JumpController;

impl JumpController {
    /// Count the cooldown down; returns to Ready once it elapses
    pub fn tick(body: &mut LocomotionBody, dt: f32) {
        if body.jump_phase != JumpPhase::Jumped {
            return;
        }
        body.jump_cooldown -= dt;
        if body.jump_cooldown <= TIMER_EPSILON {
            body.jump_cooldown = 0.0;
            body.jump_phase = JumpPhase::Ready;
            body.exiting_slope = false;
            debug!("jump ready");
        }
    }

    /// Whether a jump could fire right now for a grounded body
    pub fn is_ready(body: &LocomotionBody) -> bool {
        body.jump_phase == JumpPhase::Ready
    }

    /// Evaluate the jump press for this tick
    ///
    /// Clears `input.jump` whether or not the jump fires. Returns `true` when
    /// the caller should apply [`JumpController::impulse`].
    pub fn try_jump(
        input: &mut InputSnapshot,
        contact: ContactState,
        settings: &LocomotionSettings,
        body: &mut LocomotionBody,
    ) -> bool {
        if !input.consume_jump() {
            return false;
        }
        if !settings.enable_jump || !contact.is_grounded() || !Self::is_ready(body) {
            return false;
        }

        body.jump_phase = JumpPhase::Jumped;
        body.jump_cooldown = settings.jump_cooldown;
        body.exiting_slope = true;
        // Only a fresh ray hit counts as ground after leaving it
        body.ground_timer = 0.0;
        body.last_ground = ContactState::Airborne;
        debug!(contact = contact.name(), "jump");
        true
    }

    /// Upward impulse for one jump
    pub fn impulse(settings: &LocomotionSettings) -> Vec3 {
        Vec3::Y * settings.jump_force
    }
}

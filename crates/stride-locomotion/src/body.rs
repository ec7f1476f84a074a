//! Per-character runtime state

use serde::{Deserialize, Serialize};

use crate::camera::wrap_degrees;
use crate::contact::ContactState;

/// Countdown timers at or below this many seconds count as elapsed
pub const TIMER_EPSILON: f32 = 1e-4;

/// Body stance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stance {
    #[default]
    Standing,
    Crouching,
}

/// Jump gate phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpPhase {
    /// A jump may fire
    #[default]
    Ready,
    /// A jump fired and the cooldown is running
    Jumped,
}

/// Mutable locomotion state owned by exactly one character
///
/// Created at spawn and dropped with the character. Velocity is not stored
/// here; the physics engine owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocomotionBody {
    /// Current stance
    pub stance: Stance,
    /// Body heading in degrees, wrapped into [0, 360)
    pub yaw: f32,
    /// Head pitch in degrees
    pub pitch: f32,
    /// Jump gate phase
    pub jump_phase: JumpPhase,
    /// Seconds until the next jump is allowed
    pub jump_cooldown: f32,
    /// Set right after a jump so slope anchoring does not cancel it
    pub exiting_slope: bool,
    /// Seconds of coyote time left after the last ground hit
    pub ground_timer: f32,
    /// Contact reported by the last successful ground ray
    pub last_ground: ContactState,
    /// Whether this tick's ground ray hit, as opposed to a coyote hold
    pub ground_hit: bool,
    /// Crouch input level seen on the previous tick
    pub crouch_was_held: bool,
    /// Height scale cached at spawn, restored when standing up
    standing_height_scale: f32,
    /// Height scale currently applied to the physics body
    pub height_scale: f32,
}

impl Default for LocomotionBody {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl LocomotionBody {
    /// Create state for a character spawned facing `yaw` degrees
    pub fn new(yaw: f32) -> Self {
        Self::with_standing_height(yaw, 1.0)
    }

    /// Create state with a custom standing height scale
    pub fn with_standing_height(yaw: f32, standing_height_scale: f32) -> Self {
        Self {
            stance: Stance::Standing,
            yaw: wrap_degrees(yaw),
            pitch: 0.0,
            jump_phase: JumpPhase::Ready,
            jump_cooldown: 0.0,
            exiting_slope: false,
            ground_timer: 0.0,
            last_ground: ContactState::Airborne,
            ground_hit: false,
            crouch_was_held: false,
            standing_height_scale,
            height_scale: standing_height_scale,
        }
    }

    /// Height scale cached at spawn
    pub fn standing_height_scale(&self) -> f32 {
        self.standing_height_scale
    }

    /// Whether the body is crouched
    pub fn is_crouching(&self) -> bool {
        self.stance == Stance::Crouching
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_body_is_standing_and_ready() {
        let body = LocomotionBody::new(-90.0);
        assert_eq!(body.stance, Stance::Standing);
        assert_eq!(body.jump_phase, JumpPhase::Ready);
        assert_eq!(body.yaw, 270.0);
        assert_eq!(body.height_scale, body.standing_height_scale());
        assert!(!body.last_ground.is_grounded());
    }
}

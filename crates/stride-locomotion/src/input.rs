//! Per-tick input snapshot
//!
//! Produced by whatever polls devices and consumed read-only by the
//! locomotion core, except for the jump flag which the core clears once it
//! has evaluated it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Normalized input for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Movement axes, x = strafe right, y = forward, each in [-1, 1]
    pub move_axis: Vec2,
    /// Look delta for this frame, x = yaw, y = pitch
    pub look: Vec2,
    /// Jump was pressed since the last physics tick
    pub jump: bool,
    /// Sprint is held
    pub sprint: bool,
    /// Crouch is held
    pub crouch: bool,
}

impl InputSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the movement axes, clamping each component to [-1, 1]
    pub fn with_move(mut self, move_axis: Vec2) -> Self {
        self.set_move(move_axis);
        self
    }

    /// Set the look delta
    pub fn with_look(mut self, look: Vec2) -> Self {
        self.look = look;
        self
    }

    /// Mark jump as pressed
    pub fn with_jump(mut self) -> Self {
        self.jump = true;
        self
    }

    /// Set the sprint level
    pub fn with_sprint(mut self, held: bool) -> Self {
        self.sprint = held;
        self
    }

    /// Set the crouch level
    pub fn with_crouch(mut self, held: bool) -> Self {
        self.crouch = held;
        self
    }

    /// Set the movement axes, clamping each component to [-1, 1]
    pub fn set_move(&mut self, move_axis: Vec2) {
        let axis = if move_axis.is_finite() { move_axis } else { Vec2::ZERO };
        self.move_axis = axis.clamp(Vec2::NEG_ONE, Vec2::ONE);
    }

    /// Take the jump press, leaving the flag cleared
    pub fn consume_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump)
    }
}

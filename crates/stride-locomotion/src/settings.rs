//! Locomotion tuning data
//!
//! A flat record of every constant the locomotion state machine reads. The
//! controller never writes to it; derived values such as the crouched walk
//! speed are computed on demand.

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// All tunable locomotion constants for one character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionSettings {
    // Ground check
    /// Collision group bits considered ground
    pub ground_mask: u32,
    /// Length of the downward ground ray in meters
    pub ground_check_distance: f32,
    /// Seconds without a ground hit before the body counts as airborne
    pub time_before_not_grounded: f32,
    /// Steepest walkable slope in degrees
    pub max_slope_angle: f32,
    /// Speed reduction applied while walking on a slope, in (0, 1]
    pub slope_multiplier: f32,
    /// Downward acceleration (m/s²) used to push the body off unwalkable slopes
    pub steep_push_acceleration: f32,
    /// Downward acceleration (m/s²) holding the body on a slope while it drifts upward
    pub slope_anchor_acceleration: f32,
    /// Disable gravity while anchored to a walkable slope
    pub anchor_replaces_gravity: bool,

    // Jump
    /// Whether jumping is allowed at all
    pub enable_jump: bool,
    /// Upward impulse applied on jump
    pub jump_force: f32,
    /// Seconds between jumps
    pub jump_cooldown: f32,

    // Movement
    /// Whether planar movement is allowed at all
    pub enable_movement: bool,
    /// Walking speed in meters per second
    pub walk_speed: f32,
    /// Whether sprinting is allowed
    pub enable_sprint: bool,
    /// Sprinting speed in meters per second
    pub sprint_speed: f32,
    /// Largest per-axis velocity change applied in one tick
    pub max_velocity_change: f32,

    // Crouch
    /// Whether crouching is allowed
    pub enable_crouch: bool,
    /// Height scale while crouched (1.0 = standing height)
    pub crouch_scale_height: f32,
    /// Walk speed multiplier while crouched
    pub crouch_speed_modifier: f32,

    // Camera
    /// Highest pitch in degrees
    pub top_angle: f32,
    /// Lowest pitch in degrees
    pub bottom_angle: f32,
    /// Degrees of rotation per unit of look input
    pub mouse_sensitivity: f32,
    /// Look inputs with a squared length below this are ignored
    pub look_deadzone: f32,
    /// Multiply look speed by the frame delta (analog sticks)
    pub look_scales_with_delta_time: bool,
}

impl Default for LocomotionSettings {
    fn default() -> Self {
        Self {
            ground_mask: u32::MAX,
            ground_check_distance: 0.75,
            time_before_not_grounded: 0.3,
            max_slope_angle: 45.0,
            slope_multiplier: 0.8,
            steep_push_acceleration: 30.0,
            slope_anchor_acceleration: 80.0,
            anchor_replaces_gravity: true,
            enable_jump: true,
            jump_force: 5.0,
            jump_cooldown: 0.3,
            enable_movement: true,
            walk_speed: 5.0,
            enable_sprint: true,
            sprint_speed: 10.0,
            max_velocity_change: 10.0,
            enable_crouch: true,
            crouch_scale_height: 0.5,
            crouch_speed_modifier: 0.5,
            top_angle: 90.0,
            bottom_angle: -90.0,
            mouse_sensitivity: 2.0,
            look_deadzone: 0.01,
            look_scales_with_delta_time: false,
        }
    }
}

impl LocomotionSettings {
    /// Parse settings from TOML and validate them
    pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
        let settings: Self =
            toml::from_str(source).map_err(|e| SettingsError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject configurations the state machine cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let non_negative = [
            ("walk_speed", self.walk_speed),
            ("sprint_speed", self.sprint_speed),
            ("max_velocity_change", self.max_velocity_change),
            ("jump_force", self.jump_force),
            ("jump_cooldown", self.jump_cooldown),
            ("time_before_not_grounded", self.time_before_not_grounded),
            ("steep_push_acceleration", self.steep_push_acceleration),
            ("slope_anchor_acceleration", self.slope_anchor_acceleration),
            ("crouch_speed_modifier", self.crouch_speed_modifier),
            ("mouse_sensitivity", self.mouse_sensitivity),
            ("look_deadzone", self.look_deadzone),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::Negative { field, value });
            }
        }

        if self.sprint_speed < self.walk_speed {
            return Err(SettingsError::SprintSlowerThanWalk {
                walk: self.walk_speed,
                sprint: self.sprint_speed,
            });
        }
        if !(self.ground_check_distance > 0.0) || !self.ground_check_distance.is_finite() {
            return Err(SettingsError::NonPositiveGroundCheck(self.ground_check_distance));
        }
        if !(self.max_slope_angle > 0.0 && self.max_slope_angle < 90.0) {
            return Err(SettingsError::SlopeAngleOutOfRange(self.max_slope_angle));
        }
        if !(self.bottom_angle <= self.top_angle) {
            return Err(SettingsError::InvertedPitchRange {
                bottom: self.bottom_angle,
                top: self.top_angle,
            });
        }
        if !(self.slope_multiplier > 0.0 && self.slope_multiplier <= 1.0) {
            return Err(SettingsError::SlopeMultiplierOutOfRange(self.slope_multiplier));
        }
        if !(self.crouch_scale_height > 0.0 && self.crouch_scale_height <= 1.0) {
            return Err(SettingsError::CrouchScaleOutOfRange(self.crouch_scale_height));
        }
        Ok(())
    }

    /// Walk speed for the given stance, derived rather than stored
    pub fn effective_walk_speed(&self, crouching: bool) -> f32 {
        if crouching {
            self.walk_speed * self.crouch_speed_modifier
        } else {
            self.walk_speed
        }
    }
}

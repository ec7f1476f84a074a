//! Construction-time errors for locomotion settings and physics wiring

/// Misconfiguration caught when settings are loaded or a controller is built.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("sprint speed {sprint} is lower than walk speed {walk}")]
    SprintSlowerThanWalk { walk: f32, sprint: f32 },

    #[error("ground check distance must be positive, got {0}")]
    NonPositiveGroundCheck(f32),

    #[error("max slope angle must be within (0, 90) degrees, got {0}")]
    SlopeAngleOutOfRange(f32),

    #[error("pitch range is inverted: bottom angle {bottom} is above top angle {top}")]
    InvertedPitchRange { bottom: f32, top: f32 },

    #[error("crouch height scale must be within (0, 1], got {0}")]
    CrouchScaleOutOfRange(f32),

    #[error("slope multiplier must be within (0, 1], got {0}")]
    SlopeMultiplierOutOfRange(f32),

    #[error("'{field}' must be finite and non-negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("failed to parse locomotion settings: {0}")]
    Parse(String),
}

/// Errors raised while wiring a locomotion controller to its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum LocomotionError {
    #[error("invalid locomotion settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("character rigid body is missing from the physics world")]
    MissingBody,

    #[error("character collider is missing from the physics world")]
    MissingCollider,
}

//! Contact classification

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Normals within this many degrees of world up count as flat ground
pub const FLAT_ANGLE_TOLERANCE: f32 = 1e-3;

/// What the character is standing on this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum ContactState {
    /// No ground within reach
    #[default]
    Airborne,
    /// Level ground
    GroundedFlat,
    /// A walkable incline
    GroundedSlope { normal: Vec3 },
    /// An incline steeper than the walkable limit
    GroundedSteep { normal: Vec3 },
}

impl ContactState {
    /// Classify a ground hit by its surface normal
    pub fn classify(normal: Vec3, max_slope_angle: f32) -> Self {
        let mut normal = normal.normalize_or_zero();
        if normal == Vec3::ZERO {
            normal = Vec3::Y;
        }
        let angle = slope_angle(normal);
        if angle <= FLAT_ANGLE_TOLERANCE {
            ContactState::GroundedFlat
        } else if angle <= max_slope_angle {
            ContactState::GroundedSlope { normal }
        } else {
            ContactState::GroundedSteep { normal }
        }
    }

    /// Whether any ground is in contact
    pub fn is_grounded(&self) -> bool {
        !matches!(self, ContactState::Airborne)
    }

    /// Contact normal, world up for flat ground, `None` when airborne
    pub fn normal(&self) -> Option<Vec3> {
        match self {
            ContactState::Airborne => None,
            ContactState::GroundedFlat => Some(Vec3::Y),
            ContactState::GroundedSlope { normal } | ContactState::GroundedSteep { normal } => {
                Some(*normal)
            }
        }
    }

    /// Angle between world up and the contact normal in degrees
    pub fn slope_angle(&self) -> Option<f32> {
        self.normal().map(slope_angle)
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            ContactState::Airborne => "airborne",
            ContactState::GroundedFlat => "flat",
            ContactState::GroundedSlope { .. } => "slope",
            ContactState::GroundedSteep { .. } => "steep",
        }
    }
}

fn slope_angle(normal: Vec3) -> f32 {
    normal.dot(Vec3::Y).clamp(-1.0, 1.0).acos().to_degrees()
}

//! First-person look orientation
//!
//! Look input turns the whole body around world up (yaw) and tilts only the
//! head pivot (pitch). Runs once per render frame, never on the physics tick.

use glam::{Quat, Vec2, Vec3};

use crate::settings::LocomotionSettings;

/// Reduce `angle` with a sign-preserving remainder, then clamp to `[min, max]`
///
/// The remainder keeps -30° as -30° instead of 330°, so signed ranges such
/// as -90..90 clamp continuously.
pub fn clamp_angle(angle: f32, min: f32, max: f32) -> f32 {
    (angle % 360.0).clamp(min, max)
}

/// Wrap a heading into [0, 360)
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Integrates look deltas into yaw and pitch
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraOrientation;

impl CameraOrientation {
    /// New `(yaw, pitch)` in degrees, or `None` when the look delta is noise
    pub fn step(
        look: Vec2,
        settings: &LocomotionSettings,
        yaw: f32,
        pitch: f32,
        dt: f32,
    ) -> Option<(f32, f32)> {
        if !look.is_finite() || look.length_squared() < settings.look_deadzone {
            return None;
        }

        let time_scale = if settings.look_scales_with_delta_time { dt } else { 1.0 };
        let speed = settings.mouse_sensitivity * time_scale;

        let pitch = clamp_angle(pitch + look.y * speed, settings.bottom_angle, settings.top_angle);
        let yaw = wrap_degrees(yaw + look.x * speed);
        Some((yaw, pitch))
    }

    /// Body heading rotation
    pub fn body_rotation(yaw: f32) -> Quat {
        Quat::from_rotation_y(yaw.to_radians())
    }

    /// Head pivot rotation relative to the body, positive pitch looks up
    pub fn head_rotation(pitch: f32) -> Quat {
        Quat::from_rotation_x(-pitch.to_radians())
    }

    /// World-space view direction
    pub fn forward(yaw: f32, pitch: f32) -> Vec3 {
        Self::body_rotation(yaw) * Self::head_rotation(pitch) * Vec3::Z
    }

    /// World-space right direction on the ground plane
    pub fn right(yaw: f32) -> Vec3 {
        Self::body_rotation(yaw) * Vec3::X
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    #[test]
    fn test_deadzone_ignores_noise() {
        let settings = LocomotionSettings::default();
        assert_eq!(
            CameraOrientation::step(Vec2::new(0.05, 0.05), &settings, 12.0, -4.0, 0.016),
            None
        );
    }

    #[test]
    fn test_look_integrates_with_sensitivity() {
        let settings = LocomotionSettings {
            mouse_sensitivity: 2.0,
            ..Default::default()
        };
        let (yaw, pitch) =
            CameraOrientation::step(Vec2::new(5.0, -3.0), &settings, 10.0, 0.0, 0.016).unwrap();
        assert_eq!(yaw, 20.0);
        assert_eq!(pitch, -6.0);
    }

    #[test]
    fn test_yaw_wraps() {
        let settings = LocomotionSettings::default();
        let (yaw, _) = CameraOrientation::step(Vec2::new(10.0, 0.0), &settings, 350.0, 0.0, 0.016).unwrap();
        assert!((yaw - 10.0).abs() < 1e-4);
        let (yaw, _) = CameraOrientation::step(Vec2::new(-10.0, 0.0), &settings, 5.0, 0.0, 0.016).unwrap();
        assert!((yaw - 345.0).abs() < 1e-4);
    }

    #[test]
    fn test_pitch_clamped_to_asymmetric_range() {
        let settings = LocomotionSettings {
            top_angle: 60.0,
            bottom_angle: -30.0,
            ..Default::default()
        };
        let (_, pitch) = CameraOrientation::step(Vec2::new(0.0, 100.0), &settings, 0.0, 0.0, 0.016).unwrap();
        assert_eq!(pitch, 60.0);
        let (_, pitch) = CameraOrientation::step(Vec2::new(0.0, -100.0), &settings, 0.0, 0.0, 0.016).unwrap();
        assert_eq!(pitch, -30.0);
    }

    #[test]
    fn test_delta_time_scaling() {
        let settings = LocomotionSettings {
            mouse_sensitivity: 100.0,
            look_scales_with_delta_time: true,
            ..Default::default()
        };
        let (yaw, _) = CameraOrientation::step(Vec2::new(1.0, 0.0), &settings, 0.0, 0.0, 0.5).unwrap();
        assert_eq!(yaw, 50.0);
    }

    #[test]
    fn test_wrap_degrees_stays_below_full_turn() {
        assert_eq!(wrap_degrees(-1e-8), 0.0);
        assert_eq!(wrap_degrees(720.0), 0.0);
        assert_eq!(wrap_degrees(-90.0), 270.0);
    }

    #[test]
    fn test_clamp_angle_keeps_sign() {
        assert_eq!(clamp_angle(-30.0, -90.0, 90.0), -30.0);
        assert_eq!(clamp_angle(400.0, -90.0, 90.0), 40.0);
        assert_eq!(clamp_angle(-400.0, -90.0, 90.0), -40.0);
    }

    #[test]
    fn test_pitch_stays_in_range_for_any_sequence() {
        let mut rng = StdRng::seed_from_u64(42);
        let settings = LocomotionSettings {
            top_angle: 75.0,
            bottom_angle: -80.0,
            ..Default::default()
        };
        let (mut yaw, mut pitch) = (0.0_f32, 0.0_f32);

        for _ in 0..10_000 {
            let look = Vec2::new(rng.gen_range(-500.0..500.0), rng.gen_range(-500.0..500.0));
            if let Some((y, p)) = CameraOrientation::step(look, &settings, yaw, pitch, 1.0 / 144.0) {
                yaw = y;
                pitch = p;
            }
            assert!(pitch >= settings.bottom_angle && pitch <= settings.top_angle);
            assert!((0.0..360.0).contains(&yaw));
        }
    }

    #[test]
    fn test_forward_follows_yaw_and_pitch() {
        assert!((CameraOrientation::forward(0.0, 0.0) - Vec3::Z).length() < 1e-6);
        assert!((CameraOrientation::forward(90.0, 0.0) - Vec3::X).length() < 1e-5);
        assert!(CameraOrientation::forward(0.0, 45.0).y > 0.0);
        assert!((CameraOrientation::right(0.0) - Vec3::X).length() < 1e-6);
    }
}

//! Per-character locomotion driver
//!
//! Owns the settings and runtime state of one character and runs the
//! components in a fixed order each physics tick:
//! ground sensor, velocity, jump, crouch. Look input is handled separately
//! once per render frame.

use glam::{Quat, Vec3};
use tracing::trace;

use crate::body::LocomotionBody;
use crate::camera::CameraOrientation;
use crate::contact::ContactState;
use crate::crouch::{CrouchController, StanceChange};
use crate::error::SettingsError;
use crate::input::InputSnapshot;
use crate::jump::JumpController;
use crate::physics::{BodyDriver, GroundQuery};
use crate::sensor::GroundSensor;
use crate::settings::LocomotionSettings;
use crate::velocity::{VelocityCommand, VelocityController};

/// What happened during one physics tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Contact reported by the ground sensor
    pub contact: ContactState,
    /// Velocity command sent to the body
    pub command: VelocityCommand,
    /// Whether a jump impulse was applied
    pub jumped: bool,
    /// Stance transition applied this tick, if any
    pub stance_change: Option<StanceChange>,
}

/// Locomotion state machine for one character
#[derive(Debug, Clone)]
pub struct LocomotionController {
    /// Tuning data, read-only once validated
    settings: LocomotionSettings,
    /// Runtime state
    body: LocomotionBody,
}

impl LocomotionController {
    /// Create a controller facing +Z
    pub fn new(settings: LocomotionSettings) -> Result<Self, SettingsError> {
        Self::with_yaw(settings, 0.0)
    }

    /// Create a controller facing `yaw` degrees
    pub fn with_yaw(settings: LocomotionSettings, yaw: f32) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            settings,
            body: LocomotionBody::new(yaw),
        })
    }

    /// Tuning data
    pub fn settings(&self) -> &LocomotionSettings {
        &self.settings
    }

    /// Runtime state
    pub fn body(&self) -> &LocomotionBody {
        &self.body
    }

    /// Run one fixed physics tick
    ///
    /// Clears `input.jump` once it has been evaluated.
    pub fn step<P>(&mut self, physics: &mut P, input: &mut InputSnapshot, dt: f32) -> TickReport
    where
        P: GroundQuery + BodyDriver,
    {
        let settings = &self.settings;
        let body = &mut self.body;

        physics.set_yaw(body.yaw);
        JumpController::tick(body, dt);

        let position = physics.position();
        let half_height = physics.half_height();
        let contact = GroundSensor::sense(&*physics, position, half_height, settings, body, dt);

        let mut command =
            VelocityController::step(input, contact, settings, physics.velocity(), body, dt);

        let jumped = JumpController::try_jump(input, contact, settings, body);
        if jumped {
            // Anchoring must not fight the jump on the tick it starts
            command.gravity_enabled = true;
        }

        physics.set_gravity_enabled(command.gravity_enabled);
        if command.delta != Vec3::ZERO {
            physics.apply_velocity_delta(command.delta);
        }
        if jumped {
            physics.apply_impulse(JumpController::impulse(settings));
        }

        let stance_change = CrouchController::step(input.crouch, contact, settings, body);
        if let Some(change) = stance_change {
            physics.set_height_scale(change.height_scale);
        }

        trace!(
            contact = contact.name(),
            delta = ?command.delta,
            gravity = command.gravity_enabled,
            jumped,
            "locomotion tick"
        );

        TickReport {
            contact,
            command,
            jumped,
            stance_change,
        }
    }

    /// Integrate look input once per render frame
    ///
    /// Only the stored yaw and pitch change; the body picks up the new
    /// heading on the next physics tick. Returns `false` for deadzone input.
    pub fn look_step(&mut self, input: &InputSnapshot, dt: f32) -> bool {
        match CameraOrientation::step(input.look, &self.settings, self.body.yaw, self.body.pitch, dt) {
            Some((yaw, pitch)) => {
                self.body.yaw = yaw;
                self.body.pitch = pitch;
                true
            }
            None => false,
        }
    }

    /// Head pivot rotation relative to the body
    pub fn head_rotation(&self) -> Quat {
        CameraOrientation::head_rotation(self.body.pitch)
    }

    /// World-space view direction
    pub fn view_forward(&self) -> Vec3 {
        CameraOrientation::forward(self.body.yaw, self.body.pitch)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::body::Stance;
    use crate::physics::RayHit;

    /// Physics stand-in that records what the controller asks of it
    #[derive(Default)]
    struct FakePhysics {
        ground: Option<Vec3>,
        velocity: Vec3,
        gravity: bool,
        impulses: Vec<Vec3>,
        height_scale: f32,
        yaw: f32,
    }

    impl FakePhysics {
        fn on_ground(normal: Vec3) -> Self {
            Self {
                ground: Some(normal),
                gravity: true,
                height_scale: 1.0,
                ..Default::default()
            }
        }
    }

    impl GroundQuery for FakePhysics {
        fn ray_cast(&self, _origin: Vec3, _direction: Vec3, _max: f32, _mask: u32) -> Option<RayHit> {
            self.ground.map(|normal| RayHit { distance: 0.4, normal })
        }
    }

    impl BodyDriver for FakePhysics {
        fn position(&self) -> Vec3 {
            Vec3::new(0.0, 0.9, 0.0)
        }
        fn half_height(&self) -> f32 {
            0.9 * self.height_scale
        }
        fn velocity(&self) -> Vec3 {
            self.velocity
        }
        fn apply_velocity_delta(&mut self, delta: Vec3) {
            self.velocity += delta;
        }
        fn apply_impulse(&mut self, impulse: Vec3) {
            self.impulses.push(impulse);
            self.velocity += impulse;
        }
        fn set_gravity_enabled(&mut self, enabled: bool) {
            self.gravity = enabled;
        }
        fn set_height_scale(&mut self, scale: f32) {
            self.height_scale = scale;
        }
        fn set_yaw(&mut self, yaw_degrees: f32) {
            self.yaw = yaw_degrees;
        }
    }

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_invalid_settings_rejected_at_construction() {
        let settings = LocomotionSettings {
            walk_speed: 20.0,
            ..Default::default()
        };
        assert!(LocomotionController::new(settings).is_err());
    }

    #[test]
    fn test_walk_converges_on_flat_ground() {
        let mut controller = LocomotionController::new(LocomotionSettings::default()).unwrap();
        let mut physics = FakePhysics::on_ground(Vec3::Y);
        let mut input = InputSnapshot::new().with_move(Vec2::new(0.0, 1.0));

        let report = controller.step(&mut physics, &mut input, DT);
        assert_eq!(report.contact, ContactState::GroundedFlat);
        assert_eq!(physics.velocity, Vec3::new(0.0, 0.0, 5.0));

        let report = controller.step(&mut physics, &mut input, DT);
        assert_eq!(report.command.delta, Vec3::ZERO);
    }

    #[test]
    fn test_jump_applies_single_impulse() {
        let mut controller = LocomotionController::new(LocomotionSettings::default()).unwrap();
        let mut physics = FakePhysics::on_ground(Vec3::Y);

        let mut input = InputSnapshot::new().with_jump();
        let report = controller.step(&mut physics, &mut input, DT);
        assert!(report.jumped);
        assert!(!input.jump);
        assert!(controller.body().exiting_slope);

        for _ in 0..5 {
            let mut input = InputSnapshot::new().with_jump();
            assert!(!controller.step(&mut physics, &mut input, DT).jumped);
        }
        assert_eq!(physics.impulses, vec![Vec3::new(0.0, 5.0, 0.0)]);
    }

    #[test]
    fn test_no_second_jump_after_leaving_ground() {
        let mut controller = LocomotionController::new(LocomotionSettings::default()).unwrap();
        let mut physics = FakePhysics::on_ground(Vec3::Y);

        assert!(controller.step(&mut physics, &mut InputSnapshot::new().with_jump(), DT).jumped);

        // The ground ray still hits for a couple of ticks while lifting off
        for _ in 0..2 {
            let report = controller.step(&mut physics, &mut InputSnapshot::new().with_jump(), DT);
            assert!(!report.jumped);
        }

        // Clear of the ground for longer than the cooldown, pressing every tick
        physics.ground = None;
        for _ in 0..40 {
            let report = controller.step(&mut physics, &mut InputSnapshot::new().with_jump(), DT);
            assert_eq!(report.contact, ContactState::Airborne);
            assert!(!report.jumped);
        }
        assert_eq!(physics.impulses.len(), 1);
    }

    #[test]
    fn test_walking_off_a_slope_falls() {
        let r = 20.0_f32.to_radians();
        let normal = Vec3::new(0.0, r.cos(), -r.sin());
        let mut controller = LocomotionController::new(LocomotionSettings::default()).unwrap();
        let mut physics = FakePhysics::on_ground(normal);

        let report = controller.step(&mut physics, &mut InputSnapshot::new(), DT);
        assert!(!report.command.gravity_enabled);

        physics.ground = None;
        let report = controller.step(&mut physics, &mut InputSnapshot::new(), DT);
        assert!(matches!(report.contact, ContactState::GroundedSlope { .. }));
        assert!(report.command.gravity_enabled);
        assert!(physics.gravity);
    }

    #[test]
    fn test_jump_from_slope_keeps_gravity() {
        let r = 20.0_f32.to_radians();
        let normal = Vec3::new(0.0, r.cos(), -r.sin());
        let mut controller = LocomotionController::new(LocomotionSettings::default()).unwrap();
        let mut physics = FakePhysics::on_ground(normal);

        let report = controller.step(&mut physics, &mut InputSnapshot::new(), DT);
        assert!(!report.command.gravity_enabled);
        assert!(!physics.gravity);

        let report = controller.step(&mut physics, &mut InputSnapshot::new().with_jump(), DT);
        assert!(report.jumped);
        assert!(physics.gravity);

        // Still on the slope next tick, but the anchor stays off while exiting
        let report = controller.step(&mut physics, &mut InputSnapshot::new(), DT);
        assert!(report.command.gravity_enabled);
        assert_eq!(report.command.delta.y, 0.0);
    }

    #[test]
    fn test_crouch_resizes_body_and_slows_walk() {
        let mut controller = LocomotionController::new(LocomotionSettings::default()).unwrap();
        let mut physics = FakePhysics::on_ground(Vec3::Y);
        let mut input = InputSnapshot::new().with_move(Vec2::new(0.0, 1.0)).with_crouch(true);

        let report = controller.step(&mut physics, &mut input, DT);
        assert_eq!(report.stance_change.map(|c| c.stance), Some(Stance::Crouching));
        assert_eq!(physics.height_scale, 0.5);

        physics.velocity = Vec3::ZERO;
        let report = controller.step(&mut physics, &mut input, DT);
        assert_eq!(report.command.delta, Vec3::new(0.0, 0.0, 2.5));

        let mut input = InputSnapshot::new();
        controller.step(&mut physics, &mut input, DT);
        assert_eq!(physics.height_scale, 1.0);
        assert_eq!(controller.settings().walk_speed, 5.0);
    }

    #[test]
    fn test_look_step_only_touches_orientation() {
        let mut controller = LocomotionController::new(LocomotionSettings::default()).unwrap();
        let mut physics = FakePhysics::on_ground(Vec3::Y);

        let input = InputSnapshot::new().with_look(Vec2::new(45.0, 10.0));
        assert!(controller.look_step(&input, DT));
        assert_eq!(controller.body().yaw, 90.0);
        assert_eq!(controller.body().pitch, 20.0);
        assert_eq!(physics.yaw, 0.0);

        // Heading reaches the body on the next physics tick
        let mut input = InputSnapshot::new().with_move(Vec2::new(0.0, 1.0));
        let report = controller.step(&mut physics, &mut input, DT);
        assert_eq!(physics.yaw, 90.0);
        assert!((report.command.delta - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_look_noise_is_ignored() {
        let mut controller = LocomotionController::new(LocomotionSettings::default()).unwrap();
        let input = InputSnapshot::new().with_look(Vec2::new(0.05, 0.05));
        assert!(!controller.look_step(&input, DT));
        assert_eq!(controller.body().yaw, 0.0);
        assert_eq!(controller.body().pitch, 0.0);
    }

    #[test]
    fn test_steep_ground_pushes_off() {
        let r = 46.0_f32.to_radians();
        let mut controller = LocomotionController::new(LocomotionSettings::default()).unwrap();
        let mut physics = FakePhysics::on_ground(Vec3::new(r.sin(), r.cos(), 0.0));
        let mut input = InputSnapshot::new().with_move(Vec2::new(0.0, 1.0));

        let report = controller.step(&mut physics, &mut input, DT);
        assert!(matches!(report.contact, ContactState::GroundedSteep { .. }));
        assert!(physics.velocity.y < 0.0);
        assert_eq!(physics.velocity.z, 0.0);
    }
}

//! Stride Locomotion - First-person character movement
//!
//! Turns a per-tick [`InputSnapshot`] into velocity corrections, jump
//! impulses, and stance changes for a physics-driven character body, and
//! integrates look input into yaw and pitch.
//!
//! The physics engine sits behind [`GroundQuery`] and [`BodyDriver`]; a
//! rapier3d implementation lives in [`rapier`].

pub mod body;
pub mod camera;
pub mod contact;
pub mod controller;
pub mod crouch;
mod error;
pub mod input;
pub mod jump;
pub mod physics;
pub mod rapier;
pub mod sensor;
pub mod settings;
pub mod velocity;

pub use body::{JumpPhase, LocomotionBody, Stance};
pub use camera::{clamp_angle, CameraOrientation};
pub use contact::ContactState;
pub use controller::{LocomotionController, TickReport};
pub use crouch::{CrouchController, StanceChange};
pub use error::{LocomotionError, SettingsError};
pub use input::InputSnapshot;
pub use jump::JumpController;
pub use physics::{BodyDriver, GroundQuery, RayHit};
pub use rapier::RapierCharacter;
pub use sensor::GroundSensor;
pub use settings::LocomotionSettings;
pub use velocity::{VelocityCommand, VelocityController};

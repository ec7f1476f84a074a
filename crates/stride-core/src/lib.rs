//! Stride Core - Shared math and timing for the Stride workspace
//!
//! This crate provides the foundational pieces used by the other crates:
//! - Mathematical primitives (re-exported from glam)
//! - Frame clock that turns variable render frames into fixed physics ticks

pub mod time;

pub use glam::{Quat, Vec2, Vec3};
pub use time::{FrameClock, TimeConfig, TimeConfigError};

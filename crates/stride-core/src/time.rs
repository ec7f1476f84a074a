//! Frame timing for Stride
//!
//! Physics runs on a fixed timestep while look input is integrated once per
//! render frame. `FrameClock` accumulates render-frame deltas and hands out
//! the number of fixed ticks that fit into them.

use serde::{Deserialize, Serialize};

/// Timing configuration the clock cannot run with
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimeConfigError {
    #[error("fixed timestep must be finite and positive, got {0}")]
    FixedTimestep(f32),

    #[error("max delta time must be finite and positive, got {0}")]
    MaxDeltaTime(f32),

    #[error("time scale must be finite and non-negative, got {0}")]
    TimeScale(f32),
}

/// Configuration for frame timing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// How many simulated seconds pass per real second
    pub time_scale: f32,
    /// Fixed timestep for physics (in seconds)
    pub fixed_timestep: f32,
    /// Maximum delta time to prevent spiral of death
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            fixed_timestep: 1.0 / 60.0,
            max_delta_time: 0.25,
        }
    }
}

impl TimeConfig {
    /// Reject values that would stall or reverse the clock
    pub fn validate(&self) -> Result<(), TimeConfigError> {
        if !(self.fixed_timestep.is_finite() && self.fixed_timestep > 0.0) {
            return Err(TimeConfigError::FixedTimestep(self.fixed_timestep));
        }
        if !(self.max_delta_time.is_finite() && self.max_delta_time > 0.0) {
            return Err(TimeConfigError::MaxDeltaTime(self.max_delta_time));
        }
        if !(self.time_scale.is_finite() && self.time_scale >= 0.0) {
            return Err(TimeConfigError::TimeScale(self.time_scale));
        }
        Ok(())
    }
}

/// Render-frame clock with a fixed-timestep accumulator
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Configuration
    pub config: TimeConfig,
    /// Simulated time since start in seconds
    pub total_time: f64,
    /// Delta time for this frame (clamped and scaled)
    pub delta_time: f32,
    /// Frame counter
    pub frame_count: u64,
    /// Fixed ticks processed since start
    pub tick_count: u64,
    /// Accumulated time for fixed timestep
    fixed_accumulator: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(TimeConfig::default())
    }
}

impl FrameClock {
    /// Create a new clock with custom config
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            total_time: 0.0,
            delta_time: 0.0,
            frame_count: 0,
            tick_count: 0,
            fixed_accumulator: 0.0,
        }
    }

    /// Advance the clock with the raw delta from the previous render frame
    pub fn update(&mut self, raw_delta: f32) {
        self.frame_count += 1;
        self.delta_time = raw_delta.clamp(0.0, self.config.max_delta_time) * self.config.time_scale;
        self.total_time += self.delta_time as f64;
        self.fixed_accumulator += self.delta_time;
    }

    /// Drain the accumulator and return how many fixed ticks to run this frame
    ///
    /// A non-positive timestep yields no ticks.
    pub fn fixed_steps(&mut self) -> u32 {
        let step = self.config.fixed_timestep;
        if !(step > 0.0) {
            return 0;
        }

        let mut steps = 0;
        while self.fixed_accumulator >= step {
            self.fixed_accumulator -= step;
            steps += 1;
        }
        self.tick_count += steps as u64;
        steps
    }

    /// The fixed physics timestep in seconds
    pub fn fixed_timestep(&self) -> f32 {
        self.config.fixed_timestep
    }
}

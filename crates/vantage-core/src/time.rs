//! Frame clock for the Vantage rig
//!
//! The camera always runs on unscaled time so it keeps responding while the
//! simulation around it is paused or slowed down.

use serde::{Deserialize, Serialize};

/// Configuration for the frame clock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Maximum delta time to prevent spiral of death
    pub max_delta_time: f32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            max_delta_time: 0.25,
        }
    }
}

/// Per-frame time tracking
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Configuration
    pub config: ClockConfig,
    /// Time since the clock started, in seconds
    pub total_time: f64,
    /// Delta time of the last frame
    pub delta_time: f32,
    /// Frame counter
    pub frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(ClockConfig::default())
    }
}

impl FrameClock {
    /// Create a new clock with custom config
    pub fn new(config: ClockConfig) -> Self {
        Self {
            config,
            total_time: 0.0,
            delta_time: 0.0,
            frame_count: 0,
        }
    }

    /// Advance by a raw delta from the previous frame and return the clamped delta
    pub fn advance(&mut self, raw_delta: f32) -> f32 {
        self.delta_time = raw_delta.max(0.0).min(self.config.max_delta_time);
        self.total_time += self.delta_time as f64;
        self.frame_count += 1;
        self.delta_time
    }
}

//! Input adapters
//!
//! The rig consumes one [`InputFrame`] per tick from an [`InputProvider`].
//! Providers are expected to hand over already smoothed axes; [`AxisSmoother`]
//! does that for raw device values.

mod desktop;

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::state::AxisInput;

pub use desktop::{DesktopInput, InputBinding, RigAction, RigBindings};

/// Default decay rate of an idle axis, in units per second
pub const DEFAULT_GRAVITY: f32 = 6.0;
/// Default sensitivity of movement and rotation axes
pub const DEFAULT_SENSITIVITY: f32 = 1.0;
/// Default sensitivity of the zoom axis
pub const ZOOM_SENSITIVITY: f32 = 8.0;

/// Input consumed by the rig for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputFrame {
    pub move_x: f32,
    pub move_y: f32,
    /// Positive zooms in
    pub zoom: f32,
    /// Drives pitch
    pub rotate_x: f32,
    /// Drives yaw
    pub rotate_y: f32,
    /// Request a switch to the next behaviour at the end of the tick
    pub switch_behaviour: bool,
}

impl InputFrame {
    /// Axis part of the frame as stored in the rig state
    pub fn axes(&self) -> AxisInput {
        AxisInput {
            movement_x: self.move_x,
            movement_y: self.move_y,
            rotation_x: self.rotate_x,
            rotation_y: self.rotate_y,
            zoom: self.zoom,
        }
    }
}

/// Source of per-tick input
pub trait InputProvider {
    /// Produce the input for a tick of length `dt` (unscaled seconds)
    fn poll(&mut self, dt: f32) -> InputFrame;
}

/// A fixed frame is a provider that repeats itself
impl InputProvider for InputFrame {
    fn poll(&mut self, _dt: f32) -> InputFrame {
        *self
    }
}

/// Smooths a raw axis: follows input scaled by sensitivity while active and
/// decays towards zero at `gravity` units per second when idle.
#[derive(Debug, Clone, Copy)]
pub struct AxisSmoother {
    pub sensitivity: f32,
    pub gravity: f32,
    value: f32,
}

impl Default for AxisSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_SENSITIVITY)
    }
}

impl AxisSmoother {
    pub fn new(sensitivity: f32) -> Self {
        Self {
            sensitivity,
            gravity: DEFAULT_GRAVITY,
            value: 0.0,
        }
    }

    /// Feed this tick's raw value and return the smoothed axis
    pub fn update(&mut self, raw: f32, dt: f32) -> f32 {
        self.value = if raw == 0.0 {
            let magnitude = (self.value.abs() - self.gravity * dt.max(0.0)).clamp(0.0, 1.0);
            magnitude * self.value.signum()
        } else {
            raw * self.sensitivity
        };
        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}

/// Plays back a queue of frames, then idles
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputFrame>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a single frame
    pub fn push(&mut self, frame: InputFrame) -> &mut Self {
        self.frames.push_back(frame);
        self
    }

    /// Queue the same frame for `ticks` ticks
    pub fn hold(&mut self, frame: InputFrame, ticks: usize) -> &mut Self {
        self.frames.extend(std::iter::repeat(frame).take(ticks));
        self
    }

    /// Queue `ticks` idle frames
    pub fn wait(&mut self, ticks: usize) -> &mut Self {
        self.hold(InputFrame::default(), ticks)
    }

    /// Frames left to play
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }

    pub fn is_finished(&self) -> bool {
        self.frames.is_empty()
    }
}

impl InputProvider for ScriptedInput {
    fn poll(&mut self, _dt: f32) -> InputFrame {
        self.frames.pop_front().unwrap_or_default()
    }
}

impl FromIterator<InputFrame> for ScriptedInput {
    fn from_iter<I: IntoIterator<Item = InputFrame>>(iter: I) -> Self {
        Self {
            frames: iter.into_iter().collect(),
        }
    }
}

//! Per-rig runtime state shared by every behaviour

use glam::Vec3;
use vantage_core::{EntityId, Pose};

/// Smoothed input axes for the current tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisInput {
    /// Strafe / pan sideways
    pub movement_x: f32,
    /// Forward / backward
    pub movement_y: f32,
    /// Drives pitch (vertical mouse motion)
    pub rotation_x: f32,
    /// Drives yaw (horizontal mouse motion, rotate keys)
    pub rotation_y: f32,
    /// Positive zooms in
    pub zoom: f32,
}

/// Mutable state of one camera rig.
///
/// Angles are in degrees. `current` is refreshed from the live transform at
/// the start of every tick and `next` is the pose the active behaviour wants
/// committed at the end of it.
#[derive(Debug, Clone)]
pub struct CameraState {
    pub yaw: f32,
    pub pitch: f32,
    pub target_yaw: f32,
    pub target_pitch: f32,
    /// Damping velocity for yaw
    pub yaw_velocity: f32,
    /// Damping velocity for pitch
    pub pitch_velocity: f32,
    /// Pitch actually applied: user pitch plus auto-pitch
    pub effective_pitch: f32,
    /// Damping velocity for position
    pub move_velocity: Vec3,
    /// Extra pitch added while line of sight is blocked
    pub auto_pitch: f32,
    /// Seconds since line of sight was last blocked
    pub los_timer: f32,
    pub current: Pose,
    pub next: Pose,
    /// Point the camera looks at / orbits around
    pub origin: Vec3,
    /// Distance-based speed multiplier in `[0.1, 1.0]`
    pub speed_ratio: f32,
    /// Followed entity, resolved through the host every tick
    pub target: Option<EntityId>,
    pub input: AxisInput,
    /// Orbit distance
    pub distance: f32,
    /// Vertical offset applied on top of the orbit position
    pub height_offset: f32,
}

impl CameraState {
    /// Create a state with the given starting yaw and pitch
    pub fn new(start_yaw: f32, start_pitch: f32) -> Self {
        Self {
            yaw: start_yaw,
            pitch: start_pitch,
            target_yaw: start_yaw,
            target_pitch: start_pitch,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            effective_pitch: start_pitch,
            move_velocity: Vec3::ZERO,
            auto_pitch: 0.0,
            los_timer: 0.0,
            current: Pose::default(),
            next: Pose::default(),
            origin: Vec3::ZERO,
            speed_ratio: 0.1,
            target: None,
            input: AxisInput::default(),
            distance: 10.0,
            height_offset: 0.0,
        }
    }

    /// Take a fresh snapshot of the live transform.
    ///
    /// `next` starts out equal to `current`, so a behaviour that leaves it
    /// untouched keeps the camera where it is.
    pub fn refresh(&mut self, pose: Pose) {
        self.current = pose;
        self.next = pose;
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(0.0, 30.0)
    }
}

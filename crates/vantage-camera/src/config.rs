//! Camera configuration

use glam::Vec3;
use serde::{Deserialize, Serialize};
use vantage_core::{Area, ConfigError, LayerMask};

/// Settings for one of the rig's spatial probes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RayConfig {
    /// Layers the probe collides with
    pub mask: LayerMask,
    /// Maximum cast distance; a miss reports the point at this distance
    pub max_distance: f32,
    /// Offset added to the cast origin
    pub offset: Vec3,
}

impl Default for RayConfig {
    fn default() -> Self {
        Self {
            mask: LayerMask::ALL,
            max_distance: 1000.0,
            offset: Vec3::ZERO,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical offset added to the orbit position
    pub height_offset: f32,
    /// Minimum orbit distance
    pub min_distance: f32,
    /// Maximum orbit distance (also the free camera's height cap above ground)
    pub max_distance: f32,
    /// Distance change per unit of zoom input
    pub zoom_speed: f32,
    /// Yaw speed in degrees per second per unit of input
    pub yaw_speed: f32,
    /// Pitch speed in degrees per second per unit of input
    pub pitch_speed: f32,
    /// Minimum orbit pitch in degrees
    pub min_pitch: f32,
    /// Maximum orbit pitch in degrees
    pub max_pitch: f32,
    /// Rotation input produced by the keyboard rotate keys
    pub keyboard_rotation_speed: f32,
    /// Time constant for position smoothing, in seconds
    pub move_smooth_time: f32,
    /// Time constant for rotation smoothing, in seconds
    pub rot_smooth_time: f32,
    /// Layers considered for line-of-sight checks
    pub collision_mask: LayerMask,
    /// Reserved for swept collision
    pub collision_radius: f32,
    /// Minimum clearance kept above the ground below the camera
    pub collision_offset: f32,
    /// Speed at which auto-pitch is added or removed, in degrees per second
    pub auto_pitch_speed: f32,
    /// Maximum extra pitch added while line of sight is blocked
    pub max_auto_pitch: f32,
    /// Seconds of clear line of sight before auto-pitch starts relaxing
    pub los_relax_delay: f32,
    /// Height of the line-of-sight anchor above the look-at point
    pub los_anchor_lift: f32,
    /// Bounding area for camera movement
    pub area_bounds: Area,
    /// Pan / fly speed in units per second
    pub movement_speed: f32,
    /// Gap above which the follow camera catches up linearly instead of damping
    pub follow_snap_distance: f32,
    /// Linear catch-up speed of the follow camera, in units per second
    pub follow_catch_up_speed: f32,
    /// Cinematic orbit rate in degrees per second
    pub cinematic_orbit_speed: f32,
    /// Cinematic orbit height as a fraction of the distance
    pub cinematic_height_ratio: f32,
    /// Time constant for the cinematic blend towards the orbit point
    pub cinematic_blend_time: f32,
    /// Lowest height accepted from the down probe
    pub ground_height_min: f32,
    /// Highest height accepted from the down probe
    pub ground_height_max: f32,
    /// Map zoom input to vertical movement in the free camera
    pub free_zoom_vertical: bool,
    /// Probe cast along the camera's forward axis
    pub forward_ray: RayConfig,
    /// Probe cast straight down from the camera
    pub down_ray: RayConfig,
    /// Probe cast straight down from the look-at origin
    pub ground_ray: RayConfig,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            height_offset: 0.0,
            min_distance: 10.0,
            max_distance: 150.0,
            zoom_speed: 2.0,
            yaw_speed: 200.0,
            pitch_speed: 200.0,
            min_pitch: 30.0,
            max_pitch: 80.0,
            keyboard_rotation_speed: 0.5,
            move_smooth_time: 0.1,
            rot_smooth_time: 0.1,
            collision_mask: LayerMask::ALL,
            collision_radius: 2.5,
            collision_offset: 2.0,
            auto_pitch_speed: 45.0,
            max_auto_pitch: 45.0,
            los_relax_delay: 0.3,
            los_anchor_lift: 0.5,
            area_bounds: Area::default(),
            movement_speed: 50.0,
            follow_snap_distance: 10.0,
            follow_catch_up_speed: 100.0,
            cinematic_orbit_speed: 10.0,
            cinematic_height_ratio: 0.5,
            cinematic_blend_time: 1.0,
            ground_height_min: 0.0,
            ground_height_max: 1000.0,
            free_zoom_vertical: false,
            forward_ray: RayConfig::default(),
            down_ray: RayConfig::default(),
            // Cast from well above the origin so a pan over rising terrain
            // still lands on the top surface
            ground_ray: RayConfig {
                offset: Vec3::new(0.0, 500.0, 0.0),
                ..RayConfig::default()
            },
        }
    }
}

impl CameraConfig {
    /// Check the configuration for inverted ranges and negative time constants
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_distance > self.max_distance {
            return Err(ConfigError::InvertedDistanceRange {
                min: self.min_distance,
                max: self.max_distance,
            });
        }
        if self.min_pitch > self.max_pitch {
            return Err(ConfigError::InvertedPitchRange {
                min: self.min_pitch,
                max: self.max_pitch,
            });
        }
        if self.ground_height_min > self.ground_height_max {
            return Err(ConfigError::InvertedGroundRange {
                min: self.ground_height_min,
                max: self.ground_height_max,
            });
        }
        for (field, value) in [
            ("move_smooth_time", self.move_smooth_time),
            ("rot_smooth_time", self.rot_smooth_time),
            ("auto_pitch_speed", self.auto_pitch_speed),
            ("los_relax_delay", self.los_relax_delay),
            ("follow_catch_up_speed", self.follow_catch_up_speed),
            ("cinematic_blend_time", self.cinematic_blend_time),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        Ok(())
    }

    /// Return a copy with inverted ranges swapped and negative constants made positive
    pub fn sanitized(&self) -> Self {
        let mut config = self.clone();
        if config.min_distance > config.max_distance {
            std::mem::swap(&mut config.min_distance, &mut config.max_distance);
        }
        if config.min_pitch > config.max_pitch {
            std::mem::swap(&mut config.min_pitch, &mut config.max_pitch);
        }
        if config.ground_height_min > config.ground_height_max {
            std::mem::swap(&mut config.ground_height_min, &mut config.ground_height_max);
        }
        config.move_smooth_time = config.move_smooth_time.abs();
        config.rot_smooth_time = config.rot_smooth_time.abs();
        config.auto_pitch_speed = config.auto_pitch_speed.abs();
        config.los_relax_delay = config.los_relax_delay.abs();
        config.follow_catch_up_speed = config.follow_catch_up_speed.abs();
        config.cinematic_blend_time = config.cinematic_blend_time.abs();
        config
    }

    /// Clamp a position within the configured area bounds
    pub fn bounded_position(&self, position: Vec3) -> Vec3 {
        self.area_bounds.clamp(position)
    }

    /// Clamp a distance into `[min_distance, max_distance]`
    pub fn clamp_distance(&self, distance: f32) -> f32 {
        distance.min(self.max_distance).max(self.min_distance)
    }

    /// Clamp a pitch into `[min_pitch, max_pitch]`
    pub fn clamp_pitch(&self, pitch: f32) -> f32 {
        pitch.min(self.max_pitch).max(self.min_pitch)
    }

    /// Normalized distance ratio between a camera position and its look-at point.
    ///
    /// 0.1 at or below `min_distance`, 1.0 at or above `max_distance`.
    pub fn distance_ratio(&self, position: Vec3, target: Vec3) -> f32 {
        let distance = position.distance(target);
        let span = self.max_distance - self.min_distance;
        if span <= f32::EPSILON {
            return if distance >= self.max_distance { 1.0 } else { 0.1 };
        }
        ((distance - self.min_distance) / span).clamp(0.1, 1.0)
    }
}

//! Demo settings with persistence
//!
//! Settings are read from a path given on the command line or from
//! `~/.config/vantage/settings.toml`

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use vantage_camera::{BehaviourKind, CameraConfig};

/// All demo settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RigSettings {
    pub camera: CameraConfig,
    pub simulation: SimulationSettings,
}

impl RigSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vantage"))
    }

    /// Get the default settings file path
    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from `path`, or the default location, falling back to defaults
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) => path,
                None => {
                    warn!("Could not determine config directory");
                    return Self::default();
                }
            },
        };

        if !path.exists() {
            info!("No settings file at {:?}, using defaults", path);
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match Self::parse(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Parse settings from TOML; missing fields take their defaults
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Save settings to `path`, or the default location
    pub fn save(&self, path: Option<&Path>) -> anyhow::Result<PathBuf> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) => path,
                None => anyhow::bail!("Could not determine config directory"),
            },
        };

        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(path)
    }
}

/// Headless simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Ticks per second
    pub tick_rate: u32,
    /// Length of the run in seconds
    pub duration: f32,
    /// Seconds between behaviour switches (0 disables cycling)
    pub switch_interval: f32,
    /// Behaviour the rig starts in
    pub start_behaviour: BehaviourKind,
    /// Radius of the followed target's loop
    pub target_radius: f32,
    /// Angular speed of the followed target, in degrees per second
    pub target_speed: f32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            duration: 24.0,
            switch_interval: 6.0,
            start_behaviour: BehaviourKind::Rts,
            target_radius: 30.0,
            target_speed: 20.0,
        }
    }
}

impl SimulationSettings {
    /// Seconds per tick
    pub fn tick_delta(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }

    /// Total number of ticks in the run
    pub fn total_ticks(&self) -> u64 {
        (self.duration.max(0.0) * self.tick_rate as f32).round() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = RigSettings::parse(
            r#"
            [camera]
            max_distance = 90.0
            free_zoom_vertical = true

            [camera.ground_ray]
            max_distance = 400.0

            [simulation]
            start_behaviour = "follow"
            "#,
        )
        .unwrap();

        assert_eq!(settings.camera.max_distance, 90.0);
        assert!(settings.camera.free_zoom_vertical);
        assert_eq!(settings.camera.min_distance, 10.0);
        assert_eq!(settings.camera.ground_ray.max_distance, 400.0);
        assert_eq!(settings.simulation.start_behaviour, BehaviourKind::Follow);
        assert_eq!(settings.simulation.tick_rate, 60);
    }

    #[test]
    fn test_defaults_round_trip_through_toml() {
        let content = toml::to_string_pretty(&RigSettings::default()).unwrap();
        let settings = RigSettings::parse(&content).unwrap();
        assert_eq!(settings.camera.max_pitch, 80.0);
        assert_eq!(settings.camera.ground_ray.offset, glam::Vec3::new(0.0, 500.0, 0.0));
        assert_eq!(settings.simulation.start_behaviour, BehaviourKind::Rts);
    }

    #[test]
    fn test_tick_math() {
        let simulation = SimulationSettings::default();
        assert_eq!(simulation.total_ticks(), 1440);
        assert!((simulation.tick_delta() - 1.0 / 60.0).abs() < 1e-7);
    }
}

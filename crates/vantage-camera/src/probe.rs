//! Spatial probes refreshed by the rig every tick

use glam::Vec3;
use vantage_core::{Pose, SpatialQuery};

use crate::config::{CameraConfig, RayConfig};

/// Result of the last cast of one probe ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeRay {
    /// Hit point, or the point at max distance when nothing was hit
    pub point: Vec3,
    /// Whether the last cast hit anything
    pub is_hit: bool,
}

impl Default for ProbeRay {
    fn default() -> Self {
        Self {
            point: Vec3::ZERO,
            is_hit: false,
        }
    }
}

impl ProbeRay {
    /// Cast the ray and store the resulting point
    pub fn cast(
        &mut self,
        scene: &dyn SpatialQuery,
        config: &RayConfig,
        origin: Vec3,
        direction: Vec3,
    ) -> Vec3 {
        let origin = origin + config.offset;
        let direction = direction.normalize_or_zero();

        match scene.cast_ray(origin, direction, config.max_distance, config.mask) {
            Some(hit) => {
                self.point = hit.point;
                self.is_hit = true;
            }
            None => {
                self.point = origin + direction * config.max_distance;
                self.is_hit = false;
            }
        }
        self.point
    }

    /// Clamp the height of the stored point
    pub fn clamp_height(&mut self, min: f32, max: f32) {
        self.point.y = self.point.y.min(max).max(min);
    }
}

/// The rig's three probes
#[derive(Debug, Clone, Copy, Default)]
pub struct Probes {
    /// Along the camera's forward axis
    pub forward: ProbeRay,
    /// Straight down from the camera; used for ground collision
    pub down: ProbeRay,
    /// Straight down from the look-at origin
    pub ground: ProbeRay,
}

impl Probes {
    /// Recast all probes from the camera pose and look-at origin
    pub fn refresh(
        &mut self,
        scene: &dyn SpatialQuery,
        config: &CameraConfig,
        camera: &Pose,
        origin: Vec3,
    ) {
        self.forward
            .cast(scene, &config.forward_ray, camera.position, camera.forward);
        self.down
            .cast(scene, &config.down_ray, camera.position, Vec3::NEG_Y);
        self.down
            .clamp_height(config.ground_height_min, config.ground_height_max);
        self.ground
            .cast(scene, &config.ground_ray, origin, Vec3::NEG_Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_core::{EmptyScene, LayerMask, RayHit};

    struct Floor(f32);

    impl SpatialQuery for Floor {
        fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32, _: LayerMask) -> Option<RayHit> {
            if direction.y >= 0.0 || origin.y < self.0 {
                return None;
            }
            let distance = (origin.y - self.0) / -direction.y;
            (distance <= max_distance).then(|| RayHit {
                point: origin + direction * distance,
                normal: Vec3::Y,
                distance,
            })
        }
    }

    #[test]
    fn test_miss_reports_max_distance_point() {
        let mut probe = ProbeRay::default();
        let config = RayConfig {
            max_distance: 25.0,
            ..Default::default()
        };
        let point = probe.cast(&EmptyScene, &config, Vec3::ZERO, Vec3::X);
        assert!(!probe.is_hit);
        assert_eq!(point, Vec3::new(25.0, 0.0, 0.0));
    }

    #[test]
    fn test_offset_is_applied_to_origin() {
        let mut probe = ProbeRay::default();
        let config = RayConfig {
            offset: Vec3::new(0.0, 100.0, 0.0),
            ..Default::default()
        };
        // Starting below the floor, the offset lifts the cast above it
        probe.cast(&Floor(3.0), &config, Vec3::new(4.0, -10.0, 0.0), Vec3::NEG_Y);
        assert!(probe.is_hit);
        assert!((probe.point - Vec3::new(4.0, 3.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_down_probe_height_is_clamped() {
        let mut probes = Probes::default();
        let config = CameraConfig::default();
        let camera = Pose::from_position(Vec3::new(0.0, 20.0, 0.0));

        // Nothing below: the miss point lies far underground and is clamped to 0
        probes.refresh(&EmptyScene, &config, &camera, Vec3::ZERO);
        assert!(!probes.down.is_hit);
        assert_eq!(probes.down.point.y, 0.0);

        probes.refresh(&Floor(7.5), &config, &camera, Vec3::ZERO);
        assert!(probes.down.is_hit);
        assert!((probes.down.point.y - 7.5).abs() < 1e-4);
        assert!(probes.ground.is_hit);
    }
}

//! Scene doubles shared by the camera tests

use std::cell::Cell;

use glam::Vec3;
use vantage_core::{LayerMask, RayHit, SpatialQuery};

/// Infinite ground plane with a switchable line-of-sight blocker
pub struct FlatScene {
    pub ground_y: f32,
    pub blocked: Cell<bool>,
}

impl FlatScene {
    pub fn new(ground_y: f32) -> Self {
        Self {
            ground_y,
            blocked: Cell::new(false),
        }
    }
}

impl SpatialQuery for FlatScene {
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32, _: LayerMask) -> Option<RayHit> {
        if direction.y >= 0.0 || origin.y < self.ground_y {
            return None;
        }
        let distance = (origin.y - self.ground_y) / -direction.y;
        (distance <= max_distance).then(|| RayHit {
            point: origin + direction * distance,
            normal: Vec3::Y,
            distance,
        })
    }

    fn cast_segment(&self, _: Vec3, _: Vec3, _: LayerMask) -> bool {
        self.blocked.get()
    }
}

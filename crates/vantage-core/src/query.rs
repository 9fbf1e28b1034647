//! Spatial query contract consumed by the camera rig
//!
//! The rig never talks to a physics engine directly. Hosts implement
//! [`SpatialQuery`] over whatever collision backend they already run.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Bit mask selecting which collision layers a query considers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Every layer
    pub const ALL: LayerMask = LayerMask(u32::MAX);
    /// No layer at all
    pub const NONE: LayerMask = LayerMask(0);

    /// Mask containing a single layer (0-31).
    ///
    /// Indices past 31 select no layer; debug builds reject them.
    pub const fn layer(index: u32) -> Self {
        debug_assert!(index < 32, "layer index out of range");
        match 1u32.checked_shl(index) {
            Some(bits) => Self(bits),
            None => Self::NONE,
        }
    }

    /// Check if this mask includes any layer of `other`
    pub fn intersects(&self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// First intersection of a ray with the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World-space hit point
    pub point: Vec3,
    /// Surface normal at the hit point
    pub normal: Vec3,
    /// Distance along the ray to the hit point
    pub distance: f32,
}

/// Ray and segment queries against the host scene.
///
/// Calls are synchronous; a miss is a normal result, not an error.
pub trait SpatialQuery {
    /// Cast a ray and return the first hit within `max_distance`
    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit>;

    /// Check whether anything on `mask` obstructs the segment `from -> to`
    fn cast_segment(&self, from: Vec3, to: Vec3, mask: LayerMask) -> bool {
        let delta = to - from;
        let length = delta.length();
        if length <= f32::EPSILON {
            return false;
        }
        self.cast_ray(from, delta / length, length, mask).is_some()
    }
}

/// A scene with nothing in it. Every ray misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyScene;

impl SpatialQuery for EmptyScene {
    fn cast_ray(&self, _: Vec3, _: Vec3, _: f32, _: LayerMask) -> Option<RayHit> {
        None
    }
}

//! Core types used throughout the Vantage rig

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::math;

/// Unique identifier for an entity the rig can follow.
///
/// The rig only ever stores the id; positions are resolved through the host
/// each tick so a despawned entity simply stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Create a new random entity ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an entity ID from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of a camera transform.
///
/// Forward is local +Z and right is local +X. Euler angles are stored in
/// degrees as `(pitch, yaw, roll)`, each wrapped into `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
    pub euler_angles: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
}

impl Default for Pose {
    fn default() -> Self {
        Self::from_position_rotation(Vec3::ZERO, Quat::IDENTITY)
    }
}

impl Pose {
    /// Create a pose at the given position with identity rotation
    pub fn from_position(position: Vec3) -> Self {
        Self::from_position_rotation(position, Quat::IDENTITY)
    }

    /// Create a pose with position and rotation, deriving the directional fields
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        let mut pose = Self {
            position,
            rotation,
            euler_angles: Vec3::ZERO,
            forward: Vec3::Z,
            right: Vec3::X,
        };
        pose.set_rotation(rotation);
        pose
    }

    /// Create a pose looking along the given pitch/yaw (degrees)
    pub fn from_pitch_yaw(position: Vec3, pitch: f32, yaw: f32) -> Self {
        Self::from_position_rotation(position, math::orbit_rotation(pitch, yaw))
    }

    /// Replace the rotation and refresh forward, right and euler angles
    pub fn set_rotation(&mut self, rotation: Quat) {
        let rotation = rotation.normalize();
        let (yaw, pitch, roll) = rotation.to_euler(EulerRot::YXZ);
        self.rotation = rotation;
        self.euler_angles = Vec3::new(
            math::wrap_degrees(pitch.to_degrees()),
            math::wrap_degrees(yaw.to_degrees()),
            math::wrap_degrees(roll.to_degrees()),
        );
        self.forward = rotation * Vec3::Z;
        self.right = rotation * Vec3::X;
    }

    /// Get the up direction
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Pitch in degrees, normalized into `(-180, 180]`
    pub fn pitch(&self) -> f32 {
        math::normalize_angle(self.euler_angles.x)
    }

    /// Yaw in degrees, normalized into `(-180, 180]`
    pub fn yaw(&self) -> f32 {
        math::normalize_angle(self.euler_angles.y)
    }
}

/// Axis-aligned area the camera is kept inside.
///
/// X and Z are clamped on both sides, Y only from below.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Area {
    fn default() -> Self {
        Self {
            min: Vec3::new(-1.0e6, 0.0, -1.0e6),
            max: Vec3::new(1.0e6, 1.0e6, 1.0e6),
        }
    }
}

impl Area {
    /// Create an area from its two corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Clamp a position into the area.
    ///
    /// Upper bounds are applied before lower bounds, so an inverted area
    /// resolves to its minimum corner.
    pub fn clamp(&self, mut position: Vec3) -> Vec3 {
        position.x = position.x.min(self.max.x).max(self.min.x);
        position.z = position.z.min(self.max.z).max(self.min.z);
        position.y = position.y.max(self.min.y);
        position
    }

    /// Check whether a position lies inside the area (Y checked from below only)
    pub fn contains(&self, position: Vec3) -> bool {
        self.clamp(position) == position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_directions() {
        let pose = Pose::from_pitch_yaw(Vec3::ZERO, 0.0, 90.0);
        assert!((pose.forward - Vec3::X).length() < 1e-5);
        assert!((pose.right - Vec3::NEG_Z).length() < 1e-5);
        assert!((pose.yaw() - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_pose_positive_pitch_looks_down() {
        let pose = Pose::from_pitch_yaw(Vec3::ZERO, 30.0, 0.0);
        assert!(pose.forward.y < 0.0);
        assert!((pose.pitch() - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_pose_euler_angles_wrap() {
        let pose = Pose::from_pitch_yaw(Vec3::ZERO, -10.0, -90.0);
        assert!((pose.euler_angles.x - 350.0).abs() < 1e-3);
        assert!((pose.euler_angles.y - 270.0).abs() < 1e-3);
        assert!((pose.pitch() + 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_area_clamps_xz_and_floor_only() {
        let area = Area::new(Vec3::ZERO, Vec3::splat(100.0));
        let clamped = area.clamp(Vec3::new(150.0, 250.0, 40.0));
        assert_eq!(clamped, Vec3::new(100.0, 250.0, 40.0));

        let clamped = area.clamp(Vec3::new(-5.0, -5.0, 120.0));
        assert_eq!(clamped, Vec3::new(0.0, 0.0, 100.0));
    }

    #[test]
    fn test_area_contains() {
        let area = Area::new(Vec3::ZERO, Vec3::splat(10.0));
        assert!(area.contains(Vec3::new(5.0, 50.0, 5.0)));
        assert!(!area.contains(Vec3::new(11.0, 5.0, 5.0)));
    }
}

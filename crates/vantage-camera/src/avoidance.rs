//! Ground collision and line-of-sight correction shared by the orbit behaviours

use glam::{Quat, Vec3};
use vantage_core::math;
use vantage_core::SpatialQuery;

use crate::config::CameraConfig;
use crate::probe::ProbeRay;
use crate::state::CameraState;

/// Highest pitch an orbit may reach once auto-pitch is added
const MAX_ORBIT_PITCH: f32 = 89.0;

/// Orbit rotation, offset and resulting camera position around a look-at point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitPlacement {
    pub rotation: Quat,
    /// Vector from the look-at point to the camera
    pub offset: Vec3,
    pub position: Vec3,
}

impl OrbitPlacement {
    /// Place the camera `distance` away from `origin` at the given pitch/yaw (degrees)
    pub fn solve(origin: Vec3, pitch: f32, yaw: f32, distance: f32) -> Self {
        let rotation = math::orbit_rotation(pitch, yaw);
        let offset = math::orbit_offset(rotation, distance);
        Self {
            rotation,
            offset,
            position: origin + offset,
        }
    }

    /// Placement for the state's current orbit, refreshing `effective_pitch`
    pub fn from_state(state: &mut CameraState) -> Self {
        state.effective_pitch = (state.pitch + state.auto_pitch).min(MAX_ORBIT_PITCH);
        Self::solve(state.origin, state.effective_pitch, state.yaw, state.distance)
    }
}

/// Keep `position` at least `collision_offset` above the ground under the camera
pub fn apply_ground_collision(config: &CameraConfig, down: &ProbeRay, position: &mut Vec3) {
    let floor = down.point.y + config.collision_offset;
    if position.y < floor {
        position.y = floor;
    }
}

/// Outcome of one line-of-sight check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOfSight {
    /// Something sits between the look-at point and the camera; auto-pitch rises
    Blocked,
    /// Clear, but not for long enough to start relaxing
    Holding,
    /// Clear for at least the relax delay; auto-pitch decays
    Relaxing,
}

/// Raise the orbit over obstacles between the look-at point and the camera.
///
/// While blocked, auto-pitch climbs towards `max_auto_pitch`. Once the view has
/// been clear for `los_relax_delay` seconds it decays back to zero. The
/// placement is rebuilt whenever auto-pitch may have changed.
pub fn correct_line_of_sight(
    config: &CameraConfig,
    state: &mut CameraState,
    scene: &dyn SpatialQuery,
    placement: &mut OrbitPlacement,
    dt: f32,
) -> LineOfSight {
    let dt = dt.max(0.0);
    let step = config.auto_pitch_speed * dt;
    let anchor = state.origin + Vec3::Y * config.los_anchor_lift;

    let verdict = if scene.cast_segment(anchor, placement.position, config.collision_mask) {
        state.auto_pitch = math::move_towards(state.auto_pitch, config.max_auto_pitch, step);
        state.los_timer = 0.0;
        LineOfSight::Blocked
    } else {
        state.los_timer += dt;
        if state.los_timer < config.los_relax_delay {
            return LineOfSight::Holding;
        }
        state.auto_pitch = math::move_towards(state.auto_pitch, 0.0, step);
        LineOfSight::Relaxing
    };

    *placement = OrbitPlacement::from_state(state);
    verdict
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FlatScene;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_orbit_placement_behind_and_above() {
        let placement = OrbitPlacement::solve(Vec3::ZERO, 45.0, 0.0, 10.0);
        // Positive pitch looks down, so the camera sits above and behind (-Z)
        assert!(placement.position.y > 7.0);
        assert!(placement.position.z < -7.0);
        assert!((placement.position.length() - 10.0).abs() < 1e-4);

        let forward = placement.rotation * Vec3::Z;
        assert!(forward.dot(-placement.offset.normalize()) > 0.999);
    }

    #[test]
    fn test_ground_collision_raises_position() {
        let config = CameraConfig::default();
        let down = ProbeRay {
            point: Vec3::new(0.0, 5.0, 0.0),
            is_hit: true,
        };

        let mut low = Vec3::new(1.0, 3.0, 1.0);
        apply_ground_collision(&config, &down, &mut low);
        assert_eq!(low, Vec3::new(1.0, 7.0, 1.0));

        let mut high = Vec3::new(1.0, 30.0, 1.0);
        apply_ground_collision(&config, &down, &mut high);
        assert_eq!(high.y, 30.0);
    }

    #[test]
    fn test_blocked_view_raises_auto_pitch() {
        let config = CameraConfig::default();
        let scene = FlatScene::new(0.0);
        scene.blocked.set(true);

        let mut state = CameraState::new(0.0, 40.0);
        state.distance = 50.0;
        let mut placement = OrbitPlacement::from_state(&mut state);
        let start_height = placement.position.y;

        let verdict = correct_line_of_sight(&config, &mut state, &scene, &mut placement, DT);
        assert_eq!(verdict, LineOfSight::Blocked);
        assert!((state.auto_pitch - 0.75).abs() < 1e-4);
        assert_eq!(state.los_timer, 0.0);
        assert!((state.effective_pitch - 40.75).abs() < 1e-4);
        assert!(placement.position.y > start_height);
    }

    #[test]
    fn test_clear_view_holds_then_relaxes() {
        let config = CameraConfig::default();
        let scene = FlatScene::new(0.0);

        let mut state = CameraState::new(0.0, 40.0);
        state.auto_pitch = 10.0;
        let mut placement = OrbitPlacement::from_state(&mut state);

        for _ in 0..10 {
            let verdict = correct_line_of_sight(&config, &mut state, &scene, &mut placement, DT);
            assert_eq!(verdict, LineOfSight::Holding);
            assert_eq!(state.auto_pitch, 10.0);
        }

        for _ in 0..20 {
            correct_line_of_sight(&config, &mut state, &scene, &mut placement, DT);
        }
        assert!(state.auto_pitch < 10.0);
    }

    #[test]
    fn test_effective_pitch_stays_below_vertical() {
        let mut state = CameraState::new(0.0, 80.0);
        state.auto_pitch = 45.0;
        OrbitPlacement::from_state(&mut state);
        assert_eq!(state.effective_pitch, MAX_ORBIT_PITCH);
    }
}

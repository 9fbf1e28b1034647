//! Strategy camera: pan the look-at point over the ground and orbit around it

use glam::Vec3;
use vantage_core::math;

use super::{adopt_current_angles, blend_rotation, flatten, BehaviourKind, CameraBehaviour, RigContext, INPUT_EPSILON};
use crate::avoidance::{apply_ground_collision, correct_line_of_sight, OrbitPlacement};

/// Strategy (RTS) camera
#[derive(Debug, Clone, Copy, Default)]
pub struct RtsBehaviour;

impl CameraBehaviour for RtsBehaviour {
    fn kind(&self) -> BehaviourKind {
        BehaviourKind::Rts
    }

    fn initialize(&mut self, ctx: &mut RigContext<'_>) -> bool {
        let state = &mut *ctx.state;
        state.height_offset = 0.0;

        // Look at whatever the camera is already pointing at
        state.origin = if ctx.probes.forward.is_hit {
            ctx.probes.forward.point
        } else {
            state.current.position + state.current.forward * state.distance
        };
        state.distance = ctx
            .config
            .clamp_distance(state.current.position.distance(state.origin));
        adopt_current_angles(state, ctx.config, true);
        true
    }

    fn handle_movement(&mut self, ctx: &mut RigContext<'_>, dt: f32) {
        let config = ctx.config;
        let state = &mut *ctx.state;
        let input = state.input;
        let speed = config.movement_speed * state.speed_ratio * dt;

        if input.movement_y.abs() > INPUT_EPSILON {
            state.origin += flatten(state.current.forward) * input.movement_y * speed;
        }
        if input.movement_x.abs() > INPUT_EPSILON {
            state.origin += state.current.right.normalize_or_zero() * input.movement_x * speed;
        }
        if ctx.probes.ground.is_hit {
            state.origin.y = ctx.probes.ground.point.y;
        }
        state.origin = config.bounded_position(state.origin);

        let mut placement = OrbitPlacement::from_state(state);
        correct_line_of_sight(config, state, ctx.scene, &mut placement, dt);

        let mut desired = placement.position;
        apply_ground_collision(config, &ctx.probes.down, &mut desired);

        let mut position = math::smooth_damp_vec3(
            state.current.position,
            desired + Vec3::Y * state.height_offset,
            &mut state.move_velocity,
            config.move_smooth_time,
            dt,
        );
        apply_ground_collision(config, &ctx.probes.down, &mut position);

        state.next.position = position;
        blend_rotation(config, state, placement.rotation, dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behaviour::harness::Harness;
    use crate::state::AxisInput;
    use crate::target::NoTargets;
    use vantage_core::Pose;

    const DT: f32 = 1.0 / 60.0;

    fn overhead() -> Pose {
        Pose::from_pitch_yaw(Vec3::new(0.0, 30.0, -30.0), 45.0, 0.0)
    }

    #[test]
    fn test_initialize_looks_at_forward_hit() {
        let mut harness = Harness::new(overhead());
        harness.state.height_offset = 4.0;
        let mut rts = RtsBehaviour;

        assert!(harness.initialize(&mut rts, &NoTargets));
        assert_eq!(harness.state.height_offset, 0.0);
        assert!(harness.state.origin.distance(Vec3::ZERO) < 1e-3);
        assert!((harness.state.pitch - 45.0).abs() < 1e-3);
        assert!(harness.state.yaw.abs() < 1e-3);
    }

    #[test]
    fn test_initialize_keeps_current_distance() {
        let mut harness = Harness::new(Pose::from_pitch_yaw(Vec3::new(0.0, 60.0, -60.0), 45.0, 0.0));
        let mut rts = RtsBehaviour;
        harness.initialize(&mut rts, &NoTargets);

        let expected = Vec3::new(0.0, 60.0, -60.0).length();
        assert!((harness.state.distance - expected).abs() < 1e-3);

        // No dive towards the look-at point on the first ticks
        let before = harness.pose.position;
        for _ in 0..30 {
            harness.step_idle(&mut rts, DT);
        }
        assert!(harness.pose.position.distance(before) < 0.1);
    }

    #[test]
    fn test_initialize_clamps_far_distance() {
        let mut harness = Harness::new(Pose::from_pitch_yaw(Vec3::new(0.0, 200.0, -200.0), 45.0, 0.0));
        let mut rts = RtsBehaviour;
        harness.initialize(&mut rts, &NoTargets);
        assert_eq!(harness.state.distance, harness.config.max_distance);
    }

    #[test]
    fn test_zoom_clamps_at_min_distance() {
        let mut harness = Harness::new(overhead());
        let mut rts = RtsBehaviour;
        harness.initialize(&mut rts, &NoTargets);

        let zoom_in = AxisInput {
            zoom: 5.0,
            ..Default::default()
        };
        for _ in 0..120 {
            harness.step(&mut rts, &NoTargets, zoom_in, DT);
            assert!(harness.state.distance >= harness.config.min_distance);
            assert!(harness.state.distance <= harness.config.max_distance);
        }
        assert_eq!(harness.state.distance, 10.0);
    }

    #[test]
    fn test_zoom_out_clamps_at_max_distance() {
        let mut harness = Harness::new(overhead());
        let mut rts = RtsBehaviour;
        harness.initialize(&mut rts, &NoTargets);

        let zoom_out = AxisInput {
            zoom: -50.0,
            ..Default::default()
        };
        for _ in 0..200 {
            harness.step(&mut rts, &NoTargets, zoom_out, DT);
        }
        assert_eq!(harness.state.distance, 150.0);
    }

    #[test]
    fn test_pitch_stays_in_orbit_range() {
        let mut harness = Harness::new(overhead());
        let mut rts = RtsBehaviour;
        harness.initialize(&mut rts, &NoTargets);

        for rotation_x in [-3.0, 3.0] {
            let input = AxisInput {
                rotation_x,
                ..Default::default()
            };
            for _ in 0..180 {
                harness.step(&mut rts, &NoTargets, input, DT);
                assert!(harness.state.pitch >= 30.0 - 1e-3);
                assert!(harness.state.pitch <= 80.0 + 1e-3);
            }
        }
    }

    #[test]
    fn test_camera_stays_above_ground() {
        let mut harness = Harness::new(overhead());
        harness.scene.ground_y = 5.0;
        let mut rts = RtsBehaviour;
        harness.initialize(&mut rts, &NoTargets);

        // Drop pitch to the minimum and zoom in so the orbit hugs the ground
        let input = AxisInput {
            rotation_x: 3.0,
            zoom: 5.0,
            ..Default::default()
        };
        for _ in 0..240 {
            harness.step(&mut rts, &NoTargets, input, DT);
            let floor = harness.probes.down.point.y + harness.config.collision_offset;
            assert!(harness.pose.position.y >= floor - 1e-4);
        }
    }

    #[test]
    fn test_pan_moves_origin_on_ground_plane() {
        let mut harness = Harness::new(overhead());
        harness.scene.ground_y = 2.0;
        let mut rts = RtsBehaviour;
        harness.initialize(&mut rts, &NoTargets);
        let start = harness.state.origin;

        let forward = AxisInput {
            movement_y: 1.0,
            ..Default::default()
        };
        for _ in 0..30 {
            harness.step(&mut rts, &NoTargets, forward, DT);
        }
        assert!(harness.state.origin.z > start.z + 1.0);
        assert!(harness.state.origin.x.abs() < 1e-3);
        assert!((harness.state.origin.y - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_origin_is_bounded() {
        let mut harness = Harness::new(overhead());
        harness.config.area_bounds.max = Vec3::new(100.0, 1000.0, 5.0);
        let mut rts = RtsBehaviour;
        harness.initialize(&mut rts, &NoTargets);

        let forward = AxisInput {
            movement_y: 1.0,
            ..Default::default()
        };
        for _ in 0..120 {
            harness.step(&mut rts, &NoTargets, forward, DT);
            assert!(harness.state.origin.z <= 5.0);
        }
    }

    #[test]
    fn test_blocked_view_pitches_up() {
        let mut harness = Harness::new(overhead());
        let mut rts = RtsBehaviour;
        harness.initialize(&mut rts, &NoTargets);
        harness.scene.blocked.set(true);

        let mut last = harness.state.auto_pitch;
        for _ in 0..59 {
            harness.step_idle(&mut rts, DT);
            assert!(harness.state.auto_pitch > last);
            last = harness.state.auto_pitch;
        }
        for _ in 0..10 {
            harness.step_idle(&mut rts, DT);
        }
        assert_eq!(harness.state.auto_pitch, harness.config.max_auto_pitch);

        // Cleared view: no decrease until the relax delay has elapsed
        harness.scene.blocked.set(false);
        for _ in 0..17 {
            harness.step_idle(&mut rts, DT);
            assert_eq!(harness.state.auto_pitch, harness.config.max_auto_pitch);
        }
        for _ in 0..3 {
            harness.step_idle(&mut rts, DT);
        }
        assert!(harness.state.auto_pitch < harness.config.max_auto_pitch);
    }
}

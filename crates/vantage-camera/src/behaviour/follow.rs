//! Orbit camera locked onto a followed entity

use glam::Vec3;
use tracing::debug;
use vantage_core::math;

use super::{adopt_current_angles, blend_rotation, refresh_speed_ratio, BehaviourKind, CameraBehaviour, RigContext};
use crate::avoidance::{apply_ground_collision, correct_line_of_sight, OrbitPlacement};

/// How the follow camera closed the gap on its last movement step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowBlend {
    /// Linear catch-up at `follow_catch_up_speed`
    CatchUp,
    /// Critically damped approach
    Damped,
}

/// Follow camera
#[derive(Debug, Clone, Default)]
pub struct FollowBehaviour {
    last_blend: Option<FollowBlend>,
}

impl FollowBehaviour {
    /// Blend used on the most recent movement step
    pub fn last_blend(&self) -> Option<FollowBlend> {
        self.last_blend
    }
}

impl CameraBehaviour for FollowBehaviour {
    fn kind(&self) -> BehaviourKind {
        BehaviourKind::Follow
    }

    fn initialize(&mut self, ctx: &mut RigContext<'_>) -> bool {
        let Some(target) = ctx.target_position() else {
            return false;
        };

        let state = &mut *ctx.state;
        state.height_offset = 0.0;
        state.origin = target;
        adopt_current_angles(state, ctx.config, true);
        self.last_blend = None;
        true
    }

    fn on_update_begin(&mut self, ctx: &mut RigContext<'_>) {
        match ctx.target_position() {
            Some(target) => ctx.state.origin = target,
            None => debug!("Follow target unavailable, holding last origin"),
        }
        refresh_speed_ratio(ctx);
    }

    fn handle_movement(&mut self, ctx: &mut RigContext<'_>, dt: f32) {
        let config = ctx.config;
        let state = &mut *ctx.state;

        let mut placement = OrbitPlacement::from_state(state);
        correct_line_of_sight(config, state, ctx.scene, &mut placement, dt);

        let lift = Vec3::Y * state.height_offset;
        let current = state.current.position;
        let mut desired = placement.position;

        let mut position = if current.distance(desired + lift) > config.follow_snap_distance {
            self.last_blend = Some(FollowBlend::CatchUp);
            state.move_velocity = Vec3::ZERO;
            math::move_towards_vec3(current, desired + lift, config.follow_catch_up_speed * dt)
        } else {
            self.last_blend = Some(FollowBlend::Damped);
            apply_ground_collision(config, &ctx.probes.down, &mut desired);
            math::smooth_damp_vec3(
                current,
                desired + lift,
                &mut state.move_velocity,
                config.move_smooth_time,
                dt,
            )
        };
        apply_ground_collision(config, &ctx.probes.down, &mut position);

        state.next.position = position;
        blend_rotation(config, state, placement.rotation, dt);
    }
}

//! Free-flying camera

use glam::Vec3;
use vantage_core::math;

use super::{adopt_current_angles, flatten, refresh_speed_ratio, steer_angles, BehaviourKind, CameraBehaviour, RigContext, INPUT_EPSILON};
use crate::avoidance::apply_ground_collision;

/// Free camera.
///
/// Moves along its own forward/right axes with no orbit anchor. Pitch is not
/// clamped. Position is set directly, without smoothing.
#[derive(Debug, Clone, Default)]
pub struct FreeBehaviour {
    /// Vertical movement requested by zoom input this tick
    climb: f32,
}

impl CameraBehaviour for FreeBehaviour {
    fn kind(&self) -> BehaviourKind {
        BehaviourKind::Free
    }

    fn initialize(&mut self, ctx: &mut RigContext<'_>) -> bool {
        adopt_current_angles(ctx.state, ctx.config, false);
        self.climb = 0.0;
        true
    }

    fn on_update_begin(&mut self, ctx: &mut RigContext<'_>) {
        ctx.state.origin = ctx.probes.down.point;
        refresh_speed_ratio(ctx);
    }

    fn handle_zoom(&mut self, ctx: &mut RigContext<'_>, _dt: f32) {
        let state = &ctx.state;
        self.climb = if ctx.config.free_zoom_vertical && state.input.zoom.abs() > INPUT_EPSILON {
            -state.input.zoom * ctx.config.zoom_speed * state.speed_ratio
        } else {
            0.0
        };
    }

    fn handle_rotation(&mut self, ctx: &mut RigContext<'_>, dt: f32) {
        steer_angles(ctx, dt, false);
        let state = &mut *ctx.state;
        state
            .next
            .set_rotation(math::orbit_rotation(state.pitch, state.yaw));
    }

    fn handle_movement(&mut self, ctx: &mut RigContext<'_>, dt: f32) {
        let config = ctx.config;
        let state = &mut *ctx.state;
        let input = state.input;
        let speed = config.movement_speed * state.speed_ratio * dt;

        let mut step = Vec3::Y * self.climb;
        if input.movement_y.abs() > INPUT_EPSILON {
            step += flatten(state.current.forward) * input.movement_y * speed;
        }
        if input.movement_x.abs() > INPUT_EPSILON {
            step += state.current.right.normalize_or_zero() * input.movement_x * speed;
        }
        self.climb = 0.0;

        let mut desired = config.bounded_position(state.current.position + step);
        let floor = if ctx.probes.ground.is_hit {
            ctx.probes.ground.point.y
        } else {
            ctx.probes.down.point.y
        };
        let ceiling = floor + config.max_distance;
        if desired.y > ceiling {
            desired.y = ceiling;
        }
        apply_ground_collision(config, &ctx.probes.down, &mut desired);

        state.next.position = desired;
    }
}

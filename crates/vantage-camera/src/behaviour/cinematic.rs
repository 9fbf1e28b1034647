//! Scripted orbit around the target for non-interactive sequences

use glam::Vec3;
use vantage_core::math;

use super::{BehaviourKind, CameraBehaviour, RigContext};
use crate::avoidance::apply_ground_collision;

/// Cinematic camera.
///
/// Circles the target at a fixed angular rate and height ratio, ignoring all
/// player input. Rotation and zoom hooks are no-ops.
#[derive(Debug, Clone, Default)]
pub struct CinematicBehaviour {
    /// Current orbit angle in degrees, measured from +X towards +Z
    orbit_angle: f32,
}

impl CinematicBehaviour {
    pub fn orbit_angle(&self) -> f32 {
        self.orbit_angle
    }
}

impl CameraBehaviour for CinematicBehaviour {
    fn kind(&self) -> BehaviourKind {
        BehaviourKind::Cinematic
    }

    fn initialize(&mut self, ctx: &mut RigContext<'_>) -> bool {
        let Some(anchor) = ctx.target_position() else {
            return false;
        };

        // Start the orbit on the side the camera is already on
        let relative = ctx.state.current.position - anchor;
        self.orbit_angle = math::wrap_degrees(relative.z.atan2(relative.x).to_degrees());
        ctx.state.origin = anchor;
        true
    }

    fn handle_zoom(&mut self, _ctx: &mut RigContext<'_>, _dt: f32) {}

    fn handle_rotation(&mut self, _ctx: &mut RigContext<'_>, _dt: f32) {}

    fn handle_movement(&mut self, ctx: &mut RigContext<'_>, dt: f32) {
        let config = ctx.config;
        let anchor = ctx.target_position().unwrap_or(ctx.state.origin);
        let state = &mut *ctx.state;
        state.origin = anchor;

        self.orbit_angle = math::wrap_degrees(self.orbit_angle + config.cinematic_orbit_speed * dt.max(0.0));
        let radians = self.orbit_angle.to_radians();
        let offset = Vec3::new(
            radians.cos() * state.distance,
            state.distance * config.cinematic_height_ratio,
            radians.sin() * state.distance,
        );

        let desired = anchor + offset;
        let goal = math::look_rotation(anchor - desired).unwrap_or(state.current.rotation);

        let t = math::exp_blend_factor(dt, config.cinematic_blend_time);
        let mut position = state.current.position.lerp(desired, t);
        apply_ground_collision(config, &ctx.probes.down, &mut position);

        state.next.position = position;
        state.next.set_rotation(state.current.rotation.slerp(goal, t));
    }
}

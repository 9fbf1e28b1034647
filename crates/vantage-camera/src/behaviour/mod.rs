//! Camera behaviours
//!
//! Each behaviour is one motion strategy. The rig drives the active one
//! through the [`CameraBehaviour`] hooks in a fixed order every tick:
//! `on_update_begin`, `handle_zoom`, `handle_rotation`, `handle_movement`,
//! `on_update_completed`.

mod cinematic;
mod follow;
mod free;
mod rts;

use std::fmt;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use vantage_core::math;
use vantage_core::SpatialQuery;

use crate::config::CameraConfig;
use crate::probe::Probes;
use crate::state::CameraState;
use crate::target::TargetSource;

pub use cinematic::CinematicBehaviour;
pub use follow::{FollowBehaviour, FollowBlend};
pub use free::FreeBehaviour;
pub use rts::RtsBehaviour;

/// Input magnitudes below this are treated as idle
pub(crate) const INPUT_EPSILON: f32 = 1.0e-4;

/// Identifies a behaviour; the discriminant is its index in the rig
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BehaviourKind {
    /// Strategy camera panning over the ground
    Rts,
    /// Orbit around a followed entity
    Follow,
    /// Free flight
    Free,
    /// Scripted orbit for non-interactive sequences
    Cinematic,
}

impl BehaviourKind {
    /// All kinds in index order
    pub const ALL: [BehaviourKind; 4] = [
        BehaviourKind::Rts,
        BehaviourKind::Follow,
        BehaviourKind::Free,
        BehaviourKind::Cinematic,
    ];

    /// Index of this behaviour in the rig
    pub fn index(self) -> usize {
        self as usize
    }

    /// Kind for a rig index, if in range
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Whether the behaviour needs a resolvable target to operate
    pub fn needs_target(self) -> bool {
        matches!(self, BehaviourKind::Follow | BehaviourKind::Cinematic)
    }
}

impl fmt::Display for BehaviourKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BehaviourKind::Rts => "rts",
            BehaviourKind::Follow => "follow",
            BehaviourKind::Free => "free",
            BehaviourKind::Cinematic => "cinematic",
        };
        f.write_str(name)
    }
}

/// Everything a behaviour may read or write during one hook call
pub struct RigContext<'a> {
    pub config: &'a CameraConfig,
    pub state: &'a mut CameraState,
    pub probes: &'a Probes,
    pub scene: &'a dyn SpatialQuery,
    pub targets: &'a dyn TargetSource,
}

impl RigContext<'_> {
    /// Current position of the followed entity, if it still resolves
    pub fn target_position(&self) -> Option<Vec3> {
        self.state
            .target
            .and_then(|id| self.targets.target_position(id))
    }
}

/// Hooks implemented by every camera behaviour.
///
/// The default zoom, rotation and update-begin hooks implement the shared
/// orbit logic; behaviours override what they do differently.
pub trait CameraBehaviour {
    fn kind(&self) -> BehaviourKind;

    /// Take over from the current pose.
    ///
    /// Returns `false` when the behaviour cannot operate, in which case it
    /// leaves the state untouched.
    fn initialize(&mut self, ctx: &mut RigContext<'_>) -> bool;

    /// Change the orbit distance from zoom input
    fn handle_zoom(&mut self, ctx: &mut RigContext<'_>, _dt: f32) {
        orbit_zoom(ctx);
    }

    /// Steer yaw/pitch from rotation input, pitch clamped to the configured range
    fn handle_rotation(&mut self, ctx: &mut RigContext<'_>, dt: f32) {
        steer_angles(ctx, dt, true);
    }

    /// Compute the desired pose into `state.next`
    fn handle_movement(&mut self, ctx: &mut RigContext<'_>, dt: f32);

    /// Called before probes are refreshed
    fn on_update_begin(&mut self, ctx: &mut RigContext<'_>) {
        refresh_speed_ratio(ctx);
    }

    /// Called after movement, before the pose is committed
    fn on_update_completed(&mut self, _ctx: &mut RigContext<'_>) {}

    /// Called when the rig switches away from this behaviour
    fn release(&mut self, _ctx: &mut RigContext<'_>) {}
}

/// The closed set of behaviours a rig can run
#[derive(Debug, Clone)]
pub enum Behaviour {
    Rts(RtsBehaviour),
    Follow(FollowBehaviour),
    Free(FreeBehaviour),
    Cinematic(CinematicBehaviour),
}

impl Behaviour {
    /// Create a fresh behaviour of the given kind
    pub fn new(kind: BehaviourKind) -> Self {
        match kind {
            BehaviourKind::Rts => Behaviour::Rts(RtsBehaviour),
            BehaviourKind::Follow => Behaviour::Follow(FollowBehaviour::default()),
            BehaviourKind::Free => Behaviour::Free(FreeBehaviour::default()),
            BehaviourKind::Cinematic => Behaviour::Cinematic(CinematicBehaviour::default()),
        }
    }

    /// One behaviour of every kind, in index order
    pub fn all() -> Vec<Behaviour> {
        BehaviourKind::ALL.into_iter().map(Behaviour::new).collect()
    }

    fn inner_mut(&mut self) -> &mut dyn CameraBehaviour {
        match self {
            Behaviour::Rts(behaviour) => behaviour,
            Behaviour::Follow(behaviour) => behaviour,
            Behaviour::Free(behaviour) => behaviour,
            Behaviour::Cinematic(behaviour) => behaviour,
        }
    }
}

impl CameraBehaviour for Behaviour {
    fn kind(&self) -> BehaviourKind {
        match self {
            Behaviour::Rts(_) => BehaviourKind::Rts,
            Behaviour::Follow(_) => BehaviourKind::Follow,
            Behaviour::Free(_) => BehaviourKind::Free,
            Behaviour::Cinematic(_) => BehaviourKind::Cinematic,
        }
    }

    fn initialize(&mut self, ctx: &mut RigContext<'_>) -> bool {
        self.inner_mut().initialize(ctx)
    }

    fn handle_zoom(&mut self, ctx: &mut RigContext<'_>, dt: f32) {
        self.inner_mut().handle_zoom(ctx, dt);
    }

    fn handle_rotation(&mut self, ctx: &mut RigContext<'_>, dt: f32) {
        self.inner_mut().handle_rotation(ctx, dt);
    }

    fn handle_movement(&mut self, ctx: &mut RigContext<'_>, dt: f32) {
        self.inner_mut().handle_movement(ctx, dt);
    }

    fn on_update_begin(&mut self, ctx: &mut RigContext<'_>) {
        self.inner_mut().on_update_begin(ctx);
    }

    fn on_update_completed(&mut self, ctx: &mut RigContext<'_>) {
        self.inner_mut().on_update_completed(ctx);
    }

    fn release(&mut self, ctx: &mut RigContext<'_>) {
        self.inner_mut().release(ctx);
    }
}

/// Recompute the distance-based speed ratio from the current pose
pub fn refresh_speed_ratio(ctx: &mut RigContext<'_>) {
    let state = &mut *ctx.state;
    state.speed_ratio = ctx
        .config
        .distance_ratio(state.current.position, state.origin);
}

/// Orbit zoom: shrink or grow the distance, always within the configured range
pub fn orbit_zoom(ctx: &mut RigContext<'_>) {
    let state = &mut *ctx.state;
    let zoom = state.input.zoom;
    if zoom.abs() > INPUT_EPSILON {
        state.distance -= zoom * ctx.config.zoom_speed * state.speed_ratio;
    }
    state.distance = ctx.config.clamp_distance(state.distance);
}

/// Accumulate rotation input into the target angles and damp yaw/pitch towards them
pub fn steer_angles(ctx: &mut RigContext<'_>, dt: f32, clamp_pitch: bool) {
    let config = ctx.config;
    let state = &mut *ctx.state;
    let input = state.input;

    if input.rotation_y.abs() > INPUT_EPSILON {
        state.target_yaw += input.rotation_y * config.yaw_speed * dt;
    }
    if input.rotation_x.abs() > INPUT_EPSILON {
        state.target_pitch -= input.rotation_x * config.pitch_speed * dt;
    }
    if clamp_pitch {
        state.target_pitch = config.clamp_pitch(state.target_pitch);
    }

    state.yaw = math::smooth_damp_angle(
        state.yaw,
        state.target_yaw,
        &mut state.yaw_velocity,
        config.rot_smooth_time,
        dt,
    );
    state.pitch = math::smooth_damp_angle(
        state.pitch,
        state.target_pitch,
        &mut state.pitch_velocity,
        config.rot_smooth_time,
        dt,
    );
}

/// Take yaw/pitch from the current pose and drop any in-flight angular velocity.
///
/// With `clamp` set the pitch is reduced by the active auto-pitch and kept in
/// the orbit range.
pub(crate) fn adopt_current_angles(state: &mut CameraState, config: &CameraConfig, clamp: bool) {
    let pitch = if clamp {
        config.clamp_pitch(state.current.pitch() - state.auto_pitch)
    } else {
        state.current.pitch()
    };
    let yaw = state.current.yaw();

    state.yaw = yaw;
    state.pitch = pitch;
    state.target_yaw = yaw;
    state.target_pitch = pitch;
    state.yaw_velocity = 0.0;
    state.pitch_velocity = 0.0;
}

/// Slerp the committed rotation towards `goal` with the rotation time constant
pub(crate) fn blend_rotation(config: &CameraConfig, state: &mut CameraState, goal: Quat, dt: f32) {
    let t = math::exp_blend_factor(dt, config.rot_smooth_time);
    let rotation = state.current.rotation.slerp(goal, t);
    state.next.set_rotation(rotation);
}

/// Horizontal part of a direction, normalized (zero when vertical)
pub(crate) fn flatten(direction: Vec3) -> Vec3 {
    Vec3::new(direction.x, 0.0, direction.z).normalize_or_zero()
}

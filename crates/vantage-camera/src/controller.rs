//! Camera rig: owns the behaviours and runs the per-tick pipeline

use glam::Vec3;
use tracing::{debug, info, warn};
use vantage_core::{EntityId, Pose, SpatialQuery};

use crate::behaviour::{Behaviour, BehaviourKind, CameraBehaviour, RigContext};
use crate::config::CameraConfig;
use crate::error::RigError;
use crate::input::InputProvider;
use crate::probe::Probes;
use crate::state::CameraState;
use crate::target::TargetSource;

/// The live transform the rig reads from and commits to
pub trait TransformSink {
    fn read_pose(&self) -> Pose;
    fn write_pose(&mut self, pose: &Pose);
}

impl TransformSink for Pose {
    fn read_pose(&self) -> Pose {
        *self
    }

    fn write_pose(&mut self, pose: &Pose) {
        *self = *pose;
    }
}

/// Host collaborators handed to the rig for one call
pub struct RigEnv<'a> {
    pub transform: &'a mut dyn TransformSink,
    pub scene: &'a dyn SpatialQuery,
    pub targets: &'a dyn TargetSource,
}

impl<'a> RigEnv<'a> {
    pub fn new(
        transform: &'a mut dyn TransformSink,
        scene: &'a dyn SpatialQuery,
        targets: &'a dyn TargetSource,
    ) -> Self {
        Self {
            transform,
            scene,
            targets,
        }
    }
}

/// Camera rig
pub struct CameraRig {
    config: CameraConfig,
    state: CameraState,
    probes: Probes,
    behaviours: Vec<Behaviour>,
    /// Index of the active behaviour
    active: usize,
    /// Whether the active behaviour reported itself operational
    operational: bool,
    /// Switch to the next behaviour once the current tick completes
    switch_requested: bool,
    started: bool,
}

impl CameraRig {
    /// Create a rig, repairing an invalid configuration instead of failing
    pub fn new(config: CameraConfig) -> Self {
        if let Err(err) = config.validate() {
            warn!("Camera configuration is invalid, sanitizing: {}", err);
        }
        let config = config.sanitized();

        let mut state = CameraState::default();
        state.height_offset = config.height_offset;
        state.distance = config.clamp_distance(state.distance);

        Self {
            config,
            state,
            probes: Probes::default(),
            behaviours: Behaviour::all(),
            active: BehaviourKind::Rts.index(),
            operational: false,
            switch_requested: false,
            started: false,
        }
    }

    /// Create a rig, rejecting an invalid configuration
    pub fn try_new(config: CameraConfig) -> Result<Self, RigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Behaviour to activate on start
    pub fn with_behaviour(mut self, kind: BehaviourKind) -> Self {
        self.active = kind.index();
        self
    }

    /// Entity to follow
    pub fn with_target(mut self, target: EntityId) -> Self {
        self.state.target = Some(target);
        self
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn probes(&self) -> &Probes {
        &self.probes
    }

    pub fn active_kind(&self) -> BehaviourKind {
        self.behaviours[self.active].kind()
    }

    pub fn active_behaviour(&self) -> &Behaviour {
        &self.behaviours[self.active]
    }

    pub fn is_operational(&self) -> bool {
        self.operational
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn target(&self) -> Option<EntityId> {
        self.state.target
    }

    /// Change the followed entity; takes effect from the next tick
    pub fn set_target(&mut self, target: Option<EntityId>) {
        self.state.target = target;
    }

    /// Switch to the next behaviour once the current tick completes
    pub fn request_switch(&mut self) {
        self.switch_requested = true;
    }

    /// Take the current transform as baseline and initialize the active behaviour
    pub fn start(&mut self, env: &mut RigEnv<'_>) {
        self.started = true;
        self.activate(env);
        info!("Camera rig started in {} mode", self.active_kind());
    }

    /// Run one tick with unscaled delta time `dt`
    pub fn tick(&mut self, dt: f32, env: &mut RigEnv<'_>, input: &mut dyn InputProvider) {
        if !self.started {
            self.start(env);
        }
        let dt = dt.max(0.0);

        self.state.refresh(env.transform.read_pose());
        if !self.operational {
            self.retry_initialize(env);
        }

        if self.operational {
            let (behaviour, mut ctx) = self.split(env.scene, env.targets);
            behaviour.on_update_begin(&mut ctx);
        }
        self.refresh_probes(env.scene);

        let frame = input.poll(dt);
        self.state.input = frame.axes();
        if frame.switch_behaviour {
            self.switch_requested = true;
        }

        // A behaviour without its target leaves the transform where it is
        if self.operational {
            let (behaviour, mut ctx) = self.split(env.scene, env.targets);
            behaviour.handle_zoom(&mut ctx, dt);
            behaviour.handle_rotation(&mut ctx, dt);
            behaviour.handle_movement(&mut ctx, dt);
            behaviour.on_update_completed(&mut ctx);
            env.transform.write_pose(&self.state.next);
        }

        if std::mem::take(&mut self.switch_requested) {
            self.rotate_behaviour(env);
        }
    }

    /// Switch immediately to the behaviour at `index`.
    ///
    /// An out-of-range index is rejected and the active behaviour is kept.
    /// A `target` replaces the followed entity before the new behaviour
    /// initializes.
    pub fn set_behaviour(
        &mut self,
        index: usize,
        target: Option<EntityId>,
        env: &mut RigEnv<'_>,
    ) -> Result<BehaviourKind, RigError> {
        let kind = BehaviourKind::from_index(index)
            .filter(|_| index < self.behaviours.len())
            .ok_or(RigError::InvalidBehaviour {
                index,
                count: self.behaviours.len(),
            })?;

        if target.is_some() {
            self.state.target = target;
        }
        if self.started {
            self.release_active(env);
        }
        let previous = self.active_kind();
        self.active = index;
        self.started = true;
        self.activate(env);

        info!("Camera behaviour set: {} -> {}", previous, kind);
        Ok(kind)
    }

    /// Cycle to the next operational behaviour.
    ///
    /// Behaviours that cannot operate are skipped. After one full cycle
    /// without success the rig stays on the behaviour it started from.
    pub fn rotate_behaviour(&mut self, env: &mut RigEnv<'_>) -> BehaviourKind {
        let start = self.active;
        let count = self.behaviours.len();
        let previous = self.active_kind();
        self.release_active(env);

        for step in 1..=count {
            self.active = (start + step) % count;
            if self.activate(env) {
                info!("Camera behaviour switched: {} -> {}", previous, self.active_kind());
                return self.active_kind();
            }
            debug!("Skipping non-operational camera behaviour {}", self.active_kind());
        }

        warn!("No operational camera behaviour, staying on {}", previous);
        previous
    }

    /// Teleport the camera and re-initialize the active behaviour there
    pub fn set_position(&mut self, position: Vec3, distance: f32, env: &mut RigEnv<'_>) {
        let mut pose = env.transform.read_pose();
        pose.position = position;
        env.transform.write_pose(&pose);

        self.started = true;
        self.activate(env);
        self.state.distance = self.config.clamp_distance(distance);
        self.state.move_velocity = Vec3::ZERO;

        info!(
            "Camera teleported to ({:.1}, {:.1}, {:.1}) at distance {:.1}",
            position.x, position.y, position.z, self.state.distance
        );
    }

    /// Re-snapshot the transform, recast probes and initialize the active behaviour
    fn activate(&mut self, env: &mut RigEnv<'_>) -> bool {
        self.state.refresh(env.transform.read_pose());
        self.refresh_probes(env.scene);

        let operational = {
            let (behaviour, mut ctx) = self.split(env.scene, env.targets);
            behaviour.initialize(&mut ctx)
        };
        if !operational {
            warn!("Camera behaviour {} is not operational", self.active_kind());
        }
        self.operational = operational;
        operational
    }

    /// Initialize the active behaviour again, e.g. once its target shows up
    fn retry_initialize(&mut self, env: &mut RigEnv<'_>) {
        self.refresh_probes(env.scene);
        let operational = {
            let (behaviour, mut ctx) = self.split(env.scene, env.targets);
            behaviour.initialize(&mut ctx)
        };
        if operational {
            info!("Camera behaviour {} is now operational", self.active_kind());
        }
        self.operational = operational;
    }

    fn release_active(&mut self, env: &mut RigEnv<'_>) {
        let (behaviour, mut ctx) = self.split(env.scene, env.targets);
        behaviour.release(&mut ctx);
    }

    fn refresh_probes(&mut self, scene: &dyn SpatialQuery) {
        let origin = self.state.origin;
        self.probes
            .refresh(scene, &self.config, &self.state.current, origin);
    }

    fn split<'s>(
        &'s mut self,
        scene: &'s dyn SpatialQuery,
        targets: &'s dyn TargetSource,
    ) -> (&'s mut Behaviour, RigContext<'s>) {
        let behaviour = &mut self.behaviours[self.active];
        let ctx = RigContext {
            config: &self.config,
            state: &mut self.state,
            probes: &self.probes,
            scene,
            targets,
        };
        (behaviour, ctx)
    }
}

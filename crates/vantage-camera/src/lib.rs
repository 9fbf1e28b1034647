//! Vantage Camera - Pluggable third-person / strategy camera rig
//!
//! Provides:
//! - Four interchangeable behaviours (RTS, follow, free, cinematic)
//! - Ground collision and line-of-sight auto-pitch
//! - Spatial probes refreshed every tick
//! - Input adapters (desktop, scripted)
//! - The [`CameraRig`] tick orchestrator

pub mod avoidance;
pub mod behaviour;
pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod probe;
pub mod state;
pub mod target;

#[cfg(test)]
mod testing;

pub use behaviour::{Behaviour, BehaviourKind, CameraBehaviour, FollowBlend, RigContext};
pub use config::{CameraConfig, RayConfig};
pub use controller::{CameraRig, RigEnv, TransformSink};
pub use error::RigError;
pub use input::{AxisSmoother, DesktopInput, InputFrame, InputProvider, ScriptedInput};
pub use probe::{ProbeRay, Probes};
pub use state::{AxisInput, CameraState};
pub use target::{NoTargets, TargetSource};

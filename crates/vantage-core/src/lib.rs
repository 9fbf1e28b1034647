//! Vantage Core - Core types and utilities for the Vantage camera rig
//!
//! This crate provides the foundational types used throughout the rig:
//! - Mathematical primitives (re-exported from glam)
//! - Pose snapshots and area bounds
//! - Critically damped smoothing functions
//! - The spatial query contract implemented by collision backends
//! - Frame clock for unscaled delta time

pub mod error;
pub mod math;
pub mod query;
pub mod time;
pub mod types;

pub use error::ConfigError;
pub use glam::{EulerRot, Quat, Vec2, Vec3};
pub use query::{EmptyScene, LayerMask, RayHit, SpatialQuery};
pub use time::{ClockConfig, FrameClock};
pub use types::{Area, EntityId, Pose};

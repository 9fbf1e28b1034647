//! Rig errors

use vantage_core::ConfigError;

/// Errors reported by [`crate::CameraRig`] operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RigError {
    #[error("behaviour index {index} is out of range (rig has {count} behaviours)")]
    InvalidBehaviour { index: usize, count: usize },

    #[error("invalid camera configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Problems found when validating rig configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("minimum distance {min} is greater than maximum distance {max}")]
    InvertedDistanceRange { min: f32, max: f32 },

    #[error("minimum pitch {min} is greater than maximum pitch {max}")]
    InvertedPitchRange { min: f32, max: f32 },

    #[error("ground height range [{min}, {max}] is inverted")]
    InvertedGroundRange { min: f32, max: f32 },

    #[error("'{field}' must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },
}

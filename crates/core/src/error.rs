use thiserror::Error;

/// Fatal configuration errors, surfaced before any page is processed.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("target size must be positive")]
    ZeroTarget,

    #[error("min size {min} exceeds max size {max}")]
    MinExceedsMax { min: usize, max: usize },

    #[error("target size {target} outside [{min}, {max}]")]
    TargetOutOfBounds {
        target: usize,
        min: usize,
        max: usize,
    },
}

//! Error types for chain construction and configuration loading.

use thiserror::Error;

/// Errors raised when a chain cannot be built as requested.
///
/// Geometric degeneracies (coincident particles) are never errors; the
/// solver and collision passes report them as outcome values and move on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChainError {
    /// Fewer particles requested than the constructor needs.
    #[error("chain needs at least {min} particles, got {count}")]
    InvalidCount { count: usize, min: usize },
}

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// Damping must be in [0, 1].
    #[error("damping must be in [0, 1], got {0}")]
    InvalidDamping(f32),
    /// Timestep must be positive and finite.
    #[error("timestep must be positive and finite, got {0}")]
    InvalidTimestep(f32),
    /// Particle radius must be non-negative and finite.
    #[error("particle radius must be non-negative and finite, got {0}")]
    InvalidRadius(f32),
    #[error("bounds {width}x{height} cannot fit a particle of the configured radius")]
    InvalidBounds { width: f32, height: f32 },
    /// A scene chain entry has no usable layout.
    #[error("scene chain {index}: {reason}")]
    InvalidLayout { index: usize, reason: &'static str },
    #[error(transparent)]
    Chain(#[from] ChainError),
}

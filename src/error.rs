//! Error types
//!
//! Collision and simulation code is total over floats and never fails. Only
//! construction from untyped input, explicit inversion checks and config
//! loading return errors.

use thiserror::Error;

/// Errors from building or inverting vectors and matrices
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Initializer list had the wrong number of elements
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Determinant was zero or not finite
    #[error("matrix is singular (determinant {0})")]
    SingularMatrix(f32),
}

impl GeometryError {
    pub(crate) fn size_mismatch(got: usize, expected: usize) -> Self {
        Self::InvalidArgument(format!(
            "Can't initialize with list of size {got}. Size must be {expected}."
        ))
    }
}

/// Errors from loading or validating an [`ArenaConfig`](crate::ArenaConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

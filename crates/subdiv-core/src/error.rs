//! Error types for volume operations.

use thiserror::Error;

/// Main error type for volume and filter operations.
#[derive(Error, Debug)]
pub enum VolumeError {
    /// Division count outside the valid range.
    #[error("divisions must be at least 1, got {0}")]
    InvalidDivisions(u32),

    /// Two volumes disagree on shape and cannot be reconciled.
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
}

/// Result type for volume operations.
pub type Result<T> = std::result::Result<T, VolumeError>;

//! Error types for volslice.
//!
//! The slicing pipeline itself cannot fail; these errors come from
//! configuration and from loading voxel data.

use thiserror::Error;

/// The main error type for volslice operations.
#[derive(Error, Debug)]
pub enum VolsliceError {
    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Volume dimensions with a zero axis.
    #[error("invalid volume dimensions {width}x{height}x{depth}")]
    InvalidDimensions { width: u32, height: u32, depth: u32 },

    /// Slice step that is not finite or too small to bound the plane count.
    #[error("invalid slice step {0}: must be finite and at least {min}", min = crate::slicer::MIN_SLICE_STEP)]
    InvalidStep(f32),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for volslice operations.
pub type Result<T> = std::result::Result<T, VolsliceError>;

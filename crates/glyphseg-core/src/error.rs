//! Error types for glyphseg-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// glyphseg-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid buffer dimensions
    #[error("invalid buffer dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Unsupported channel count
    #[error("invalid channel count: {0} (expected 1, 3 or 4)")]
    InvalidChannels(u32),

    /// Sample array length does not equal width * height * channels
    #[error("sample count mismatch: expected {expected}, got {actual}")]
    SampleCountMismatch { expected: usize, actual: usize },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Requested region does not lie inside the buffer
    #[error("region ({x}, {y}, {w}x{h}) is outside a {width}x{height} buffer")]
    RegionOutOfBounds {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        width: u32,
        height: u32,
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;

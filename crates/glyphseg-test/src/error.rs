//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while building fixtures or comparing results
#[derive(Debug, Error)]
pub enum TestError {
    /// Fixture construction failed in the core crate
    #[error("fixture error: {0}")]
    Fixture(#[from] glyphseg_core::Error),

    /// A glyph has no block-letter drawing
    #[error("no block drawing for glyph '{0}'")]
    UnknownGlyph(char),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;

//! Error types for glyphseg-recog

use thiserror::Error;

/// Errors that can occur during recognition operations
#[derive(Debug, Error)]
pub enum RecogError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] glyphseg_core::Error),

    /// Binarization error
    #[error("color error: {0}")]
    Color(#[from] glyphseg_color::ColorError),

    /// Component labeling error
    #[error("region error: {0}")]
    Region(#[from] glyphseg_region::RegionError),

    /// The pixel region of a candidate could not be obtained
    #[error("render target unavailable for candidate {id}: {reason}")]
    RenderTargetUnavailable { id: usize, reason: String },

    /// Training data could not be parsed or does not fit the engine
    #[error("malformed training data: {0}")]
    MalformedTrainingData(String),

    /// A feature vector has the wrong length for this model
    #[error("feature arity mismatch: expected {expected}, got {actual}")]
    FeatureArityMismatch { expected: usize, actual: usize },

    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A model was queried before it was fitted
    #[error("model not fitted: {0}")]
    NotFitted(&'static str),

    /// JSON (de)serialization error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Worker pool could not be created
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for recognition operations
pub type RecogResult<T> = Result<T, RecogError>;

//! glyphseg-recog - Glyph segmentation and classification
//!
//! This crate refines the output of an external OCR recognizer:
//!
//! - **Page segmentation**: Row-then-column projection segmentation into
//!   character boxes
//! - **Features**: Gradient-orientation cells, normalized projections and
//!   contour statistics
//! - **Clustering**: k-means with k-means++ seeding
//! - **Classification**: k-nearest neighbours and a shallow decision tree
//! - **Engine**: Box refinement, correction passes and confidence blending
//!
//! # Quick Start
//!
//! ```no_run
//! use glyphseg_core::{BoundingBox, Channels, PixelBuffer};
//! use glyphseg_recog::{GlyphEngine, OcrSymbol, RecognitionConfig};
//!
//! let page = PixelBuffer::new_filled(400, 100, Channels::Gray, 255).unwrap();
//! let symbols = vec![
//!     OcrSymbol::new(BoundingBox::new_unchecked(10, 10, 14, 20), "A", 92.0),
//!     OcrSymbol::new(BoundingBox::new_unchecked(30, 10, 14, 20), "A", 41.0),
//! ];
//!
//! let mut engine = GlyphEngine::new(RecognitionConfig::default()).unwrap();
//! let result = engine.recognize(&page, &symbols).unwrap();
//! for c in &result.candidates {
//!     println!("{} {:?} {}", c.recognized_char, c.bbox, c.final_confidence);
//! }
//! ```
//!
//! # Modules
//!
//! - [`pageseg`]: Projection-based character segmentation
//! - [`features`]: Feature extraction
//! - [`cluster`]: k-means clustering
//! - [`classify`]: k-NN and decision tree
//! - [`score`]: Segmentation quality score
//! - [`engine`]: The recognition engine

pub mod classify;
pub mod cluster;
pub mod engine;
mod error;
pub mod features;
pub mod pageseg;
pub mod score;

pub use error::{RecogError, RecogResult};

// Re-export commonly used types
pub use classify::{DecisionTree, KNearestNeighbors, Prediction, TreeNode};
pub use cluster::KMeans;
pub use engine::{
    CorrectionThresholds, GlyphCandidate, GlyphEngine, OcrSymbol, ParallelPolicy,
    RecognitionConfig, RecognitionResult, RecognitionStats, TrainingSample,
};
pub use features::{FeatureOptions, FeatureVector, extract_features};
pub use pageseg::{PageSegOptions, find_ranges, segment_characters};
pub use score::{score_region, segmentation_score};

// Re-export core for convenience
pub use glyphseg_core;

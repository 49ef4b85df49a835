//! Recognition configuration
//!
//! All options are plain data with serde support, so a configuration can
//! be stored as JSON and missing fields fall back to their defaults.

use crate::features::FeatureOptions;
use crate::score::{DEFAULT_ASPECT_BAND, DEFAULT_INK_RATIO_BAND};
use crate::{RecogError, RecogResult};
use serde::{Deserialize, Serialize};

/// Fixed constants of the correction passes and the confidence blend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectionThresholds {
    /// k-NN confidence must exceed this to raise ML confidence
    pub knn_confidence_gate: f32,
    /// ML confidence floor when the decision tree predicts a label
    pub tree_confidence_floor: f32,
    /// Cluster members below this OCR confidence may be relabeled
    pub cluster_low_confidence: f32,
    /// ML confidence floor given to relabeled cluster members
    pub cluster_confidence_bump: f32,
    /// Adjacent repeats below this OCR confidence are penalized
    pub context_low_confidence: f32,
    /// OCR confidence removed from the second of a repeated pair
    pub context_penalty: f32,
    /// Vertical distance within which boxes share a reading row
    pub row_tolerance: i32,
    /// Inclusive ink-ratio band of a well-formed segment
    pub ink_ratio_band: (f32, f32),
    /// Inclusive width/height band of a well-formed segment
    pub aspect_band: (f32, f32),
    /// Segmentation score when the crop holds exactly one component
    pub single_component_score: f32,
    /// Segmentation score when no refinement was possible
    pub fallback_score: f32,
    /// Weight of OCR confidence (0..100) in the blend
    pub ocr_weight: f32,
    /// Weight of the segmentation score (scaled to 0..100) in the blend
    pub segmentation_weight: f32,
    /// Weight of the ML confidence (scaled to 0..100) in the blend
    pub ml_weight: f32,
}

impl Default for CorrectionThresholds {
    fn default() -> Self {
        Self {
            knn_confidence_gate: 0.6,
            tree_confidence_floor: 0.7,
            cluster_low_confidence: 50.0,
            cluster_confidence_bump: 0.6,
            context_low_confidence: 40.0,
            context_penalty: 20.0,
            row_tolerance: 20,
            ink_ratio_band: DEFAULT_INK_RATIO_BAND,
            aspect_band: DEFAULT_ASPECT_BAND,
            single_component_score: 0.8,
            fallback_score: 0.5,
            ocr_weight: 0.4,
            segmentation_weight: 0.3,
            ml_weight: 0.3,
        }
    }
}

impl CorrectionThresholds {
    /// Validate the thresholds
    pub fn validate(&self) -> RecogResult<()> {
        let bands = [("ink ratio", self.ink_ratio_band), ("aspect", self.aspect_band)];
        for (name, (min, max)) in bands {
            if min.is_nan() || max.is_nan() || min > max {
                return Err(RecogError::InvalidParameter(format!(
                    "{} band is empty: [{}, {}]",
                    name, min, max
                )));
            }
        }
        if self.row_tolerance < 0 {
            return Err(RecogError::InvalidParameter(format!(
                "row tolerance must be non-negative: {}",
                self.row_tolerance
            )));
        }
        Ok(())
    }
}

/// Parallel processing of per-candidate work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelPolicy {
    /// Maximum number of worker threads.
    /// If None, rayon's global pool is used.
    #[serde(default)]
    pub max_threads: Option<usize>,

    /// Candidate counts up to this value are processed sequentially
    #[serde(default = "ParallelPolicy::default_candidate_threshold")]
    pub candidate_threshold: usize,
}

impl ParallelPolicy {
    /// Create a policy with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of threads
    pub fn with_max_threads(mut self, max_threads: Option<usize>) -> Self {
        self.max_threads = max_threads;
        self
    }

    /// Set the sequential/parallel candidate threshold
    pub fn with_candidate_threshold(mut self, threshold: usize) -> Self {
        self.candidate_threshold = threshold;
        self
    }

    /// Whether `candidates` items should be processed in parallel
    pub fn use_parallel(&self, candidates: usize) -> bool {
        candidates > self.candidate_threshold
    }

    fn default_candidate_threshold() -> usize {
        8
    }
}

impl Default for ParallelPolicy {
    fn default() -> Self {
        Self {
            max_threads: None,
            candidate_threshold: Self::default_candidate_threshold(),
        }
    }
}

/// Options of one [`crate::GlyphEngine`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionConfig {
    /// Refine OCR boxes with component labeling
    pub use_segmentation: bool,
    /// Cluster candidates and apply cluster-majority correction
    pub use_kmeans: bool,
    /// Raise ML confidence from k-NN predictions
    pub use_knn: bool,
    /// Raise ML confidence from decision-tree predictions
    pub use_decision_tree: bool,
    /// Upper bound on the number of clusters (at least 1)
    pub kmeans_clusters: usize,
    /// Neighbours voting in k-NN (at least 1)
    pub knn_neighbors: usize,
    /// Seed of k-means++ initialization; `None` draws from process entropy
    pub seed: Option<u64>,
    /// Feature extraction options
    pub features: FeatureOptions,
    /// Correction constants
    pub thresholds: CorrectionThresholds,
    /// Parallel processing policy
    pub parallel: ParallelPolicy,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            use_segmentation: true,
            use_kmeans: true,
            use_knn: true,
            use_decision_tree: true,
            kmeans_clusters: 5,
            knn_neighbors: 3,
            seed: None,
            features: FeatureOptions::default(),
            thresholds: CorrectionThresholds::default(),
            parallel: ParallelPolicy::default(),
        }
    }
}

impl RecognitionConfig {
    /// Set the k-means++ seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the maximum number of clusters
    pub fn with_kmeans_clusters(mut self, k: usize) -> Self {
        self.kmeans_clusters = k;
        self
    }

    /// Set the number of k-NN neighbours
    pub fn with_knn_neighbors(mut self, k: usize) -> Self {
        self.knn_neighbors = k;
        self
    }

    /// Enable or disable segmentation refinement
    pub fn with_segmentation(mut self, enabled: bool) -> Self {
        self.use_segmentation = enabled;
        self
    }

    /// Set the parallel policy
    pub fn with_parallel(mut self, parallel: ParallelPolicy) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> RecogResult<()> {
        validate_count("kmeans_clusters", self.kmeans_clusters)?;
        validate_count("knn_neighbors", self.knn_neighbors)?;
        if self.parallel.max_threads == Some(0) {
            return Err(RecogError::InvalidParameter(
                "max_threads must be at least 1".to_string(),
            ));
        }
        self.features.validate()?;
        self.thresholds.validate()
    }

    /// Parse a configuration from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> RecogResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to pretty-printed JSON
    pub fn to_json(&self) -> RecogResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub(crate) fn validate_count(name: &str, value: usize) -> RecogResult<()> {
    if value == 0 {
        return Err(RecogError::InvalidParameter(format!(
            "{} must be at least 1",
            name
        )));
    }
    Ok(())
}

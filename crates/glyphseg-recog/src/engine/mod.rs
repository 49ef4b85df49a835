//! Glyph recognition engine
//!
//! [`GlyphEngine`] enriches the symbol guesses of an external OCR
//! recognizer:
//!
//! 1. Crop each symbol's region, binarize it with Otsu, and re-anchor the
//!    box on its largest connected component
//! 2. Extract a feature vector from the chosen region
//! 3. Cluster all feature vectors with k-means
//! 4. Raise ML confidence with k-NN and decision-tree predictions when
//!    training samples exist
//! 5. Apply cluster-majority and reading-order context corrections
//! 6. Blend OCR, segmentation and ML confidence
//!
//! Steps 1 and 2 are independent per candidate and run in parallel
//! according to [`ParallelPolicy`]. Everything after that runs on the
//! calling thread.
//!
//! # Example
//!
//! ```no_run
//! use glyphseg_core::{BoundingBox, Channels, PixelBuffer};
//! use glyphseg_recog::{GlyphEngine, OcrSymbol, RecognitionConfig};
//!
//! let page = PixelBuffer::new_filled(200, 100, Channels::Gray, 255).unwrap();
//! let symbols = vec![OcrSymbol::new(BoundingBox::new_unchecked(10, 10, 12, 16), "A", 85.0)];
//!
//! let mut engine = GlyphEngine::new(RecognitionConfig::default().with_seed(7)).unwrap();
//! let result = engine.recognize(&page, &symbols).unwrap();
//! println!("{} candidates", result.stats.total);
//! ```

mod config;
mod correct;
mod refine;
mod train;
mod types;

pub use config::{CorrectionThresholds, ParallelPolicy, RecognitionConfig};
pub use types::{GlyphCandidate, OcrSymbol, RecognitionResult, RecognitionStats, TrainingSample};

use crate::RecogResult;
use crate::classify::{DecisionTree, KNearestNeighbors};
use crate::cluster::KMeans;
use crate::features::{FeatureVector, extract_features};
use crate::pageseg::{PageSegOptions, segment_characters};
use config::validate_count;
use glyphseg_core::{PixelBuffer, Segment};
use rayon::prelude::*;
use refine::{Refined, refine_candidate};
use std::collections::HashSet;
use tracing::{debug, info};

/// Recognition engine
///
/// Owns its configuration, the operator's training samples and the
/// models fitted from them. Engines are independent; create one per
/// session.
#[derive(Debug, Clone)]
pub struct GlyphEngine {
    config: RecognitionConfig,
    training: Vec<TrainingSample>,
    kmeans: Option<KMeans>,
    knn: Option<KNearestNeighbors>,
    tree: Option<DecisionTree>,
}

impl Default for GlyphEngine {
    fn default() -> Self {
        Self {
            config: RecognitionConfig::default(),
            training: Vec::new(),
            kmeans: None,
            knn: None,
            tree: None,
        }
    }
}

impl GlyphEngine {
    /// Create an engine
    ///
    /// # Errors
    ///
    /// Returns [`crate::RecogError::InvalidParameter`] if `config` is invalid.
    pub fn new(config: RecognitionConfig) -> RecogResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &RecognitionConfig {
        &self.config
    }

    /// Get the k-means model of the last recognition run
    ///
    /// `None` when that run had clustering disabled or nothing to cluster.
    pub fn kmeans(&self) -> Option<&KMeans> {
        self.kmeans.as_ref()
    }

    /// Set the maximum number of clusters and discard fitted models
    pub fn set_kmeans_clusters(&mut self, k: usize) -> RecogResult<()> {
        validate_count("kmeans_clusters", k)?;
        self.config.kmeans_clusters = k;
        self.discard_models();
        Ok(())
    }

    /// Set the number of k-NN neighbours and discard fitted models
    pub fn set_knn_neighbors(&mut self, k: usize) -> RecogResult<()> {
        validate_count("knn_neighbors", k)?;
        self.config.knn_neighbors = k;
        self.discard_models();
        Ok(())
    }

    /// Enable or disable segmentation refinement
    pub fn set_use_segmentation(&mut self, enabled: bool) {
        self.config.use_segmentation = enabled;
    }

    /// Enable or disable clustering and cluster-majority correction
    pub fn set_use_kmeans(&mut self, enabled: bool) {
        self.config.use_kmeans = enabled;
    }

    /// Enable or disable the k-NN classifier
    pub fn set_use_knn(&mut self, enabled: bool) {
        self.config.use_knn = enabled;
    }

    /// Enable or disable the decision-tree classifier
    pub fn set_use_decision_tree(&mut self, enabled: bool) {
        self.config.use_decision_tree = enabled;
    }

    fn discard_models(&mut self) {
        self.kmeans = None;
        self.knn = None;
        self.tree = None;
    }

    /// Extract the feature vector of a glyph bitmap with this engine's
    /// feature options
    pub fn extract_features(&self, pix: &PixelBuffer) -> RecogResult<FeatureVector> {
        extract_features(pix, &self.config.features)
    }

    /// Segment a page into characters without OCR input
    pub fn segment_page(
        &self,
        page: &PixelBuffer,
        options: &PageSegOptions,
    ) -> RecogResult<Vec<Segment>> {
        segment_characters(page, options)
    }

    /// Recognize the glyphs of `page` guessed by an OCR recognizer
    ///
    /// Candidates are returned in input order. A candidate whose region
    /// cannot be cropped keeps its unrefined box and takes no part in
    /// clustering or classification.
    ///
    /// # Errors
    ///
    /// Fails only if the configuration is invalid, the worker pool cannot
    /// be built, or fitting a model fails.
    pub fn recognize(
        &mut self,
        page: &PixelBuffer,
        symbols: &[OcrSymbol],
    ) -> RecogResult<RecognitionResult> {
        self.config.validate()?;
        // each run fits its own clustering; none survives from the last run
        self.kmeans = None;
        if symbols.is_empty() {
            debug!("no candidates");
            return Ok(RecognitionResult::default());
        }

        let refined = self.refine_all(page, symbols)?;
        let (mut candidates, features): (Vec<GlyphCandidate>, Vec<Option<Vec<f32>>>) = refined
            .into_iter()
            .map(|r| (r.candidate, r.features))
            .unzip();

        let featured: Vec<usize> = (0..features.len()).filter(|&i| features[i].is_some()).collect();
        let data: Vec<Vec<f32>> = features.into_iter().flatten().collect();
        debug!(candidates = candidates.len(), featured = data.len(), "refinement done");

        if self.config.use_kmeans {
            self.assign_clusters(&mut candidates, &featured, &data)?;
        }
        self.classify(&mut candidates, &featured, &data)?;

        let thresholds = &self.config.thresholds;
        let cluster_corrections = if self.config.use_kmeans {
            correct::cluster_majority(&mut candidates, thresholds)
        } else {
            0
        };
        let context_penalties = correct::context(&mut candidates, thresholds);
        for c in candidates.iter_mut() {
            c.final_confidence = correct::blend(c, thresholds);
        }

        let stats = RecognitionStats {
            total: candidates.len(),
            unique_labels: candidates
                .iter()
                .map(|c| c.recognized_char.as_str())
                .collect::<HashSet<_>>()
                .len(),
            clusters: candidates
                .iter()
                .filter_map(|c| c.cluster_id)
                .collect::<HashSet<_>>()
                .len(),
            cluster_corrections,
            context_penalties,
        };
        info!(
            total = stats.total,
            unique_labels = stats.unique_labels,
            clusters = stats.clusters,
            cluster_corrections,
            context_penalties,
            "recognition finished"
        );

        Ok(RecognitionResult { candidates, stats })
    }

    fn refine_all(&self, page: &PixelBuffer, symbols: &[OcrSymbol]) -> RecogResult<Vec<Refined>> {
        let config = &self.config;
        let parallel = config.parallel.use_parallel(symbols.len());
        let run = || -> Vec<Refined> {
            if parallel {
                symbols
                    .par_iter()
                    .enumerate()
                    .map(|(id, s)| refine_candidate(page, id, s, config))
                    .collect()
            } else {
                symbols
                    .iter()
                    .enumerate()
                    .map(|(id, s)| refine_candidate(page, id, s, config))
                    .collect()
            }
        };

        match config.parallel.max_threads {
            Some(threads) if parallel => {
                let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
                Ok(pool.install(run))
            }
            _ => Ok(run()),
        }
    }

    /// Fit a fresh k-means on the featured candidates and record clusters
    fn assign_clusters(
        &mut self,
        candidates: &mut [GlyphCandidate],
        featured: &[usize],
        data: &[Vec<f32>],
    ) -> RecogResult<()> {
        if data.is_empty() {
            return Ok(());
        }
        let k = self.config.kmeans_clusters.min(data.len());
        let mut model = KMeans::new(k).with_optional_seed(self.config.seed);
        model.fit(data)?;
        for (&i, &label) in featured.iter().zip(model.labels()) {
            candidates[i].cluster_id = Some(label);
        }
        self.kmeans = Some(model);
        Ok(())
    }

    /// Raise ML confidence from classifier predictions
    fn classify(
        &mut self,
        candidates: &mut [GlyphCandidate],
        featured: &[usize],
        data: &[Vec<f32>],
    ) -> RecogResult<()> {
        if self.training.is_empty() || data.is_empty() {
            return Ok(());
        }
        self.ensure_classifiers()?;
        let thresholds = &self.config.thresholds;

        for (&i, point) in featured.iter().zip(data) {
            let c = &mut candidates[i];
            if let Some(knn) = self.knn.as_ref().filter(|_| self.config.use_knn) {
                let prediction = knn.predict_with_confidence(point)?;
                if prediction.confidence > thresholds.knn_confidence_gate {
                    c.ml_confidence = c.ml_confidence.max(prediction.confidence);
                    c.ml_label = Some(prediction.label);
                }
            }
            if let Some(tree) = self.tree.as_ref().filter(|_| self.config.use_decision_tree) {
                let label = tree.predict(point)?;
                c.ml_confidence = c.ml_confidence.max(thresholds.tree_confidence_floor);
                c.ml_label.get_or_insert(label);
            }
        }
        Ok(())
    }

    /// Fit the enabled classifiers that are not fitted yet
    fn ensure_classifiers(&mut self) -> RecogResult<()> {
        let needs_knn = self.config.use_knn && self.knn.is_none();
        let needs_tree = self.config.use_decision_tree && self.tree.is_none();
        if !needs_knn && !needs_tree {
            return Ok(());
        }

        let (features, labels): (Vec<Vec<f32>>, Vec<String>) = self
            .training
            .iter()
            .map(|s| (s.features.clone(), s.label.clone()))
            .unzip();

        if needs_knn {
            let mut knn = KNearestNeighbors::new(self.config.knn_neighbors);
            knn.fit(&features, &labels)?;
            self.knn = Some(knn);
        }
        if needs_tree {
            let mut tree = DecisionTree::new();
            tree.fit(&features, &labels)?;
            debug!(depth = tree.depth(), "decision tree fitted");
            self.tree = Some(tree);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphseg_core::{BoundingBox, Channels};

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(GlyphEngine::new(RecognitionConfig::default().with_kmeans_clusters(0)).is_err());
    }

    #[test]
    fn test_empty_input() {
        let page = PixelBuffer::new_filled(10, 10, Channels::Gray, 255).unwrap();
        let mut engine = GlyphEngine::default();
        let result = engine.recognize(&page, &[]).unwrap();
        assert!(result.candidates.is_empty());
        assert_eq!(result.stats, RecognitionStats::default());
    }

    #[test]
    fn test_setters_validate_and_discard_models() {
        let page = PixelBuffer::new_filled(40, 40, Channels::Gray, 255).unwrap();
        let symbols = vec![OcrSymbol::new(BoundingBox::new_unchecked(0, 0, 10, 10), "a", 50.0)];
        let mut engine = GlyphEngine::new(RecognitionConfig::default().with_seed(1)).unwrap();
        engine.recognize(&page, &symbols).unwrap();
        assert!(engine.kmeans().is_some());

        assert!(engine.set_kmeans_clusters(0).is_err());
        assert!(engine.kmeans().is_some());
        engine.set_kmeans_clusters(2).unwrap();
        assert!(engine.kmeans().is_none());
        assert_eq!(engine.config().kmeans_clusters, 2);
        assert!(engine.set_knn_neighbors(0).is_err());
    }

    #[test]
    fn test_kmeans_model_belongs_to_last_run() {
        let page = PixelBuffer::new_filled(40, 40, Channels::Gray, 255).unwrap();
        let symbols = vec![OcrSymbol::new(BoundingBox::new_unchecked(0, 0, 10, 10), "a", 50.0)];
        let mut engine = GlyphEngine::new(RecognitionConfig::default().with_seed(1)).unwrap();
        engine.recognize(&page, &symbols).unwrap();
        assert!(engine.kmeans().is_some());

        engine.recognize(&page, &[]).unwrap();
        assert!(engine.kmeans().is_none());

        engine.recognize(&page, &symbols).unwrap();
        engine.set_use_kmeans(false);
        let result = engine.recognize(&page, &symbols).unwrap();
        assert!(engine.kmeans().is_none());
        assert_eq!(result.stats.clusters, 0);
    }

    #[test]
    fn test_unavailable_region_is_not_clustered() {
        let page = PixelBuffer::new_filled(40, 40, Channels::Gray, 255).unwrap();
        let symbols = vec![
            OcrSymbol::new(BoundingBox::new_unchecked(0, 0, 10, 10), "a", 50.0),
            OcrSymbol::new(BoundingBox::new_unchecked(90, 90, 10, 10), "b", 50.0),
        ];
        let mut engine = GlyphEngine::new(RecognitionConfig::default().with_seed(1)).unwrap();
        let result = engine.recognize(&page, &symbols).unwrap();
        assert_eq!(result.candidates.len(), 2);
        assert_eq!(result.candidates[0].cluster_id, Some(0));
        assert_eq!(result.candidates[1].cluster_id, None);
        assert_eq!(result.candidates[1].bbox, symbols[1].bbox);
        assert_eq!(result.stats.clusters, 1);
    }
}

//! Training-sample management
//!
//! Samples are curated by the operator between recognition runs. Any
//! change to the sample list discards the fitted classifiers; they are
//! refitted on the next run.

use super::{GlyphEngine, TrainingSample};
use crate::features::check_arity;
use crate::{RecogError, RecogResult};
use glyphseg_color::threshold_otsu;
use glyphseg_core::PixelBuffer;
use tracing::{debug, warn};

impl GlyphEngine {
    /// Get the training samples
    pub fn training_samples(&self) -> &[TrainingSample] {
        &self.training
    }

    /// Add a sample from a glyph region
    ///
    /// The region is Otsu-binarized before feature extraction, the same
    /// way candidate crops are.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::InvalidParameter`] for an empty label.
    pub fn add_training_sample(&mut self, region: &PixelBuffer, label: &str) -> RecogResult<()> {
        check_label(label)?;
        let binary = threshold_otsu(region)?;
        let features = self.extract_features(&binary)?;
        self.training.push(TrainingSample::new(features.values, label));
        self.discard_classifiers();
        Ok(())
    }

    /// Add several samples at once
    ///
    /// Either every sample is added or, on error, none is.
    pub fn add_training_samples(&mut self, batch: &[(PixelBuffer, String)]) -> RecogResult<()> {
        let mut samples = Vec::with_capacity(batch.len());
        for (region, label) in batch {
            check_label(label)?;
            let binary = threshold_otsu(region)?;
            let features = self.extract_features(&binary)?;
            samples.push(TrainingSample::new(features.values, label.as_str()));
        }
        debug!(added = samples.len(), "training samples added");
        self.training.extend(samples);
        self.discard_classifiers();
        Ok(())
    }

    /// Remove every training sample
    pub fn clear_training_data(&mut self) {
        self.training.clear();
        self.discard_classifiers();
    }

    /// Serialize the training samples as a JSON list of
    /// `{"features": [...], "label": "..."}` objects
    pub fn export_training_data(&self) -> RecogResult<String> {
        Ok(serde_json::to_string_pretty(&self.training)?)
    }

    /// Replace the training samples with a serialized list
    ///
    /// Returns the number of imported samples.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::MalformedTrainingData`] if the document does
    /// not parse or a sample has the wrong feature arity, an empty label or
    /// a non-finite value. The current samples are then left untouched.
    pub fn import_training_data(&mut self, serialized: &str) -> RecogResult<usize> {
        match self.parse_training_data(serialized) {
            Ok(samples) => {
                let count = samples.len();
                self.training = samples;
                self.discard_classifiers();
                debug!(count, "training data imported");
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "training data import rejected");
                Err(e)
            }
        }
    }

    fn parse_training_data(&self, serialized: &str) -> RecogResult<Vec<TrainingSample>> {
        let samples: Vec<TrainingSample> = serde_json::from_str(serialized)
            .map_err(|e| RecogError::MalformedTrainingData(e.to_string()))?;

        let arity = self.config.features.arity();
        for (i, sample) in samples.iter().enumerate() {
            check_arity(arity, &sample.features)
                .map_err(|e| RecogError::MalformedTrainingData(format!("sample {}: {}", i, e)))?;
            if sample.label.is_empty() {
                return Err(RecogError::MalformedTrainingData(format!(
                    "sample {} has an empty label",
                    i
                )));
            }
            if sample.features.iter().any(|v| !v.is_finite()) {
                return Err(RecogError::MalformedTrainingData(format!(
                    "sample {} has a non-finite feature",
                    i
                )));
            }
        }
        Ok(samples)
    }

    fn discard_classifiers(&mut self) {
        self.knn = None;
        self.tree = None;
    }
}

fn check_label(label: &str) -> RecogResult<()> {
    if label.is_empty() {
        return Err(RecogError::InvalidParameter(
            "training label must not be empty".to_string(),
        ));
    }
    Ok(())
}

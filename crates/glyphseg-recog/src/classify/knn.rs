//! K-nearest neighbors
//!
//! Stores the raw training vectors; prediction ranks every stored sample
//! by Euclidean distance (stable, so equal distances keep insertion
//! order) and votes among the `k` nearest.

use super::{Prediction, Tally, validate_training_set};
use crate::cluster::squared_distance;
use crate::features::check_arity;
use crate::{RecogError, RecogResult};

/// Added to distances before inverting them into vote weights
const DISTANCE_EPSILON: f32 = 0.001;

/// K-nearest neighbors classifier
#[derive(Debug, Clone)]
pub struct KNearestNeighbors {
    /// Number of neighbours that vote
    k: usize,
    /// Stored training vectors
    features: Vec<Vec<f32>>,
    /// Label of each stored vector
    labels: Vec<String>,
}

impl KNearestNeighbors {
    /// Create an empty classifier voting among `k` neighbours
    pub fn new(k: usize) -> Self {
        Self {
            k,
            features: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Number of neighbours that vote
    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of stored samples
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Check whether no samples are stored
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Store a labeled training set, replacing any previous one
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::InvalidParameter`] if `k` is 0 or the slices
    /// differ in length, and [`RecogError::FeatureArityMismatch`] if the
    /// vectors differ in length.
    pub fn fit(&mut self, features: &[Vec<f32>], labels: &[String]) -> RecogResult<()> {
        if self.k == 0 {
            return Err(RecogError::InvalidParameter(
                "k-NN needs at least one neighbour".to_string(),
            ));
        }
        validate_training_set(features, labels)?;
        self.features = features.to_vec();
        self.labels = labels.to_vec();
        Ok(())
    }

    /// The `min(k, len)` nearest samples as `(distance, index)`, nearest first.
    fn neighbours(&self, point: &[f32]) -> RecogResult<Vec<(f32, usize)>> {
        let first = self.features.first().ok_or(RecogError::NotFitted("k-NN"))?;
        check_arity(first.len(), point)?;

        let mut ranked: Vec<(f32, usize)> = self
            .features
            .iter()
            .enumerate()
            .map(|(i, f)| (squared_distance(point, f).sqrt(), i))
            .collect();
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
        ranked.truncate(self.k.min(ranked.len()));
        Ok(ranked)
    }

    /// Predict by unweighted majority vote among the nearest samples
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::NotFitted`] when no samples are stored.
    pub fn predict(&self, point: &[f32]) -> RecogResult<String> {
        let mut tally = Tally::default();
        for (_, i) in self.neighbours(point)? {
            tally.add(&self.labels[i], 1.0);
        }
        tally
            .winner()
            .map(|(label, _)| label.to_string())
            .ok_or(RecogError::NotFitted("k-NN"))
    }

    /// Predict by inverse-distance weighted vote
    ///
    /// Each neighbour votes with weight `1 / (distance + 0.001)`; the
    /// confidence is the winning weight over the total weight.
    pub fn predict_with_confidence(&self, point: &[f32]) -> RecogResult<Prediction> {
        let mut tally = Tally::default();
        for (d, i) in self.neighbours(point)? {
            tally.add(&self.labels[i], 1.0 / (d + DISTANCE_EPSILON));
        }
        let total = tally.total();
        let (label, weight) = tally.winner().ok_or(RecogError::NotFitted("k-NN"))?;
        Ok(Prediction {
            label: label.to_string(),
            confidence: if total > 0.0 { weight / total } else { 0.0 },
        })
    }
}

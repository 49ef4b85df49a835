//! Supervised classifiers
//!
//! Two small classifiers over labeled feature vectors:
//!
//! - [`KNearestNeighbors`] - majority or distance-weighted vote among the
//!   `k` nearest stored samples
//! - [`DecisionTree`] - entropy-driven binary splits on single features
//!
//! Every tie in a vote is resolved in favour of the label encountered
//! first.

pub mod dtree;
pub mod knn;

pub use dtree::{DecisionTree, TreeNode};
pub use knn::KNearestNeighbors;

use crate::features::check_arity;
use crate::{RecogError, RecogResult};

/// A predicted label with its confidence in `[0, 1]`
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Predicted label
    pub label: String,
    /// Confidence of the prediction
    pub confidence: f32,
}

/// Per-label tallies kept in first-seen order
#[derive(Debug, Default)]
pub(crate) struct Tally<'a> {
    entries: Vec<(&'a str, f32)>,
}

impl<'a> Tally<'a> {
    pub(crate) fn add(&mut self, label: &'a str, weight: f32) {
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 += weight,
            None => self.entries.push((label, weight)),
        }
    }

    /// Label with the largest tally; ties keep the first one seen.
    pub(crate) fn winner(&self) -> Option<(&'a str, f32)> {
        let mut best: Option<(&'a str, f32)> = None;
        for &(label, weight) in &self.entries {
            if best.is_none_or(|(_, w)| weight > w) {
                best = Some((label, weight));
            }
        }
        best
    }

    pub(crate) fn total(&self) -> f32 {
        self.entries.iter().map(|(_, w)| w).sum()
    }
}

/// Check a labeled training set and return its feature arity.
pub(crate) fn validate_training_set(
    features: &[Vec<f32>],
    labels: &[String],
) -> RecogResult<usize> {
    if features.len() != labels.len() {
        return Err(RecogError::InvalidParameter(format!(
            "{} feature vectors but {} labels",
            features.len(),
            labels.len()
        )));
    }
    let dim = features.first().map_or(0, Vec::len);
    for f in features {
        check_arity(dim, f)?;
    }
    Ok(dim)
}

//! Decision tree classifier
//!
//! A recursive binary splitter. A node becomes a leaf when all of its
//! samples share one label, when the depth cap is reached, or when it holds
//! fewer than `min_samples_split` samples. Otherwise every feature is tried
//! at every midpoint between consecutive distinct sorted values, and the
//! split with the highest information gain (base-2 entropy) is kept; the
//! first candidate wins ties. Samples with `value <= threshold` go left.

use super::{Tally, validate_training_set};
use crate::features::check_arity;
use crate::{RecogError, RecogResult};
use tracing::debug;

/// A node in a decision tree
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    /// Leaf with a predicted label
    Leaf {
        /// Predicted label
        label: String,
    },
    /// Internal split on one feature
    Internal {
        /// Index of the feature to split on
        feature_index: usize,
        /// Samples with `feature <= threshold` go left
        threshold: f32,
        /// Left subtree
        left: Box<TreeNode>,
        /// Right subtree
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    /// Depth of the subtree; a leaf has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Number of leaves in the subtree
    pub fn leaf_count(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }
}

/// Decision tree classifier
#[derive(Debug, Clone)]
pub struct DecisionTree {
    /// Maximum depth of an internal node
    max_depth: usize,
    /// Nodes with fewer samples become leaves
    min_samples_split: usize,
    /// Root of the fitted tree
    root: Option<TreeNode>,
    /// Feature arity of the training set
    n_features: usize,
}

impl Default for DecisionTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Best split found at one node
struct Split {
    feature_index: usize,
    threshold: f32,
    gain: f32,
}

fn entropy(labels: &[&str]) -> f32 {
    let mut tally = Tally::default();
    for &l in labels {
        tally.add(l, 1.0);
    }
    let n = labels.len() as f32;
    tally
        .entries
        .iter()
        .map(|&(_, count)| {
            let p = count / n;
            -p * p.log2()
        })
        .sum()
}

fn majority_label(labels: &[&str]) -> String {
    let mut tally = Tally::default();
    for &l in labels {
        tally.add(l, 1.0);
    }
    tally
        .winner()
        .map(|(label, _)| label.to_string())
        .unwrap_or_default()
}

impl DecisionTree {
    /// Create a tree with depth cap 5 and minimum split size 5
    pub fn new() -> Self {
        Self {
            max_depth: 5,
            min_samples_split: 5,
            root: None,
            n_features: 0,
        }
    }

    /// Set the depth cap
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the minimum number of samples needed to split a node
    pub fn with_min_samples_split(mut self, min_samples_split: usize) -> Self {
        self.min_samples_split = min_samples_split;
        self
    }

    /// Root of the fitted tree
    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_ref()
    }

    /// Depth of the fitted tree (0 when unfitted)
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, TreeNode::depth)
    }

    /// Check whether the tree has been fitted
    pub fn is_fitted(&self) -> bool {
        self.root.is_some()
    }

    /// Fit the tree to a labeled training set
    ///
    /// An empty training set leaves the tree unfitted.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::InvalidParameter`] if the slices differ in
    /// length, or [`RecogError::FeatureArityMismatch`] if the vectors do.
    pub fn fit(&mut self, features: &[Vec<f32>], labels: &[String]) -> RecogResult<()> {
        self.n_features = validate_training_set(features, labels)?;
        self.root = None;
        if features.is_empty() {
            return Ok(());
        }

        let rows: Vec<(&[f32], &str)> = features
            .iter()
            .zip(labels)
            .map(|(f, l)| (f.as_slice(), l.as_str()))
            .collect();
        let root = self.build_tree(&rows, 0);
        debug!(
            samples = rows.len(),
            depth = root.depth(),
            leaves = root.leaf_count(),
            "decision tree fitted"
        );
        self.root = Some(root);
        Ok(())
    }

    fn build_tree(&self, rows: &[(&[f32], &str)], depth: usize) -> TreeNode {
        let labels: Vec<&str> = rows.iter().map(|&(_, l)| l).collect();
        let pure = labels.windows(2).all(|w| w[0] == w[1]);
        if pure || depth >= self.max_depth || rows.len() < self.min_samples_split {
            return TreeNode::Leaf {
                label: majority_label(&labels),
            };
        }

        let Some(split) = self.find_best_split(rows, &labels) else {
            return TreeNode::Leaf {
                label: majority_label(&labels),
            };
        };

        let (left, right): (Vec<_>, Vec<_>) = rows
            .iter()
            .copied()
            .partition(|(f, _)| f[split.feature_index] <= split.threshold);
        if left.is_empty() || right.is_empty() {
            return TreeNode::Leaf {
                label: majority_label(&labels),
            };
        }

        TreeNode::Internal {
            feature_index: split.feature_index,
            threshold: split.threshold,
            left: Box::new(self.build_tree(&left, depth + 1)),
            right: Box::new(self.build_tree(&right, depth + 1)),
        }
    }

    fn find_best_split(&self, rows: &[(&[f32], &str)], labels: &[&str]) -> Option<Split> {
        let parent_entropy = entropy(labels);
        let n = rows.len() as f32;
        let mut best: Option<Split> = None;

        for feature_index in 0..self.n_features {
            let mut values: Vec<f32> = rows.iter().map(|(f, _)| f[feature_index]).collect();
            values.sort_by(f32::total_cmp);
            values.dedup();

            for pair in values.windows(2) {
                let threshold = (pair[0] + pair[1]) / 2.0;
                let mut left = Vec::new();
                let mut right = Vec::new();
                for &(f, l) in rows {
                    if f[feature_index] <= threshold {
                        left.push(l);
                    } else {
                        right.push(l);
                    }
                }
                let gain = parent_entropy
                    - (left.len() as f32 / n) * entropy(&left)
                    - (right.len() as f32 / n) * entropy(&right);

                if best.as_ref().is_none_or(|b| gain > b.gain) {
                    best = Some(Split {
                        feature_index,
                        threshold,
                        gain,
                    });
                }
            }
        }

        best
    }

    /// Predict the label of one feature vector
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::NotFitted`] before fitting, or
    /// [`RecogError::FeatureArityMismatch`] for a vector of the wrong length.
    pub fn predict(&self, point: &[f32]) -> RecogResult<String> {
        let mut node = self.root.as_ref().ok_or(RecogError::NotFitted("decision tree"))?;
        check_arity(self.n_features, point)?;
        loop {
            match node {
                TreeNode::Leaf { label } => return Ok(label.clone()),
                TreeNode::Internal {
                    feature_index,
                    threshold,
                    left,
                    right,
                } => {
                    node = if point[*feature_index] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

//! K-Means clustering
//!
//! Uses Lloyd's algorithm with k-means++ initialization.
//!
//! # Algorithm
//!
//! 1. Pick the first centroid uniformly at random, then each further
//!    centroid with probability proportional to its squared distance to
//!    the nearest centroid chosen so far
//! 2. Assign each sample to the nearest centroid (first minimum wins)
//! 3. Move each centroid to the mean of its samples; a centroid without
//!    samples stays where it is
//! 4. Stop when no centroid moved by `tol` or more, or after `max_iter`
//!    iterations

use crate::features::check_arity;
use crate::{RecogError, RecogResult};
use rand::prelude::*;
use tracing::debug;

/// Squared Euclidean distance
#[inline]
pub(crate) fn squared_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// K-Means clustering model
///
/// # Examples
///
/// ```
/// use glyphseg_recog::cluster::KMeans;
///
/// let data = vec![
///     vec![0.0, 0.0],
///     vec![0.0, 1.0],
///     vec![10.0, 10.0],
///     vec![10.0, 11.0],
/// ];
/// let mut kmeans = KMeans::new(2).with_seed(7);
/// kmeans.fit(&data).unwrap();
/// let labels = kmeans.labels();
/// assert_eq!(labels[0], labels[1]);
/// assert_ne!(labels[0], labels[2]);
/// ```
#[derive(Debug, Clone)]
pub struct KMeans {
    /// Number of clusters
    n_clusters: usize,
    /// Maximum iterations
    max_iter: usize,
    /// Convergence tolerance on centroid movement
    tol: f32,
    /// Random seed for initialization; `None` uses process entropy
    seed: Option<u64>,
    /// Cluster centroids after fitting
    centroids: Vec<Vec<f32>>,
    /// Labels for training data
    labels: Vec<usize>,
    /// Sum of squared distances to assigned centroids
    inertia: f32,
    /// Number of iterations run
    n_iter: usize,
}

impl KMeans {
    /// Create a model with `n_clusters` clusters, at most 100 iterations
    /// and a movement tolerance of 0.001.
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            max_iter: 100,
            tol: 1e-3,
            seed: None,
            centroids: Vec::new(),
            labels: Vec::new(),
            inertia: 0.0,
            n_iter: 0,
        }
    }

    /// Set the maximum number of iterations
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the convergence tolerance
    pub fn with_tol(mut self, tol: f32) -> Self {
        self.tol = tol;
        self
    }

    /// Set the random seed for reproducible initialization
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set or clear the random seed
    pub fn with_optional_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Number of clusters
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// Fitted centroids (empty before fitting)
    pub fn centroids(&self) -> &[Vec<f32>] {
        &self.centroids
    }

    /// Cluster index of each training sample
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Within-cluster sum of squared distances
    pub fn inertia(&self) -> f32 {
        self.inertia
    }

    /// Number of Lloyd iterations run
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    /// Check whether the model has centroids
    pub fn is_fitted(&self) -> bool {
        !self.centroids.is_empty()
    }

    /// Pick initial centroids with k-means++.
    fn kmeans_plusplus_init(k: usize, data: &[Vec<f32>], rng: &mut StdRng) -> Vec<Vec<f32>> {
        let n = data.len();
        let mut centroids = Vec::with_capacity(k);
        centroids.push(data[rng.random_range(0..n)].clone());

        let mut min_distances: Vec<f32> = data
            .iter()
            .map(|p| squared_distance(p, &centroids[0]))
            .collect();

        while centroids.len() < k {
            let total: f32 = min_distances.iter().sum();
            let idx = if total > 0.0 {
                let target = rng.random::<f32>() * total;
                let mut cumulative = 0.0f32;
                let mut chosen = n - 1;
                for (i, &d) in min_distances.iter().enumerate() {
                    cumulative += d;
                    if d > 0.0 && cumulative > target {
                        chosen = i;
                        break;
                    }
                }
                // rounding can leave the walk on a zero-distance tail
                while min_distances[chosen] == 0.0 && chosen > 0 {
                    chosen -= 1;
                }
                chosen
            } else {
                rng.random_range(0..n)
            };

            let next = data[idx].clone();
            for (d, p) in min_distances.iter_mut().zip(data) {
                *d = d.min(squared_distance(p, &next));
            }
            centroids.push(next);
        }

        centroids
    }

    /// Assign each sample to the nearest centroid.
    fn assign_labels(data: &[Vec<f32>], centroids: &[Vec<f32>]) -> Vec<usize> {
        data.iter()
            .map(|p| nearest_centroid(p, centroids))
            .collect()
    }

    /// Recompute centroids as the mean of their samples.
    fn update_centroids(data: &[Vec<f32>], labels: &[usize], old: &[Vec<f32>]) -> Vec<Vec<f32>> {
        let dim = old.first().map_or(0, Vec::len);
        let mut sums = vec![vec![0.0f32; dim]; old.len()];
        let mut counts = vec![0usize; old.len()];

        for (p, &label) in data.iter().zip(labels) {
            counts[label] += 1;
            for (s, v) in sums[label].iter_mut().zip(p) {
                *s += v;
            }
        }

        sums.into_iter()
            .zip(counts)
            .zip(old)
            .map(|((sum, count), prev)| {
                if count == 0 {
                    prev.clone()
                } else {
                    sum.into_iter().map(|s| s / count as f32).collect()
                }
            })
            .collect()
    }

    /// Check whether every centroid moved less than `tol`.
    fn centroids_converged(&self, old: &[Vec<f32>], new: &[Vec<f32>]) -> bool {
        old.iter()
            .zip(new)
            .all(|(a, b)| squared_distance(a, b).sqrt() < self.tol)
    }

    /// Fit the model to `data`
    ///
    /// An empty `data` set is a no-op that leaves the model unfitted.
    /// When fewer samples than clusters are given, only `data.len()`
    /// clusters are used.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::InvalidParameter`] if `n_clusters` is 0, or
    /// [`RecogError::FeatureArityMismatch`] if the samples differ in length.
    pub fn fit(&mut self, data: &[Vec<f32>]) -> RecogResult<()> {
        if self.n_clusters == 0 {
            return Err(RecogError::InvalidParameter(
                "k-means needs at least one cluster".to_string(),
            ));
        }
        self.centroids.clear();
        self.labels.clear();
        self.inertia = 0.0;
        self.n_iter = 0;
        if data.is_empty() {
            return Ok(());
        }
        let dim = data[0].len();
        for p in data {
            check_arity(dim, p)?;
        }

        let k = self.n_clusters.min(data.len());
        let mut rng = StdRng::seed_from_u64(self.seed.unwrap_or_else(rand::random::<u64>));
        let mut centroids = Self::kmeans_plusplus_init(k, data, &mut rng);

        let mut converged = false;
        for iter in 0..self.max_iter {
            let labels = Self::assign_labels(data, &centroids);
            let new_centroids = Self::update_centroids(data, &labels, &centroids);
            self.n_iter = iter + 1;
            converged = self.centroids_converged(&centroids, &new_centroids);
            centroids = new_centroids;
            if converged {
                break;
            }
        }
        let labels = Self::assign_labels(data, &centroids);

        self.inertia = data
            .iter()
            .zip(&labels)
            .map(|(p, &l)| squared_distance(p, &centroids[l]))
            .sum();
        debug!(
            k,
            samples = data.len(),
            iterations = self.n_iter,
            converged,
            inertia = self.inertia,
            "k-means fitted"
        );
        self.labels = labels;
        self.centroids = centroids;
        Ok(())
    }

    /// Assign a point to the nearest stored centroid
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::NotFitted`] before fitting, or
    /// [`RecogError::FeatureArityMismatch`] for a point of the wrong length.
    pub fn predict(&self, point: &[f32]) -> RecogResult<usize> {
        let first = self.centroids.first().ok_or(RecogError::NotFitted("k-means"))?;
        check_arity(first.len(), point)?;
        Ok(nearest_centroid(point, &self.centroids))
    }

    /// Assign every point to its nearest centroid
    pub fn predict_batch(&self, points: &[Vec<f32>]) -> RecogResult<Vec<usize>> {
        points.iter().map(|p| self.predict(p)).collect()
    }
}

/// Index of the nearest centroid; ties keep the first minimum.
fn nearest_centroid(point: &[f32], centroids: &[Vec<f32>]) -> usize {
    let mut best = 0;
    let mut best_dist = f32::INFINITY;
    for (k, c) in centroids.iter().enumerate() {
        let d = squared_distance(point, c);
        if d < best_dist {
            best_dist = d;
            best = k;
        }
    }
    best
}

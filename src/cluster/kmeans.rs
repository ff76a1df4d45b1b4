//! K-means clustering.
//!
//! Partitions samples into k groups by minimizing **within-cluster sum of
//! squares** (WCSS) in normalized feature space.
//!
//! ```text
//! WCSS = Σₖ Σᵢ∈Cₖ ||xᵢ - μₖ||²
//! ```
//!
//! # Lloyd's Algorithm
//!
//! 1. Initialize k centroids from k distinct samples drawn uniformly
//! 2. **Assign**: each point → nearest centroid (ties → lowest index)
//! 3. **Update**: each centroid → mean of assigned points
//! 4. Repeat until no assignment changes, or `max_iter` rounds
//!
//! An empty cluster keeps its previous centroid. There is no reseeding, so a
//! dataset of identical points ends with everything in cluster 0.
//!
//! # Failure Modes
//!
//! - **Local optima**: a single random start; the result depends on the seed
//! - **Wrong k**: must be chosen by the caller
//! - **k > N**: only N distinct seeds exist, so at most N clusters are produced

use super::traits::{Clustering, Fit};
use crate::error::{Error, Result};
use crate::features::FeatureVector;
use crate::sample::N_FIELDS;
use ndarray::{Array2, ArrayView1};
use rand::prelude::*;
use rand::seq::index;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Default round limit.
pub const DEFAULT_MAX_ITER: usize = 100;

/// K-means clustering algorithm.
#[derive(Debug, Clone)]
pub struct Kmeans {
    /// Number of clusters.
    k: usize,
    /// Maximum assignment rounds.
    max_iter: usize,
    /// Random seed.
    seed: Option<u64>,
}

impl Kmeans {
    /// Create a new K-means clusterer.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: DEFAULT_MAX_ITER,
            seed: None,
        }
    }

    /// Set maximum iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Pick `min(k, n)` distinct rows as starting centroids.
    fn init_centroids(&self, data: &Array2<f64>, rng: &mut impl Rng) -> Array2<f64> {
        let n = data.nrows();
        let k = self.k.min(n);
        let mut centroids = Array2::zeros((k, data.ncols()));

        for (c, idx) in index::sample(rng, n, k).into_iter().enumerate() {
            centroids.row_mut(c).assign(&data.row(idx));
        }

        centroids
    }

    /// Compute squared Euclidean distance.
    fn squared_distance(a: &ArrayView1<'_, f64>, b: &ArrayView1<'_, f64>) -> f64 {
        a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
    }

    /// Index of the nearest centroid; the first one wins on ties.
    fn nearest(point: &ArrayView1<'_, f64>, centroids: &Array2<f64>) -> usize {
        let mut best_cluster = 0;
        let mut best_dist = f64::INFINITY;

        for (k, centroid) in centroids.rows().into_iter().enumerate() {
            let dist = Self::squared_distance(point, &centroid);
            if dist < best_dist {
                best_dist = dist;
                best_cluster = k;
            }
        }
        best_cluster
    }

    #[cfg(feature = "parallel")]
    fn assign(data: &Array2<f64>, centroids: &Array2<f64>) -> Vec<usize> {
        (0..data.nrows())
            .into_par_iter()
            .map(|i| Self::nearest(&data.row(i), centroids))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn assign(data: &Array2<f64>, centroids: &Array2<f64>) -> Vec<usize> {
        data.rows()
            .into_iter()
            .map(|point| Self::nearest(&point, centroids))
            .collect()
    }

    /// Recompute means; clusters with no points keep their centroid.
    fn update(data: &Array2<f64>, labels: &[usize], centroids: &mut Array2<f64>) {
        let k = centroids.nrows();
        let mut sums = Array2::<f64>::zeros((k, data.ncols()));
        let mut counts = vec![0usize; k];

        for (i, &label) in labels.iter().enumerate() {
            let mut row = sums.row_mut(label);
            row += &data.row(i);
            counts[label] += 1;
        }

        for (c, &count) in counts.iter().enumerate() {
            if count > 0 {
                let mean = sums.row(c).mapv(|v| v / count as f64);
                centroids.row_mut(c).assign(&mean);
            }
        }
    }
}

impl Clustering for Kmeans {
    fn fit(&self, data: &[FeatureVector]) -> Result<Fit> {
        if self.k == 0 {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_items: data.len(),
            });
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }
        if data.is_empty() {
            return Ok(Fit::default());
        }

        let n = data.len();
        let data_arr = Array2::from_shape_fn((n, N_FIELDS), |(i, j)| data[i][j]);

        // Initialize RNG
        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };

        let mut centroids = self.init_centroids(&data_arr, &mut rng);
        let mut labels: Vec<usize> = Vec::new();
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.max_iter {
            // Full assignment vector first; the update below never sees a partial round.
            let new_labels = Self::assign(&data_arr, &centroids);
            iterations += 1;

            if new_labels == labels {
                converged = true;
                break;
            }
            labels = new_labels;

            Self::update(&data_arr, &labels, &mut centroids);
            tracing::trace!(round = iterations, "k-means centroids updated");
        }

        let inertia: f64 = labels
            .iter()
            .enumerate()
            .map(|(i, &c)| Self::squared_distance(&data_arr.row(i), &centroids.row(c)))
            .sum();

        let centroids = centroids
            .rows()
            .into_iter()
            .map(|row| {
                let mut v = [0.0; N_FIELDS];
                for (dst, src) in v.iter_mut().zip(row.iter()) {
                    *dst = *src;
                }
                FeatureVector(v)
            })
            .collect();

        tracing::debug!(
            k = self.k,
            n,
            iterations,
            converged,
            inertia,
            "k-means finished"
        );

        Ok(Fit {
            labels,
            centroids,
            iterations,
            converged,
            inertia,
        })
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

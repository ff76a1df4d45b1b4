//! Clustering traits.

use crate::error::Result;
use crate::features::FeatureVector;

/// Output of a hard clustering fit over normalized feature vectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fit {
    /// Cluster label per input point, in input order.
    pub labels: Vec<usize>,
    /// Final centroids, in the same space as the input.
    pub centroids: Vec<FeatureVector>,
    /// Assignment rounds executed.
    pub iterations: usize,
    /// True when the last round changed no assignment.
    pub converged: bool,
    /// Within-cluster sum of squared distances.
    pub inertia: f64,
}

/// Trait for clustering algorithms.
pub trait Clustering {
    /// Fit the model to data.
    fn fit(&self, data: &[FeatureVector]) -> Result<Fit>;

    /// Fit the model to data and return cluster assignments.
    ///
    /// Returns a vector of cluster labels, one per input point.
    fn fit_predict(&self, data: &[FeatureVector]) -> Result<Vec<usize>> {
        Ok(self.fit(data)?.labels)
    }

    /// Get the number of clusters.
    fn n_clusters(&self) -> usize;
}

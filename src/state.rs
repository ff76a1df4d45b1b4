//! Caller-owned analysis state.
//!
//! The engine functions are stateless. A front end that wants to keep the
//! current dataset and its derived products between requests holds an
//! [`AnalysisState`] and passes it around explicitly.

use crate::cluster::{ClusterResult, Kmeans};
use crate::error::Result;
use crate::projection::{project, ProjectedPoint};
use crate::sample::Sample;
use crate::scoring::{score_batch, PredictionResult};
use crate::stats::{compute_stats, DatasetStats};

/// Dataset plus everything derived from it.
#[derive(Debug, Clone, Default)]
pub struct AnalysisState {
    samples: Vec<Sample>,
    stats: Option<DatasetStats>,
    clusters: Vec<ClusterResult>,
    predictions: Vec<PredictionResult>,
}

impl AnalysisState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the dataset, recompute statistics, drop derived results.
    pub fn load(&mut self, samples: Vec<Sample>) {
        tracing::debug!(samples = samples.len(), "loading dataset");
        self.stats = Some(compute_stats(&samples));
        self.samples = samples;
        self.clusters.clear();
        self.predictions.clear();
    }

    /// Cluster the current dataset and store the cluster labels on it.
    pub fn cluster(&mut self, kmeans: &Kmeans) -> Result<&[ClusterResult]> {
        let outcome = kmeans.run(&self.samples)?;
        self.samples = outcome.labeled;
        self.clusters = outcome.clusters;
        Ok(&self.clusters)
    }

    /// Score the current dataset and store the scores on it.
    pub fn predict(&mut self) -> &[PredictionResult] {
        self.predictions = score_batch(&self.samples);
        for (sample, p) in self.samples.iter_mut().zip(&self.predictions) {
            sample.productivity_score = Some(p.score);
            sample.productivity_class = Some(p.class);
        }
        &self.predictions
    }

    /// Project the current dataset, carrying any cluster labels and scores.
    pub fn projection(&self) -> Vec<ProjectedPoint> {
        project(&self.samples)
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn stats(&self) -> Option<&DatasetStats> {
        self.stats.as_ref()
    }

    pub fn clusters(&self) -> &[ClusterResult] {
        &self.clusters
    }

    pub fn predictions(&self) -> &[PredictionResult] {
        &self.predictions
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::SoilField;

    fn dataset() -> Vec<Sample> {
        (0..8)
            .map(|i| {
                Sample::new(format!("s{i}"))
                    .with(SoilField::Nitrogen, if i < 4 { 120.0 } else { 320.0 })
                    .with(SoilField::Ph, 6.5)
            })
            .collect()
    }

    #[test]
    fn load_computes_stats() {
        let mut state = AnalysisState::new();
        assert!(state.stats().is_none());
        state.load(dataset());
        assert_eq!(state.stats().unwrap().total_samples, 8);
        assert_eq!(state.samples().len(), 8);
    }

    #[test]
    fn cluster_then_predict_then_project() {
        let mut state = AnalysisState::new();
        state.load(dataset());

        let n_clusters = state.cluster(&Kmeans::new(2).with_seed(1)).unwrap().len();
        assert_eq!(n_clusters, 2);
        assert!(state.samples().iter().all(|s| s.cluster.is_some()));

        assert_eq!(state.predict().len(), 8);
        assert!(state.samples().iter().all(|s| s.productivity_score.is_some()));

        let pts = state.projection();
        assert_eq!(pts.len(), 8);
        for (p, s) in pts.iter().zip(state.samples()) {
            assert_eq!(Some(p.cluster), s.cluster);
            assert_eq!(p.score, s.productivity_score);
        }
    }

    #[test]
    fn reload_drops_derived_results() {
        let mut state = AnalysisState::new();
        state.load(dataset());
        state.cluster(&Kmeans::new(2).with_seed(1)).unwrap();
        state.predict();

        state.load(dataset());
        assert!(state.clusters().is_empty());
        assert!(state.predictions().is_empty());
        assert!(state.samples().iter().all(|s| s.cluster.is_none()));

        state.clear();
        assert!(state.samples().is_empty());
        assert!(state.stats().is_none());
    }

    #[test]
    fn invalid_k_leaves_state_untouched() {
        let mut state = AnalysisState::new();
        state.load(dataset());
        assert!(state.cluster(&Kmeans::new(0)).is_err());
        assert!(state.samples().iter().all(|s| s.cluster.is_none()));
    }
}

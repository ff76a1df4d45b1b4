//! # loam
//!
//! Analytics for tabular soil-chemistry measurements: similarity grouping,
//! a 2-D projection for scatter plots, and rule-based productivity scoring.
//!
//! Every operation is a pure function over a slice of [`Sample`]s. Parsing,
//! column mapping, persistence, and rendering belong to the caller; the
//! optional [`AnalysisState`] is a convenience the caller owns.
//!
//! ```rust
//! use loam::{compute_stats, project, run_kmeans, score_sample, Sample, SoilField};
//!
//! let samples = vec![
//!     Sample::new("plot-1").with(SoilField::Nitrogen, 310.0).with(SoilField::Ph, 6.8),
//!     Sample::new("plot-2").with(SoilField::Nitrogen, 140.0).with(SoilField::Ph, 5.2),
//!     Sample::new("plot-3").with(SoilField::Nitrogen, 295.0).with(SoilField::Ph, 7.0),
//! ];
//!
//! let stats = compute_stats(&samples);
//! assert_eq!(stats.total_samples, 3);
//!
//! let clustered = run_kmeans(&samples, 2).unwrap();
//! let points = project(&clustered.labeled);
//! assert_eq!(points.len(), 3);
//!
//! let prediction = score_sample(&samples[0]);
//! assert!(prediction.score <= 100);
//! ```

pub mod cluster;
/// Error types used across `loam`.
pub mod error;
pub mod features;
pub mod projection;
pub mod sample;
pub mod scoring;
pub mod state;
pub mod stats;


pub use error::{Error, Result};

pub use cluster::{run_kmeans, ClusterResult, Clustering, Kmeans, KmeansOutcome};
pub use features::{extract_features, FeatureVector, Normalizer};
pub use projection::{project, ProjectedPoint};
pub use sample::{ProductivityClass, Sample, SoilField, N_FIELDS};
pub use scoring::{
    class_distribution, score_batch, score_histogram, score_sample, ClassCounts,
    PredictionResult, Recommendation, ScoreBin,
};
pub use state::AnalysisState;
pub use stats::{compute_stats, correlation_matrix, DatasetStats, FieldSummary};

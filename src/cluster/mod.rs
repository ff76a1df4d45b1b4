//! Grouping soil samples by similarity.
//!
//! ## K-means
//!
//! The classic algorithm: assign each point to the nearest centroid, then
//! update centroids to the mean of their points. Repeat.
//!
//! **Objective**: Minimize within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! Measurements live on very different scales (nitrogen in the hundreds,
//! boron below one), so the fit runs on min-max normalized features and the
//! reported centroids are mapped back to original units.
//!
//! **Assumptions**:
//! - Clusters are roughly spherical in normalized space
//! - You know k in advance
//!
//! ## Usage
//!
//! ```rust
//! use loam::cluster::Kmeans;
//! use loam::{Sample, SoilField};
//!
//! let samples = vec![
//!     Sample::new("a").with(SoilField::Nitrogen, 120.0),
//!     Sample::new("b").with(SoilField::Nitrogen, 125.0),
//!     Sample::new("c").with(SoilField::Nitrogen, 410.0),
//!     Sample::new("d").with(SoilField::Nitrogen, 420.0),
//! ];
//!
//! let out = Kmeans::new(2).with_seed(7).run(&samples).unwrap();
//! assert_eq!(out.labeled[0].cluster, out.labeled[1].cluster);
//! assert_ne!(out.labeled[0].cluster, out.labeled[2].cluster);
//! ```

mod kmeans;
mod report;
mod traits;

pub use kmeans::{Kmeans, DEFAULT_MAX_ITER};
pub use report::{
    run_kmeans, ClusterResult, KmeansOutcome, CLUSTER_CHARACTERISTICS, CLUSTER_COLORS,
};
pub use traits::{Clustering, Fit};

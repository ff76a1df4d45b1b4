//! Cheap 2-D projection for scatter plots.
//!
//! Not a principal-component decomposition. Each raw feature is centered,
//! weighted by its share of the total variance, and folded onto two axes:
//!
//! ```text
//! w_f = var_f / Σ var
//! x   = 10 · Σ c_f · w_f · (1.0 if f even else 0.5)
//! y   = 10 · Σ c_f · w_f · (1.0 if f odd  else 0.3)
//! ```
//!
//! The constants are fixed so that coordinates stay comparable with the
//! existing dashboards. A dataset with zero total variance projects every
//! sample to the origin.

use crate::features::{extract_features, FeatureVector};
use crate::sample::{Sample, N_FIELDS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const SCALE: f64 = 10.0;
const X_CROSS_WEIGHT: f64 = 0.5;
const Y_CROSS_WEIGHT: f64 = 0.3;

/// A sample placed on the plane.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProjectedPoint {
    pub id: String,
    pub x: f64,
    pub y: f64,
    /// Cluster index, 0 when the sample was never clustered.
    pub cluster: usize,
    pub score: Option<u8>,
}

/// Variance share of each dimension; all zero when the data has no spread.
pub fn variance_weights(features: &[FeatureVector]) -> [f64; N_FIELDS] {
    let mut weights = [0.0; N_FIELDS];
    if features.is_empty() {
        return weights;
    }
    let n = features.len() as f64;

    for (d, w) in weights.iter_mut().enumerate() {
        let mean = features.iter().map(|v| v[d]).sum::<f64>() / n;
        *w = features.iter().map(|v| (v[d] - mean).powi(2)).sum::<f64>() / n;
    }

    let total: f64 = weights.iter().sum();
    if total > 0.0 {
        for w in weights.iter_mut() {
            *w /= total;
        }
    } else {
        weights = [0.0; N_FIELDS];
    }
    weights
}

/// Project samples onto two display axes.
pub fn project(samples: &[Sample]) -> Vec<ProjectedPoint> {
    if samples.is_empty() {
        return Vec::new();
    }

    let features: Vec<FeatureVector> = samples.iter().map(extract_features).collect();
    let n = features.len() as f64;

    let mut means = [0.0; N_FIELDS];
    for (d, m) in means.iter_mut().enumerate() {
        *m = features.iter().map(|v| v[d]).sum::<f64>() / n;
    }
    let weights = variance_weights(&features);

    samples
        .iter()
        .zip(&features)
        .map(|(sample, v)| {
            let mut x = 0.0;
            let mut y = 0.0;
            for d in 0..N_FIELDS {
                let c = (v[d] - means[d]) * weights[d];
                if d % 2 == 0 {
                    x += c;
                    y += c * Y_CROSS_WEIGHT;
                } else {
                    x += c * X_CROSS_WEIGHT;
                    y += c;
                }
            }
            ProjectedPoint {
                id: sample.id.clone(),
                x: x * SCALE,
                y: y * SCALE,
                cluster: sample.cluster.unwrap_or(0),
                score: sample.productivity_score,
            }
        })
        .collect()
}

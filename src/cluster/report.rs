//! Sample-level k-means: extraction, normalization, fitting, and labelling.

use super::kmeans::Kmeans;
use super::traits::Clustering;
use crate::error::Result;
use crate::features::{extract_features, FeatureVector, Normalizer};
use crate::sample::Sample;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Display colors, cycled by cluster index.
pub const CLUSTER_COLORS: [&str; 5] = [
    "hsl(145, 60%, 45%)",
    "hsl(200, 70%, 50%)",
    "hsl(35, 80%, 55%)",
    "hsl(280, 60%, 55%)",
    "hsl(0, 70%, 55%)",
];

/// Cluster descriptions, cycled by cluster index.
pub const CLUSTER_CHARACTERISTICS: [&str; 5] = [
    "High fertility - Rich in nutrients with optimal pH",
    "Moderate fertility - Balanced nutrients, needs supplementation",
    "Low fertility - Nutrient deficient, requires treatment",
    "Acidic soil - Low pH, needs lime application",
    "Alkaline soil - High pH, needs sulfur application",
];

/// One cluster's public summary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClusterResult {
    /// 0-based cluster index.
    pub cluster: usize,
    /// Centroid in original measurement units.
    pub centroid: FeatureVector,
    /// Members, labelled with `cluster`.
    pub samples: Vec<Sample>,
    pub characteristics: String,
    pub color: String,
}

/// Result of [`Kmeans::run`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KmeansOutcome {
    pub clusters: Vec<ClusterResult>,
    /// Input samples in input order, each with `cluster` set.
    pub labeled: Vec<Sample>,
    pub iterations: usize,
    pub converged: bool,
    /// Within-cluster sum of squares in normalized space.
    pub inertia: f64,
}

impl Kmeans {
    /// Cluster samples end to end.
    ///
    /// Features are extracted and min-max normalized, the fit runs in
    /// normalized space, and centroids are mapped back to original units.
    /// An empty input yields an empty outcome.
    pub fn run(&self, samples: &[Sample]) -> Result<KmeansOutcome> {
        let raw: Vec<FeatureVector> = samples.iter().map(extract_features).collect();
        let (scaled, normalizer) = Normalizer::fit(&raw);
        let fit = self.fit(&scaled)?;

        if fit.centroids.len() > CLUSTER_COLORS.len() {
            tracing::warn!(
                clusters = fit.centroids.len(),
                palette = CLUSTER_COLORS.len(),
                "more clusters than palette entries; colors will repeat"
            );
        }

        let labeled: Vec<Sample> = samples
            .iter()
            .zip(&fit.labels)
            .map(|(s, &c)| Sample {
                cluster: Some(c),
                ..s.clone()
            })
            .collect();

        let clusters = fit
            .centroids
            .iter()
            .enumerate()
            .map(|(i, centroid)| ClusterResult {
                cluster: i,
                centroid: normalizer.denormalize(centroid),
                samples: labeled
                    .iter()
                    .filter(|s| s.cluster == Some(i))
                    .cloned()
                    .collect(),
                characteristics: CLUSTER_CHARACTERISTICS[i % CLUSTER_CHARACTERISTICS.len()]
                    .to_string(),
                color: CLUSTER_COLORS[i % CLUSTER_COLORS.len()].to_string(),
            })
            .collect();

        Ok(KmeansOutcome {
            clusters,
            labeled,
            iterations: fit.iterations,
            converged: fit.converged,
            inertia: fit.inertia,
        })
    }
}

/// Cluster samples into `k` groups with an unseeded random start.
///
/// Fails with [`Error::InvalidClusterCount`](crate::Error::InvalidClusterCount)
/// when `k == 0`.
pub fn run_kmeans(samples: &[Sample], k: usize) -> Result<KmeansOutcome> {
    Kmeans::new(k).run(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::SoilField;

    fn two_groups() -> Vec<Sample> {
        let mut out = Vec::new();
        for i in 0..5 {
            out.push(
                Sample::new(format!("lo{i}"))
                    .with(SoilField::Nitrogen, 100.0 + i as f64)
                    .with(SoilField::Ph, 5.0),
            );
            out.push(
                Sample::new(format!("hi{i}"))
                    .with(SoilField::Nitrogen, 400.0 + i as f64)
                    .with(SoilField::Ph, 8.0),
            );
        }
        out
    }

    #[test]
    fn run_labels_every_sample() {
        let samples = two_groups();
        let out = Kmeans::new(2).with_seed(11).run(&samples).unwrap();

        assert_eq!(out.labeled.len(), samples.len());
        for (orig, lab) in samples.iter().zip(&out.labeled) {
            assert_eq!(orig.id, lab.id);
            assert!(lab.cluster.is_some());
        }
        // input is not mutated
        assert!(samples.iter().all(|s| s.cluster.is_none()));
    }

    #[test]
    fn run_separates_obvious_groups() {
        let out = Kmeans::new(2).with_seed(11).run(&two_groups()).unwrap();
        assert_eq!(out.clusters.len(), 2);
        for c in &out.clusters {
            assert_eq!(c.samples.len(), 5);
            let prefix = &c.samples[0].id[..2];
            assert!(c.samples.iter().all(|s| s.id.starts_with(prefix)));
        }
    }

    #[test]
    fn centroids_are_in_original_units() {
        let out = Kmeans::new(2).with_seed(4).run(&two_groups()).unwrap();
        let mut ns: Vec<f64> = out
            .clusters
            .iter()
            .map(|c| c.centroid.get(SoilField::Nitrogen))
            .collect();
        ns.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((ns[0] - 102.0).abs() < 1e-9);
        assert!((ns[1] - 402.0).abs() < 1e-9);

        // constant column keeps its value
        for c in &out.clusters {
            assert_eq!(c.centroid.get(SoilField::Temperature), 25.0);
        }
    }

    #[test]
    fn palette_cycles_past_five() {
        let samples: Vec<Sample> = (0..7)
            .map(|i| Sample::new(format!("s{i}")).with(SoilField::Zinc, i as f64))
            .collect();
        let out = Kmeans::new(7).with_seed(2).run(&samples).unwrap();
        assert_eq!(out.clusters.len(), 7);
        assert_eq!(out.clusters[5].color, CLUSTER_COLORS[0]);
        assert_eq!(out.clusters[6].characteristics, CLUSTER_CHARACTERISTICS[1]);
        for (i, c) in out.clusters.iter().enumerate() {
            assert_eq!(c.cluster, i);
        }
    }

    #[test]
    fn empty_samples_empty_outcome() {
        let out = run_kmeans(&[], 3).unwrap();
        assert!(out.clusters.is_empty());
        assert!(out.labeled.is_empty());
    }

    #[test]
    fn zero_k_is_invalid_argument() {
        let err = run_kmeans(&two_groups(), 0).unwrap_err();
        assert!(err.is_invalid_argument());
    }
}

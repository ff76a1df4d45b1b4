//! Descriptive statistics over a sample collection.
//!
//! Each numeric field is summarized over its *present* readings only, with no
//! imputation. A field with no readings reports zeros rather than NaN.
//! Standard deviation is the population form (divide by n).

use std::collections::BTreeMap;

use crate::features::extract_features;
use crate::sample::{Sample, SoilField};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Summary of one numeric field.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std: f64,
    /// Number of present readings.
    pub count: usize,
}

impl FieldSummary {
    /// Summarize a set of readings; empty input yields all zeros.
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len() as f64;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        Self {
            min,
            max,
            mean,
            std: var.sqrt(),
            count: values.len(),
        }
    }
}

/// Dataset-level summary.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DatasetStats {
    pub total_samples: usize,
    /// Field names, in feature order.
    pub features: Vec<String>,
    /// Per-field summary keyed by field name.
    pub summary: BTreeMap<String, FieldSummary>,
    /// Soil-type label → number of samples carrying it.
    pub soil_types: BTreeMap<String, usize>,
}

impl DatasetStats {
    /// Summary for one field.
    pub fn field(&self, field: SoilField) -> Option<&FieldSummary> {
        self.summary.get(field.name())
    }
}

/// Compute per-field statistics and the soil-type tally.
pub fn compute_stats(samples: &[Sample]) -> DatasetStats {
    let mut summary = BTreeMap::new();
    for field in SoilField::ALL {
        let values: Vec<f64> = samples
            .iter()
            .filter_map(|s| s.get_finite(field))
            .collect();
        summary.insert(field.name().to_string(), FieldSummary::from_values(&values));
    }

    let mut soil_types = BTreeMap::new();
    for soil_type in samples.iter().filter_map(|s| s.soil_type.as_deref()) {
        *soil_types.entry(soil_type.to_string()).or_insert(0) += 1;
    }

    DatasetStats {
        total_samples: samples.len(),
        features: SoilField::ALL.iter().map(|f| f.name().to_string()).collect(),
        summary,
        soil_types,
    }
}

/// Pearson correlation between two equally long series.
///
/// Returns 0 when either series is constant or the input is empty.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n == 0 {
        return 0.0;
    }
    let nf = n as f64;
    let (x, y) = (&x[..n], &y[..n]);

    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();
    let sum_x2: f64 = x.iter().map(|a| a * a).sum();
    let sum_y2: f64 = y.iter().map(|b| b * b).sum();

    let num = nf * sum_xy - sum_x * sum_y;
    let den = ((nf * sum_x2 - sum_x * sum_x) * (nf * sum_y2 - sum_y * sum_y)).sqrt();
    if den == 0.0 || !den.is_finite() {
        0.0
    } else {
        num / den
    }
}

/// Pairwise Pearson correlation over imputed feature values.
///
/// `out[i][j]` correlates `fields[i]` with `fields[j]`.
pub fn correlation_matrix(samples: &[Sample], fields: &[SoilField]) -> Vec<Vec<f64>> {
    let features: Vec<_> = samples.iter().map(extract_features).collect();
    let columns: Vec<Vec<f64>> = fields
        .iter()
        .map(|&f| features.iter().map(|v| v.get(f)).collect())
        .collect();

    columns
        .iter()
        .map(|a| columns.iter().map(|b| pearson(a, b)).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_collection_is_all_zero() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.total_samples, 0);
        assert_eq!(stats.features.len(), 16);
        assert_eq!(stats.summary.len(), 16);
        for s in stats.summary.values() {
            assert_eq!(*s, FieldSummary::default());
        }
        assert!(stats.soil_types.is_empty());
    }

    #[test]
    fn population_std() {
        let samples: Vec<Sample> = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]
            .iter()
            .enumerate()
            .map(|(i, &v)| Sample::new(format!("s{i}")).with(SoilField::Nitrogen, v))
            .collect();
        let stats = compute_stats(&samples);
        let n = stats.field(SoilField::Nitrogen).unwrap();
        assert_eq!(n.min, 2.0);
        assert_eq!(n.max, 9.0);
        assert_eq!(n.mean, 5.0);
        assert!((n.std - 2.0).abs() < 1e-12);
        assert_eq!(n.count, 8);
    }

    #[test]
    fn absent_values_are_skipped_not_imputed() {
        let samples = [
            Sample::new("a").with(SoilField::Ph, 6.0),
            Sample::new("b"),
            Sample::new("c").with(SoilField::Ph, 8.0),
            Sample::new("d").with(SoilField::Ph, f64::NAN),
        ];
        let stats = compute_stats(&samples);
        let ph = stats.field(SoilField::Ph).unwrap();
        assert_eq!(ph.count, 2);
        assert_eq!(ph.mean, 7.0);
        assert_eq!(ph.std, 1.0);

        let rain = stats.field(SoilField::Rainfall).unwrap();
        assert_eq!(*rain, FieldSummary::default());
        assert_eq!(stats.total_samples, 4);
    }

    #[test]
    fn soil_type_tally() {
        let samples = [
            Sample::new("a").with_soil_type("Loam"),
            Sample::new("b").with_soil_type("Clay"),
            Sample::new("c").with_soil_type("Loam"),
            Sample::new("d"),
        ];
        let stats = compute_stats(&samples);
        assert_eq!(stats.soil_types.len(), 2);
        assert_eq!(stats.soil_types["Loam"], 2);
        assert_eq!(stats.soil_types["Clay"], 1);
    }

    #[test]
    fn feature_names_in_order() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.features[0], "nitrogen");
        assert_eq!(stats.features[4], "organicCarbon");
        assert_eq!(stats.features[15], "rainfall");
    }

    #[test]
    fn pearson_basic() {
        let x = [1.0, 2.0, 3.0, 4.0];
        assert!((pearson(&x, &[2.0, 4.0, 6.0, 8.0]) - 1.0).abs() < 1e-12);
        assert!((pearson(&x, &[8.0, 6.0, 4.0, 2.0]) + 1.0).abs() < 1e-12);
        assert_eq!(pearson(&x, &[3.0; 4]), 0.0);
        assert_eq!(pearson(&[], &[]), 0.0);
    }

    #[test]
    fn correlation_matrix_shape_and_diagonal() {
        let samples: Vec<Sample> = (0..6)
            .map(|i| {
                Sample::new(format!("s{i}"))
                    .with(SoilField::Nitrogen, 100.0 + 20.0 * i as f64)
                    .with(SoilField::Potassium, 300.0 - 10.0 * i as f64)
            })
            .collect();
        let fields = [SoilField::Nitrogen, SoilField::Potassium, SoilField::Ph];
        let m = correlation_matrix(&samples, &fields);

        assert_eq!(m.len(), 3);
        assert!((m[0][0] - 1.0).abs() < 1e-12);
        assert!((m[0][1] + 1.0).abs() < 1e-12);
        assert_eq!(m[1][0], m[0][1]);
        // pH is imputed to a constant
        assert_eq!(m[2][2], 0.0);
    }
}

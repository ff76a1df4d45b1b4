//! Feature extraction and min-max normalization.
//!
//! Every analytical step works on a [`FeatureVector`]: the sixteen numeric
//! measurements of a [`Sample`] in [`SoilField::ALL`] order, with absent
//! readings replaced by [`SoilField::default_value`]. Two vectors are only
//! comparable when produced by the same extractor, so construction from
//! arbitrary slices is checked.
//!
//! [`Normalizer`] rescales each dimension independently to [0, 1]:
//!
//! ```text
//! x' = (x - min) / (max - min)      (divisor is 1 when max == min)
//! x  = x' * (max - min) + min
//! ```

use core::ops::Index;

use crate::error::{Error, Result};
use crate::sample::{Sample, SoilField, N_FIELDS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fixed-order numeric encoding of a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeatureVector(pub [f64; N_FIELDS]);

impl FeatureVector {
    /// Build from a slice, rejecting anything that is not exactly 16 long.
    pub fn try_from_slice(values: &[f64]) -> Result<Self> {
        let arr: [f64; N_FIELDS] = values.try_into().map_err(|_| Error::DimensionMismatch {
            expected: N_FIELDS,
            found: values.len(),
        })?;
        Ok(Self(arr))
    }

    /// Value for one field.
    #[inline]
    pub fn get(&self, field: SoilField) -> f64 {
        self.0[field.index()]
    }
}

impl Index<usize> for FeatureVector {
    type Output = f64;

    fn index(&self, idx: usize) -> &f64 {
        &self.0[idx]
    }
}

impl From<[f64; N_FIELDS]> for FeatureVector {
    fn from(values: [f64; N_FIELDS]) -> Self {
        Self(values)
    }
}

impl TryFrom<&[f64]> for FeatureVector {
    type Error = Error;

    fn try_from(values: &[f64]) -> Result<Self> {
        Self::try_from_slice(values)
    }
}

/// Encode a sample, imputing reference defaults for absent readings.
///
/// Non-finite readings are imputed too, so NaN never reaches the clusterer.
pub fn extract_features(sample: &Sample) -> FeatureVector {
    let mut out = [0.0; N_FIELDS];
    for field in SoilField::ALL {
        out[field.index()] = sample
            .get_finite(field)
            .unwrap_or_else(|| field.default_value());
    }
    FeatureVector(out)
}

/// Per-dimension min/max remembered from a fitted collection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Normalizer {
    bounds: [(f64, f64); N_FIELDS],
}

impl Normalizer {
    /// Fit on a collection and return it rescaled to [0, 1].
    ///
    /// An empty collection yields no vectors and all-zero bounds.
    pub fn fit(data: &[FeatureVector]) -> (Vec<FeatureVector>, Normalizer) {
        let mut bounds = [(0.0, 0.0); N_FIELDS];
        if !data.is_empty() {
            for (d, bound) in bounds.iter_mut().enumerate() {
                let (min, max) = data
                    .iter()
                    .map(|v| v.0[d])
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
                        (lo.min(x), hi.max(x))
                    });
                *bound = (min, max);
            }
        }

        let normalizer = Normalizer { bounds };
        let scaled = data.iter().map(|v| normalizer.normalize(v)).collect();
        (scaled, normalizer)
    }

    /// The 16 `(min, max)` pairs in feature order.
    pub fn bounds(&self) -> &[(f64, f64); N_FIELDS] {
        &self.bounds
    }

    /// Map a vector into normalized space.
    pub fn normalize(&self, v: &FeatureVector) -> FeatureVector {
        let mut out = [0.0; N_FIELDS];
        for (d, &(min, max)) in self.bounds.iter().enumerate() {
            out[d] = (v.0[d] - min) / range(min, max);
        }
        FeatureVector(out)
    }

    /// Map a normalized vector back to original units.
    pub fn denormalize(&self, v: &FeatureVector) -> FeatureVector {
        let mut out = [0.0; N_FIELDS];
        for (d, &(min, max)) in self.bounds.iter().enumerate() {
            out[d] = v.0[d] * (max - min) + min;
        }
        FeatureVector(out)
    }
}

#[inline]
fn range(min: f64, max: f64) -> f64 {
    let r = max - min;
    if r == 0.0 {
        1.0
    } else {
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_take_reference_defaults() {
        let v = extract_features(&Sample::new("empty"));
        let expected = [
            0.0, 0.0, 0.0, 7.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 50.0, 25.0, 60.0, 100.0,
        ];
        assert_eq!(v.0, expected);
    }

    #[test]
    fn present_fields_are_copied_in_order() {
        let s = Sample::new("s")
            .with(SoilField::Nitrogen, 280.0)
            .with(SoilField::Ph, 0.0)
            .with(SoilField::Rainfall, 0.0);
        let v = extract_features(&s);
        assert_eq!(v.get(SoilField::Nitrogen), 280.0);
        // explicit zero wins over the default
        assert_eq!(v.get(SoilField::Ph), 0.0);
        assert_eq!(v[15], 0.0);
    }

    #[test]
    fn nan_is_imputed() {
        let s = Sample::new("nan")
            .with(SoilField::Humidity, f64::NAN)
            .with(SoilField::Zinc, f64::INFINITY);
        let v = extract_features(&s);
        assert_eq!(v.get(SoilField::Humidity), 60.0);
        assert_eq!(v.get(SoilField::Zinc), 0.0);
    }

    #[test]
    fn wrong_dimensionality_is_rejected() {
        let err = FeatureVector::try_from_slice(&[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                expected: 16,
                found: 3
            }
        );
        assert!(FeatureVector::try_from_slice(&[0.5; 16]).is_ok());
    }

    #[test]
    fn normalize_to_unit_range() {
        let a = FeatureVector::from([0.0; 16]);
        let mut b = [0.0; 16];
        b[0] = 10.0;
        let mut c = [0.0; 16];
        c[0] = 5.0;
        let (scaled, norm) = Normalizer::fit(&[a, FeatureVector(b), FeatureVector(c)]);

        assert_eq!(scaled[0][0], 0.0);
        assert_eq!(scaled[1][0], 1.0);
        assert!((scaled[2][0] - 0.5).abs() < 1e-12);
        assert_eq!(norm.bounds()[0], (0.0, 10.0));
    }

    #[test]
    fn constant_dimension_maps_to_zero() {
        let v = FeatureVector([3.0; 16]);
        let (scaled, _) = Normalizer::fit(&[v, v, v]);
        for s in &scaled {
            assert!(s.0.iter().all(|&x| x == 0.0));
        }
    }

    #[test]
    fn denormalize_inverts_normalize() {
        let samples = [
            Sample::new("a").with(SoilField::Nitrogen, 120.0).with(SoilField::Ph, 5.5),
            Sample::new("b").with(SoilField::Nitrogen, 480.0).with(SoilField::Ph, 8.1),
            Sample::new("c").with(SoilField::Nitrogen, 300.0),
        ];
        let raw: Vec<_> = samples.iter().map(extract_features).collect();
        let (scaled, norm) = Normalizer::fit(&raw);
        for (r, s) in raw.iter().zip(&scaled) {
            let back = norm.denormalize(s);
            for d in 0..16 {
                assert!((back[d] - r[d]).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn empty_fit() {
        let (scaled, norm) = Normalizer::fit(&[]);
        assert!(scaled.is_empty());
        assert!(norm.bounds().iter().all(|&b| b == (0.0, 0.0)));
    }
}

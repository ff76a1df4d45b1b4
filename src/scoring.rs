//! Rule-based productivity scoring.
//!
//! A fixed agronomic rule table, not a fitted model. Six factors earn
//! 15 / 10 / 5 points (optimal / acceptable / otherwise) against a 90-point
//! base, and three micronutrients add small bonuses:
//!
//! | Factor | Optimal | Acceptable |
//! |--------|---------|------------|
//! | nitrogen | 250 < N < 500 | N > 100 |
//! | phosphorus | 25 < P < 50 | P > 10 |
//! | potassium | 200 < K < 400 | K > 100 |
//! | pH | 6.0 ≤ pH ≤ 7.5 | 5.5 ≤ pH ≤ 8.0 |
//! | organic carbon | OC > 0.75 | OC > 0.5 |
//! | soil moisture | 40 ≤ SM ≤ 60 | SM ≥ 30 |
//!
//! Bonuses: zinc > 0.5 (+2), iron > 4 (+2), boron > 0.5 (+1).
//!
//! Macronutrient optimal bands are open at both ends, so a reading sitting
//! exactly on a band edge (nitrogen = 250) scores the acceptable tier. An
//! absent or non-finite reading always scores the lowest tier and never earns
//! a bonus.
//!
//! ```text
//! score = round(min(100, points / 90 · 100))
//! ```

use core::fmt;

use crate::sample::{ProductivityClass, Sample, SoilField};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Placeholder reliability reported with every rule-table prediction.
pub const DEFAULT_CONFIDENCE: f64 = 0.85;

const BASE_POINTS: f64 = 90.0;

/// Factors that contribute to the 90-point base, in evaluation order.
pub const SCORED_FACTORS: [SoilField; 6] = [
    SoilField::Nitrogen,
    SoilField::Phosphorus,
    SoilField::Potassium,
    SoilField::Ph,
    SoilField::OrganicCarbon,
    SoilField::SoilMoisture,
];

/// Band a factor reading falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Tier {
    Optimal,
    Acceptable,
    Deficient,
}

impl Tier {
    pub fn points(self) -> u32 {
        match self {
            Tier::Optimal => 15,
            Tier::Acceptable => 10,
            Tier::Deficient => 5,
        }
    }
}

/// Classify one factor reading.
///
/// Fields outside [`SCORED_FACTORS`] are always [`Tier::Deficient`].
pub fn tier(field: SoilField, value: Option<f64>) -> Tier {
    let Some(v) = value.filter(|v| v.is_finite()) else {
        return Tier::Deficient;
    };

    let (optimal, acceptable) = match field {
        SoilField::Nitrogen => (v > 250.0 && v < 500.0, v > 100.0),
        SoilField::Phosphorus => (v > 25.0 && v < 50.0, v > 10.0),
        SoilField::Potassium => (v > 200.0 && v < 400.0, v > 100.0),
        SoilField::Ph => ((6.0..=7.5).contains(&v), (5.5..=8.0).contains(&v)),
        SoilField::OrganicCarbon => (v > 0.75, v > 0.5),
        SoilField::SoilMoisture => ((40.0..=60.0).contains(&v), v >= 30.0),
        _ => (false, false),
    };

    if optimal {
        Tier::Optimal
    } else if acceptable {
        Tier::Acceptable
    } else {
        Tier::Deficient
    }
}

/// Remedial action attached to a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Recommendation {
    ApplyNitrogen,
    ApplyPhosphorus,
    ApplyPotash,
    ApplyLime,
    ApplySulfur,
    AddOrganicMatter,
    IncreaseIrrigation,
    ImproveDrainage,
    ApplyZinc,
    ApplyIron,
    MaintainPractices,
}

impl Recommendation {
    /// Text shown to the grower.
    pub fn text(self) -> &'static str {
        match self {
            Recommendation::ApplyNitrogen => "Apply urea or ammonium sulfate at 100-150 kg/ha",
            Recommendation::ApplyPhosphorus => "Apply single super phosphate (SSP) at 50-75 kg/ha",
            Recommendation::ApplyPotash => "Apply muriate of potash (MOP) at 50-100 kg/ha",
            Recommendation::ApplyLime => "Apply agricultural lime at 2-4 tonnes/ha to raise pH",
            Recommendation::ApplySulfur => "Apply sulfur at 1-2 tonnes/ha to lower pH",
            Recommendation::AddOrganicMatter => {
                "Incorporate farmyard manure or compost at 10-15 tonnes/ha"
            }
            Recommendation::IncreaseIrrigation => "Increase irrigation frequency",
            Recommendation::ImproveDrainage => "Improve drainage to reduce waterlogging",
            Recommendation::ApplyZinc => "Apply zinc sulfate at 25 kg/ha",
            Recommendation::ApplyIron => "Apply iron chelates or ferrous sulfate",
            Recommendation::MaintainPractices => {
                "Soil is in good condition - maintain current practices"
            }
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Scoring outcome for one sample.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PredictionResult {
    /// Copy of the input carrying the score and class.
    pub sample: Sample,
    pub score: u8,
    pub class: ProductivityClass,
    pub recommendations: Vec<Recommendation>,
    pub confidence: f64,
}

impl PredictionResult {
    pub fn recommendation_texts(&self) -> Vec<&'static str> {
        self.recommendations.iter().map(|r| r.text()).collect()
    }
}

/// Measured and strictly above `threshold`.
fn above(sample: &Sample, field: SoilField, threshold: f64) -> bool {
    sample.get_finite(field).is_some_and(|v| v > threshold)
}

fn bonus_points(sample: &Sample) -> u32 {
    let mut points = 0;
    if above(sample, SoilField::Zinc, 0.5) {
        points += 2;
    }
    if above(sample, SoilField::Iron, 4.0) {
        points += 2;
    }
    if above(sample, SoilField::Boron, 0.5) {
        points += 1;
    }
    points
}

fn recommendations(sample: &Sample) -> Vec<Recommendation> {
    let deficient = |field: SoilField| tier(field, sample.get(field)) == Tier::Deficient;
    let ph = sample.get_finite(SoilField::Ph);

    let rules = [
        (deficient(SoilField::Nitrogen), Recommendation::ApplyNitrogen),
        (deficient(SoilField::Phosphorus), Recommendation::ApplyPhosphorus),
        (deficient(SoilField::Potassium), Recommendation::ApplyPotash),
        (ph.is_some_and(|v| v < 6.0), Recommendation::ApplyLime),
        (above(sample, SoilField::Ph, 7.5), Recommendation::ApplySulfur),
        (deficient(SoilField::OrganicCarbon), Recommendation::AddOrganicMatter),
        (deficient(SoilField::SoilMoisture), Recommendation::IncreaseIrrigation),
        (above(sample, SoilField::SoilMoisture, 60.0), Recommendation::ImproveDrainage),
        (!above(sample, SoilField::Zinc, 0.5), Recommendation::ApplyZinc),
        (!above(sample, SoilField::Iron, 4.0), Recommendation::ApplyIron),
    ];

    let out: Vec<Recommendation> = rules
        .into_iter()
        .filter_map(|(fires, rec)| fires.then_some(rec))
        .collect();

    if out.is_empty() {
        vec![Recommendation::MaintainPractices]
    } else {
        out
    }
}

/// Raw rule-table points (base plus bonuses) for a sample.
pub fn total_points(sample: &Sample) -> u32 {
    let base: u32 = SCORED_FACTORS
        .iter()
        .map(|&field| tier(field, sample.get(field)).points())
        .sum();
    base + bonus_points(sample)
}

/// Score one sample.
///
/// Pure: the same sample always yields the same result, confidence included.
pub fn score_sample(sample: &Sample) -> PredictionResult {
    let points = total_points(sample);
    let score = (points as f64 / BASE_POINTS * 100.0).min(100.0).round() as u8;
    let class = ProductivityClass::from_score(score);

    PredictionResult {
        sample: Sample {
            productivity_score: Some(score),
            productivity_class: Some(class),
            ..sample.clone()
        },
        score,
        class,
        recommendations: recommendations(sample),
        confidence: DEFAULT_CONFIDENCE,
    }
}

/// Score every sample, preserving order.
pub fn score_batch(samples: &[Sample]) -> Vec<PredictionResult> {
    samples.iter().map(score_sample).collect()
}

/// Inclusive score range with its tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScoreBin {
    pub min: u8,
    pub max: u8,
    pub count: usize,
}

impl ScoreBin {
    /// Range label, e.g. `"21-40"`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.min, self.max)
    }
}

/// Tally scores into 0-20, 21-40, 41-60, 61-80, 81-100.
pub fn score_histogram(predictions: &[PredictionResult]) -> [ScoreBin; 5] {
    let mut bins = [(0, 20), (21, 40), (41, 60), (61, 80), (81, 100)]
        .map(|(min, max)| ScoreBin { min, max, count: 0 });

    for p in predictions {
        if let Some(bin) = bins.iter_mut().find(|b| (b.min..=b.max).contains(&p.score)) {
            bin.count += 1;
        }
    }
    bins
}

/// Number of predictions per class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClassCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl ClassCounts {
    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

pub fn class_distribution(predictions: &[PredictionResult]) -> ClassCounts {
    predictions
        .iter()
        .fold(ClassCounts::default(), |mut acc, p| {
            match p.class {
                ProductivityClass::High => acc.high += 1,
                ProductivityClass::Medium => acc.medium += 1,
                ProductivityClass::Low => acc.low += 1,
            }
            acc
        })
}

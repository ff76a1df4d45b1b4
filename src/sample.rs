//! Soil sample records.
//!
//! A [`Sample`] is one measurement row as handed over by the ingestion layer:
//! sixteen optional numeric readings, an optional soil-type label, and the
//! annotations the engine adds (cluster index, productivity score and class).
//!
//! Absence is `None`. It is never the same thing as `Some(0.0)`: the feature
//! extractor imputes a reference default for `None`, while the scorer treats
//! `None` as failing every band.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of numeric measurements per sample.
pub const N_FIELDS: usize = 16;

/// The numeric measurements, in feature-vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum SoilField {
    /// Available nitrogen, kg/ha.
    Nitrogen,
    /// Available phosphorus, kg/ha.
    Phosphorus,
    /// Available potassium, kg/ha.
    Potassium,
    /// Soil reaction.
    Ph,
    /// Organic carbon, percent.
    OrganicCarbon,
    /// Electrical conductivity, dS/m.
    ElectricalConductivity,
    /// Sulphur, ppm.
    Sulphur,
    /// Zinc, ppm.
    Zinc,
    /// Iron, ppm.
    Iron,
    /// Copper, ppm.
    Copper,
    /// Manganese, ppm.
    Manganese,
    /// Boron, ppm.
    Boron,
    /// Soil moisture, percent.
    SoilMoisture,
    /// Temperature, degrees C.
    Temperature,
    /// Relative humidity, percent.
    Humidity,
    /// Rainfall, mm.
    Rainfall,
}

impl SoilField {
    /// All fields in feature-vector order.
    pub const ALL: [SoilField; N_FIELDS] = [
        SoilField::Nitrogen,
        SoilField::Phosphorus,
        SoilField::Potassium,
        SoilField::Ph,
        SoilField::OrganicCarbon,
        SoilField::ElectricalConductivity,
        SoilField::Sulphur,
        SoilField::Zinc,
        SoilField::Iron,
        SoilField::Copper,
        SoilField::Manganese,
        SoilField::Boron,
        SoilField::SoilMoisture,
        SoilField::Temperature,
        SoilField::Humidity,
        SoilField::Rainfall,
    ];

    /// Position in the feature vector.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name used by the ingestion and presentation layers.
    pub fn name(self) -> &'static str {
        match self {
            SoilField::Nitrogen => "nitrogen",
            SoilField::Phosphorus => "phosphorus",
            SoilField::Potassium => "potassium",
            SoilField::Ph => "ph",
            SoilField::OrganicCarbon => "organicCarbon",
            SoilField::ElectricalConductivity => "electricalConductivity",
            SoilField::Sulphur => "sulphur",
            SoilField::Zinc => "zinc",
            SoilField::Iron => "iron",
            SoilField::Copper => "copper",
            SoilField::Manganese => "manganese",
            SoilField::Boron => "boron",
            SoilField::SoilMoisture => "soilMoisture",
            SoilField::Temperature => "temperature",
            SoilField::Humidity => "humidity",
            SoilField::Rainfall => "rainfall",
        }
    }

    /// Reference value substituted when the measurement is absent.
    pub fn default_value(self) -> f64 {
        match self {
            SoilField::Ph => 7.0,
            SoilField::SoilMoisture => 50.0,
            SoilField::Temperature => 25.0,
            SoilField::Humidity => 60.0,
            SoilField::Rainfall => 100.0,
            _ => 0.0,
        }
    }
}

impl fmt::Display for SoilField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Three-level productivity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ProductivityClass {
    /// Score below 40.
    Low,
    /// Score in [40, 70).
    Medium,
    /// Score of 70 or more.
    High,
}

impl ProductivityClass {
    /// Bucket a 0-100 score.
    pub fn from_score(score: u8) -> Self {
        if score >= 70 {
            ProductivityClass::High
        } else if score >= 40 {
            ProductivityClass::Medium
        } else {
            ProductivityClass::Low
        }
    }
}

impl fmt::Display for ProductivityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProductivityClass::Low => "Low",
            ProductivityClass::Medium => "Medium",
            ProductivityClass::High => "High",
        })
    }
}

/// One soil measurement record.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct Sample {
    pub id: String,
    pub nitrogen: Option<f64>,
    pub phosphorus: Option<f64>,
    pub potassium: Option<f64>,
    pub ph: Option<f64>,
    pub organic_carbon: Option<f64>,
    pub electrical_conductivity: Option<f64>,
    pub sulphur: Option<f64>,
    pub zinc: Option<f64>,
    pub iron: Option<f64>,
    pub copper: Option<f64>,
    pub manganese: Option<f64>,
    pub boron: Option<f64>,
    pub soil_moisture: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub rainfall: Option<f64>,
    pub soil_type: Option<String>,
    /// Cluster index assigned by k-means.
    pub cluster: Option<usize>,
    /// Score assigned by the productivity scorer.
    pub productivity_score: Option<u8>,
    /// Class assigned by the productivity scorer.
    pub productivity_class: Option<ProductivityClass>,
}

impl Sample {
    /// Empty sample with every measurement absent.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Set a measurement, builder style.
    pub fn with(mut self, field: SoilField, value: f64) -> Self {
        self.set(field, Some(value));
        self
    }

    /// Set the soil-type label, builder style.
    pub fn with_soil_type(mut self, soil_type: impl Into<String>) -> Self {
        self.soil_type = Some(soil_type.into());
        self
    }

    /// Read a measurement.
    pub fn get(&self, field: SoilField) -> Option<f64> {
        match field {
            SoilField::Nitrogen => self.nitrogen,
            SoilField::Phosphorus => self.phosphorus,
            SoilField::Potassium => self.potassium,
            SoilField::Ph => self.ph,
            SoilField::OrganicCarbon => self.organic_carbon,
            SoilField::ElectricalConductivity => self.electrical_conductivity,
            SoilField::Sulphur => self.sulphur,
            SoilField::Zinc => self.zinc,
            SoilField::Iron => self.iron,
            SoilField::Copper => self.copper,
            SoilField::Manganese => self.manganese,
            SoilField::Boron => self.boron,
            SoilField::SoilMoisture => self.soil_moisture,
            SoilField::Temperature => self.temperature,
            SoilField::Humidity => self.humidity,
            SoilField::Rainfall => self.rainfall,
        }
    }

    /// Read a measurement, treating NaN and infinities as absent.
    pub fn get_finite(&self, field: SoilField) -> Option<f64> {
        self.get(field).filter(|v| v.is_finite())
    }

    /// Overwrite a measurement.
    pub fn set(&mut self, field: SoilField, value: Option<f64>) {
        let slot = match field {
            SoilField::Nitrogen => &mut self.nitrogen,
            SoilField::Phosphorus => &mut self.phosphorus,
            SoilField::Potassium => &mut self.potassium,
            SoilField::Ph => &mut self.ph,
            SoilField::OrganicCarbon => &mut self.organic_carbon,
            SoilField::ElectricalConductivity => &mut self.electrical_conductivity,
            SoilField::Sulphur => &mut self.sulphur,
            SoilField::Zinc => &mut self.zinc,
            SoilField::Iron => &mut self.iron,
            SoilField::Copper => &mut self.copper,
            SoilField::Manganese => &mut self.manganese,
            SoilField::Boron => &mut self.boron,
            SoilField::SoilMoisture => &mut self.soil_moisture,
            SoilField::Temperature => &mut self.temperature,
            SoilField::Humidity => &mut self.humidity,
            SoilField::Rainfall => &mut self.rainfall,
        };
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_order_matches_index() {
        for (i, field) in SoilField::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }

    #[test]
    fn get_set_roundtrip_every_field() {
        let mut s = Sample::new("s1");
        for (i, &field) in SoilField::ALL.iter().enumerate() {
            assert_eq!(s.get(field), None);
            s.set(field, Some(i as f64 + 0.5));
        }
        for (i, &field) in SoilField::ALL.iter().enumerate() {
            assert_eq!(s.get(field), Some(i as f64 + 0.5));
        }
    }

    #[test]
    fn explicit_zero_is_not_absent() {
        let s = Sample::new("z").with(SoilField::Nitrogen, 0.0);
        assert_eq!(s.get(SoilField::Nitrogen), Some(0.0));
        assert_eq!(s.get(SoilField::Phosphorus), None);
    }

    #[test]
    fn nan_is_not_finite() {
        let s = Sample::new("n").with(SoilField::Zinc, f64::NAN);
        assert!(s.get(SoilField::Zinc).is_some());
        assert_eq!(s.get_finite(SoilField::Zinc), None);
    }

    #[test]
    fn class_thresholds() {
        assert_eq!(ProductivityClass::from_score(100), ProductivityClass::High);
        assert_eq!(ProductivityClass::from_score(70), ProductivityClass::High);
        assert_eq!(ProductivityClass::from_score(69), ProductivityClass::Medium);
        assert_eq!(ProductivityClass::from_score(40), ProductivityClass::Medium);
        assert_eq!(ProductivityClass::from_score(39), ProductivityClass::Low);
        assert_eq!(ProductivityClass::from_score(0), ProductivityClass::Low);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_column_names() {
        let s = Sample::new("a")
            .with(SoilField::OrganicCarbon, 0.8)
            .with(SoilField::Ph, 6.5);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["organicCarbon"], 0.8);
        assert_eq!(json["ph"], 6.5);
        assert!(json["nitrogen"].is_null());

        let back: Sample = serde_json::from_str(r#"{"id":"b","soilMoisture":41.0}"#).unwrap();
        assert_eq!(back.soil_moisture, Some(41.0));
        assert_eq!(back.nitrogen, None);
    }
}

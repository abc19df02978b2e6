//! Patient covariates: the bounded form input and the single-row record fed to the models.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::endpoint::Endpoint;

// Column names the classifiers were trained on.
pub const COL_PASI: &str = "PASI INICIAL IXE";
pub const COL_AGE: &str = "edad";
pub const COL_BMI: &str = "IMC";
pub const COL_SEX: &str = "Sexo";
pub const COL_ARTHRITIS: &str = "ARTRITIS PSORIASICA";
pub const COL_DURATION: &str = "años con psoriasis";
pub const COL_PRIOR_BIOLOGICS: &str = "N biológicos previos";

/// Inclusive bounds and default of a numeric control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl Bounds {
    const fn new(min: f64, max: f64, default: f64) -> Self {
        Self { min, max, default }
    }

    /// Clamp into [min, max]; non-finite input falls back to the default.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_finite() {
            value.clamp(self.min, self.max)
        } else {
            self.default
        }
    }
}

pub const PASI_BOUNDS: Bounds = Bounds::new(0.0, 80.0, 20.0);
pub const AGE_BOUNDS: Bounds = Bounds::new(18.0, 100.0, 45.0);
pub const BMI_BOUNDS: Bounds = Bounds::new(15.0, 60.0, 27.0);
pub const DURATION_BOUNDS: Bounds = Bounds::new(0.0, 80.0, 15.0);
pub const PRIOR_BIOLOGICS_BOUNDS: Bounds = Bounds::new(0.0, 20.0, 0.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sex {
    #[default]
    #[serde(rename = "Varón")]
    Male,
    #[serde(rename = "Mujer")]
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "Varón",
            Sex::Female => "Mujer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum YesNo {
    #[default]
    #[serde(rename = "No")]
    No,
    #[serde(rename = "Sí")]
    Yes,
}

impl YesNo {
    pub const ALL: [YesNo; 2] = [YesNo::No, YesNo::Yes];

    pub fn as_str(&self) -> &'static str {
        match self {
            YesNo::No => "No",
            YesNo::Yes => "Sí",
        }
    }

    pub fn as_flag(&self) -> i64 {
        match self {
            YesNo::No => 0,
            YesNo::Yes => 1,
        }
    }
}

/// Raw values collected by the calculator form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientInput {
    /// Baseline PASI (0–80)
    #[serde(default = "default_pasi")]
    pub pasi: f64,
    /// Age in years (18–100)
    #[serde(default = "default_age")]
    pub age: f64,
    /// Body-mass index (15–60)
    #[serde(default = "default_bmi")]
    pub bmi: f64,
    #[serde(default)]
    pub sex: Sex,
    /// Psoriatic arthritis
    #[serde(default)]
    pub arthritis: YesNo,
    /// Years with psoriasis (0–80)
    #[serde(default = "default_duration")]
    pub duration_years: f64,
    /// Number of prior biologics (0–20)
    #[serde(default = "default_prior_biologics")]
    pub prior_biologics: f64,
    /// Endpoint selector. Both endpoints are always scored.
    #[serde(default)]
    pub endpoint: Endpoint,
}

fn default_pasi() -> f64 { PASI_BOUNDS.default }
fn default_age() -> f64 { AGE_BOUNDS.default }
fn default_bmi() -> f64 { BMI_BOUNDS.default }
fn default_duration() -> f64 { DURATION_BOUNDS.default }
fn default_prior_biologics() -> f64 { PRIOR_BIOLOGICS_BOUNDS.default }

impl Default for PatientInput {
    fn default() -> Self {
        Self {
            pasi: default_pasi(),
            age: default_age(),
            bmi: default_bmi(),
            sex: Sex::default(),
            arthritis: YesNo::default(),
            duration_years: default_duration(),
            prior_biologics: default_prior_biologics(),
            endpoint: Endpoint::default(),
        }
    }
}

impl PatientInput {
    /// Apply the control bounds, as the form widgets would.
    pub fn clamped(&self) -> Self {
        Self {
            pasi: PASI_BOUNDS.clamp(self.pasi),
            age: AGE_BOUNDS.clamp(self.age),
            bmi: BMI_BOUNDS.clamp(self.bmi),
            sex: self.sex,
            arthritis: self.arthritis,
            duration_years: DURATION_BOUNDS.clamp(self.duration_years),
            prior_biologics: PRIOR_BIOLOGICS_BOUNDS.clamp(self.prior_biologics),
            endpoint: self.endpoint,
        }
    }

    /// Build the model row with the training-time column types:
    /// floats for PASI, BMI and duration, integers for age, arthritis flag and
    /// prior biologics, sex passed through as its label.
    pub fn to_record(&self) -> PatientRecord {
        let input = self.clamped();
        PatientRecord {
            columns: vec![
                (COL_PASI, FeatureValue::Float(input.pasi)),
                (COL_AGE, FeatureValue::Int(input.age.trunc() as i64)),
                (COL_BMI, FeatureValue::Float(input.bmi)),
                (COL_SEX, FeatureValue::Text(input.sex.as_str().to_string())),
                (COL_ARTHRITIS, FeatureValue::Int(input.arthritis.as_flag())),
                (COL_DURATION, FeatureValue::Float(input.duration_years)),
                (COL_PRIOR_BIOLOGICS, FeatureValue::Int(input.prior_biologics.trunc() as i64)),
            ],
        }
    }
}

/// A single cell of the model input row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl FeatureValue {
    /// Numeric view; `None` for text.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Int(v) => Some(*v as f64),
            FeatureValue::Float(v) => Some(*v),
            FeatureValue::Text(_) => None,
        }
    }

    /// Category label as the one-hot encoder sees it.
    pub fn as_category(&self) -> String {
        match self {
            FeatureValue::Text(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Int(v) => write!(f, "{v}"),
            FeatureValue::Float(v) => write!(f, "{v}"),
            FeatureValue::Text(s) => f.write_str(s),
        }
    }
}

/// Immutable single-row record, columns in construction order.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientRecord {
    columns: Vec<(&'static str, FeatureValue)>,
}

impl PatientRecord {
    pub fn get(&self, column: &str) -> Option<&FeatureValue> {
        self.columns
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_match_form() {
        let input = PatientInput::default();
        assert_eq!(input.pasi, 20.0);
        assert_eq!(input.age, 45.0);
        assert_eq!(input.bmi, 27.0);
        assert_eq!(input.sex, Sex::Male);
        assert_eq!(input.arthritis, YesNo::No);
        assert_eq!(input.duration_years, 15.0);
        assert_eq!(input.prior_biologics, 0.0);
    }

    #[test]
    fn test_record_coercions() {
        let input = PatientInput {
            age: 52.9,
            arthritis: YesNo::Yes,
            prior_biologics: 2.0,
            sex: Sex::Female,
            ..Default::default()
        };
        let record = input.to_record();

        assert_eq!(record.len(), 7);
        assert_eq!(record.get(COL_PASI), Some(&FeatureValue::Float(20.0)));
        assert_eq!(record.get(COL_AGE), Some(&FeatureValue::Int(52)));
        assert_eq!(record.get(COL_ARTHRITIS), Some(&FeatureValue::Int(1)));
        assert_eq!(record.get(COL_SEX), Some(&FeatureValue::Text("Mujer".into())));
        assert_eq!(record.get(COL_DURATION), Some(&FeatureValue::Float(15.0)));
        assert_eq!(record.get(COL_PRIOR_BIOLOGICS), Some(&FeatureValue::Int(2)));
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let input = PatientInput {
            pasi: 95.0,
            age: 12.0,
            bmi: f64::NAN,
            prior_biologics: -3.0,
            ..Default::default()
        };
        let clamped = input.clamped();
        assert_eq!(clamped.pasi, 80.0);
        assert_eq!(clamped.age, 18.0);
        assert_eq!(clamped.bmi, 27.0);
        assert_eq!(clamped.prior_biologics, 0.0);
    }

    #[test]
    fn test_form_labels_deserialize() {
        let input: PatientInput = serde_json::from_value(serde_json::json!({
            "sex": "Mujer",
            "arthritis": "Sí",
            "endpoint": "PASI90_w16"
        }))
        .unwrap();
        assert_eq!(input.sex, Sex::Female);
        assert_eq!(input.arthritis, YesNo::Yes);
        assert_eq!(input.endpoint, Endpoint::Pasi90W16);
        assert_eq!(input.age, 45.0);
    }
}

//! Serialized binary classifier.
//!
//! An artifact is a fitted logistic-regression pipeline stored as JSON:
//! per-column imputation and standardisation for numeric features, one-hot
//! coefficients for categorical features, an intercept and an optional Platt
//! calibration of the linear predictor.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use ixepred_common::{IxepredError, Result};
use crate::patient::FeatureValue;

/// Numeric column: impute → standardise → weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericStep {
    pub name: String,
    /// Value used when the column is missing (training median).
    pub impute: f64,
    #[serde(default)]
    pub mean: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
    pub coef: f64,
}

fn default_scale() -> f64 { 1.0 }

/// Categorical column: impute → one-hot. Unknown levels contribute nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoricalStep {
    pub name: String,
    /// Level used when the column is missing (training mode).
    pub impute: String,
    /// Coefficient per level; the reference level may be omitted.
    #[serde(default)]
    pub levels: BTreeMap<String, f64>,
}

/// Platt scaling applied to the linear predictor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Calibration {
    pub slope: f64,
    pub offset: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Endpoint this classifier was trained for, informational only.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Column order the model expects.
    pub feature_names_in: Vec<String>,
    pub intercept: f64,
    #[serde(default)]
    pub numeric: Vec<NumericStep>,
    #[serde(default)]
    pub categorical: Vec<CategoricalStep>,
    #[serde(default)]
    pub calibration: Option<Calibration>,
}

enum Step<'a> {
    Numeric(&'a NumericStep),
    Categorical(&'a CategoricalStep),
}

impl ModelArtifact {
    /// Decode and validate an artifact document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let artifact: ModelArtifact = serde_json::from_str(json)?;
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names_in
    }

    /// Every declared feature must be described by exactly one step, and vice versa.
    pub fn validate(&self) -> Result<()> {
        let mut declared = HashSet::new();
        for name in &self.feature_names_in {
            if !declared.insert(name.as_str()) {
                return Err(IxepredError::Scoring(format!("duplicate feature name '{name}'")));
            }
        }

        let mut described = HashSet::new();
        let step_names = self.numeric.iter().map(|s| &s.name)
            .chain(self.categorical.iter().map(|s| &s.name));
        for name in step_names {
            if !declared.contains(name.as_str()) {
                return Err(IxepredError::Scoring(format!(
                    "step for '{name}' is not listed in feature_names_in"
                )));
            }
            if !described.insert(name.as_str()) {
                return Err(IxepredError::Scoring(format!("feature '{name}' has more than one step")));
            }
        }

        if let Some(missing) = self.feature_names_in.iter().find(|n| !described.contains(n.as_str())) {
            return Err(IxepredError::Scoring(format!("feature '{missing}' has no preprocessing step")));
        }

        let finite = self.intercept.is_finite()
            && self.numeric.iter().all(|s| s.impute.is_finite() && s.mean.is_finite() && s.scale.is_finite() && s.coef.is_finite())
            && self.categorical.iter().all(|s| s.levels.values().all(|c| c.is_finite()))
            && self.calibration.as_ref().map_or(true, |c| c.slope.is_finite() && c.offset.is_finite());
        if !finite {
            return Err(IxepredError::Scoring("artifact contains non-finite parameters".into()));
        }

        Ok(())
    }

    fn step_for(&self, name: &str) -> Option<Step<'_>> {
        self.numeric.iter().find(|s| s.name == name).map(Step::Numeric)
            .or_else(|| self.categorical.iter().find(|s| s.name == name).map(Step::Categorical))
    }

    /// Linear predictor for a row already projected onto `feature_names_in`.
    pub fn decision_function(&self, row: &[Option<FeatureValue>]) -> Result<f64> {
        if row.len() != self.feature_names_in.len() {
            return Err(IxepredError::Scoring(format!(
                "row has {} values but the model expects {}",
                row.len(),
                self.feature_names_in.len()
            )));
        }

        let mut z = self.intercept;
        for (name, value) in self.feature_names_in.iter().zip(row) {
            match self.step_for(name) {
                Some(Step::Numeric(step)) => {
                    let x = match value {
                        None => step.impute,
                        Some(v) => v.as_f64().ok_or_else(|| IxepredError::Scoring(format!(
                            "non-numeric value '{v}' for numeric feature '{name}'"
                        )))?,
                    };
                    let scale = if step.scale == 0.0 { 1.0 } else { step.scale };
                    z += step.coef * (x - step.mean) / scale;
                }
                Some(Step::Categorical(step)) => {
                    let level = value
                        .as_ref()
                        .map(FeatureValue::as_category)
                        .unwrap_or_else(|| step.impute.clone());
                    z += step.levels.get(&level).copied().unwrap_or(0.0);
                }
                None => {
                    return Err(IxepredError::Scoring(format!("no preprocessing step for '{name}'")));
                }
            }
        }
        if !z.is_finite() {
            return Err(IxepredError::Scoring(format!("linear predictor is not finite ({z})")));
        }
        Ok(z)
    }

    /// Class probabilities `[negative, positive]`.
    pub fn predict_proba(&self, row: &[Option<FeatureValue>]) -> Result<[f64; 2]> {
        let z = self.decision_function(row)?;
        let z = match &self.calibration {
            Some(c) => c.slope * z + c.offset,
            None => z,
        };
        if !z.is_finite() {
            return Err(IxepredError::Scoring(format!("calibrated predictor is not finite ({z})")));
        }
        let p = sigmoid(z);
        Ok([1.0 - p, p])
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact() -> ModelArtifact {
        ModelArtifact::from_json_str(r#"{
            "feature_names_in": ["edad", "Sexo"],
            "intercept": 0.0,
            "numeric": [{"name": "edad", "impute": 40.0, "mean": 40.0, "scale": 10.0, "coef": 1.0}],
            "categorical": [{"name": "Sexo", "impute": "Varón", "levels": {"Mujer": 0.5}}]
        }"#).unwrap()
    }

    #[test]
    fn test_reference_row_is_even_odds() {
        let m = artifact();
        let p = m.predict_proba(&[Some(FeatureValue::Int(40)), Some(FeatureValue::Text("Varón".into()))]).unwrap();
        assert!((p[1] - 0.5).abs() < 1e-12);
        assert!((p[0] + p[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_values_are_imputed() {
        let m = artifact();
        let z = m.decision_function(&[None, None]).unwrap();
        assert!(z.abs() < 1e-12, "imputed values sit at the reference point");
    }

    #[test]
    fn test_unknown_level_contributes_nothing() {
        let m = artifact();
        let z = m.decision_function(&[Some(FeatureValue::Int(40)), Some(FeatureValue::Text("Otro".into()))]).unwrap();
        assert!(z.abs() < 1e-12);
    }

    #[test]
    fn test_coefficients_move_probability() {
        let m = artifact();
        let p = m.predict_proba(&[Some(FeatureValue::Int(60)), Some(FeatureValue::Text("Mujer".into()))]).unwrap();
        // z = (60-40)/10 + 0.5 = 2.5
        assert!((p[1] - 1.0 / (1.0 + (-2.5f64).exp())).abs() < 1e-12);
    }

    #[test]
    fn test_text_in_numeric_column_is_error() {
        let m = artifact();
        let err = m.decision_function(&[Some(FeatureValue::Text("x".into())), None]).unwrap_err();
        assert!(matches!(err, IxepredError::Scoring(_)));
    }

    #[test]
    fn test_calibration_applies_to_linear_predictor() {
        let mut m = artifact();
        m.calibration = Some(Calibration { slope: 0.0, offset: 1.0 });
        let p = m.predict_proba(&[None, None]).unwrap();
        assert!((p[1] - sigmoid(1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_undescribed_feature_is_rejected() {
        let err = ModelArtifact::from_json_str(r#"{
            "feature_names_in": ["edad", "IMC"],
            "intercept": 0.0,
            "numeric": [{"name": "edad", "impute": 40.0, "coef": 1.0}]
        }"#).unwrap_err();
        assert!(err.to_string().contains("IMC"));
    }

    #[test]
    fn test_overflowing_predictor_is_scoring_error() {
        // Tiny scales push the two imputed terms to +inf and -inf.
        let m = ModelArtifact::from_json_str(r#"{
            "feature_names_in": ["a", "b"],
            "intercept": 0.0,
            "numeric": [
                {"name": "a", "impute": 1.0, "scale": 1e-320, "coef": 1.0},
                {"name": "b", "impute": -1.0, "scale": 1e-320, "coef": 1.0}
            ]
        }"#).unwrap();
        let err = m.predict_proba(&[None, None]).unwrap_err();
        assert!(matches!(err, IxepredError::Scoring(_)));
    }

    #[test]
    fn test_overflowing_calibration_is_scoring_error() {
        let mut m = artifact();
        m.calibration = Some(Calibration { slope: f64::MAX, offset: f64::MAX });
        let row = [Some(FeatureValue::Int(50)), None];
        assert!(matches!(m.predict_proba(&row), Err(IxepredError::Scoring(_))));
    }

    #[test]
    fn test_extreme_linear_predictor_stays_in_unit_interval() {
        assert_eq!(sigmoid(-1000.0), 0.0);
        assert_eq!(sigmoid(1000.0), 1.0);
    }
}

//! Scoring orchestrator: one calculation = load both classifiers, build the
//! patient row, project it onto each schema and take the positive-class probability.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use ixepred_common::{IxepredError, Result};
use crate::artifact::ModelArtifact;
use crate::endpoint::Endpoint;
use crate::interpretation::Banner;
use crate::patient::{PatientInput, PatientRecord};
use crate::projection::project;
use crate::source::ArtifactSource;

/// Index of the positive class in a two-class probability output.
const POSITIVE_CLASS: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub prob75: f64,
    pub prob90: f64,
}

impl Prediction {
    pub fn probability(&self, endpoint: Endpoint) -> f64 {
        match endpoint {
            Endpoint::Pasi75W16 => self.prob75,
            Endpoint::Pasi90W16 => self.prob90,
        }
    }

    /// Interpretation is driven by the deep-response probability only.
    pub fn banner(&self) -> Banner {
        Banner::for_prob90(self.prob90)
    }
}

/// Score `input` against both endpoint classifiers.
///
/// Artifacts are loaded fresh on every call; a missing or corrupt artifact
/// aborts the calculation. With `strict_alignment` off, expected columns the
/// record lacks are passed to the model as missing values.
pub fn score_patient(
    source: &dyn ArtifactSource,
    input: &PatientInput,
    strict_alignment: bool,
) -> Result<Prediction> {
    let model_75 = source.load_model(Endpoint::Pasi75W16)?;
    let model_90 = source.load_model(Endpoint::Pasi90W16)?;

    let record = input.to_record();

    let prob75 = positive_probability(&model_75, &record, Endpoint::Pasi75W16, strict_alignment)?;
    let prob90 = positive_probability(&model_90, &record, Endpoint::Pasi90W16, strict_alignment)?;

    debug!(prob75, prob90, "scored patient record");
    Ok(Prediction { prob75, prob90 })
}

fn positive_probability(
    model: &ModelArtifact,
    record: &PatientRecord,
    endpoint: Endpoint,
    strict_alignment: bool,
) -> Result<f64> {
    let row = project(record, model.feature_names());
    if !row.is_complete() {
        if strict_alignment {
            return Err(IxepredError::SchemaMismatch {
                endpoint: endpoint.to_string(),
                missing: row.missing,
            });
        }
        warn!(
            endpoint = %endpoint,
            missing = ?row.missing,
            "patient record lacks expected features; passing missing values"
        );
    }

    let proba = model.predict_proba(&row.values)?;
    Ok(proba[POSITIVE_CLASS])
}

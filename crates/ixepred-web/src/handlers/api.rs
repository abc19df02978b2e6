//! JSON endpoints mirroring the calculator page.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, info_span};
use uuid::Uuid;

use ixepred_model::interpretation::format_percent;
use ixepred_model::{score_patient, Banner, Endpoint, PatientInput, TransparencyPanel};
use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub request_id: Uuid,
    /// Echo of the form's endpoint selector; both endpoints are always scored.
    pub endpoint_selected: Endpoint,
    pub prob75: f64,
    pub prob90: f64,
    pub prob75_pct: String,
    pub prob90_pct: String,
    pub banner: Banner,
    pub computed_at: DateTime<Utc>,
}

pub async fn api_predict(
    State(state): State<SharedState>,
    Json(body): Json<PatientInput>,
) -> Result<Json<PredictResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    let input = body.clamped();

    let prediction = info_span!("api_predict", %request_id).in_scope(|| {
        let prediction = score_patient(state.source.as_ref(), &input, state.strict_alignment)?;
        info!(prob75 = prediction.prob75, prob90 = prediction.prob90, "calculation complete");
        Ok::<_, ApiError>(prediction)
    })?;

    Ok(Json(PredictResponse {
        request_id,
        endpoint_selected: input.endpoint,
        prob75: prediction.prob75,
        prob90: prediction.prob90,
        prob75_pct: format_percent(prediction.prob75),
        prob90_pct: format_percent(prediction.prob90),
        banner: prediction.banner(),
        computed_at: Utc::now(),
    }))
}

pub async fn api_transparency(State(state): State<SharedState>) -> Json<TransparencyPanel> {
    Json(TransparencyPanel::build(state.source.as_ref()))
}

pub async fn health() -> &'static str {
    "ok"
}

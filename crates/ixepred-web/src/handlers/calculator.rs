//! Calculator page — covariate form → PASI75 / PASI90 probabilities.

use axum::{extract::State, response::Html, Form};
use tracing::{info, info_span};
use uuid::Uuid;

use ixepred_model::{score_patient, PatientInput, TransparencyPanel};
use crate::error::AppError;
use crate::render;
use crate::state::SharedState;

pub async fn calculator_page(State(state): State<SharedState>) -> Html<String> {
    let panel = TransparencyPanel::build(state.source.as_ref());
    Html(render::calculator_page(&PatientInput::default(), None, &panel))
}

pub async fn predict_submit(
    State(state): State<SharedState>,
    Form(form): Form<PatientInput>,
) -> Result<Html<String>, AppError> {
    let request_id = Uuid::new_v4();
    let input = form.clamped();

    let prediction = info_span!("predict", %request_id).in_scope(|| {
        let prediction = score_patient(state.source.as_ref(), &input, state.strict_alignment)?;
        info!(
            selected = %input.endpoint,
            prob75 = prediction.prob75,
            prob90 = prediction.prob90,
            banner = ?prediction.banner().level,
            "calculation complete"
        );
        Ok::<_, AppError>(prediction)
    })?;

    let panel = TransparencyPanel::build(state.source.as_ref());
    Ok(Html(render::calculator_page(&input, Some(&prediction), &panel)))
}

//! Mapping of calculation failures onto HTTP responses.
//!
//! A failed calculation is not recovered: the request ends with an error page
//! (or JSON body) and nothing from the partial run is shown.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use ixepred_common::IxepredError;
use crate::render;

fn status_for(err: &IxepredError) -> StatusCode {
    if err.is_fatal() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    }
}

/// Error returned by HTML handlers.
#[derive(Debug)]
pub struct AppError(pub IxepredError);

impl From<IxepredError> for AppError {
    fn from(err: IxepredError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        error!(%status, "calculation failed: {}", self.0);
        (status, Html(render::error_page(&self.0))).into_response()
    }
}

/// Error returned by JSON handlers.
#[derive(Debug)]
pub struct ApiError(pub IxepredError);

impl From<IxepredError> for ApiError {
    fn from(err: IxepredError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        error!(%status, "API calculation failed: {}", self.0);
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::UploadOutcome;
use crate::application::services::{RefreshError, RefreshStatus};
use crate::presentation::handlers::ErrorResponse;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct RefreshResponse {
    pub index: String,
    pub documents: usize,
    pub started_at: String,
    pub finished_at: String,
}

#[derive(Serialize)]
pub struct RefreshFailureResponse {
    pub error: String,
    pub rejected: Vec<UploadOutcome>,
}

#[tracing::instrument(skip(state))]
pub async fn refresh_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.refresh_service.refresh().await {
        Ok(summary) => (
            StatusCode::OK,
            Json(RefreshResponse {
                index: summary.index,
                documents: summary.documents,
                started_at: summary.started_at.to_rfc3339(),
                finished_at: summary.finished_at.to_rfc3339(),
            }),
        )
            .into_response(),
        Err(RefreshError::AlreadyRunning) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: RefreshError::AlreadyRunning.to_string(),
            }),
        )
            .into_response(),
        Err(RefreshError::PartialUpload { report, .. }) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(RefreshFailureResponse {
                error: "Index update failed.".to_string(),
                rejected: report.failures().into_iter().cloned().collect(),
            }),
        )
            .into_response(),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(RefreshFailureResponse {
                error: "Index update failed.".to_string(),
                rejected: Vec::new(),
            }),
        )
            .into_response(),
    }
}

pub async fn refresh_status_handler(State(state): State<AppState>) -> Json<RefreshStatus> {
    Json(state.refresh_service.status())
}

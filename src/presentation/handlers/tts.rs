use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;

use crate::application::services::RefreshError;
use crate::infrastructure::observability::sanitize_for_log;
use crate::presentation::handlers::ErrorResponse;
use crate::presentation::pages::PageContext;
use crate::presentation::state::AppState;

pub const TTS_ROUTE: &str = "/api/http_tts_trigger";

#[derive(Debug, Default, Deserialize)]
pub struct TtsParams {
    pub keyword: Option<String>,
    pub update: Option<String>,
}

impl TtsParams {
    fn wants_update(&self) -> bool {
        self.update.as_deref().is_some_and(|flag| {
            !matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "" | "false" | "0" | "no"
            )
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TtsBody {
    pub keyword: Option<String>,
}

/// Query keyword wins; otherwise a JSON body `{"keyword": ...}`. A missing
/// or unparsable body means no keyword.
fn keyword_from(params: &TtsParams, body: &[u8]) -> Option<String> {
    params
        .keyword
        .clone()
        .or_else(|| {
            serde_json::from_slice::<TtsBody>(body)
                .ok()
                .and_then(|b| b.keyword)
        })
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}

#[tracing::instrument(skip_all)]
pub async fn tts_trigger_handler(
    State(state): State<AppState>,
    Query(params): Query<TtsParams>,
    body: Bytes,
) -> Response {
    if params.wants_update() {
        return update(&state).await;
    }

    match keyword_from(&params, &body) {
        Some(keyword) => narrate(&state, &keyword).await,
        None => {
            let ctx = page_context(&state).await;
            render(state.pages.initial(&ctx))
        }
    }
}

async fn update(state: &AppState) -> Response {
    match state.refresh_service.refresh().await {
        Ok(summary) => {
            let ctx = page_context(state).await;
            render(state.pages.updated(&ctx, &summary))
        }
        Err(RefreshError::AlreadyRunning) => (
            StatusCode::CONFLICT,
            "An index update is already running.",
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Index update requested over HTTP failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Index update failed.").into_response()
        }
    }
}

async fn narrate(state: &AppState, keyword: &str) -> Response {
    match state.narration_service.narrate(keyword).await {
        Ok(Some(narration)) => {
            let ctx = page_context(state).await;
            render(state.pages.result(&ctx, &narration))
        }
        Ok(None) => {
            tracing::info!(keyword = %sanitize_for_log(keyword), "No record matched");
            let ctx = page_context(state).await;
            render(state.pages.not_found(&ctx, keyword))
        }
        Err(e) => {
            tracing::error!(error = %e, "Narration failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Narration failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}

async fn page_context(state: &AppState) -> PageContext {
    let entries = match state.narration_service.lookup().entry_names().await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(error = %e, "Could not list index entries");
            Vec::new()
        }
    };

    PageContext {
        endpoint: TTS_ROUTE.to_string(),
        access_code: state.access_code.to_string(),
        entries,
    }
}

fn render(page: Result<String, handlebars::RenderError>) -> Response {
    match page {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Page rendering failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Page rendering failed".to_string(),
                }),
            )
                .into_response()
        }
    }
}

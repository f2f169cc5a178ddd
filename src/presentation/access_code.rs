use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::presentation::handlers::ErrorResponse;

pub const ACCESS_CODE_HEADER: &str = "x-functions-key";
pub const ACCESS_CODE_PARAM: &str = "code";

#[derive(Deserialize)]
struct AccessParams {
    code: Option<String>,
}

/// Rejects requests that do not carry the function access code, either as
/// `?code=` or in the `x-functions-key` header.
pub async fn require_access_code(
    State(expected): State<Arc<str>>,
    request: Request,
    next: Next,
) -> Response {
    let from_query = Query::<AccessParams>::try_from_uri(request.uri())
        .ok()
        .and_then(|Query(params)| params.code);
    let from_header = request
        .headers()
        .get(ACCESS_CODE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let presented = from_query.or(from_header);
    if presented
        .as_deref()
        .is_some_and(|code| codes_match(code.as_bytes(), expected.as_bytes()))
    {
        return next.run(request).await;
    }

    tracing::warn!(
        code_present = presented.is_some(),
        "Rejected request without a valid access code"
    );
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: "A valid access code is required".to_string(),
        }),
    )
        .into_response()
}

/// Compares without short-circuiting on the first differing byte.
fn codes_match(presented: &[u8], expected: &[u8]) -> bool {
    if presented.len() != expected.len() {
        return false;
    }
    presented
        .iter()
        .zip(expected)
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}

use axum::Router;
use axum::middleware;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::access_code::require_access_code;
use crate::presentation::handlers::{
    TTS_ROUTE, health_handler, refresh_handler, refresh_status_handler, tts_trigger_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let protected = Router::new()
        .route(TTS_ROUTE, get(tts_trigger_handler).post(tts_trigger_handler))
        .route(
            "/api/index/refresh",
            get(refresh_status_handler).post(refresh_handler),
        )
        .route_layer(middleware::from_fn_with_state(
            state.access_code.clone(),
            require_access_code,
        ));

    Router::new()
        .route("/health", get(health_handler))
        .merge(protected)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}

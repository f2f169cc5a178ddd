use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware;
use axum::routing::get;
use tower::ServiceExt;

use docspeak::infrastructure::observability::{
    AZURE_REQUEST_ID_HEADER, REQUEST_ID_HEADER, request_id_middleware,
};

fn app() -> Router {
    Router::new()
        .route("/", get(|| async { "ok" }))
        .layer(middleware::from_fn(request_id_middleware))
}

#[tokio::test]
async fn given_no_request_id_when_handling_then_one_is_generated() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let id = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
    assert_eq!(id.len(), 36);
}

#[tokio::test]
async fn given_client_request_id_when_handling_then_it_is_echoed() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/")
                .header(REQUEST_ID_HEADER, "req-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-123");
}

#[tokio::test]
async fn given_only_azure_request_id_when_handling_then_it_is_reused() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/")
                .header(AZURE_REQUEST_ID_HEADER, "azure-456")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()[REQUEST_ID_HEADER], "azure-456");
}

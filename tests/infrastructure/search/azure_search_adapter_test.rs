use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use docspeak::application::ports::{SearchIndex, SearchIndexError, SearchQuery};
use docspeak::domain::{IndexName, IndexRecord, IndexSchema};
use docspeak::infrastructure::search::AzureSearchAdapter;

use crate::helpers::spawn_mock;

#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    uri: String,
    api_key: Option<String>,
    body: Value,
}

type Responder = Arc<dyn Fn(&Method, &str) -> (StatusCode, Value) + Send + Sync>;

#[derive(Clone)]
struct MockSearch {
    requests: Arc<Mutex<Vec<Recorded>>>,
    respond: Responder,
}

async fn handle(
    State(mock): State<MockSearch>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    mock.requests.lock().unwrap().push(Recorded {
        method: method.clone(),
        uri: uri.to_string(),
        api_key: headers
            .get("api-key")
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });
    let (status, payload) = (mock.respond)(&method, &path);
    (status, axum::Json(payload)).into_response()
}

async fn adapter_with(
    respond: impl Fn(&Method, &str) -> (StatusCode, Value) + Send + Sync + 'static,
) -> (AzureSearchAdapter, Arc<Mutex<Vec<Recorded>>>) {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let mock = MockSearch {
        requests: Arc::clone(&requests),
        respond: Arc::new(respond),
    };
    let base = spawn_mock(Router::new().fallback(handle).with_state(mock)).await;
    let adapter = AzureSearchAdapter::new(&base, "search-key", Duration::from_secs(5)).unwrap();
    (adapter, requests)
}

fn name() -> IndexName {
    IndexName::new("architecture")
}

#[tokio::test]
async fn given_existing_index_when_checking_then_returns_true_and_sends_api_key() {
    let (adapter, requests) =
        adapter_with(|_, _| (StatusCode::OK, json!({"name": "architecture"}))).await;

    assert!(adapter.index_exists(&name()).await.unwrap());

    let recorded = requests.lock().unwrap()[0].clone();
    assert_eq!(recorded.method, Method::GET);
    assert!(recorded.uri.starts_with("/indexes('architecture')"));
    assert!(recorded.uri.contains("api-version=2023-11-01"));
    assert_eq!(recorded.api_key.as_deref(), Some("search-key"));
}

#[tokio::test]
async fn given_missing_index_when_checking_then_returns_false() {
    let (adapter, _) = adapter_with(|_, _| (StatusCode::NOT_FOUND, json!({}))).await;

    assert!(!adapter.index_exists(&name()).await.unwrap());
}

#[tokio::test]
async fn given_missing_index_when_deleting_then_returns_index_not_found() {
    let (adapter, _) = adapter_with(|_, _| (StatusCode::NOT_FOUND, json!({}))).await;

    let result = adapter.delete_index(&name()).await;

    assert!(matches!(result, Err(SearchIndexError::IndexNotFound(_))));
}

#[tokio::test]
async fn given_schema_when_creating_index_then_posts_definition() {
    let (adapter, requests) = adapter_with(|_, _| (StatusCode::CREATED, json!({}))).await;

    adapter
        .create_index(&IndexSchema::for_index(&name()))
        .await
        .unwrap();

    let recorded = requests.lock().unwrap()[0].clone();
    assert_eq!(recorded.method, Method::POST);
    assert!(recorded.uri.starts_with("/indexes?"));
    assert_eq!(recorded.body["name"], "architecture");
    assert_eq!(recorded.body["fields"][0]["key"], true);
    assert_eq!(recorded.body["corsOptions"]["maxAgeInSeconds"], 60);
}

#[tokio::test]
async fn given_rejected_definition_when_creating_index_then_returns_creation_failed() {
    let (adapter, _) = adapter_with(|_, _| {
        (
            StatusCode::BAD_REQUEST,
            json!({"error": {"message": "invalid field"}}),
        )
    })
    .await;

    let result = adapter.create_index(&IndexSchema::for_index(&name())).await;

    assert!(matches!(result, Err(SearchIndexError::IndexCreationFailed(_))));
}

#[tokio::test]
async fn given_multi_status_when_uploading_then_report_carries_each_record() {
    let (adapter, requests) = adapter_with(|_, _| {
        (
            StatusCode::MULTI_STATUS,
            json!({"value": [
                {"key": "Gothic", "status": true, "errorMessage": null, "statusCode": 201},
                {"key": "Doric", "status": false, "errorMessage": "Document is too large", "statusCode": 400}
            ]}),
        )
    })
    .await;
    let records = vec![
        IndexRecord::new("Gothic", "Pointed arches"),
        IndexRecord::new("Doric", "Plain capitals"),
    ];

    let report = adapter.upload(&name(), &records).await.unwrap();

    assert_eq!(report.succeeded_count(), 1);
    let failures = report.failures();
    assert_eq!(failures[0].key, "Doric");
    assert_eq!(failures[0].status_code, 400);
    assert_eq!(
        failures[0].error_message.as_deref(),
        Some("Document is too large")
    );

    let recorded = requests.lock().unwrap()[0].clone();
    assert!(recorded.uri.starts_with("/indexes('architecture')/docs/index"));
    assert_eq!(recorded.body["value"][0]["@search.action"], "upload");
    assert_eq!(recorded.body["value"][0]["name"], "Gothic");
    assert_eq!(recorded.body["value"][1]["information"], "Plain capitals");
}

#[tokio::test]
async fn given_multi_word_names_when_uploading_then_keys_are_stored_without_spaces() {
    let (adapter, requests) = adapter_with(|_, _| {
        (
            StatusCode::MULTI_STATUS,
            json!({"value": [
                {"key": "Ancient_Roman_Architecture", "status": true, "errorMessage": null, "statusCode": 201},
                {"key": "Doric_Order", "status": false, "errorMessage": "Document is too large", "statusCode": 400}
            ]}),
        )
    })
    .await;
    let records = vec![
        IndexRecord::new("Ancient Roman Architecture", "Round arches"),
        IndexRecord::new("Doric Order (revised)", "Plain capitals"),
    ];

    let report = adapter.upload(&name(), &records).await.unwrap();

    let recorded = requests.lock().unwrap()[0].clone();
    assert_eq!(recorded.body["value"][0]["name"], "Ancient_Roman_Architecture");
    assert_eq!(recorded.body["value"][1]["name"], "Doric_Order_-revised-");
    assert_eq!(report.failures()[0].key, "Doric Order");
}

#[tokio::test]
async fn given_stored_keys_when_searching_then_names_are_shown_with_spaces() {
    let (adapter, _) = adapter_with(|_, _| {
        (
            StatusCode::OK,
            json!({"value": [
                {"@search.score": 1.0, "name": "Doric_Order", "information": "Plain capitals"}
            ]}),
        )
    })
    .await;

    let hits = adapter
        .search(&name(), &SearchQuery::new("Doric").top(1))
        .await
        .unwrap();

    assert_eq!(hits[0].record.name, "Doric Order");
}

#[tokio::test]
async fn given_no_records_when_uploading_then_no_request_is_sent() {
    let (adapter, requests) = adapter_with(|_, _| (StatusCode::OK, json!({"value": []}))).await;

    let report = adapter.upload(&name(), &[]).await.unwrap();

    assert!(report.is_empty());
    assert!(requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn given_hits_when_searching_then_records_and_scores_are_returned() {
    let (adapter, requests) = adapter_with(|_, _| {
        (
            StatusCode::OK,
            json!({"value": [
                {"@search.score": 2.5, "name": "Gothic Architecture", "information": "Pointed arches"}
            ]}),
        )
    })
    .await;

    let hits = adapter
        .search(&name(), &SearchQuery::new("Gothic").top(1))
        .await
        .unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].record.name, "Gothic Architecture");
    assert!((hits[0].score - 2.5).abs() < f32::EPSILON);

    let recorded = requests.lock().unwrap()[0].clone();
    assert!(recorded.uri.starts_with("/indexes('architecture')/docs/search"));
    assert_eq!(recorded.body["search"], "Gothic");
    assert_eq!(recorded.body["top"], 1);
    assert!(recorded.body.get("searchFields").is_none());
}

#[tokio::test]
async fn given_field_restriction_when_searching_then_search_fields_are_sent() {
    let (adapter, requests) = adapter_with(|_, _| (StatusCode::OK, json!({"value": []}))).await;

    adapter
        .search(&name(), &SearchQuery::all().in_field("name"))
        .await
        .unwrap();

    let recorded = requests.lock().unwrap()[0].clone();
    assert_eq!(recorded.body["search"], "*");
    assert_eq!(recorded.body["searchFields"], "name");
}

#[tokio::test]
async fn given_rejected_key_when_searching_then_returns_connection_failed() {
    let (adapter, _) = adapter_with(|_, _| (StatusCode::FORBIDDEN, json!({}))).await;

    let result = adapter.search(&name(), &SearchQuery::new("Gothic")).await;

    assert!(matches!(result, Err(SearchIndexError::ConnectionFailed(_))));
}

#[tokio::test]
async fn given_unreachable_service_when_checking_index_then_returns_connection_failed() {
    let adapter =
        AzureSearchAdapter::new("http://127.0.0.1:1", "key", Duration::from_secs(2)).unwrap();

    let result = adapter.index_exists(&name()).await;

    assert!(matches!(result, Err(SearchIndexError::ConnectionFailed(_))));
}

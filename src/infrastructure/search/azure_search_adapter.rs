use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::application::ports::{
    SearchHit, SearchIndex, SearchIndexError, SearchQuery, UploadOutcome, UploadReport,
};
use crate::domain::{IndexName, IndexRecord, IndexSchema};

pub const API_VERSION: &str = "2023-11-01";

/// Azure document keys allow only letters, digits, `_`, `-` and `=`.
/// Spaces are stored as `_` and any other character as `-`.
fn encode_document_key(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            ' ' => '_',
            c if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '=') => c,
            _ => '-',
        })
        .collect()
}

fn decode_document_key(key: &str) -> String {
    key.replace('_', " ")
}

/// Azure AI Search over its REST API.
pub struct AzureSearchAdapter {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl AzureSearchAdapter {
    pub fn new(endpoint: &str, api_key: &str, timeout: Duration) -> Result<Self, SearchIndexError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SearchIndexError::ConnectionFailed(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn index_url(&self, index: &str, suffix: &str) -> String {
        format!(
            "{}/indexes('{}'){}?api-version={}",
            self.endpoint, index, suffix, API_VERSION
        )
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, SearchIndexError> {
        let response = request
            .header("api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| SearchIndexError::ConnectionFailed(e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(SearchIndexError::ConnectionFailed(format!(
                    "search service rejected credentials ({})",
                    response.status()
                )))
            }
            _ => Ok(response),
        }
    }
}

async fn error_body(response: Response) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    format!("status {status}: {text}")
}

#[derive(Serialize)]
struct UploadAction<'a> {
    #[serde(rename = "@search.action")]
    action: &'static str,
    name: String,
    information: &'a str,
}

#[derive(Serialize)]
struct UploadBatch<'a> {
    value: Vec<UploadAction<'a>>,
}

#[derive(Deserialize)]
struct UploadResponse {
    value: Vec<UploadItemResult>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadItemResult {
    key: String,
    status: bool,
    error_message: Option<String>,
    status_code: u16,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    search: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    top: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search_fields: Option<String>,
}

#[derive(Deserialize)]
struct SearchResponse {
    value: Vec<SearchDocument>,
}

#[derive(Deserialize)]
struct SearchDocument {
    #[serde(rename = "@search.score")]
    score: f32,
    #[serde(flatten)]
    record: IndexRecord,
}

#[async_trait]
impl SearchIndex for AzureSearchAdapter {
    #[instrument(skip(self), fields(index = %index))]
    async fn index_exists(&self, index: &IndexName) -> Result<bool, SearchIndexError> {
        let response = self
            .send(self.client.get(self.index_url(index.as_str(), "")))
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            s if s.is_success() => Ok(true),
            _ => Err(SearchIndexError::InvalidResponse(error_body(response).await)),
        }
    }

    #[instrument(skip(self), fields(index = %index))]
    async fn delete_index(&self, index: &IndexName) -> Result<(), SearchIndexError> {
        let response = self
            .send(self.client.delete(self.index_url(index.as_str(), "")))
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(SearchIndexError::IndexNotFound(index.to_string())),
            s if s.is_success() => {
                info!("index deleted");
                Ok(())
            }
            _ => Err(SearchIndexError::IndexDeletionFailed(
                error_body(response).await,
            )),
        }
    }

    #[instrument(skip(self, schema), fields(index = %schema.name))]
    async fn create_index(&self, schema: &IndexSchema) -> Result<(), SearchIndexError> {
        let url = format!("{}/indexes?api-version={}", self.endpoint, API_VERSION);
        let response = self.send(self.client.post(url).json(schema)).await?;

        if !response.status().is_success() {
            return Err(SearchIndexError::IndexCreationFailed(
                error_body(response).await,
            ));
        }

        info!("index created");
        Ok(())
    }

    #[instrument(skip(self, records), fields(index = %index, records = records.len()))]
    async fn upload(
        &self,
        index: &IndexName,
        records: &[IndexRecord],
    ) -> Result<UploadReport, SearchIndexError> {
        if records.is_empty() {
            return Ok(UploadReport::default());
        }

        let batch = UploadBatch {
            value: records
                .iter()
                .map(|record| UploadAction {
                    action: "upload",
                    name: encode_document_key(&record.name),
                    information: &record.information,
                })
                .collect(),
        };

        let response = self
            .send(
                self.client
                    .post(self.index_url(index.as_str(), "/docs/index"))
                    .json(&batch),
            )
            .await?;

        // 207 carries per-record results just like 200
        match response.status() {
            StatusCode::NOT_FOUND => Err(SearchIndexError::IndexNotFound(index.to_string())),
            StatusCode::OK | StatusCode::MULTI_STATUS => {
                let parsed: UploadResponse = response
                    .json()
                    .await
                    .map_err(|e| SearchIndexError::InvalidResponse(e.to_string()))?;
                Ok(parsed.into_report())
            }
            _ => Err(SearchIndexError::UploadFailed(error_body(response).await)),
        }
    }

    #[instrument(skip(self, query), fields(index = %index))]
    async fn search(
        &self,
        index: &IndexName,
        query: &SearchQuery,
    ) -> Result<Vec<SearchHit>, SearchIndexError> {
        let body = SearchRequest {
            search: &query.text,
            top: query.top,
            search_fields: (!query.search_fields.is_empty())
                .then(|| query.search_fields.join(",")),
        };

        let response = self
            .send(
                self.client
                    .post(self.index_url(index.as_str(), "/docs/search"))
                    .json(&body),
            )
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(SearchIndexError::IndexNotFound(index.to_string())),
            s if s.is_success() => {
                let parsed: SearchResponse = response
                    .json()
                    .await
                    .map_err(|e| SearchIndexError::InvalidResponse(e.to_string()))?;
                Ok(parsed
                    .value
                    .into_iter()
                    .map(|doc| SearchHit {
                        record: IndexRecord {
                            name: decode_document_key(&doc.record.name),
                            information: doc.record.information,
                        },
                        score: doc.score,
                    })
                    .collect())
            }
            _ => Err(SearchIndexError::SearchFailed(error_body(response).await)),
        }
    }
}

impl UploadResponse {
    fn into_report(self) -> UploadReport {
        UploadReport::new(
            self.value
                .into_iter()
                .map(|item| UploadOutcome {
                    key: decode_document_key(&item.key),
                    succeeded: item.status,
                    status_code: item.status_code,
                    error_message: item.error_message,
                })
                .collect(),
        )
    }
}

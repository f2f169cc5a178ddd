use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::application::ports::{AnalysisError, DocumentTextExtractor};

pub const POLL_TIMEOUT: Duration = Duration::from_secs(300);
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const INITIAL_BACKOFF: Duration = Duration::from_secs(2);
pub const MAX_BACKOFF: Duration = Duration::from_secs(60);
pub const API_VERSION: &str = "2023-07-31";
pub const DEFAULT_MODEL_ID: &str = "prebuilt-document";

pub struct AzureDocIntelAdapter {
    client: Client,
    endpoint: String,
    api_key: String,
    model_id: String,
    poll_timeout: Duration,
    initial_backoff: Duration,
}

impl AzureDocIntelAdapter {
    pub fn new(endpoint: &str, api_key: &str, model_id: &str) -> Result<Self, AnalysisError> {
        Self::with_timeouts(endpoint, api_key, model_id, REQUEST_TIMEOUT, POLL_TIMEOUT)
    }

    pub fn with_timeouts(
        endpoint: &str,
        api_key: &str,
        model_id: &str,
        request_timeout: Duration,
        poll_timeout: Duration,
    ) -> Result<Self, AnalysisError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| AnalysisError::ConnectionFailed(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model_id: model_id.to_string(),
            poll_timeout,
            initial_backoff: INITIAL_BACKOFF,
        })
    }

    pub fn with_initial_backoff(mut self, backoff: Duration) -> Self {
        self.initial_backoff = backoff;
        self
    }

    async fn submit(&self, locator: &str) -> Result<String, AnalysisError> {
        let body = serde_json::json!({ "urlSource": locator });

        let url = format!(
            "{}/formrecognizer/documentModels/{}:analyze?api-version={}",
            self.endpoint, self.model_id, API_VERSION
        );

        let response = self
            .client
            .post(&url)
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AnalysisError::ConnectionFailed(format!("submit request: {e}")))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AnalysisError::ConnectionFailed(format!(
                "Document Intelligence rejected credentials ({status})"
            )));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AnalysisError::SubmitFailed(format!(
                "submit returned {status}: {text}"
            )));
        }

        let operation_url = response
            .headers()
            .get("Operation-Location")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AnalysisError::InvalidResponse(
                    "response missing Operation-Location header".to_string(),
                )
            })?
            .to_string();

        Ok(operation_url)
    }

    async fn poll_until_complete(&self, operation_url: &str) -> Result<AnalyzeResult, AnalysisError> {
        let poll_future = async {
            let mut backoff = self.initial_backoff;

            loop {
                let response = self
                    .client
                    .get(operation_url)
                    .header("Ocp-Apim-Subscription-Key", &self.api_key)
                    .send()
                    .await
                    .map_err(|e| AnalysisError::ConnectionFailed(format!("poll request: {e}")))?;

                if response.status() == StatusCode::TOO_MANY_REQUESTS {
                    let retry_after = response
                        .headers()
                        .get("Retry-After")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .map(Duration::from_secs)
                        .unwrap_or(backoff);
                    tokio::time::sleep(retry_after).await;
                    continue;
                }

                if !response.status().is_success() {
                    let status = response.status();
                    let text = response.text().await.unwrap_or_default();
                    return Err(AnalysisError::AnalysisFailed(format!(
                        "poll returned {status}: {text}"
                    )));
                }

                let result: AnalyzeResponse = response
                    .json()
                    .await
                    .map_err(|e| AnalysisError::InvalidResponse(e.to_string()))?;

                match result.status.as_str() {
                    "succeeded" => {
                        return result.analyze_result.ok_or_else(|| {
                            AnalysisError::InvalidResponse(
                                "succeeded without analyzeResult".to_string(),
                            )
                        });
                    }
                    "failed" => {
                        let detail = result
                            .error
                            .map(|e| format!("{}: {}", e.code, e.message))
                            .unwrap_or_else(|| "no error detail".to_string());
                        return Err(AnalysisError::AnalysisFailed(detail));
                    }
                    _ => {
                        tokio::time::sleep(backoff).await;
                        backoff = (backoff * 2).min(MAX_BACKOFF);
                    }
                }
            }
        };

        tokio::time::timeout(self.poll_timeout, poll_future)
            .await
            .map_err(|_| AnalysisError::Timeout(self.poll_timeout.as_secs()))?
    }
}

#[async_trait]
impl DocumentTextExtractor for AzureDocIntelAdapter {
    #[tracing::instrument(skip(self), fields(model = %self.model_id))]
    async fn extract(&self, locator: &str) -> Result<String, AnalysisError> {
        if !(locator.starts_with("https://") || locator.starts_with("http://")) {
            return Err(AnalysisError::UnsupportedDocument(format!(
                "locator is not reachable over http: {locator}"
            )));
        }

        let operation_url = self.submit(locator).await?;
        let result = self.poll_until_complete(&operation_url).await?;
        let text = result.joined_lines();

        if text.trim().is_empty() {
            tracing::warn!("Document analyzed but no text lines were detected");
        }
        tracing::info!(
            pages = result.pages.len(),
            chars = text.len(),
            "Document analyzed"
        );

        Ok(text)
    }
}

#[derive(Deserialize)]
pub struct AnalyzeResponse {
    pub status: String,
    #[serde(rename = "analyzeResult")]
    pub analyze_result: Option<AnalyzeResult>,
    pub error: Option<AnalyzeErrorDetail>,
}

#[derive(Deserialize)]
pub struct AnalyzeErrorDetail {
    pub code: String,
    pub message: String,
}

#[derive(Deserialize)]
pub struct AnalyzeResult {
    #[serde(default)]
    pub pages: Vec<AnalyzePage>,
}

#[derive(Deserialize)]
pub struct AnalyzePage {
    #[serde(rename = "pageNumber")]
    pub page_number: u32,
    #[serde(default)]
    pub lines: Vec<AnalyzeLine>,
}

#[derive(Deserialize)]
pub struct AnalyzeLine {
    pub content: String,
}

impl AnalyzeResult {
    /// Every line of every page, in page order, with no separators.
    pub fn joined_lines(&self) -> String {
        let mut pages: Vec<&AnalyzePage> = self.pages.iter().collect();
        pages.sort_by_key(|p| p.page_number);
        pages
            .into_iter()
            .flat_map(|p| p.lines.iter())
            .map(|l| l.content.as_str())
            .collect()
    }
}

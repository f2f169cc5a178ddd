use async_trait::async_trait;

#[async_trait]
pub trait DocumentTextExtractor: Send + Sync {
    /// Analyzes the document at `locator` and returns every detected line,
    /// in document order, concatenated without separators.
    async fn extract(&self, locator: &str) -> Result<String, AnalysisError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("submit failed: {0}")]
    SubmitFailed(String),
    #[error("analysis failed: {0}")]
    AnalysisFailed(String),
    #[error("unsupported document: {0}")]
    UnsupportedDocument(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("analysis timed out after {0}s")]
    Timeout(u64),
}

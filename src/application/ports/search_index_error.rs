#[derive(Debug, thiserror::Error)]
pub enum SearchIndexError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("index not found: {0}")]
    IndexNotFound(String),
    #[error("index creation failed: {0}")]
    IndexCreationFailed(String),
    #[error("index deletion failed: {0}")]
    IndexDeletionFailed(String),
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("search failed: {0}")]
    SearchFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

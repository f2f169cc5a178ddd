use bytes::Bytes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobEntry {
    pub path: String,
}

/// A single blob container.
#[async_trait::async_trait]
pub trait BlobStore: Send + Sync {
    async fn list(&self) -> Result<Vec<BlobEntry>, BlobStoreError>;

    /// Writes `data` at `path`, replacing any existing object.
    async fn put(
        &self,
        path: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<(), BlobStoreError>;

    async fn fetch(&self, path: &str) -> Result<Bytes, BlobStoreError>;

    /// A directly dereferenceable URL for the object at `path`.
    fn locator(&self, path: &str) -> Result<String, BlobStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum BlobStoreError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("download failed: {0}")]
    DownloadFailed(String),
    #[error("invalid locator: {0}")]
    InvalidLocator(String),
}

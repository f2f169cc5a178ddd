use std::path::Path;
use std::sync::Arc;

use object_store::local::LocalFileSystem;
use reqwest::Url;

use super::object_blob_store::ObjectBlobStore;
use crate::application::ports::BlobStoreError;

impl ObjectBlobStore {
    /// A directory on the local filesystem. Locators are `file://` URLs.
    pub fn local(base_path: &Path) -> Result<Self, BlobStoreError> {
        std::fs::create_dir_all(base_path)
            .map_err(|e| BlobStoreError::ConnectionFailed(e.to_string()))?;
        let base_path = base_path
            .canonicalize()
            .map_err(|e| BlobStoreError::ConnectionFailed(e.to_string()))?;

        let fs = LocalFileSystem::new_with_prefix(&base_path)
            .map_err(|e| BlobStoreError::ConnectionFailed(e.to_string()))?;
        let base_url = Url::from_directory_path(&base_path).map_err(|_| {
            BlobStoreError::InvalidLocator(base_path.display().to_string())
        })?;

        // LocalFileSystem rejects object attributes such as content type.
        Ok(ObjectBlobStore::new(Arc::new(fs), base_url.as_str())?.without_attributes())
    }
}

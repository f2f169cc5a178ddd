use std::sync::Arc;

use bytes::Bytes;
use futures::TryStreamExt;
use object_store::memory::InMemory;
use object_store::path::Path as StorePath;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};
use reqwest::Url;

use crate::application::ports::{BlobEntry, BlobStore, BlobStoreError};

/// Blob container backed by any `object_store` implementation.
pub struct ObjectBlobStore {
    inner: Arc<dyn ObjectStore>,
    base_url: Url,
    supports_attributes: bool,
}

impl ObjectBlobStore {
    pub fn new(inner: Arc<dyn ObjectStore>, base_url: &str) -> Result<Self, BlobStoreError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| BlobStoreError::InvalidLocator(format!("{base_url}: {e}")))?;
        Ok(Self {
            inner,
            base_url,
            supports_attributes: true,
        })
    }

    pub fn in_memory(base_url: &str) -> Result<Self, BlobStoreError> {
        Self::new(Arc::new(InMemory::new()), base_url)
    }

    pub(super) fn without_attributes(mut self) -> Self {
        self.supports_attributes = false;
        self
    }
}

#[async_trait::async_trait]
impl BlobStore for ObjectBlobStore {
    #[tracing::instrument(skip(self), fields(container = %self.base_url))]
    async fn list(&self) -> Result<Vec<BlobEntry>, BlobStoreError> {
        let metas: Vec<_> = self
            .inner
            .list(None)
            .try_collect()
            .await
            .map_err(|e| BlobStoreError::ConnectionFailed(e.to_string()))?;

        let entries: Vec<BlobEntry> = metas
            .into_iter()
            .map(|meta| BlobEntry {
                path: meta.location.to_string(),
            })
            .collect();

        tracing::debug!(count = entries.len(), "Listed container objects");
        Ok(entries)
    }

    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    async fn put(
        &self,
        path: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<(), BlobStoreError> {
        let store_path = StorePath::from(path);

        let mut options = PutOptions::default();
        if let (Some(ct), true) = (content_type, self.supports_attributes) {
            let mut attributes = Attributes::new();
            attributes.insert(Attribute::ContentType, ct.to_string().into());
            options.attributes = attributes;
        }

        self.inner
            .put_opts(&store_path, PutPayload::from(data), options)
            .await
            .map_err(|e| BlobStoreError::UploadFailed(e.to_string()))?;

        Ok(())
    }

    async fn fetch(&self, path: &str) -> Result<Bytes, BlobStoreError> {
        let store_path = StorePath::from(path);
        let result = self.inner.get(&store_path).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => BlobStoreError::NotFound(path.to_string()),
            other => BlobStoreError::DownloadFailed(other.to_string()),
        })?;

        result
            .bytes()
            .await
            .map_err(|e| BlobStoreError::DownloadFailed(e.to_string()))
    }

    fn locator(&self, path: &str) -> Result<String, BlobStoreError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BlobStoreError::InvalidLocator(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(path.split('/'));
        Ok(url.to_string())
    }
}

use std::collections::HashSet;
use std::sync::Arc;

use crate::application::ports::{BlobStore, BlobStoreError};
use crate::domain::SourceDocument;

/// Lists the source container as `{key, locator}` pairs.
pub struct BlobEnumerator {
    store: Arc<dyn BlobStore>,
}

impl BlobEnumerator {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<SourceDocument>, BlobStoreError> {
        let entries = self.store.list().await?;

        let mut seen = HashSet::new();
        let mut documents = Vec::with_capacity(entries.len());
        for entry in entries {
            let locator = self.store.locator(&entry.path)?;
            let document = SourceDocument::from_object_path(&entry.path, locator);
            if !seen.insert(document.key.clone()) {
                tracing::warn!(
                    key = %document.key,
                    path = %entry.path,
                    "Several objects map to the same document key"
                );
            }
            documents.push(document);
        }

        tracing::info!(count = documents.len(), "Source documents enumerated");
        Ok(documents)
    }
}

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use super::connection_string::StorageConnectionString;
use super::object_blob_store::ObjectBlobStore;
use crate::application::ports::{BlobStore, BlobStoreError};
use crate::presentation::config::{StorageProviderSetting, StorageSettings};

/// The two containers the service works with: source PDFs and synthesized audio.
#[derive(Clone)]
pub struct BlobContainers {
    pub sources: Arc<dyn BlobStore>,
    pub artifacts: Arc<dyn BlobStore>,
}

pub struct BlobStoreFactory;

impl BlobStoreFactory {
    pub fn create(
        settings: &StorageSettings,
        timeout: Duration,
    ) -> Result<BlobContainers, BlobStoreError> {
        let (sources, artifacts) = match settings.provider {
            StorageProviderSetting::Azure => {
                let source_conn = settings.source_connection_string.as_deref().ok_or_else(|| {
                    BlobStoreError::ConnectionFailed("source_connection_string required".into())
                })?;
                let artifact_conn = settings
                    .artifact_connection_string
                    .as_deref()
                    .ok_or_else(|| {
                        BlobStoreError::ConnectionFailed(
                            "artifact_connection_string required".into(),
                        )
                    })?;
                let sources = ObjectBlobStore::azure(
                    &StorageConnectionString::parse(source_conn)?,
                    &settings.source_container,
                    timeout,
                )?;
                let artifacts = ObjectBlobStore::azure(
                    &StorageConnectionString::parse(artifact_conn)?,
                    &settings.artifact_container,
                    timeout,
                )?;
                (sources, artifacts)
            }
            StorageProviderSetting::Local => {
                let base = PathBuf::from(&settings.local_path);
                let sources = ObjectBlobStore::local(&base.join(&settings.source_container))?;
                let artifacts = ObjectBlobStore::local(&base.join(&settings.artifact_container))?;
                (sources, artifacts)
            }
            StorageProviderSetting::Memory => {
                let sources =
                    ObjectBlobStore::in_memory(&format!("memory://{}", settings.source_container))?;
                let artifacts = ObjectBlobStore::in_memory(&format!(
                    "memory://{}",
                    settings.artifact_container
                ))?;
                (sources, artifacts)
            }
        };

        tracing::info!(
            provider = ?settings.provider,
            source_container = %settings.source_container,
            artifact_container = %settings.artifact_container,
            "Blob containers configured"
        );

        Ok(BlobContainers {
            sources: Arc::new(sources),
            artifacts: Arc::new(artifacts),
        })
    }
}

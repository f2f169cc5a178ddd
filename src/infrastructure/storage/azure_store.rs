use std::sync::Arc;
use std::time::Duration;

use object_store::ClientOptions;
use object_store::azure::MicrosoftAzureBuilder;

use super::connection_string::StorageConnectionString;
use super::object_blob_store::ObjectBlobStore;
use crate::application::ports::BlobStoreError;

impl ObjectBlobStore {
    pub fn azure(
        connection: &StorageConnectionString,
        container: &str,
        timeout: Duration,
    ) -> Result<Self, BlobStoreError> {
        let endpoint = connection.blob_endpoint();
        let client_options = ClientOptions::new()
            .with_timeout(timeout)
            .with_allow_http(endpoint.starts_with("http://"));

        let mut builder = MicrosoftAzureBuilder::new()
            .with_account(&connection.account_name)
            .with_access_key(&connection.account_key)
            .with_container_name(container)
            .with_client_options(client_options);

        if connection.blob_endpoint_override.is_some() {
            builder = builder.with_endpoint(endpoint.clone());
        }

        let store = builder
            .build()
            .map_err(|e| BlobStoreError::ConnectionFailed(e.to_string()))?;

        let base_url = format!("{}/{}", endpoint.trim_end_matches('/'), container);
        ObjectBlobStore::new(Arc::new(store), &base_url)
    }
}

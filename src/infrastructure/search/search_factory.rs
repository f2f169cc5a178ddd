use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{SearchIndex, SearchIndexError};
use crate::presentation::config::{SearchProviderSetting, SearchSettings};

use super::azure_search_adapter::AzureSearchAdapter;
use super::in_memory_search_index::InMemorySearchIndex;

pub struct SearchIndexFactory;

impl SearchIndexFactory {
    pub fn create(
        settings: &SearchSettings,
        timeout: Duration,
    ) -> Result<Arc<dyn SearchIndex>, SearchIndexError> {
        match settings.provider {
            SearchProviderSetting::Azure => {
                let endpoint = settings.endpoint.as_deref().ok_or_else(|| {
                    SearchIndexError::ConnectionFailed("search.endpoint required".into())
                })?;
                let key = settings.api_key.as_deref().ok_or_else(|| {
                    SearchIndexError::ConnectionFailed("search.api_key required".into())
                })?;
                tracing::info!(endpoint, index = %settings.index_name, "Using Azure AI Search");
                Ok(Arc::new(AzureSearchAdapter::new(endpoint, key, timeout)?))
            }
            SearchProviderSetting::Memory => {
                tracing::info!(index = %settings.index_name, "Using in-memory search index");
                Ok(Arc::new(InMemorySearchIndex::new()))
            }
        }
    }
}

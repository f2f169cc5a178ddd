use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{AnalysisError, DocumentTextExtractor};
use crate::presentation::config::DocumentIntelligenceSettings;

use super::azure_doc_intel_adapter::AzureDocIntelAdapter;

pub struct ExtractorFactory;

impl ExtractorFactory {
    pub fn create(
        settings: &DocumentIntelligenceSettings,
        request_timeout: Duration,
        analysis_timeout: Duration,
    ) -> Result<Arc<dyn DocumentTextExtractor>, AnalysisError> {
        let endpoint = settings.endpoint.as_deref().ok_or_else(|| {
            AnalysisError::ConnectionFailed("document_intelligence.endpoint required".into())
        })?;
        let key = settings.api_key.as_deref().ok_or_else(|| {
            AnalysisError::ConnectionFailed("document_intelligence.api_key required".into())
        })?;

        tracing::info!(model = %settings.model_id, "Loading Azure Document Intelligence extractor");
        let adapter = AzureDocIntelAdapter::with_timeouts(
            endpoint,
            key,
            &settings.model_id,
            request_timeout,
            analysis_timeout,
        )?;
        Ok(Arc::new(adapter))
    }
}

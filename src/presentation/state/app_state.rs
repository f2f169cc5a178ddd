use std::sync::Arc;

use crate::application::ports::{AnalysisError, BlobStoreError, SearchIndexError, SpeechError};
use crate::application::services::{IndexRefreshService, KeywordLookup, NarrationService};
use crate::domain::IndexName;
use crate::infrastructure::document_analysis::ExtractorFactory;
use crate::infrastructure::search::SearchIndexFactory;
use crate::infrastructure::speech::SynthesizerFactory;
use crate::infrastructure::storage::BlobStoreFactory;
use crate::presentation::config::{ConfigurationError, Settings};
use crate::presentation::pages::Pages;

#[derive(Clone)]
pub struct AppState {
    pub refresh_service: Arc<IndexRefreshService>,
    pub narration_service: Arc<NarrationService>,
    pub pages: Arc<Pages>,
    pub access_code: Arc<str>,
}

impl AppState {
    /// Validates the settings and wires every adapter and service.
    pub fn from_settings(settings: &Settings) -> Result<Self, StartupError> {
        settings.validate()?;

        let timeouts = &settings.timeouts;
        let containers = BlobStoreFactory::create(&settings.storage, timeouts.storage())?;
        let search_index = SearchIndexFactory::create(&settings.search, timeouts.request())?;
        let extractor = ExtractorFactory::create(
            &settings.document_intelligence,
            timeouts.request(),
            timeouts.analysis(),
        )?;
        let synthesizer = SynthesizerFactory::create(&settings.speech, timeouts.request())?;

        let index_name = IndexName::new(&settings.search.index_name);
        let refresh_service = Arc::new(IndexRefreshService::new(
            Arc::clone(&containers.sources),
            extractor,
            Arc::clone(&search_index),
            index_name.clone(),
        ));
        let lookup = Arc::new(KeywordLookup::new(
            search_index,
            index_name,
            timeouts.lookup(),
        ));
        let narration_service = Arc::new(NarrationService::new(
            lookup,
            synthesizer,
            containers.artifacts,
        ));

        let access_code: Arc<str> = settings
            .access
            .function_code
            .as_deref()
            .unwrap_or_default()
            .trim()
            .into();

        Ok(Self {
            refresh_service,
            narration_service,
            pages: Arc::new(Pages::new()?),
            access_code,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("blob storage: {0}")]
    Storage(#[from] BlobStoreError),
    #[error("search: {0}")]
    Search(#[from] SearchIndexError),
    #[error("document analysis: {0}")]
    Analysis(#[from] AnalysisError),
    #[error("speech: {0}")]
    Speech(#[from] SpeechError),
    #[error("templates: {0}")]
    Templates(#[from] handlebars::TemplateError),
}

use std::sync::Arc;

use serde::Serialize;

use super::KeywordLookup;
use crate::application::ports::{
    BlobStore, BlobStoreError, SearchIndexError, SpeechError, SpeechSynthesizer,
};
use crate::domain::{IndexRecord, SpeechArtifact};

pub const ARTIFACT_CONTENT_TYPE: &str = "audio/wav";

#[derive(Debug, Clone, Serialize)]
pub struct Narration {
    pub record: IndexRecord,
    pub filename: String,
    pub locator: String,
    pub audio_bytes: usize,
}

/// Keyword in, stored audio locator out: lookup, synthesize, upload.
///
/// Artifacts are not cached. Each call re-synthesizes and overwrites
/// `<key>.wav`; concurrent requests for the same key are last-write-wins.
pub struct NarrationService {
    lookup: Arc<KeywordLookup>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    artifacts: Arc<dyn BlobStore>,
}

impl NarrationService {
    pub fn new(
        lookup: Arc<KeywordLookup>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        artifacts: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            lookup,
            synthesizer,
            artifacts,
        }
    }

    pub fn lookup(&self) -> &KeywordLookup {
        &self.lookup
    }

    #[tracing::instrument(skip(self, keyword))]
    pub async fn narrate(&self, keyword: &str) -> Result<Option<Narration>, NarrationError> {
        let Some(record) = self.lookup.lookup(keyword).await? else {
            return Ok(None);
        };

        let audio = self.synthesizer.synthesize(&record.information).await?;
        let artifact = SpeechArtifact::for_key(&record.name, audio);
        let audio_bytes = artifact.audio.len();

        self.artifacts
            .put(
                &artifact.filename,
                artifact.audio,
                Some(ARTIFACT_CONTENT_TYPE),
            )
            .await?;
        let locator = self.artifacts.locator(&artifact.filename)?;

        tracing::info!(
            key = %record.name,
            filename = %artifact.filename,
            audio_bytes,
            "Narration stored"
        );

        Ok(Some(Narration {
            record,
            filename: artifact.filename,
            locator,
            audio_bytes,
        }))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NarrationError {
    #[error("lookup: {0}")]
    Lookup(#[from] SearchIndexError),
    #[error("synthesis: {0}")]
    Synthesis(#[from] SpeechError),
    #[error("storage: {0}")]
    Storage(#[from] BlobStoreError),
}

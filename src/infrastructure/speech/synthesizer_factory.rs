use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{SpeechError, SpeechSynthesizer};
use crate::presentation::config::SpeechSettings;

use super::azure_speech_adapter::AzureSpeechAdapter;

pub struct SynthesizerFactory;

impl SynthesizerFactory {
    pub fn create(
        settings: &SpeechSettings,
        timeout: Duration,
    ) -> Result<Arc<dyn SpeechSynthesizer>, SpeechError> {
        let key = settings
            .api_key
            .as_deref()
            .ok_or_else(|| SpeechError::ConnectionFailed("speech.api_key required".into()))?;
        let region = settings
            .region
            .as_deref()
            .ok_or_else(|| SpeechError::ConnectionFailed("speech.region required".into()))?;

        tracing::info!(region, voice = %settings.voice, "Using Azure Speech synthesizer");
        let adapter = AzureSpeechAdapter::new(key, region, &settings.voice, timeout)?
            .with_output_format(&settings.output_format);
        Ok(Arc::new(adapter))
    }
}

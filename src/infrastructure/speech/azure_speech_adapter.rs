use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode};

use crate::application::ports::{SpeechError, SpeechSynthesizer};

pub const DEFAULT_VOICE: &str = "en-AU-WilliamNeural";
pub const DEFAULT_OUTPUT_FORMAT: &str = "riff-24khz-16bit-mono-pcm";
const USER_AGENT: &str = concat!("docspeak/", env!("CARGO_PKG_VERSION"));

/// Azure Speech text-to-speech over the REST endpoint.
pub struct AzureSpeechAdapter {
    client: Client,
    endpoint: String,
    api_key: String,
    voice: String,
    output_format: String,
}

impl AzureSpeechAdapter {
    pub fn new(
        api_key: &str,
        region: &str,
        voice: &str,
        timeout: Duration,
    ) -> Result<Self, SpeechError> {
        let base_url = format!("https://{region}.tts.speech.microsoft.com");
        Self::with_base_url(&base_url, api_key, voice, timeout)
    }

    pub fn with_base_url(
        base_url: &str,
        api_key: &str,
        voice: &str,
        timeout: Duration,
    ) -> Result<Self, SpeechError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SpeechError::ConnectionFailed(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: format!("{}/cognitiveservices/v1", base_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
            voice: voice.to_string(),
            output_format: DEFAULT_OUTPUT_FORMAT.to_string(),
        })
    }

    pub fn with_output_format(mut self, output_format: &str) -> Self {
        self.output_format = output_format.to_string();
        self
    }
}

/// Wraps `text` in an SSML document for `voice`.
pub fn ssml_for(text: &str, voice: &str) -> String {
    // en-AU-WilliamNeural speaks en-AU
    let lang = voice.splitn(3, '-').take(2).collect::<Vec<_>>().join("-");
    format!(
        "<speak version='1.0' xml:lang='{}'><voice name='{}'>{}</voice></speak>",
        escape_xml(&lang),
        escape_xml(voice),
        escape_xml(text)
    )
}

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[async_trait]
impl SpeechSynthesizer for AzureSpeechAdapter {
    #[tracing::instrument(skip(self, text), fields(voice = %self.voice, chars = text.len()))]
    async fn synthesize(&self, text: &str) -> Result<Bytes, SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }

        let response = self
            .client
            .post(&self.endpoint)
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .header("Content-Type", "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", &self.output_format)
            .body(ssml_for(text, &self.voice))
            .send()
            .await
            .map_err(|e| SpeechError::ConnectionFailed(format!("request: {e}")))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SpeechError::ConnectionFailed(format!(
                "speech service rejected credentials ({status})"
            )));
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(SpeechError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SpeechError::ApiRequestFailed(format!("read audio: {e}")))?;

        if audio.is_empty() {
            return Err(SpeechError::EmptyAudio);
        }

        tracing::info!(bytes = audio.len(), "Speech synthesized");
        Ok(audio)
    }
}

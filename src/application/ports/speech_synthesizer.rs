use async_trait::async_trait;
use bytes::Bytes;

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<Bytes, SpeechError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("synthesis returned no audio")]
    EmptyAudio,
    #[error("nothing to synthesize")]
    EmptyText,
}

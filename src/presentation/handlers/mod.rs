mod health;
mod refresh;
mod tts;

use serde::Serialize;

pub use health::health_handler;
pub use refresh::{refresh_handler, refresh_status_handler};
pub use tts::{TTS_ROUTE, TtsBody, TtsParams, tts_trigger_handler};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

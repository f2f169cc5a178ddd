mod azure_speech_adapter;
mod synthesizer_factory;

pub use azure_speech_adapter::{AzureSpeechAdapter, DEFAULT_OUTPUT_FORMAT, DEFAULT_VOICE, ssml_for};
pub use synthesizer_factory::SynthesizerFactory;

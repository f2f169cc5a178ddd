use bytes::Bytes;

pub const ARTIFACT_EXTENSION: &str = "wav";

/// Synthesized audio for one matched index record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechArtifact {
    pub filename: String,
    pub audio: Bytes,
}

impl SpeechArtifact {
    /// The filename is derived from the record key, so repeated requests for
    /// the same key target the same object.
    pub fn for_key(key: &str, audio: Bytes) -> Self {
        Self {
            filename: Self::filename_for(key),
            audio,
        }
    }

    pub fn filename_for(key: &str) -> String {
        format!("{key}.{ARTIFACT_EXTENSION}")
    }
}

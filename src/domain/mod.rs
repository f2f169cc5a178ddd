mod index_schema;
mod record;
mod refresh_stage;
mod source_document;
mod speech_artifact;

pub use index_schema::{CorsOptions, IndexField, IndexName, IndexSchema, KEY_FIELD, TEXT_FIELD};
pub use record::{ExtractedRecord, IndexRecord};
pub use refresh_stage::RefreshStage;
pub use source_document::{SOURCE_SUFFIX, SourceDocument};
pub use speech_artifact::{ARTIFACT_EXTENSION, SpeechArtifact};

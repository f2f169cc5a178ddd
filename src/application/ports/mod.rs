mod blob_store;
mod document_text_extractor;
mod search_index;
mod search_index_error;
mod speech_synthesizer;
mod upload_report;

pub use blob_store::{BlobEntry, BlobStore, BlobStoreError};
pub use document_text_extractor::{AnalysisError, DocumentTextExtractor};
pub use search_index::{SearchHit, SearchIndex, SearchQuery};
pub use search_index_error::SearchIndexError;
pub use speech_synthesizer::{SpeechError, SpeechSynthesizer};
pub use upload_report::{UploadOutcome, UploadReport};

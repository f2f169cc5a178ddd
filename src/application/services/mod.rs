mod blob_enumerator;
mod index_builder;
mod index_populator;
mod index_refresh_service;
mod keyword_lookup;
mod narration_service;

pub use blob_enumerator::BlobEnumerator;
pub use index_builder::IndexBuilder;
pub use index_populator::IndexPopulator;
pub use index_refresh_service::{
    IndexRefreshService, RefreshError, RefreshStatus, RefreshSummary,
};
pub use keyword_lookup::KeywordLookup;
pub use narration_service::{ARTIFACT_CONTENT_TYPE, Narration, NarrationError, NarrationService};

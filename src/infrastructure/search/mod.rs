mod azure_search_adapter;
mod in_memory_search_index;
mod search_factory;

pub use azure_search_adapter::{API_VERSION, AzureSearchAdapter};
pub use in_memory_search_index::InMemorySearchIndex;
pub use search_factory::SearchIndexFactory;

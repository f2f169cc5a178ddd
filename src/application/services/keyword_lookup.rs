use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{SearchIndex, SearchIndexError, SearchQuery};
use crate::domain::{IndexName, IndexRecord, KEY_FIELD};

const MAX_LISTED_ENTRIES: usize = 1000;

/// Free-text lookup returning only the best-ranked record.
pub struct KeywordLookup {
    index: Arc<dyn SearchIndex>,
    index_name: IndexName,
    timeout: Duration,
}

impl KeywordLookup {
    pub fn new(index: Arc<dyn SearchIndex>, index_name: IndexName, timeout: Duration) -> Self {
        Self {
            index,
            index_name,
            timeout,
        }
    }

    /// `None` when nothing matches, when the index is missing (for example in
    /// the middle of a refresh) or when the search times out.
    #[tracing::instrument(skip(self, keyword), fields(index = %self.index_name))]
    pub async fn lookup(&self, keyword: &str) -> Result<Option<IndexRecord>, SearchIndexError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(None);
        }

        let query = SearchQuery::new(keyword).top(1);
        let search = self.index.search(&self.index_name, &query);

        match tokio::time::timeout(self.timeout, search).await {
            Err(_) => {
                tracing::warn!(
                    keyword_len = keyword.len(),
                    timeout_secs = self.timeout.as_secs(),
                    "Keyword lookup timed out"
                );
                Ok(None)
            }
            Ok(Err(SearchIndexError::IndexNotFound(_))) => {
                tracing::warn!("Keyword lookup against a missing index");
                Ok(None)
            }
            Ok(Err(e)) => Err(e),
            Ok(Ok(hits)) => {
                let best = hits.into_iter().next().map(|hit| hit.record);
                tracing::debug!(
                    keyword_len = keyword.len(),
                    matched = best.as_ref().map(|r| r.name.as_str()).unwrap_or("<none>"),
                    "Keyword lookup finished"
                );
                Ok(best)
            }
        }
    }

    /// Names of every record in the index, for display.
    pub async fn entry_names(&self) -> Result<Vec<String>, SearchIndexError> {
        let query = SearchQuery::all()
            .in_field(KEY_FIELD)
            .top(MAX_LISTED_ENTRIES);

        match self.index.search(&self.index_name, &query).await {
            Ok(hits) => Ok(hits
                .into_iter()
                .map(|hit| hit.record.name.replace('_', " "))
                .collect()),
            Err(SearchIndexError::IndexNotFound(_)) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }
}

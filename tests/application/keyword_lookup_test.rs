use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use docspeak::application::ports::{
    SearchHit, SearchIndex, SearchIndexError, SearchQuery, UploadReport,
};
use docspeak::application::services::KeywordLookup;
use docspeak::domain::{IndexName, IndexRecord, IndexSchema};
use docspeak::infrastructure::search::InMemorySearchIndex;

use crate::helpers::{TEST_INDEX, pipeline};

async fn refreshed_lookup() -> (crate::helpers::Pipeline, KeywordLookup) {
    let pipeline = pipeline().await;
    pipeline.refresh.refresh().await.unwrap();
    let lookup = KeywordLookup::new(
        pipeline.index.clone(),
        IndexName::new(TEST_INDEX),
        Duration::from_secs(5),
    );
    (pipeline, lookup)
}

#[tokio::test]
async fn given_matching_keyword_when_looking_up_then_returns_best_record() {
    let (_pipeline, lookup) = refreshed_lookup().await;

    let record = lookup.lookup("Gothic").await.unwrap().unwrap();

    assert_eq!(record.name, "Gothic Architecture");
    assert!(record.information.contains("flying buttresses"));
}

#[tokio::test]
async fn given_unknown_keyword_when_looking_up_then_returns_none() {
    let (_pipeline, lookup) = refreshed_lookup().await;

    let record = lookup.lookup("Nonexistent Term").await.unwrap();

    assert!(record.is_none());
}

#[tokio::test]
async fn given_blank_keyword_when_looking_up_then_returns_none_without_searching() {
    let (_pipeline, lookup) = refreshed_lookup().await;

    assert!(lookup.lookup("   ").await.unwrap().is_none());
}

#[tokio::test]
async fn given_missing_index_when_looking_up_then_returns_none() {
    let lookup = KeywordLookup::new(
        Arc::new(InMemorySearchIndex::new()),
        IndexName::new(TEST_INDEX),
        Duration::from_secs(5),
    );

    assert!(lookup.lookup("Gothic").await.unwrap().is_none());
}

#[tokio::test]
async fn given_refreshed_index_when_listing_entries_then_returns_every_name() {
    let (_pipeline, lookup) = refreshed_lookup().await;

    let mut entries = lookup.entry_names().await.unwrap();
    entries.sort();

    assert_eq!(
        entries,
        vec!["Doric Order", "Gothic Architecture", "Roman Arches"]
    );
}

#[tokio::test]
async fn given_underscored_names_when_listing_entries_then_underscores_become_spaces() {
    let index = Arc::new(InMemorySearchIndex::new());
    let name = IndexName::new(TEST_INDEX);
    index
        .create_index(&IndexSchema::for_index(&name))
        .await
        .unwrap();
    index
        .upload(&name, &[IndexRecord::new("Flying_Buttress", "Support")])
        .await
        .unwrap();
    let lookup = KeywordLookup::new(index, name, Duration::from_secs(5));

    assert_eq!(lookup.entry_names().await.unwrap(), vec!["Flying Buttress"]);
}

#[tokio::test]
async fn given_missing_index_when_listing_entries_then_returns_empty() {
    let lookup = KeywordLookup::new(
        Arc::new(InMemorySearchIndex::new()),
        IndexName::new(TEST_INDEX),
        Duration::from_secs(5),
    );

    assert!(lookup.entry_names().await.unwrap().is_empty());
}

struct StalledIndex;

#[async_trait]
impl SearchIndex for StalledIndex {
    async fn index_exists(&self, _index: &IndexName) -> Result<bool, SearchIndexError> {
        Ok(true)
    }

    async fn delete_index(&self, _index: &IndexName) -> Result<(), SearchIndexError> {
        Ok(())
    }

    async fn create_index(&self, _schema: &IndexSchema) -> Result<(), SearchIndexError> {
        Ok(())
    }

    async fn upload(
        &self,
        _index: &IndexName,
        _records: &[IndexRecord],
    ) -> Result<UploadReport, SearchIndexError> {
        Ok(UploadReport::default())
    }

    async fn search(
        &self,
        _index: &IndexName,
        _query: &SearchQuery,
    ) -> Result<Vec<SearchHit>, SearchIndexError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn given_search_slower_than_timeout_when_looking_up_then_returns_none() {
    let lookup = KeywordLookup::new(
        Arc::new(StalledIndex),
        IndexName::new(TEST_INDEX),
        Duration::from_millis(50),
    );

    assert!(lookup.lookup("Gothic").await.unwrap().is_none());
}

struct FailingIndex;

#[async_trait]
impl SearchIndex for FailingIndex {
    async fn index_exists(&self, _index: &IndexName) -> Result<bool, SearchIndexError> {
        Err(SearchIndexError::ConnectionFailed("refused".into()))
    }

    async fn delete_index(&self, _index: &IndexName) -> Result<(), SearchIndexError> {
        Err(SearchIndexError::ConnectionFailed("refused".into()))
    }

    async fn create_index(&self, _schema: &IndexSchema) -> Result<(), SearchIndexError> {
        Err(SearchIndexError::ConnectionFailed("refused".into()))
    }

    async fn upload(
        &self,
        _index: &IndexName,
        _records: &[IndexRecord],
    ) -> Result<UploadReport, SearchIndexError> {
        Err(SearchIndexError::ConnectionFailed("refused".into()))
    }

    async fn search(
        &self,
        _index: &IndexName,
        _query: &SearchQuery,
    ) -> Result<Vec<SearchHit>, SearchIndexError> {
        Err(SearchIndexError::ConnectionFailed("refused".into()))
    }
}

#[tokio::test]
async fn given_unreachable_search_service_when_looking_up_then_error_is_propagated() {
    let lookup = KeywordLookup::new(
        Arc::new(FailingIndex),
        IndexName::new(TEST_INDEX),
        Duration::from_secs(5),
    );

    let result = lookup.lookup("Gothic").await;

    assert!(matches!(result, Err(SearchIndexError::ConnectionFailed(_))));
}

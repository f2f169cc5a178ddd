use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{
    SearchHit, SearchIndex, SearchIndexError, SearchQuery, UploadOutcome, UploadReport,
};
use crate::domain::{IndexName, IndexRecord, IndexSchema, KEY_FIELD, TEXT_FIELD};

const KEY_FIELD_WEIGHT: f32 = 2.0;

/// Process-local search index for development and tests.
///
/// Ranking counts whole-word query term matches, weighting the key field
/// above the free-text field.
#[derive(Default)]
pub struct InMemorySearchIndex {
    indexes: RwLock<HashMap<String, BTreeMap<String, IndexRecord>>>,
}

impl InMemorySearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record_count(&self, index: &IndexName) -> Option<usize> {
        self.indexes
            .read()
            .await
            .get(index.as_str())
            .map(|records| records.len())
    }
}

fn terms(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn count_matches(query_terms: &[String], field: &str) -> f32 {
    let field_terms = terms(field);
    query_terms
        .iter()
        .map(|q| field_terms.iter().filter(|t| *t == q).count())
        .sum::<usize>() as f32
}

fn score(record: &IndexRecord, query_terms: &[String], fields: &[String]) -> f32 {
    let searches = |name: &str| fields.is_empty() || fields.iter().any(|f| f == name);

    let mut score = 0.0;
    if searches(KEY_FIELD) {
        score += KEY_FIELD_WEIGHT * count_matches(query_terms, &record.name);
    }
    if searches(TEXT_FIELD) {
        score += count_matches(query_terms, &record.information);
    }
    score
}

#[async_trait]
impl SearchIndex for InMemorySearchIndex {
    async fn index_exists(&self, index: &IndexName) -> Result<bool, SearchIndexError> {
        Ok(self.indexes.read().await.contains_key(index.as_str()))
    }

    async fn delete_index(&self, index: &IndexName) -> Result<(), SearchIndexError> {
        self.indexes
            .write()
            .await
            .remove(index.as_str())
            .map(|_| ())
            .ok_or_else(|| SearchIndexError::IndexNotFound(index.to_string()))
    }

    async fn create_index(&self, schema: &IndexSchema) -> Result<(), SearchIndexError> {
        let mut indexes = self.indexes.write().await;
        if indexes.contains_key(&schema.name) {
            return Err(SearchIndexError::IndexCreationFailed(format!(
                "index '{}' already exists",
                schema.name
            )));
        }
        indexes.insert(schema.name.clone(), BTreeMap::new());
        Ok(())
    }

    async fn upload(
        &self,
        index: &IndexName,
        records: &[IndexRecord],
    ) -> Result<UploadReport, SearchIndexError> {
        let mut indexes = self.indexes.write().await;
        let stored = indexes
            .get_mut(index.as_str())
            .ok_or_else(|| SearchIndexError::IndexNotFound(index.to_string()))?;

        let mut seen = HashSet::new();
        let outcomes = records
            .iter()
            .map(|record| {
                if record.name.trim().is_empty() {
                    return UploadOutcome::rejected(&record.name, 400, "document key is empty");
                }
                if !seen.insert(record.name.as_str()) {
                    return UploadOutcome::rejected(
                        &record.name,
                        400,
                        "document key appears more than once in the batch",
                    );
                }
                let status = match stored.insert(record.name.clone(), record.clone()) {
                    Some(_) => 200,
                    None => 201,
                };
                UploadOutcome::accepted(&record.name, status)
            })
            .collect();

        Ok(UploadReport::new(outcomes))
    }

    async fn search(
        &self,
        index: &IndexName,
        query: &SearchQuery,
    ) -> Result<Vec<SearchHit>, SearchIndexError> {
        let indexes = self.indexes.read().await;
        let stored = indexes
            .get(index.as_str())
            .ok_or_else(|| SearchIndexError::IndexNotFound(index.to_string()))?;

        let mut hits: Vec<SearchHit> = if query.is_match_all() {
            stored
                .values()
                .map(|record| SearchHit {
                    record: record.clone(),
                    score: 1.0,
                })
                .collect()
        } else {
            let query_terms = terms(&query.text);
            stored
                .values()
                .filter_map(|record| {
                    let score = score(record, &query_terms, &query.search_fields);
                    (score > 0.0).then(|| SearchHit {
                        record: record.clone(),
                        score,
                    })
                })
                .collect()
        };

        // BTreeMap iteration already orders ties by key
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        if let Some(top) = query.top {
            hits.truncate(top);
        }
        Ok(hits)
    }
}

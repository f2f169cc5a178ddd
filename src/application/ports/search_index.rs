use async_trait::async_trait;

use super::{SearchIndexError, UploadReport};
use crate::domain::{IndexName, IndexRecord, IndexSchema};

#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub text: String,
    pub top: Option<usize>,
    pub search_fields: Vec<String>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            top: None,
            search_fields: Vec::new(),
        }
    }

    /// Matches every record.
    pub fn all() -> Self {
        Self::new("*")
    }

    pub fn top(mut self, top: usize) -> Self {
        self.top = Some(top);
        self
    }

    pub fn in_field(mut self, field: impl Into<String>) -> Self {
        self.search_fields.push(field.into());
        self
    }

    pub fn is_match_all(&self) -> bool {
        self.text.trim() == "*"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub record: IndexRecord,
    pub score: f32,
}

#[async_trait]
pub trait SearchIndex: Send + Sync {
    async fn index_exists(&self, index: &IndexName) -> Result<bool, SearchIndexError>;

    async fn delete_index(&self, index: &IndexName) -> Result<(), SearchIndexError>;

    async fn create_index(&self, schema: &IndexSchema) -> Result<(), SearchIndexError>;

    /// Uploads a batch. Rejections of individual records are reported in the
    /// returned report, not as an error.
    async fn upload(
        &self,
        index: &IndexName,
        records: &[IndexRecord],
    ) -> Result<UploadReport, SearchIndexError>;

    /// Hits ordered best first.
    async fn search(
        &self,
        index: &IndexName,
        query: &SearchQuery,
    ) -> Result<Vec<SearchHit>, SearchIndexError>;
}

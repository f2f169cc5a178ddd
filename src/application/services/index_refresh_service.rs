use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, watch};

use super::{BlobEnumerator, IndexBuilder, IndexPopulator};
use crate::application::ports::{
    AnalysisError, BlobStore, BlobStoreError, DocumentTextExtractor, SearchIndex,
    SearchIndexError, UploadReport,
};
use crate::domain::{ExtractedRecord, IndexName, IndexRecord, RefreshStage};

/// Snapshot of the most recent refresh run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefreshStatus {
    pub stage: RefreshStage,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub documents: usize,
    pub error: Option<String>,
}

impl RefreshStatus {
    fn idle() -> Self {
        Self {
            stage: RefreshStage::Idle,
            started_at: None,
            finished_at: None,
            documents: 0,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshSummary {
    pub index: String,
    pub documents: usize,
    pub report: UploadReport,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Rebuilds the search index from the documents in the source container.
///
/// Runs are fail-fast and strictly sequential: enumerate, extract every
/// document, drop and recreate the index, upload all records in one batch.
/// Only one run may be in flight; the index is not touched until every
/// document has been extracted.
pub struct IndexRefreshService {
    enumerator: BlobEnumerator,
    extractor: Arc<dyn DocumentTextExtractor>,
    builder: IndexBuilder,
    populator: IndexPopulator,
    index_name: IndexName,
    run_lock: Mutex<()>,
    status: watch::Sender<RefreshStatus>,
}

impl IndexRefreshService {
    pub fn new(
        sources: Arc<dyn BlobStore>,
        extractor: Arc<dyn DocumentTextExtractor>,
        index: Arc<dyn SearchIndex>,
        index_name: IndexName,
    ) -> Self {
        let (status, _) = watch::channel(RefreshStatus::idle());
        Self {
            enumerator: BlobEnumerator::new(sources),
            extractor,
            builder: IndexBuilder::new(Arc::clone(&index)),
            populator: IndexPopulator::new(index),
            index_name,
            run_lock: Mutex::new(()),
            status,
        }
    }

    pub fn index_name(&self) -> &IndexName {
        &self.index_name
    }

    pub fn status(&self) -> RefreshStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RefreshStatus> {
        self.status.subscribe()
    }

    #[tracing::instrument(skip(self), fields(index = %self.index_name))]
    pub async fn refresh(&self) -> Result<RefreshSummary, RefreshError> {
        let _run = self.run_lock.try_lock().map_err(|_| {
            tracing::warn!("Refresh requested while another run is in progress");
            RefreshError::AlreadyRunning
        })?;

        let started_at = Utc::now();
        self.status.send_replace(RefreshStatus {
            stage: RefreshStage::Idle,
            started_at: Some(started_at),
            finished_at: None,
            documents: 0,
            error: None,
        });

        let result = self.run(started_at).await;
        let finished_at = Utc::now();

        match &result {
            Ok(summary) => {
                self.status.send_modify(|s| {
                    s.stage = RefreshStage::Done;
                    s.finished_at = Some(finished_at);
                    s.documents = summary.documents;
                });
                tracing::info!(
                    documents = summary.documents,
                    elapsed_ms = (finished_at - started_at).num_milliseconds(),
                    "Index refresh completed"
                );
            }
            Err(e) => {
                let failed_in = self.status.borrow().stage;
                if failed_in.touches_index() {
                    tracing::error!(
                        error = %e,
                        stage = %failed_in,
                        "Index refresh failed after the old index was dropped; \
                         index stays empty or partial until the next successful run"
                    );
                } else {
                    tracing::error!(error = %e, stage = %failed_in, "Index refresh failed");
                }
                self.status.send_modify(|s| {
                    s.stage = RefreshStage::Failed;
                    s.finished_at = Some(finished_at);
                    s.error = Some(e.to_string());
                });
            }
        }

        result
    }

    async fn run(&self, started_at: DateTime<Utc>) -> Result<RefreshSummary, RefreshError> {
        self.enter(RefreshStage::Enumerating);
        let documents = self
            .enumerator
            .list()
            .await
            .map_err(RefreshError::Enumeration)?;
        self.status.send_modify(|s| s.documents = documents.len());

        self.enter(RefreshStage::Extracting);
        let mut extracted = Vec::with_capacity(documents.len());
        for document in documents {
            tracing::debug!(key = %document.key, "Extracting document text");
            let text = self
                .extractor
                .extract(&document.locator)
                .await
                .map_err(|source| RefreshError::Extraction {
                    key: document.key.clone(),
                    source,
                })?;
            extracted.push(ExtractedRecord::new(document.key, text));
        }

        self.enter(RefreshStage::Rebuilding);
        self.builder
            .rebuild(&self.index_name)
            .await
            .map_err(RefreshError::Rebuild)?;

        self.enter(RefreshStage::Populating);
        let records: Vec<IndexRecord> = extracted.into_iter().map(IndexRecord::from).collect();
        let report = self
            .populator
            .upsert(&self.index_name, &records)
            .await
            .map_err(RefreshError::Population)?;

        if !report.all_succeeded() {
            return Err(RefreshError::PartialUpload {
                rejected: report.len() - report.succeeded_count(),
                total: report.len(),
                report,
            });
        }

        Ok(RefreshSummary {
            index: self.index_name.to_string(),
            documents: records.len(),
            report,
            started_at,
            finished_at: Utc::now(),
        })
    }

    fn enter(&self, stage: RefreshStage) {
        tracing::info!(stage = %stage, "Refresh stage");
        self.status.send_modify(|s| s.stage = stage);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("a refresh is already running")]
    AlreadyRunning,
    #[error("enumeration: {0}")]
    Enumeration(BlobStoreError),
    #[error("extraction of '{key}': {source}")]
    Extraction { key: String, source: AnalysisError },
    #[error("rebuild: {0}")]
    Rebuild(SearchIndexError),
    #[error("population: {0}")]
    Population(SearchIndexError),
    #[error("{rejected} of {total} records were rejected by the index")]
    PartialUpload {
        rejected: usize,
        total: usize,
        report: UploadReport,
    },
}

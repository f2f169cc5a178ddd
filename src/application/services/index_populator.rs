use std::sync::Arc;

use crate::application::ports::{SearchIndex, SearchIndexError, UploadReport};
use crate::domain::{IndexName, IndexRecord};

/// Uploads records in one batch and reports the status of each.
pub struct IndexPopulator {
    index: Arc<dyn SearchIndex>,
}

impl IndexPopulator {
    pub fn new(index: Arc<dyn SearchIndex>) -> Self {
        Self { index }
    }

    #[tracing::instrument(skip(self, records), fields(index = %name, records = records.len()))]
    pub async fn upsert(
        &self,
        name: &IndexName,
        records: &[IndexRecord],
    ) -> Result<UploadReport, SearchIndexError> {
        let report = self.index.upload(name, records).await?;

        for failure in report.failures() {
            tracing::warn!(
                key = %failure.key,
                status_code = failure.status_code,
                error = failure.error_message.as_deref().unwrap_or("unknown"),
                "Record rejected by index"
            );
        }

        tracing::info!(
            accepted = report.succeeded_count(),
            rejected = report.len() - report.succeeded_count(),
            "Index upload finished"
        );
        Ok(report)
    }
}

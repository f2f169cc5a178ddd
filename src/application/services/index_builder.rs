use std::sync::Arc;

use crate::application::ports::{SearchIndex, SearchIndexError};
use crate::domain::{IndexName, IndexSchema};

/// Drops and recreates an index with the fixed schema.
pub struct IndexBuilder {
    index: Arc<dyn SearchIndex>,
}

impl IndexBuilder {
    pub fn new(index: Arc<dyn SearchIndex>) -> Self {
        Self { index }
    }

    #[tracing::instrument(skip(self), fields(index = %name))]
    pub async fn rebuild(&self, name: &IndexName) -> Result<(), SearchIndexError> {
        if self.index.index_exists(name).await? {
            tracing::info!("Index already exists, deleting old generation");
            match self.index.delete_index(name).await {
                // deleted concurrently between the check and the delete
                Ok(()) | Err(SearchIndexError::IndexNotFound(_)) => {}
                Err(e) => return Err(e),
            }
        }

        self.index.create_index(&IndexSchema::for_index(name)).await?;
        tracing::info!("Index created");
        Ok(())
    }
}

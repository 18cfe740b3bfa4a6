//! Storage trait for persisted knowledge records.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::Result;
use crate::types::record::StoredRecord;
use crate::types::result::ExtractionResult;

/// Store for uniquely-identified knowledge records.
///
/// The store exclusively owns identifier assignment: ids start at 1, are
/// assigned under atomic increment, and are never reused within one store
/// instance, not even when the write that followed the assignment failed.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist one result, assigning the next identifier.
    ///
    /// A write failure is reported as [`crate::KnowledgeError::Storage`]
    /// but does not roll back the identifier.
    async fn save(&self, result: &ExtractionResult) -> Result<StoredRecord>;

    /// Persist a batch of results, returning the count saved.
    ///
    /// A failure on one element is logged and does not stop the rest.
    async fn save_batch(&self, results: &[ExtractionResult]) -> usize {
        let mut saved = 0;
        for result in results {
            match self.save(result).await {
                Ok(_) => saved += 1,
                Err(e) => warn!(file = %result.file_name, "failed to save record: {}", e),
            }
        }
        info!("saved {} of {} records", saved, results.len());
        saved
    }

    /// Load every stored record, skipping (with a logged warning) any
    /// artifact that fails to deserialize.
    async fn list_all(&self) -> Result<Vec<StoredRecord>>;

    /// Look up a record by identifier. Absence is a normal outcome.
    async fn get_by_id(&self, id: u64) -> Result<Option<StoredRecord>> {
        Ok(self.list_all().await?.into_iter().find(|r| r.id == id))
    }
}

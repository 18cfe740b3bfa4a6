//! In-memory storage implementation for testing and development.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use crate::error::Result;
use crate::traits::store::RecordStore;
use crate::types::record::StoredRecord;
use crate::types::result::ExtractionResult;

/// In-memory record store with the same identifier discipline as the
/// file-backed store. Data is lost on drop; useful for tests and
/// development only.
pub struct MemoryStore {
    records: RwLock<BTreeMap<u64, StoredRecord>>,
    next_id: AtomicU64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of stored records.
    pub fn record_count(&self) -> usize {
        self.records.read().unwrap().len()
    }

    /// Clear all stored records (the id counter keeps running).
    pub fn clear(&self) {
        self.records.write().unwrap().clear();
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn save(&self, result: &ExtractionResult) -> Result<StoredRecord> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = StoredRecord::from_result(id, result);
        self.records.write().unwrap().insert(id, record.clone());
        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<StoredRecord>> {
        Ok(self.records.read().unwrap().values().cloned().collect())
    }

    async fn get_by_id(&self, id: u64) -> Result<Option<StoredRecord>> {
        Ok(self.records.read().unwrap().get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ids_are_monotonic() {
        let store = MemoryStore::new();
        let a = store
            .save(&ExtractionResult::success("/docs/a.pdf", None))
            .await
            .unwrap();
        let b = store
            .save(&ExtractionResult::success("/docs/b.pdf", None))
            .await
            .unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(store.record_count(), 2);
    }

    #[tokio::test]
    async fn test_clear_does_not_reset_ids() {
        let store = MemoryStore::new();
        store
            .save(&ExtractionResult::success("/docs/a.pdf", None))
            .await
            .unwrap();
        store.clear();
        let next = store
            .save(&ExtractionResult::success("/docs/b.pdf", None))
            .await
            .unwrap();
        assert_eq!(next.id, 2);
    }
}

//! File-backed record storage.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::traits::store::RecordStore;
use crate::types::record::StoredRecord;
use crate::types::result::ExtractionResult;

/// Durable store: one pretty-printed JSON file per record under a root
/// directory, named `knowledge_<id>_<sanitizedFileName>.json`.
///
/// Identifiers come from an atomic counter starting at 1, owned by this
/// instance and reset only on process restart. An id is never reissued,
/// even when the write that followed its assignment failed. Two separate
/// process runs against the same root both start at 1 and can therefore
/// overwrite each other's artifacts; that is an accepted limitation of the
/// naming scheme, documented rather than fixed.
pub struct FsStore {
    root: PathBuf,
    next_id: AtomicU64,
}

impl FsStore {
    /// Create a store rooted at `root`. The directory is created on first
    /// use, not here.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Storage root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn ensure_root(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).await?;
            info!(root = %self.root.display(), "created storage directory");
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for FsStore {
    async fn save(&self, result: &ExtractionResult) -> Result<StoredRecord> {
        self.ensure_root().await?;

        // The id is committed before the write and never rolled back
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = StoredRecord::from_result(id, result);

        let path = self.root.join(record.artifact_name());
        let json = serde_json::to_string_pretty(&record)?;
        fs::write(&path, json).await?;

        debug!(id, path = %path.display(), "saved knowledge record");
        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<StoredRecord>> {
        self.ensure_root().await?;

        let mut records = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let text = match fs::read_to_string(&path).await {
                Ok(text) => text,
                Err(e) => {
                    warn!(path = %path.display(), "failed to read record: {}", e);
                    continue;
                }
            };
            match serde_json::from_str::<StoredRecord>(&text) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(path = %path.display(), "skipping undeserializable record: {}", e)
                }
            }
        }

        records.sort_by_key(|r| r.id);
        Ok(records)
    }
}

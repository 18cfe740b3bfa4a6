//! Boundary operation exposed to collaborating layers (agent wrappers,
//! startup runners, CLIs).
//!
//! The one promise made here: [`KnowledgeService::run`] never raises for
//! anticipated conditions. Bad directories, failed extractions, and storage
//! errors all come back encoded in the [`RunReport`].

use serde::Serialize;
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::pipeline::process_directory_with_cancel;
use crate::traits::extractor::Extractor;
use crate::traits::store::RecordStore;
use crate::types::config::PipelineConfig;

/// Structured outcome of one directory run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Whether every discovered file extracted cleanly
    pub success: bool,

    /// Human-readable summary
    pub message: String,

    /// Number of extraction results produced
    pub total_processed: usize,

    /// Number of records persisted
    pub total_saved: usize,
}

/// Extraction pipeline plus storage behind one entry point.
///
/// # Example
///
/// ```rust,ignore
/// use knowledge::{KnowledgeService, MemoryStore};
/// use knowledge::testing::MockExtractor;
///
/// let service = KnowledgeService::new(MockExtractor::new(), MemoryStore::new());
/// let report = service.run("/path/to/docs").await;
/// println!("{}", report.message);
/// ```
pub struct KnowledgeService<E: Extractor, S: RecordStore> {
    extractor: E,
    store: S,
    config: PipelineConfig,
}

impl<E: Extractor, S: RecordStore> KnowledgeService<E, S> {
    /// Create a service with the default pipeline config.
    pub fn new(extractor: E, store: S) -> Self {
        Self {
            extractor,
            store,
            config: PipelineConfig::default(),
        }
    }

    /// Create with custom pipeline configuration.
    pub fn with_config(extractor: E, store: S, config: PipelineConfig) -> Self {
        Self {
            extractor,
            store,
            config,
        }
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Get a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Process a directory of documents and persist every result.
    pub async fn run(&self, directory: impl AsRef<Path>) -> RunReport {
        self.run_with_cancel(directory, CancellationToken::new())
            .await
    }

    /// Process a directory with cancellation support. On cancellation the
    /// results completed so far are still persisted and reported.
    pub async fn run_with_cancel(
        &self,
        directory: impl AsRef<Path>,
        cancel: CancellationToken,
    ) -> RunReport {
        let directory = directory.as_ref();
        info!(directory = %directory.display(), "processing knowledge directory");

        let outcome =
            process_directory_with_cancel(directory, &self.config, &self.extractor, cancel)
                .await;

        let total_processed = outcome.results.len();
        let failed = total_processed - outcome.summary.total_succeeded;

        let total_saved = self.store.save_batch(&outcome.results).await;

        let success = failed == 0;
        let message = if success {
            format!(
                "processed {} documents and saved {} records",
                total_processed, total_saved
            )
        } else {
            let detail = outcome
                .results
                .iter()
                .find(|r| !r.succeeded)
                .and_then(|r| r.error_message.clone())
                .unwrap_or_default();
            format!(
                "processed {} documents ({} failed) and saved {} records; first failure: {}",
                total_processed, failed, total_saved, detail
            )
        };

        RunReport {
            success,
            message,
            total_processed,
            total_saved,
        }
    }
}

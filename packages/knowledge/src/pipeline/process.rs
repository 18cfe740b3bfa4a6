//! Directory processing: scan, extract, and normalize with bounded
//! concurrency and per-file fault isolation.

use futures::future::join_all;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::parse::parse_extractor_output;
use crate::scan::scan_directory;
use crate::traits::extractor::Extractor;
use crate::types::config::PipelineConfig;
use crate::types::result::ExtractionResult;

/// Summary counters for one directory run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessSummary {
    /// Files discovered by the scanner (or 1 for the degenerate
    /// invalid-directory result)
    pub total_found: usize,

    /// Results with `succeeded == true`
    pub total_succeeded: usize,
}

/// Outcome of processing one directory.
#[derive(Debug, Clone)]
pub struct DirectoryOutcome {
    /// One result per processed file, in stable (sorted-path) order
    pub results: Vec<ExtractionResult>,

    /// Aggregate counters
    pub summary: ProcessSummary,
}

/// Process every matching file under `root`.
///
/// Equivalent to [`process_directory_with_cancel`] with a token that is
/// never cancelled.
pub async fn process_directory<E: Extractor>(
    root: &Path,
    config: &PipelineConfig,
    extractor: &E,
) -> DirectoryOutcome {
    process_directory_with_cancel(root, config, extractor, CancellationToken::new()).await
}

/// Process every matching file under `root` with cancellation support.
///
/// Scanner failure (missing or non-directory root) is converted into a
/// single failed result, never propagated as an error. Per-file failures
/// are likewise contained: one bad file produces one failed result and the
/// rest of the batch proceeds.
///
/// At most `config.concurrency` extractor processes run at once. The call
/// returns only after every dispatched file has produced a result. When
/// `cancel` fires, no new files are dispatched and in-flight extractor
/// futures are dropped (terminating their child processes); results that
/// already completed are still returned.
pub async fn process_directory_with_cancel<E: Extractor>(
    root: &Path,
    config: &PipelineConfig,
    extractor: &E,
    cancel: CancellationToken,
) -> DirectoryOutcome {
    let paths = match scan_directory(root, &config.extension) {
        Ok(paths) => paths,
        Err(e) => {
            warn!(root = %root.display(), "directory scan failed: {}", e);
            let failed = ExtractionResult::failure(root, e.to_string());
            return DirectoryOutcome {
                results: vec![failed],
                summary: ProcessSummary {
                    total_found: 1,
                    total_succeeded: 0,
                },
            };
        }
    };

    let total_found = paths.len();
    if total_found == 0 {
        info!(root = %root.display(), "no matching files found");
        return DirectoryOutcome {
            results: Vec::new(),
            summary: ProcessSummary::default(),
        };
    }

    info!(root = %root.display(), count = total_found, "processing directory");
    let semaphore = Arc::new(Semaphore::new(config.concurrency.max(1)));

    let tasks = paths.iter().map(|path| {
        let semaphore = Arc::clone(&semaphore);
        let cancel = cancel.clone();
        async move {
            if cancel.is_cancelled() {
                return None;
            }
            let _permit = semaphore.acquire().await.ok()?;
            if cancel.is_cancelled() {
                return None;
            }
            tokio::select! {
                _ = cancel.cancelled() => None,
                result = process_file(path, extractor) => Some(result),
            }
        }
    });

    // join_all preserves the sorted path order of the scanner
    let results: Vec<ExtractionResult> = join_all(tasks).await.into_iter().flatten().collect();
    let total_succeeded = results.iter().filter(|r| r.succeeded).count();

    info!(
        found = total_found,
        processed = results.len(),
        succeeded = total_succeeded,
        "directory processing complete"
    );

    DirectoryOutcome {
        results,
        summary: ProcessSummary {
            total_found,
            total_succeeded,
        },
    }
}

/// Extract and normalize a single file. Failures stay contained here.
async fn process_file<E: Extractor>(path: &Path, extractor: &E) -> ExtractionResult {
    let raw = extractor.extract(path).await;
    parse_extractor_output(path, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockExtractor;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    fn docs_dir(names: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in names {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        dir
    }

    #[tokio::test]
    async fn test_counts_match_matching_files() {
        let dir = docs_dir(&["a.pdf", "b.pdf", "notes.txt"]);
        let extractor = MockExtractor::new().with_default_output(r#"{"content":"ok"}"#);

        let outcome =
            process_directory(dir.path(), &PipelineConfig::default(), &extractor).await;

        assert_eq!(outcome.summary.total_found, 2);
        assert_eq!(outcome.summary.total_succeeded, 2);
        assert_eq!(outcome.results.len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_root_becomes_one_failed_result() {
        let extractor = MockExtractor::new();
        let outcome = process_directory(
            Path::new("/no/such/dir"),
            &PipelineConfig::default(),
            &extractor,
        )
        .await;

        assert_eq!(outcome.summary.total_found, 1);
        assert_eq!(outcome.summary.total_succeeded, 0);
        assert_eq!(outcome.results.len(), 1);
        assert!(!outcome.results[0].succeeded);
        assert!(outcome.results[0]
            .error_message
            .as_deref()
            .unwrap()
            .contains("invalid input directory"));
    }

    #[tokio::test]
    async fn test_empty_directory_is_empty_outcome() {
        let dir = docs_dir(&[]);
        let extractor = MockExtractor::new();
        let outcome =
            process_directory(dir.path(), &PipelineConfig::default(), &extractor).await;

        assert_eq!(outcome.summary.total_found, 0);
        assert!(outcome.results.is_empty());
    }

    #[tokio::test]
    async fn test_one_launch_failure_does_not_abort_batch() {
        let dir = docs_dir(&["a.pdf", "b.pdf", "c.pdf"]);
        let extractor = MockExtractor::new()
            .with_default_output(r#"{"content":"ok"}"#)
            .with_launch_failure("b.pdf", "No such file or directory");

        let outcome =
            process_directory(dir.path(), &PipelineConfig::default(), &extractor).await;

        assert_eq!(outcome.summary.total_found, 3);
        assert_eq!(outcome.summary.total_succeeded, 2);
        assert_eq!(outcome.results.len(), 3);

        let failed: Vec<_> = outcome.results.iter().filter(|r| !r.succeeded).collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].file_name, "b.pdf");
        assert!(failed[0]
            .error_message
            .as_deref()
            .unwrap()
            .contains("failed to launch"));
    }

    #[tokio::test]
    async fn test_results_follow_sorted_path_order() {
        let dir = docs_dir(&["z.pdf", "a.pdf", "m.pdf"]);
        let extractor = MockExtractor::new().with_default_output("text");

        let outcome =
            process_directory(dir.path(), &PipelineConfig::default(), &extractor).await;
        let names: Vec<_> = outcome.results.iter().map(|r| r.file_name.clone()).collect();
        assert_eq!(names, vec!["a.pdf", "m.pdf", "z.pdf"]);
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded() {
        let dir = docs_dir(&["a.pdf", "b.pdf", "c.pdf", "d.pdf", "e.pdf", "f.pdf"]);
        let extractor = MockExtractor::new()
            .with_default_output("text")
            .with_delay_ms(20);

        let config = PipelineConfig::default().with_concurrency(2);
        let outcome = process_directory(dir.path(), &config, &extractor).await;

        assert_eq!(outcome.summary.total_succeeded, 6);
        assert!(extractor.max_in_flight() <= 2);
    }

    #[tokio::test]
    async fn test_cancellation_returns_partial_results() {
        let dir = docs_dir(&["a.pdf", "b.pdf", "c.pdf", "d.pdf"]);
        let started = Arc::new(AtomicUsize::new(0));
        let started_clone = Arc::clone(&started);

        let cancel = CancellationToken::new();
        let cancel_after_first = cancel.clone();
        let extractor = MockExtractor::new()
            .with_default_output("text")
            .with_delay_ms(50)
            .on_extract(move |_| {
                if started_clone.fetch_add(1, Ordering::SeqCst) == 0 {
                    cancel_after_first.cancel();
                }
            });

        let config = PipelineConfig::default().with_concurrency(1);
        let outcome =
            process_directory_with_cancel(dir.path(), &config, &extractor, cancel).await;

        // The first file may or may not finish before the token is observed,
        // but the later files must never be dispatched.
        assert!(outcome.results.len() < 4);
        assert_eq!(outcome.summary.total_found, 4);
        assert!(started.load(Ordering::SeqCst) <= 1);
    }
}

//! Testing utilities including mock implementations.
//!
//! Useful for testing applications built on the pipeline without spawning
//! real extractor processes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::traits::extractor::{Extractor, ExtractorOutput};

type ExtractCallback = dyn Fn(&Path) + Send + Sync;

/// A mock extractor with scripted per-file responses.
///
/// Responses are keyed by file name. Files without a scripted response get
/// the default output (empty JSON object unless overridden). The mock also
/// tracks the peak number of concurrent `extract` calls so tests can assert
/// that pipeline concurrency stays bounded.
pub struct MockExtractor {
    /// Scripted outputs by file name
    outputs: RwLock<HashMap<String, ExtractorOutput>>,

    /// Output for files without a scripted response
    default_output: RwLock<ExtractorOutput>,

    /// Artificial per-call latency
    delay: RwLock<Option<Duration>>,

    /// Hook invoked at the start of every `extract` call
    on_extract: RwLock<Option<Arc<ExtractCallback>>>,

    /// Concurrency tracking
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,

    /// Total calls made
    calls: AtomicUsize,
}

impl Default for MockExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl MockExtractor {
    /// Create a new mock that answers every file with `{}` and exit 0.
    pub fn new() -> Self {
        Self {
            outputs: RwLock::new(HashMap::new()),
            default_output: RwLock::new(ExtractorOutput::completed("{}", 0)),
            delay: RwLock::new(None),
            on_extract: RwLock::new(None),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    /// Set the output returned for files without a scripted response.
    pub fn with_default_output(self, output: impl Into<String>) -> Self {
        *self.default_output.write().unwrap() = ExtractorOutput::completed(output, 0);
        self
    }

    /// Script a completed invocation for one file name.
    pub fn with_output(self, file_name: impl Into<String>, output: impl Into<String>) -> Self {
        self.outputs
            .write()
            .unwrap()
            .insert(file_name.into(), ExtractorOutput::completed(output, 0));
        self
    }

    /// Script a non-zero exit for one file name.
    pub fn with_exit_code(
        self,
        file_name: impl Into<String>,
        output: impl Into<String>,
        exit_code: i32,
    ) -> Self {
        self.outputs
            .write()
            .unwrap()
            .insert(file_name.into(), ExtractorOutput::completed(output, exit_code));
        self
    }

    /// Script a launch failure for one file name.
    pub fn with_launch_failure(
        self,
        file_name: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        self.outputs
            .write()
            .unwrap()
            .insert(file_name.into(), ExtractorOutput::launch_failure(error));
        self
    }

    /// Add artificial latency to every call.
    pub fn with_delay_ms(self, millis: u64) -> Self {
        *self.delay.write().unwrap() = Some(Duration::from_millis(millis));
        self
    }

    /// Register a hook called at the start of every `extract`.
    pub fn on_extract(self, hook: impl Fn(&Path) + Send + Sync + 'static) -> Self {
        *self.on_extract.write().unwrap() = Some(Arc::new(hook));
        self
    }

    /// Peak number of concurrent `extract` calls observed.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Total number of `extract` calls made.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Extractor for MockExtractor {
    async fn extract(&self, input: &Path) -> ExtractorOutput {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(hook) = self.on_extract.read().unwrap().clone() {
            hook(input);
        }

        let delay = *self.delay.read().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let file_name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let output = self
            .outputs
            .read()
            .unwrap()
            .get(&file_name)
            .cloned()
            .unwrap_or_else(|| self.default_output.read().unwrap().clone());

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        output
    }

    fn name(&self) -> &str {
        "mock"
    }
}

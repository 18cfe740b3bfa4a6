//! Extractor trait for pluggable document extraction.
//!
//! The external extractor is a black box: the pipeline only cares about its
//! input/output contract, never its algorithm. Modeling it as a capability
//! trait lets tests substitute a scripted extractor without spawning real
//! processes.

use async_trait::async_trait;
use std::path::Path;

/// Captured outcome of one extractor invocation.
///
/// Non-zero exit codes are data here, not errors; a process that could not
/// be started at all is a distinct condition (`launched = false`) so callers
/// can tell "executable not found" apart from "extractor rejected the file".
#[derive(Debug, Clone)]
pub struct ExtractorOutput {
    /// Combined stdout/stderr text
    pub output: String,

    /// Process exit code (`-1` when terminated by a signal)
    pub exit_code: i32,

    /// Whether the process could be started at all
    pub launched: bool,
}

impl ExtractorOutput {
    /// Output of a process that ran to completion.
    pub fn completed(output: impl Into<String>, exit_code: i32) -> Self {
        Self {
            output: output.into(),
            exit_code,
            launched: true,
        }
    }

    /// Output for a process that could not be started. The message carries
    /// the OS-level error text.
    pub fn launch_failure(error: impl Into<String>) -> Self {
        Self {
            output: error.into(),
            exit_code: -1,
            launched: false,
        }
    }

    /// Whether the process started and exited zero.
    pub fn is_success(&self) -> bool {
        self.launched && self.exit_code == 0
    }
}

/// Capability interface over the external extraction process.
///
/// Implementations block the calling task until the process exits and
/// impose no internal timeout; callers that need a deadline wrap the call
/// with a cancellation token.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Run the extractor against one input file.
    ///
    /// Never fails: launch failures and non-zero exits are surfaced on the
    /// returned [`ExtractorOutput`].
    async fn extract(&self, input: &Path) -> ExtractorOutput;

    /// Extractor name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_output() {
        let out = ExtractorOutput::completed("text", 0);
        assert!(out.launched);
        assert!(out.is_success());

        let failed = ExtractorOutput::completed("bad pdf", 2);
        assert!(failed.launched);
        assert!(!failed.is_success());
    }

    #[test]
    fn test_launch_failure_is_not_success() {
        let out = ExtractorOutput::launch_failure("No such file or directory");
        assert!(!out.launched);
        assert!(!out.is_success());
        assert_eq!(out.exit_code, -1);
    }
}

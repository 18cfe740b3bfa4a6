//! Subprocess-backed extractor.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::traits::extractor::{Extractor, ExtractorOutput};
use crate::types::config::KnowledgeConfig;

/// Extractor that shells out to an external command.
///
/// Invokes `<program> <script> <input-path>` and captures stdout and stderr
/// into one combined stream, stdout first. Non-zero exit is surfaced as data
/// on the returned [`ExtractorOutput`]; only "process could not start" is a
/// distinct condition.
///
/// Children are spawned with `kill_on_drop`, so a cancelled pipeline run
/// terminates in-flight extractor processes when their futures are dropped.
pub struct CommandExtractor {
    program: PathBuf,
    script: PathBuf,
}

impl CommandExtractor {
    /// Create an extractor for `<program> <script> <input>`.
    pub fn new(program: impl Into<PathBuf>, script: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            script: script.into(),
        }
    }

    /// Build from application config.
    pub fn from_config(config: &KnowledgeConfig) -> Self {
        Self::new(&config.extractor_bin, &config.extractor_script)
    }
}

#[async_trait]
impl Extractor for CommandExtractor {
    async fn extract(&self, input: &Path) -> ExtractorOutput {
        debug!(
            program = %self.program.display(),
            input = %input.display(),
            "launching extractor"
        );

        let child = Command::new(&self.program)
            .arg(&self.script)
            .arg(input)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let child = match child {
            Ok(child) => child,
            Err(e) => return ExtractorOutput::launch_failure(e.to_string()),
        };

        match child.wait_with_output().await {
            Ok(output) => {
                let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
                let stderr = String::from_utf8_lossy(&output.stderr);
                if !stderr.is_empty() {
                    if !combined.is_empty() && !combined.ends_with('\n') {
                        combined.push('\n');
                    }
                    combined.push_str(&stderr);
                }
                // None exit code means the child was killed by a signal
                ExtractorOutput::completed(combined, output.status.code().unwrap_or(-1))
            }
            Err(e) => ExtractorOutput::launch_failure(e.to_string()),
        }
    }

    fn name(&self) -> &str {
        "command"
    }
}

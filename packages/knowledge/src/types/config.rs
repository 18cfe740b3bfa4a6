//! Configuration types for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Configuration for directory processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// File extension to match, without the leading dot (case-insensitive).
    pub extension: String,

    /// Maximum number of extractor processes in flight at once.
    ///
    /// Bounded so a directory with thousands of documents cannot exhaust
    /// the machine. Default: 4.
    pub concurrency: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            extension: "pdf".to_string(),
            concurrency: 4,
        }
    }
}

impl PipelineConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the file extension to match.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Set the extractor concurrency limit (minimum 1).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

/// Full application configuration: pipeline, extractor command, storage.
///
/// Environment variables (see [`KnowledgeConfig::from_env`]) mirror the
/// deployment configuration keys; every field has a usable default so the
/// library works out of the box in tests.
#[derive(Debug, Clone)]
pub struct KnowledgeConfig {
    /// Directory of documents to process, if configured
    pub docs_dir: Option<PathBuf>,

    /// Executable that runs the extraction script (default `python3`)
    pub extractor_bin: PathBuf,

    /// Extraction script passed as the first argument
    pub extractor_script: PathBuf,

    /// Root directory for stored records
    pub storage_dir: PathBuf,

    /// Directory processing settings
    pub pipeline: PipelineConfig,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            docs_dir: None,
            extractor_bin: PathBuf::from("python3"),
            extractor_script: PathBuf::from("scripts/parse_pdf.py"),
            storage_dir: PathBuf::from("data/knowledge"),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl KnowledgeConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset:
    ///
    /// - `KNOWLEDGE_DOCS_DIR`
    /// - `KNOWLEDGE_EXTRACTOR_BIN`
    /// - `KNOWLEDGE_EXTRACTOR_SCRIPT`
    /// - `KNOWLEDGE_STORAGE_DIR`
    /// - `KNOWLEDGE_EXTENSION`
    /// - `KNOWLEDGE_CONCURRENCY`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("KNOWLEDGE_DOCS_DIR") {
            config.docs_dir = Some(PathBuf::from(dir));
        }
        if let Ok(bin) = env::var("KNOWLEDGE_EXTRACTOR_BIN") {
            config.extractor_bin = PathBuf::from(bin);
        }
        if let Ok(script) = env::var("KNOWLEDGE_EXTRACTOR_SCRIPT") {
            config.extractor_script = PathBuf::from(script);
        }
        if let Ok(dir) = env::var("KNOWLEDGE_STORAGE_DIR") {
            config.storage_dir = PathBuf::from(dir);
        }
        if let Ok(ext) = env::var("KNOWLEDGE_EXTENSION") {
            config.pipeline.extension = ext;
        }
        if let Ok(n) = env::var("KNOWLEDGE_CONCURRENCY") {
            if let Ok(n) = n.parse::<usize>() {
                config.pipeline = config.pipeline.with_concurrency(n);
            }
        }

        config
    }

    /// Set the documents directory.
    pub fn with_docs_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.docs_dir = Some(dir.into());
        self
    }

    /// Set the storage root.
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = dir.into();
        self
    }

    /// Set the extractor command.
    pub fn with_extractor(
        mut self,
        bin: impl Into<PathBuf>,
        script: impl Into<PathBuf>,
    ) -> Self {
        self.extractor_bin = bin.into();
        self.extractor_script = script.into();
        self
    }

    /// Set the pipeline config.
    pub fn with_pipeline(mut self, pipeline: PipelineConfig) -> Self {
        self.pipeline = pipeline;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.extension, "pdf");
        assert_eq!(config.concurrency, 4);
    }

    #[test]
    fn test_concurrency_never_zero() {
        let config = PipelineConfig::new().with_concurrency(0);
        assert_eq!(config.concurrency, 1);
    }

    #[test]
    fn test_knowledge_config_builder() {
        let config = KnowledgeConfig::new()
            .with_docs_dir("/docs")
            .with_storage_dir("/var/knowledge")
            .with_extractor("python3", "parse.py")
            .with_pipeline(PipelineConfig::new().with_extension("txt"));

        assert_eq!(config.docs_dir.as_deref(), Some(std::path::Path::new("/docs")));
        assert_eq!(config.storage_dir, PathBuf::from("/var/knowledge"));
        assert_eq!(config.pipeline.extension, "txt");
    }
}

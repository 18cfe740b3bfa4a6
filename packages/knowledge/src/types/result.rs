//! The normalized outcome of extracting one document.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Ordered metadata emitted by an extractor (page counts, parser name, etc.).
///
/// Values are arbitrary JSON so extractors can nest freely; insertion order
/// is preserved when records are serialized.
pub type Metadata = IndexMap<String, Value>;

/// Result of extracting one input document.
///
/// Created by the pipeline immediately after parsing extractor output and
/// immutable thereafter. Failure is data, not an error: a failed result
/// carries `succeeded = false` and an error message instead of content.
///
/// Invariant (upheld by the constructors):
/// `succeeded == false` implies `content` is `None` and `error_message` is
/// `Some`; `succeeded == true` implies `error_message` is `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Absolute path of the source document
    pub source_path: String,

    /// File name component of the source path
    pub file_name: String,

    /// Extracted text, if extraction succeeded and produced any
    pub content: Option<String>,

    /// Extractor-provided metadata, if any
    pub metadata: Option<Metadata>,

    /// Whether extraction succeeded
    pub succeeded: bool,

    /// Why extraction failed, when it did
    pub error_message: Option<String>,

    /// When this result was constructed (wall clock, not parsed from input)
    pub extracted_at: DateTime<Utc>,
}

impl ExtractionResult {
    /// Create a successful result.
    ///
    /// `content` may be `None`: a well-formed extractor payload is allowed
    /// to omit the content key and still count as a success.
    pub fn success(source_path: impl AsRef<Path>, content: Option<String>) -> Self {
        let (source_path, file_name) = split_path(source_path.as_ref());
        Self {
            source_path,
            file_name,
            content,
            metadata: None,
            succeeded: true,
            error_message: None,
            extracted_at: Utc::now(),
        }
    }

    /// Create a failed result carrying an error message.
    pub fn failure(source_path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        let (source_path, file_name) = split_path(source_path.as_ref());
        Self {
            source_path,
            file_name,
            content: None,
            metadata: None,
            succeeded: false,
            error_message: Some(message.into()),
            extracted_at: Utc::now(),
        }
    }

    /// Attach extractor metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Check whether this result carries any content.
    pub fn has_content(&self) -> bool {
        self.content.as_deref().is_some_and(|c| !c.is_empty())
    }
}

fn split_path(path: &Path) -> (String, String) {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    (path.display().to_string(), file_name)
}

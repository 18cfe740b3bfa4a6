//! Persisted projection of an extraction result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::result::{ExtractionResult, Metadata};

/// A stored knowledge record: all [`ExtractionResult`] fields plus the
/// identifier assigned by the store.
///
/// Identifiers are strictly increasing and unique for the lifetime of one
/// store instance; only the store may construct them. Records are never
/// mutated after they are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Store-assigned identifier, starting at 1 per process run
    pub id: u64,

    /// Absolute path of the source document
    pub source_path: String,

    /// File name component of the source path
    pub file_name: String,

    /// Extracted text, if any
    pub content: Option<String>,

    /// Extractor-provided metadata, if any
    pub metadata: Option<Metadata>,

    /// Whether extraction succeeded
    pub succeeded: bool,

    /// Why extraction failed, when it did
    pub error_message: Option<String>,

    /// When the extraction result was constructed
    pub extracted_at: DateTime<Utc>,
}

impl StoredRecord {
    /// Project an extraction result into a record with the given identifier.
    pub(crate) fn from_result(id: u64, result: &ExtractionResult) -> Self {
        Self {
            id,
            source_path: result.source_path.clone(),
            file_name: result.file_name.clone(),
            content: result.content.clone(),
            metadata: result.metadata.clone(),
            succeeded: result.succeeded,
            error_message: result.error_message.clone(),
            extracted_at: result.extracted_at,
        }
    }

    /// Deterministic artifact name for this record:
    /// `knowledge_<id>_<sanitizedFileName>.json`.
    ///
    /// Unique within one store instance because the id is; two separate
    /// process runs each starting their counter at 1 can collide and
    /// overwrite. That limitation is accepted, not silently fixed.
    pub fn artifact_name(&self) -> String {
        format!(
            "knowledge_{}_{}.json",
            self.id,
            sanitize_file_name(&self.file_name)
        )
    }
}

/// Replace every character outside `[A-Za-z0-9.-]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("report.pdf"), "report.pdf");
        assert_eq!(sanitize_file_name("my report (v2).pdf"), "my_report__v2_.pdf");
        assert_eq!(sanitize_file_name("a-b.c_d"), "a-b.c_d");
        assert_eq!(sanitize_file_name("日本語.pdf"), "___.pdf");
    }

    #[test]
    fn test_artifact_name() {
        let result = ExtractionResult::success("/docs/q1 report.pdf", Some("text".into()));
        let record = StoredRecord::from_result(7, &result);
        assert_eq!(record.artifact_name(), "knowledge_7_q1_report.pdf.json");
    }

    #[test]
    fn test_projection_copies_all_fields() {
        let result = ExtractionResult::failure("/docs/bad.pdf", "boom");
        let record = StoredRecord::from_result(1, &result);
        assert_eq!(record.source_path, result.source_path);
        assert_eq!(record.file_name, result.file_name);
        assert_eq!(record.succeeded, result.succeeded);
        assert_eq!(record.error_message, result.error_message);
        assert_eq!(record.extracted_at, result.extracted_at);
    }
}

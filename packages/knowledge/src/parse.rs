//! Normalization of raw extractor output into typed results.
//!
//! The extractor is expected to emit a single JSON object with optional
//! `content`, `success`, `metadata`, and `error` keys, but that contract is
//! best-effort and not enforced on the far side: any other textual output
//! from a zero-exit process is accepted verbatim as content.
//!
//! Note the consequence of that fallback: a malformed or truncated JSON
//! payload degrades silently into a "successful" extraction of the raw
//! text. That mirrors the upstream extractor contract and is deliberate,
//! not an oversight.

use serde::Deserialize;
use std::path::Path;
use tracing::warn;

use crate::error::KnowledgeError;
use crate::traits::extractor::ExtractorOutput;
use crate::types::result::{ExtractionResult, Metadata};

/// Recognized shape of well-formed extractor output. Unknown keys are
/// ignored; `success` defaults to true when absent.
#[derive(Debug, Deserialize)]
struct ExtractorPayload {
    #[serde(default)]
    content: Option<String>,

    #[serde(default = "default_success")]
    success: bool,

    #[serde(default)]
    metadata: Option<Metadata>,

    #[serde(default)]
    error: Option<String>,
}

fn default_success() -> bool {
    true
}

/// Interpret one captured extractor invocation as an [`ExtractionResult`].
///
/// Launch failures and non-zero exits become failed results whose message
/// embeds the diagnostic output; everything else goes through the JSON
/// parse with raw-text fallback described at the module level.
pub fn parse_extractor_output(source: &Path, raw: &ExtractorOutput) -> ExtractionResult {
    if !raw.launched {
        let err = KnowledgeError::Launch(raw.output.clone());
        return ExtractionResult::failure(source, err.to_string());
    }

    if raw.exit_code != 0 {
        return ExtractionResult::failure(
            source,
            format!(
                "extractor exited with code {}: {}",
                raw.exit_code,
                raw.output.trim()
            ),
        );
    }

    let trimmed = raw.output.trim();
    match serde_json::from_str::<ExtractorPayload>(trimmed) {
        Ok(payload) => {
            if payload.success {
                let mut result = ExtractionResult::success(source, payload.content);
                if let Some(metadata) = payload.metadata {
                    result = result.with_metadata(metadata);
                }
                result
            } else {
                // Zero exit but the payload itself reports failure
                let message = payload
                    .error
                    .unwrap_or_else(|| "extractor reported failure".to_string());
                ExtractionResult::failure(source, message)
            }
        }
        Err(_) => {
            // Raw-text fallback: plain output is a valid extractor response
            warn!(source = %source.display(), "extractor output is not JSON, using raw content");
            ExtractionResult::success(source, Some(trimmed.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> &'static Path {
        Path::new("/docs/report.pdf")
    }

    #[test]
    fn test_structured_output_with_metadata() {
        let raw =
            ExtractorOutput::completed(r#"{"content":"hello","metadata":{"pages":3}}"#, 0);
        let result = parse_extractor_output(path(), &raw);

        assert!(result.succeeded);
        assert_eq!(result.content.as_deref(), Some("hello"));
        let metadata = result.metadata.unwrap();
        assert_eq!(metadata.get("pages"), Some(&3.into()));
    }

    #[test]
    fn test_plain_text_fallback() {
        let raw = ExtractorOutput::completed("plain text, not json", 0);
        let result = parse_extractor_output(path(), &raw);

        assert!(result.succeeded);
        assert_eq!(result.content.as_deref(), Some("plain text, not json"));
        assert_eq!(result.metadata, None);
    }

    #[test]
    fn test_non_zero_exit_embeds_code_and_output() {
        let raw = ExtractorOutput::completed("bad pdf", 2);
        let result = parse_extractor_output(path(), &raw);

        assert!(!result.succeeded);
        assert_eq!(result.content, None);
        let message = result.error_message.unwrap();
        assert!(message.contains('2'));
        assert!(message.contains("bad pdf"));
    }

    #[test]
    fn test_launch_failure_is_distinguished() {
        let raw = ExtractorOutput::launch_failure("No such file or directory");
        let result = parse_extractor_output(path(), &raw);

        assert!(!result.succeeded);
        let message = result.error_message.unwrap();
        assert!(message.contains("failed to launch"));
        assert!(message.contains("No such file or directory"));
    }

    #[test]
    fn test_empty_output_with_zero_exit_is_success() {
        let raw = ExtractorOutput::completed("", 0);
        let result = parse_extractor_output(path(), &raw);

        assert!(result.succeeded);
        assert_eq!(result.content.as_deref(), Some(""));
    }

    #[test]
    fn test_payload_missing_content_is_still_success() {
        let raw = ExtractorOutput::completed(r#"{"metadata":{"pages":1}}"#, 0);
        let result = parse_extractor_output(path(), &raw);

        assert!(result.succeeded);
        assert_eq!(result.content, None);
        assert!(result.metadata.is_some());
    }

    #[test]
    fn test_payload_reporting_failure() {
        let raw = ExtractorOutput::completed(r#"{"success":false,"error":"no pages"}"#, 0);
        let result = parse_extractor_output(path(), &raw);

        assert!(!result.succeeded);
        assert_eq!(result.error_message.as_deref(), Some("no pages"));
        assert_eq!(result.content, None);
    }

    #[test]
    fn test_truncated_json_degrades_to_raw_content() {
        // Documented behavior: malformed structured output is not a failure
        let raw = ExtractorOutput::completed(r#"{"content":"hel"#, 0);
        let result = parse_extractor_output(path(), &raw);

        assert!(result.succeeded);
        assert_eq!(result.content.as_deref(), Some(r#"{"content":"hel"#));
    }
}

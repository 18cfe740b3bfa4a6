//! Typed errors for the knowledge pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.
//!
//! Per-file extraction failures are deliberately NOT errors: they are
//! surfaced as data on [`crate::types::result::ExtractionResult`] so that
//! one bad document can never abort a batch. Lookup misses are modeled as
//! `Option`, not as an error variant.

use thiserror::Error;

/// Errors that can occur during knowledge pipeline operations.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    /// Input root does not exist or is not a directory
    #[error("invalid input directory: {path}")]
    InvalidInput { path: String },

    /// External extractor process could not be started
    #[error("extractor failed to launch: {0}")]
    Launch(String),

    /// Storage operation failed (reading or writing a record artifact)
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Record serialization or deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for knowledge pipeline operations.
pub type Result<T> = std::result::Result<T, KnowledgeError>;

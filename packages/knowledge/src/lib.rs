//! Knowledge Extraction Pipeline
//!
//! Turns a directory of documents into uniquely-identified knowledge
//! records: directory traversal → per-document external-process invocation
//! → output parsing with fallback → durable persistence.
//!
//! # Design Philosophy
//!
//! - The extractor is a black box behind the [`Extractor`] trait; only its
//!   input/output contract matters here
//! - Failure is data: one bad document yields one failed result and never
//!   aborts the batch
//! - Bounded concurrency with cancellation; partial results survive a
//!   cancelled run
//! - The boundary operation ([`KnowledgeService::run`]) never raises for
//!   anticipated conditions
//!
//! # Usage
//!
//! ```rust,ignore
//! use knowledge::{CommandExtractor, FsStore, KnowledgeService};
//!
//! let extractor = CommandExtractor::new("python3", "scripts/parse_pdf.py");
//! let store = FsStore::new("data/knowledge");
//! let service = KnowledgeService::new(extractor, store);
//!
//! let report = service.run("/path/to/docs").await;
//! println!("{}", report.message);
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions ([`Extractor`], [`RecordStore`])
//! - [`types`] - Results, records, configuration
//! - [`scan`] - Recursive, extension-filtered directory scanning
//! - [`parse`] - Extractor output normalization with raw-text fallback
//! - [`pipeline`] - Concurrent directory processing with fault isolation
//! - [`stores`] - Storage implementations ([`FsStore`], [`MemoryStore`])
//! - [`extractors`] - Extractor implementations ([`CommandExtractor`])
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod extractors;
pub mod parse;
pub mod pipeline;
pub mod scan;
pub mod service;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{KnowledgeError, Result};
pub use traits::{
    extractor::{Extractor, ExtractorOutput},
    store::RecordStore,
};
pub use types::{
    config::{KnowledgeConfig, PipelineConfig},
    record::{sanitize_file_name, StoredRecord},
    result::{ExtractionResult, Metadata},
};

// Re-export pipeline components
pub use pipeline::{
    process_directory, process_directory_with_cancel, DirectoryOutcome, ProcessSummary,
};

// Re-export the boundary service
pub use service::{KnowledgeService, RunReport};

// Re-export scanning and parsing
pub use parse::parse_extractor_output;
pub use scan::scan_directory;

// Re-export implementations
pub use extractors::CommandExtractor;
pub use stores::{FsStore, MemoryStore};

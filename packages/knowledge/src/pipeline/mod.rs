//! Extraction pipeline orchestration.

pub mod process;

pub use process::{
    process_directory, process_directory_with_cancel, DirectoryOutcome, ProcessSummary,
};

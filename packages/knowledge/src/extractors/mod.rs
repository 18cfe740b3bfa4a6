//! Extractor implementations.

pub mod command;

pub use command::CommandExtractor;

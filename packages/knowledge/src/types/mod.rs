//! Data types for the knowledge pipeline.

pub mod config;
pub mod record;
pub mod result;

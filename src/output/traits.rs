//! Output sink traits and types
//!
//! This module defines the trait interface for result sinks and the
//! associated error and summary types.

use crate::fingerprint::FingerprintResult;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format output: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// How an existing result store is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Add unseen sites to an existing store, creating it if absent
    #[default]
    Append,
    /// Truncate the store and rewrite it with a header
    Create,
}

/// Outcome of persisting a batch of results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersistSummary {
    /// Rows written to the store
    pub written: usize,
    /// Results skipped because their site was already present
    pub skipped: usize,
}

/// Trait for result sinks
///
/// Sinks never fail the run: problems are reported through the progress
/// stream and whatever was written stays written.
pub trait ResultSink {
    /// Persists a batch of fingerprint results
    fn persist(&self, results: &[FingerprintResult]) -> PersistSummary;
}

//! Output module for persisting discovery and scan results
//!
//! This module handles:
//! - Writing the sorted domain list produced by discovery
//! - Persisting fingerprint results to the `site,version` CSV store
//! - Summarizing a run for display

mod csv_sink;
mod domains;
pub mod stats;
mod traits;

pub use csv_sink::{persist_results, read_existing_sites, CsvResultSink};
pub use domains::write_domain_list;
pub use stats::{print_statistics, RunStatistics};
pub use traits::{OutputError, OutputResult, PersistSummary, ResultSink, WriteMode};

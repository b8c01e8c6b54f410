//! Run statistics
//!
//! This module summarizes a discovery + scan run for display at the end of
//! the command.

use crate::fingerprint::{DetectionMethod, FingerprintResult, Version};
use crate::output::traits::PersistSummary;
use std::collections::BTreeMap;

/// Run statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStatistics {
    /// Number of keywords searched
    pub keywords: usize,

    /// Number of domains handed to the scanner
    pub domains_scanned: usize,

    /// Number of domains identified as WordPress
    pub detected: usize,

    /// Detected domains whose version could be read
    pub known_versions: usize,

    /// Detections per heuristic
    pub by_method: BTreeMap<DetectionMethod, usize>,

    /// Outcome of the CSV write
    pub persisted: PersistSummary,
}

impl RunStatistics {
    /// Builds statistics from the scanner output
    pub fn from_results(
        keywords: usize,
        domains_scanned: usize,
        results: &[FingerprintResult],
        persisted: PersistSummary,
    ) -> Self {
        let mut by_method = BTreeMap::new();
        for result in results {
            *by_method.entry(result.method).or_insert(0) += 1;
        }

        Self {
            keywords,
            domains_scanned,
            detected: results.len(),
            known_versions: results
                .iter()
                .filter(|r| matches!(r.version, Version::Known(_)))
                .count(),
            by_method,
            persisted,
        }
    }

    /// Share of scanned domains detected as WordPress, in percent
    pub fn detection_rate(&self) -> f64 {
        if self.domains_scanned == 0 {
            return 0.0;
        }
        (self.detected as f64 / self.domains_scanned as f64) * 100.0
    }
}

/// Prints statistics to stdout
pub fn print_statistics(stats: &RunStatistics) {
    println!("=== wp-sweep Run Statistics ===\n");

    println!("Keywords searched: {}", stats.keywords);
    println!("Domains scanned: {}", stats.domains_scanned);
    println!(
        "WordPress sites: {} ({:.2}%)",
        stats.detected,
        stats.detection_rate()
    );
    println!("With known version: {}", stats.known_versions);

    if !stats.by_method.is_empty() {
        println!("\nDetections by heuristic:");
        for (method, count) in &stats.by_method {
            println!("  {:<16} {}", method.to_string(), count);
        }
    }

    println!(
        "\nRows written: {} (skipped {} already present)",
        stats.persisted.written, stats.persisted.skipped
    );
}

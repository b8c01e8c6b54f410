//! URL handling module for wp-sweep
//!
//! This module provides network-location extraction and the domain filter
//! that decides which discovered hosts are worth fingerprinting.

mod domain;
mod matcher;

use crate::config::FilterConfig;

// Re-export main functions
pub use domain::{link_domain, network_location};
pub use matcher::matching_exclusion;

/// Pure predicate classifying hosts as in scope or excluded
///
/// A host is excluded when its lowercased form contains any of the
/// configured exclusion substrings. Hosts that come out empty (malformed
/// URLs, hostless URLs) are governed by `accept_empty_host`.
#[derive(Debug, Clone)]
pub struct DomainFilter {
    excluded: Vec<String>,
    accept_empty_host: bool,
}

impl DomainFilter {
    /// Creates a filter from an exclusion list and an empty-host policy
    pub fn new(excluded: Vec<String>, accept_empty_host: bool) -> Self {
        Self {
            excluded: excluded.into_iter().map(|e| e.to_lowercase()).collect(),
            accept_empty_host,
        }
    }

    pub fn from_config(config: &FilterConfig) -> Self {
        Self::new(config.excluded.clone(), config.accept_empty_host)
    }

    /// Returns true if the host (or the host of a full URL) is in scope
    ///
    /// # Examples
    ///
    /// ```
    /// use wp_sweep::config::FilterConfig;
    /// use wp_sweep::url::DomainFilter;
    ///
    /// let filter = DomainFilter::from_config(&FilterConfig::default());
    /// assert!(filter.is_in_scope("myblog.example"));
    /// assert!(filter.is_in_scope("https://myblog.example/about"));
    /// assert!(!filter.is_in_scope("www.youtube.com"));
    /// assert!(!filter.is_in_scope("http://irs.gov/"));
    /// ```
    pub fn is_in_scope(&self, host_or_url: &str) -> bool {
        let host = network_location(host_or_url);

        if host.is_empty() {
            return self.accept_empty_host;
        }

        match matching_exclusion(&host, &self.excluded) {
            Some(entry) => {
                tracing::trace!("Excluding {} (matched '{}')", host, entry);
                false
            }
            None => true,
        }
    }
}

impl Default for DomainFilter {
    fn default() -> Self {
        Self::from_config(&FilterConfig::default())
    }
}

//! Discovery engine - keyword-driven domain collection
//!
//! This module contains the discovery loop that coordinates:
//! - Building result page URLs for each keyword
//! - Fetching them one at a time with backoff
//! - Extracting redirect-wrapped links
//! - Resolving and filtering domains
//! - Writing the final domain list

use crate::config::{Config, SearchConfig};
use crate::crawler::fetcher::{fetch_with_backoff, BackoffPolicy, HttpGet};
use crate::crawler::parser::extract_links;
use crate::output::write_domain_list;
use crate::progress::ProgressSink;
use crate::url::{link_domain, DomainFilter};
use crate::SweepError;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Deduplicated, sorted set of discovered domains
pub type DomainSet = BTreeSet<String>;

/// Main discovery engine structure
pub struct DiscoveryEngine {
    client: Arc<dyn HttpGet>,
    search: SearchConfig,
    policy: BackoffPolicy,
    filter: DomainFilter,
    progress: Arc<dyn ProgressSink>,
}

impl DiscoveryEngine {
    /// Creates a new discovery engine
    ///
    /// # Arguments
    ///
    /// * `config` - Search, backoff and filter settings
    /// * `client` - HTTP client used for result pages
    /// * `progress` - Receives operator-facing status messages
    pub fn new(config: &Config, client: Arc<dyn HttpGet>, progress: Arc<dyn ProgressSink>) -> Self {
        Self {
            client,
            search: config.search.clone(),
            policy: BackoffPolicy::from_config(&config.backoff),
            filter: DomainFilter::from_config(&config.filter),
            progress,
        }
    }

    /// Result page URL for a keyword at the given offset
    ///
    /// Spaces in the keyword are form-encoded as `+`.
    pub fn page_url(&self, keyword: &str, start: u32) -> Result<String, SweepError> {
        let mut url = Url::parse(&self.search.endpoint)?;
        url.query_pairs_mut()
            .append_pair("q", keyword)
            .append_pair("start", &start.to_string());
        Ok(url.into())
    }

    /// URL of the "related questions" result variant for a keyword
    pub fn related_questions_url(&self, keyword: &str) -> Result<String, SweepError> {
        let mut url = Url::parse(&self.search.endpoint)?;
        url.query_pairs_mut()
            .append_pair("q", keyword)
            .append_pair("sa", "X")
            .append_pair("ved", &self.search.related_questions_ved);
        Ok(url.into())
    }

    /// All URLs fetched for one keyword, in fetch order
    ///
    /// Page `i` is fetched at offset `i * results_per_page`; the related
    /// questions variant comes last.
    pub fn search_urls(&self, keyword: &str, pages: u32) -> Result<Vec<String>, SweepError> {
        let mut urls = (0..pages)
            .map(|page| self.page_url(keyword, page * self.search.results_per_page))
            .collect::<Result<Vec<_>, _>>()?;
        urls.push(self.related_questions_url(keyword)?);
        Ok(urls)
    }

    /// Discovers candidate domains for a list of keywords
    ///
    /// Keywords are processed strictly one after another, one request at a
    /// time. A keyword that fails is reported and skipped; the remaining
    /// keywords still run. The final set is written to `output_path` (a
    /// write failure is reported, not returned) and returned either way.
    ///
    /// Cancellation is honored between keywords and between pages; the
    /// domains gathered up to that point are still written and returned.
    pub async fn discover(
        &self,
        keywords: &[String],
        pages_per_keyword: u32,
        output_path: &Path,
        cancel: &CancellationToken,
    ) -> DomainSet {
        let mut domains = DomainSet::new();
        let total = keywords.len();

        for (idx, keyword) in keywords.iter().enumerate() {
            if cancel.is_cancelled() {
                self.progress.emit("Discovery cancelled");
                break;
            }

            self.progress.emit(&format!(
                "Searching for keyword: {} ({}/{})",
                keyword,
                idx + 1,
                total
            ));

            match self.discover_keyword(keyword, pages_per_keyword, cancel).await {
                Ok(found) => {
                    tracing::debug!("Keyword '{}' yielded {} domains", keyword, found.len());
                    domains.extend(found);
                }
                Err(e) => {
                    self.progress.emit(&format!(
                        "Error occurred while searching for {}: {}",
                        keyword, e
                    ));
                }
            }
        }

        match write_domain_list(&domains, output_path) {
            Ok(()) => self.progress.emit(&format!(
                "Found {} unique sites for the provided keywords.",
                domains.len()
            )),
            Err(e) => self.progress.emit(&format!(
                "Error writing domain list to {}: {}",
                output_path.display(),
                e
            )),
        }

        domains
    }

    /// Collects the in-scope domains of one keyword
    ///
    /// On cancellation the links of the pages fetched so far are kept.
    async fn discover_keyword(
        &self,
        keyword: &str,
        pages: u32,
        cancel: &CancellationToken,
    ) -> Result<DomainSet, SweepError> {
        let mut links = HashSet::new();

        for url in self.search_urls(keyword, pages)? {
            if cancel.is_cancelled() {
                break;
            }

            self.progress.emit(&format!("Extracting links from {}", url));

            if let Some(html) = fetch_with_backoff(
                self.client.as_ref(),
                &url,
                &self.policy,
                self.progress.as_ref(),
                cancel,
            )
            .await
            {
                links.extend(extract_links(&html, &self.search.redirect_prefix));
            }
        }

        Ok(links
            .iter()
            .map(|link| link_domain(link))
            .filter(|domain| self.filter.is_in_scope(domain))
            .collect())
    }
}

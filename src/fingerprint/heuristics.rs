//! Detection heuristics for a single domain
//!
//! # Probe Order
//!
//! | Step | Request | Positive when | Version |
//! |------|---------|---------------|---------|
//! | 1 | `GET /` | lowercased body contains a marker | generator meta tag |
//! | 2 | `GET /{file}` for each common file | status 200 | Unknown |
//! | 3 | `GET /{api-path}` | status 200 and JSON content type | Unknown |
//!
//! The first positive step wins. A failed or non-2xx root request ends the
//! probe with an error; failures in steps 2 and 3 only skip that request.
//! No request is retried.

use crate::config::ScannerConfig;
use crate::crawler::{extract_generator, FetchError, HttpGet};
use crate::fingerprint::{DetectionMethod, Version};
use std::sync::Arc;
use std::time::Duration;

/// Returns true if the lowercased body contains any of the markers
pub fn contains_marker(body: &str, markers: &[String]) -> bool {
    let body = body.to_lowercase();
    markers.iter().any(|m| body.contains(m.as_str()))
}

/// Reads the version from the generator meta tag of a page
///
/// The version is the last whitespace-separated token of the generator
/// content, taken only when the content mentions `platform_name`
/// (case-insensitive). A generator without a version number therefore
/// yields its last word.
///
/// # Example
///
/// ```
/// use wp_sweep::fingerprint::{version_from_generator, Version};
///
/// let html = r#"<meta name="generator" content="WordPress 6.4.2">"#;
/// assert_eq!(version_from_generator(html, "wordpress"), Version::Known("6.4.2".to_string()));
/// ```
pub fn version_from_generator(html: &str, platform_name: &str) -> Version {
    let platform = platform_name.to_lowercase();

    extract_generator(html)
        .filter(|content| content.to_lowercase().contains(&platform))
        .and_then(|content| content.split_whitespace().last().map(str::to_string))
        .map_or(Version::Unknown, Version::Known)
}

/// Runs the detection heuristics against candidate domains
pub struct Probe {
    client: Arc<dyn HttpGet>,
    config: ScannerConfig,
}

impl Probe {
    pub fn new(client: Arc<dyn HttpGet>, config: ScannerConfig) -> Self {
        let markers = config.markers.iter().map(|m| m.to_lowercase()).collect();
        Self {
            client,
            config: ScannerConfig { markers, ..config },
        }
    }

    /// Candidate URL for a domain, e.g. `http://example.com`
    pub fn site_url(&self, domain: &str) -> String {
        format!("{}://{}", self.config.scheme, domain)
    }

    fn timeout(&self) -> Option<Duration> {
        Some(self.config.request_timeout())
    }

    /// Probes one domain
    ///
    /// # Returns
    ///
    /// * `Ok(Some((method, version)))` - The platform was detected
    /// * `Ok(None)` - The site answered but shows no sign of the platform
    /// * `Err(FetchError)` - The root page could not be fetched
    pub async fn fingerprint(
        &self,
        domain: &str,
    ) -> Result<Option<(DetectionMethod, Version)>, FetchError> {
        let base = self.site_url(domain);

        let root = self.client.get(&base, self.timeout()).await?;
        if !root.is_success() {
            return Err(FetchError::Status(root.status));
        }

        if contains_marker(&root.body, &self.config.markers) {
            let version = version_from_generator(&root.body, &self.config.platform_name);
            return Ok(Some((DetectionMethod::ContentMarker, version)));
        }

        if self.has_common_file(&base).await {
            return Ok(Some((DetectionMethod::CommonFile, Version::Unknown)));
        }

        if self.has_rest_api(&base).await {
            return Ok(Some((DetectionMethod::RestApi, Version::Unknown)));
        }

        Ok(None)
    }

    async fn has_common_file(&self, base: &str) -> bool {
        for file in &self.config.common_files {
            let url = format!("{}/{}", base, file);
            match self.client.get(&url, self.timeout()).await {
                Ok(response) if response.status == 200 => {
                    tracing::debug!("{} answered 200", url);
                    return true;
                }
                Ok(_) => {}
                Err(e) => tracing::debug!("Skipping {}: {}", url, e),
            }
        }
        false
    }

    async fn has_rest_api(&self, base: &str) -> bool {
        let url = format!("{}/{}", base, self.config.api_path);
        match self.client.get(&url, self.timeout()).await {
            Ok(response) => {
                response.status == 200 && response.content_type.contains("application/json")
            }
            Err(e) => {
                tracing::debug!("REST API probe of {} failed: {}", url, e);
                false
            }
        }
    }
}

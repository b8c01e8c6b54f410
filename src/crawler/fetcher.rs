//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests made by the discovery and scanning
//! stages, including:
//! - The [`HttpGet`] seam both stages are written against
//! - Building the reqwest client with the configured user agent
//! - Error classification at the network boundary
//! - Exponential backoff retry for search result pages

use crate::config::{BackoffConfig, UserAgentConfig};
use crate::progress::ProgressSink;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Failure of a single HTTP request
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_connect() {
            FetchError::Connect(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Other(e.to_string())
        }
    }
}

/// A fully read HTTP response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Content-Type header value (empty if absent)
    pub content_type: String,
    /// Response body decoded as text
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues HTTP GET requests
///
/// Any status code is returned as `Ok`; only transport failures are errors.
/// Implementations must be shareable across scanner tasks.
#[async_trait]
pub trait HttpGet: Send + Sync {
    async fn get(&self, url: &str, timeout: Option<Duration>) -> Result<HttpResponse, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are followed (candidate sites commonly bounce from `http` to
/// `https`); no cookies or session state are kept between requests.
///
/// # Example
///
/// ```no_run
/// use wp_sweep::config::UserAgentConfig;
/// use wp_sweep::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.value.as_str())
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`HttpGet`] implementation backed by reqwest
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new(config: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

#[async_trait]
impl HttpGet for ReqwestFetcher {
    async fn get(&self, url: &str, timeout: Option<Duration>) -> Result<HttpResponse, FetchError> {
        let mut request = self.client.get(url);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let body = response.text().await?;

        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}

/// Exponential backoff schedule
///
/// After the n-th failed attempt (0-based) the fetcher waits
/// `base_delay * 2^n` before trying again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    pub base_delay: Duration,
    pub max_attempts: u32,
}

impl BackoffPolicy {
    pub fn new(base_delay: Duration, max_attempts: u32) -> Self {
        Self {
            base_delay,
            max_attempts,
        }
    }

    pub fn from_config(config: &BackoffConfig) -> Self {
        Self::new(config.base_delay(), config.max_retries)
    }

    /// Delay to wait after the given failed attempt
    pub fn delay_after(&self, failed_attempt: u32) -> Duration {
        self.base_delay.saturating_mul(1u32 << failed_attempt.min(20))
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::from_config(&BackoffConfig::default())
    }
}

/// Fetches a URL, retrying transient failures with exponential backoff
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | 2xx | Return the body |
/// | Non-2xx status | Retry after backoff delay |
/// | Timeout / connection failure | Retry after backoff delay |
/// | `max_attempts` reached | Report failure, return `None` |
/// | Cancellation | Return `None` without further attempts |
///
/// Each failed attempt and the final failure are reported to `progress`.
///
/// # Returns
///
/// * `Some(String)` - The body of the first successful response
/// * `None` - Every attempt failed or the run was cancelled
pub async fn fetch_with_backoff(
    client: &dyn HttpGet,
    url: &str,
    policy: &BackoffPolicy,
    progress: &dyn ProgressSink,
    cancel: &CancellationToken,
) -> Option<String> {
    let mut last_error = None;

    for attempt in 0..policy.max_attempts {
        if cancel.is_cancelled() {
            return None;
        }

        tracing::debug!("GET {} (attempt {}/{})", url, attempt + 1, policy.max_attempts);

        let error = match client.get(url, None).await {
            Ok(response) if response.is_success() => return Some(response.body),
            Ok(response) => FetchError::Status(response.status),
            Err(e) => e,
        };

        if attempt + 1 == policy.max_attempts {
            tracing::warn!("Giving up on {}: {}", url, error);
            last_error = Some(error);
            break;
        }

        let delay = policy.delay_after(attempt);
        progress.emit(&format!(
            "Error occurred while making request to {}: {}. Retrying in {:?}...",
            url, error, delay
        ));

        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = cancel.cancelled() => return None,
        }
    }

    match last_error {
        Some(error) => progress.emit(&format!(
            "Failed to fetch {} after {} attempts: {}.",
            url, policy.max_attempts, error
        )),
        None => progress.emit(&format!(
            "Failed to fetch {} after {} attempts.",
            url, policy.max_attempts
        )),
    }
    None
}

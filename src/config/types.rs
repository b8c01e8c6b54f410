use crate::output::WriteMode;
use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for wp-sweep
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub backoff: BackoffConfig,
    #[serde(default)]
    pub scanner: ScannerConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Search engine query configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Result page endpoint, queried with `q` and `start` parameters
    pub endpoint: String,

    /// Number of result pages fetched per keyword
    #[serde(rename = "pages-per-keyword")]
    pub pages_per_keyword: u32,

    /// Offset step between consecutive result pages
    #[serde(rename = "results-per-page")]
    pub results_per_page: u32,

    /// `ved` token of the "related questions" result variant
    #[serde(rename = "related-questions-ved")]
    pub related_questions_ved: String,

    /// Href prefix of the engine's redirect-wrapper anchors
    #[serde(rename = "redirect-prefix")]
    pub redirect_prefix: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://www.google.com/search".to_string(),
            pages_per_keyword: 9,
            results_per_page: 10,
            related_questions_ved: "2ahUKEwjK5_jCmNGHAxX3VaQEHQgVHcEQ1QJ6BAgtEAE".to_string(),
            redirect_prefix: "/url?q=".to_string(),
        }
    }
}

/// Retry policy for search result fetches
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackoffConfig {
    /// Delay after the first failed attempt (milliseconds), doubled after each failure
    #[serde(rename = "base-delay-ms")]
    pub base_delay_ms: u64,

    /// Total number of attempts per URL
    #[serde(rename = "max-retries")]
    pub max_retries: u32,
}

impl BackoffConfig {
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: 2000,
            max_retries: 5,
        }
    }
}

/// Fingerprint scanner configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Number of domains probed concurrently
    pub concurrency: u32,

    /// Timeout applied to every probe request (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Scheme used to build the candidate URL of each domain
    pub scheme: String,

    /// Name expected in the generator meta tag
    #[serde(rename = "platform-name")]
    pub platform_name: String,

    /// Path markers searched for in the lowercased root page body
    pub markers: Vec<String>,

    /// Well-known files probed when no marker is found
    #[serde(rename = "common-files")]
    pub common_files: Vec<String>,

    /// REST API discovery path
    #[serde(rename = "api-path")]
    pub api_path: String,
}

impl ScannerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            concurrency: 10,
            request_timeout_secs: 10,
            scheme: "http".to_string(),
            platform_name: "wordpress".to_string(),
            markers: ["/wp-content/", "/wp-admin/", "/wp-json/", "/wp-login/"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            common_files: ["readme.html", "wp-links-opml.php", "license.txt"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            api_path: "wp-json/".to_string(),
        }
    }
}

/// Domain exclusion configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Substrings that exclude a host when found in its lowercased form
    pub excluded: Vec<String>,

    /// Whether an empty or unparseable host counts as in scope
    #[serde(rename = "accept-empty-host")]
    pub accept_empty_host: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            excluded: [
                "google.com",
                "amazon.com",
                "facebook.com",
                "twitter.com",
                "linkedin.com",
                "instagram.com",
                "youtube.com",
                "gov",
                "amazon",
                "google",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            accept_empty_host: false,
        }
    }
}

/// User agent sent with every request
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: format!(
                "Mozilla/5.0 (compatible; wp-sweep/{})",
                env!("CARGO_PKG_VERSION")
            ),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the discovered domain list
    #[serde(rename = "domains-path")]
    pub domains_path: String,

    /// Path of the `site,version` CSV store
    #[serde(rename = "results-path")]
    pub results_path: String,

    /// Whether the CSV store is appended to or recreated
    pub mode: WriteMode,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            domains_path: "domains.txt".to_string(),
            results_path: "wordpress_sites.csv".to_string(),
            mode: WriteMode::Append,
        }
    }
}

//! wp-sweep: keyword-driven WordPress discovery and fingerprinting
//!
//! This crate queries a search engine for keywords, collects the outbound
//! domains of the result pages, and probes each domain to decide whether it
//! runs WordPress and which version it advertises.

pub mod config;
pub mod crawler;
pub mod fingerprint;
pub mod keywords;
pub mod output;
pub mod progress;
pub mod url;

use thiserror::Error;

/// Main error type for wp-sweep operations
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for wp-sweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{DiscoveryEngine, DomainSet};
pub use fingerprint::{DetectionMethod, FingerprintResult, FingerprintScanner, Version};
pub use output::{CsvResultSink, ResultSink, WriteMode};
pub use progress::ProgressSink;
pub use self::url::{network_location, DomainFilter};

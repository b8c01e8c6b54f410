//! WordPress fingerprinting
//!
//! This module decides whether a domain runs WordPress using static HTML and
//! response headers only:
//! - Path markers in the root page, with the version read from the
//!   generator meta tag
//! - Well-known files answering 200
//! - A JSON REST API discovery endpoint
//!
//! The [`FingerprintScanner`] runs these probes for many domains with a
//! bounded number in flight.

mod heuristics;
mod scanner;

pub use heuristics::{contains_marker, version_from_generator, Probe};
pub use scanner::FingerprintScanner;

use std::fmt;

/// Best-effort version of a detected site
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Version {
    Known(String),
    Unknown,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::Known(v) => f.write_str(v),
            Version::Unknown => f.write_str("Unknown"),
        }
    }
}

/// Heuristic that produced a positive detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DetectionMethod {
    /// Platform path marker found in the root page
    ContentMarker,
    /// A well-known platform file answered 200
    CommonFile,
    /// The REST API discovery path answered 200 with JSON
    RestApi,
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DetectionMethod::ContentMarker => "content-marker",
            DetectionMethod::CommonFile => "common-file",
            DetectionMethod::RestApi => "rest-api",
        };
        f.write_str(name)
    }
}

/// A positive detection for one domain
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FingerprintResult {
    /// The scanned domain
    pub site: String,
    /// The advertised version, if any
    pub version: Version,
    /// The heuristic that detected the platform
    pub method: DetectionMethod,
}

//! Crawler module for search-driven domain discovery
//!
//! This module contains the discovery side of wp-sweep, including:
//! - HTTP fetching with exponential backoff
//! - Redirect-wrapper link extraction from result pages
//! - The keyword-by-keyword discovery loop

mod discovery;
mod fetcher;
mod parser;

pub use discovery::{DiscoveryEngine, DomainSet};
pub use fetcher::{
    build_http_client, fetch_with_backoff, BackoffPolicy, FetchError, HttpGet, HttpResponse,
    ReqwestFetcher,
};
pub use parser::{extract_generator, extract_links};

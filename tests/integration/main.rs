//! Integration tests for wp-sweep
//!
//! These tests use wiremock to stand in for the search engine and for the
//! candidate sites, and tempfile for every file the pipeline writes.

mod discovery_tests;
mod pipeline_tests;
mod scanner_tests;

use std::sync::{Arc, Mutex};
use wp_sweep::crawler::{HttpGet, ReqwestFetcher};
use wp_sweep::config::UserAgentConfig;

/// Real reqwest-backed client for talking to mock servers
pub fn http_client() -> Arc<dyn HttpGet> {
    Arc::new(ReqwestFetcher::new(&UserAgentConfig::default()).expect("Failed to build client"))
}

/// Progress sink that keeps every message
pub fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str) + Send + Sync + 'static) {
    let messages = Arc::new(Mutex::new(Vec::new()));
    let sink = {
        let messages = Arc::clone(&messages);
        move |m: &str| messages.lock().unwrap().push(m.to_string())
    };
    (messages, sink)
}

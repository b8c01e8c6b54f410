//! Discovery, scan and persistence chained together

use crate::http_client;
use std::sync::Arc;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wp_sweep::config::Config;
use wp_sweep::crawler::DiscoveryEngine;
use wp_sweep::fingerprint::{DetectionMethod, FingerprintResult, FingerprintScanner, Version};
use wp_sweep::output::{read_existing_sites, CsvResultSink, PersistSummary, ResultSink, WriteMode};
use wp_sweep::progress::NullProgress;

#[tokio::test]
async fn test_discover_scan_persist() {
    let wp_site = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<meta name="generator" content="WordPress 6.5.3"><script src="/wp-includes/js/a.js"></script><a href="/wp-admin/">Admin</a>"#,
        ))
        .mount(&wp_site)
        .await;

    let static_site = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>hand-written html</p>"))
        .mount(&static_site)
        .await;

    let search = MockServer::start().await;
    let page = format!(
        r#"<a href="/url?q={}/&sa=U">WP</a>
           <a href="/url?q={}/about&sa=U">Static</a>
           <a href="/url?q=https://www.youtube.com/watch&sa=U">Video</a>"#,
        wp_site.uri(),
        static_site.uri()
    );
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "bakery blog"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(&search)
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.search.endpoint = format!("{}/search", search.uri());
    config.backoff.base_delay_ms = 5;
    config.output.domains_path = dir.path().join("domains.txt").display().to_string();
    config.output.results_path = dir.path().join("sites.csv").display().to_string();

    let cancel = CancellationToken::new();
    let client = http_client();

    let engine = DiscoveryEngine::new(&config, Arc::clone(&client), Arc::new(NullProgress));
    let domains = engine
        .discover(
            &["bakery blog".to_string()],
            1,
            dir.path().join("domains.txt").as_path(),
            &cancel,
        )
        .await;
    assert_eq!(domains.len(), 2);

    let scanner = FingerprintScanner::new(&config.scanner, client, Arc::new(NullProgress));
    let results = scanner.scan(&domains, &cancel).await;

    let sink = CsvResultSink::new(&config.output.results_path, WriteMode::Append, Arc::new(NullProgress));
    let summary = sink.persist(&results);

    let wp_domain = wp_site.address().to_string();
    assert_eq!(summary, PersistSummary { written: 1, skipped: 0 });
    assert_eq!(
        std::fs::read_to_string(sink.path()).unwrap(),
        format!("site,version\n{},6.5.3\n", wp_domain)
    );
}

fn detected(site: &str, version: &str) -> FingerprintResult {
    FingerprintResult {
        site: site.to_string(),
        version: Version::Known(version.to_string()),
        method: DetectionMethod::ContentMarker,
    }
}

#[test]
fn test_append_skips_sites_from_previous_runs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sites.csv");
    std::fs::write(&path, "site,version\nx.com,5.8\n").unwrap();

    let sink = CsvResultSink::new(&path, WriteMode::Append, Arc::new(NullProgress));
    let summary = sink.persist(&[detected("x.com", "6.0"), detected("y.com", "6.1")]);

    assert_eq!(summary, PersistSummary { written: 1, skipped: 1 });
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "site,version\nx.com,5.8\ny.com,6.1\n"
    );

    let sites = read_existing_sites(&path).unwrap();
    assert_eq!(sites.len(), 2);
}

#[test]
fn test_create_replaces_previous_results() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sites.csv");
    std::fs::write(&path, "site,version\nold.com,4.9\n").unwrap();

    let sink = CsvResultSink::new(&path, WriteMode::Create, Arc::new(NullProgress));
    sink.persist(&[detected("new.com", "6.2")]);

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "site,version\nnew.com,6.2\n"
    );
}

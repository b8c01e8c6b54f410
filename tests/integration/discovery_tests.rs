//! Discovery against a mock search engine

use crate::{http_client, recorder};
use std::sync::Arc;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wp_sweep::config::Config;
use wp_sweep::crawler::{DiscoveryEngine, DomainSet};
use wp_sweep::progress::NullProgress;

fn search_config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.search.endpoint = format!("{}/search", server.uri());
    config.backoff.base_delay_ms = 5;
    config.backoff.max_retries = 2;
    config
}

const RESULT_PAGE: &str = r#"<html><body>
    <a href="/search?q=plugin+review&start=10">Next</a>
    <a href="/url?q=http://a.com/&sa=U&ved=abc">A</a>
    <a href="/url?q=http://google.com/maps&sa=U&ved=def">Maps</a>
</body></html>"#;

#[tokio::test]
async fn test_single_keyword_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "plugin review"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RESULT_PAGE))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("domains.txt");
    let engine = DiscoveryEngine::new(&search_config(&server), http_client(), Arc::new(NullProgress));

    let domains = engine
        .discover(&["plugin review".to_string()], 1, &out, &CancellationToken::new())
        .await;

    let expected: DomainSet = ["a.com".to_string()].into_iter().collect();
    assert_eq!(domains, expected);
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "a.com\n");

    // one result page and the related questions variant
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].url.query().unwrap().contains("start=0"));
    assert!(requests[1].url.query().unwrap().contains("sa=X"));
}

#[tokio::test]
async fn test_failing_keyword_is_isolated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "blocked"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "plugin review"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RESULT_PAGE))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("domains.txt");
    let (messages, sink) = recorder();
    let engine = DiscoveryEngine::new(&search_config(&server), http_client(), Arc::new(sink));

    let keywords = vec!["blocked".to_string(), "plugin review".to_string()];
    let domains = engine
        .discover(&keywords, 1, &out, &CancellationToken::new())
        .await;

    assert_eq!(domains.into_iter().collect::<Vec<_>>(), vec!["a.com"]);

    // 2 URLs x 2 attempts for the blocked keyword, then 2 URLs
    assert_eq!(server.received_requests().await.unwrap().len(), 6);

    let messages = messages.lock().unwrap();
    assert!(messages
        .iter()
        .any(|m| m.starts_with("Failed to fetch") && m.contains("after 2 attempts: HTTP status 429")));
    assert!(messages.contains(&"Searching for keyword: plugin review (2/2)".to_string()));
    assert_eq!(
        messages.last().unwrap(),
        "Found 1 unique sites for the provided keywords."
    );
}

#[tokio::test]
async fn test_domains_merge_across_keywords_sorted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "first"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<a href="/url?q=https://zeta.org/x&sa=U">Z</a><a href="/url?q=http://b.net&sa=U">B</a>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "second"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<a href="/url?q=http://b.net/page&sa=U">B</a><a href="/url?q=http://alpha.io&sa=U">A</a>"#,
        ))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("domains.txt");
    let engine = DiscoveryEngine::new(&search_config(&server), http_client(), Arc::new(NullProgress));

    engine
        .discover(
            &["first".to_string(), "second".to_string()],
            2,
            &out,
            &CancellationToken::new(),
        )
        .await;

    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        "alpha.io\nb.net\nzeta.org\n"
    );
}

//! Fingerprinting against mock candidate sites

use crate::{http_client, recorder};
use std::collections::HashSet;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wp_sweep::config::ScannerConfig;
use wp_sweep::crawler::DomainSet;
use wp_sweep::fingerprint::{DetectionMethod, FingerprintResult, FingerprintScanner, Version};
use wp_sweep::progress::NullProgress;

const PLAIN_PAGE: &str = "<html><head><title>Bakery</title></head><body>Fresh bread</body></html>";

const WP_PAGE: &str = r#"<html><head>
    <meta name="generator" content="WordPress 6.4.2">
    <link rel="stylesheet" href="https://a.test/wp-content/themes/twentytwentyfour/style.css">
</head><body>Blog</body></html>"#;

/// Domain string for a mock server, e.g. `127.0.0.1:43121`
fn domain_of(server: &MockServer) -> String {
    server.address().to_string()
}

async fn serve_root(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

fn find<'a>(results: &'a [FingerprintResult], site: &str) -> Option<&'a FingerprintResult> {
    results.iter().find(|r| r.site == site)
}

/// One site per heuristic plus a site that matches nothing
struct Sites {
    marker: MockServer,
    file: MockServer,
    api: MockServer,
    plain: MockServer,
}

impl Sites {
    async fn start() -> Self {
        // marker in root page with generator version
        let marker = MockServer::start().await;
        serve_root(&marker, WP_PAGE).await;

        // only a well-known file gives it away
        let file = MockServer::start().await;
        serve_root(&file, PLAIN_PAGE).await;
        Mock::given(method("GET"))
            .and(path("/license.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string("GNU General Public License"))
            .mount(&file)
            .await;

        // only the REST API answers
        let api = MockServer::start().await;
        serve_root(&api, PLAIN_PAGE).await;
        Mock::given(method("GET"))
            .and(path("/wp-json/"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"name":"Blog","namespaces":["wp/v2"]}"#,
                "application/json",
            ))
            .mount(&api)
            .await;

        // nothing matches
        let plain = MockServer::start().await;
        serve_root(&plain, PLAIN_PAGE).await;

        Self {
            marker,
            file,
            api,
            plain,
        }
    }

    fn domains(&self) -> DomainSet {
        [&self.marker, &self.file, &self.api, &self.plain]
            .iter()
            .map(|s| domain_of(s))
            .collect()
    }
}

fn scanner() -> FingerprintScanner {
    FingerprintScanner::new(
        &ScannerConfig::default(),
        http_client(),
        Arc::new(NullProgress),
    )
}

#[tokio::test]
async fn test_each_heuristic_detects_its_site() {
    let sites = Sites::start().await;

    let results = scanner()
        .scan(&sites.domains(), &CancellationToken::new())
        .await;

    assert_eq!(results.len(), 3);

    let marker = find(&results, &domain_of(&sites.marker)).unwrap();
    assert_eq!(marker.method, DetectionMethod::ContentMarker);
    assert_eq!(marker.version, Version::Known("6.4.2".to_string()));

    let file = find(&results, &domain_of(&sites.file)).unwrap();
    assert_eq!(file.method, DetectionMethod::CommonFile);
    assert_eq!(file.version, Version::Unknown);

    let api = find(&results, &domain_of(&sites.api)).unwrap();
    assert_eq!(api.method, DetectionMethod::RestApi);
    assert_eq!(api.version, Version::Unknown);

    assert!(find(&results, &domain_of(&sites.plain)).is_none());
}

#[tokio::test]
async fn test_results_do_not_depend_on_pool_size() {
    let sites = Sites::start().await;
    let domains = sites.domains();

    let wide: HashSet<FingerprintResult> = scanner()
        .scan(&domains, &CancellationToken::new())
        .await
        .into_iter()
        .collect();
    let serial: HashSet<FingerprintResult> = scanner()
        .with_concurrency(1)
        .scan(&domains, &CancellationToken::new())
        .await
        .into_iter()
        .collect();

    assert_eq!(wide.len(), 3);
    assert_eq!(wide, serial);
}

#[tokio::test]
async fn test_erroring_sites_are_not_detected() {
    let broken = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&broken)
        .await;

    // no mocks mounted, every path answers 404
    let missing = MockServer::start().await;

    let domains: DomainSet = [domain_of(&broken), domain_of(&missing)].into_iter().collect();
    let (messages, sink) = recorder();
    let scanner = FingerprintScanner::new(&ScannerConfig::default(), http_client(), Arc::new(sink));

    let results = scanner.scan(&domains, &CancellationToken::new()).await;

    assert!(results.is_empty());
    // the root request is not retried and ends the probe
    assert_eq!(broken.received_requests().await.unwrap().len(), 1);
    assert_eq!(missing.received_requests().await.unwrap().len(), 1);

    let mut messages = messages.lock().unwrap().clone();
    messages.sort();
    let mut expected = vec![
        format!("Checked WordPress version for {}", domain_of(&broken)),
        format!("Checked WordPress version for {}", domain_of(&missing)),
    ];
    expected.sort();
    assert_eq!(messages, expected);
}

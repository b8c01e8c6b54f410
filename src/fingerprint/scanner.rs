//! Bounded-concurrency fingerprint scanner
//!
//! Each domain is probed by its own Tokio task, but a task is only spawned
//! once a permit from the pool semaphore is available, so at most
//! `concurrency` probes are in flight. Positive matches are sent to a
//! single collector channel; nothing else is shared between tasks.

use crate::config::ScannerConfig;
use crate::crawler::{DomainSet, HttpGet};
use crate::fingerprint::heuristics::Probe;
use crate::fingerprint::FingerprintResult;
use crate::progress::ProgressSink;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Scans domain sets for WordPress installations
pub struct FingerprintScanner {
    probe: Arc<Probe>,
    concurrency: usize,
    progress: Arc<dyn ProgressSink>,
}

impl FingerprintScanner {
    /// Creates a scanner from the scanner configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Probe settings and pool size
    /// * `client` - HTTP client shared by all probes
    /// * `progress` - Receives one message per scanned domain
    pub fn new(
        config: &ScannerConfig,
        client: Arc<dyn HttpGet>,
        progress: Arc<dyn ProgressSink>,
    ) -> Self {
        Self {
            probe: Arc::new(Probe::new(client, config.clone())),
            concurrency: config.concurrency.max(1) as usize,
            progress,
        }
    }

    /// Overrides the number of domains probed concurrently
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Probes every domain and returns the positive matches
    ///
    /// Domains are dispatched in set order; results arrive in completion
    /// order, so callers must not rely on the order of the returned list.
    /// When `cancel` fires, no further domains are dispatched and the
    /// in-flight probes are awaited.
    pub async fn scan(
        &self,
        domains: &DomainSet,
        cancel: &CancellationToken,
    ) -> Vec<FingerprintResult> {
        tracing::info!(
            "Scanning {} domains with {} workers",
            domains.len(),
            self.concurrency
        );

        let pool = Arc::new(Semaphore::new(self.concurrency));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut workers = JoinSet::new();

        for domain in domains {
            let permit = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    self.progress.emit("Scan cancelled, waiting for in-flight domains");
                    break;
                }
                permit = Arc::clone(&pool).acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => break,
                },
            };

            let probe = Arc::clone(&self.probe);
            let progress = Arc::clone(&self.progress);
            let tx = tx.clone();
            let domain = domain.clone();

            workers.spawn(async move {
                let _permit = permit;
                if let Some(result) = scan_domain(&probe, &domain, progress.as_ref()).await {
                    let _ = tx.send(result);
                }
            });
        }
        drop(tx);

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Scan worker failed: {}", e);
            }
        }

        let mut results = Vec::new();
        while let Some(result) = rx.recv().await {
            results.push(result);
        }

        tracing::info!("Scan finished: {} WordPress sites", results.len());
        results
    }
}

/// Runs the full probe sequence for one domain
async fn scan_domain(
    probe: &Probe,
    domain: &str,
    progress: &dyn ProgressSink,
) -> Option<FingerprintResult> {
    let outcome = match probe.fingerprint(domain).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!("Error accessing {}: {}", probe.site_url(domain), e);
            None
        }
    };

    progress.emit(&format!("Checked WordPress version for {}", domain));

    outcome.map(|(method, version)| FingerprintResult {
        site: domain.to_string(),
        version,
        method,
    })
}

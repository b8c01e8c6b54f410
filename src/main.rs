//! wp-sweep main entry point
//!
//! This is the command-line interface for keyword-driven WordPress discovery
//! and fingerprinting.

use anyhow::{bail, Context};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use wp_sweep::config::{load_config_with_hash, validate, Config};
use wp_sweep::crawler::{DiscoveryEngine, HttpGet, ReqwestFetcher};
use wp_sweep::fingerprint::FingerprintScanner;
use wp_sweep::keywords::{load_domains, load_keywords};
use wp_sweep::output::{print_statistics, CsvResultSink, ResultSink, RunStatistics, WriteMode};
use wp_sweep::progress::{ProgressSink, TracingProgress};

/// wp-sweep: find WordPress sites through search results
///
/// wp-sweep searches each keyword, collects the domains linked from the
/// result pages, and probes every domain for WordPress, recording the
/// advertised version in a CSV file.
#[derive(Parser, Debug)]
#[command(name = "wp-sweep")]
#[command(version)]
#[command(about = "Keyword-driven WordPress discovery and fingerprinting", long_about = None)]
struct Cli {
    /// File with one search keyword per line
    #[arg(value_name = "KEYWORDS", required_unless_present = "scan_only")]
    keywords: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Result pages fetched per keyword
    #[arg(short, long)]
    pages: Option<u32>,

    /// Where to write the discovered domain list
    #[arg(long, value_name = "FILE")]
    domains_out: Option<PathBuf>,

    /// Where to write the detected WordPress sites
    #[arg(long, value_name = "FILE")]
    results_out: Option<PathBuf>,

    /// Overwrite the results file instead of appending to it
    #[arg(long)]
    create: bool,

    /// Number of domains probed concurrently
    #[arg(long)]
    concurrency: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the plan without sending any request
    #[arg(long)]
    dry_run: bool,

    /// Stop after writing the domain list
    #[arg(long, conflicts_with = "scan_only")]
    discover_only: bool,

    /// Skip discovery and scan the domains listed in FILE
    #[arg(long, value_name = "FILE", conflicts_with = "keywords")]
    scan_only: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_effective_config(&cli)?;

    if cli.dry_run {
        return handle_dry_run(&cli, &config);
    }

    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    let client: Arc<dyn HttpGet> = Arc::new(
        ReqwestFetcher::new(&config.user_agent).context("Failed to build HTTP client")?,
    );
    let progress: Arc<dyn ProgressSink> = Arc::new(TracingProgress);

    let (keyword_count, domains) = match &cli.scan_only {
        Some(path) => {
            let domains = load_domains(path)
                .with_context(|| format!("Failed to read domain list {}", path.display()))?;
            tracing::info!("Loaded {} domains from {}", domains.len(), path.display());
            (0, domains)
        }
        None => {
            let Some(path) = cli.keywords.as_deref() else {
                bail!("a keyword file is required unless --scan-only is given");
            };
            let keywords = load_keywords(path)
                .with_context(|| format!("Failed to read keyword file {}", path.display()))?;
            let engine = DiscoveryEngine::new(&config, Arc::clone(&client), Arc::clone(&progress));
            let domains = engine
                .discover(
                    &keywords,
                    config.search.pages_per_keyword,
                    Path::new(&config.output.domains_path),
                    &cancel,
                )
                .await;
            (keywords.len(), domains)
        }
    };

    if cli.discover_only {
        tracing::info!("Discovery finished, skipping scan");
        return Ok(());
    }

    if cancel.is_cancelled() {
        tracing::warn!("Run cancelled before scanning");
        return Ok(());
    }

    let scanner = FingerprintScanner::new(&config.scanner, client, Arc::clone(&progress));
    let results = scanner.scan(&domains, &cancel).await;

    let sink = CsvResultSink::new(&config.output.results_path, config.output.mode, progress);
    let persisted = sink.persist(&results);

    if !cli.quiet {
        let stats = RunStatistics::from_results(keyword_count, domains.len(), &results, persisted);
        print_statistics(&stats);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wp_sweep=info,progress=info,warn"),
            1 => EnvFilter::new("wp_sweep=debug,progress=info,info"),
            2 => EnvFilter::new("wp_sweep=trace,progress=info,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (or defaults) and applies command-line overrides
fn load_effective_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(pages) = cli.pages {
        config.search.pages_per_keyword = pages;
    }
    if let Some(concurrency) = cli.concurrency {
        config.scanner.concurrency = concurrency;
    }
    if let Some(path) = &cli.domains_out {
        config.output.domains_path = path.display().to_string();
    }
    if let Some(path) = &cli.results_out {
        config.output.results_path = path.display().to_string();
    }
    if cli.create {
        config.output.mode = WriteMode::Create;
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Cancels the run on the first Ctrl-C
fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing in-flight work");
            cancel.cancel();
        }
    });
}

/// Handles the --dry-run mode: validates inputs and shows what would run
fn handle_dry_run(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    println!("=== wp-sweep Dry Run ===\n");

    println!("Search:");
    println!("  Endpoint: {}", config.search.endpoint);
    println!("  Pages per keyword: {}", config.search.pages_per_keyword);
    println!(
        "  Backoff: {}ms base, {} attempts",
        config.backoff.base_delay_ms, config.backoff.max_retries
    );

    println!("\nScanner:");
    println!("  Concurrency: {}", config.scanner.concurrency);
    println!("  Timeout: {}s", config.scanner.request_timeout_secs);
    println!("  Scheme: {}", config.scanner.scheme);

    println!("\nFilter ({} exclusions):", config.filter.excluded.len());
    for entry in &config.filter.excluded {
        println!("  - {}", entry);
    }

    println!("\nOutput:");
    println!("  Domains: {}", config.output.domains_path);
    println!(
        "  Results: {} ({:?})",
        config.output.results_path, config.output.mode
    );

    println!();
    match (&cli.scan_only, cli.keywords.as_deref()) {
        (Some(path), _) => {
            let domains = load_domains(path)
                .with_context(|| format!("Failed to read domain list {}", path.display()))?;
            println!("✓ Would scan {} domains from {}", domains.len(), path.display());
        }
        (None, Some(path)) => {
            let keywords = load_keywords(path)
                .with_context(|| format!("Failed to read keyword file {}", path.display()))?;
            let requests = keywords.len() * (config.search.pages_per_keyword as usize + 1);
            println!(
                "✓ Would search {} keywords ({} result page requests)",
                keywords.len(),
                requests
            );
        }
        (None, None) => bail!("a keyword file is required unless --scan-only is given"),
    }

    println!("✓ Configuration is valid");
    Ok(())
}

//! Heading-Crawler main entry point
//!
//! This is the command-line interface for the Heading-Crawler heading word counter.

use anyhow::{Context, Result};
use clap::Parser;
use heading_crawler::config::{load_config_with_hash, validate, validate_seed_url, Config};
use heading_crawler::crawler::build_engine;
use heading_crawler::output::{handlers_from_config, print_report, write_outputs};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Heading-Crawler: a breadth-first heading word counter
///
/// Heading-Crawler starts at a seed URL, follows links in parallel batches,
/// and counts every word found in h1-h3 headings outside page headers,
/// footers and navigation. Results are written as a keyword JSON file and a
/// markdown summary.
#[derive(Parser, Debug)]
#[command(name = "heading-crawler")]
#[command(version = "1.0.0")]
#[command(about = "A breadth-first heading word counter", long_about = None)]
struct Cli {
    /// Absolute http(s) URL to start crawling from
    #[arg(value_name = "SEED_URL")]
    seed_url: String,

    /// Maximum number of pages to process
    #[arg(long, value_name = "N")]
    pages_to_parse: Option<u64>,

    /// Number of concurrent workers (defaults to the number of cores)
    #[arg(long, value_name = "N")]
    workers: Option<usize>,

    /// Path to TOML configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Where to write the keyword frequency JSON
    #[arg(long, value_name = "PATH")]
    keywords_path: Option<String>,

    /// Where to write the markdown summary
    #[arg(long, value_name = "PATH")]
    summary_path: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_effective_config(&cli)?;

    if cli.dry_run {
        handle_dry_run(&cli.seed_url, &config)
    } else {
        handle_crawl(&cli.seed_url, &config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("heading_crawler=info,warn"),
            1 => EnvFilter::new("heading_crawler=debug,info"),
            2 => EnvFilter::new("heading_crawler=trace,debug"),
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

/// Loads the config file if given, applies CLI overrides and re-validates
fn load_effective_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(pages) = cli.pages_to_parse {
        config.crawler.pages_to_parse = pages;
    }
    if let Some(workers) = cli.workers {
        config.crawler.workers = Some(workers);
    }
    if let Some(path) = &cli.keywords_path {
        config.output.keywords_path = path.clone();
    }
    if let Some(path) = &cli.summary_path {
        config.output.summary_path = path.clone();
    }

    validate(&config).context("invalid configuration")?;
    Ok(config)
}

/// Handles the --dry-run mode: validates inputs and shows what would be crawled
fn handle_dry_run(seed_url: &str, config: &Config) -> Result<()> {
    let seed = validate_seed_url(seed_url).context("invalid seed URL")?;

    println!("=== Heading-Crawler Dry Run ===\n");

    println!("Seed URL: {}\n", seed);

    println!("Crawler Configuration:");
    println!("  Pages to parse: {}", config.crawler.pages_to_parse);
    println!("  Workers: {}", config.crawler.effective_workers());
    println!(
        "  Request timeout: {}s",
        config.crawler.request_timeout_secs
    );
    println!(
        "  Connect timeout: {}s",
        config.crawler.connect_timeout_secs
    );

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header);

    println!("\nOutput:");
    println!("  Keywords: {}", config.output.keywords_path);
    println!("  Summary: {}", config.output.summary_path);

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(seed_url: &str, config: &Config) -> Result<()> {
    let engine = build_engine(seed_url, config).context("failed to start crawl")?;

    let shutdown = engine.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after the current batch");
            shutdown.request();
        }
    });

    let report = match engine.run().await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    print_report(&report);

    let handlers = handlers_from_config(&config.output);
    write_outputs(&handlers, &report).context("failed to write crawl output")?;

    tracing::info!("Crawl completed successfully");
    Ok(())
}

//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `Fetcher` trait
//! - HTML parsing into links and heading words behind the `PageParser` trait
//! - The per-URL unit of work
//! - The batch-synchronized crawl engine and its final report

mod engine;
mod fetcher;
mod parser;
pub(crate) mod report;
mod worker;

pub use engine::{CrawlEngine, EngineState, ShutdownHandle};
pub use fetcher::{build_http_client, fetch_url, Fetcher, HttpFetcher};
pub use parser::{parse_html, HtmlParser, PageParser, ParsedPage};
pub use report::{BatchStats, CrawlReport, OutcomeTally, StopReason};
pub use worker::{process_url, PageOutcome};

use crate::config::{validate_seed_url, Config};
use crate::CrawlerError;

/// Runs a complete crawl with the HTTP fetcher and HTML parser
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the seed URL
/// 2. Build the HTTP client from the configuration
/// 3. Run the crawl engine until the frontier empties or the page limit hits
///
/// # Arguments
///
/// * `seed_url` - Absolute http(s) URL to start from
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed
/// * `Err(CrawlerError)` - Crawl could not start or shared state broke
pub async fn crawl(seed_url: &str, config: &Config) -> Result<CrawlReport, CrawlerError> {
    build_engine(seed_url, config)?.run().await
}

/// Builds an engine wired to the HTTP fetcher and HTML parser
///
/// Use this instead of [`crawl`] when the caller needs a [`ShutdownHandle`].
///
/// # Example
///
/// ```no_run
/// use heading_crawler::config::Config;
/// use heading_crawler::crawler::build_engine;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let engine = build_engine("https://example.com/", &Config::default())?;
/// let shutdown = engine.shutdown_handle();
/// tokio::spawn(async move {
///     let _ = tokio::signal::ctrl_c().await;
///     shutdown.request();
/// });
/// let report = engine.run().await?;
/// println!("Processed {} pages", report.processed);
/// # Ok(())
/// # }
/// ```
pub fn build_engine(
    seed_url: &str,
    config: &Config,
) -> Result<CrawlEngine<HttpFetcher, HtmlParser>, CrawlerError> {
    let seed = validate_seed_url(seed_url)?;
    let fetcher = HttpFetcher::from_config(&config.user_agent, &config.crawler)?;

    Ok(CrawlEngine::new(
        seed.as_str(),
        &config.crawler,
        fetcher,
        HtmlParser::new(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;

    #[test]
    fn test_build_engine_rejects_bad_seed() {
        let result = build_engine("not a url", &Config::default());
        assert!(matches!(
            result,
            Err(CrawlerError::Config(ConfigError::InvalidUrl(_)))
        ));
    }

    #[test]
    fn test_build_engine_uses_configured_workers() {
        let mut config = Config::default();
        config.crawler.workers = Some(3);

        let engine = build_engine("https://example.com/", &config).unwrap();
        assert_eq!(engine.workers(), 3);
        assert_eq!(engine.state(), EngineState::Running);
    }
}

//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end with the real HTTP fetcher and HTML parser.

use heading_crawler::config::Config;
use heading_crawler::crawler::{build_engine, crawl, StopReason};
use heading_crawler::output::{handlers_from_config, write_outputs};
use heading_crawler::{ConfigError, CrawlerError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with the given limit and worker count
fn create_test_config(pages_to_parse: u64, workers: usize) -> Config {
    let mut config = Config::default();
    config.crawler.pages_to_parse = pages_to_parse;
    config.crawler.workers = Some(workers);
    config.crawler.request_timeout_secs = 5;
    config.crawler.connect_timeout_secs = 2;
    config
}

/// Mounts an HTML page at `page_path`
async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_small_site() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<html><body>
            <header><h1>Site Name</h1></header>
            <nav><h2>Menu</h2><a href="/a">A</a></nav>
            <h1>Welcome Home</h1>
            <a href="/b">B</a>
            <footer><h3>Copyright</h3></footer>
        </body></html>"#
            .to_string(),
    )
    .await;

    mount_page(
        &mock_server,
        "/a",
        r#"<html><body><h2>Welcome to A</h2><a href="/">Home</a></body></html>"#.to_string(),
    )
    .await;

    mount_page(
        &mock_server,
        "/b",
        r#"<html><body><h3>Page B</h3><a href="/a">A</a><a href="/">Home</a></body></html>"#
            .to_string(),
    )
    .await;

    let seed = format!("{}/", base_url);
    let report = crawl(&seed, &create_test_config(100, 4))
        .await
        .expect("crawl failed");

    assert_eq!(report.processed, 3);
    assert_eq!(report.stop_reason, StopReason::FrontierExhausted);
    assert_eq!(report.frontier_remaining, 0);
    assert_eq!(report.outcomes.crawled, 3);
    assert_eq!(report.outcomes.failures(), 0);

    let words = &report.frequencies;
    assert_eq!(words["welcome"][&seed], 1);
    assert_eq!(words["welcome"][&format!("{}/a", base_url)], 1);
    assert_eq!(words["home"][&seed], 1);
    assert_eq!(words["b"][&format!("{}/b", base_url)], 1);

    // Page chrome never contributes
    for chrome in ["site", "name", "menu", "copyright"] {
        assert!(!words.contains_key(chrome), "found chrome word {}", chrome);
    }
}

#[tokio::test]
async fn test_each_page_fetched_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<h1>Loop</h1><a href="/">self</a><a href="/">self</a><a href="/other">o</a>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/other"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"<h1>Other</h1><a href="/">back</a>"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let report = crawl(&mock_server.uri(), &create_test_config(100, 2))
        .await
        .expect("crawl failed");

    assert_eq!(report.processed, 2);
    assert!(report.outcomes.duplicates >= 2);
    // MockServer verifies the `expect(1)` counts on drop
}

#[tokio::test]
async fn test_missing_seed_counts_as_processed() {
    let mock_server = MockServer::start().await;

    // Unmatched requests get a 404 from wiremock
    let report = crawl(&mock_server.uri(), &create_test_config(10, 2))
        .await
        .expect("crawl failed");

    assert_eq!(report.processed, 1);
    assert_eq!(report.outcomes.fetch_failures, 1);
    assert!(report.frequencies.is_empty());
    assert_eq!(report.stop_reason, StopReason::FrontierExhausted);
}

#[tokio::test]
async fn test_page_limit_stops_at_batch_boundary() {
    let mock_server = MockServer::start().await;

    let links: String = (0..10)
        .map(|i| format!(r#"<a href="/p{}">p{}</a>"#, i, i))
        .collect();
    mount_page(&mock_server, "/", format!("<h1>Index</h1>{}", links)).await;

    for i in 0..10 {
        mount_page(
            &mock_server,
            &format!("/p{}", i),
            format!("<h1>Page {}</h1>", i),
        )
        .await;
    }

    let report = crawl(&mock_server.uri(), &create_test_config(3, 2))
        .await
        .expect("crawl failed");

    // Batch one holds the seed, batch two holds two pages
    assert_eq!(report.processed, 3);
    assert_eq!(report.stop_reason, StopReason::PageLimitReached);
    assert_eq!(report.batches.len(), 2);
    assert_eq!(report.frontier_remaining, 8);
    assert_eq!(report.frequencies["page"].len(), 2);
}

#[tokio::test]
async fn test_shutdown_before_run_stops_after_first_batch() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        r#"<h1>Seed</h1><a href="/next">next</a>"#.to_string(),
    )
    .await;
    mount_page(&mock_server, "/next", "<h1>Next</h1>".to_string()).await;

    let engine = build_engine(&mock_server.uri(), &create_test_config(100, 2))
        .expect("failed to build engine");
    engine.shutdown_handle().request();

    let report = engine.run().await.expect("crawl failed");

    assert_eq!(report.processed, 1);
    assert_eq!(report.stop_reason, StopReason::Cancelled);
    assert_eq!(report.frontier_remaining, 1);
}

#[tokio::test]
async fn test_outputs_written_after_crawl() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", "<h1>Rust Rust crawler</h1>".to_string()).await;

    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let mut config = create_test_config(10, 2);
    config.output.keywords_path = dir
        .path()
        .join("Keywords_Output.json")
        .to_string_lossy()
        .into_owned();
    config.output.summary_path = dir
        .path()
        .join("crawl_summary.md")
        .to_string_lossy()
        .into_owned();

    let report = crawl(&mock_server.uri(), &config)
        .await
        .expect("crawl failed");
    write_outputs(&handlers_from_config(&config.output), &report).expect("failed to write");

    let json = std::fs::read_to_string(&config.output.keywords_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    let seed = format!("{}/", mock_server.uri());
    assert_eq!(parsed["rust"][&seed], 2);
    assert_eq!(parsed["crawler"][&seed], 1);

    let summary = std::fs::read_to_string(&config.output.summary_path).unwrap();
    assert!(summary.contains("- **Pages Parsed**: 1/10"));
    assert!(summary.contains("| rust | 2 | 1 |"));
}

#[tokio::test]
async fn test_invalid_seed_rejected() {
    let result = crawl("ftp://example.com/", &Config::default()).await;
    assert!(matches!(
        result,
        Err(CrawlerError::Config(ConfigError::InvalidUrl(_)))
    ));
}

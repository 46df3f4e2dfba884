use serde::Deserialize;

/// Identity header sent with every request unless overridden
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 6.1; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/63.0.3239.132 Safari/537.36 QIHU 360SE";

/// Main configuration structure for Heading-Crawler
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Page limit; checked after each batch completes
    #[serde(rename = "pages-to-parse", default = "default_pages_to_parse")]
    pub pages_to_parse: u64,

    /// Number of concurrent workers (batch size); defaults to the core count
    #[serde(default)]
    pub workers: Option<usize>,

    /// Whole-request timeout in seconds
    #[serde(
        rename = "request-timeout-secs",
        default = "default_request_timeout_secs"
    )]
    pub request_timeout_secs: u64,

    /// Connection establishment timeout in seconds
    #[serde(
        rename = "connect-timeout-secs",
        default = "default_connect_timeout_secs"
    )]
    pub connect_timeout_secs: u64,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Value of the User-Agent header
    #[serde(default = "default_user_agent")]
    pub header: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the keyword frequency JSON file
    #[serde(rename = "keywords-path", default = "default_keywords_path")]
    pub keywords_path: String,

    /// Path of the markdown summary file
    #[serde(rename = "summary-path", default = "default_summary_path")]
    pub summary_path: String,
}

impl CrawlerConfig {
    /// Worker concurrency, falling back to the number of available cores
    pub fn effective_workers(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get).max(1)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            pages_to_parse: default_pages_to_parse(),
            workers: None,
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            header: default_user_agent(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            keywords_path: default_keywords_path(),
            summary_path: default_summary_path(),
        }
    }
}

fn default_pages_to_parse() -> u64 {
    1000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_keywords_path() -> String {
    "Keywords_Output.json".to_string()
}

fn default_summary_path() -> String {
    "crawl_summary.md".to_string()
}

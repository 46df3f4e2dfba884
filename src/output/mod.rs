//! Output module for reporting a finished crawl
//!
//! This module handles:
//! - Printing crawl statistics to the console
//! - Exporting the keyword frequency index as JSON
//! - Generating a markdown summary of the run

mod json;
mod markdown;
pub mod stats;
mod traits;

pub use json::{format_keywords_json, write_keywords_json, KeywordsJsonOutput};
pub use markdown::{format_markdown_summary, generate_markdown_summary, MarkdownSummaryOutput};
pub use stats::{format_report, print_report};
pub use traits::{OutputError, OutputHandler, OutputResult};

use crate::config::OutputConfig;
use crate::crawler::CrawlReport;

/// Builds the file handlers configured in `[output]`
pub fn handlers_from_config(config: &OutputConfig) -> Vec<Box<dyn OutputHandler>> {
    vec![
        Box::new(KeywordsJsonOutput::new(&config.keywords_path)),
        Box::new(MarkdownSummaryOutput::new(&config.summary_path)),
    ]
}

/// Runs every handler against `report`
///
/// Stops at the first handler that fails.
pub fn write_outputs(handlers: &[Box<dyn OutputHandler>], report: &CrawlReport) -> OutputResult<()> {
    for handler in handlers {
        handler.write_report(report)?;
        tracing::info!("Wrote {}", handler.name());
    }
    Ok(())
}

//! Output handler traits and error types
//!
//! This module defines the trait interface for report writers and the
//! associated error type.

use crate::crawler::CrawlReport;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for report writers
///
/// Handlers consume the final [`CrawlReport`] once the engine has stopped;
/// they never see the crawl while it is running.
pub trait OutputHandler {
    /// Short name used in log lines
    fn name(&self) -> &'static str;

    /// Writes the report to the handler's destination
    ///
    /// # Arguments
    ///
    /// * `report` - The final crawl snapshot
    fn write_report(&self, report: &CrawlReport) -> OutputResult<()>;
}

//! Keyword frequency JSON export

use crate::output::traits::{OutputHandler, OutputResult};
use crate::crawler::CrawlReport;
use crate::state::FrequencySnapshot;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Serializes the frequency snapshot as JSON indented by four spaces
///
/// The layout is `{ "word": { "url": count, ... }, ... }` with words and URLs
/// in sorted order.
pub fn format_keywords_json(frequencies: &FrequencySnapshot) -> OutputResult<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    frequencies.serialize(&mut serializer)?;

    // serde_json only ever emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Writes the frequency snapshot to `output_path`
///
/// # Arguments
///
/// * `frequencies` - word -> (url -> count) snapshot
/// * `output_path` - Destination file, created or truncated
pub fn write_keywords_json(frequencies: &FrequencySnapshot, output_path: &Path) -> OutputResult<()> {
    let json = format_keywords_json(frequencies)?;

    let mut writer = BufWriter::new(File::create(output_path)?);
    writer.write_all(json.as_bytes())?;
    writer.flush()?;

    Ok(())
}

/// [`OutputHandler`] writing the keyword JSON file
#[derive(Debug, Clone)]
pub struct KeywordsJsonOutput {
    path: PathBuf,
}

impl KeywordsJsonOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputHandler for KeywordsJsonOutput {
    fn name(&self) -> &'static str {
        "keywords json"
    }

    fn write_report(&self, report: &CrawlReport) -> OutputResult<()> {
        write_keywords_json(&report.frequencies, &self.path)
    }
}

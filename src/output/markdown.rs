//! Markdown summary generation
//!
//! This module generates a human-readable markdown summary of a finished
//! crawl: run metadata, page counts, speed, crawl ratio, per-batch throughput
//! and the most frequent heading words.

use crate::crawler::CrawlReport;
use crate::output::traits::{OutputHandler, OutputResult};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Number of rows in the top words table
const TOP_WORDS: usize = 25;

/// Generates a markdown summary from a crawl report
///
/// # Arguments
///
/// * `report` - The final crawl snapshot
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn generate_markdown_summary(report: &CrawlReport, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(report);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a crawl report as markdown
pub fn format_markdown_summary(report: &CrawlReport) -> String {
    let mut md = String::new();

    md.push_str("# Heading Crawler Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Seed URL**: {}\n", report.seed_url));
    md.push_str(&format!(
        "- **Started**: {}\n",
        report.started_at.to_rfc3339()
    ));
    md.push_str(&format!(
        "- **Finished**: {}\n",
        report.finished_at.to_rfc3339()
    ));
    md.push_str(&format!(
        "- **Duration**: {:.2} seconds ({:.2} minutes)\n",
        report.elapsed.as_secs_f64(),
        report.elapsed.as_secs_f64() / 60.0
    ));
    md.push_str(&format!("- **Workers**: {}\n", report.workers));
    md.push_str(&format!("- **Stop Reason**: {}\n\n", report.stop_reason));

    // Page counts
    md.push_str("## Pages\n\n");
    md.push_str(&format!(
        "- **Pages Parsed**: {}/{}\n",
        report.processed, report.page_limit
    ));
    md.push_str(&format!(
        "- **Links Left To Parse**: {}\n",
        report.frontier_remaining
    ));
    md.push_str(&format!(
        "- **Words Found In Headings**: {}\n\n",
        report.word_count()
    ));

    md.push_str("| Outcome | Count |\n");
    md.push_str("|---------|-------|\n");
    md.push_str(&format!("| Crawled | {} |\n", report.outcomes.crawled));
    md.push_str(&format!(
        "| Fetch Failed | {} |\n",
        report.outcomes.fetch_failures
    ));
    md.push_str(&format!(
        "| Parse Failed | {} |\n",
        report.outcomes.parse_failures
    ));
    md.push_str(&format!(
        "| Duplicate | {} |\n\n",
        report.outcomes.duplicates
    ));

    // Speed
    md.push_str("## Crawl Speed\n\n");
    md.push_str("| Total Pages | Crawl Time (s) | Pages / Minute |\n");
    md.push_str("|-------------|----------------|----------------|\n");
    md.push_str(&format!(
        "| {} | {:.2} | {:.2} |\n\n",
        report.processed,
        report.elapsed.as_secs_f64(),
        report.pages_per_minute()
    ));

    // Crawl ratio
    md.push_str("## Crawl Ratio\n\n");
    md.push_str("| Pages Crawled | Links Left | Ratio |\n");
    md.push_str("|---------------|------------|-------|\n");
    let ratio = match report.crawl_ratio() {
        Some(ratio) => format!("{:.4}", ratio),
        None => "n/a".to_string(),
    };
    md.push_str(&format!(
        "| {} | {} | {} |\n\n",
        report.processed, report.frontier_remaining, ratio
    ));

    // Batches
    md.push_str("## Batch Throughput\n\n");
    if report.batches.is_empty() {
        md.push_str("No batches were dispatched.\n\n");
    } else {
        md.push_str("| Batch | URLs | Time (s) | Pages / Second |\n");
        md.push_str("|-------|------|----------|----------------|\n");
        for (i, batch) in report.batches.iter().enumerate() {
            md.push_str(&format!(
                "| {} | {} | {:.3} | {:.2} |\n",
                i + 1,
                batch.urls,
                batch.elapsed.as_secs_f64(),
                batch.pages_per_second()
            ));
        }
        md.push('\n');
    }

    // Words
    md.push_str("## Top Heading Words\n\n");
    let top = report.top_words(TOP_WORDS);
    if top.is_empty() {
        md.push_str("No heading words were found.\n");
    } else {
        md.push_str("| Word | Occurrences | Pages |\n");
        md.push_str("|------|-------------|-------|\n");
        for (word, total) in top {
            let pages = report.frequencies.get(word).map_or(0, |urls| urls.len());
            md.push_str(&format!("| {} | {} | {} |\n", word, total, pages));
        }
    }

    md
}

/// [`OutputHandler`] writing the markdown summary file
#[derive(Debug, Clone)]
pub struct MarkdownSummaryOutput {
    path: PathBuf,
}

impl MarkdownSummaryOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputHandler for MarkdownSummaryOutput {
    fn name(&self) -> &'static str {
        "markdown summary"
    }

    fn write_report(&self, report: &CrawlReport) -> OutputResult<()> {
        generate_markdown_summary(report, &self.path)
    }
}

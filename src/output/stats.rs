//! Console statistics for a finished crawl

use crate::crawler::CrawlReport;

/// Prints the crawl statistics to stdout
///
/// # Arguments
///
/// * `report` - The final crawl snapshot
pub fn print_report(report: &CrawlReport) {
    print!("{}", format_report(report));
}

/// Renders the console report as a string
pub fn format_report(report: &CrawlReport) -> String {
    let mut out = String::new();

    out.push_str("=== Heading Crawler ===\n\n");
    out.push_str(&format!("  Seed URL: {}\n", report.seed_url));
    out.push_str(&format!("  Page limit: {}\n", report.page_limit));
    out.push_str(&format!("  Workers: {}\n\n", report.workers));

    out.push_str("Done Parsing Pages\n");
    out.push_str(&format!(
        "  Pages Parsed {}/{}\n",
        report.processed, report.page_limit
    ));
    out.push_str(&format!(
        "  Links left to parse {}\n",
        report.frontier_remaining
    ));
    out.push_str(&format!(
        "  Words found in headings {}\n",
        report.word_count()
    ));
    out.push_str(&format!("  Stopped: {}\n\n", report.stop_reason));

    match report.crawl_ratio() {
        Some(ratio) => out.push_str(&format!(
            "Crawl Ratio: {:.4} ({} pages crawled / {} links left)\n\n",
            ratio, report.processed, report.frontier_remaining
        )),
        None => out.push_str(&format!(
            "Crawl Ratio: n/a ({} pages crawled, no links left)\n\n",
            report.processed
        )),
    }

    if report.outcomes.failures() > 0 {
        out.push_str("Failures:\n");
        out.push_str(&format!(
            "  Fetch failed: {}\n",
            report.outcomes.fetch_failures
        ));
        out.push_str(&format!(
            "  Parse failed: {}\n\n",
            report.outcomes.parse_failures
        ));
    }

    out.push_str("Crawl Speed:\n");
    out.push_str(&format!(
        "  {:<12} {:>16} {:>16}\n",
        "Total Pages", "Crawl Time (s)", "Pages / Minute"
    ));
    out.push_str(&format!(
        "  {:<12} {:>16.2} {:>16.2}\n",
        report.processed,
        report.elapsed.as_secs_f64(),
        report.pages_per_minute()
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::report::tests::sample_report;

    #[test]
    fn test_report_lines() {
        let out = format_report(&sample_report());

        assert!(out.contains("Done Parsing Pages"));
        assert!(out.contains("Pages Parsed 10/10"));
        assert!(out.contains("Links left to parse 40"));
        assert!(out.contains("Words found in headings 3"));
        assert!(out.contains("Crawl Ratio: 0.2500"));
        assert!(out.contains("Fetch failed: 1"));
    }

    #[test]
    fn test_speed_row() {
        let out = format_report(&sample_report());
        let row = out.lines().last().unwrap();
        let fields: Vec<&str> = row.split_whitespace().collect();
        assert_eq!(fields, vec!["10", "30.00", "20.00"]);
    }

    #[test]
    fn test_no_failures_section_when_clean() {
        let mut report = sample_report();
        report.outcomes.fetch_failures = 0;
        report.outcomes.parse_failures = 0;
        report.frontier_remaining = 0;

        let out = format_report(&report);
        assert!(!out.contains("Failures:"));
        assert!(out.contains("Crawl Ratio: n/a"));
    }
}

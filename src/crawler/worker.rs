//! Per-URL unit of work
//!
//! A worker takes one candidate URL through dedup, fetch, parse, frontier
//! enlargement and frequency update. Page-level failures end the unit of work
//! quietly; only shared state failures escape.

use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::PageParser;
use crate::state::{SharedState, StateResult};
use crate::{FetchError, ParseError};

/// How a single unit of work ended
#[derive(Debug)]
pub enum PageOutcome {
    /// URL was already visited; nothing was fetched
    Duplicate,

    /// Page was fetched and parsed; its links and words were recorded
    Crawled {
        /// Number of links pushed onto the frontier
        links: usize,
        /// Number of heading words merged into the index
        words: usize,
    },

    /// Page counted as processed but could not be retrieved
    FetchFailed(FetchError),

    /// Page counted as processed but its body could not be parsed
    ParseFailed(ParseError),
}

impl PageOutcome {
    /// Returns true if the URL passed dedup (whether or not extraction worked)
    pub fn was_processed(&self) -> bool {
        !matches!(self, Self::Duplicate)
    }

    /// Returns true if this represents a failed page
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::FetchFailed(_) | Self::ParseFailed(_))
    }

    /// Short label used in diagnostics
    pub fn label(&self) -> &'static str {
        match self {
            Self::Duplicate => "duplicate",
            Self::Crawled { .. } => "crawled",
            Self::FetchFailed(_) => "fetch failed",
            Self::ParseFailed(_) => "parse failed",
        }
    }
}

/// Runs the unit of work for `url`
///
/// # Steps
///
/// 1. `mark_if_new` - a repeat URL ends here as [`PageOutcome::Duplicate`]
/// 2. Fetch the body; failures are logged and returned as outcomes
/// 3. Parse links and heading words; failures are logged and returned
/// 4. Enqueue every link in parser order, without dedup
/// 5. Merge heading words into the frequency index
///
/// The processed counter bumped in step 1 is never rolled back.
pub async fn process_url<F, P>(
    state: &SharedState,
    fetcher: &F,
    parser: &P,
    url: &str,
) -> StateResult<PageOutcome>
where
    F: Fetcher,
    P: PageParser,
{
    if !state.visited.mark_if_new(url)? {
        tracing::debug!("Skipping already visited URL: {}", url);
        return Ok(PageOutcome::Duplicate);
    }

    let body = match fetcher.fetch(url).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("Exception occurred while crawling page {}: {}", url, e);
            return Ok(PageOutcome::FetchFailed(e));
        }
    };

    let parsed = match parser.parse(url, &body) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("Failed to parse page {}: {}", url, e);
            return Ok(PageOutcome::ParseFailed(e));
        }
    };

    let links = parsed.links.len();
    let words = parsed.heading_words.len();

    state.frontier.enqueue_all(parsed.links)?;
    state
        .frequency
        .add_occurrences(url, &parsed.heading_words)?;

    tracing::debug!(
        "Crawled {}: {} links queued, {} heading words",
        url,
        links,
        words
    );

    Ok(PageOutcome::Crawled { links, words })
}

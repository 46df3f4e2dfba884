//! Final crawl snapshot handed to reporting consumers

use crate::crawler::worker::PageOutcome;
use crate::state::FrequencySnapshot;
use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;

/// Why the engine entered its stopped state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// No URLs were left to dispatch
    FrontierExhausted,

    /// The processed counter reached the configured page limit
    PageLimitReached,

    /// A shutdown was requested between batches
    Cancelled,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::FrontierExhausted => "frontier exhausted",
            Self::PageLimitReached => "page limit reached",
            Self::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Throughput of a single batch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchStats {
    /// URLs drained from the frontier for this batch (duplicates included)
    pub urls: usize,

    /// Wall time between dispatch and the batch barrier
    pub elapsed: Duration,
}

impl BatchStats {
    /// URLs handled per second in this batch
    pub fn pages_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.urls as f64 / secs
        } else {
            0.0
        }
    }
}

/// Counts of unit-of-work outcomes across the crawl
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeTally {
    pub crawled: u64,
    pub duplicates: u64,
    pub fetch_failures: u64,
    pub parse_failures: u64,
}

impl OutcomeTally {
    /// Records one outcome
    pub fn record(&mut self, outcome: &PageOutcome) {
        match outcome {
            PageOutcome::Duplicate => self.duplicates += 1,
            PageOutcome::Crawled { .. } => self.crawled += 1,
            PageOutcome::FetchFailed(_) => self.fetch_failures += 1,
            PageOutcome::ParseFailed(_) => self.parse_failures += 1,
        }
    }

    /// Pages that passed dedup but yielded nothing
    pub fn failures(&self) -> u64 {
        self.fetch_failures + self.parse_failures
    }
}

/// Everything a reporting consumer may read once the crawl has stopped
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Seed URL the crawl started from
    pub seed_url: String,

    /// Final processed counter
    pub processed: u64,

    /// Configured page limit
    pub page_limit: u64,

    /// URLs still queued when the crawl stopped, duplicates included
    pub frontier_remaining: usize,

    /// word -> (url -> occurrences)
    pub frequencies: FrequencySnapshot,

    pub stop_reason: StopReason,

    /// Worker concurrency (batch size) used
    pub workers: usize,

    pub batches: Vec<BatchStats>,

    pub outcomes: OutcomeTally,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed: Duration,
}

impl CrawlReport {
    /// Number of distinct heading words found
    pub fn word_count(&self) -> usize {
        self.frequencies.len()
    }

    /// Processed pages per minute of wall time
    pub fn pages_per_minute(&self) -> f64 {
        let minutes = self.elapsed.as_secs_f64() / 60.0;
        if minutes > 0.0 {
            self.processed as f64 / minutes
        } else {
            0.0
        }
    }

    /// Processed pages relative to pages still queued
    ///
    /// Returns `None` when nothing is left in the frontier.
    pub fn crawl_ratio(&self) -> Option<f64> {
        if self.frontier_remaining == 0 {
            None
        } else {
            Some(self.processed as f64 / self.frontier_remaining as f64)
        }
    }

    /// Words ordered by total occurrences across all pages, highest first
    ///
    /// Ties are broken alphabetically.
    pub fn top_words(&self, limit: usize) -> Vec<(&str, u64)> {
        let mut totals: Vec<(&str, u64)> = self
            .frequencies
            .iter()
            .map(|(word, per_url)| (word.as_str(), per_url.values().sum()))
            .collect();

        totals.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        totals.truncate(limit);
        totals
    }
}

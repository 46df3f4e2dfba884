//! Crawl engine - batch orchestration
//!
//! This module contains the main crawl loop. The engine:
//! - Drains up to `workers` URLs from the frontier per batch
//! - Spawns one task per URL and waits for the whole batch (batch barrier)
//! - Checks the page limit and the frontier between batches
//! - Produces the final [`CrawlReport`]

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::PageParser;
use crate::crawler::report::{BatchStats, CrawlReport, OutcomeTally, StopReason};
use crate::crawler::worker;
use crate::state::SharedState;
use crate::CrawlerError;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;

/// Lifecycle of the engine loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Between batches, deciding whether to continue
    Running,

    /// A batch is in flight
    Draining,

    /// Terminal; the report has been produced
    Stopped,
}

/// Requests a stop at the next batch boundary
///
/// In-flight units of work always finish; no new batch starts once the
/// handle has been triggered.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandle {
    requested: Arc<AtomicBool>,
}

impl ShutdownHandle {
    /// Asks the engine to stop after the current batch
    pub fn request(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    /// Returns whether a stop has been requested
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}

/// Breadth-first crawl engine with injected collaborators
///
/// The engine exclusively owns the frontier, visited set and frequency index.
/// Its workers receive shared handles for the duration of a batch; callers
/// only ever see the [`CrawlReport`] returned by [`CrawlEngine::run`].
pub struct CrawlEngine<F, P> {
    seed_url: String,
    state: Arc<SharedState>,
    fetcher: Arc<F>,
    parser: Arc<P>,
    page_limit: u64,
    workers: usize,
    engine_state: EngineState,
    shutdown: ShutdownHandle,
}

impl<F, P> CrawlEngine<F, P>
where
    F: Fetcher,
    P: PageParser,
{
    /// Creates an engine whose frontier holds only `seed_url`
    ///
    /// # Arguments
    ///
    /// * `seed_url` - Absolute URL the crawl starts from
    /// * `config` - Page limit and worker concurrency
    /// * `fetcher` - Retrieves page bodies
    /// * `parser` - Extracts links and heading words
    pub fn new(seed_url: impl Into<String>, config: &CrawlerConfig, fetcher: F, parser: P) -> Self {
        let seed_url = seed_url.into();

        Self {
            state: Arc::new(SharedState::seeded(seed_url.clone())),
            seed_url,
            fetcher: Arc::new(fetcher),
            parser: Arc::new(parser),
            page_limit: config.pages_to_parse,
            workers: config.effective_workers(),
            engine_state: EngineState::Running,
            shutdown: ShutdownHandle::default(),
        }
    }

    /// Returns a handle that can stop the crawl between batches
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Current engine state
    pub fn state(&self) -> EngineState {
        self.engine_state
    }

    /// Worker concurrency (maximum batch size)
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Runs the crawl to completion
    ///
    /// # Loop
    ///
    /// 1. Stop if the frontier is empty
    /// 2. Drain up to `workers` URLs; stop if none came out
    /// 3. Run the batch and wait for every unit of work
    /// 4. Stop if the processed counter reached the page limit
    /// 5. Stop if a shutdown was requested
    ///
    /// The limit is only checked between batches, so the processed count may
    /// overshoot it by up to `workers - 1`.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - The crawl stopped normally
    /// * `Err(CrawlerError)` - Shared state became unusable
    pub async fn run(mut self) -> Result<CrawlReport, CrawlerError> {
        tracing::info!(
            "Starting crawl from {} (page limit {}, {} workers)",
            self.seed_url,
            self.page_limit,
            self.workers
        );

        let started_at = Utc::now();
        let start_time = Instant::now();
        let mut batches = Vec::new();
        let mut outcomes = OutcomeTally::default();

        let stop_reason = loop {
            if self.state.frontier.is_empty()? {
                tracing::info!("Frontier is empty, crawl complete");
                break StopReason::FrontierExhausted;
            }

            let batch = self.state.frontier.drain_batch(self.workers)?;
            if batch.is_empty() {
                tracing::info!("Frontier drained concurrently, crawl complete");
                break StopReason::FrontierExhausted;
            }

            self.engine_state = EngineState::Draining;
            let stats = self.run_batch(batch, &mut outcomes).await?;
            self.engine_state = EngineState::Running;

            let processed = self.state.visited.count();
            tracing::info!(
                "Batch {}: {} URLs in {:?} ({:.2} pages/sec), {} processed, {} in frontier",
                batches.len() + 1,
                stats.urls,
                stats.elapsed,
                stats.pages_per_second(),
                processed,
                self.state.frontier.len()?
            );
            batches.push(stats);

            if processed >= self.page_limit {
                tracing::info!("Page limit of {} reached", self.page_limit);
                break StopReason::PageLimitReached;
            }

            if self.shutdown.is_requested() {
                tracing::info!("Shutdown requested, not starting another batch");
                break StopReason::Cancelled;
            }
        };

        self.engine_state = EngineState::Stopped;

        let report = CrawlReport {
            seed_url: self.seed_url.clone(),
            processed: self.state.visited.count(),
            page_limit: self.page_limit,
            frontier_remaining: self.state.frontier.len()?,
            frequencies: self.state.frequency.snapshot()?,
            stop_reason,
            workers: self.workers,
            batches,
            outcomes,
            started_at,
            finished_at: Utc::now(),
            elapsed: start_time.elapsed(),
        };

        tracing::info!(
            "Crawl stopped ({}): {} pages processed in {:?}",
            report.stop_reason,
            report.processed,
            report.elapsed
        );

        Ok(report)
    }

    /// Dispatches one batch and waits for all of its units of work
    async fn run_batch(
        &self,
        batch: Vec<String>,
        outcomes: &mut OutcomeTally,
    ) -> Result<BatchStats, CrawlerError> {
        let urls = batch.len();
        let batch_start = Instant::now();
        let mut tasks = JoinSet::new();

        for url in batch {
            let state = Arc::clone(&self.state);
            let fetcher = Arc::clone(&self.fetcher);
            let parser = Arc::clone(&self.parser);

            tracing::debug!("Dispatching URL: {}", url);
            tasks.spawn(async move {
                let result =
                    worker::process_url(&state, fetcher.as_ref(), parser.as_ref(), &url).await;
                (url, result)
            });
        }

        // Collect every result before surfacing a state error, so the batch
        // barrier holds even on the failure path.
        let mut state_error = None;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((url, Ok(outcome))) => {
                    tracing::debug!("Finished {} ({})", url, outcome.label());
                    outcomes.record(&outcome);
                }
                Ok((_, Err(e))) => {
                    tracing::error!("Shared state failure: {}", e);
                    state_error.get_or_insert(e);
                }
                Err(e) => {
                    tracing::error!("Worker task failed: {}", e);
                    outcomes.fetch_failures += 1;
                }
            }
        }

        if let Some(e) = state_error {
            return Err(e.into());
        }

        Ok(BatchStats {
            urls,
            elapsed: batch_start.elapsed(),
        })
    }
}

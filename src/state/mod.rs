//! Shared crawl state
//!
//! This module holds the three structures every worker touches during a crawl.
//!
//! # Components
//!
//! - `Frontier`: FIFO queue of discovered URLs awaiting dispatch
//! - `VisitedSet`: dedup record plus the processed-page counter
//! - `FrequencyIndex`: word -> (url -> count) aggregation of heading words
//!
//! Each structure carries its own lock.

mod frequency;
mod frontier;
mod visited;

pub use frequency::{FrequencyIndex, FrequencySnapshot};
pub use frontier::Frontier;
pub use visited::VisitedSet;

use thiserror::Error;

/// Errors raised by the shared state primitives
///
/// A poisoned lock means a worker panicked mid-update, so the structure can no
/// longer be trusted and the crawl must stop.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("{0} lock poisoned by a panicked worker")]
    Poisoned(&'static str),
}

/// Result type for shared state operations
pub type StateResult<T> = Result<T, StateError>;

/// The shared state owned by a crawl engine and lent to its workers
#[derive(Debug)]
pub struct SharedState {
    pub frontier: Frontier,
    pub visited: VisitedSet,
    pub frequency: FrequencyIndex,
}

impl SharedState {
    /// Creates shared state whose frontier holds only the seed URL
    pub fn seeded(seed_url: impl Into<String>) -> Self {
        Self {
            frontier: Frontier::from_seed(seed_url.into()),
            visited: VisitedSet::new(),
            frequency: FrequencyIndex::new(),
        }
    }
}

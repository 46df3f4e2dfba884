//! Visited set and processed-page counter

use crate::state::{StateError, StateResult};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Record of every URL that has been dispatched for processing
///
/// URLs are never removed once inserted. The processed counter is bumped
/// inside the same critical section as the insertion, so it always equals the
/// number of URLs in the set.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: Mutex<HashSet<String>>,
    processed: AtomicU64,
}

impl VisitedSet {
    /// Creates an empty visited set
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `url` as visited if it has not been seen before
    ///
    /// Returns `true` exactly once per distinct URL over the lifetime of the
    /// set. A `false` result has no side effect.
    pub fn mark_if_new(&self, url: &str) -> StateResult<bool> {
        let mut urls = self
            .urls
            .lock()
            .map_err(|_| StateError::Poisoned("visited set"))?;

        if urls.contains(url) {
            return Ok(false);
        }

        urls.insert(url.to_string());
        let page_number = self.processed.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!("Page Number {}", page_number);

        Ok(true)
    }

    /// Current value of the processed counter
    pub fn count(&self) -> u64 {
        self.processed.load(Ordering::SeqCst)
    }

    /// Number of distinct visited URLs
    pub fn len(&self) -> StateResult<usize> {
        let urls = self
            .urls
            .lock()
            .map_err(|_| StateError::Poisoned("visited set"))?;
        Ok(urls.len())
    }

    /// Returns whether no URL has been visited yet
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

//! FIFO frontier of URLs waiting to be dispatched

use crate::state::{StateError, StateResult};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

/// Queue of discovered-but-not-yet-dispatched URLs
///
/// The frontier does not deduplicate; the same URL may sit in the queue many
/// times and is filtered when a worker picks it up.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: Mutex<VecDeque<String>>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frontier holding a single seed URL
    pub fn from_seed(seed_url: String) -> Self {
        Self {
            queue: Mutex::new(VecDeque::from([seed_url])),
        }
    }

    fn lock(&self) -> StateResult<MutexGuard<'_, VecDeque<String>>> {
        self.queue.lock().map_err(|_| StateError::Poisoned("frontier"))
    }

    /// Appends a URL to the tail of the queue
    pub fn enqueue(&self, url: String) -> StateResult<()> {
        self.lock()?.push_back(url);
        Ok(())
    }

    /// Appends a batch of URLs under a single lock hold, keeping their order
    pub fn enqueue_all<I>(&self, urls: I) -> StateResult<()>
    where
        I: IntoIterator<Item = String>,
    {
        self.lock()?.extend(urls);
        Ok(())
    }

    /// Removes up to `max_n` URLs from the head of the queue
    ///
    /// The returned URLs are in FIFO order. Fewer than `max_n` (possibly zero)
    /// are returned when the queue is short.
    pub fn drain_batch(&self, max_n: usize) -> StateResult<Vec<String>> {
        let mut queue = self.lock()?;
        let take = max_n.min(queue.len());
        Ok(queue.drain(..take).collect())
    }

    /// Point-in-time emptiness check
    ///
    /// Workers still in flight may enqueue right after this returns `true`.
    pub fn is_empty(&self) -> StateResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    /// Point-in-time number of queued URLs, duplicates included
    pub fn len(&self) -> StateResult<usize> {
        Ok(self.lock()?.len())
    }
}

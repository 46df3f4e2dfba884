//! Heading word frequency index

use crate::state::{StateError, StateResult};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

/// Immutable copy of the index: word -> (url -> occurrences)
pub type FrequencySnapshot = BTreeMap<String, BTreeMap<String, u64>>;

/// Concurrent word -> (url -> count) aggregation of heading words
#[derive(Debug, Default)]
pub struct FrequencyIndex {
    words: Mutex<HashMap<String, HashMap<String, u64>>>,
}

impl FrequencyIndex {
    /// Creates an empty index
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StateResult<MutexGuard<'_, HashMap<String, HashMap<String, u64>>>> {
        self.words
            .lock()
            .map_err(|_| StateError::Poisoned("frequency index"))
    }

    /// Adds one occurrence of each word (lowercased) for `url`
    ///
    /// Words are tallied locally first and merged under a single lock hold.
    /// Repeated calls for the same URL accumulate.
    pub fn add_occurrences<I, S>(&self, url: &str, words: I) -> StateResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tally: HashMap<String, u64> = HashMap::new();
        for word in words {
            *tally.entry(word.as_ref().to_lowercase()).or_insert(0) += 1;
        }

        if tally.is_empty() {
            return Ok(());
        }

        let mut index = self.lock()?;
        for (word, occurrences) in tally {
            *index
                .entry(word)
                .or_default()
                .entry(url.to_string())
                .or_insert(0) += occurrences;
        }

        Ok(())
    }

    /// Number of distinct words recorded so far
    pub fn word_count(&self) -> StateResult<usize> {
        Ok(self.lock()?.len())
    }

    /// Returns a sorted deep copy of the index
    pub fn snapshot(&self) -> StateResult<FrequencySnapshot> {
        let index = self.lock()?;
        Ok(index
            .iter()
            .map(|(word, per_url)| {
                let per_url = per_url
                    .iter()
                    .map(|(url, count)| (url.clone(), *count))
                    .collect();
                (word.clone(), per_url)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_counts_are_lowercased() {
        let index = FrequencyIndex::new();
        index
            .add_occurrences("https://a.com/", ["Rust", "rust", "RUST", "Crawler"])
            .unwrap();

        let snapshot = index.snapshot().unwrap();
        assert_eq!(snapshot["rust"]["https://a.com/"], 3);
        assert_eq!(snapshot["crawler"]["https://a.com/"], 1);
        assert!(!snapshot.contains_key("Rust"));
    }

    #[test]
    fn test_repeated_calls_accumulate() {
        let index = FrequencyIndex::new();
        index.add_occurrences("u", ["word"]).unwrap();
        index.add_occurrences("u", ["word", "word"]).unwrap();

        assert_eq!(index.snapshot().unwrap()["word"]["u"], 3);
    }

    #[test]
    fn test_urls_kept_separate() {
        let index = FrequencyIndex::new();
        index.add_occurrences("u1", ["news"]).unwrap();
        index.add_occurrences("u2", ["news", "news"]).unwrap();

        let snapshot = index.snapshot().unwrap();
        assert_eq!(snapshot["news"].len(), 2);
        assert_eq!(snapshot["news"]["u1"], 1);
        assert_eq!(snapshot["news"]["u2"], 2);
        assert_eq!(index.word_count().unwrap(), 1);
    }

    #[test]
    fn test_empty_words_leave_no_entry() {
        let index = FrequencyIndex::new();
        index.add_occurrences("u", Vec::<String>::new()).unwrap();

        assert!(index.snapshot().unwrap().is_empty());
    }

    #[test]
    fn test_concurrent_updates_same_word() {
        let index = Arc::new(FrequencyIndex::new());

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let index = Arc::clone(&index);
                thread::spawn(move || {
                    let url = format!("https://example.com/{}", worker % 2);
                    for _ in 0..250 {
                        index.add_occurrences(&url, ["shared", "Shared"]).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = index.snapshot().unwrap();
        let per_url = &snapshot["shared"];
        // 4 workers per url * 250 calls * 2 words
        assert_eq!(per_url["https://example.com/0"], 2_000);
        assert_eq!(per_url["https://example.com/1"], 2_000);
    }
}

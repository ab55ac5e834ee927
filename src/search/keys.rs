use std::collections::VecDeque;
use tracing::{debug, info};

use crate::core::config::DEFAULT_WINDOW;
use crate::core::error::{PadHunterError, Result};
use crate::core::results::{KeyOutcome, KeyRecord};
use crate::core::traits::HashProvider;
use crate::scanners::RunSummary;

use super::window::QuintetWindow;

/// One-time-pad key search.
///
/// An index is a key when the first triplet of its digest reappears as a
/// quintet in one of the next `window` digests. Quintets are counted in a
/// sliding window, so every digest is hashed and scanned exactly once.
#[derive(Debug, Clone, Copy)]
pub struct KeySearch {
    window: usize,
}

impl Default for KeySearch {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl KeySearch {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    /// Find the first `key_count` keys.
    ///
    /// `on_key` is called as each key is confirmed. The provider is consumed
    /// and dropped before this returns, on success and on error alike.
    pub fn run<P, F>(&self, mut provider: P, key_count: usize, mut on_key: F) -> Result<KeyOutcome>
    where
        P: HashProvider,
        F: FnMut(&KeyRecord),
    {
        if key_count == 0 {
            return Ok(KeyOutcome::default());
        }
        if self.window == 0 {
            return Err(PadHunterError::InvalidArgument(
                "window must be at least 1".to_string(),
            ));
        }

        let window = self.window as u64;
        // Summaries for indices index..=index + window, front first.
        let mut upcoming: VecDeque<RunSummary> = VecDeque::with_capacity(self.window + 1);
        // Quintets of (index, index + window].
        let mut counter = QuintetWindow::new();
        let mut keys = Vec::with_capacity(key_count);

        upcoming.push_back(scan(&mut provider, 0)?);
        let mut next_fetch: u64 = 1;
        let mut index: u64 = 0;

        loop {
            while next_fetch <= index + window {
                let summary = scan(&mut provider, next_fetch)?;
                counter.enter(&summary.quintets);
                upcoming.push_back(summary);
                next_fetch += 1;
            }

            let current = upcoming.pop_front().ok_or_else(|| {
                PadHunterError::NotFound(format!("run summary for index {}", index))
            })?;

            if let Some(triplet) = current.triplet {
                if counter.contains(triplet) {
                    let key = KeyRecord { index, triplet };
                    keys.push(key);
                    debug!("Key {} at index {} ({})", keys.len(), index, triplet);
                    on_key(&key);

                    if keys.len() == key_count {
                        break;
                    }
                }
            }

            // The next index is evaluated next, so it no longer counts as a confirmer.
            if let Some(next) = upcoming.front() {
                counter.leave(&next.quintets);
            }
            index += 1;
        }

        info!(
            "Found {} keys via {} provider after {} digests",
            keys.len(),
            provider.name(),
            provider.digests_computed()
        );

        Ok(KeyOutcome {
            keys,
            indices_evaluated: index + 1,
            digests_computed: provider.digests_computed(),
        })
    }
}

fn scan<P: HashProvider>(provider: &mut P, index: u64) -> Result<RunSummary> {
    let digest = provider.digest(index)?;
    Ok(RunSummary::scan(digest.as_str()))
}

/// Index of the `key_count`-th key, searching with the default window.
pub fn find_key_index<P: HashProvider>(provider: P, key_count: usize) -> Result<Option<u64>> {
    let outcome = KeySearch::default().run(provider, key_count, |_| {})?;
    Ok(outcome.answer())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::{Cancellable, Digest, Md5Hasher, SequentialProvider};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Counts digest requests and drops; fails at `fail_at` if set.
    struct CountingProvider {
        hasher: Md5Hasher,
        requests: Arc<AtomicUsize>,
        drops: Arc<AtomicUsize>,
        fail_at: Option<u64>,
    }

    impl CountingProvider {
        fn new(salt: &str, fail_at: Option<u64>) -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let requests = Arc::new(AtomicUsize::new(0));
            let drops = Arc::new(AtomicUsize::new(0));
            let provider = Self {
                hasher: Md5Hasher::new(salt, 0),
                requests: Arc::clone(&requests),
                drops: Arc::clone(&drops),
                fail_at,
            };
            (provider, requests, drops)
        }
    }

    impl HashProvider for CountingProvider {
        fn name(&self) -> &str {
            "counting"
        }

        fn digest(&mut self, index: u64) -> Result<Digest> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            if self.fail_at == Some(index) {
                return Err(PadHunterError::NotFound(format!("digest {}", index)));
            }
            Ok(self.hasher.digest(index))
        }

        fn digests_computed(&self) -> u64 {
            self.requests.load(Ordering::SeqCst) as u64
        }
    }

    impl Drop for CountingProvider {
        fn drop(&mut self) {
            self.drops.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Rescans the whole forward window for every triplet.
    fn brute_force(salt: &str, key_count: usize, window: usize) -> Vec<KeyRecord> {
        let hasher = Md5Hasher::new(salt, 0);
        let mut summaries: Vec<RunSummary> = Vec::new();
        let mut keys = Vec::new();
        let mut index = 0usize;

        while keys.len() < key_count {
            while summaries.len() <= index + window {
                let digest = hasher.digest(summaries.len() as u64);
                summaries.push(RunSummary::scan(digest.as_str()));
            }

            if let Some(triplet) = summaries[index].triplet {
                let confirmed = (index + 1..=index + window)
                    .any(|later| summaries[later].quintets.contains(triplet));
                if confirmed {
                    keys.push(KeyRecord {
                        index: index as u64,
                        triplet,
                    });
                }
            }
            index += 1;
        }

        keys
    }

    fn sliding(salt: &str, key_count: usize, window: usize) -> Vec<KeyRecord> {
        let provider = SequentialProvider::new(Md5Hasher::new(salt, 0));
        KeySearch::new(window)
            .run(provider, key_count, |_| {})
            .unwrap()
            .keys
    }

    #[test]
    fn test_first_keys_for_abc() {
        let keys = sliding("abc", 2, 1000);
        assert_eq!(keys[0], KeyRecord { index: 39, triplet: 'e' });
        assert_eq!(keys[1].index, 92);
    }

    #[test]
    fn test_matches_brute_force_across_salts() {
        for salt in ["abc", "xyz", "ihaygndm"] {
            assert_eq!(sliding(salt, 10, 1000), brute_force(salt, 10, 1000), "salt {}", salt);
        }
    }

    #[test]
    fn test_matches_brute_force_with_small_window() {
        for salt in ["abc", "qzyelonm"] {
            assert_eq!(sliding(salt, 5, 100), brute_force(salt, 5, 100), "salt {}", salt);
        }
    }

    #[test]
    fn test_zero_keys_requests_nothing() {
        let (provider, requests, drops) = CountingProvider::new("abc", None);
        let outcome = KeySearch::default().run(provider, 0, |_| {}).unwrap();

        assert!(outcome.keys.is_empty());
        assert_eq!(outcome.answer(), None);
        assert_eq!(requests.load(Ordering::SeqCst), 0);
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_provider_dropped_once_after_early_stop() {
        let (provider, requests, drops) = CountingProvider::new("abc", None);
        let mut seen = Vec::new();
        let outcome = KeySearch::default()
            .run(provider, 1, |key| seen.push(key.index))
            .unwrap();

        assert_eq!(outcome.answer(), Some(39));
        assert_eq!(outcome.indices_evaluated, 40);
        assert_eq!(outcome.digests_computed, 1040);
        assert_eq!(seen, vec![39]);
        // Indices 0..=1039 were needed to confirm index 39.
        assert_eq!(requests.load(Ordering::SeqCst), 1040);
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_provider_dropped_once_on_error() {
        let (provider, _, drops) = CountingProvider::new("abc", Some(500));
        let result = KeySearch::default().run(provider, 64, |_| {});

        assert!(matches!(result, Err(PadHunterError::NotFound(_))));
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cancelled_search_stops() {
        let (provider, _, drops) = CountingProvider::new("abc", None);
        let flag = Arc::new(AtomicBool::new(true));
        let result = KeySearch::default().run(Cancellable::new(provider, flag), 64, |_| {});

        assert!(matches!(result, Err(PadHunterError::Interrupted)));
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_zero_window_rejected() {
        let (provider, _, drops) = CountingProvider::new("abc", None);
        let result = KeySearch::new(0).run(provider, 1, |_| {});

        assert!(matches!(result, Err(PadHunterError::InvalidArgument(_))));
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_find_key_index() {
        let provider = SequentialProvider::new(Md5Hasher::new("abc", 0));
        assert_eq!(find_key_index(provider, 2).unwrap(), Some(92));
    }
}

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::collections::VecDeque;
use tracing::{debug, info};

use crate::core::error::{PadHunterError, Result};
use crate::core::traits::HashProvider;

use super::digest::{Digest, Md5Hasher};

/// Sizing of the parallel lookahead buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefetchSettings {
    /// Indices hashed by one worker task
    pub chunk_size: usize,
    /// Indices hashed per refill
    pub lookahead: usize,
    /// Worker threads; 0 means one per CPU
    pub threads: usize,
}

impl Default for PrefetchSettings {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            lookahead: 8000,
            threads: 0,
        }
    }
}

/// Hashes upcoming indices in parallel on its own worker pool and hands
/// them out in index order.
///
/// The pool lives exactly as long as the provider.
pub struct ParallelProvider {
    hasher: Md5Hasher,
    pool: ThreadPool,
    settings: PrefetchSettings,
    buffer: VecDeque<Digest>,
    /// Index of `buffer[0]`
    oldest: u64,
    computed: u64,
}

impl ParallelProvider {
    pub fn new(hasher: Md5Hasher, settings: PrefetchSettings) -> Result<Self> {
        if settings.chunk_size == 0 || settings.lookahead < settings.chunk_size {
            return Err(PadHunterError::InvalidArgument(format!(
                "invalid prefetch sizing: chunk_size {} lookahead {}",
                settings.chunk_size, settings.lookahead
            )));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(settings.threads)
            .thread_name(|i| format!("pad-hasher-{}", i))
            .build()?;

        info!(
            "Started worker pool with {} threads (chunk {}, lookahead {})",
            pool.current_num_threads(),
            settings.chunk_size,
            settings.lookahead
        );

        Ok(Self {
            hasher,
            pool,
            settings,
            buffer: VecDeque::with_capacity(settings.lookahead),
            oldest: 0,
            computed: 0,
        })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    fn refill(&mut self) {
        let start = self.oldest + self.buffer.len() as u64;
        let end = start + self.settings.lookahead as u64;
        let chunk = self.settings.chunk_size as u64;

        debug!("Hashing indices {}..{}", start, end);

        let starts: Vec<u64> = (start..end).step_by(self.settings.chunk_size).collect();
        let hasher = &self.hasher;
        let chunks: Vec<Vec<Digest>> = self.pool.install(|| {
            starts
                .par_iter()
                .map(|&first| {
                    (first..(first + chunk).min(end))
                        .map(|index| hasher.digest(index))
                        .collect()
                })
                .collect()
        });

        for digests in chunks {
            self.buffer.extend(digests);
        }
        self.computed += end - start;
    }
}

impl HashProvider for ParallelProvider {
    fn name(&self) -> &str {
        "parallel"
    }

    fn digest(&mut self, index: u64) -> Result<Digest> {
        if index < self.oldest {
            return Err(PadHunterError::Evicted {
                index,
                oldest: self.oldest,
            });
        }

        let skip = (index - self.oldest).min(self.buffer.len() as u64);
        self.buffer.drain(..skip as usize);
        self.oldest += skip;

        if self.buffer.is_empty() {
            // Nothing buffered at or past `index`; start the next refill there.
            self.oldest = index;
            self.refill();
        }

        self.buffer
            .front()
            .copied()
            .ok_or_else(|| PadHunterError::NotFound(format!("digest {}", index)))
    }

    fn digests_computed(&self) -> u64 {
        self.computed
    }
}

impl Drop for ParallelProvider {
    fn drop(&mut self) {
        debug!(
            "Releasing worker pool after {} digests",
            self.computed
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(chunk_size: usize, lookahead: usize) -> PrefetchSettings {
        PrefetchSettings {
            chunk_size,
            lookahead,
            threads: 2,
        }
    }

    #[test]
    fn test_parallel_matches_hasher_in_order() {
        let hasher = Md5Hasher::new("abc", 0);
        let mut provider = ParallelProvider::new(hasher.clone(), settings(7, 30)).unwrap();

        for index in 0..100 {
            assert_eq!(provider.digest(index).unwrap(), hasher.digest(index));
        }
        assert_eq!(provider.threads(), 2);
    }

    #[test]
    fn test_refills_whole_lookahead() {
        let hasher = Md5Hasher::new("abc", 0);
        let mut provider = ParallelProvider::new(hasher, settings(10, 40)).unwrap();

        provider.digest(0).unwrap();
        assert_eq!(provider.digests_computed(), 40);

        provider.digest(39).unwrap();
        assert_eq!(provider.digests_computed(), 40);

        provider.digest(40).unwrap();
        assert_eq!(provider.digests_computed(), 80);
    }

    #[test]
    fn test_same_index_twice() {
        let hasher = Md5Hasher::new("abc", 0);
        let mut provider = ParallelProvider::new(hasher.clone(), settings(4, 8)).unwrap();

        assert_eq!(provider.digest(5).unwrap(), hasher.digest(5));
        assert_eq!(provider.digest(5).unwrap(), hasher.digest(5));
    }

    #[test]
    fn test_jump_ahead_skips_gap() {
        let hasher = Md5Hasher::new("abc", 0);
        let mut provider = ParallelProvider::new(hasher.clone(), settings(4, 8)).unwrap();

        provider.digest(0).unwrap();
        assert_eq!(provider.digest(1000).unwrap(), hasher.digest(1000));
        assert_eq!(provider.digests_computed(), 16);
    }

    #[test]
    fn test_earlier_index_is_evicted() {
        let hasher = Md5Hasher::new("abc", 0);
        let mut provider = ParallelProvider::new(hasher, settings(4, 8)).unwrap();

        provider.digest(6).unwrap();
        assert!(matches!(
            provider.digest(2),
            Err(PadHunterError::Evicted { index: 2, oldest: 6 })
        ));
    }

    #[test]
    fn test_invalid_sizing_rejected() {
        let hasher = Md5Hasher::new("abc", 0);
        assert!(ParallelProvider::new(hasher.clone(), settings(0, 8)).is_err());
        assert!(ParallelProvider::new(hasher, settings(10, 5)).is_err());
    }
}

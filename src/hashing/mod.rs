pub mod cancel;
pub mod digest;
pub mod parallel;
pub mod sequential;

pub use cancel::Cancellable;
pub use digest::{Digest, Md5Hasher};
pub use parallel::{ParallelProvider, PrefetchSettings};
pub use sequential::SequentialProvider;

use crate::core::config::{HashingConfig, DEFAULT_STRETCH_ROUNDS};
use crate::core::error::Result;
use crate::core::traits::HashProvider;

/// Digest of `salt + index`, with the standard 2016 extra rounds when `stretch` is set.
pub fn digest(salt: &str, index: u64, stretch: bool) -> Digest {
    let rounds = if stretch { DEFAULT_STRETCH_ROUNDS } else { 0 };
    Md5Hasher::new(salt, rounds).digest(index)
}

/// Build the provider selected by `config` for the given salt.
pub fn build_provider(
    salt: &str,
    stretch_rounds: u32,
    config: &HashingConfig,
) -> Result<Box<dyn HashProvider>> {
    let hasher = Md5Hasher::new(salt, stretch_rounds);

    if config.parallel {
        let settings = PrefetchSettings {
            chunk_size: config.chunk_size,
            lookahead: config.lookahead,
            threads: config.threads,
        };
        Ok(Box::new(ParallelProvider::new(hasher, settings)?))
    } else {
        Ok(Box::new(SequentialProvider::new(hasher)))
    }
}

/// Pull-based `(index, digest)` sequence over a provider
pub struct Digests<'a, P: HashProvider + ?Sized> {
    provider: &'a mut P,
    next: u64,
    end: u64,
}

impl<'a, P: HashProvider + ?Sized> Digests<'a, P> {
    pub fn new(provider: &'a mut P, start: u64) -> Self {
        Self {
            provider,
            next: start,
            end: u64::MAX,
        }
    }

    /// Stop before requesting index `end`.
    pub fn until(mut self, end: u64) -> Self {
        self.end = end;
        self
    }
}

impl<P: HashProvider + ?Sized> Iterator for Digests<'_, P> {
    type Item = Result<(u64, Digest)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let index = self.next;
        self.next += 1;
        Some(self.provider.digest(index).map(|digest| (index, digest)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_with_and_without_stretch() {
        assert_eq!(digest("abc", 0, false), Md5Hasher::new("abc", 0).digest(0));
        assert_eq!(digest("abc", 0, true).as_str(), "a107ff634856bb300138cac6568c0f24");
        assert_ne!(digest("abc", 0, true), digest("abc", 0, false));
    }

    #[test]
    fn test_build_sequential_provider() {
        let config = HashingConfig {
            parallel: false,
            ..HashingConfig::default()
        };
        let provider = build_provider("abc", 0, &config).unwrap();
        assert_eq!(provider.name(), "sequential");
    }

    #[test]
    fn test_build_parallel_provider() {
        let config = HashingConfig {
            threads: 2,
            chunk_size: 10,
            lookahead: 20,
            ..HashingConfig::default()
        };
        let provider = build_provider("abc", 0, &config).unwrap();
        assert_eq!(provider.name(), "parallel");
    }

    #[test]
    fn test_digests_yields_consecutive_indices() {
        let hasher = Md5Hasher::new("abc", 0);
        let mut provider = SequentialProvider::new(hasher.clone());

        let taken: Vec<(u64, Digest)> = Digests::new(&mut provider, 5)
            .take(3)
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(taken.len(), 3);
        assert_eq!(taken[0], (5, hasher.digest(5)));
        assert_eq!(taken[2], (7, hasher.digest(7)));
    }

    #[test]
    fn test_digests_until_stops_before_end() {
        let mut provider = SequentialProvider::new(Md5Hasher::new("abc", 0));

        let indices: Vec<u64> = Digests::new(&mut provider, 3)
            .until(6)
            .map(|item| item.map(|(index, _)| index))
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(indices, vec![3, 4, 5]);
        assert_eq!(provider.digests_computed(), 3);
    }
}

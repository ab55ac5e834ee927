use super::error::Result;
use crate::hashing::Digest;

/// Source of salted digests, addressed by index.
///
/// Every search in this crate requests indices in non-decreasing order, so an
/// implementation may discard digests below the last requested index.
pub trait HashProvider: Send {
    /// Name of the provider (e.g., "sequential", "parallel")
    fn name(&self) -> &str;

    /// Digest of `salt + index`, stretched if the provider was built that way
    fn digest(&mut self, index: u64) -> Result<Digest>;

    /// Number of digests computed so far, including prefetched ones
    fn digests_computed(&self) -> u64;
}

impl<P: HashProvider + ?Sized> HashProvider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn digest(&mut self, index: u64) -> Result<Digest> {
        (**self).digest(index)
    }

    fn digests_computed(&self) -> u64 {
        (**self).digests_computed()
    }
}

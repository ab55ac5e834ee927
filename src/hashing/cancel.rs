use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::core::error::{PadHunterError, Result};
use crate::core::traits::HashProvider;

use super::digest::Digest;

/// Wraps a provider so that every request fails with `Interrupted` once
/// `flag` is set.
pub struct Cancellable<P> {
    inner: P,
    flag: Arc<AtomicBool>,
}

impl<P: HashProvider> Cancellable<P> {
    pub fn new(inner: P, flag: Arc<AtomicBool>) -> Self {
        Self { inner, flag }
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: HashProvider> HashProvider for Cancellable<P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn digest(&mut self, index: u64) -> Result<Digest> {
        if self.flag.load(Ordering::Relaxed) {
            return Err(PadHunterError::Interrupted);
        }
        self.inner.digest(index)
    }

    fn digests_computed(&self) -> u64 {
        self.inner.digests_computed()
    }
}

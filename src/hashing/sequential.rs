use crate::core::error::Result;
use crate::core::traits::HashProvider;

use super::digest::{Digest, Md5Hasher};

/// Computes each digest on demand on the calling thread
pub struct SequentialProvider {
    hasher: Md5Hasher,
    computed: u64,
}

impl SequentialProvider {
    pub fn new(hasher: Md5Hasher) -> Self {
        Self {
            hasher,
            computed: 0,
        }
    }
}

impl HashProvider for SequentialProvider {
    fn name(&self) -> &str {
        "sequential"
    }

    fn digest(&mut self, index: u64) -> Result<Digest> {
        self.computed += 1;
        Ok(self.hasher.digest(index))
    }

    fn digests_computed(&self) -> u64 {
        self.computed
    }
}

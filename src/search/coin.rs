use tracing::debug;

use crate::core::error::{PadHunterError, Result};
use crate::core::traits::HashProvider;
use crate::hashing::Digests;

/// Highest index tried before giving up.
pub const DEFAULT_SEARCH_LIMIT: u64 = 10_000_000;

/// Lowest index in `0..limit` whose digest starts with `zeros` zeros.
pub fn mine<P: HashProvider + ?Sized>(provider: &mut P, zeros: usize, limit: u64) -> Result<Option<u64>> {
    if zeros == 0 {
        return Err(PadHunterError::InvalidArgument(
            "zeros must be at least 1".to_string(),
        ));
    }
    if zeros > 32 {
        return Err(PadHunterError::InvalidArgument(
            "zeros cannot exceed 32 (MD5 hex digest length)".to_string(),
        ));
    }

    for item in Digests::new(provider, 0).until(limit) {
        let (index, digest) = item?;
        if digest.has_zero_prefix(zeros) {
            debug!("Digest {} at index {} has {} leading zeros", digest, index, zeros);
            return Ok(Some(index));
        }
    }

    Ok(None)
}

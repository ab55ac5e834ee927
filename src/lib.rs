//! # Pad Hunter
//!
//! Searches salted MD5 hash streams, `md5(salt + index)` for index 0, 1, 2, ...
//!
//! ## Features
//!
//! - **One-time-pad keys**: sliding-window key search, with optional key stretching
//! - **Parallel**: digests are prefetched in chunks on a rayon worker pool
//! - **Cancellable**: Ctrl-C stops the search between digests
//! - **Configurable**: TOML-based configuration
//! - **More searches**: leading-zero mining and door passwords over the same streams
//!
//! ## Architecture
//!
//! - `HashProvider`: hands out digests by index (sequential or parallel)
//! - `scanners`: finds triplets and quintets in a hex digest
//! - `search`: the key search and the other hash-stream searches
//!
//! ## Example
//!
//! ```rust,no_run
//! use pad_hunter::hashing::{Md5Hasher, ParallelProvider, PrefetchSettings};
//! use pad_hunter::search::KeySearch;
//!
//! let provider = ParallelProvider::new(Md5Hasher::new("abc", 0), PrefetchSettings::default())?;
//! let outcome = KeySearch::default().run(provider, 64, |_| {})?;
//!
//! println!("Key 64 is at index {:?}", outcome.answer());
//! # Ok::<(), pad_hunter::PadHunterError>(())
//! ```

pub mod cli;
pub mod core;
pub mod hashing;
pub mod scanners;
pub mod search;

// Re-export commonly used types
pub use self::core::{
    CoinResult, Config, DoorPasswords, DoorResults, HashProvider, KeyOutcome, KeyRecord,
    PadHunterError, Result, SearchResults, Statistics,
};

pub use hashing::{build_provider, Digest, Md5Hasher};
pub use search::KeySearch;

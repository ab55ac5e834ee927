use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An index confirmed as a one-time-pad key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRecord {
    pub index: u64,
    /// Character of the first triplet in the key's digest
    pub triplet: char,
}

/// Keys found by one search run together with its counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    pub keys: Vec<KeyRecord>,
    pub indices_evaluated: u64,
    pub digests_computed: u64,
}

impl KeyOutcome {
    /// Index of the last key found, which is the puzzle answer once the run completed
    pub fn answer(&self) -> Option<u64> {
        self.keys.last().map(|key| key.index)
    }
}

/// Complete key search results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub timestamp: DateTime<Utc>,
    pub salt: String,
    pub stretched: bool,
    pub key_count: usize,
    pub provider: String,
    pub keys: Vec<KeyRecord>,
    pub answer: Option<u64>,
    pub statistics: Statistics,
}

impl SearchResults {
    pub fn new(salt: &str, stretched: bool, key_count: usize, provider: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            salt: salt.to_string(),
            stretched,
            key_count,
            provider: provider.to_string(),
            keys: Vec::new(),
            answer: None,
            statistics: Statistics::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Statistics {
    pub digests_computed: u64,
    pub indices_evaluated: u64,
    pub elapsed_ms: u64,
}

/// The two passwords recovered from a door id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorPasswords {
    pub first: String,
    pub second: String,
}

/// Lowest mined index for one leading-zero count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinResult {
    pub secret: String,
    pub zeros: usize,
    /// `None` when nothing matched within the search limit
    pub index: Option<u64>,
}

/// Door search outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorResults {
    pub door_id: String,
    pub limit: u64,
    pub passwords: Option<DoorPasswords>,
}

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use super::error::{PadHunterError, Result};

/// Extra MD5 rounds applied on top of the base digest when stretching.
pub const DEFAULT_STRETCH_ROUNDS: u32 = 2016;

/// Number of indices after a triplet that may confirm it.
pub const DEFAULT_WINDOW: usize = 1000;

/// Locations searched for a config file when none is given explicitly.
pub const CONFIG_PATHS: [&str; 3] = ["config/default.toml", "default.toml", ".pad_hunter.toml"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub hashing: HashingConfig,
    pub coin: CoinConfig,
    pub door: DoorConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Load the config from `path`, or from the first of [`CONFIG_PATHS`] that exists.
    ///
    /// An explicit path that cannot be read or parsed is an error. The implicit
    /// locations are best effort and fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            info!("Loaded config from {}", path.display());
            return Ok(config);
        }

        for path in CONFIG_PATHS {
            if Path::new(path).exists() {
                match fs::read_to_string(path) {
                    Ok(contents) => match toml::from_str(&contents) {
                        Ok(config) => {
                            info!("Loaded config from {}", path);
                            return Ok(config);
                        }
                        Err(e) => {
                            warn!("Failed to parse config from {}: {}", path, e);
                        }
                    },
                    Err(e) => {
                        warn!("Failed to read config from {}: {}", path, e);
                    }
                }
            }
        }

        warn!("No config file found, using defaults");
        Ok(Config::default())
    }

    /// Reject settings the searches cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.search.salt.is_empty() {
            return Err(PadHunterError::Config("salt cannot be empty".to_string()));
        }
        if self.search.window == 0 {
            return Err(PadHunterError::Config("window must be at least 1".to_string()));
        }
        if self.hashing.chunk_size == 0 {
            return Err(PadHunterError::Config("chunk_size must be at least 1".to_string()));
        }
        if self.hashing.lookahead < self.hashing.chunk_size {
            return Err(PadHunterError::Config(format!(
                "lookahead ({}) must not be smaller than chunk_size ({})",
                self.hashing.lookahead, self.hashing.chunk_size
            )));
        }
        match self.output.format.as_str() {
            "text" | "json" => Ok(()),
            other => Err(PadHunterError::Config(format!("Unknown output format: {}", other))),
        }
    }

    /// Rounds to apply for the configured stretch flag.
    pub fn stretch_rounds(&self) -> u32 {
        if self.search.stretch {
            self.hashing.stretch_rounds
        } else {
            0
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub salt: String,
    pub stretch: bool,
    pub key_count: usize,
    pub window: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            salt: "ihaygndm".to_string(),
            stretch: false,
            key_count: 64,
            window: DEFAULT_WINDOW,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HashingConfig {
    pub stretch_rounds: u32,
    pub chunk_size: usize,
    pub lookahead: usize,
    /// Worker threads; 0 means one per CPU.
    pub threads: usize,
    pub parallel: bool,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            stretch_rounds: DEFAULT_STRETCH_ROUNDS,
            chunk_size: 1000,
            lookahead: 8000,
            threads: 0,
            parallel: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoinConfig {
    pub secret: String,
    /// Leading-zero counts to mine, in order
    pub zeros: Vec<usize>,
    pub limit: u64,
}

impl Default for CoinConfig {
    fn default() -> Self {
        Self {
            secret: "bgvyzdsv".to_string(),
            zeros: vec![5, 6],
            limit: 10_000_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorConfig {
    pub door_id: String,
    pub limit: u64,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            door_id: "cxdnnyjw".to_string(),
            limit: 100_000_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: String,
    pub directory: String,
    pub save: bool,
}

impl OutputConfig {
    /// Whether stdout should carry only the JSON document
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            directory: "./results".to_string(),
            save: false,
        }
    }
}

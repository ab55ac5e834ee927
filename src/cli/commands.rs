use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::Config;

/// Environment variable consulted for the key search salt
pub const SALT_ENV: &str = "PAD_HUNTER_SALT";

#[derive(Parser, Debug)]
#[command(name = "pad-hunter")]
#[command(version, about = "Hunts one-time-pad keys and other patterns in salted MD5 hash streams", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: config/default.toml, default.toml or .pad_hunter.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find the index of the N-th one-time-pad key
    Keys(KeysArgs),

    /// Mine the lowest index whose digest starts with N zeros
    Coin {
        /// Secret key (default from config)
        #[arg(short, long)]
        secret: Option<String>,

        /// Leading zeros to look for; repeat to mine several counts
        #[arg(short, long)]
        zeros: Vec<usize>,

        /// Highest index to try
        #[arg(short, long)]
        limit: Option<u64>,
    },

    /// Recover both door passwords for a door id
    Door {
        /// Door id (default from config)
        #[arg(short, long)]
        door_id: Option<String>,

        /// Highest index to try
        #[arg(short, long)]
        limit: Option<u64>,
    },

    /// List available searches
    List,
}

#[derive(Args, Debug, Default, Clone)]
pub struct KeysArgs {
    /// Salt to hash with (can also use PAD_HUNTER_SALT env var)
    #[arg(short, long)]
    pub salt: Option<String>,

    /// Apply key stretching (2016 extra MD5 rounds per index)
    #[arg(long)]
    pub stretch: bool,

    /// Number of keys to find
    #[arg(short, long)]
    pub keys: Option<usize>,

    /// Hash on the calling thread instead of the worker pool
    #[arg(long)]
    pub sequential: bool,

    /// Worker threads (0 = one per CPU)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Indices hashed per worker task
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Indices hashed ahead of the search per refill
    #[arg(long)]
    pub lookahead: Option<usize>,

    /// Output file for results (default: <output.directory>/keys_<salt>_<timestamp>.json when saving)
    #[arg(short, long)]
    pub output: Option<String>,
}

impl KeysArgs {
    /// Overlay command-line values onto `config`.
    ///
    /// The salt comes from `--salt`, then `env_salt`, then the config file.
    pub fn apply(&self, config: &mut Config, env_salt: Option<String>) {
        if let Some(salt) = self.salt.clone().or(env_salt) {
            config.search.salt = salt;
        }
        if self.stretch {
            config.search.stretch = true;
        }
        if let Some(keys) = self.keys {
            config.search.key_count = keys;
        }
        if self.sequential {
            config.hashing.parallel = false;
        }
        if let Some(threads) = self.threads {
            config.hashing.threads = threads;
        }
        if let Some(chunk_size) = self.chunk_size {
            config.hashing.chunk_size = chunk_size;
        }
        if let Some(lookahead) = self.lookahead {
            config.hashing.lookahead = lookahead;
        }
        if self.output.is_some() {
            config.output.save = true;
        }
    }
}

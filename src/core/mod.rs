pub mod config;
pub mod error;
pub mod results;
pub mod traits;

pub use config::{CoinConfig, Config, DoorConfig, HashingConfig, OutputConfig, SearchConfig};
pub use error::{PadHunterError, Result};
pub use results::{
    CoinResult, DoorPasswords, DoorResults, KeyOutcome, KeyRecord, SearchResults, Statistics,
};
pub use traits::HashProvider;

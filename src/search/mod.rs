pub mod coin;
pub mod door;
pub mod keys;
pub mod window;

pub use keys::{find_key_index, KeySearch};
pub use window::QuintetWindow;

use crate::core::error::{PadHunterError, Result};

/// Searches available from the command line, with a one-line description
pub fn available_searches() -> Vec<(&'static str, &'static str)> {
    vec![
        ("keys", "One-time-pad keys confirmed by a later quintet (optionally stretched)"),
        ("coin", "Lowest index whose digest has N leading zeros"),
        ("door", "Two door passwords built from digests with five leading zeros"),
    ]
}

/// Fail fast on an empty salt, secret key or door id.
pub fn require_salt(salt: &str, what: &str) -> Result<()> {
    if salt.is_empty() {
        return Err(PadHunterError::InvalidArgument(format!("{} cannot be empty", what)));
    }
    Ok(())
}

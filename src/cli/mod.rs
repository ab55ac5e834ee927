pub mod commands;
pub mod output;

pub use commands::{Cli, Commands, KeysArgs, SALT_ENV};
pub use output::OutputFormatter;

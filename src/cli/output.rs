use crate::core::error::Result;
use crate::core::results::{CoinResult, DoorResults, KeyRecord, SearchResults};
use colored::Colorize;
use serde::Serialize;

pub struct OutputFormatter;

impl OutputFormatter {
    /// Print a search banner
    pub fn print_banner() {
        println!("{}", "=".repeat(70).bright_cyan());
        println!("{}", "  Pad Hunter - Salted MD5 Stream Search".bright_cyan().bold());
        println!("{}", "=".repeat(70).bright_cyan());
        println!();
    }

    /// Print search parameters
    pub fn print_search_start(salt: &str, stretched: bool, key_count: usize, provider: &str) {
        println!("{} Searching salt {} for {} keys ({}, {} hashing)...",
            "🔍".bright_yellow(),
            salt.bright_cyan(),
            key_count.to_string().bright_white(),
            if stretched { "stretched".bright_magenta() } else { "plain".bright_green() },
            provider
        );
        println!();
    }

    /// Line shown for each confirmed key
    pub fn format_key(key: &KeyRecord, position: usize, total: usize) -> String {
        format!("  {} [{:>2}/{}] Key at index {} (triplet {})",
            "✓".green(),
            position,
            total,
            key.index.to_string().bright_cyan(),
            key.triplet.to_string().bright_yellow()
        )
    }

    /// Print final key search results
    pub fn print_results(results: &SearchResults) {
        println!();
        println!("{}", "=".repeat(70).bright_cyan());
        println!("{}", "  Results Summary".bright_cyan().bold());
        println!("{}", "=".repeat(70).bright_cyan());
        println!();

        println!("  Salt: {}", results.salt.bright_white());
        println!("  Stretched: {}", results.stretched.to_string().bright_white());
        println!("  Keys found: {}/{}",
            results.keys.len().to_string().bright_green(),
            results.key_count
        );
        println!();

        println!("  {} Statistics:", "📈".bright_yellow());
        println!("    Provider: {}", results.provider.bright_white());
        println!("    Digests computed: {}", results.statistics.digests_computed.to_string().bright_white());
        println!("    Indices evaluated: {}", results.statistics.indices_evaluated.to_string().bright_white());
        println!("    Elapsed: {} ms", results.statistics.elapsed_ms.to_string().bright_white());
        println!();

        match results.answer {
            Some(index) => println!("  {} Key {} is at index {}",
                "🔑".bright_yellow(),
                results.key_count,
                index.to_string().bright_green().bold()
            ),
            None => println!("  No keys requested"),
        }

        println!();
        println!("{}", "=".repeat(70).bright_cyan());
    }

    /// Pretty JSON document for machine-readable output
    pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    /// Print a mined coin index
    pub fn print_coin(result: &CoinResult) {
        match result.index {
            Some(index) => println!("  {} {} with {} zeros: smallest suffix is {}",
                "✓".green(),
                result.secret.bright_cyan(),
                result.zeros,
                index.to_string().bright_green().bold()
            ),
            None => println!("  {} {} with {} zeros: no suffix within the search limit",
                "✗".bright_black(),
                result.secret.bright_cyan(),
                result.zeros
            ),
        }
    }

    /// Print recovered door passwords
    pub fn print_door(results: &DoorResults) {
        println!("  Door {}", results.door_id.bright_cyan());
        match &results.passwords {
            Some(passwords) => {
                println!("    First password: {}", passwords.first.bright_green().bold());
                println!("    Second password: {}", passwords.second.bright_green().bold());
            }
            None => println!("    {} Passwords incomplete after {} indices",
                "✗".bright_black(),
                results.limit
            ),
        }
    }

    /// Print error message
    pub fn print_error(message: &str) {
        eprintln!("{} {}", "❌".bright_red(), message.red());
    }

    /// Print warning message
    pub fn print_warning(message: &str) {
        println!("{} {}", "⚠️".bright_yellow(), message.yellow());
    }

    /// Print success message
    pub fn print_success(message: &str) {
        println!("{} {}", "✓".bright_green(), message.green());
    }

    /// Print info message
    pub fn print_info(message: &str) {
        println!("{} {}", "ℹ️".bright_blue(), message);
    }
}

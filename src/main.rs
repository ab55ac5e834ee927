use chrono::Utc;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use pad_hunter::cli::{Cli, Commands, KeysArgs, OutputFormatter, SALT_ENV};
use pad_hunter::core::{CoinResult, Config, DoorResults, SearchResults};
use pad_hunter::hashing::{self, Cancellable};
use pad_hunter::search::{self, coin, door, KeySearch};
use pad_hunter::{HashProvider, PadHunterError};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    // Load .env file if it exists
    let _ = dotenv::dotenv();

    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for results
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match execute_command(cli).await {
        Ok(()) => {}
        Err(PadHunterError::Interrupted) => {
            OutputFormatter::print_warning("Search interrupted");
            std::process::exit(130);
        }
        Err(e) => {
            OutputFormatter::print_error(&format!("Error: {}", e));
            std::process::exit(1);
        }
    }
}

async fn execute_command(cli: Cli) -> pad_hunter::Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    if !config.output.is_json() {
        OutputFormatter::print_banner();
    }

    match cli.command {
        Commands::Keys(args) => keys_command(config, args).await?,
        Commands::Coin {
            secret,
            zeros,
            limit,
        } => coin_command(config, secret, zeros, limit).await?,
        Commands::Door { door_id, limit } => door_command(config, door_id, limit).await?,
        Commands::List => list_command(),
    }

    Ok(())
}

/// Run a blocking search off the runtime, flagging `cancel` on Ctrl-C.
///
/// After Ctrl-C the search still runs to its next digest request, which
/// then fails with `Interrupted`.
async fn run_blocking<T, F>(cancel: Arc<AtomicBool>, job: F) -> pad_hunter::Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> pad_hunter::Result<T> + Send + 'static,
{
    let mut handle = tokio::task::spawn_blocking(job);

    tokio::select! {
        joined = &mut handle => joined?,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted, stopping search");
            cancel.store(true, Ordering::Relaxed);
            handle.await?
        }
    }
}

async fn keys_command(mut config: Config, args: KeysArgs) -> pad_hunter::Result<()> {
    args.apply(&mut config, std::env::var(SALT_ENV).ok());
    config.validate()?;

    let json = config.output.is_json();
    let salt = config.search.salt.clone();
    let stretched = config.search.stretch;
    let key_count = config.search.key_count;

    let provider = hashing::build_provider(&salt, config.stretch_rounds(), &config.hashing)?;
    let provider_name = provider.name().to_string();
    if !json {
        OutputFormatter::print_search_start(&salt, stretched, key_count, &provider_name);
    }

    let cancel = Arc::new(AtomicBool::new(false));
    let provider = Cancellable::new(provider, Arc::clone(&cancel));
    let key_search = KeySearch::new(config.search.window);

    let pb = ProgressBar::new(key_count as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} keys {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );

    let started = Instant::now();
    let outcome = run_blocking(cancel, {
        let pb = pb.clone();
        move || {
            key_search.run(provider, key_count, |key| {
                pb.inc(1);
                let position = pb.position() as usize;
                pb.println(OutputFormatter::format_key(key, position, key_count));
            })
        }
    })
    .await;
    pb.finish_and_clear();
    let outcome = outcome?;

    let mut results = SearchResults::new(&salt, stretched, key_count, &provider_name);
    results.answer = outcome.answer();
    results.statistics.digests_computed = outcome.digests_computed;
    results.statistics.indices_evaluated = outcome.indices_evaluated;
    results.statistics.elapsed_ms = started.elapsed().as_millis() as u64;
    results.keys = outcome.keys;
    results.timestamp = Utc::now();

    info!(
        "Search finished in {} ms",
        results.statistics.elapsed_ms
    );

    if json {
        println!("{}", OutputFormatter::render_json(&results)?);
    } else {
        OutputFormatter::print_results(&results);
    }

    if config.output.save {
        let output_path = match args.output {
            Some(path) => Path::new(&path).to_path_buf(),
            None => {
                let timestamp = results.timestamp.format("%Y%m%d_%H%M%S");
                let dir = Path::new(&config.output.directory);
                fs::create_dir_all(dir)?;
                dir.join(format!("keys_{}_{}.json", salt, timestamp))
            }
        };

        fs::write(&output_path, OutputFormatter::render_json(&results)?)?;
        if json {
            info!("Results saved to {}", output_path.display());
        } else {
            OutputFormatter::print_success(&format!("Results saved to {}", output_path.display()));
        }
    }

    Ok(())
}

async fn coin_command(
    config: Config,
    secret: Option<String>,
    zeros: Vec<usize>,
    limit: Option<u64>,
) -> pad_hunter::Result<()> {
    let secret = secret.unwrap_or(config.coin.secret);
    search::require_salt(&secret, "secret key")?;
    let zeros = if zeros.is_empty() { config.coin.zeros } else { zeros };
    let limit = limit.unwrap_or(config.coin.limit);

    let json = config.output.is_json();
    if !json {
        OutputFormatter::print_info(&format!("Mining {} for {:?} leading zeros", secret, zeros));
    }

    let mut results = Vec::with_capacity(zeros.len());
    for count in zeros {
        let cancel = Arc::new(AtomicBool::new(false));
        let provider = hashing::build_provider(&secret, 0, &config.hashing)?;
        let mut provider = Cancellable::new(provider, Arc::clone(&cancel));

        let index = run_blocking(cancel, move || coin::mine(&mut provider, count, limit)).await?;
        let result = CoinResult {
            secret: secret.clone(),
            zeros: count,
            index,
        };
        if !json {
            OutputFormatter::print_coin(&result);
        }
        results.push(result);
    }

    if json {
        println!("{}", OutputFormatter::render_json(&results)?);
    }

    Ok(())
}

async fn door_command(
    config: Config,
    door_id: Option<String>,
    limit: Option<u64>,
) -> pad_hunter::Result<()> {
    let door_id = door_id.unwrap_or(config.door.door_id);
    search::require_salt(&door_id, "door id")?;
    let limit = limit.unwrap_or(config.door.limit);

    let json = config.output.is_json();
    if !json {
        OutputFormatter::print_info(&format!("Cracking door {}", door_id));
    }

    let cancel = Arc::new(AtomicBool::new(false));
    let provider = hashing::build_provider(&door_id, 0, &config.hashing)?;
    let mut provider = Cancellable::new(provider, Arc::clone(&cancel));

    let passwords = run_blocking(cancel, move || door::crack(&mut provider, limit)).await?;
    let results = DoorResults {
        door_id,
        limit,
        passwords,
    };

    if json {
        println!("{}", OutputFormatter::render_json(&results)?);
    } else {
        OutputFormatter::print_door(&results);
    }

    Ok(())
}

fn list_command() {
    println!("{}", "Available Searches:".bright_cyan().bold());
    for (name, description) in search::available_searches() {
        println!("  {} {} - {}", "•".bright_yellow(), name.bright_white(), description);
    }
    println!();
}

//! CLI administration tool for redirector.
//!
//! Operates directly on the configured storage engine, without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a redirect with a generated key
//! cargo run --bin redirector-admin -- create https://example.com/page
//!
//! # Create an instant redirect under a chosen key
//! cargo run --bin redirector-admin -- create https://example.com --key docs --instant
//!
//! # Show a redirect
//! cargo run --bin redirector-admin -- find docs
//!
//! # Delete a redirect
//! cargo run --bin redirector-admin -- delete docs
//!
//! # Print sample keys for the configured pattern
//! cargo run --bin redirector-admin -- generate --count 5
//!
//! # Check the storage connection
//! cargo run --bin redirector-admin -- check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `STORAGE_TYPE`, `STORAGE_URI`, `STORAGE_DATABASE`,
//! `STORAGE_COLLECTION`, `STORAGE_TIMEOUT`, `KEY_PATTERN`, `DEBUG`,
//! `RUST_LOG`, `LOG_FORMAT`.

use redirector::application::services::RedirectService;
use redirector::config::{self, Config};
use redirector::logging;
use redirector::domain::key_codec::KeyCodec;
use redirector::infrastructure::persistence::EngineRegistry;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;
use std::time::Instant;

/// CLI tool for managing redirects.
#[derive(Parser)]
#[command(name = "redirector-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Create a redirect
    Create {
        /// Target URL
        location: String,

        /// Custom key (generated from KEY_PATTERN if omitted)
        #[arg(short, long)]
        key: Option<String>,

        /// Redirect at the HTTP level, without the interstitial page
        #[arg(short, long)]
        instant: bool,
    },

    /// Show a redirect
    Find {
        /// Key to look up
        key: String,
    },

    /// Delete a redirect
    Delete {
        /// Key to delete
        key: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Print keys generated from KEY_PATTERN
    Generate {
        /// Number of keys
        #[arg(short, long, default_value_t = 1)]
        count: usize,
    },

    /// Check the storage connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;
    logging::init(&config.log_level, &config.log_format)?;

    let codec = Arc::new(KeyCodec::new(&config.key_pattern).context("Invalid KEY_PATTERN")?);

    if let Commands::Generate { count } = cli.command {
        generate_keys(&codec, count);
        return Ok(());
    }

    let started = Instant::now();
    let repository = EngineRegistry::with_defaults()
        .select(&config.storage, config.debug)
        .await
        .context("Failed to connect to storage")?;
    let service = RedirectService::new(repository, codec);

    let result = match cli.command {
        Commands::Create {
            location,
            key,
            instant,
        } => create_redirect(&service, &location, key.as_deref(), instant).await,
        Commands::Find { key } => find_redirect(&service, &key).await,
        Commands::Delete { key, yes } => delete_redirect(&service, &key, yes).await,
        Commands::Check => check_storage(&service, &config, started).await,
        Commands::Generate { .. } => Ok(()),
    };

    service.close().await;
    result
}

/// Creates a redirect and prints the stored values.
async fn create_redirect(
    service: &RedirectService,
    location: &str,
    key: Option<&str>,
    instant: bool,
) -> Result<()> {
    println!("{}", "Create redirect".bright_blue().bold());
    println!();

    let redirect = service
        .create(location, key, instant)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create redirect: {}", e))?;

    println!("  Key:      {}", redirect.key().bright_yellow().bold());
    println!("  Location: {}", redirect.location().cyan());
    println!(
        "  Instant:  {}",
        if redirect.instant() {
            "yes".green()
        } else {
            "no".bright_black()
        }
    );
    println!();
    println!("{}", "Redirect created successfully!".green().bold());

    Ok(())
}

/// Prints a redirect.
async fn find_redirect(service: &RedirectService, key: &str) -> Result<()> {
    let redirect = service
        .resolve(key)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  Key:      {}", redirect.key().bright_yellow());
    println!("  Location: {}", redirect.location().cyan());
    println!("  Stored:   {}", redirect.encoded_location().bright_black());
    println!(
        "  Instant:  {}",
        if redirect.instant() { "yes" } else { "no" }
    );

    Ok(())
}

/// Deletes a redirect after showing it and asking for confirmation.
///
/// Confirmation defaults to No and is skipped with `--yes`.
async fn delete_redirect(service: &RedirectService, key: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "Delete redirect".bright_blue().bold());
    println!();

    let redirect = service
        .resolve(key)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  Key:      {}", redirect.key().cyan());
    println!("  Location: {}", redirect.location().bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this redirect?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete(key)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete redirect: {}", e))?;

    println!("{}", "Redirect deleted successfully!".green().bold());

    Ok(())
}

/// Prints `count` generated keys, one per line.
fn generate_keys(codec: &KeyCodec, count: usize) {
    for _ in 0..count {
        println!("{}", codec.generate());
    }
}

/// Round-trips a lookup and reports the engine and elapsed time.
async fn check_storage(service: &RedirectService, config: &Config, started: Instant) -> Result<()> {
    println!("{}", "Checking storage connection...".bright_blue());

    service
        .health_check()
        .await
        .context("Storage did not answer")?;

    println!(
        "{}",
        format!(
            "Connected to {} in {}ms",
            service.engine(),
            started.elapsed().as_millis()
        )
        .green()
        .bold()
    );

    if config.debug {
        println!(
            "{}",
            "DEBUG is set: the in-memory engine was used instead of STORAGE_TYPE".yellow()
        );
    } else {
        println!("  Collection: {}", config.storage.options.collection().cyan());
    }

    Ok(())
}

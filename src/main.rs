//! Pydocs-Scraper main entry point
//!
//! This is the command-line interface for the Python documentation scraper.

use anyhow::Context as _;
use clap::Parser;
use pydocs_scraper::config::load_config_or_default;
use pydocs_scraper::logging::setup_logging;
use pydocs_scraper::{Config, Context, Mode, OutputFormat};
use std::path::PathBuf;
use std::process::ExitCode;

/// Pydocs-Scraper: reports from the Python documentation and PEP index
///
/// Each mode fetches pages from docs.python.org or peps.python.org through a
/// persistent response cache and prints or saves a small table.
#[derive(Parser, Debug)]
#[command(name = "pydocs-scraper")]
#[command(version = "1.0.0")]
#[command(about = "Python documentation parser", long_about = None)]
struct Cli {
    /// Report to produce
    #[arg(value_enum)]
    mode: Mode,

    /// Clear the response cache before fetching
    #[arg(short, long)]
    clear_cache: bool,

    /// Additional output: bordered table or CSV file
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Path to TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase stderr logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Held until the end of main so the log file is flushed
    let _log_guard = match setup_logging(&config, cli.verbose) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to set up logging: {}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Parser started");

    match run(cli, config).await {
        Ok(()) => {
            tracing::info!("Parser finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Parser failed: {:?}", e);
            ExitCode::FAILURE
        }
    }
}

/// Handles one invocation: builds the run context and executes the mode
async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    tracing::info!("Command line arguments: {:?}", cli);

    let mut context = Context::new(config).context("Failed to set up fetcher")?;
    context
        .run(cli.mode, cli.output, cli.clear_cache)
        .await
        .with_context(|| format!("Mode {} failed", cli.mode))?;

    Ok(())
}

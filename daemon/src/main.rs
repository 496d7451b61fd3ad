//! A daemon that keeps the agreement scoreboard fresh.

#![warn(clippy::all, clippy::pedantic)]

use accord_common::config::ScoreboardConfig;
use accord_common::refresh::RefreshState;
use accord_common::scoreboard::{self, CycleOutcome};
use accord_common::sync::GitSynchronizer;
use accord_common::tree::SubmissionTree;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the scoreboard config file
    #[arg(short, long, default_value = "config.json", env = "ACCORD_CONFIG")]
    config: PathBuf,

    /// Run a single cycle and exit instead of polling forever
    #[arg(long, env = "ACCORD_ONCE")]
    once: bool,

    /// Suppress all output
    #[arg(short, long, env = "ACCORD_QUIET")]
    quiet: bool,

    /// Show additional output
    #[arg(short, long, env = "ACCORD_VERBOSE")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Set up logger
    env_logger::init();

    // A broken config is fatal: there is nothing useful to poll without it
    let config = ScoreboardConfig::load(&cli.config)
        .with_context(|| format!("Could not load config from {}", cli.config.display()))?;

    if !cli.quiet {
        println!(
            "Accord daemon v{} started for \"{}\".",
            env!("CARGO_PKG_VERSION"),
            config.title
        );
        println!("Tracking {}", config.repo_remote);
        println!(
            "Writing {} every {}s on change.",
            config.output_file.display(),
            config.refresh_interval_secs
        );
    }
    if cli.verbose {
        println!("CLI Inputs: {cli:?}");
        println!("Config: {config:?}");
    }

    let mut synchronizer = GitSynchronizer::new(&config.repo_remote, config.checkout_dir());
    let tree = SubmissionTree::new(config.data_root());
    let mut state = RefreshState::new();

    // Main poll loop: sync, refresh if the tree moved, sleep, repeat.
    // Every failure mode short of a bad checkout layout is soft; the loop
    // only ends when the process is killed (or --once was given).
    loop {
        match scoreboard::run_cycle(&mut state, &mut synchronizer, &tree, &config) {
            Ok(CycleOutcome::Refreshed) => {
                if !cli.quiet {
                    println!("Scoreboard refreshed -> {}", config.output_file.display());
                }
            }
            Ok(CycleOutcome::Unchanged) => {
                if cli.verbose {
                    println!("No change, nothing to do.");
                }
            }
            Ok(CycleOutcome::SyncFailed) => {
                if !cli.quiet {
                    println!("Repository sync failed, will retry next cycle.");
                }
            }
            Ok(CycleOutcome::WriteFailed) => {
                if !cli.quiet {
                    println!("Could not write the scoreboard, will retry next cycle.");
                }
            }
            Err(e) => {
                // The checkout exists but its layout is unusable, e.g. the
                // configured subdir is missing. Keep polling: a future push
                // can fix the tree without a restart.
                eprintln!("Refresh failed: {e:#}");
            }
        }

        if cli.once {
            break;
        }
        time::sleep(Duration::from_secs(config.refresh_interval_secs)).await;
    }

    Ok(())
}

//! du-walker - Concurrent Disk Usage Walker
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use du_walker::config::{CliArgs, WalkConfig};
use du_walker::walker::{Coordinator, RunOutcome};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Setup logging
    setup_logging(args.verbose)?;

    // Validate and pick the run mode
    let config = WalkConfig::from_args(args).context("Invalid arguments")?;
    debug!(mode = config.mode.name(), roots = config.mode.root_count(), "Configuration loaded");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let outcome = Coordinator::new(config)
        .run(&mut out)
        .context("Walk failed")?;

    out.flush().context("Failed to flush output")?;

    match outcome {
        RunOutcome::Listing(files) => debug!(files = files.len(), "Listed files"),
        RunOutcome::Single(report) => debug!(files = report.tally.files, "Measured root"),
        RunOutcome::Multi { roots, total } => {
            debug!(roots = roots.len(), files = total.files, "Measured roots")
        }
    }

    Ok(())
}

fn setup_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("du_walker=debug,warn")
    } else {
        EnvFilter::new("du_walker=warn")
    };

    // Reports own stdout, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}

//! Run Log Directory Example
//!
//! Prints the log directory for a run starting now, e.g.
//! `logs/run-2024-03-01_14:05:09`, to hand to a training logger.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin run_logdir -- --root logs
//!
//! # Also create the directory
//! cargo run --bin run_logdir -- --root logs --create
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use milkit::run_logdir;
use milkit_demos::logging;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Root directory holding all run directories
    #[arg(long, default_value = "logs")]
    root: PathBuf,

    /// Create the run directory
    #[arg(long)]
    create: bool,
}

fn main() -> Result<()> {
    logging::init()?;
    let args = Args::parse();

    let logdir = run_logdir(&args.root).context("Failed to build run log directory")?;
    if args.create {
        std::fs::create_dir_all(&logdir)
            .with_context(|| format!("Failed to create directory: {}", logdir.display()))?;
    }

    println!("{}", logdir.display());
    Ok(())
}

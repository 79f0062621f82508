//! Training History Plot Example
//!
//! Renders a training history stored as JSON, e.g.
//! `{"loss": [0.69, 0.41], "bag_accuracy": [0.55, 0.80]}`, into a PNG line
//! chart with one curve per metric and a fixed vertical range of [0, 1].
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin plot_history -- --history history.json --output history.png
//!
//! # Larger image
//! cargo run --bin plot_history -- --history history.json --width 1200 --height 750
//!
//! # Label the legend with metric names
//! cargo run --bin plot_history -- --history history.json \
//!     --font /usr/share/fonts/truetype/dejavu/DejaVuSans.ttf
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use milkit::{plot_history, PlotConfig, TrainingHistory};
use milkit_demos::logging;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Training history JSON file
    #[arg(long)]
    history: PathBuf,

    /// Output PNG file
    #[arg(short, long, default_value = "history.png")]
    output: PathBuf,

    /// Plot configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// TrueType/OpenType font for legend labels
    #[arg(long)]
    font: Option<PathBuf>,
}

fn main() -> Result<()> {
    logging::init()?;
    let args = Args::parse();

    let mut config = if let Some(config_path) = &args.config {
        let config_str = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
        serde_json::from_str::<PlotConfig>(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?
    } else {
        PlotConfig::new()
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if args.font.is_some() {
        config.legend_font = args.font;
    }

    let history = TrainingHistory::load(&args.history)
        .with_context(|| format!("Failed to load history: {}", args.history.display()))?;

    println!("Metrics:");
    for (name, values) in history.series() {
        let last = values.last().copied().unwrap_or(f64::NAN);
        println!("  {name}: {} epochs, last={last:.4}", values.len());
    }

    let output = plot_history(&history, &args.output, &config).context("Failed to plot history")?;
    println!("Plot saved to {}", output.display());
    Ok(())
}

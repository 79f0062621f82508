//! Dataset Inspection Example
//!
//! Loads one or more directories of HDF5 data/label containers, prints the
//! merged shapes and label distribution, and pulls a few batches through
//! Burn's data loader. Useful for debugging file naming and key ordering.
//!
//! ## Usage
//!
//! ```bash
//! # Inspect one directory, ordering records by key token 1
//! cargo run --bin inspect_dataset -- --source datasets/train:1
//!
//! # Merge two directories and fail on misaligned data/label files
//! cargo run --bin inspect_dataset -- --source a:1 --source b:2 --strict
//!
//! # Use a JSON configuration with custom record shapes
//! cargo run --bin inspect_dataset -- --config inspect.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use burn::tensor::cast::ToElement;
use burn::{
    data::dataloader::{DataLoaderBuilder, Dataset},
    prelude::*,
};
use clap::Parser;
use milkit::{DatasetSource, MergedDataset, MilBatcher, MilDataset, MilLoader};
use milkit_demos::{
    create_device, get_backend_name, logging, InspectConfig, SelectedBackend, SelectedDevice,
};
use milkit_ops::TensorMilOps;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Dataset directory and key token index as PATH:SPLIT (repeatable)
    #[arg(long = "source")]
    sources: Vec<DatasetSource>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Suffix of data files
    #[arg(long)]
    data_suffix: Option<String>,

    /// Suffix of label files
    #[arg(long)]
    label_suffix: Option<String>,

    /// Fail when data and label files do not line up
    #[arg(long)]
    strict: bool,

    /// Number of samples to print
    #[arg(long)]
    num_samples: Option<usize>,

    /// Batch size for the batch loading check
    #[arg(long)]
    batch_size: Option<usize>,

    /// Number of workers for data loading
    #[arg(long)]
    num_workers: Option<usize>,
}

fn main() -> Result<()> {
    logging::init()?;
    let args = Args::parse();

    // Load configuration
    let mut config = if let Some(config_path) = &args.config {
        let config_str = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
        serde_json::from_str::<InspectConfig>(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?
    } else {
        InspectConfig::default()
    };

    // Apply command line overrides
    if !args.sources.is_empty() {
        config.sources = args.sources;
    }
    if let Some(suffix) = args.data_suffix {
        config.loader.naming.data_suffix = suffix;
    }
    if let Some(suffix) = args.label_suffix {
        config.loader.naming.label_suffix = suffix;
    }
    if args.strict {
        config.loader.strict_alignment = true;
    }
    if let Some(num_samples) = args.num_samples {
        config.num_samples = num_samples;
    }
    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }
    if let Some(num_workers) = args.num_workers {
        config.num_workers = num_workers;
    }

    if config.sources.is_empty() {
        anyhow::bail!("No dataset source given; pass --source PATH:SPLIT or a config file");
    }

    let device = create_device();
    println!("Using backend: {}", get_backend_name());
    println!("Sources:");
    for source in &config.sources {
        println!("  {source}");
    }

    let loader = MilLoader::new(config.loader.clone()).context("Invalid loader configuration")?;
    let merged = loader
        .load_sources(&config.sources)
        .context("Failed to load dataset sources")?;

    print_summary(&merged, &device);

    let dataset = MilDataset::new(merged);
    print_samples(&dataset, config.num_samples)?;
    print_batches(dataset, &config);

    println!("Dataset inspection completed successfully!");
    Ok(())
}

/// Print merged shapes and the label distribution
fn print_summary(merged: &MergedDataset, device: &SelectedDevice) {
    println!("\n=== Merged Dataset ===");
    println!("  Data shape: {:?}", merged.data.shape());
    println!("  Label shape: {:?}", merged.labels.shape());

    if merged.len() != merged.label_len() {
        println!(
            "  WARNING: {} data records but {} label records",
            merged.len(),
            merged.label_len()
        );
    }

    let (data, labels) = merged.clone().into_tensors::<SelectedBackend>(device);
    if merged.is_empty() {
        return;
    }

    let min = data.clone().min().into_scalar().to_f32();
    let max = data.clone().max().into_scalar().to_f32();
    let mean = data.mean().into_scalar().to_f32();
    println!("  Data stats: min={min:.4}, max={max:.4}, mean={mean:.4}");

    println!("  Label counts:");
    for (value, count) in labels.clone().count_uniques() {
        println!("    {}: {count}", value.into_inner());
    }

    let positives = labels.binarize().sum().into_scalar().to_i64();
    println!("  Labels above 0.5: {positives}");
}

/// Print individual samples
fn print_samples(dataset: &MilDataset, num_samples: usize) -> Result<()> {
    println!("\n=== Individual Samples ===");

    for i in 0..num_samples.min(dataset.len()) {
        let sample = dataset.get(i).context("Failed to get sample")?;
        println!(
            "Sample {i}: data {:?}, label {:?}",
            sample.data_shape, sample.label
        );
    }

    Ok(())
}

/// Pull a few batches through the data loader
fn print_batches(dataset: MilDataset, config: &InspectConfig) {
    println!("\n=== Batch Loading ===");

    let dataloader = DataLoaderBuilder::new(MilBatcher::<SelectedBackend>::new())
        .batch_size(config.batch_size)
        .shuffle(42)
        .num_workers(config.num_workers)
        .build(dataset);

    let mut batch_count = 0;
    let max_batches = 3;

    for batch in dataloader.iter() {
        batch_count += 1;
        println!(
            "Batch {batch_count}: data {:?}, labels {:?}",
            batch.data.dims(),
            batch.labels.dims()
        );

        if batch_count >= max_batches {
            break;
        }
    }

    println!("Batch loading test completed ({batch_count} batches tested)");
}

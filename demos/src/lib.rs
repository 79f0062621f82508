//! milkit demos
//!
//! Command-line applications built on `milkit`.
//!
//! ## Available Demos
//!
//! - `inspect_dataset`: Load HDF5 dataset directories and check shapes, labels, and batches
//! - `plot_history`: Render a JSON training history as a PNG learning-curve chart
//! - `run_logdir`: Print (or create) a timestamped run log directory
//!
//! ## Usage
//!
//! ```bash
//! # Inspect two dataset directories, ordering records by the second key token
//! cargo run --bin inspect_dataset -- --source data/train:1 --source data/extra:1
//!
//! # Plot a training history
//! cargo run --bin plot_history -- --history history.json --output history.png
//!
//! # Get a fresh log directory
//! cargo run --bin run_logdir -- --root logs --create
//! ```

pub mod backend;
pub mod config;
pub mod logging;

// Re-export commonly used items
pub use backend::{create_device, get_backend_name, SelectedBackend, SelectedDevice};
pub use config::InspectConfig;

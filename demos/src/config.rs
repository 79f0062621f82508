//! Configuration for the demo binaries.
//!
//! Every binary starts from these defaults, optionally replaced by a JSON file
//! given with `--config`, and finally applies its command-line overrides.

use milkit::{DatasetSource, LoaderConfig};
use serde::{Deserialize, Serialize};

/// Configuration for dataset inspection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectConfig {
    /// Loader settings: file naming, record shapes, alignment policy.
    pub loader: LoaderConfig,
    /// Directories to load, with the key token index of each.
    pub sources: Vec<DatasetSource>,
    /// Number of individual samples to print.
    pub num_samples: usize,
    /// Batch size for the batch loading check.
    pub batch_size: usize,
    /// Number of workers for data loading.
    pub num_workers: usize,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            loader: LoaderConfig::new(),
            sources: Vec::new(),
            num_samples: 3,
            batch_size: 4,
            num_workers: 1,
        }
    }
}

//! Dataset loading and bag-level metrics for Multiple Instance Learning with Burn.
//!
//! The crate reads labeled array datasets stored across many HDF5 containers,
//! exposes them as Burn datasets, scores bags of instances, and provides the
//! small helpers a training run needs around that: learning-curve plots and
//! timestamped log directories.

pub mod alignment;
pub mod config;
pub mod container;
pub mod dataset;
pub mod error;
pub mod keys;
pub mod loader;
pub mod logdir;
pub mod losses;
pub mod metrics;
pub mod plot;

#[cfg(test)]
mod tests;

pub use alignment::{check_alignment, AlignmentIssue, LoadedFile};
pub use config::{DatasetSource, FileNaming, LoaderConfig, ParseSourceError};
pub use container::{FileRole, Record};
pub use dataset::{MilBatch, MilBatcher, MilDataset, MilItem};
pub use error::{MilkitError, MilkitResult};
pub use loader::{load_directories, load_directory, LoadedSplit, MergedDataset, MilLoader};
pub use logdir::{run_logdir, run_logdir_at};
pub use losses::{BagBinaryLoss, BagBinaryLossConfig};
pub use metrics::{
    bag_accuracy, bag_binary_loss, calculate_bag_accuracy, calculate_bag_binary_loss, BagInput,
    BagMetricsAggregator,
};
#[cfg(feature = "train")]
pub use metrics::{BagAccuracyMetric, BagAccuracyMetricConfig, BagLossMetric, BagLossMetricConfig};
pub use plot::{plot_history, render_history, PlotConfig, TrainingHistory};

// Array transforms
pub use milkit_ops::{binarize, count_uniques, normalize_rgb_pixels, TensorMilOps};

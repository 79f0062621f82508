//! Bag-level metrics for Multiple Instance Learning.
//!
//! A bag groups instances that share one label. Both metrics average the
//! per-instance ground truth and predictions of a bag over the instance axis
//! before scoring, so a training loop can use them as plain scoring callbacks.

pub mod aggregator;
pub mod bag_accuracy;
pub mod bag_loss;
pub mod input;
#[cfg(feature = "train")]
pub mod learner;

pub use aggregator::*;
pub use bag_accuracy::*;
pub use bag_loss::*;
pub use input::*;
#[cfg(feature = "train")]
pub use learner::*;

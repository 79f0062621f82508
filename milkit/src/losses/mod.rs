//! Loss functions for MIL training.
//!
//! Losses operate on bags: the per-instance tensors of one bag are reduced to a
//! single bag-level value before the loss is computed.

pub mod bag_bce;

pub use bag_bce::{BagBinaryLoss, BagBinaryLossConfig};

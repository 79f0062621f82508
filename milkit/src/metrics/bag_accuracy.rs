//! Bag accuracy.

use burn::tensor::{backend::Backend, ElementConversion, Tensor};

/// Compute the accuracy of one bag.
///
/// # Arguments
/// * `y_true` - Ground truth of the bag instances, `[N, 1]`.
/// * `y_pred` - Prediction scores of the bag instances, `[N, 1]` (or `[1, 1]`).
///
/// # Returns
/// Tensor of shape `[1]`: 1 when the rounded mean prediction equals the mean
/// ground truth, 0 otherwise (averaged over the trailing axis).
pub fn bag_accuracy<B: Backend>(y_true: Tensor<B, 2>, y_pred: Tensor<B, 2>) -> Tensor<B, 1> {
    let bag_true = y_true.mean_dim(0);
    let bag_pred = y_pred.mean_dim(0).round();

    bag_true.equal(bag_pred).float().mean()
}

/// Calculate bag accuracy as a plain number.
pub fn calculate_bag_accuracy<B: Backend>(y_true: Tensor<B, 2>, y_pred: Tensor<B, 2>) -> f64 {
    bag_accuracy(y_true, y_pred).into_scalar().elem::<f64>()
}

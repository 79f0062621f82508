//! Input structure shared by the bag metrics.

use burn::{prelude::*, tensor::backend::Backend};

/// Ground truth and predictions of the instances of one bag.
pub struct BagInput<B: Backend> {
    /// Per-instance ground truth, `[N, 1]`.
    pub y_true: Tensor<B, 2>,
    /// Per-instance prediction scores, `[N, 1]`.
    pub y_pred: Tensor<B, 2>,
}

impl<B: Backend> BagInput<B> {
    pub const fn new(y_true: Tensor<B, 2>, y_pred: Tensor<B, 2>) -> Self {
        Self { y_true, y_pred }
    }
}

use std::marker::PhantomData;

use burn::{
    prelude::*,
    tensor::{backend::Backend, Tensor},
};

/// Binary cross-entropy between the averaged truth and the averaged prediction of a bag.
#[derive(Debug, Clone)]
pub struct BagBinaryLoss<B: Backend> {
    epsilon: f64,
    _phantom: PhantomData<B>,
}

#[derive(Config, Debug)]
pub struct BagBinaryLossConfig {
    /// Predictions are clipped to `[epsilon, 1 - epsilon]` and `epsilon` is added
    /// inside both logarithms.
    #[config(default = "1e-7")]
    pub epsilon: f64,
}

impl BagBinaryLossConfig {
    pub const fn init<B: Backend>(&self) -> BagBinaryLoss<B> {
        BagBinaryLoss {
            epsilon: self.epsilon,
            _phantom: PhantomData,
        }
    }
}

impl<B: Backend> Default for BagBinaryLoss<B> {
    fn default() -> Self {
        BagBinaryLossConfig::new().init()
    }
}

impl<B: Backend> BagBinaryLoss<B> {
    /// Forward pass.
    ///
    /// Args:
    ///   y_true: Per-instance ground truth of one bag, `[N, C]`
    ///   y_pred: Per-instance prediction scores of the bag in `[0, 1]`, `[M, C]`
    ///
    /// Returns:
    ///   Loss tensor of shape `[1]`
    pub fn forward(&self, y_true: Tensor<B, 2>, y_pred: Tensor<B, 2>) -> Tensor<B, 1> {
        self.assertions(&y_true, &y_pred);

        let epsilon = self.epsilon;
        let bag_true = y_true.mean_dim(0);
        let bag_pred = y_pred.mean_dim(0).clamp(epsilon, 1.0 - epsilon);

        // L = -(y * log(p + eps) + (1 - y) * log(1 - p + eps))
        let log_pred = bag_pred.clone().add_scalar(epsilon).log();
        let log_not_pred = bag_pred.neg().add_scalar(1.0 + epsilon).log();
        let not_true = bag_true.clone().neg().add_scalar(1.0);
        let loss = (bag_true * log_pred + not_true * log_not_pred).neg();

        loss.mean()
    }

    fn assertions(&self, y_true: &Tensor<B, 2>, y_pred: &Tensor<B, 2>) {
        let [_, true_classes] = y_true.dims();
        let [_, pred_classes] = y_pred.dims();
        assert_eq!(
            true_classes, pred_classes,
            "Bag truth and prediction must have the same trailing dimension. Got y_true: {:?}, y_pred: {:?}",
            y_true.dims(),
            y_pred.dims()
        );
    }
}

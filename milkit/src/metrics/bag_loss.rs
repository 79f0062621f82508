//! Bag binary cross-entropy loss.

use burn::tensor::{backend::Backend, ElementConversion, Tensor};

use crate::losses::BagBinaryLossConfig;

/// Compute the binary cross-entropy loss of predicting the bag label.
///
/// # Arguments
/// * `y_true` - Ground truth of the bag instances, `[N, 1]`.
/// * `y_pred` - Prediction scores of the bag instances in `[0, 1]`, `[N, 1]`.
///
/// # Returns
/// Tensor of shape `[1]` holding the loss of the averaged prediction against
/// the averaged ground truth.
pub fn bag_binary_loss<B: Backend>(y_true: Tensor<B, 2>, y_pred: Tensor<B, 2>) -> Tensor<B, 1> {
    BagBinaryLossConfig::new().init().forward(y_true, y_pred)
}

/// Calculate the bag loss as a plain number.
pub fn calculate_bag_binary_loss<B: Backend>(y_true: Tensor<B, 2>, y_pred: Tensor<B, 2>) -> f64 {
    bag_binary_loss(y_true, y_pred).into_scalar().elem::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_bag_loss_orders_predictions() {
        let device = Default::default();
        let y_true = Tensor::<TestBackend, 2>::from_floats([[1.0], [1.0]], &device);
        let close = Tensor::<TestBackend, 2>::from_floats([[0.9], [0.8]], &device);
        let far = Tensor::<TestBackend, 2>::from_floats([[0.2], [0.1]], &device);

        let close_loss = calculate_bag_binary_loss(y_true.clone(), close);
        let far_loss = calculate_bag_binary_loss(y_true, far);

        assert!(close_loss > 0.0);
        assert!(close_loss < far_loss);
        // -ln(0.85)
        assert!((close_loss - 0.162_519).abs() < 1e-4, "loss = {close_loss}");
    }

    #[test]
    fn test_bag_loss_shape() {
        let device = Default::default();
        let y_true = Tensor::<TestBackend, 2>::from_floats([[0.0], [0.0], [0.0]], &device);
        let y_pred = Tensor::<TestBackend, 2>::from_floats([[0.3], [0.2], [0.1]], &device);

        assert_eq!(bag_binary_loss(y_true, y_pred).dims(), [1]);
    }
}

//! Bag metrics aggregator.
//!
//! Accumulates bag accuracy and bag loss over many bags, e.g. over one
//! validation epoch, and reports their averages.

use burn::tensor::{backend::Backend, ElementConversion, Tensor};

use crate::{
    losses::{BagBinaryLoss, BagBinaryLossConfig},
    metrics::{bag_accuracy::bag_accuracy, input::BagInput},
};

/// Metrics aggregator over bags.
#[derive(Debug, Clone)]
pub struct BagMetricsAggregator<B: Backend> {
    loss: BagBinaryLoss<B>,
    accuracy_sum: f64,
    loss_sum: f64,
    count: usize,
}

impl<B: Backend> BagMetricsAggregator<B> {
    /// Create a new aggregator using the default bag loss.
    pub fn new() -> Self {
        Self::with_loss(BagBinaryLossConfig::new())
    }

    /// Create a new aggregator using a custom bag loss configuration.
    pub fn with_loss(config: BagBinaryLossConfig) -> Self {
        Self {
            loss: config.init(),
            accuracy_sum: 0.0,
            loss_sum: 0.0,
            count: 0,
        }
    }

    /// Add one bag.
    pub fn update(&mut self, y_true: Tensor<B, 2>, y_pred: Tensor<B, 2>) {
        let accuracy = bag_accuracy(y_true.clone(), y_pred.clone());
        let loss = self.loss.forward(y_true, y_pred);

        self.accuracy_sum += accuracy.into_scalar().elem::<f64>();
        self.loss_sum += loss.into_scalar().elem::<f64>();
        self.count += 1;
    }

    /// Add one bag from a [`BagInput`].
    pub fn update_input(&mut self, input: &BagInput<B>) {
        self.update(input.y_true.clone(), input.y_pred.clone());
    }

    /// Number of bags seen since the last reset.
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Get the average `(accuracy, loss)`; zeros when no bag was added.
    pub fn averages(&self) -> (f64, f64) {
        if self.count == 0 {
            return (0.0, 0.0);
        }

        let count = self.count as f64;
        (self.accuracy_sum / count, self.loss_sum / count)
    }

    /// Reset the aggregator.
    pub fn reset(&mut self) {
        self.accuracy_sum = 0.0;
        self.loss_sum = 0.0;
        self.count = 0;
    }
}

impl<B: Backend> Default for BagMetricsAggregator<B> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    fn bag(values: [[f32; 1]; 2]) -> Tensor<TestBackend, 2> {
        Tensor::from_floats(values, &Default::default())
    }

    #[test]
    fn test_aggregator_averages() {
        let mut aggregator = BagMetricsAggregator::<TestBackend>::new();

        aggregator.update(bag([[1.0], [1.0]]), bag([[0.6], [0.4]]));
        aggregator.update(bag([[0.0], [0.0]]), bag([[0.9], [0.7]]));
        aggregator.update_input(&BagInput::new(bag([[1.0], [1.0]]), bag([[0.9], [0.9]])));

        let (accuracy, loss) = aggregator.averages();
        assert_eq!(aggregator.count(), 3);
        // Bag 2 misses and bag 3 hits, whatever way bag 1 rounds.
        assert!(accuracy > 0.0 && accuracy < 1.0);
        assert!(loss > 0.0);
    }

    #[test]
    fn test_aggregator_reset() {
        let mut aggregator = BagMetricsAggregator::<TestBackend>::default();
        aggregator.update(bag([[1.0], [1.0]]), bag([[0.9], [0.8]]));

        aggregator.reset();

        assert_eq!(aggregator.count(), 0);
        assert_eq!(aggregator.averages(), (0.0, 0.0));
    }
}

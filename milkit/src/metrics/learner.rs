//! Bag metrics for Burn's training loop.
//!
//! Each update scores one bag and records it with weight 1 in the metric
//! state.

use burn::{
    prelude::*,
    tensor::{backend::Backend, ElementConversion},
    train::metric::{
        state::{FormatOptions, NumericMetricState},
        Metric, MetricEntry, MetricMetadata, Numeric,
    },
};
use std::marker::PhantomData;

use crate::losses::BagBinaryLossConfig;
use crate::metrics::{bag_accuracy, input::BagInput};

// --- Bag Accuracy Metric ---

#[derive(Config, Debug)]
pub struct BagAccuracyMetricConfig {}

pub struct BagAccuracyMetric<B: Backend> {
    state: NumericMetricState,
    _b: PhantomData<B>,
}

impl BagAccuracyMetricConfig {
    pub fn init<B: Backend>(&self) -> BagAccuracyMetric<B> {
        BagAccuracyMetric {
            state: NumericMetricState::default(),
            _b: PhantomData,
        }
    }
}

impl<B: Backend> Default for BagAccuracyMetric<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> BagAccuracyMetric<B> {
    pub fn new() -> Self {
        BagAccuracyMetricConfig::new().init()
    }
}

impl<B: Backend> Metric for BagAccuracyMetric<B> {
    type Input = BagInput<B>;

    fn name(&self) -> String {
        "Bag Accuracy".to_string()
    }

    fn update(&mut self, item: &Self::Input, _metadata: &MetricMetadata) -> MetricEntry {
        let accuracy = bag_accuracy(item.y_true.clone(), item.y_pred.clone())
            .into_scalar()
            .elem::<f64>();
        self.state
            .update(accuracy, 1, FormatOptions::new(self.name()).precision(4))
    }

    fn clear(&mut self) {
        self.state.reset();
    }
}

impl<B: Backend> Numeric for BagAccuracyMetric<B> {
    fn value(&self) -> f64 {
        self.state.value()
    }
}

// --- Bag Loss Metric ---

#[derive(Config, Debug)]
pub struct BagLossMetricConfig {
    #[config(default = "1e-7")]
    pub epsilon: f64,
}

pub struct BagLossMetric<B: Backend> {
    state: NumericMetricState,
    epsilon: f64,
    _b: PhantomData<B>,
}

impl BagLossMetricConfig {
    pub fn init<B: Backend>(&self) -> BagLossMetric<B> {
        BagLossMetric {
            state: NumericMetricState::default(),
            epsilon: self.epsilon,
            _b: PhantomData,
        }
    }
}

impl<B: Backend> Default for BagLossMetric<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> BagLossMetric<B> {
    pub fn new() -> Self {
        BagLossMetricConfig::new().init()
    }
}

impl<B: Backend> Metric for BagLossMetric<B> {
    type Input = BagInput<B>;

    fn name(&self) -> String {
        "Bag Loss".to_string()
    }

    fn update(&mut self, item: &Self::Input, _metadata: &MetricMetadata) -> MetricEntry {
        let loss = BagBinaryLossConfig::new()
            .with_epsilon(self.epsilon)
            .init::<B>()
            .forward(item.y_true.clone(), item.y_pred.clone())
            .into_scalar()
            .elem::<f64>();
        self.state
            .update(loss, 1, FormatOptions::new(self.name()).precision(5))
    }

    fn clear(&mut self) {
        self.state.reset();
    }
}

impl<B: Backend> Numeric for BagLossMetric<B> {
    fn value(&self) -> f64 {
        self.state.value()
    }
}

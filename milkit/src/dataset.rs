//! Dataset implementation for feeding merged MIL data to Burn.
//!
//! Following Burn's convention, the dataset hands out raw record data and the
//! batcher creates tensors on the target device.

use std::marker::PhantomData;

use burn::{
    data::{dataloader::batcher::Batcher, dataset::Dataset},
    tensor::{backend::Backend, Tensor, TensorData},
};
use ndarray::Axis;

use crate::loader::MergedDataset;

/// A single example: one data record and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct MilItem {
    /// Data values in row-major `[channels, height, width]` order.
    pub data: Vec<f32>,
    /// Label values.
    pub label: Vec<f32>,
    /// Shape of the data record.
    pub data_shape: [usize; 3],
    /// Shape of the label record.
    pub label_shape: [usize; 1],
}

/// A batch of examples.
#[derive(Debug, Clone)]
pub struct MilBatch<B: Backend> {
    /// Batched data with shape `[B, C, H, W]`.
    pub data: Tensor<B, 4>,
    /// Batched labels with shape `[B, L]`.
    pub labels: Tensor<B, 2>,
}

/// Batcher converting vectors of [`MilItem`] into [`MilBatch`].
///
/// All items of a batch are expected to share the shapes of the first item,
/// which holds for items taken from one [`MilDataset`].
#[derive(Clone, Default)]
pub struct MilBatcher<B: Backend> {
    _phantom: PhantomData<B>,
}

impl<B: Backend> MilBatcher<B> {
    /// Create a new batcher.
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<B: Backend> Batcher<B, MilItem, MilBatch<B>> for MilBatcher<B> {
    fn batch(&self, items: Vec<MilItem>, device: &B::Device) -> MilBatch<B> {
        let batch_size = items.len();
        let (data_shape, label_shape) = items
            .first()
            .map_or(([0, 0, 0], [0]), |item| (item.data_shape, item.label_shape));
        let [channels, height, width] = data_shape;

        let mut data = Vec::with_capacity(batch_size * channels * height * width);
        let mut labels = Vec::with_capacity(batch_size * label_shape[0]);
        for item in items {
            data.extend(item.data);
            labels.extend(item.label);
        }

        let data = Tensor::<B, 4>::from_data(
            TensorData::new(data, [batch_size, channels, height, width]),
            device,
        );
        let labels = Tensor::<B, 2>::from_data(
            TensorData::new(labels, [batch_size, label_shape[0]]),
            device,
        );

        MilBatch { data, labels }
    }
}

/// In-memory dataset over the records of a [`MergedDataset`].
#[derive(Debug, Clone)]
pub struct MilDataset {
    merged: MergedDataset,
}

impl MilDataset {
    /// Wrap merged records.
    ///
    /// Items are only produced for indices that have both a data and a label record.
    pub fn new(merged: MergedDataset) -> Self {
        Self { merged }
    }

    /// The underlying merged arrays.
    pub const fn merged(&self) -> &MergedDataset {
        &self.merged
    }

    /// Return the underlying merged arrays.
    pub fn into_inner(self) -> MergedDataset {
        self.merged
    }
}

impl From<MergedDataset> for MilDataset {
    fn from(merged: MergedDataset) -> Self {
        Self::new(merged)
    }
}

impl Dataset<MilItem> for MilDataset {
    fn get(&self, index: usize) -> Option<MilItem> {
        if index >= self.len() {
            return None;
        }

        let data = self.merged.data.index_axis(Axis(0), index);
        let label = self.merged.labels.index_axis(Axis(0), index);

        // Items feed the float tensors of a batch, so records narrow to f32 here.
        Some(MilItem {
            data: data.iter().map(|&value| value as f32).collect(),
            label: label.iter().map(|&value| value as f32).collect(),
            data_shape: self.merged.data_shape(),
            label_shape: self.merged.label_shape(),
        })
    }

    fn len(&self) -> usize {
        self.merged.len().min(self.merged.label_len())
    }
}

//! Counting distinct tensor values

use std::collections::BTreeMap;

use burn::{prelude::*, tensor::BasicOps};
use ordered_float::OrderedFloat;

/// Counts the occurrence of values in a tensor, returning `{value: count, ...}`.
///
/// Values are compared as `f32`, so integer tensors are counted exactly as long
/// as they stay within `f32` precision. The computed map is also logged.
pub fn count_uniques<B, const D: usize, K>(
    tensor: Tensor<B, D, K>,
) -> BTreeMap<OrderedFloat<f32>, usize>
where
    B: Backend,
    K: BasicOps<B>,
{
    let mut counts = BTreeMap::new();
    for value in tensor.into_data().iter::<f32>() {
        *counts.entry(OrderedFloat(value)).or_insert(0) += 1;
    }

    tracing::info!(?counts, "Counted unique values");
    counts
}

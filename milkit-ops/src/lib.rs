//! Array transform operations for Multiple Instance Learning workflows
//!
//! This crate provides small element-wise and reduction helpers used around MIL
//! training: binary thresholding of sigmoid outputs, 8-bit pixel normalization,
//! and counting of distinct tensor values.

use std::collections::BTreeMap;

use burn::prelude::*;
use ordered_float::OrderedFloat;

mod normalize;
mod threshold;
mod unique;

// Convenient re-exports
pub use normalize::{normalize_rgb_pixels, MAX_PIXEL_VALUE};
pub use threshold::{binarize, BINARY_THRESHOLD};
pub use unique::count_uniques;

/// Additional operations for float tensors
pub trait TensorMilOps<B: Backend, const D: usize> {
    /// Map values `<= 0.5` to 0 and values `> 0.5` to 1
    fn binarize(self) -> Tensor<B, D, Int>;

    /// Count how often every distinct value occurs
    fn count_uniques(self) -> BTreeMap<OrderedFloat<f32>, usize>;
}

impl<B: Backend, const D: usize> TensorMilOps<B, D> for Tensor<B, D> {
    fn binarize(self) -> Tensor<B, D, Int> {
        binarize(self)
    }

    fn count_uniques(self) -> BTreeMap<OrderedFloat<f32>, usize> {
        count_uniques(self)
    }
}

//! 8-bit pixel normalization

use burn::prelude::*;

/// Largest value of an 8-bit color channel.
pub const MAX_PIXEL_VALUE: f64 = 255.0;

/// Normalize RGB pixel values ranging from 0-255 into `[0, 1]`.
pub fn normalize_rgb_pixels<B: Backend, const D: usize>(
    pixels: Tensor<B, D, Int>,
) -> Tensor<B, D> {
    pixels.float().div_scalar(MAX_PIXEL_VALUE)
}

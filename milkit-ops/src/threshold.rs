//! Binary thresholding of probability tensors

use burn::prelude::*;

/// Values strictly above this become 1, everything else becomes 0.
pub const BINARY_THRESHOLD: f64 = 0.5;

/// Transform tensor entries into 0 if they are `<= 0.5` or 1 if they are `> 0.5`.
///
/// The threshold is fixed. NaN entries compare false against the threshold and
/// therefore map to 1.
pub fn binarize<B: Backend, const D: usize>(tensor: Tensor<B, D>) -> Tensor<B, D, Int> {
    tensor.lower_equal_elem(BINARY_THRESHOLD).bool_not().int()
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::ndarray::NdArray;

    type TestBackend = NdArray<f32>;

    fn as_ints<const D: usize>(tensor: Tensor<TestBackend, D, Int>) -> Vec<i64> {
        tensor.into_data().iter::<i64>().collect()
    }

    #[test]
    fn binarize_threshold_boundary() {
        let device = Default::default();
        let input =
            Tensor::<TestBackend, 1>::from_floats([0.0, 0.5, 0.500_000_1, 1.0], &device);

        assert_eq!(as_ints(binarize(input)), vec![0, 0, 1, 1]);
    }

    #[test]
    fn binarize_keeps_shape() {
        let device = Default::default();
        let input = Tensor::<TestBackend, 3>::from_floats(
            [[[0.1, 0.6], [0.4, 0.51]], [[0.99, -1.0], [2.0, 0.5]]],
            &device,
        );

        let output = binarize(input);

        assert_eq!(output.dims(), [2, 2, 2]);
        assert_eq!(as_ints(output), vec![0, 1, 0, 1, 1, 0, 1, 0]);
    }

    #[test]
    fn binarize_out_of_range_values() {
        let device = Default::default();
        let input = Tensor::<TestBackend, 1>::from_floats([-3.0, 7.5], &device);

        assert_eq!(as_ints(binarize(input)), vec![0, 1]);
    }
}

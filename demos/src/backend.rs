//! Backend chosen at compile time: `cuda`, then `wgpu`, then `ndarray`.

use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(feature = "cuda")] {
        pub type SelectedBackend = burn::backend::cuda::Cuda;
        const BACKEND_NAME: &str = "CUDA (NVIDIA GPU)";
    } else if #[cfg(feature = "wgpu")] {
        pub type SelectedBackend = burn::backend::wgpu::Wgpu;
        const BACKEND_NAME: &str = "WGPU (GPU)";
    } else {
        pub type SelectedBackend = burn::backend::ndarray::NdArray;
        const BACKEND_NAME: &str = "NdArray (CPU)";
    }
}

/// Device type of [`SelectedBackend`].
pub type SelectedDevice = <SelectedBackend as burn::tensor::backend::Backend>::Device;

/// Default device of the selected backend.
pub fn create_device() -> SelectedDevice {
    SelectedDevice::default()
}

/// Backend name for the demos' startup report.
pub const fn get_backend_name() -> &'static str {
    BACKEND_NAME
}

#[cfg(all(test, not(any(feature = "cuda", feature = "wgpu"))))]
mod tests {
    use super::*;
    use burn::tensor::Tensor;

    #[test]
    fn test_default_backend_is_ndarray() {
        assert_eq!(get_backend_name(), "NdArray (CPU)");

        let tensor = Tensor::<SelectedBackend, 1>::from_floats([1.0, 2.0], &create_device());
        assert_eq!(tensor.dims(), [2]);
    }
}

//! Backend type aliases and device management
//!
//! The value network is tiny (11 → 256 → 3), so the CPU NdArray backend is all
//! the training loop needs.
//!
//! - **TrainingBackend**: Autodiff-enabled NdArray backend used by the agent
//! - **InferenceBackend**: the plain backend behind `network.valid()`

use burn::backend::{
    Autodiff,
    ndarray::{NdArray, NdArrayDevice},
};
use burn::tensor::backend::Backend;

/// Backend type for training (with autodiff)
pub type TrainingBackend = Autodiff<NdArray<f32>>;

/// Backend type for gradient-free Q-value queries
pub type InferenceBackend = NdArray<f32>;

/// Get the default device for computation
pub fn default_device() -> NdArrayDevice {
    NdArrayDevice::default()
}

/// Seed the backend's parameter initialisation for reproducible runs
pub fn seed_backend(seed: u64) {
    TrainingBackend::seed(seed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiple_device_calls() {
        let device1 = default_device();
        let device2 = default_device();
        assert_eq!(
            std::mem::discriminant(&device1),
            std::mem::discriminant(&device2)
        );
    }
}

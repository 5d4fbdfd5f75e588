pub mod error;
pub mod activation;
pub mod neuron;
pub mod network;
pub mod loss;
pub mod data;
pub mod train;

// Convenience re-exports
pub use error::{MlpError, Result};
pub use activation::sigmoid::sigmoid;
pub use neuron::neuron::Neuron;
pub use network::network::{Network, WeightTensor};
pub use network::spec::NetworkSpec;
pub use loss::mse::MseLoss;
pub use data::sample::Sample;
pub use train::{train_epoch, train_loop, EpochStats, TrainConfig};

pub mod backprop;
pub mod network;
pub mod spec;

pub use network::{Network, WeightTensor, DEFAULT_BIAS, DEFAULT_LEARNING_RATE};
pub use spec::NetworkSpec;

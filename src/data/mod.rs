pub mod gates;
pub mod sample;
pub mod segments;

pub use gates::{and, binary_inputs, or, xor};
pub use sample::Sample;
pub use segments::seven_segment;

//! Two-input logic gates.
//!
//! The gate weights are laid out as `[w_a, w_b, w_bias]` for a sigmoid
//! neuron with a bias input of 1.0.

use crate::data::sample::Sample;
use crate::network::WeightTensor;

pub const AND_WEIGHTS: [f64; 3] = [10.0, 10.0, -15.0];
pub const OR_WEIGHTS: [f64; 3] = [20.0, 20.0, -10.0];
pub const NAND_WEIGHTS: [f64; 3] = [-15.0, -15.0, 20.0];

/// The four binary input pairs in truth-table order.
pub fn binary_inputs() -> [[f64; 2]; 4] {
    [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]]
}

pub fn xor() -> Vec<Sample> {
    truth_table(|a, b| a != b)
}

pub fn and() -> Vec<Sample> {
    truth_table(|a, b| a && b)
}

pub fn or() -> Vec<Sample> {
    truth_table(|a, b| a || b)
}

/// XOR as `(a NAND b) AND (a OR b)` for a 2-2-1 network.
pub fn hand_coded_xor_weights() -> WeightTensor {
    vec![
        vec![NAND_WEIGHTS.to_vec(), OR_WEIGHTS.to_vec()],
        vec![AND_WEIGHTS.to_vec()],
    ]
}

fn truth_table(gate: impl Fn(bool, bool) -> bool) -> Vec<Sample> {
    binary_inputs().iter()
        .map(|&[a, b]| {
            let out = if gate(a == 1.0, b == 1.0) { 1.0 } else { 0.0 };
            Sample::new(vec![a, b], vec![out])
        })
        .collect()
}

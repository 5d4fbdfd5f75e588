use rand::Rng;

use crate::activation::sigmoid;
use crate::error::{MlpError, Result};

/// A single sigmoid unit.
///
/// Holds one weight per input plus a trailing bias weight, so
/// `weights.len() == input_count + 1` for the lifetime of the neuron.
#[derive(Debug, Clone, PartialEq)]
pub struct Neuron {
    weights: Vec<f64>,
    bias: f64,
}

impl Neuron {
    /// Creates a neuron whose weights are drawn uniformly from [-1, 1).
    pub fn new<R: Rng + ?Sized>(input_count: usize, bias: f64, rng: &mut R) -> Neuron {
        let weights = (0..=input_count)
            .map(|_| rng.gen::<f64>() * 2.0 - 1.0)
            .collect();
        Neuron { weights, bias }
    }

    pub fn input_count(&self) -> usize {
        self.weights.len() - 1
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Weighted sum of `input` extended with the bias value, passed through
    /// the sigmoid.
    pub fn evaluate(&self, input: &[f64]) -> Result<f64> {
        MlpError::check_len("neuron input", self.input_count(), input.len())?;
        Ok(self.activate(input))
    }

    /// Replaces the whole weight vector, bias weight included.
    pub fn replace_weights(&mut self, weights: Vec<f64>) -> Result<()> {
        MlpError::check_len("neuron weights", self.weights.len(), weights.len())?;
        self.weights = weights;
        Ok(())
    }

    // Callers guarantee `input.len() == input_count()`.
    pub(crate) fn activate(&self, input: &[f64]) -> f64 {
        let last = self.input_count();
        let (input_weights, bias_weight) = (&self.weights[..last], self.weights[last]);
        let sum: f64 = input.iter()
            .zip(input_weights.iter())
            .map(|(x, w)| x * w)
            .sum::<f64>()
            + self.bias * bias_weight;
        sigmoid(sum)
    }

    /// Adds `delta` to the weight at `index`; the last index is the bias weight.
    pub(crate) fn nudge_weight(&mut self, index: usize, delta: f64) {
        self.weights[index] += delta;
    }
}

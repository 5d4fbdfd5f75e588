use tracing::trace;

use crate::activation::sigmoid_derivative;
use crate::error::{MlpError, Result};
use crate::loss::MseLoss;
use crate::network::network::Network;

impl Network {
    /// Runs one online backpropagation step on a single `(input, target)`
    /// pair and returns the sample's mean squared error, measured before the
    /// weights move.
    ///
    /// 1. forward pass
    /// 2. output error terms: `o * (1 - o) * (y - o)`
    /// 3. hidden error terms, last hidden layer first
    /// 4. weight update: `w += learning_rate * delta * source`, where the
    ///    source of the trailing bias weight is the network bias
    ///
    /// Shapes are checked up front; a rejected call leaves the network
    /// untouched.
    pub fn train_one_sample(&mut self, input: &[f64], target: &[f64]) -> Result<f64> {
        if self.layer_count() < 2 {
            return Err(MlpError::StructuralPrecondition(
                "training needs an output layer behind the input layer".to_string(),
            ));
        }
        MlpError::check_len("network input", self.input_size(), input.len())?;
        MlpError::check_len("training target", self.output_size(), target.len())?;

        let output = self.forward(input)?;
        let mse = MseLoss::loss(&output, target)?;

        self.output_error_terms(&output, target);
        self.hidden_error_terms();
        self.apply_weight_updates();

        trace!(mse, "trained on sample");
        Ok(mse)
    }

    fn output_error_terms(&mut self, output: &[f64], target: &[f64]) {
        let last = self.errors.len() - 1;
        for ((delta, &o), &y) in self.errors[last].iter_mut().zip(output).zip(target) {
            *delta = sigmoid_derivative(o) * (y - o);
        }
    }

    // Vacuous for networks without a hidden layer.
    fn hidden_error_terms(&mut self) {
        let last = self.layers.len() - 1;
        for layer in (1..last).rev() {
            let (current, next) = self.errors.split_at_mut(layer + 1);
            let downstream = &next[0];
            let consumers = &self.layers[layer + 1];

            for (j, delta) in current[layer].iter_mut().enumerate() {
                let propagated: f64 = consumers.iter()
                    .zip(downstream.iter())
                    .map(|(neuron, &next_delta)| next_delta * neuron.weights()[j])
                    .sum();
                *delta = sigmoid_derivative(self.activations[layer][j]) * propagated;
            }
        }
    }

    fn apply_weight_updates(&mut self) {
        for layer in 1..self.layers.len() {
            let inputs = &self.activations[layer - 1];
            let deltas = &self.errors[layer];
            let bias_slot = inputs.len();

            for (neuron, &delta) in self.layers[layer].iter_mut().zip(deltas.iter()) {
                let step = self.learning_rate * delta;
                for (k, &source) in inputs.iter().enumerate() {
                    neuron.nudge_weight(k, step * source);
                }
                neuron.nudge_weight(bias_slot, step * self.bias);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::data::{gates, xor};
    use crate::error::MlpError;
    use crate::network::Network;
    use approx::assert_abs_diff_eq;
    use rand::{rngs::StdRng, SeedableRng};

    fn seeded(layer_sizes: &[usize], bias: f64, learning_rate: f64) -> Network {
        Network::new(layer_sizes, bias, learning_rate, &mut StdRng::seed_from_u64(5)).unwrap()
    }

    #[test]
    fn returns_mse_of_pre_update_output() {
        let mut network = seeded(&[2, 3, 2], 1.0, 0.5);
        let mut reference = network.clone();
        let output = reference.forward(&[0.3, 0.7]).unwrap();
        let target = [1.0, 0.0];
        let expected = ((1.0 - output[0]).powi(2) + (0.0 - output[1]).powi(2)) / 2.0;

        let mse = network.train_one_sample(&[0.3, 0.7], &target).unwrap();
        assert_abs_diff_eq!(mse, expected, epsilon = 1e-15);
    }

    #[test]
    fn output_error_terms_are_sigmoid_weighted_residuals() {
        let mut network = seeded(&[2, 2, 1], 1.0, 0.5);
        network.train_one_sample(&[1.0, 0.0], &[1.0]).unwrap();
        // The forward pass is not repeated after the update, so the stored
        // activations are the ones the error terms were computed from.
        let o = network.activations()[2][0];
        assert_abs_diff_eq!(
            network.error_terms()[2][0],
            o * (1.0 - o) * (1.0 - o),
            epsilon = 1e-15
        );
    }

    #[test]
    fn hidden_error_terms_use_pre_update_downstream_weights() {
        let mut network = seeded(&[2, 3, 2], 1.0, 0.5);
        let before = network.weights_snapshot();
        network.train_one_sample(&[0.9, 0.1], &[0.0, 1.0]).unwrap();

        let hidden = network.activations()[1].clone();
        let output_deltas = network.error_terms()[2].clone();
        for (j, &h) in hidden.iter().enumerate() {
            let propagated: f64 = output_deltas.iter()
                .enumerate()
                .map(|(k, d)| d * before[1][k][j])
                .sum();
            assert_abs_diff_eq!(
                network.error_terms()[1][j],
                h * (1.0 - h) * propagated,
                epsilon = 1e-15
            );
        }
    }

    #[test]
    fn every_weight_moves_by_rate_times_delta_times_source() {
        let bias = 0.75;
        let rate = 0.3;
        let mut network = seeded(&[3, 4, 2], bias, rate);
        let before = network.weights_snapshot();
        network.train_one_sample(&[0.2, -0.4, 0.6], &[1.0, 0.0]).unwrap();
        let after = network.weights_snapshot();

        for layer in 1..network.layer_count() {
            let inputs = network.activations()[layer - 1].clone();
            for (n, delta) in network.error_terms()[layer].iter().enumerate() {
                for (k, &source) in inputs.iter().enumerate() {
                    assert_abs_diff_eq!(
                        after[layer - 1][n][k] - before[layer - 1][n][k],
                        rate * delta * source,
                        epsilon = 1e-12
                    );
                }
                let bias_slot = inputs.len();
                assert_abs_diff_eq!(
                    after[layer - 1][n][bias_slot] - before[layer - 1][n][bias_slot],
                    rate * delta * bias,
                    epsilon = 1e-12
                );
            }
        }
    }

    #[test]
    fn two_layer_network_skips_hidden_step() {
        let mut network = seeded(&[2, 1], 1.0, 0.5);
        let before = network.weights_snapshot();
        let mse = network.train_one_sample(&[1.0, 1.0], &[1.0]).unwrap();
        assert!(mse > 0.0);
        assert_ne!(network.weights_snapshot(), before);
        assert!(network.error_terms()[0].iter().all(|&d| d == 0.0));
    }

    #[test]
    fn input_only_network_cannot_train() {
        let mut network = seeded(&[2], 1.0, 0.5);
        assert!(matches!(
            network.train_one_sample(&[1.0, 1.0], &[1.0, 1.0]),
            Err(MlpError::StructuralPrecondition(_))
        ));
    }

    #[test]
    fn rejected_target_leaves_network_untouched() {
        let mut network = seeded(&[2, 2, 1], 1.0, 0.5);
        let before = network.weights_snapshot();
        assert!(matches!(
            network.train_one_sample(&[1.0, 0.0], &[1.0, 0.0]),
            Err(MlpError::DimensionMismatch { expected: 1, actual: 2, .. })
        ));
        assert!(matches!(
            network.train_one_sample(&[1.0], &[1.0]),
            Err(MlpError::DimensionMismatch { expected: 2, actual: 1, .. })
        ));
        assert_eq!(network.weights_snapshot(), before);
        assert!(network.activations().iter().flatten().all(|&v| v == 0.0));
    }

    #[test]
    fn training_keeps_weight_shapes() {
        let mut network = seeded(&[2, 2, 1], 1.0, 0.5);
        for _ in 0..50 {
            for sample in xor() {
                network.train_one_sample(&sample.input, &sample.target).unwrap();
            }
        }
        let snapshot = network.weights_snapshot();
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot[0].len() == 2 && snapshot[0].iter().all(|w| w.len() == 3));
        assert!(snapshot[1].len() == 1 && snapshot[1][0].len() == 3);
    }

    #[test]
    fn training_moves_hand_coded_xor_toward_target() {
        let mut network = seeded(&[2, 2, 1], 1.0, 0.5);
        network.set_weights(gates::hand_coded_xor_weights()).unwrap();
        let first = network.train_one_sample(&[1.0, 1.0], &[1.0]).unwrap();
        let second = network.train_one_sample(&[1.0, 1.0], &[1.0]).unwrap();
        assert!(second <= first);
    }
}

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

use crate::error::{MlpError, Result};
use crate::network::spec::NetworkSpec;
use crate::neuron::Neuron;

pub const DEFAULT_BIAS: f64 = 1.0;
pub const DEFAULT_LEARNING_RATE: f64 = 0.5;

/// Weights of every non-input layer, indexed `[layer - 1][neuron][weight]`.
pub type WeightTensor = Vec<Vec<Vec<f64>>>;

/// A fully-connected sigmoid multilayer perceptron.
///
/// Layer 0 is the input layer: it owns no neurons and its activation buffer
/// holds the raw input of the last forward pass. Activation and error buffers
/// are reused across calls, so every operation that touches them takes
/// `&mut self`.
#[derive(Debug, Clone)]
pub struct Network {
    pub(super) layer_sizes: Vec<usize>,
    pub(super) bias: f64,
    pub(super) learning_rate: f64,
    pub(super) layers: Vec<Vec<Neuron>>,
    pub(super) activations: Vec<Vec<f64>>,
    pub(super) errors: Vec<Vec<f64>>,
}

impl Network {
    /// Builds a network with random initial weights drawn from `rng`.
    pub fn new<R: Rng + ?Sized>(
        layer_sizes: &[usize],
        bias: f64,
        learning_rate: f64,
        rng: &mut R,
    ) -> Result<Network> {
        if layer_sizes.is_empty() {
            return Err(MlpError::StructuralPrecondition(
                "a network needs at least one layer".to_string(),
            ));
        }
        if let Some(layer) = layer_sizes.iter().position(|&size| size == 0) {
            return Err(MlpError::StructuralPrecondition(format!(
                "layer {layer} has no neurons"
            )));
        }

        let layers: Vec<Vec<Neuron>> = layer_sizes.iter().enumerate()
            .map(|(layer, &size)| {
                if layer == 0 {
                    Vec::new()
                } else {
                    (0..size)
                        .map(|_| Neuron::new(layer_sizes[layer - 1], bias, &mut *rng))
                        .collect()
                }
            })
            .collect();
        let activations: Vec<Vec<f64>> = layer_sizes.iter().map(|&size| vec![0.0; size]).collect();
        let errors = activations.clone();

        debug!(?layer_sizes, bias, learning_rate, "initialized network");

        Ok(Network {
            layer_sizes: layer_sizes.to_vec(),
            bias,
            learning_rate,
            layers,
            activations,
            errors,
        })
    }

    /// Same as [`Network::new`] with a bias of 1.0 and a learning rate of 0.5.
    pub fn with_defaults<R: Rng + ?Sized>(layer_sizes: &[usize], rng: &mut R) -> Result<Network> {
        Network::new(layer_sizes, DEFAULT_BIAS, DEFAULT_LEARNING_RATE, rng)
    }

    /// Builds a network from a spec, seeding the weights from `spec.seed` when
    /// one is given and from the thread-local generator otherwise.
    pub fn from_spec(spec: &NetworkSpec) -> Result<Network> {
        match spec.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                Network::new(&spec.layer_sizes, spec.bias, spec.learning_rate, &mut rng)
            }
            None => Network::new(
                &spec.layer_sizes,
                spec.bias,
                spec.learning_rate,
                &mut rand::thread_rng(),
            ),
        }
    }

    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    pub fn layer_count(&self) -> usize {
        self.layer_sizes.len()
    }

    pub fn input_size(&self) -> usize {
        self.layer_sizes[0]
    }

    pub fn output_size(&self) -> usize {
        self.layer_sizes[self.layer_sizes.len() - 1]
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Neurons of `layer`; empty for the input layer, `None` past the
    /// output layer.
    pub fn neurons(&self, layer: usize) -> Option<&[Neuron]> {
        self.layers.get(layer).map(Vec::as_slice)
    }

    /// Per-layer outputs of the most recent forward pass.
    pub fn activations(&self) -> &[Vec<f64>] {
        &self.activations
    }

    /// Per-layer error terms of the most recent training step.
    pub fn error_terms(&self) -> &[Vec<f64>] {
        &self.errors
    }

    /// Overwrites the weights of the leading layers.
    ///
    /// `weights[0]` addresses layer 1. The tensor may cover fewer layers than
    /// the network has, and a layer entry may cover fewer neurons than the
    /// layer owns; whatever it covers must match in shape. Every shape is
    /// checked before the first neuron is touched.
    pub fn set_weights(&mut self, weights: WeightTensor) -> Result<()> {
        let weighted_layers = self.layers.len() - 1;
        if weights.len() > weighted_layers {
            return Err(MlpError::StructuralPrecondition(format!(
                "weight tensor covers {} layers but the network has {} non-input layers",
                weights.len(),
                weighted_layers
            )));
        }
        for (offset, layer_weights) in weights.iter().enumerate() {
            let layer = &self.layers[offset + 1];
            if layer_weights.len() > layer.len() {
                return Err(MlpError::StructuralPrecondition(format!(
                    "weight tensor lists {} neurons for layer {} which has {}",
                    layer_weights.len(),
                    offset + 1,
                    layer.len()
                )));
            }
            for (neuron, neuron_weights) in layer.iter().zip(layer_weights.iter()) {
                MlpError::check_len(
                    "neuron weights",
                    neuron.weights().len(),
                    neuron_weights.len(),
                )?;
            }
        }

        for (offset, layer_weights) in weights.into_iter().enumerate() {
            let layer = &mut self.layers[offset + 1];
            for (neuron, neuron_weights) in layer.iter_mut().zip(layer_weights) {
                neuron.replace_weights(neuron_weights)?;
            }
            debug!(layer = offset + 1, "replaced layer weights");
        }
        Ok(())
    }

    /// Copy of every non-input layer's weights, shaped like the tensor
    /// [`Network::set_weights`] accepts.
    pub fn weights_snapshot(&self) -> WeightTensor {
        self.layers.iter()
            .skip(1)
            .map(|layer| layer.iter().map(|neuron| neuron.weights().to_vec()).collect())
            .collect()
    }

    /// Forward pass; stores every layer's activations for backprop and returns
    /// the output layer.
    pub fn forward(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        MlpError::check_len("network input", self.input_size(), input.len())?;
        self.activations[0].copy_from_slice(input);

        for layer in 1..self.layers.len() {
            let (previous, current) = self.activations.split_at_mut(layer);
            let source = &previous[layer - 1];
            for (value, neuron) in current[0].iter_mut().zip(self.layers[layer].iter()) {
                *value = neuron.activate(source);
            }
        }

        Ok(self.activations[self.activations.len() - 1].clone())
    }
}

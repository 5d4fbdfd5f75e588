use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::network::network::{DEFAULT_BIAS, DEFAULT_LEARNING_RATE};

/// Architecture and hyperparameters of a network, without its weights.
///
/// Fields:
/// - `name`          — label used in logs
/// - `layer_sizes`   — neuron count per layer, input layer first
/// - `bias`          — fixed bias input shared by every non-input neuron
/// - `learning_rate` — step size of each backpropagation update
/// - `seed`          — seed for the initial weights; `None` draws from the
///                     thread-local generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub name: String,
    pub layer_sizes: Vec<usize>,
    #[serde(default = "default_bias")]
    pub bias: f64,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_bias() -> f64 {
    DEFAULT_BIAS
}

fn default_learning_rate() -> f64 {
    DEFAULT_LEARNING_RATE
}

impl NetworkSpec {
    pub fn new(name: &str, layer_sizes: Vec<usize>) -> NetworkSpec {
        NetworkSpec {
            name: name.to_string(),
            layer_sizes,
            bias: DEFAULT_BIAS,
            learning_rate: DEFAULT_LEARNING_RATE,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> NetworkSpec {
        self.seed = Some(seed);
        self
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

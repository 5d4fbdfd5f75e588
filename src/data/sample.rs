use serde::{Serialize, Deserialize};

/// One supervised training pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
}

impl Sample {
    pub fn new(input: Vec<f64>, target: Vec<f64>) -> Sample {
        Sample { input, target }
    }
}

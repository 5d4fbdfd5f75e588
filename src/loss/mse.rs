use crate::error::{MlpError, Result};

/// Mean squared error over the output layer of one sample.
pub struct MseLoss;

impl MseLoss {
    /// `Σ (expected - predicted)² / predicted.len()`
    pub fn loss(predicted: &[f64], expected: &[f64]) -> Result<f64> {
        MlpError::check_len("training target", predicted.len(), expected.len())?;
        let n = predicted.len() as f64;
        Ok(predicted.iter().zip(expected.iter())
            .map(|(o, y)| (y - o).powi(2))
            .sum::<f64>() / n)
    }

    /// Mean of per-sample losses, as reported once per epoch.
    pub fn mean(losses: &[f64]) -> Result<f64> {
        if losses.is_empty() {
            return Err(MlpError::StructuralPrecondition(
                "cannot average an empty set of losses".to_string(),
            ));
        }
        Ok(losses.iter().sum::<f64>() / losses.len() as f64)
    }
}

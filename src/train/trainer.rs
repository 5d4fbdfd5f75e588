use crate::{
    data::Sample,
    error::{MlpError, Result},
    loss::MseLoss,
    network::Network,
};

/// One in-order pass of online backpropagation over `samples`.
///
/// Returns the mean of the per-sample MSEs. An empty sample set is rejected
/// since the mean would be undefined.
pub fn train_epoch(network: &mut Network, samples: &[Sample]) -> Result<f64> {
    if samples.is_empty() {
        return Err(MlpError::StructuralPrecondition(
            "an epoch needs at least one sample".to_string(),
        ));
    }

    let losses = samples.iter()
        .map(|sample| network.train_one_sample(&sample.input, &sample.target))
        .collect::<Result<Vec<f64>>>()?;

    MseLoss::mean(&losses)
}

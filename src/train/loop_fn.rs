use std::time::Instant;

use tracing::info;

use crate::data::Sample;
use crate::error::Result;
use crate::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::train_epoch;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` for `config.epochs` epochs and returns the statistics of
/// every completed epoch.
///
/// # Arguments
/// - `network` — mutable reference to the network; modified in place
/// - `samples` — training pairs, visited in order every epoch
/// - `config`  — epoch count, log interval, optional progress channel
///
/// # Early termination
/// The loop stops after the current epoch if the `progress_tx` receiver has
/// been dropped.
///
/// # Errors
/// Fails on the first sample whose shape does not fit the network; samples
/// earlier in that epoch have already been trained on.
pub fn train_loop(
    network: &mut Network,
    samples: &[Sample],
    config: &TrainConfig,
) -> Result<Vec<EpochStats>> {
    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 0..config.epochs {
        let t_start = Instant::now();
        let mse = train_epoch(network, samples)?;
        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        if config.should_log(epoch) {
            info!("Epoch {}/{}: mse = {:.6}", epoch, config.epochs, mse);
        }

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            mse,
            elapsed_ms,
        };
        history.push(stats.clone());

        if let Some(ref tx) = config.progress_tx {
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                break;
            }
        }
    }

    Ok(history)
}

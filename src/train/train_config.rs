use std::sync::mpsc;
use crate::train::epoch_stats::EpochStats;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`       — number of full in-order passes over the samples
/// - `log_interval` — an `info!` line is logged every this many epochs
///                    (and on the first and last epoch); `0` disables it
/// - `progress_tx`  — optional channel sender; one `EpochStats` is sent per
///                    completed epoch.  If the receiver is dropped the loop
///                    terminates early.
pub struct TrainConfig {
    pub epochs: usize,
    pub log_interval: usize,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
}

impl TrainConfig {
    /// Creates a `TrainConfig` with no progress channel.
    pub fn new(epochs: usize, log_interval: usize) -> Self {
        TrainConfig {
            epochs,
            log_interval,
            progress_tx: None,
        }
    }

    pub fn with_progress(mut self, tx: mpsc::Sender<EpochStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub(crate) fn should_log(&self, epoch: usize) -> bool {
        self.log_interval > 0
            && (epoch % self.log_interval == 0 || epoch + 1 == self.epochs)
    }
}

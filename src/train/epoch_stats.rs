use serde::{Serialize, Deserialize};

/// Per-epoch training statistics emitted by `train_loop`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the loop
/// sends one `EpochStats` value at the end of every completed epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 0-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Mean of the per-sample MSEs over this epoch.
    pub mse: f64,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}

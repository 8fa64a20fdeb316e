use serde::{Serialize, Deserialize};

/// Statistics for one completed training pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 0-based epoch index.
    pub epoch: usize,
    /// Last epoch index of the run.
    pub total_epochs: usize,
    /// Mean of the per-record mean absolute errors returned by backpropagation.
    pub mean_error: f64,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}

use serde::{Deserialize, Serialize};

/// Statistics of one completed training epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Mean of the squared output error over the epoch, measured on each
    /// instance's forward pass before its update.
    pub mean_squared_error: f64,
    /// Wall-clock duration of the epoch in milliseconds.
    pub elapsed_ms: u64,
}

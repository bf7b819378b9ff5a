use serde::{Deserialize, Serialize};

use crate::init::DEFAULT_INIT_RANGE;

/// When training throws away the current weights and draws fresh ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReinitPolicy {
    /// At the start of every epoch. Each epoch therefore starts from scratch
    /// and only the last one shapes the final weights.
    #[default]
    EveryEpoch,
    /// Once, before the first epoch.
    Once,
    /// Never; training starts from the weights given at construction.
    Never,
}

/// Which error term feeds the output deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSignal {
    /// `target[0] - output[0]` for every output node.
    #[default]
    FirstOutput,
    /// `target[j] - output[j]` for output node `j`.
    PerOutput,
}

/// Hyperparameters for `Network::train`.
///
/// # Fields
/// - `epochs`        — number of full passes over the training set
/// - `learning_rate` — step size of every weight update
/// - `reinit`        — when weights are re-randomized
/// - `error_signal`  — how the output error is formed
/// - `init_range`    — upper bound of re-randomized weights, `[0, init_range)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f64,
    #[serde(default)]
    pub reinit: ReinitPolicy,
    #[serde(default)]
    pub error_signal: ErrorSignal,
    #[serde(default = "default_init_range")]
    pub init_range: f64,
}

fn default_init_range() -> f64 {
    DEFAULT_INIT_RANGE
}

impl TrainConfig {
    /// Config with the default re-randomization and error signal.
    pub fn new(epochs: usize, learning_rate: f64) -> Self {
        TrainConfig {
            epochs,
            learning_rate,
            reinit: ReinitPolicy::default(),
            error_signal: ErrorSignal::default(),
            init_range: DEFAULT_INIT_RANGE,
        }
    }

    pub fn with_reinit(mut self, reinit: ReinitPolicy) -> Self {
        self.reinit = reinit;
        self
    }

    pub fn with_error_signal(mut self, error_signal: ErrorSignal) -> Self {
        self.error_signal = error_signal;
        self
    }

    /// Whether weights are redrawn before epoch `epoch` (0-based).
    pub(crate) fn reinit_before(&self, epoch: usize) -> bool {
        match self.reinit {
            ReinitPolicy::EveryEpoch => true,
            ReinitPolicy::Once => epoch == 0,
            ReinitPolicy::Never => false,
        }
    }
}

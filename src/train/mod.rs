pub mod trainer;
pub mod epoch_stats;
pub mod train_config;
pub mod loop_fn;

pub use trainer::{compute_deltas, fit_instance, Deltas};
pub use epoch_stats::EpochStats;
pub use train_config::{ErrorSignal, ReinitPolicy, TrainConfig};
pub use loop_fn::train_loop;

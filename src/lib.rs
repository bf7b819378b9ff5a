pub mod error;
pub mod math;
pub mod activation;
pub mod node;
pub mod data;
pub mod init;
pub mod network;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use error::{Error, Result};
pub use math::matrix::Matrix;
pub use node::{Connection, Node, NodeId, NodeKind};
pub use data::instance::Instance;
pub use init::{ConstantWeights, UniformWeights, WeightSource};
pub use network::network::Network;
pub use network::spec::NetworkSpec;
pub use optim::sgd::Sgd;
pub use train::{EpochStats, ErrorSignal, ReinitPolicy, TrainConfig};

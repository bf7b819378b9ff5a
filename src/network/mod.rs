pub mod graph;
pub mod network;
pub mod spec;

pub use graph::Graph;
pub use network::Network;
pub use spec::NetworkSpec;

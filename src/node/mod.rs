pub mod connection;
pub mod node;

pub use connection::Connection;
pub use node::{Node, NodeId, NodeKind};

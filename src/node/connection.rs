use crate::node::node::NodeId;

/// A weighted edge into a Hidden or Output node.
///
/// The source is addressed by its index in the owning network's node arena,
/// so a connection never owns the node it reads from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub source: NodeId,
    pub weight: f64,
}

impl Connection {
    pub fn new(source: NodeId, weight: f64) -> Connection {
        Connection { source, weight }
    }
}

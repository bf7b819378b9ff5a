use std::fmt;

use crate::activation::identity;
use crate::error::{Error, Result};
use crate::node::connection::Connection;

/// Index of a node inside a network's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Input,
    /// Trailing unit of the input layer, constant 1.
    BiasToHidden,
    Hidden,
    /// Trailing unit of the hidden layer, constant 1.
    BiasToOutput,
    Output,
}

impl NodeKind {
    pub fn is_bias(self) -> bool {
        matches!(self, NodeKind::BiasToHidden | NodeKind::BiasToOutput)
    }

    /// Whether nodes of this kind compute their value from incoming connections.
    pub fn is_computed(self) -> bool {
        matches!(self, NodeKind::Hidden | NodeKind::Output)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            NodeKind::Input => "input",
            NodeKind::BiasToHidden => "input-side bias",
            NodeKind::Hidden => "hidden",
            NodeKind::BiasToOutput => "hidden-side bias",
            NodeKind::Output => "output",
        };
        f.write_str(name)
    }
}

/// One unit of the network.
///
/// Input and bias nodes carry no connections; Hidden and Output nodes always
/// do. Bias nodes start at 1.0 and nothing ever writes to them again.
#[derive(Debug, Clone)]
pub struct Node {
    kind: NodeKind,
    activation: f64,
    pre_activation_sum: f64,
    incoming: Vec<Connection>,
}

impl Node {
    pub fn input() -> Node {
        Node::bare(NodeKind::Input, 0.0)
    }

    /// A bias unit. `kind` must be one of the two bias kinds.
    pub fn bias(kind: NodeKind) -> Result<Node> {
        if !kind.is_bias() {
            return Err(Error::InvalidOperation(format!("{kind} node is not a bias unit")));
        }
        Ok(Node::bare(kind, 1.0))
    }

    /// A Hidden or Output node fed by `incoming`.
    pub fn computed(kind: NodeKind, incoming: Vec<Connection>) -> Result<Node> {
        if !kind.is_computed() {
            return Err(Error::InvalidOperation(format!(
                "{kind} node cannot have incoming connections"
            )));
        }
        if incoming.is_empty() {
            return Err(Error::Construction(format!("{kind} node needs at least one connection")));
        }
        Ok(Node {
            kind,
            activation: 0.0,
            pre_activation_sum: 0.0,
            incoming,
        })
    }

    fn bare(kind: NodeKind, activation: f64) -> Node {
        Node {
            kind,
            activation,
            pre_activation_sum: 0.0,
            incoming: Vec::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn output(&self) -> f64 {
        self.activation
    }

    pub fn pre_activation_sum(&self) -> f64 {
        self.pre_activation_sum
    }

    pub fn incoming(&self) -> &[Connection] {
        &self.incoming
    }

    pub fn incoming_mut(&mut self) -> &mut [Connection] {
        &mut self.incoming
    }

    /// Sets the activation of an Input node directly.
    pub fn set_input(&mut self, value: f64) -> Result<()> {
        if self.kind != NodeKind::Input {
            return Err(Error::InvalidOperation(format!(
                "set_input called on a {} node",
                self.kind
            )));
        }
        self.activation = value;
        Ok(())
    }

    /// Weighted sum of the source activations, read from the node arena.
    pub fn weighted_sum(&self, arena: &[Node]) -> f64 {
        self.incoming
            .iter()
            .map(|c| c.weight * arena[c.source.0].activation)
            .sum()
    }

    /// Stores `sum` and applies the activation. No-op for Input and bias nodes.
    pub fn compute_output(&mut self, sum: f64) {
        if self.kind.is_computed() {
            self.pre_activation_sum = sum;
            self.activation = identity(sum);
        }
    }
}

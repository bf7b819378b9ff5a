use crate::error::{Error, Result};
use crate::init::WeightSource;
use crate::math::Matrix;
use crate::node::{Connection, Node, NodeId, NodeKind};
use crate::optim::Sgd;

/// Node arena plus the three ordered layers that index into it.
///
/// Nodes are pushed input layer first, then hidden, then output, so every
/// connection's source sits at a lower arena index than its consumer.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<Node>,
    /// Feature nodes followed by one `BiasToHidden` node.
    input_layer: Vec<NodeId>,
    /// Hidden nodes followed by one `BiasToOutput` node.
    hidden_layer: Vec<NodeId>,
    output_layer: Vec<NodeId>,
}

impl Graph {
    /// Builds and wires the full topology.
    ///
    /// `hidden_weights` must be `hidden_count x (input_count + 1)` and
    /// `output_weights` must be `output_count x (hidden_count + 1)`; the last
    /// column of each feeds from the bias unit.
    pub fn build(
        input_count: usize,
        hidden_count: usize,
        output_count: usize,
        hidden_weights: &Matrix,
        output_weights: &Matrix,
    ) -> Result<Graph> {
        if hidden_count == 0 {
            return Err(Error::Construction("hidden layer needs at least one node".into()));
        }
        if output_count == 0 {
            return Err(Error::Construction("instances have no targets to size the output layer".into()));
        }
        check_shape("hidden", hidden_weights, (hidden_count, input_count + 1))?;
        check_shape("output", output_weights, (output_count, hidden_count + 1))?;

        let mut nodes = Vec::with_capacity(input_count + hidden_count + output_count + 2);
        let mut push = |node: Node| {
            nodes.push(node);
            NodeId(nodes.len() - 1)
        };

        let mut input_layer: Vec<NodeId> = (0..input_count).map(|_| push(Node::input())).collect();
        input_layer.push(push(Node::bias(NodeKind::BiasToHidden)?));

        let mut hidden_layer = Vec::with_capacity(hidden_count + 1);
        for row in 0..hidden_count {
            let incoming = wire(&input_layer, hidden_weights.row(row));
            hidden_layer.push(push(Node::computed(NodeKind::Hidden, incoming)?));
        }
        hidden_layer.push(push(Node::bias(NodeKind::BiasToOutput)?));

        let mut output_layer = Vec::with_capacity(output_count);
        for row in 0..output_count {
            let incoming = wire(&hidden_layer, output_weights.row(row));
            output_layer.push(push(Node::computed(NodeKind::Output, incoming)?));
        }

        Ok(Graph {
            nodes,
            input_layer,
            hidden_layer,
            output_layer,
        })
    }

    /// # Panics
    /// Panics if `id` does not belong to this graph; see [`Graph::get`].
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn input_layer(&self) -> &[NodeId] {
        &self.input_layer
    }

    pub fn hidden_layer(&self) -> &[NodeId] {
        &self.hidden_layer
    }

    pub fn output_layer(&self) -> &[NodeId] {
        &self.output_layer
    }

    /// Number of feature inputs, bias excluded.
    pub fn feature_count(&self) -> usize {
        self.input_layer.len() - 1
    }

    pub fn output_count(&self) -> usize {
        self.output_layer.len()
    }

    /// Copies `features` into the non-bias input nodes.
    pub fn load_features(&mut self, features: &[f64]) -> Result<()> {
        let expected = self.feature_count();
        if features.len() != expected {
            return Err(Error::InputDimension {
                what: "feature",
                expected,
                found: features.len(),
            });
        }
        for (&id, &value) in self.input_layer.iter().zip(features) {
            self.nodes[id.0].set_input(value)?;
        }
        Ok(())
    }

    /// Recomputes one node from its current sources.
    pub fn compute_output(&mut self, id: NodeId) {
        let sum = self.nodes[id.0].weighted_sum(&self.nodes);
        self.nodes[id.0].compute_output(sum);
    }

    /// Loads `features` and propagates them through the hidden and output layers.
    pub fn forward(&mut self, features: &[f64]) -> Result<()> {
        self.load_features(features)?;

        let hidden_count = self.hidden_layer.len() - 1;
        for i in 0..hidden_count {
            let id = self.hidden_layer[i];
            self.compute_output(id);
        }
        for i in 0..self.output_layer.len() {
            let id = self.output_layer[i];
            self.compute_output(id);
        }
        Ok(())
    }

    /// Current activations of the output layer.
    pub fn outputs(&self) -> Vec<f64> {
        self.output_layer.iter().map(|&id| self.nodes[id.0].output()).collect()
    }

    /// Overwrites every hidden and output connection weight from `source`,
    /// hidden layer first, each node's connections in order.
    pub fn randomize<S: WeightSource + ?Sized>(&mut self, source: &mut S, range: f64) {
        let consumers = self.hidden_layer.iter().chain(self.output_layer.iter());
        for &id in consumers {
            for connection in self.nodes[id.0].incoming_mut() {
                connection.weight = source.next_weight(range);
            }
        }
    }

    /// Applies one SGD step to every incoming connection of `id`, all scaled
    /// by the same `delta`. No-op for nodes without connections.
    pub fn update_incoming(&mut self, id: NodeId, sgd: &Sgd, delta: f64) {
        // Sources always precede their consumer in the arena.
        let (sources, rest) = self.nodes.split_at_mut(id.0);
        for connection in rest[0].incoming_mut() {
            let activation = sources[connection.source.0].output();
            sgd.step(connection, activation, delta);
        }
    }

    /// Hidden-layer weights as a `hidden_count x (input_count + 1)` matrix.
    pub fn hidden_weights(&self) -> Matrix {
        let hidden_count = self.hidden_layer.len() - 1;
        self.weights_of(&self.hidden_layer[..hidden_count], self.input_layer.len())
    }

    /// Output-layer weights as an `output_count x (hidden_count + 1)` matrix.
    pub fn output_weights(&self) -> Matrix {
        self.weights_of(&self.output_layer, self.hidden_layer.len())
    }

    fn weights_of(&self, consumers: &[NodeId], cols: usize) -> Matrix {
        Matrix {
            rows: consumers.len(),
            cols,
            data: consumers
                .iter()
                .map(|&id| self.nodes[id.0].incoming().iter().map(|c| c.weight).collect())
                .collect(),
        }
    }
}

fn wire(sources: &[NodeId], weights: &[f64]) -> Vec<Connection> {
    sources
        .iter()
        .zip(weights)
        .map(|(&source, &weight)| Connection::new(source, weight))
        .collect()
}

fn check_shape(layer: &str, weights: &Matrix, expected: (usize, usize)) -> Result<()> {
    let found = weights.shape();
    let rows_ok = weights.data.len() == expected.0 && weights.data.iter().all(|row| row.len() == expected.1);
    if found == expected && rows_ok {
        return Ok(());
    }
    Err(Error::Construction(format!(
        "{layer} weights must be {}x{}, got {}x{}",
        expected.0, expected.1, found.0, found.1
    )))
}

#[cfg(test)]
mod test_graph {
    use super::*;
    use crate::init::ConstantWeights;

    fn small() -> Graph {
        // 2 features, 2 hidden, 1 output
        let hidden = Matrix::from_data(vec![vec![1.0, 0.5, 0.0], vec![-1.0, 0.0, 0.25]]).unwrap();
        let output = Matrix::from_data(vec![vec![2.0, 1.0, -0.5]]).unwrap();
        Graph::build(2, 2, 1, &hidden, &output).unwrap()
    }

    #[test]
    fn layers_end_with_bias_units() {
        let g = small();
        assert_eq!(g.input_layer().len(), 3);
        assert_eq!(g.hidden_layer().len(), 3);
        assert_eq!(g.output_layer().len(), 1);
        assert_eq!(g.node(*g.input_layer().last().unwrap()).kind(), NodeKind::BiasToHidden);
        assert_eq!(g.node(*g.hidden_layer().last().unwrap()).kind(), NodeKind::BiasToOutput);
    }

    #[test]
    fn connection_counts_match_previous_layer() {
        let g = small();
        for &id in &g.hidden_layer()[..2] {
            assert_eq!(g.node(id).incoming().len(), g.input_layer().len());
        }
        for &id in g.output_layer() {
            assert_eq!(g.node(id).incoming().len(), g.hidden_layer().len());
        }
        for &id in g.input_layer() {
            assert!(g.node(id).incoming().is_empty());
        }
    }

    #[test]
    fn forward_uses_identity_activation() {
        let mut g = small();
        g.forward(&[2.0, 4.0]).unwrap();
        // h0 = 2 + 2 + 0 = 4, h1 = -2 + 0 + 0.25 = -1.75
        let h = g.hidden_layer().to_vec();
        assert_eq!(g.node(h[0]).output(), 4.0);
        assert_eq!(g.node(h[1]).output(), -1.75);
        assert_eq!(g.node(h[2]).output(), 1.0);
        // o = 2*4 + 1*(-1.75) - 0.5*1 = 5.75
        assert_eq!(g.outputs(), vec![5.75]);
    }

    #[test]
    fn bias_nodes_survive_compute_output() {
        let mut g = small();
        let biases = [*g.input_layer().last().unwrap(), *g.hidden_layer().last().unwrap()];
        for id in biases {
            g.compute_output(id);
            assert_eq!(g.node(id).output(), 1.0);
        }
        g.forward(&[-3.0, 8.0]).unwrap();
        for id in biases {
            assert_eq!(g.node(id).output(), 1.0);
        }
    }

    #[test]
    fn rejects_wrong_shapes() {
        let ok_hidden = Matrix::zeros(2, 3);
        let ok_output = Matrix::zeros(1, 3);
        assert!(Graph::build(2, 2, 1, &ok_hidden, &ok_output).is_ok());

        let bad = [
            Graph::build(2, 2, 1, &Matrix::zeros(2, 2), &ok_output),
            Graph::build(2, 2, 1, &Matrix::zeros(3, 3), &ok_output),
            Graph::build(2, 2, 1, &ok_hidden, &Matrix::zeros(1, 2)),
            Graph::build(2, 2, 1, &ok_hidden, &Matrix::zeros(2, 3)),
            Graph::build(2, 0, 1, &Matrix::zeros(0, 3), &Matrix::zeros(1, 1)),
            Graph::build(2, 2, 0, &ok_hidden, &Matrix::zeros(0, 3)),
        ];
        for result in bad {
            assert!(matches!(result, Err(Error::Construction(_))));
        }
    }

    #[test]
    fn get_rejects_foreign_ids() {
        let g = small();
        let last = *g.output_layer().last().unwrap();
        assert_eq!(g.get(last).map(Node::kind), Some(NodeKind::Output));
        assert!(g.get(NodeId(last.0 + 1)).is_none());
    }

    #[test]
    #[should_panic]
    fn node_panics_on_foreign_id() {
        let g = small();
        g.node(NodeId(1000));
    }

    #[test]
    fn load_features_checks_length() {
        let mut g = small();
        assert!(matches!(
            g.load_features(&[1.0]),
            Err(Error::InputDimension { expected: 2, found: 1, .. })
        ));
    }

    #[test]
    fn randomize_touches_every_connection() {
        let mut g = small();
        g.randomize(&mut ConstantWeights(0.07), 0.1);
        assert!(g.hidden_weights().data.iter().flatten().all(|&w| w == 0.07));
        assert!(g.output_weights().data.iter().flatten().all(|&w| w == 0.07));
    }

    #[test]
    fn weights_round_trip_through_matrices() {
        let g = small();
        assert_eq!(g.hidden_weights().data, vec![vec![1.0, 0.5, 0.0], vec![-1.0, 0.0, 0.25]]);
        assert_eq!(g.output_weights().data, vec![vec![2.0, 1.0, -0.5]]);
    }
}

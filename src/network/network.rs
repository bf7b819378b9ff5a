use log::debug;

use crate::data::{argmax, Instance};
use crate::error::{Error, Result};
use crate::init::{UniformWeights, WeightSource};
use crate::math::Matrix;
use crate::network::graph::Graph;
use crate::node::{Node, NodeId};
use crate::train::epoch_stats::EpochStats;
use crate::train::loop_fn::train_loop;
use crate::train::train_config::TrainConfig;

/// A fully connected network with one hidden layer and bias units on the
/// input and hidden layers.
///
/// The network owns its training set; `train` always runs over it.
#[derive(Debug, Clone)]
pub struct Network {
    graph: Graph,
    training_set: Vec<Instance>,
    config: TrainConfig,
}

impl Network {
    /// Builds a network sized from the first training instance.
    ///
    /// `hidden_weights` is `hidden_count x (features + 1)` and
    /// `output_weights` is `targets x (hidden_count + 1)`; the last column of
    /// each belongs to the bias unit.
    pub fn new(
        training_set: Vec<Instance>,
        hidden_count: usize,
        learning_rate: f64,
        epochs: usize,
        hidden_weights: &Matrix,
        output_weights: &Matrix,
    ) -> Result<Network> {
        Network::with_config(
            training_set,
            hidden_count,
            hidden_weights,
            output_weights,
            TrainConfig::new(epochs, learning_rate),
        )
    }

    /// Same as [`Network::new`] with full control over training behaviour.
    pub fn with_config(
        training_set: Vec<Instance>,
        hidden_count: usize,
        hidden_weights: &Matrix,
        output_weights: &Matrix,
        config: TrainConfig,
    ) -> Result<Network> {
        let (input_count, output_count) = infer_dimensions(&training_set)?;
        if !(config.learning_rate.is_finite() && config.learning_rate > 0.0) {
            return Err(Error::Construction(format!(
                "learning rate must be a positive number, got {}",
                config.learning_rate
            )));
        }

        let graph = Graph::build(input_count, hidden_count, output_count, hidden_weights, output_weights)?;
        debug!(
            "built network {}-{}-{} (+bias), {} training instances",
            input_count,
            hidden_count,
            output_count,
            training_set.len()
        );

        Ok(Network {
            graph,
            training_set,
            config,
        })
    }

    /// Runs a forward pass and returns the index of the strongest output.
    /// Equal maxima resolve to the lowest index.
    pub fn predict(&mut self, instance: &Instance) -> Result<usize> {
        self.graph.forward(&instance.features)?;
        // Output layer is never empty once built.
        Ok(argmax(&self.graph.outputs()).unwrap_or(0))
    }

    /// Trains over the owned training set, drawing fresh weights from the
    /// thread-local RNG.
    pub fn train(&mut self) -> Result<Vec<EpochStats>> {
        self.train_with(&mut UniformWeights::thread_local())
    }

    /// Trains over the owned training set, drawing fresh weights from `source`.
    pub fn train_with<S: WeightSource + ?Sized>(&mut self, source: &mut S) -> Result<Vec<EpochStats>> {
        train_loop(&mut self.graph, &self.training_set, &self.config, source)
    }

    /// Fraction of `instances` whose prediction matches their target class.
    pub fn accuracy(&mut self, instances: &[Instance]) -> Result<f64> {
        accuracy_of(&mut self.graph, instances)
    }

    /// [`Network::accuracy`] over the owned training set.
    pub fn training_accuracy(&mut self) -> Result<f64> {
        accuracy_of(&mut self.graph, &self.training_set)
    }

    /// Output activations left by the last forward pass.
    pub fn outputs(&self) -> Vec<f64> {
        self.graph.outputs()
    }

    /// # Panics
    /// Panics if `id` was not handed out by this network; use
    /// [`Network::get_node`] for ids of unknown origin.
    pub fn node(&self, id: NodeId) -> &Node {
        self.graph.node(id)
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.graph.get(id)
    }

    /// Feature nodes, then the input-side bias.
    pub fn input_layer(&self) -> &[NodeId] {
        self.graph.input_layer()
    }

    /// Hidden nodes, then the hidden-side bias.
    pub fn hidden_layer(&self) -> &[NodeId] {
        self.graph.hidden_layer()
    }

    pub fn output_layer(&self) -> &[NodeId] {
        self.graph.output_layer()
    }

    pub fn hidden_weights(&self) -> Matrix {
        self.graph.hidden_weights()
    }

    pub fn output_weights(&self) -> Matrix {
        self.graph.output_weights()
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    pub fn training_set(&self) -> &[Instance] {
        &self.training_set
    }
}

fn accuracy_of(graph: &mut Graph, instances: &[Instance]) -> Result<f64> {
    if instances.is_empty() {
        return Ok(0.0);
    }
    let mut correct = 0;
    for instance in instances {
        instance.check_targets(graph.output_count())?;
        graph.forward(&instance.features)?;
        if argmax(&graph.outputs()) == instance.target_class() {
            correct += 1;
        }
    }
    Ok(correct as f64 / instances.len() as f64)
}

/// `(features, targets)` of the first instance.
pub(crate) fn infer_dimensions(instances: &[Instance]) -> Result<(usize, usize)> {
    instances
        .first()
        .map(|first| (first.features.len(), first.targets.len()))
        .ok_or_else(|| Error::Construction("training set is empty".into()))
}

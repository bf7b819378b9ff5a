use crate::activation::step_gradient;
use crate::data::Instance;
use crate::error::Result;
use crate::network::graph::Graph;
use crate::optim::Sgd;
use crate::train::train_config::ErrorSignal;

/// Output and hidden deltas of a single forward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Deltas {
    /// One per output node.
    pub output: Vec<f64>,
    /// One per hidden-layer node, bias included.
    pub hidden: Vec<f64>,
}

/// Runs one stochastic update of `graph` on `instance` and returns the mean
/// squared output error seen before the update.
///
/// The instance is validated before anything is touched, so a bad instance
/// leaves the weights exactly as they were.
pub fn fit_instance(
    graph: &mut Graph,
    instance: &Instance,
    sgd: &Sgd,
    signal: ErrorSignal,
) -> Result<f64> {
    instance.check_features(graph.feature_count())?;
    instance.check_targets(graph.output_count())?;

    // Forward pass
    graph.forward(&instance.features)?;

    let errors = output_errors(graph, instance, signal);
    let squared_error = errors.iter().map(|e| e * e).sum::<f64>() / errors.len() as f64;

    // Every delta is read off the pre-update weights.
    let deltas = compute_deltas(graph, &errors);

    let hidden_count = graph.hidden_layer().len() - 1;
    for i in 0..hidden_count {
        let id = graph.hidden_layer()[i];
        graph.update_incoming(id, sgd, deltas.hidden[i]);
    }
    for j in 0..graph.output_count() {
        let id = graph.output_layer()[j];
        graph.update_incoming(id, sgd, deltas.output[j]);
    }

    Ok(squared_error)
}

/// Error term per output node under `signal`.
fn output_errors(graph: &Graph, instance: &Instance, signal: ErrorSignal) -> Vec<f64> {
    let outputs = graph.outputs();
    match signal {
        ErrorSignal::FirstOutput => {
            let error = instance.targets[0] - outputs[0];
            vec![error; outputs.len()]
        }
        ErrorSignal::PerOutput => instance
            .targets
            .iter()
            .zip(&outputs)
            .map(|(target, output)| target - output)
            .collect(),
    }
}

/// Backpropagates `errors` through the step-gradient surrogate.
///
/// `delta_j = step'(sum_j) * error_j` for each output node, then
/// `delta_i = step'(sum_i) * Σ_j w_ji * delta_j` for each hidden-layer node.
pub fn compute_deltas(graph: &Graph, errors: &[f64]) -> Deltas {
    let output: Vec<f64> = graph
        .output_layer()
        .iter()
        .zip(errors)
        .map(|(&id, &error)| step_gradient(graph.node(id).pre_activation_sum()) * error)
        .collect();

    let hidden = graph
        .hidden_layer()
        .iter()
        .enumerate()
        .map(|(i, &id)| {
            let downstream: f64 = graph
                .output_layer()
                .iter()
                .zip(&output)
                .map(|(&out, &delta)| graph.node(out).incoming()[i].weight * delta)
                .sum();
            step_gradient(graph.node(id).pre_activation_sum()) * downstream
        })
        .collect();

    Deltas { output, hidden }
}

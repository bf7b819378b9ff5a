use std::time::Instant;

use log::{info, trace};

use crate::data::Instance;
use crate::error::Result;
use crate::init::WeightSource;
use crate::network::graph::Graph;
use crate::optim::Sgd;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::fit_instance;

/// Trains `graph` for `config.epochs` epochs over `instances`, in order, one
/// stochastic update per instance. Returns the stats of every epoch.
///
/// Weights are redrawn from `source` according to `config.reinit` before an
/// epoch starts. There is no early stopping.
///
/// # Errors
/// The first instance whose features or targets do not fit the graph aborts
/// the run with `Error::InputDimension`; updates already applied stay.
pub fn train_loop<S: WeightSource + ?Sized>(
    graph: &mut Graph,
    instances: &[Instance],
    config: &TrainConfig,
    source: &mut S,
) -> Result<Vec<EpochStats>> {
    let optimizer = Sgd::new(config.learning_rate);
    let mut history = Vec::new();

    for epoch in 0..config.epochs {
        let t_start = Instant::now();

        if config.reinit_before(epoch) {
            graph.randomize(&mut *source, config.init_range);
        }

        let mut total_error = 0.0;
        for (n, instance) in instances.iter().enumerate() {
            let error = fit_instance(graph, instance, &optimizer, config.error_signal)?;
            trace!("epoch {} instance {}: squared error {:.6}", epoch + 1, n, error);
            total_error += error;
        }

        let mean_squared_error = if instances.is_empty() {
            0.0
        } else {
            total_error / instances.len() as f64
        };

        let stats = EpochStats {
            epoch: epoch + 1,
            total_epochs: config.epochs,
            mean_squared_error,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        info!(
            "Epoch {}/{}: mse = {:.6} ({} ms)",
            stats.epoch, stats.total_epochs, stats.mean_squared_error, stats.elapsed_ms
        );
        history.push(stats);
    }

    Ok(history)
}

#[cfg(test)]
mod test_loop_fn {
    use super::*;
    use crate::error::Error;
    use crate::init::{ConstantWeights, UniformWeights};
    use crate::math::Matrix;
    use crate::train::train_config::ReinitPolicy;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn graph(hidden_count: usize) -> Graph {
        Graph::build(
            2,
            hidden_count,
            1,
            &Matrix::zeros(hidden_count, 3),
            &Matrix::zeros(1, hidden_count + 1),
        )
        .unwrap()
    }

    fn data() -> Vec<Instance> {
        vec![
            Instance::new(vec![1.0, 0.0], vec![1.0]),
            Instance::new(vec![0.0, 1.0], vec![0.0]),
        ]
    }

    #[test]
    fn zero_epochs_is_a_noop() {
        let mut g = graph(2);
        let before = g.hidden_weights();
        let stats = train_loop(&mut g, &data(), &TrainConfig::new(0, 0.1), &mut ConstantWeights(0.05)).unwrap();
        assert!(stats.is_empty());
        assert_eq!(g.hidden_weights(), before);
    }

    #[test]
    fn reports_every_epoch() {
        let mut g = graph(2);
        let mut source = UniformWeights::new(StdRng::seed_from_u64(3));
        let stats = train_loop(&mut g, &data(), &TrainConfig::new(4, 0.1), &mut source).unwrap();
        assert_eq!(stats.len(), 4);
        assert_eq!(stats.iter().map(|s| s.epoch).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert!(stats.iter().all(|s| s.total_epochs == 4 && s.mean_squared_error >= 0.0));
    }

    #[test]
    fn every_epoch_policy_forgets_earlier_epochs() {
        let cfg = TrainConfig::new(1, 0.1);
        let mut one = graph(2);
        train_loop(&mut one, &data(), &cfg, &mut ConstantWeights(0.05)).unwrap();

        let mut three = graph(2);
        let cfg3 = TrainConfig::new(3, 0.1);
        train_loop(&mut three, &data(), &cfg3, &mut ConstantWeights(0.05)).unwrap();

        assert_eq!(one.hidden_weights(), three.hidden_weights());
        assert_eq!(one.output_weights(), three.output_weights());
    }

    #[test]
    fn once_policy_keeps_progress() {
        let cfg = TrainConfig::new(3, 0.1).with_reinit(ReinitPolicy::Once);
        let mut once = graph(2);
        train_loop(&mut once, &data(), &cfg, &mut ConstantWeights(0.05)).unwrap();

        let mut single = graph(2);
        train_loop(&mut single, &data(), &TrainConfig::new(1, 0.1), &mut ConstantWeights(0.05)).unwrap();

        assert_ne!(once.output_weights(), single.output_weights());
    }

    #[test]
    fn never_policy_starts_from_given_weights() {
        let cfg = TrainConfig::new(1, 0.1).with_reinit(ReinitPolicy::Never);
        let mut g = graph(1);
        train_loop(&mut g, &data(), &cfg, &mut ConstantWeights(0.05)).unwrap();
        // All-zero weights: sums are 0, step'(0) = 1, outputs 0.
        // Instance 1: delta_o = 1; output bias moves to 0.1, hidden deltas use
        // the zero output weight so hidden weights stay 0.
        // Instance 2: o = 0.1, delta_o = -0.1; output bias -> 0.1 - 0.01.
        let out = g.output_weights();
        assert_eq!(out.data[0][0], 0.0);
        assert!((out.data[0][1] - 0.09).abs() < 1e-12);
        assert!(g.hidden_weights().data.iter().flatten().all(|&w| w == 0.0));
    }

    #[test]
    fn bad_instance_aborts_after_earlier_updates() {
        let mut g = graph(1);
        let mut instances = data();
        instances.push(Instance::new(vec![1.0], vec![1.0]));
        let cfg = TrainConfig::new(2, 0.1).with_reinit(ReinitPolicy::Never);

        let err = train_loop(&mut g, &instances, &cfg, &mut ConstantWeights(0.05)).unwrap_err();
        assert!(matches!(err, Error::InputDimension { what: "feature", expected: 2, found: 1 }));
        // The first two instances of epoch one were applied.
        assert!((g.output_weights().data[0][1] - 0.09).abs() < 1e-12);
    }

    #[test]
    fn huge_epoch_count_still_fails_on_first_bad_instance() {
        let hidden = Matrix::zeros(1, 2);
        let output = Matrix::zeros(1, 2);
        let mut g = Graph::build(1, 1, 1, &hidden, &output).unwrap();
        let instances = vec![
            Instance::new(vec![1.0], vec![1.0]),
            Instance::new(vec![1.0, 2.0], vec![1.0]),
        ];
        let cfg = TrainConfig::new(usize::MAX, 0.1).with_reinit(ReinitPolicy::Never);

        let err = train_loop(&mut g, &instances, &cfg, &mut ConstantWeights(0.05)).unwrap_err();
        assert!(matches!(err, Error::InputDimension { what: "feature", expected: 1, found: 2 }));
    }
}

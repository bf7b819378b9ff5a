// Small runner around the library: reads a JSON run file, trains the
// network it describes and reports predictions on the test instances.
//
//   RUST_LOG=info cargo run -- run.json
//
// Run file layout:
//   {
//     "network": { "hidden_count": 3, "train": { "epochs": 100, "learning_rate": 0.1 } },
//     "seed": 7,
//     "train": [ { "features": [..], "targets": [..] }, .. ],
//     "test":  [ .. ]
//   }
use std::process::ExitCode;

use log::error;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use nodenet::{Instance, NetworkSpec, Result, UniformWeights};

#[derive(Debug, Deserialize)]
struct RunConfig {
    network: NetworkSpec,
    /// Seeds both the initial weights and every re-randomization.
    #[serde(default)]
    seed: Option<u64>,
    train: Vec<Instance>,
    #[serde(default)]
    test: Vec<Instance>,
}

impl RunConfig {
    fn load_json(path: &str) -> Result<RunConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

fn run(path: &str) -> Result<()> {
    let config = RunConfig::load_json(path)?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut network = config.network.build(config.train, &mut rng)?;
    let history = network.train_with(&mut UniformWeights::new(rng))?;
    if let Some(last) = history.last() {
        println!("trained {} epochs, final mse = {:.6}", last.epoch, last.mean_squared_error);
    }

    let train_accuracy = network.training_accuracy()?;
    println!("train accuracy: {:.2}%", train_accuracy * 100.0);

    if config.test.is_empty() {
        return Ok(());
    }
    for (i, instance) in config.test.iter().enumerate() {
        let predicted = network.predict(instance)?;
        println!("test[{i}]: predicted {predicted}, expected {:?}", instance.target_class());
    }
    println!("test accuracy: {:.2}%", network.accuracy(&config.test)? * 100.0);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: nodenet <run.json>");
        return ExitCode::from(2);
    };

    match run(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::data::Instance;
use crate::error::Result;
use crate::math::Matrix;
use crate::network::network::{infer_dimensions, Network};
use crate::train::train_config::TrainConfig;

/// A serializable description of a network: hidden size, optional initial
/// weights and the training hyperparameters.
///
/// Input and output sizes are not stored; they come from the training set
/// it is built against. Learned weights are never written back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub hidden_count: usize,
    /// `hidden_count x (features + 1)`; drawn uniformly when absent.
    #[serde(default)]
    pub hidden_weights: Option<Matrix>,
    /// `targets x (hidden_count + 1)`; drawn uniformly when absent.
    #[serde(default)]
    pub output_weights: Option<Matrix>,
    pub train: TrainConfig,
}

impl NetworkSpec {
    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Builds a network over `training_set`. Missing weight matrices are
    /// drawn from `rng` in `[0, train.init_range)`.
    pub fn build<R: Rng + ?Sized>(&self, training_set: Vec<Instance>, rng: &mut R) -> Result<Network> {
        let (input_count, output_count) = infer_dimensions(&training_set)?;
        let range = self.train.init_range;

        let hidden_weights = match &self.hidden_weights {
            Some(m) => m.clone(),
            None => Matrix::uniform(self.hidden_count, input_count + 1, range, rng),
        };
        let output_weights = match &self.output_weights {
            Some(m) => m.clone(),
            None => Matrix::uniform(output_count, self.hidden_count + 1, range, rng),
        };

        Network::with_config(
            training_set,
            self.hidden_count,
            &hidden_weights,
            &output_weights,
            self.train.clone(),
        )
    }
}

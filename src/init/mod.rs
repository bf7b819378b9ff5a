pub mod weight_source;

pub use weight_source::{ConstantWeights, UniformWeights, WeightSource, DEFAULT_INIT_RANGE};

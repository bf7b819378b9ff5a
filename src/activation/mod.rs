pub mod activation;

pub use activation::{identity, step_gradient};

pub mod instance;

pub use instance::{argmax, Instance};

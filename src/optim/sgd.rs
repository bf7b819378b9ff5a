use crate::node::Connection;

pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// One plain gradient step on a single connection:
    /// `w += lr * source_activation * delta`.
    pub fn step(&self, connection: &mut Connection, source_activation: f64, delta: f64) {
        connection.weight += self.learning_rate * source_activation * delta;
    }
}

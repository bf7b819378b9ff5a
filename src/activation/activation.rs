/// The activation applied by Hidden and Output nodes: a pass-through.
///
/// The network never squashes its sums on the way forward; the only
/// nonlinearity lives in [`step_gradient`], which backprop uses in place of
/// a derivative.
pub fn identity(x: f64) -> f64 {
    x
}

/// Surrogate gradient used during backprop: 0 for negative sums, 1 otherwise.
///
/// Note that 0.0 counts as non-negative, so a node whose sum is exactly zero
/// still passes its error through.
pub fn step_gradient(x: f64) -> f64 {
    if x < 0.0 { 0.0 } else { 1.0 }
}

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while building, running or training a network.
///
/// None of these are retried: they describe a caller mistake and are handed
/// straight back to whoever made the call.
#[derive(Error, Debug)]
pub enum Error {
    /// Empty training set, bad hidden size or weight matrices that do not
    /// match the layer sizes inferred from the data.
    #[error("cannot construct network: {0}")]
    Construction(String),

    /// An instance whose features or targets do not fit the network.
    #[error("{what} length mismatch: network expects {expected}, instance has {found}")]
    InputDimension {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// An operation applied to a node kind that does not support it.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

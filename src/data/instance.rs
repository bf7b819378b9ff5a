use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One labeled example: a feature vector and a target vector.
///
/// Targets are usually one-hot class encodings; only the first target takes
/// part in the default error signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub features: Vec<f64>,
    pub targets: Vec<f64>,
}

impl Instance {
    pub fn new(features: Vec<f64>, targets: Vec<f64>) -> Instance {
        Instance { features, targets }
    }

    /// Index of the largest target, lowest index on ties.
    pub fn target_class(&self) -> Option<usize> {
        argmax(&self.targets)
    }

    pub(crate) fn check_features(&self, expected: usize) -> Result<()> {
        check_len("feature", expected, self.features.len())
    }

    pub(crate) fn check_targets(&self, expected: usize) -> Result<()> {
        check_len("target", expected, self.targets.len())
    }
}

fn check_len(what: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(Error::InputDimension { what, expected, found })
    }
}

/// Index of the maximum value; the first of several equal maxima wins.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

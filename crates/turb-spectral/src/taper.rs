//! Taper (window-function) coefficients for segment periodograms

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Taper applied to each segment before transforming.
///
/// The default is rectangular (no taper), matching the reference
/// processing; Hann is available for records where spectral leakage
/// matters. The estimator's density scaling normalizes by the taper power
/// `sum(w^2)`, so both choices stay Parseval-consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Taper {
    /// No taper.
    #[default]
    Rectangular,
    /// Periodic Hann window.
    Hann,
}

impl Taper {
    /// Coefficients for an `n`-point segment.
    pub fn coefficients(self, n: usize) -> Vec<f64> {
        match self {
            Taper::Rectangular => vec![1.0; n],
            Taper::Hann => (0..n)
                .map(|i| 0.5 * (1.0 - (TAU * i as f64 / n as f64).cos()))
                .collect(),
        }
    }
}

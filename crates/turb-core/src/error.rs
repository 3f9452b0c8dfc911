//! Error types for the turbulence binning engine
//!
//! Provides a unified error type shared by all turb-stats crates. Fatal
//! errors cover caller bugs (bad configuration, malformed input); per-window
//! degenerate results are NOT errors; they are NaN sentinels in the output.

use thiserror::Error;

/// Unified error type for turbulence-statistics operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid run configuration (window duration, FFT length, bands, ...)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Channel or buffer length mismatch
    #[error("Shape mismatch in {context}: expected {expected} samples, got {actual}")]
    ShapeMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    /// Empty input where at least one sample is required
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Too few samples for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Sample rate is NaN, infinite, zero, or negative
    #[error("Sample rate must be finite and positive, got {0}")]
    BadSampleRate(f64),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an error for mismatched channel/buffer lengths
    pub fn shape_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch {
            context: context.to_string(),
            expected,
            actual,
        }
    }

    /// Create an error for empty input
    pub fn empty_input(context: &str) -> Self {
        Self::EmptyInput(context.to_string())
    }
}

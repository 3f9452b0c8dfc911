//! Windowing partitioner
//!
//! Splits a record into contiguous, equal-length, non-overlapping analysis
//! windows. The trailing partial window is dropped, never padded, and the
//! drop count is reported so callers can account for every input sample:
//! `windows * samples_per_window + dropped == n_samples` always holds.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Tolerance (in samples) when checking that a window duration rounds to a
/// whole sample count.
const SAMPLE_COUNT_TOL: f64 = 1e-6;

/// Convert a window duration in seconds to a whole sample count.
///
/// Fails with a configuration error when `window_seconds * fs` is not a
/// positive integer (within [`SAMPLE_COUNT_TOL`]).
pub fn samples_per_window(window_seconds: f64, fs: f64) -> Result<usize> {
    if !fs.is_finite() || fs <= 0.0 {
        return Err(Error::BadSampleRate(fs));
    }
    if !window_seconds.is_finite() || window_seconds <= 0.0 {
        return Err(Error::config(format!(
            "window duration must be positive and finite, got {window_seconds} s"
        )));
    }
    let exact = window_seconds * fs;
    let rounded = exact.round();
    if (exact - rounded).abs() > SAMPLE_COUNT_TOL {
        return Err(Error::config(format!(
            "window duration {window_seconds} s at {fs} Hz gives a fractional \
             sample count ({exact})"
        )));
    }
    if rounded < 1.0 {
        return Err(Error::config(format!(
            "window duration {window_seconds} s at {fs} Hz is shorter than one sample"
        )));
    }
    Ok(rounded as usize)
}

/// One contiguous analysis window: a start index and a sample count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    /// Index of the first sample in the window.
    pub start: usize,
    /// Number of samples in the window.
    pub len: usize,
}

impl Window {
    /// Index range covered by this window.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.len
    }
}

/// A complete partition of a record into equal-length windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowPlan {
    samples_per_window: usize,
    windows: Vec<Window>,
    dropped: usize,
}

impl WindowPlan {
    /// Partition `n_samples` into `floor(n_samples / samples_per_window)`
    /// windows, dropping the tail.
    ///
    /// Fails with a configuration error when not even one full window fits.
    pub fn new(n_samples: usize, samples_per_window: usize) -> Result<Self> {
        if samples_per_window == 0 {
            return Err(Error::config("samples per window must be positive"));
        }
        let count = n_samples / samples_per_window;
        if count == 0 {
            return Err(Error::config(format!(
                "record of {n_samples} samples is shorter than one \
                 {samples_per_window}-sample window"
            )));
        }
        let windows = (0..count)
            .map(|i| Window {
                start: i * samples_per_window,
                len: samples_per_window,
            })
            .collect();
        Ok(Self {
            samples_per_window,
            windows,
            dropped: n_samples - count * samples_per_window,
        })
    }

    /// Samples in every window.
    pub fn samples_per_window(&self) -> usize {
        self.samples_per_window
    }

    /// The windows, in record order.
    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    /// Number of windows.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// A plan always holds at least one window.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Samples dropped from the record tail.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

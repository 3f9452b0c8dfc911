//! The binned output record
//!
//! One [`BinnedRow`] per analysis window, all on a shared angular-frequency
//! axis. The record is immutable once built; ownership passes to the caller
//! for persistence or plotting. Unit tags are exposed as constants so a
//! thin serialization adapter needs no extra computation.

use num_complex::Complex;
use serde::Serialize;
use turb_core::{TripleProducts, WindowStats};

/// Units of every spectral density in the record.
pub const PSD_UNITS: &str = "(m/s)^2 (rad/s)^-1";
/// Units of the frequency axis.
pub const OMEGA_UNITS: &str = "rad/s";
/// Units of the dissipation rate.
pub const EPSILON_UNITS: &str = "m^2 s^-3";
/// Ordered component pairs of every cross-spectra set.
pub const CROSS_PAIRS: [&str; 3] = ["uv", "uw", "vw"];

/// Per-component auto-spectra for one window, indexed u, v, w.
pub type ComponentSpectra = [Vec<f64>; 3];

/// Cross-spectra for one window, ordered per [`CROSS_PAIRS`].
pub type CrossSpectra = [Vec<Complex<f64>>; 3];

/// All derived quantities for one analysis window.
///
/// Optional spectra sets mirror the optional input channels: they are
/// present exactly when the record carried the corresponding channel
/// (`vel_mot` requires both `vel_rot` and `vel_acc`).
#[derive(Debug, Clone, Serialize)]
pub struct BinnedRow {
    /// Representative timestamp: the window midpoint (mean of the window's
    /// time samples), in seconds.
    pub time: f64,
    /// Scalar window statistics.
    pub stats: WindowStats,
    /// Auto-spectra of the motion-corrected velocity.
    pub spec_vel: ComponentSpectra,
    /// Auto-spectra of the rotation-rate-induced velocity.
    pub spec_vel_rot: Option<ComponentSpectra>,
    /// Auto-spectra of the acceleration-induced velocity.
    pub spec_vel_acc: Option<ComponentSpectra>,
    /// Auto-spectra of the total motion-induced velocity (rot + acc).
    pub spec_vel_mot: Option<ComponentSpectra>,
    /// Auto-spectra of the uncorrected velocity.
    pub spec_vel_raw: Option<ComponentSpectra>,
    /// Cross-spectra of the motion-corrected velocity.
    pub cross_vel: CrossSpectra,
    /// Cross-spectra of the total motion-induced velocity.
    pub cross_vel_mot: Option<CrossSpectra>,
    /// Cross-spectra of the uncorrected velocity.
    pub cross_vel_raw: Option<CrossSpectra>,
    /// Ordered triple-product tensor.
    pub triple_products: TripleProducts,
    /// LT83 dissipation rate; NaN when undefined for this window.
    pub epsilon: f64,
}

/// The reduced-rate output of one binning run.
#[derive(Debug, Clone, Serialize)]
pub struct BinnedRecord {
    /// Sample rate of the source record (Hz).
    pub fs: f64,
    /// Analysis window duration (s).
    pub window_seconds: f64,
    /// Samples dropped from the source record's tail.
    pub dropped_samples: usize,
    /// Shared ascending angular-frequency axis (rad/s).
    pub omega: Vec<f64>,
    /// One row per window, in record order.
    pub rows: Vec<BinnedRow>,
}

impl BinnedRecord {
    /// Number of windows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the record holds no windows (never produced by a
    /// successful run).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Window timestamps in row order.
    pub fn times(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.time).collect()
    }

    /// Dissipation rates in row order (NaN sentinels included).
    pub fn epsilon(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.epsilon).collect()
    }
}

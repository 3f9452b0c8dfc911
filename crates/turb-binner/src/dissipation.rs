//! Inertial-subrange dissipation-rate estimation (Lumley & Terray 1983)
//!
//! Fits each velocity component's spectrum, inside a per-component
//! inertial-subrange band, to the Kolmogorov -5/3 law after subtracting an
//! instrument noise floor, and combines the per-component estimates into
//! one dissipation rate per window weighted by in-band bin counts.
//!
//! The closed form used is the LT83 frozen-turbulence relation
//! `S(omega) = a * (eps * U)^(2/3) * omega^(-5/3)`, inverted per bin as
//! `eps = mean(S * omega^(5/3) / a)^(3/2) / U` with `a = 0.5`.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use turb_core::{Error, Result};

/// Empirical constant `a` in the LT83 inertial-subrange fit.
pub const LT83_FIT_CONSTANT: f64 = 0.5;

/// An inertial-subrange band in linear frequency (Hz).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandHz {
    /// Lower bound (Hz), exclusive.
    pub low: f64,
    /// Upper bound (Hz), exclusive.
    pub high: f64,
}

impl BandHz {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Bounds in angular frequency (rad/s).
    fn omega_bounds(&self) -> (f64, f64) {
        (self.low * TAU, self.high * TAU)
    }
}

/// Dissipation-rate estimator configuration.
///
/// The bands and noise floors are deployment calibration constants, not
/// computed quantities; they must come from the caller. The defaults carry
/// the reference mooring deployment's values and are only appropriate for
/// comparable instruments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DissipationConfig {
    /// Per-component inertial-subrange bands (u, v, w); `None` excludes the
    /// component from the fit.
    pub bands: [Option<BandHz>; 3],
    /// Per-component spectral noise floor in (m/s)^2/Hz, subtracted from
    /// the spectrum before fitting (converted to angular density
    /// internally).
    pub noise_floor: [f64; 3],
    /// Optional post-filter: windows with mean horizontal speed below this
    /// value (m/s) get a NaN dissipation estimate. Disabled by default;
    /// near-zero flow makes the frozen-turbulence assumption unreliable.
    pub min_speed: Option<f64>,
}

impl Default for DissipationConfig {
    fn default() -> Self {
        Self {
            bands: [
                Some(BandHz::new(0.3, 1.0)),
                Some(BandHz::new(0.3, 1.0)),
                Some(BandHz::new(0.3, 3.0)),
            ],
            noise_floor: [1.5e-4, 1.5e-4, 1.5e-5],
            min_speed: None,
        }
    }
}

impl DissipationConfig {
    /// Validate band ordering and noise-floor signs.
    pub fn validate(&self) -> Result<()> {
        for (i, band) in self.bands.iter().enumerate() {
            if let Some(b) = band {
                if !b.low.is_finite() || !b.high.is_finite() || b.low < 0.0 || b.low >= b.high {
                    return Err(Error::config(format!(
                        "dissipation band for component {i} must satisfy 0 <= low < high, \
                         got [{}, {}]",
                        b.low, b.high
                    )));
                }
            }
        }
        for (i, &nf) in self.noise_floor.iter().enumerate() {
            if !nf.is_finite() || nf < 0.0 {
                return Err(Error::config(format!(
                    "noise floor for component {i} must be finite and non-negative, got {nf}"
                )));
            }
        }
        Ok(())
    }
}

/// LT83 dissipation estimate for one component band.
///
/// `spec` is the component's angular-frequency PSD on the `omega` axis,
/// `noise_floor_omega` the noise density already in per-rad/s units, and
/// `u_mag` the window's mean horizontal speed. Returns the estimate and
/// the in-band bin count; a zero count yields `(NaN, 0)`.
pub fn lt83_epsilon(
    spec: &[f64],
    omega: &[f64],
    u_mag: f64,
    band: (f64, f64),
    noise_floor_omega: f64,
) -> (f64, usize) {
    let (lo, hi) = band;
    let mut sum = 0.0;
    let mut count = 0usize;
    for (&om, &s) in omega.iter().zip(spec) {
        if om > lo && om < hi {
            // Negative density after noise subtraction is an expected
            // measurement artifact; clamp to zero. The comparison form
            // (rather than f64::max) lets NaN samples pass through.
            let mut s = s - noise_floor_omega;
            if s < 0.0 {
                s = 0.0;
            }
            sum += s * om.powf(5.0 / 3.0) / LT83_FIT_CONSTANT;
            count += 1;
        }
    }
    if count == 0 {
        return (f64::NAN, 0);
    }
    let eps = (sum / count as f64).powf(1.5) / u_mag;
    (eps, count)
}

/// Combined dissipation rate for one window.
///
/// Per-component estimates are weighted by their in-band bin counts; a
/// window with zero total weight (or one failing the optional minimum-speed
/// post-filter) yields the NaN sentinel rather than an error, so the rest
/// of the run is unaffected.
pub fn window_epsilon(
    spectra: [&[f64]; 3],
    omega: &[f64],
    u_mag: f64,
    config: &DissipationConfig,
) -> f64 {
    let mut weighted = 0.0;
    let mut total_weight = 0usize;
    for (i, band) in config.bands.iter().enumerate() {
        let Some(band) = band else { continue };
        let noise_omega = config.noise_floor[i] / TAU;
        let (eps, n) = lt83_epsilon(spectra[i], omega, u_mag, band.omega_bounds(), noise_omega);
        if n > 0 {
            weighted += eps * n as f64;
            total_weight += n;
        }
    }
    if total_weight == 0 {
        return f64::NAN;
    }
    if let Some(min_speed) = config.min_speed {
        if u_mag < min_speed {
            return f64::NAN;
        }
    }
    weighted / total_weight as f64
}

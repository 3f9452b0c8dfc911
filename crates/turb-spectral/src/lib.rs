//! Spectral estimation for turbulence records
//!
//! Welch-style one-sided auto- and cross-power spectral densities built on
//! RustFFT, expressed on an angular-frequency axis (rad/s) with densities
//! in (m/s)^2 per rad/s, the single spectral convention of the engine.
//!
//! ## Usage
//!
//! ```rust
//! use turb_spectral::{SpectralConfig, SpectralEstimator, Taper};
//!
//! let est = SpectralEstimator::new(SpectralConfig {
//!     fs: 32.0,
//!     n_fft: 256,
//!     taper: Taper::Rectangular,
//! })
//! .unwrap();
//!
//! let signal: Vec<f64> = (0..512)
//!     .map(|i| (2.0 * std::f64::consts::PI * 2.0 * i as f64 / 32.0).sin())
//!     .collect();
//! let psd = est.psd(&signal).unwrap();
//! assert_eq!(psd.len(), est.n_bins());
//! ```

pub mod taper;
pub mod welch;

pub use taper::Taper;
pub use welch::{SpectralConfig, SpectralEstimator};

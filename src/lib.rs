//! # turb-stats
//!
//! Turbulence-statistics binning for IMU-equipped Acoustic Doppler
//! Velocimeter (ADV) records from seafloor moorings. Given an already
//! motion-corrected, earth- (or principal-axis-) referenced velocity time
//! series, the engine partitions it into fixed-duration windows and
//! computes, per window:
//!
//! - mean velocity, horizontal speed, turbulence intensity, TKE and
//!   Reynolds stresses ([`stats`]),
//! - one-sided auto- and cross-power spectral densities on an
//!   angular-frequency axis ([`SpectralEstimator`]),
//! - the ordered triple-product tensor `<u_i'^2 u_j'>`,
//! - an inertial-subrange (Lumley & Terray 1983) dissipation-rate
//!   estimate.
//!
//! Instrument file decoding, motion correction, coordinate rotation, and
//! persistence are external collaborators; this crate consumes an
//! [`AdvRecord`] and yields a [`BinnedRecord`] with named, unit-tagged
//! arrays ready for a thin serialization adapter.
//!
//! ## Example
//!
//! ```rust
//! use turb_stats::{AdvRecord, BinnerConfig, TurbBinner, VelComponents};
//!
//! // a minute of synthetic flow at 8 Hz
//! let fs = 8.0;
//! let n = 480;
//! let time: Vec<f64> = (0..n).map(|i| i as f64 / fs).collect();
//! let u: Vec<f64> = (0..n).map(|i| 1.0 + 0.05 * (i as f64 * 0.7).sin()).collect();
//! let v = vec![0.3; n];
//! let w = vec![0.0; n];
//! let record = AdvRecord::new(fs, time, VelComponents::new(u, v, w).unwrap()).unwrap();
//!
//! // 15-second windows instead of the default 5 minutes
//! let binner = TurbBinner::new(BinnerConfig {
//!     window_seconds: 15.0,
//!     ..BinnerConfig::default()
//! })
//! .unwrap();
//!
//! let binned = binner.bin(&record).unwrap();
//! assert_eq!(binned.len(), 4);
//! assert_eq!(binned.dropped_samples, 0);
//! ```

pub use turb_core::{
    samples_per_window, stats, triple_products, AdvRecord, Component, Error, Result,
    TripleProducts, VelComponents, Window, WindowPlan, WindowStats, DEFAULT_TI_MIN_SPEED,
    TRIPLE_PRODUCT_LABELS,
};

pub use turb_spectral::{SpectralConfig, SpectralEstimator, Taper};

pub use turb_binner::{
    lt83_epsilon, window_epsilon, BandHz, BinnedRecord, BinnedRow, BinnerConfig,
    DissipationConfig, TurbBinner, CROSS_PAIRS, EPSILON_UNITS, LT83_FIT_CONSTANT, OMEGA_UNITS,
    PSD_UNITS,
};

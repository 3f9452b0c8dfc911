//! Turbulence-statistics binning: dissipation estimation and orchestration
//!
//! This crate ties the engine together. [`TurbBinner`] partitions a
//! motion-corrected velocity record into fixed-duration windows and reduces
//! each to one [`BinnedRow`] of turbulence statistics, spectra, triple
//! products, and an LT83 dissipation-rate estimate; the rows are assembled
//! into an immutable [`BinnedRecord`].
//!
//! Windows are mutually independent: enabling the `parallel` feature maps
//! them across a rayon pool and reassembles the rows in record order.
//!
//! ## Usage
//!
//! ```rust
//! use turb_binner::{BinnerConfig, TurbBinner};
//! use turb_core::{AdvRecord, VelComponents};
//!
//! let fs = 8.0;
//! let n = 2 * 128;
//! let time: Vec<f64> = (0..n).map(|i| i as f64 / fs).collect();
//! let u = vec![1.0; n];
//! let v = vec![0.2; n];
//! let w = vec![0.0; n];
//! let record = AdvRecord::new(fs, time, VelComponents::new(u, v, w).unwrap()).unwrap();
//!
//! let binner = TurbBinner::new(BinnerConfig {
//!     window_seconds: 16.0,
//!     ..BinnerConfig::default()
//! })
//! .unwrap();
//! let binned = binner.bin(&record).unwrap();
//! assert_eq!(binned.len(), 2);
//! ```

pub mod binner;
pub mod dissipation;
pub mod record;

pub use binner::{BinnerConfig, TurbBinner};
pub use dissipation::{
    lt83_epsilon, window_epsilon, BandHz, DissipationConfig, LT83_FIT_CONSTANT,
};
pub use record::{
    BinnedRecord, BinnedRow, ComponentSpectra, CrossSpectra, CROSS_PAIRS, EPSILON_UNITS,
    OMEGA_UNITS, PSD_UNITS,
};

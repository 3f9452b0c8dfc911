//! Core types and per-window statistics for ADV turbulence analysis
//!
//! This crate carries the data model and the window-local reductions of the
//! turbulence binning engine:
//!
//! - [`AdvRecord`] / [`VelComponents`]: the motion-corrected velocity record
//!   the engine consumes (sample rate, timestamp axis, named channels).
//! - [`WindowPlan`]: partitioning into equal-length analysis windows with a
//!   reported tail drop.
//! - [`stats::reduce`]: means, horizontal speed, fluctuation scale,
//!   turbulence intensity, TKE, and Reynolds stresses per window.
//! - [`triple_products`]: the ordered `<u_i'^2 u_j'>` tensor per window.
//!
//! Degenerate per-window results are NaN sentinels, never errors; fatal
//! validation failures use the shared [`Error`] type.

pub mod error;
pub mod series;
pub mod stats;
pub mod triple;
pub mod window;

pub use error::{Error, Result};
pub use series::{AdvRecord, Component, VelComponents};
pub use stats::{WindowStats, DEFAULT_TI_MIN_SPEED};
pub use triple::{triple_products, TripleProducts, TRIPLE_PRODUCT_LABELS};
pub use window::{samples_per_window, Window, WindowPlan};

//! The binning orchestrator
//!
//! Drives the whole per-window pipeline over a record: partition, reduce
//! statistics, estimate auto-/cross-spectra for every available channel
//! set, compute triple products, and estimate the dissipation rate from
//! the corrected-velocity spectra. Windows are processed independently and
//! assembled in record order, so the per-window map parallelizes cleanly
//! (enable the `parallel` feature).

use crate::dissipation::{window_epsilon, DissipationConfig};
use crate::record::{BinnedRecord, BinnedRow, ComponentSpectra, CrossSpectra};
use log::{debug, info};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use turb_core::{
    samples_per_window, stats, triple_products, AdvRecord, Error, Result, VelComponents, Window,
    WindowPlan, DEFAULT_TI_MIN_SPEED,
};
use turb_spectral::{SpectralConfig, SpectralEstimator, Taper};

/// Configuration for one binning run.
///
/// Constructed once per run and passed in whole; there is no module-level
/// state. Serde round-trips for storage alongside the output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinnerConfig {
    /// Analysis window duration in seconds.
    pub window_seconds: f64,
    /// Transform length for spectral estimation; `None` uses the full
    /// window (single segment), a divisor of the window length gives
    /// Welch segment averaging.
    pub n_fft: Option<usize>,
    /// Taper applied per spectral segment.
    pub taper: Taper,
    /// Minimum mean horizontal speed (m/s) for a defined turbulence
    /// intensity.
    pub ti_min_speed: f64,
    /// Dissipation-rate estimation settings.
    pub dissipation: DissipationConfig,
}

impl Default for BinnerConfig {
    /// Reference configuration: 5-minute windows, full-window transform,
    /// no taper, 0.7 m/s turbulence-intensity threshold, and the reference
    /// deployment's dissipation calibration.
    fn default() -> Self {
        Self {
            window_seconds: 300.0,
            n_fft: None,
            taper: Taper::Rectangular,
            ti_min_speed: DEFAULT_TI_MIN_SPEED,
            dissipation: DissipationConfig::default(),
        }
    }
}

/// Turbulence-statistics binner: partitions a record into fixed windows
/// and reduces each to one [`BinnedRow`].
#[derive(Debug, Clone)]
pub struct TurbBinner {
    config: BinnerConfig,
}

impl TurbBinner {
    /// Create a binner, validating the record-independent parts of the
    /// configuration.
    pub fn new(config: BinnerConfig) -> Result<Self> {
        if !config.window_seconds.is_finite() || config.window_seconds <= 0.0 {
            return Err(Error::config(format!(
                "window duration must be positive and finite, got {} s",
                config.window_seconds
            )));
        }
        if !config.ti_min_speed.is_finite() || config.ti_min_speed < 0.0 {
            return Err(Error::config(format!(
                "turbulence-intensity speed threshold must be non-negative, got {}",
                config.ti_min_speed
            )));
        }
        config.dissipation.validate()?;
        Ok(Self { config })
    }

    /// The binner's configuration.
    pub fn config(&self) -> &BinnerConfig {
        &self.config
    }

    /// Bin a record into a [`BinnedRecord`].
    ///
    /// Fails fast on configuration/shape problems; per-window degenerate
    /// results come back as NaN sentinels in their rows and never abort
    /// the run.
    pub fn bin(&self, record: &AdvRecord) -> Result<BinnedRecord> {
        record.validate()?;

        let spw = samples_per_window(self.config.window_seconds, record.fs)?;
        let plan = WindowPlan::new(record.len(), spw)?;
        if plan.dropped() > 0 {
            debug!("dropping {} trailing samples (partial window)", plan.dropped());
        }

        let n_fft = self.config.n_fft.unwrap_or(spw);
        if n_fft > spw {
            return Err(Error::config(format!(
                "FFT length {n_fft} exceeds the {spw}-sample window"
            )));
        }
        let estimator = SpectralEstimator::new(SpectralConfig {
            fs: record.fs,
            n_fft,
            taper: self.config.taper,
        })?;

        // Formed once; windows only slice it.
        let vel_mot = record.vel_mot()?;

        info!(
            "binning {} windows of {} samples at {} Hz ({} samples dropped)",
            plan.len(),
            spw,
            record.fs,
            plan.dropped()
        );

        let windows = plan.windows();
        #[cfg(feature = "parallel")]
        let rows: Result<Vec<BinnedRow>> = windows
            .par_iter()
            .map(|w| self.process_window(record, vel_mot.as_ref(), &estimator, *w))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let rows: Result<Vec<BinnedRow>> = windows
            .iter()
            .map(|w| self.process_window(record, vel_mot.as_ref(), &estimator, *w))
            .collect();

        Ok(BinnedRecord {
            fs: record.fs,
            window_seconds: self.config.window_seconds,
            dropped_samples: plan.dropped(),
            omega: estimator.omega().to_vec(),
            rows: rows?,
        })
    }

    /// Reduce one window to a row. Reads only this window's samples and the
    /// run configuration.
    fn process_window(
        &self,
        record: &AdvRecord,
        vel_mot: Option<&VelComponents>,
        estimator: &SpectralEstimator,
        window: Window,
    ) -> Result<BinnedRow> {
        let range = window.range();
        let [u, v, w] = record.vel.channels().map(|c| &c[range.clone()]);

        let time = stats::mean(&record.time[range.clone()]);
        let stats = stats::reduce(u, v, w, self.config.ti_min_speed);
        let triple_products = triple_products(u, v, w);

        let spec_vel = auto_spectra(estimator, [u, v, w])?;
        let spec_vel_rot = maybe_auto(estimator, record.vel_rot.as_ref(), &range)?;
        let spec_vel_acc = maybe_auto(estimator, record.vel_acc.as_ref(), &range)?;
        let spec_vel_mot = maybe_auto(estimator, vel_mot, &range)?;
        let spec_vel_raw = maybe_auto(estimator, record.vel_raw.as_ref(), &range)?;

        let cross_vel = cross_spectra(estimator, [u, v, w])?;
        let cross_vel_mot = maybe_cross(estimator, vel_mot, &range)?;
        let cross_vel_raw = maybe_cross(estimator, record.vel_raw.as_ref(), &range)?;

        let epsilon = window_epsilon(
            [&spec_vel[0], &spec_vel[1], &spec_vel[2]],
            estimator.omega(),
            stats.u_mag,
            &self.config.dissipation,
        );

        Ok(BinnedRow {
            time,
            stats,
            spec_vel,
            spec_vel_rot,
            spec_vel_acc,
            spec_vel_mot,
            spec_vel_raw,
            cross_vel,
            cross_vel_mot,
            cross_vel_raw,
            triple_products,
            epsilon,
        })
    }
}

fn auto_spectra(est: &SpectralEstimator, channels: [&[f64]; 3]) -> Result<ComponentSpectra> {
    Ok([
        est.psd(channels[0])?,
        est.psd(channels[1])?,
        est.psd(channels[2])?,
    ])
}

/// Cross-spectra for the ordered pairs uv, uw, vw.
fn cross_spectra(est: &SpectralEstimator, channels: [&[f64]; 3]) -> Result<CrossSpectra> {
    let [u, v, w] = channels;
    Ok([est.cpsd(u, v)?, est.cpsd(u, w)?, est.cpsd(v, w)?])
}

fn maybe_auto(
    est: &SpectralEstimator,
    channels: Option<&VelComponents>,
    range: &std::ops::Range<usize>,
) -> Result<Option<ComponentSpectra>> {
    channels
        .map(|c| auto_spectra(est, c.channels().map(|ch| &ch[range.clone()])))
        .transpose()
}

fn maybe_cross(
    est: &SpectralEstimator,
    channels: Option<&VelComponents>,
    range: &std::ops::Range<usize>,
) -> Result<Option<CrossSpectra>> {
    channels
        .map(|c| cross_spectra(est, c.channels().map(|ch| &ch[range.clone()])))
        .transpose()
}

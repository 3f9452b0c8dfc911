//! Welch auto- and cross-power spectral density estimation
//!
//! One-sided spectral densities on an angular-frequency axis. The axis runs
//! from the fundamental `2*pi*fs/n_fft` up to just under Nyquist (bins
//! `k = 1 ..= n_fft/2 - 1`); DC is excluded because every segment is
//! demeaned before transforming.
//!
//! Units: input in m/s gives densities in (m/s)^2 per rad/s. This is the
//! ONE spectral convention of the codebase; anything specified per Hz is
//! converted at the configuration boundary.
//!
//! Scaling is Parseval-consistent: for a demeaned signal,
//! `sum(psd) * domega` approximates the signal variance (the excluded
//! Nyquist bin carries the residual).

use crate::taper::Taper;
use num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::sync::Arc;
use turb_core::{Error, Result};

/// Spectral estimator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectralConfig {
    /// Sample rate in Hz.
    pub fs: f64,
    /// Segment / transform length in samples; must be even and at least 4.
    pub n_fft: usize,
    /// Taper applied per segment.
    pub taper: Taper,
}

/// A Welch spectral estimator with a cached transform plan.
///
/// Construction plans the FFT and precomputes the taper and the frequency
/// axis; one estimator serves every window of a record. Inputs longer than
/// `n_fft` are split into 50%-overlapping segments whose periodograms are
/// averaged; an input of exactly `n_fft` samples is a single segment.
pub struct SpectralEstimator {
    config: SpectralConfig,
    fft: Arc<dyn Fft<f64>>,
    taper: Vec<f64>,
    /// sum(w^2) of the taper, used in the density normalization.
    taper_power: f64,
    omega: Vec<f64>,
}

impl SpectralEstimator {
    /// Build an estimator, validating the configuration.
    pub fn new(config: SpectralConfig) -> Result<Self> {
        if !config.fs.is_finite() || config.fs <= 0.0 {
            return Err(Error::BadSampleRate(config.fs));
        }
        if config.n_fft < 4 || config.n_fft % 2 != 0 {
            return Err(Error::config(format!(
                "FFT length must be even and at least 4, got {}",
                config.n_fft
            )));
        }

        let taper = config.taper.coefficients(config.n_fft);
        let taper_power = taper.iter().map(|w| w * w).sum();
        let omega = (1..config.n_fft / 2)
            .map(|k| TAU * k as f64 * config.fs / config.n_fft as f64)
            .collect();
        let fft = FftPlanner::new().plan_fft_forward(config.n_fft);

        Ok(Self {
            config,
            fft,
            taper,
            taper_power,
            omega,
        })
    }

    /// The estimator's configuration.
    pub fn config(&self) -> &SpectralConfig {
        &self.config
    }

    /// Ascending angular-frequency axis (rad/s), fundamental to just under
    /// Nyquist.
    pub fn omega(&self) -> &[f64] {
        &self.omega
    }

    /// Number of frequency bins (`n_fft/2 - 1`).
    pub fn n_bins(&self) -> usize {
        self.omega.len()
    }

    /// One-sided auto-power spectral density of `x`, in (m/s)^2 per rad/s.
    pub fn psd(&self, x: &[f64]) -> Result<Vec<f64>> {
        self.check_input(x)?;
        let n = self.config.n_fft;
        let mut acc = vec![0.0; self.n_bins()];
        let mut buf = vec![Complex::new(0.0, 0.0); n];
        let mut n_segments = 0usize;

        for start in self.segment_starts(x.len()) {
            self.transform_segment(&x[start..start + n], &mut buf);
            for (a, c) in acc.iter_mut().zip(&buf[1..n / 2]) {
                *a += c.norm_sqr();
            }
            n_segments += 1;
        }

        let scale = self.density_scale(n_segments);
        Ok(acc.into_iter().map(|p| p * scale).collect())
    }

    /// One-sided cross-power spectral density `X * conj(Y)` of two
    /// channels, complex-valued, same segmenting and scaling as [`psd`].
    ///
    /// [`psd`]: SpectralEstimator::psd
    pub fn cpsd(&self, x: &[f64], y: &[f64]) -> Result<Vec<Complex<f64>>> {
        self.check_input(x)?;
        if y.len() != x.len() {
            return Err(Error::shape_mismatch("cpsd channel pair", x.len(), y.len()));
        }
        let n = self.config.n_fft;
        let mut acc = vec![Complex::new(0.0, 0.0); self.n_bins()];
        let mut buf_x = vec![Complex::new(0.0, 0.0); n];
        let mut buf_y = vec![Complex::new(0.0, 0.0); n];
        let mut n_segments = 0usize;

        for start in self.segment_starts(x.len()) {
            self.transform_segment(&x[start..start + n], &mut buf_x);
            self.transform_segment(&y[start..start + n], &mut buf_y);
            for ((a, cx), cy) in acc.iter_mut().zip(&buf_x[1..n / 2]).zip(&buf_y[1..n / 2]) {
                *a += cx * cy.conj();
            }
            n_segments += 1;
        }

        let scale = self.density_scale(n_segments);
        Ok(acc.into_iter().map(|p| p * scale).collect())
    }

    fn check_input(&self, x: &[f64]) -> Result<()> {
        if x.len() < self.config.n_fft {
            return Err(Error::InsufficientData {
                expected: self.config.n_fft,
                actual: x.len(),
            });
        }
        Ok(())
    }

    /// Segment start offsets: 50% overlap, last partial step ignored.
    fn segment_starts(&self, len: usize) -> impl Iterator<Item = usize> {
        let n = self.config.n_fft;
        let step = n / 2;
        let count = (len - n) / step + 1;
        (0..count).map(move |i| i * step)
    }

    /// Demean, taper, and transform one segment into `buf`.
    fn transform_segment(&self, segment: &[f64], buf: &mut [Complex<f64>]) {
        let mean = segment.iter().sum::<f64>() / segment.len() as f64;
        for ((b, &s), &w) in buf.iter_mut().zip(segment).zip(&self.taper) {
            *b = Complex::new((s - mean) * w, 0.0);
        }
        self.fft.process(buf);
    }

    /// One-sided density scaling per angular frequency:
    /// `2 / (fs * sum(w^2))` per Hz, divided by 2*pi for rad/s, averaged
    /// over segments.
    fn density_scale(&self, n_segments: usize) -> f64 {
        2.0 / (self.config.fs * self.taper_power * n_segments as f64 * TAU)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn sine(n: usize, fs: f64, freq: f64, amp: f64) -> Vec<f64> {
        (0..n)
            .map(|i| amp * (TAU * freq * i as f64 / fs).sin())
            .collect()
    }

    fn noise(n: usize, seed: u64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect()
    }

    #[test]
    fn test_config_validation() {
        let ok = SpectralConfig {
            fs: 32.0,
            n_fft: 256,
            taper: Taper::Rectangular,
        };
        assert!(SpectralEstimator::new(ok).is_ok());

        for (fs, n_fft) in [(0.0, 256), (f64::NAN, 256), (32.0, 255), (32.0, 2)] {
            let cfg = SpectralConfig {
                fs,
                n_fft,
                taper: Taper::Rectangular,
            };
            assert!(SpectralEstimator::new(cfg).is_err(), "fs={fs} n_fft={n_fft}");
        }
    }

    #[test]
    fn test_omega_axis() {
        let est = SpectralEstimator::new(SpectralConfig {
            fs: 32.0,
            n_fft: 64,
            taper: Taper::Rectangular,
        })
        .unwrap();
        let omega = est.omega();
        assert_eq!(omega.len(), 31);
        // fundamental
        assert_relative_eq!(omega[0], TAU * 0.5);
        // last bin is below Nyquist
        assert!(omega[31 - 1] < TAU * 16.0);
        assert!(omega.windows(2).all(|p| p[1] > p[0]));
    }

    #[test]
    fn test_sine_peak_bin() {
        // tone at bin 8 of a 64-point transform
        let est = SpectralEstimator::new(SpectralConfig {
            fs: 64.0,
            n_fft: 64,
            taper: Taper::Rectangular,
        })
        .unwrap();
        let x = sine(64, 64.0, 8.0, 1.0);
        let psd = est.psd(&x).unwrap();
        let peak = psd
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .unwrap()
            .0;
        // bin k=8 sits at index 7 (axis starts at k=1)
        assert_eq!(peak, 7);
    }

    #[test]
    fn test_parseval_sine_exact() {
        // On-bin sine, single segment: sum(psd) * domega == variance.
        let (n, fs, amp) = (256, 32.0, 0.8);
        let est = SpectralEstimator::new(SpectralConfig {
            fs,
            n_fft: n,
            taper: Taper::Rectangular,
        })
        .unwrap();
        let x = sine(n, fs, 2.0, amp);
        let psd = est.psd(&x).unwrap();
        let domega = TAU * fs / n as f64;
        let total: f64 = psd.iter().map(|p| p * domega).sum();
        assert_relative_eq!(total, amp * amp / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_parseval_white_noise() {
        let (n, fs) = (2048, 32.0);
        let est = SpectralEstimator::new(SpectralConfig {
            fs,
            n_fft: n,
            taper: Taper::Rectangular,
        })
        .unwrap();
        let x = noise(n, 42);
        let mean = x.iter().sum::<f64>() / n as f64;
        let variance = x.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n as f64;

        let psd = est.psd(&x).unwrap();
        let domega = TAU * fs / n as f64;
        let total: f64 = psd.iter().map(|p| p * domega).sum();
        // only the excluded Nyquist bin is missing
        assert_relative_eq!(total, variance, max_relative = 0.01);
    }

    #[test]
    fn test_welch_segment_averaging_preserves_level() {
        let (len, n_fft, fs) = (4096, 512, 16.0);
        let est = SpectralEstimator::new(SpectralConfig {
            fs,
            n_fft,
            taper: Taper::Rectangular,
        })
        .unwrap();
        let x = noise(len, 7);
        let mean = x.iter().sum::<f64>() / len as f64;
        let variance = x.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / len as f64;

        let psd = est.psd(&x).unwrap();
        let domega = TAU * fs / n_fft as f64;
        let total: f64 = psd.iter().map(|p| p * domega).sum();
        assert_relative_eq!(total, variance, max_relative = 0.05);
    }

    #[test]
    fn test_hann_taper_normalization() {
        let (len, n_fft, fs) = (4096, 512, 16.0);
        let est = SpectralEstimator::new(SpectralConfig {
            fs,
            n_fft,
            taper: Taper::Hann,
        })
        .unwrap();
        let x = noise(len, 11);
        let mean = x.iter().sum::<f64>() / len as f64;
        let variance = x.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / len as f64;

        let psd = est.psd(&x).unwrap();
        let domega = TAU * fs / n_fft as f64;
        let total: f64 = psd.iter().map(|p| p * domega).sum();
        assert_relative_eq!(total, variance, max_relative = 0.10);
    }

    #[test]
    fn test_cpsd_self_matches_psd() {
        let est = SpectralEstimator::new(SpectralConfig {
            fs: 32.0,
            n_fft: 256,
            taper: Taper::Rectangular,
        })
        .unwrap();
        let x = noise(256, 3);
        let psd = est.psd(&x).unwrap();
        let cpsd = est.cpsd(&x, &x).unwrap();
        for (p, c) in psd.iter().zip(&cpsd) {
            assert_relative_eq!(c.re, *p, epsilon = 1e-12);
            assert_relative_eq!(c.im, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_cpsd_quadrature_pair() {
        // cos/sin at the same frequency: the cross-spectrum at that bin is
        // purely imaginary.
        let (n, fs, freq) = (256, 32.0, 2.0);
        let est = SpectralEstimator::new(SpectralConfig {
            fs,
            n_fft: n,
            taper: Taper::Rectangular,
        })
        .unwrap();
        let x: Vec<f64> = (0..n)
            .map(|i| (TAU * freq * i as f64 / fs).cos())
            .collect();
        let y = sine(n, fs, freq, 1.0);
        let cpsd = est.cpsd(&x, &y).unwrap();
        // bin k = freq * n / fs = 16 -> index 15
        let c = cpsd[15];
        assert!(c.im.abs() > 1e3 * c.re.abs(), "cross spectrum {c} not in quadrature");
    }

    #[test]
    fn test_input_too_short() {
        let est = SpectralEstimator::new(SpectralConfig {
            fs: 32.0,
            n_fft: 256,
            taper: Taper::Rectangular,
        })
        .unwrap();
        let err = est.psd(&[0.0; 100]).unwrap_err();
        assert!(matches!(err, Error::InsufficientData { expected: 256, actual: 100 }));
    }

    #[test]
    fn test_cpsd_length_mismatch() {
        let est = SpectralEstimator::new(SpectralConfig {
            fs: 32.0,
            n_fft: 64,
            taper: Taper::Rectangular,
        })
        .unwrap();
        let err = est.cpsd(&vec![0.0; 128], &vec![0.0; 127]).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }
}

//! Per-window turbulence statistics
//!
//! Reduces one window of velocity samples to scalar statistics: component
//! means, horizontal speed, the horizontal-speed fluctuation scale, the
//! turbulence intensity, TKE components, and Reynolds stresses.
//!
//! Conventions held across the whole codebase:
//! - All moments are population moments (divide by N, not N-1).
//! - Undefined results are `f64::NAN` sentinels, never errors. NaN samples
//!   left by upstream cleaning propagate into every dependent statistic.

use serde::{Deserialize, Serialize};

/// Minimum horizontal speed (m/s) below which turbulence intensity is
/// reported as NaN. Dividing the fluctuation scale by a near-zero mean
/// speed produces meaningless blow-up.
pub const DEFAULT_TI_MIN_SPEED: f64 = 0.7;

/// Scalar statistics for one analysis window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowStats {
    /// Mean East velocity (m/s).
    pub mean_u: f64,
    /// Mean North velocity (m/s).
    pub mean_v: f64,
    /// Mean vertical velocity (m/s).
    pub mean_w: f64,
    /// Horizontal speed of the mean current, `sqrt(mean_u^2 + mean_v^2)`.
    pub u_mag: f64,
    /// Standard deviation of the per-sample horizontal speed about its
    /// window mean (population convention).
    pub sigma_uh: f64,
    /// Turbulence intensity, `sigma_uh / u_mag`; NaN when `u_mag` is below
    /// the configured minimum speed.
    pub turb_intensity: f64,
    /// Turbulent kinetic energy components `(u'^2, v'^2, w'^2)` (m^2/s^2).
    pub tke: [f64; 3],
    /// Reynolds stress components `(u'v', u'w', v'w')` (m^2/s^2).
    pub stress: [f64; 3],
}

/// Arithmetic mean of a slice. NaN for empty input.
pub fn mean(x: &[f64]) -> f64 {
    if x.is_empty() {
        return f64::NAN;
    }
    x.iter().sum::<f64>() / x.len() as f64
}

/// Mean of the element-wise product of two demeaned channels, i.e. the
/// population covariance `<a'b'>`.
fn covariance(a: &[f64], mean_a: f64, b: &[f64], mean_b: f64) -> f64 {
    let n = a.len() as f64;
    a.iter()
        .zip(b)
        .map(|(&x, &y)| (x - mean_a) * (y - mean_b))
        .sum::<f64>()
        / n
}

/// Reduce one window of velocity samples to [`WindowStats`].
///
/// The three channels must have equal lengths; the orchestrator guarantees
/// this by construction. `ti_min_speed` is the turbulence-intensity
/// sentinel threshold (reference value [`DEFAULT_TI_MIN_SPEED`]).
pub fn reduce(u: &[f64], v: &[f64], w: &[f64], ti_min_speed: f64) -> WindowStats {
    let mean_u = mean(u);
    let mean_v = mean(v);
    let mean_w = mean(w);
    let u_mag = (mean_u * mean_u + mean_v * mean_v).sqrt();

    // Fluctuation scale of the horizontal speed itself, not of the
    // components: |u_h| per sample, demeaned over the window.
    let uh: Vec<f64> = u
        .iter()
        .zip(v)
        .map(|(&x, &y)| (x * x + y * y).sqrt())
        .collect();
    let mean_uh = mean(&uh);
    let sigma_uh = covariance(&uh, mean_uh, &uh, mean_uh).sqrt();

    // The strict `<` keeps u_mag == threshold defined; a NaN u_mag fails
    // the comparison and propagates through the division instead.
    let turb_intensity = if u_mag < ti_min_speed {
        f64::NAN
    } else {
        sigma_uh / u_mag
    };

    let tke = [
        covariance(u, mean_u, u, mean_u),
        covariance(v, mean_v, v, mean_v),
        covariance(w, mean_w, w, mean_w),
    ];
    let stress = [
        covariance(u, mean_u, v, mean_v),
        covariance(u, mean_u, w, mean_w),
        covariance(v, mean_v, w, mean_w),
    ];

    WindowStats {
        mean_u,
        mean_v,
        mean_w,
        u_mag,
        sigma_uh,
        turb_intensity,
        tke,
        stress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_means_and_speed() {
        let u = vec![1.0, 1.0, 1.0, 1.0];
        let v = vec![0.0, 0.0, 0.0, 0.0];
        let w = vec![0.5, -0.5, 0.5, -0.5];
        let s = reduce(&u, &v, &w, DEFAULT_TI_MIN_SPEED);
        assert_relative_eq!(s.mean_u, 1.0);
        assert_relative_eq!(s.mean_v, 0.0);
        assert_relative_eq!(s.mean_w, 0.0);
        assert_relative_eq!(s.u_mag, 1.0);
        // steady horizontal flow: no fluctuation
        assert_relative_eq!(s.sigma_uh, 0.0);
        assert_relative_eq!(s.turb_intensity, 0.0);
        // vertical variance only
        assert_relative_eq!(s.tke[0], 0.0);
        assert_relative_eq!(s.tke[2], 0.25);
    }

    #[test]
    fn test_population_variance_convention() {
        // Var([0, 2]) = 1 with 1/N, 2 with 1/(N-1); we use 1/N.
        let u = vec![0.0, 2.0];
        let v = vec![0.0, 0.0];
        let w = vec![0.0, 0.0];
        let s = reduce(&u, &v, &w, 0.0);
        assert_relative_eq!(s.tke[0], 1.0);
    }

    #[test]
    fn test_stress_sign() {
        // u and w perfectly anti-correlated: u'w' < 0.
        let u = vec![1.0, 2.0, 3.0, 4.0];
        let w = vec![4.0, 3.0, 2.0, 1.0];
        let v = vec![0.0; 4];
        let s = reduce(&u, &v, &w, 0.0);
        assert_relative_eq!(s.stress[1], -1.25);
        assert_relative_eq!(s.stress[0], 0.0);
    }

    #[test]
    fn test_ti_sentinel_boundary() {
        let n = 8;
        let v = vec![0.0; n];
        let w = vec![0.0; n];

        // exactly at threshold: defined
        let s = reduce(&vec![0.7; n], &v, &w, 0.7);
        assert!(!s.turb_intensity.is_nan());

        // epsilon below threshold: sentinel
        let s = reduce(&vec![0.7 - 1e-9; n], &v, &w, 0.7);
        assert!(s.turb_intensity.is_nan());

        // epsilon above threshold: defined
        let s = reduce(&vec![0.7 + 1e-9; n], &v, &w, 0.7);
        assert!(!s.turb_intensity.is_nan());
    }

    #[test]
    fn test_nan_samples_propagate() {
        let u = vec![1.0, f64::NAN, 1.0, 1.0];
        let v = vec![0.0; 4];
        let w = vec![0.0; 4];
        let s = reduce(&u, &v, &w, 0.7);
        assert!(s.mean_u.is_nan());
        assert!(s.u_mag.is_nan());
        assert!(s.sigma_uh.is_nan());
        assert!(s.turb_intensity.is_nan());
        assert!(s.tke[0].is_nan());
        assert!(s.stress[0].is_nan());
        // untouched channels stay defined
        assert!(!s.mean_w.is_nan());
    }
}

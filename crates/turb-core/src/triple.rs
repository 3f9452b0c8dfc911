//! Triple velocity products
//!
//! Third-order moments of the demeaned velocity components over one window:
//! entry `(i, j)` is `<u_i'^2 u_j'>`. The tensor is NOT symmetric: `(i, j)`
//! and `(j, i)` are different moments, so the ordered-pair layout matters.

use crate::series::Component;
use crate::stats::mean;
use serde::{Deserialize, Serialize};

/// Component-pair labels for the tensor entries, row `i` = squared
/// component, column `j` = linear component.
pub const TRIPLE_PRODUCT_LABELS: [[&str; 3]; 3] = [
    ["uuu", "uuv", "uuw"],
    ["vvu", "vvv", "vvw"],
    ["wwu", "wwv", "www"],
];

/// The 3x3 ordered triple-product tensor for one window (m^3/s^3).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TripleProducts(pub [[f64; 3]; 3]);

impl TripleProducts {
    /// Entry `<u_i'^2 u_j'>`.
    pub fn get(&self, i: Component, j: Component) -> f64 {
        self.0[i.index()][j.index()]
    }
}

/// Compute the triple-product tensor for one window.
///
/// Each channel is demeaned over the window first; channels must have equal
/// lengths (guaranteed by the orchestrator).
pub fn triple_products(u: &[f64], v: &[f64], w: &[f64]) -> TripleProducts {
    let channels = [u, v, w];
    let fluct: Vec<Vec<f64>> = channels
        .iter()
        .map(|c| {
            let m = mean(c);
            c.iter().map(|&x| x - m).collect()
        })
        .collect();

    let mut out = [[0.0; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, entry) in row.iter_mut().enumerate() {
            let sum: f64 = fluct[i]
                .iter()
                .zip(&fluct[j])
                .map(|(&fi, &fj)| fi * fi * fj)
                .sum();
            *entry = sum / u.len() as f64;
        }
    }
    TripleProducts(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hand_computed_window() {
        // fluctuations: u' = [-1, 0, 1], v' = [1, -1, 0], w' = 0
        let u = vec![1.0, 2.0, 3.0];
        let v = vec![2.0, 0.0, 1.0];
        let w = vec![5.0, 5.0, 5.0];
        let t = triple_products(&u, &v, &w);

        // <u'^2 u'> = (-1 + 0 + 1) / 3 = 0
        assert_relative_eq!(t.get(Component::U, Component::U), 0.0);
        // <u'^2 v'> = (1*1 + 0*(-1) + 1*0) / 3 = 1/3
        assert_relative_eq!(t.get(Component::U, Component::V), 1.0 / 3.0);
        // <v'^2 u'> = (1*(-1) + 1*0 + 0*1) / 3 = -1/3
        assert_relative_eq!(t.get(Component::V, Component::U), -1.0 / 3.0);
        // every entry touching w' is zero
        for c in Component::ALL {
            assert_relative_eq!(t.get(Component::W, c), 0.0);
            assert_relative_eq!(t.get(c, Component::W), 0.0);
        }
    }

    #[test]
    fn test_not_symmetric() {
        let u = vec![1.0, 2.0, 3.0, 0.0];
        let v = vec![0.0, 3.0, 1.0, 2.0];
        let w = vec![2.0, 2.0, 0.0, 0.0];
        let t = triple_products(&u, &v, &w);
        assert!(
            (t.get(Component::U, Component::V) - t.get(Component::V, Component::U)).abs() > 1e-12
        );
    }

    #[test]
    fn test_zero_mean_sinusoid() {
        // A pure zero-mean sinusoid has zero third moment over full periods.
        let n = 64;
        let u: Vec<f64> = (0..n)
            .map(|i| (2.0 * std::f64::consts::PI * 4.0 * i as f64 / n as f64).sin())
            .collect();
        let z = vec![0.0; n];
        let t = triple_products(&u, &z, &z);
        assert_relative_eq!(t.get(Component::U, Component::U), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_labels_layout() {
        assert_eq!(TRIPLE_PRODUCT_LABELS[0][1], "uuv");
        assert_eq!(TRIPLE_PRODUCT_LABELS[1][0], "vvu");
        assert_eq!(TRIPLE_PRODUCT_LABELS[2][2], "www");
    }
}

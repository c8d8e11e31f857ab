//! The Fasano–Franceschini statistic Dn.
//!
//! For each point of `s1` the four-way comparison yields the largest gap
//! between the orthant probabilities of `s1` and `s2`; `D1` is the largest of
//! those gaps, `D2` the same over points of `s2`, and
//!
//! ```text
//! Dn = sqrt(n1·n2 / (n1 + n2)) · (D1 + D2) / 2
//! ```
//!
//! Probabilities are compared exactly. No tolerance is applied.

use serde::{Deserialize, Serialize};

use super::orthant::{orthant_probabilities, OrthantProbabilities, SignMasks};
use crate::error::Result;
use crate::types::{ensure_same_dim, Sample};

/// Value of the test statistic together with its parts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistic {
    /// Scaled statistic Dn.
    pub dn: f64,
    /// Largest discrepancy over reference points drawn from `s1`.
    pub d1: f64,
    /// Largest discrepancy over reference points drawn from `s2`.
    pub d2: f64,
    /// Size of `s1`.
    pub n1: usize,
    /// Size of `s2`.
    pub n2: usize,
    /// Shared point dimension.
    pub dim: usize,
}

impl Statistic {
    /// Scale factor `sqrt(n1·n2 / (n1 + n2))`.
    pub fn scale(n1: usize, n2: usize) -> f64 {
        let (n1, n2) = (n1 as f64, n2 as f64);
        (n1 * n2 / (n1 + n2)).sqrt()
    }
}

/// Per-reference-point discrepancy: `max_k |a[i, k] - b[i, k]|` for each row `i`.
///
/// Both matrices must come from the same reference sample.
pub fn point_discrepancies(a: &OrthantProbabilities, b: &OrthantProbabilities) -> Vec<f64> {
    debug_assert_eq!(a.matrix().shape(), b.matrix().shape());

    a.matrix()
        .row_iter()
        .zip(b.matrix().row_iter())
        .map(|(ra, rb)| {
            ra.iter()
                .zip(rb.iter())
                .map(|(x, y)| (x - y).abs())
                .fold(0.0_f64, f64::max)
        })
        .collect()
}

/// Largest absolute difference between two probability matrices.
pub fn max_discrepancy(a: &OrthantProbabilities, b: &OrthantProbabilities) -> f64 {
    debug_assert_eq!(a.matrix().shape(), b.matrix().shape());

    a.matrix()
        .iter()
        .zip(b.matrix().iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0_f64, f64::max)
}

/// Compute the Fasano–Franceschini statistic for two samples.
///
/// # Errors
///
/// `DimensionMismatch` if the samples have different numbers of coordinates.
///
/// # Example
///
/// ```
/// use ff_test::{ff_statistic, Sample};
///
/// let s = Sample::from_rows(&[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]).unwrap();
/// assert_eq!(ff_statistic(&s, &s).unwrap().dn, 0.0);
/// ```
pub fn ff_statistic(s1: &Sample, s2: &Sample) -> Result<Statistic> {
    ensure_same_dim(s1, s2)?;
    let masks = SignMasks::new(s1.dim())?;

    // Both samples counted around both reference sets.
    let p11 = orthant_probabilities(s1, s1, &masks)?;
    let p21 = orthant_probabilities(s1, s2, &masks)?;
    let p12 = orthant_probabilities(s2, s1, &masks)?;
    let p22 = orthant_probabilities(s2, s2, &masks)?;

    let d1 = max_discrepancy(&p11, &p21);
    let d2 = max_discrepancy(&p12, &p22);
    let dn = Statistic::scale(s1.len(), s2.len()) * (d1 + d2) / 2.0;

    Ok(Statistic {
        dn,
        d1,
        d2,
        n1: s1.len(),
        n2: s2.len(),
        dim: s1.dim(),
    })
}

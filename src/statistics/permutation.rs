//! Label-permutation p-value for the Fasano–Franceschini statistic.
//!
//! Under H0 the labels "first sample" / "second sample" are exchangeable, so
//! the pooled points are repeatedly re-split into groups of the original
//! sizes and the statistic is recomputed on each split. Following Puritz et
//! al. (2023, eq. 6), the p-value is
//!
//! ```text
//! p = (#{T_i > Dn} + U · (1 + #{T_i = Dn})) / (1 + n_perms)
//! ```
//!
//! with a single `U ~ Uniform[0, 1)` per call. The randomized tie term keeps
//! the test exact for a discrete-valued statistic.
//!
//! All randomness comes from one caller-owned generator. Permutations are
//! drawn in order, a chunk at a time, and each chunk is evaluated before the
//! next is drawn; `U` is drawn last. Workers only see the materialized index
//! vectors, so the chunk size bounds memory without changing any result.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::statistic::ff_statistic;
use crate::error::Result;
use crate::parallel::map_ordered;
use crate::types::Sample;

/// Permutations drawn and evaluated per batch.
const PERMUTATION_CHUNK: usize = 256;

/// Outcome of a permutation test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermutationOutcome {
    /// Permutation p-value in `[0, 1]`.
    pub p_value: f64,
    /// Statistic under each permutation, in draw order.
    pub null_distribution: Vec<f64>,
    /// Number of permuted statistics strictly above the observed one.
    pub greater: usize,
    /// Number of permuted statistics equal to the observed one.
    pub ties: usize,
    /// Uniform draw used for the tie term.
    pub tie_break: f64,
}

/// Draw `n_perms` independent shuffles of `0..total`, in order.
pub fn draw_permutations<R: Rng + ?Sized>(
    total: usize,
    n_perms: usize,
    rng: &mut R,
) -> Vec<Vec<usize>> {
    (0..n_perms)
        .map(|_| {
            let mut indices: Vec<usize> = (0..total).collect();
            indices.shuffle(rng);
            indices
        })
        .collect()
}

/// Split `pooled` by a permutation: the first `n1` indices form the first
/// synthetic sample, the rest the second.
///
/// # Panics
///
/// Panics if `n1 > perm.len()` or an index is out of bounds.
pub fn split_permuted(pooled: &Sample, perm: &[usize], n1: usize) -> Result<(Sample, Sample)> {
    let (first, second) = perm.split_at(n1);
    Ok((pooled.select(first)?, pooled.select(second)?))
}

/// Count null values strictly greater than and equal to `observed`.
pub fn count_exceedances(observed: f64, null_distribution: &[f64]) -> (usize, usize) {
    null_distribution
        .iter()
        .fold((0, 0), |(greater, ties), &value| {
            if value > observed {
                (greater + 1, ties)
            } else if value == observed {
                (greater, ties + 1)
            } else {
                (greater, ties)
            }
        })
}

/// Randomized permutation p-value for a given tie-break draw `u ∈ [0, 1)`.
pub fn permutation_p_value(observed: f64, null_distribution: &[f64], u: f64) -> f64 {
    let (greater, ties) = count_exceedances(observed, null_distribution);
    (greater as f64 + u * (1 + ties) as f64) / (1 + null_distribution.len()) as f64
}

/// Run the permutation test for an observed statistic.
///
/// # Arguments
///
/// * `s1`, `s2` - The original samples (pooled in that order)
/// * `observed` - Dn computed on `(s1, s2)`
/// * `n_perms` - Number of permutations
/// * `workers` - Resolved worker count (1 = sequential)
/// * `rng` - Generator owned by the caller; consumed for permutations, then
///   for the tie-break draw
///
/// # Errors
///
/// Dimension mismatch between the samples, worker-pool construction, or any
/// failure inside a single permutation aborts the whole test.
pub fn permutation_test<R: Rng + ?Sized>(
    s1: &Sample,
    s2: &Sample,
    observed: f64,
    n_perms: usize,
    workers: usize,
    rng: &mut R,
) -> Result<PermutationOutcome> {
    permutation_test_chunked(s1, s2, observed, n_perms, workers, PERMUTATION_CHUNK, rng)
}

fn permutation_test_chunked<R: Rng + ?Sized>(
    s1: &Sample,
    s2: &Sample,
    observed: f64,
    n_perms: usize,
    workers: usize,
    chunk: usize,
    rng: &mut R,
) -> Result<PermutationOutcome> {
    let pooled = s1.concat(s2)?;
    let n1 = s1.len();

    let mut null_distribution = Vec::with_capacity(n_perms);
    let mut remaining = n_perms;
    while remaining > 0 {
        let batch = remaining.min(chunk);
        let permutations = draw_permutations(pooled.len(), batch, rng);
        let values = map_ordered(workers, &permutations, |perm| {
            let (a, b) = split_permuted(&pooled, perm, n1)?;
            Ok(ff_statistic(&a, &b)?.dn)
        })?;
        null_distribution.extend(values);
        remaining -= batch;
    }

    let tie_break: f64 = rng.random();
    let (greater, ties) = count_exceedances(observed, &null_distribution);
    let p_value = permutation_p_value(observed, &null_distribution, tie_break);

    tracing::debug!(
        n_perms,
        workers,
        greater,
        ties,
        p_value,
        "permutation test complete"
    );

    Ok(PermutationOutcome {
        p_value,
        null_distribution,
        greater,
        ties,
        tie_break,
    })
}

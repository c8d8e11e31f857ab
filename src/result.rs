//! Test result types.

use serde::{Deserialize, Serialize};

/// Complete result of a Fasano–Franceschini test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// Test statistic Dn.
    pub statistic: f64,

    /// Permutation p-value, `None` when the test ran with zero permutations.
    pub p_value: Option<f64>,

    /// Largest orthant discrepancy around points of the first sample.
    pub d1: f64,

    /// Largest orthant discrepancy around points of the second sample.
    pub d2: f64,

    /// Summary of the permutation null distribution.
    pub permutation: Option<PermutationSummary>,

    /// Metadata for debugging and reproducibility.
    pub metadata: Metadata,
}

impl TestResult {
    /// Whether H0 is rejected at level `alpha`.
    ///
    /// Always false when no p-value was computed.
    pub fn rejects_at(&self, alpha: f64) -> bool {
        self.p_value.is_some_and(|p| p < alpha)
    }
}

/// Counts from the permutation null distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermutationSummary {
    /// Number of permutations drawn.
    pub permutations: usize,
    /// Permuted statistics strictly above the observed Dn.
    pub greater: usize,
    /// Permuted statistics equal to the observed Dn.
    pub ties: usize,
    /// Uniform draw used for the randomized tie term.
    pub tie_break: f64,
}

/// Run metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Size of the first sample.
    pub n1: usize,
    /// Size of the second sample.
    pub n2: usize,
    /// Point dimension.
    pub dim: usize,
    /// Number of orthants, 2^d.
    pub orthants: usize,
    /// Resolved worker count.
    pub workers: usize,
    /// Seed, if the run was seeded.
    pub seed: Option<u64>,
    /// Wall-clock runtime in seconds.
    pub runtime_secs: f64,
}

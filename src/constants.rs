//! Crate-wide constants.

/// Default number of label permutations used for the p-value.
pub const DEFAULT_PERMUTATIONS: usize = 100;

/// Largest supported point dimension.
///
/// Each reference point owns a row of 2^d orthant probabilities, so the
/// matrices grow exponentially with d.
pub const MAX_DIMENSIONS: usize = 16;

/// Significance level used when a report has to call a result.
pub const REPORT_ALPHA: f64 = 0.05;

//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Errors raised while building samples or running the test.
///
/// Every variant is fatal to the call that produced it; there is no partial
/// or degraded result.
#[derive(Debug, Error)]
pub enum Error {
    /// The two samples do not have the same number of coordinates.
    #[error("samples have different numbers of dimensions: {left} vs {right}")]
    DimensionMismatch {
        /// Dimension of the first sample.
        left: usize,
        /// Dimension of the second sample.
        right: usize,
    },

    /// A sample contained no points.
    #[error("a sample must contain at least one point")]
    EmptySample,

    /// Points were given with zero coordinates.
    #[error("points must have at least one dimension")]
    ZeroDimensions,

    /// The orthant space 2^d is too large to enumerate.
    #[error("{dim} dimensions exceeds the supported maximum of {max}")]
    TooManyDimensions {
        /// Requested dimension.
        dim: usize,
        /// Largest supported dimension.
        max: usize,
    },

    /// A row had a different length than the first row.
    #[error("row {row} has {found} coordinates, expected {expected}")]
    RaggedRows {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },

    /// A flat buffer does not hold a whole number of points.
    #[error("buffer of length {len} is not a whole number of {dim}-dimensional points")]
    ShapeMismatch {
        /// Buffer length.
        len: usize,
        /// Requested dimension.
        dim: usize,
    },

    /// `Workers::Fixed(0)` was requested.
    #[error("worker count must be at least 1")]
    InvalidWorkers,

    /// The worker thread pool could not be created.
    #[cfg(feature = "parallel")]
    #[error("failed to build worker thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_message() {
        let err = Error::DimensionMismatch { left: 2, right: 3 };
        assert_eq!(
            err.to_string(),
            "samples have different numbers of dimensions: 2 vs 3"
        );
    }

    #[test]
    fn test_ragged_rows_message() {
        let err = Error::RaggedRows {
            row: 4,
            expected: 2,
            found: 1,
        };
        assert!(err.to_string().contains("row 4"));
    }
}

//! # ff-test
//!
//! Fasano–Franceschini two-sample test: a multivariate generalization of the
//! Kolmogorov–Smirnov test for whether two sets of d-dimensional points come
//! from the same distribution.
//!
//! The crate computes:
//! - The test statistic Dn from orthant probabilities around every point
//! - A permutation p-value with a randomized tie term (Puritz et al., 2023)
//! - Permutation statistics on a configurable number of workers, with
//!   results independent of the worker count
//!
//! ## Quick Start
//!
//! ```
//! use ff_test::{ff_statistic, FfTest, Sample};
//!
//! let s1 = Sample::from_rows(&[[0.0, 0.0], [1.0, 0.5], [0.3, 1.2], [0.8, 0.9]]).unwrap();
//! let s2 = Sample::from_rows(&[[3.0, 2.5], [2.4, 3.1], [2.9, 2.2]]).unwrap();
//!
//! // Statistic only
//! let stat = ff_statistic(&s1, &s2).unwrap();
//! assert!(stat.dn > 0.0);
//!
//! // Statistic and p-value, reproducible
//! let result = FfTest::new().permutations(100).seed(42).run(&s1, &s2).unwrap();
//! println!("Dn = {:.3}, p = {:.3}", result.statistic, result.p_value.unwrap());
//! ```
//!
//! ## References
//!
//! - Fasano, G. & Franceschini, A. (1987). A multidimensional version of the
//!   Kolmogorov–Smirnov test. MNRAS 225(1), 155–170.
//! - Puritz, C., Ness-Cohn, E. & Braun, R. (2023). fasano.franceschini.test:
//!   An Implementation of a Multivariate KS Test in R. The R Journal 15(3).

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod config;
mod constants;
mod error;
mod fftest;
mod result;
mod types;

// Functional modules
pub mod output;
pub mod parallel;
pub mod statistics;

// Re-exports for public API
pub use config::{Config, Workers};
pub use constants::{DEFAULT_PERMUTATIONS, MAX_DIMENSIONS, REPORT_ALPHA};
pub use error::{Error, Result};
pub use fftest::FfTest;
pub use result::{Metadata, PermutationSummary, TestResult};
pub use statistics::{ff_statistic, Statistic};
pub use types::{Matrix, Sample};

/// Run the test with default configuration.
///
/// Uses 100 permutations, a single worker, and an unseeded generator. Use
/// [`FfTest`] for any other setting.
///
/// # Errors
///
/// `DimensionMismatch` if the samples have different numbers of coordinates.
pub fn ff_test(s1: &Sample, s2: &Sample) -> Result<TestResult> {
    FfTest::new().run(s1, s2)
}

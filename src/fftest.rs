//! Main `FfTest` entry point and builder.

use std::time::Instant;

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::config::{Config, Workers};
use crate::error::Result;
use crate::result::{Metadata, PermutationSummary, TestResult};
use crate::statistics::{ff_statistic, permutation_test};
use crate::types::Sample;

/// Main entry point for the two-sample test.
///
/// Use the builder methods to configure a run.
///
/// # Example
///
/// ```
/// use ff_test::{FfTest, Sample, Workers};
///
/// let s1 = Sample::from_rows(&[[0.0, 0.1], [0.4, 0.9], [0.8, 0.3], [0.2, 0.6]]).unwrap();
/// let s2 = Sample::from_rows(&[[5.0, 5.2], [5.5, 5.1], [5.3, 5.9]]).unwrap();
///
/// let result = FfTest::new()
///     .permutations(200)
///     .workers(Workers::Fixed(2))
///     .seed(7)
///     .run(&s1, &s2)
///     .unwrap();
///
/// assert!(result.statistic > 0.0);
/// assert!(result.p_value.unwrap() <= 1.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FfTest {
    config: Config,
}

impl FfTest {
    /// Create with default configuration (100 permutations, 1 worker, unseeded).
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Create with reduced permutations for quick checks.
    ///
    /// Settings:
    /// - 20 permutations (vs 100 default)
    /// - automatic worker count
    pub fn quick() -> Self {
        Self {
            config: Config {
                permutations: 20,
                workers: Workers::Auto,
                ..Config::default()
            },
        }
    }

    /// Create from an existing configuration.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Set the number of permutations. Zero computes the statistic only.
    pub fn permutations(mut self, n: usize) -> Self {
        self.config.permutations = n;
        self
    }

    /// Set the worker count for permutation statistics.
    pub fn workers(mut self, workers: impl Into<Workers>) -> Self {
        self.config.workers = workers.into();
        self
    }

    /// Use one less than the available hardware parallelism.
    ///
    /// Shorthand for `.workers(Workers::Auto)`.
    pub fn auto_workers(self) -> Self {
        self.workers(Workers::Auto)
    }

    /// Set a deterministic seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the test on two samples.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the samples differ in dimension,
    /// `InvalidWorkers` for a zero worker count, and any failure raised while
    /// evaluating a permutation.
    pub fn run(&self, s1: &Sample, s2: &Sample) -> Result<TestResult> {
        let start_time = Instant::now();
        let workers = self.config.workers.resolve()?;

        let statistic = ff_statistic(s1, s2)?;
        tracing::debug!(
            n1 = statistic.n1,
            n2 = statistic.n2,
            dim = statistic.dim,
            dn = statistic.dn,
            "computed Fasano-Franceschini statistic"
        );

        let (p_value, permutation) = if self.config.permutations == 0 {
            (None, None)
        } else {
            let mut rng = match self.config.seed {
                Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
                None => Xoshiro256PlusPlus::from_rng(&mut rand::rng()),
            };
            let outcome = permutation_test(
                s1,
                s2,
                statistic.dn,
                self.config.permutations,
                workers,
                &mut rng,
            )?;

            let summary = PermutationSummary {
                permutations: self.config.permutations,
                greater: outcome.greater,
                ties: outcome.ties,
                tie_break: outcome.tie_break,
            };
            (Some(outcome.p_value), Some(summary))
        };

        Ok(TestResult {
            statistic: statistic.dn,
            p_value,
            d1: statistic.d1,
            d2: statistic.d2,
            permutation,
            metadata: Metadata {
                n1: statistic.n1,
                n2: statistic.n2,
                dim: statistic.dim,
                orthants: 1usize << statistic.dim,
                workers,
                seed: self.config.seed,
                runtime_secs: start_time.elapsed().as_secs_f64(),
            },
        })
    }
}

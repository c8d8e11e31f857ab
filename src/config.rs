//! Configuration for the Fasano–Franceschini test.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PERMUTATIONS;
use crate::error::{Error, Result};

/// Configuration options for [`FfTest`](crate::FfTest).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Number of label permutations for the p-value (default: 100).
    ///
    /// Zero skips the permutation test and only the statistic is reported.
    pub permutations: usize,

    /// Worker count for permutation statistics (default: `Fixed(1)`).
    pub workers: Workers,

    /// Optional deterministic seed for permutations and tie-breaking.
    ///
    /// When `None`, a fresh generator is seeded from the thread-local RNG and
    /// results are not reproducible.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            permutations: DEFAULT_PERMUTATIONS,
            workers: Workers::default(),
            seed: None,
        }
    }
}

/// Number of workers evaluating permutation statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Workers {
    /// One less than the available hardware parallelism, at least 1.
    Auto,

    /// Exactly N workers. `Fixed(1)` runs sequentially on the calling thread.
    Fixed(usize),
}

impl Default for Workers {
    fn default() -> Self {
        Self::Fixed(1)
    }
}

impl From<usize> for Workers {
    fn from(n: usize) -> Self {
        Self::Fixed(n)
    }
}

impl Workers {
    /// Resolve to a concrete worker count.
    ///
    /// # Errors
    ///
    /// `InvalidWorkers` for `Fixed(0)`.
    pub fn resolve(&self) -> Result<usize> {
        match self {
            Self::Auto => {
                let available = std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(1);
                Ok(available.saturating_sub(1).max(1))
            }
            Self::Fixed(0) => Err(Error::InvalidWorkers),
            Self::Fixed(n) => Ok(*n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.permutations, 100);
        assert_eq!(config.workers, Workers::Fixed(1));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_resolve_workers() {
        assert_eq!(Workers::Fixed(4).resolve().unwrap(), 4);
        assert!(matches!(Workers::Fixed(0).resolve(), Err(Error::InvalidWorkers)));

        let auto = Workers::Auto.resolve().unwrap();
        assert!(auto >= 1);
        if let Ok(n) = std::thread::available_parallelism() {
            assert!(auto <= n.get());
        }
    }

    #[test]
    fn test_from_usize() {
        assert_eq!(Workers::from(3), Workers::Fixed(3));
    }
}

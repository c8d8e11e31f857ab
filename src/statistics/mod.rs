//! Statistical core of the Fasano–Franceschini test:
//! - Orthant probabilities around reference points
//! - The Dn statistic built from them
//! - The label-permutation p-value

mod orthant;
mod permutation;
mod statistic;

pub use orthant::{orthant_probabilities, OrthantProbabilities, SignMasks};
pub use permutation::{
    count_exceedances, draw_permutations, permutation_p_value, permutation_test,
    split_permuted, PermutationOutcome,
};
pub use statistic::{ff_statistic, max_discrepancy, point_discrepancies, Statistic};

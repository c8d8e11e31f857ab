//! Orthant probabilities around reference points.
//!
//! For a reference point `p` and a sign mask `m ∈ {+1, -1}^d`, the orthant
//! probability of a sample `S` is the fraction of `x ∈ S` with
//! `m_j * x_j > m_j * p_j` for every coordinate `j`.
//!
//! ## Batched classification
//!
//! Testing each of the 2^d masks separately costs `O(2^d · n · d)` per
//! reference point. Instead, each pair `(p, x)` is classified once: the strict
//! comparison in coordinate `j` holds for exactly one sign (`+1` if
//! `x_j > p_j`, `-1` if `x_j < p_j`) and for none on a tie. So every pair
//! lands in at most one orthant, and a 2^d histogram per reference point
//! gives the whole probability row in `O(n · d + 2^d)`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{Matrix, Sample};

/// The 2^d orthant sign masks for dimension `d`.
///
/// Masks are ordered as the lexicographic product of `(+1, -1)` over the
/// coordinates, first coordinate most significant: mask 0 is all `+1` and
/// mask `2^d - 1` is all `-1`. Mask `k` has sign `-1` at coordinate `j` iff
/// bit `d - 1 - j` of `k` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignMasks {
    dim: usize,
}

impl SignMasks {
    /// Masks for `dim`-dimensional points.
    ///
    /// # Errors
    ///
    /// `ZeroDimensions` for `dim == 0` and `TooManyDimensions` above
    /// [`MAX_DIMENSIONS`](crate::MAX_DIMENSIONS), the same rule [`Sample`]
    /// applies.
    pub fn new(dim: usize) -> Result<Self> {
        crate::types::check_dim(dim)?;
        Ok(Self { dim })
    }

    /// Point dimension the masks apply to.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of masks, 2^d.
    pub fn len(&self) -> usize {
        1usize << self.dim
    }

    /// Always false; there is at least the all-positive mask.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Sign (`1.0` or `-1.0`) of `mask` at `coord`.
    pub fn sign(&self, mask: usize, coord: usize) -> f64 {
        if (mask >> (self.dim - 1 - coord)) & 1 == 1 {
            -1.0
        } else {
            1.0
        }
    }

    /// Materialize mask `k` as a sign vector.
    pub fn mask(&self, k: usize) -> Vec<f64> {
        (0..self.dim).map(|j| self.sign(k, j)).collect()
    }

    /// Iterate over all masks in order.
    pub fn iter(&self) -> impl Iterator<Item = Vec<f64>> + '_ {
        (0..self.len()).map(|k| self.mask(k))
    }
}

/// Orthant probabilities of one sample around the points of another.
///
/// Row `i` belongs to reference point `i`; column `k` to mask `k` of
/// [`SignMasks`].
#[derive(Debug, Clone, PartialEq)]
pub struct OrthantProbabilities {
    matrix: Matrix,
}

impl OrthantProbabilities {
    /// Underlying `(reference_len, 2^d)` matrix.
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Number of reference points.
    pub fn reference_len(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of masks.
    pub fn mask_count(&self) -> usize {
        self.matrix.ncols()
    }

    /// Probability for reference point `point` under mask `mask`.
    pub fn get(&self, point: usize, mask: usize) -> f64 {
        self.matrix[(point, mask)]
    }

    /// Consume into the underlying matrix.
    pub fn into_matrix(self) -> Matrix {
        self.matrix
    }
}

/// Orthant index of `point` relative to `reference`, or `None` on any tie.
///
/// The index follows [`SignMasks`] ordering.
#[inline]
pub(crate) fn orthant_index(reference: &[f64], point: &[f64]) -> Option<usize> {
    let mut index = 0usize;
    for (&p, &x) in reference.iter().zip(point) {
        index <<= 1;
        if x < p {
            index |= 1;
        } else if x.partial_cmp(&p) != Some(std::cmp::Ordering::Greater) {
            // Equal or unordered (NaN): no strict orthant contains x.
            return None;
        }
    }
    Some(index)
}

/// Compute orthant probabilities of `queried` around every point of `reference`.
///
/// # Arguments
///
/// * `reference` - Sample whose points anchor the orthants (matrix rows)
/// * `queried` - Sample whose points are counted
/// * `masks` - Sign masks for the shared dimension
///
/// # Returns
///
/// A `(reference.len(), 2^d)` matrix of fractions in `[0, 1]`.
///
/// # Errors
///
/// `DimensionMismatch` if the samples, or the masks, disagree on `d`.
pub fn orthant_probabilities(
    reference: &Sample,
    queried: &Sample,
    masks: &SignMasks,
) -> Result<OrthantProbabilities> {
    crate::types::ensure_same_dim(reference, queried)?;
    if masks.dim() != reference.dim() {
        return Err(Error::DimensionMismatch {
            left: reference.dim(),
            right: masks.dim(),
        });
    }

    let n_masks = masks.len();
    let n_queried = queried.len() as f64;

    // Row-major histogram: one row of 2^d counts per reference point.
    let mut counts = vec![0usize; reference.len() * n_masks];
    for (row, p) in counts.chunks_exact_mut(n_masks).zip(reference.points()) {
        for index in queried.points().filter_map(|x| orthant_index(p, x)) {
            row[index] += 1;
        }
    }

    let matrix = Matrix::from_row_iterator(
        reference.len(),
        n_masks,
        counts.into_iter().map(|c| c as f64 / n_queried),
    );

    Ok(OrthantProbabilities { matrix })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};

    /// Direct per-mask evaluation of the definition, used as a reference.
    fn naive_probabilities(reference: &Sample, queried: &Sample) -> Matrix {
        let masks = SignMasks::new(reference.dim()).unwrap();
        Matrix::from_fn(reference.len(), masks.len(), |i, k| {
            let p = reference.point(i);
            let m = masks.mask(k);
            let hits = queried
                .points()
                .filter(|x| (0..p.len()).all(|j| m[j] * x[j] > m[j] * p[j]))
                .count();
            hits as f64 / queried.len() as f64
        })
    }

    #[test]
    fn test_mask_ordering() {
        let masks = SignMasks::new(2).unwrap();
        let all: Vec<Vec<f64>> = masks.iter().collect();
        assert_eq!(
            all,
            vec![
                vec![1.0, 1.0],
                vec![1.0, -1.0],
                vec![-1.0, 1.0],
                vec![-1.0, -1.0],
            ]
        );
        assert_eq!(masks.len(), 4);
        assert_eq!(SignMasks::new(1).unwrap().len(), 2);
    }

    #[test]
    fn test_mask_dimension_bounds() {
        assert!(matches!(SignMasks::new(0), Err(Error::ZeroDimensions)));
        assert!(matches!(
            SignMasks::new(64),
            Err(Error::TooManyDimensions { dim: 64, .. })
        ));
        let widest = SignMasks::new(crate::MAX_DIMENSIONS).unwrap();
        assert_eq!(widest.len(), 1 << crate::MAX_DIMENSIONS);
        assert_eq!(widest.sign(widest.len() - 1, 0), -1.0);
    }

    #[test]
    fn test_orthant_index_ties() {
        assert_eq!(orthant_index(&[0.0, 0.0], &[1.0, 1.0]), Some(0));
        assert_eq!(orthant_index(&[0.0, 0.0], &[1.0, -1.0]), Some(1));
        assert_eq!(orthant_index(&[0.0, 0.0], &[-1.0, 1.0]), Some(2));
        assert_eq!(orthant_index(&[0.0, 0.0], &[-1.0, -1.0]), Some(3));
        assert_eq!(orthant_index(&[0.0, 0.0], &[0.0, 1.0]), None);
        assert_eq!(orthant_index(&[0.0, 0.0], &[f64::NAN, 1.0]), None);
    }

    #[test]
    fn test_diagonal_points() {
        let s = Sample::from_rows(&[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]).unwrap();
        let probs = orthant_probabilities(&s, &s, &SignMasks::new(2).unwrap()).unwrap();

        assert_eq!(probs.reference_len(), 3);
        assert_eq!(probs.mask_count(), 4);
        // Around (0,0): two points up-right, none elsewhere, itself tied.
        assert_eq!(probs.get(0, 0), 2.0 / 3.0);
        assert_eq!(probs.get(0, 3), 0.0);
        // Around (1,1): one up-right, one down-left.
        assert_eq!(probs.get(1, 0), 1.0 / 3.0);
        assert_eq!(probs.get(1, 3), 1.0 / 3.0);
        assert_eq!(probs.get(1, 1), 0.0);
        assert_eq!(probs.get(1, 2), 0.0);
    }

    #[test]
    fn test_matches_per_mask_definition() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for dim in 1..=4 {
            // Integer-valued coordinates force plenty of ties.
            let reference: Vec<Vec<f64>> = (0..25)
                .map(|_| (0..dim).map(|_| rng.random_range(0..5) as f64).collect())
                .collect();
            let queried: Vec<Vec<f64>> = (0..30)
                .map(|_| (0..dim).map(|_| rng.random_range(0..5) as f64).collect())
                .collect();
            let reference = Sample::from_rows(&reference).unwrap();
            let queried = Sample::from_rows(&queried).unwrap();

            let masks = SignMasks::new(dim).unwrap();
            let fast = orthant_probabilities(&reference, &queried, &masks).unwrap();
            assert_eq!(fast.matrix(), &naive_probabilities(&reference, &queried));
        }
    }

    #[test]
    fn test_rows_sum_to_at_most_one() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        let rows: Vec<[f64; 3]> = (0..40).map(|_| rng.random()).collect();
        let s = Sample::from_rows(&rows).unwrap();
        let probs = orthant_probabilities(&s, &s, &SignMasks::new(3).unwrap()).unwrap();

        for row in probs.matrix().row_iter() {
            let total: f64 = row.iter().sum();
            // Each row excludes at least the reference point itself.
            assert!(total <= 1.0 - 1.0 / 40.0 + 1e-12);
            assert!(row.iter().all(|&v| (0.0..=1.0).contains(&v)));
        }
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = Sample::from_rows(&[[0.0, 0.0]]).unwrap();
        let b = Sample::from_rows(&[[0.0, 0.0, 0.0]]).unwrap();
        assert!(matches!(
            orthant_probabilities(&a, &b, &SignMasks::new(2).unwrap()),
            Err(Error::DimensionMismatch { left: 2, right: 3 })
        ));
        assert!(matches!(
            orthant_probabilities(&a, &a, &SignMasks::new(3).unwrap()),
            Err(Error::DimensionMismatch { left: 2, right: 3 })
        ));
    }
}

//! Type aliases and the sample container.

use nalgebra::DMatrix;

use crate::constants::MAX_DIMENSIONS;
use crate::error::{Error, Result};

/// Dense `f64` matrix used for sample input and orthant probabilities.
pub type Matrix = DMatrix<f64>;

/// An ordered set of `n` points in `d` dimensions.
///
/// A `Sample` always holds at least one point of at least one coordinate,
/// so orthant fractions over it are well defined.
///
/// # Example
///
/// ```
/// use ff_test::Sample;
///
/// let s = Sample::from_rows(&[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]).unwrap();
/// assert_eq!(s.len(), 3);
/// assert_eq!(s.dim(), 2);
/// assert_eq!(s.point(1), &[1.0, 1.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    // d x n, column i is point i so each point is contiguous in storage.
    points: Matrix,
}

impl Sample {
    /// Build a sample from a row-major buffer of `len * dim` coordinates.
    pub fn from_flat(data: Vec<f64>, dim: usize) -> Result<Self> {
        check_dim(dim)?;
        if data.len() % dim != 0 {
            return Err(Error::ShapeMismatch {
                len: data.len(),
                dim,
            });
        }
        let len = data.len() / dim;
        if len == 0 {
            return Err(Error::EmptySample);
        }

        Ok(Self {
            points: Matrix::from_vec(dim, len, data),
        })
    }

    /// Build a sample from one slice per point.
    ///
    /// # Errors
    ///
    /// Fails on an empty slice list, on zero-length rows, and when rows have
    /// different lengths.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let dim = rows.first().ok_or(Error::EmptySample)?.as_ref().len();
        check_dim(dim)?;

        let mut data = Vec::with_capacity(rows.len() * dim);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != dim {
                return Err(Error::RaggedRows {
                    row,
                    expected: dim,
                    found: values.len(),
                });
            }
            data.extend_from_slice(values);
        }

        Self::from_flat(data, dim)
    }

    /// Build a sample from an `n x d` matrix whose rows are points.
    pub fn from_matrix(matrix: &Matrix) -> Result<Self> {
        check_dim(matrix.ncols())?;
        if matrix.nrows() == 0 {
            return Err(Error::EmptySample);
        }

        Ok(Self {
            points: matrix.transpose(),
        })
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.ncols()
    }

    /// Always false for a constructed sample.
    pub fn is_empty(&self) -> bool {
        self.points.ncols() == 0
    }

    /// Number of coordinates per point.
    pub fn dim(&self) -> usize {
        self.points.nrows()
    }

    /// Coordinates of point `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    pub fn point(&self, i: usize) -> &[f64] {
        let dim = self.dim();
        &self.points.as_slice()[i * dim..(i + 1) * dim]
    }

    /// Iterate over points in order.
    pub fn points(&self) -> std::slice::ChunksExact<'_, f64> {
        self.points.as_slice().chunks_exact(self.dim())
    }

    /// Copy into an `n x d` matrix whose rows are points.
    pub fn to_matrix(&self) -> Matrix {
        self.points.transpose()
    }

    /// Pool `self` followed by `other` into one sample, preserving order.
    pub fn concat(&self, other: &Sample) -> Result<Sample> {
        ensure_same_dim(self, other)?;

        let mut data = Vec::with_capacity((self.len() + other.len()) * self.dim());
        data.extend_from_slice(self.points.as_slice());
        data.extend_from_slice(other.points.as_slice());
        Self::from_flat(data, self.dim())
    }

    /// Gather the points at `indices`, in the given order.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds.
    pub fn select(&self, indices: &[usize]) -> Result<Sample> {
        let mut data = Vec::with_capacity(indices.len() * self.dim());
        for &i in indices {
            data.extend_from_slice(self.point(i));
        }
        Self::from_flat(data, self.dim())
    }
}

impl TryFrom<&Matrix> for Sample {
    type Error = Error;

    fn try_from(matrix: &Matrix) -> Result<Self> {
        Self::from_matrix(matrix)
    }
}

impl TryFrom<Vec<Vec<f64>>> for Sample {
    type Error = Error;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::from_rows(&rows)
    }
}

/// Fail with `DimensionMismatch` unless both samples share `d`.
pub(crate) fn ensure_same_dim(left: &Sample, right: &Sample) -> Result<()> {
    if left.dim() != right.dim() {
        return Err(Error::DimensionMismatch {
            left: left.dim(),
            right: right.dim(),
        });
    }
    Ok(())
}

pub(crate) fn check_dim(dim: usize) -> Result<()> {
    if dim == 0 {
        return Err(Error::ZeroDimensions);
    }
    if dim > MAX_DIMENSIONS {
        return Err(Error::TooManyDimensions {
            dim,
            max: MAX_DIMENSIONS,
        });
    }
    Ok(())
}

//! Square matrices: determinant, inverse and trace by cofactor expansion.
//!
//! Cofactor expansion costs `O(n!)`. It is used here for the small fixed
//! dimensions transform math needs (2, 3, 4) and must not be relied on for
//! larger systems.

use super::matrix::{Matrix, NumericContainer};
use crate::error::{MathError, Result};
use serde::{Deserialize, Serialize};

/// An `n x n` matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Matrix", into = "Matrix")]
pub struct SquareMatrix {
    inner: Matrix,
}

impl SquareMatrix {
    /// Zero-filled `n x n` matrix.
    pub fn zeros(n: usize) -> Self {
        Self {
            inner: Matrix::zeros(n, n),
        }
    }

    /// Identity matrix of dimension `n`.
    pub fn identity(n: usize) -> Self {
        let mut inner = Matrix::zeros(n, n);
        for i in 0..n {
            inner[(i, i)] = 1.0;
        }
        Self { inner }
    }

    /// Wrap a row-major buffer of `n * n` elements.
    pub fn from_vec(n: usize, data: Vec<f32>) -> Result<Self> {
        Ok(Self {
            inner: Matrix::from_vec(n, n, data)?,
        })
    }

    /// Build from fixed-width rows.
    pub fn from_rows<const N: usize>(rows: &[[f32; N]; N]) -> Self {
        Self {
            inner: Matrix::from_rows(rows),
        }
    }

    /// Dimension `n`.
    #[inline]
    pub fn dim(&self) -> usize {
        self.inner.rows()
    }

    /// Borrow the underlying matrix.
    #[inline]
    pub fn as_matrix(&self) -> &Matrix {
        &self.inner
    }

    /// Mutable access to the underlying matrix.
    ///
    /// Row operations keep the matrix square, so handing this out cannot
    /// break the invariant.
    #[inline]
    pub fn as_matrix_mut(&mut self) -> &mut Matrix {
        &mut self.inner
    }

    /// Unwrap into the underlying matrix.
    #[inline]
    pub fn into_matrix(self) -> Matrix {
        self.inner
    }

    /// Determinant by cofactor expansion along the first row.
    pub fn determinant(&self) -> f32 {
        determinant(self.inner.as_slice(), self.dim())
    }

    /// Inverse as the adjugate over the determinant.
    ///
    /// Fails with [`MathError::Singular`] when the determinant is zero or not
    /// finite.
    pub fn inverse(&self) -> Result<Self> {
        let n = self.dim();
        let data = inverse(self.inner.as_slice(), n)?;
        Self::from_vec(n, data)
    }

    /// Sum of the diagonal.
    pub fn trace(&self) -> f32 {
        trace(self.inner.as_slice(), self.dim())
    }
}

impl NumericContainer for SquareMatrix {
    #[inline]
    fn rows(&self) -> usize {
        self.inner.rows()
    }

    #[inline]
    fn cols(&self) -> usize {
        self.inner.cols()
    }

    #[inline]
    fn as_slice(&self) -> &[f32] {
        self.inner.as_slice()
    }
}

impl TryFrom<Matrix> for SquareMatrix {
    type Error = MathError;

    fn try_from(inner: Matrix) -> Result<Self> {
        if inner.rows() != inner.cols() {
            return Err(MathError::NotSquare {
                rows: inner.rows(),
                cols: inner.cols(),
            });
        }
        Ok(Self { inner })
    }
}

impl From<SquareMatrix> for Matrix {
    fn from(m: SquareMatrix) -> Self {
        m.inner
    }
}

/// Sign of the cofactor at `(i, j)`: `(-1)^(i + j)`.
#[inline]
fn cofactor_sign(i: usize, j: usize) -> f32 {
    if (i + j) % 2 == 0 {
        1.0
    } else {
        -1.0
    }
}

/// Copy of an `n x n` row-major buffer with one row and column removed.
fn minor(data: &[f32], n: usize, row: usize, col: usize) -> Vec<f32> {
    let mut out = Vec::with_capacity((n - 1) * (n - 1));
    for i in (0..n).filter(|&i| i != row) {
        for j in (0..n).filter(|&j| j != col) {
            out.push(data[i * n + j]);
        }
    }
    out
}

/// Determinant of an `n x n` row-major buffer.
pub(crate) fn determinant(data: &[f32], n: usize) -> f32 {
    match n {
        0 => 1.0,
        1 => data[0],
        2 => data[0] * data[3] - data[1] * data[2],
        _ => (0..n)
            .map(|i| cofactor_sign(0, i) * data[i] * determinant(&minor(data, n, 0, i), n - 1))
            .sum(),
    }
}

/// Inverse of an `n x n` row-major buffer.
pub(crate) fn inverse(data: &[f32], n: usize) -> Result<Vec<f32>> {
    let det = determinant(data, n);
    if det == 0.0 || !det.is_finite() {
        log::debug!("Rejecting inverse of {n}x{n} matrix with determinant {det}");
        return Err(MathError::Singular { determinant: det });
    }

    if n == 1 {
        return Ok(vec![1.0 / det]);
    }

    let inv_det = 1.0 / det;
    let mut out = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            let cofactor = cofactor_sign(i, j) * determinant(&minor(data, n, i, j), n - 1);
            // Adjugate is the transposed cofactor matrix.
            out[j * n + i] = cofactor * inv_det;
        }
    }
    Ok(out)
}

/// Trace of an `n x n` row-major buffer.
pub(crate) fn trace(data: &[f32], n: usize) -> f32 {
    (0..n).map(|i| data[i * n + i]).sum()
}

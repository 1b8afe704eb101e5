//! Dynamically sized row-major matrices.
//!
//! [`Matrix`] owns its buffer, [`MatrixView`] borrows one. Both, and every
//! fixed-size type in this module tree, implement [`NumericContainer`], which
//! supplies the shared arithmetic.

use super::scalar::Epsilon;
use super::Vector;
use crate::error::{MathError, Result};
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut, Neg};

/// A rectangular block of `f32` values stored row-major.
///
/// `as_slice()[row * cols() + col]` is element `(row, col)`, and the slice
/// length always equals `rows() * cols()`.
pub trait NumericContainer {
    /// Number of rows.
    fn rows(&self) -> usize;

    /// Number of columns.
    fn cols(&self) -> usize;

    /// Elements in row-major order.
    fn as_slice(&self) -> &[f32];

    /// `(rows, cols)`.
    #[inline]
    fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    /// Total number of elements.
    #[inline]
    fn len(&self) -> usize {
        self.rows() * self.cols()
    }

    /// Whether the container holds no elements.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checked element access.
    fn get(&self, row: usize, col: usize) -> Result<f32> {
        if row >= self.rows() || col >= self.cols() {
            return Err(MathError::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        Ok(self.as_slice()[row * self.cols() + col])
    }

    /// Borrow the elements as a view.
    #[inline]
    fn as_view(&self) -> MatrixView<'_> {
        MatrixView {
            rows: self.rows(),
            cols: self.cols(),
            data: self.as_slice(),
        }
    }

    /// Copy into an owned matrix.
    fn to_matrix(&self) -> Matrix {
        Matrix {
            rows: self.rows(),
            cols: self.cols(),
            data: self.as_slice().to_vec(),
        }
    }

    /// Same shape and every element equal within epsilon.
    fn equals<C: NumericContainer + ?Sized>(&self, other: &C) -> bool {
        self.shape() == other.shape()
            && self
                .as_slice()
                .iter()
                .zip(other.as_slice())
                .all(|(a, b)| a.equal(*b))
    }

    /// Elementwise sum.
    fn add<C: NumericContainer + ?Sized>(&self, other: &C) -> Result<Matrix> {
        zip_with(self, other, "add", |a, b| a + b)
    }

    /// Elementwise difference.
    fn sub<C: NumericContainer + ?Sized>(&self, other: &C) -> Result<Matrix> {
        zip_with(self, other, "sub", |a, b| a - b)
    }

    /// Multiply every element by `k`.
    fn mul_scalar(&self, k: f32) -> Matrix {
        Matrix {
            rows: self.rows(),
            cols: self.cols(),
            data: self.as_slice().iter().map(|v| v * k).collect(),
        }
    }

    /// Matrix product `self * other`.
    fn mul<C: NumericContainer + ?Sized>(&self, other: &C) -> Result<Matrix> {
        if self.cols() != other.rows() {
            return Err(MathError::ShapeMismatch {
                op: "mul",
                left: self.shape(),
                right: other.shape(),
            });
        }

        let (n, m, p) = (self.rows(), self.cols(), other.cols());
        let a = self.as_slice();
        let b = other.as_slice();
        let mut data = vec![0.0; n * p];

        for i in 0..n {
            for j in 0..p {
                let mut sum = 0.0;
                for k in 0..m {
                    sum += a[i * m + k] * b[k * p + j];
                }
                data[i * p + j] = sum;
            }
        }

        Ok(Matrix { rows: n, cols: p, data })
    }

    /// Product with a column vector.
    fn mul_vector(&self, v: &Vector) -> Result<Vector> {
        if self.cols() != v.len() {
            return Err(MathError::ShapeMismatch {
                op: "mul_vector",
                left: self.shape(),
                right: (v.len(), 1),
            });
        }

        let a = self.as_slice();
        let x = NumericContainer::as_slice(v);
        let c = self.cols();
        let data = (0..self.rows())
            .map(|row| a[row * c..(row + 1) * c].iter().zip(x).map(|(l, r)| l * r).sum())
            .collect();
        Ok(Vector::from_vec(data))
    }

    /// New matrix with rows and columns swapped.
    fn transpose(&self) -> Matrix {
        let (r, c) = self.shape();
        let a = self.as_slice();
        let mut data = Vec::with_capacity(r * c);
        for col in 0..c {
            for row in 0..r {
                data.push(a[row * c + col]);
            }
        }
        Matrix { rows: c, cols: r, data }
    }

    /// Copy with row `row` and column `col` removed.
    fn submatrix(&self, row: usize, col: usize) -> Result<Matrix> {
        let (r, c) = self.shape();
        if row >= r || col >= c {
            return Err(MathError::IndexOutOfBounds { row, col, rows: r, cols: c });
        }

        let data = self
            .as_slice()
            .chunks_exact(c)
            .enumerate()
            .filter(|(i, _)| *i != row)
            .flat_map(|(_, line)| {
                line.iter()
                    .enumerate()
                    .filter(move |(j, _)| *j != col)
                    .map(|(_, v)| *v)
            })
            .collect();

        Ok(Matrix {
            rows: r - 1,
            cols: c - 1,
            data,
        })
    }
}

/// Combine two same-shaped containers element by element.
fn zip_with<A, B, F>(a: &A, b: &B, op: &'static str, f: F) -> Result<Matrix>
where
    A: NumericContainer + ?Sized,
    B: NumericContainer + ?Sized,
    F: Fn(f32, f32) -> f32,
{
    if a.shape() != b.shape() {
        return Err(MathError::ShapeMismatch {
            op,
            left: a.shape(),
            right: b.shape(),
        });
    }
    Ok(Matrix {
        rows: a.rows(),
        cols: a.cols(),
        data: a
            .as_slice()
            .iter()
            .zip(b.as_slice())
            .map(|(x, y)| f(*x, *y))
            .collect(),
    })
}

/// An owned row-major matrix of arbitrary shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix")]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

#[derive(Deserialize)]
struct RawMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl TryFrom<RawMatrix> for Matrix {
    type Error = MathError;

    fn try_from(raw: RawMatrix) -> Result<Self> {
        Self::from_vec(raw.rows, raw.cols, raw.data)
    }
}

impl Matrix {
    /// Zero-filled matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Matrix with every element set to `value`.
    pub fn filled(rows: usize, cols: usize, value: f32) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Take ownership of a row-major buffer.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self> {
        check_len(rows, cols, data.len())?;
        Ok(Self { rows, cols, data })
    }

    /// Copy a row-major buffer.
    pub fn from_slice(rows: usize, cols: usize, data: &[f32]) -> Result<Self> {
        check_len(rows, cols, data.len())?;
        Ok(Self {
            rows,
            cols,
            data: data.to_vec(),
        })
    }

    /// Single-row matrix over `data`.
    pub fn row_vector(data: Vec<f32>) -> Self {
        Self {
            rows: 1,
            cols: data.len(),
            data,
        }
    }

    /// Build from fixed-width rows.
    pub fn from_rows<const C: usize>(rows: &[[f32; C]]) -> Self {
        Self {
            rows: rows.len(),
            cols: C,
            data: rows.iter().flatten().copied().collect(),
        }
    }

    /// Checked write.
    pub fn set(&mut self, row: usize, col: usize, value: f32) -> Result<()> {
        *self.get_mut(row, col)? = value;
        Ok(())
    }

    /// Checked mutable access.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Result<&mut f32> {
        if row >= self.rows || col >= self.cols {
            return Err(MathError::IndexOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(&mut self.data[row * self.cols + col])
    }

    /// Mutable elements in row-major order.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consume the matrix, returning its buffer.
    #[inline]
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Borrow one row.
    pub fn row(&self, row: usize) -> Result<&[f32]> {
        self.check_row(row)?;
        Ok(&self.data[row * self.cols..(row + 1) * self.cols])
    }

    /// Exchange two rows in place.
    pub fn swap_rows(&mut self, a: usize, b: usize) -> Result<&mut Self> {
        self.check_row(a)?;
        self.check_row(b)?;
        if a != b {
            let c = self.cols;
            let (lo, hi) = (a.min(b), a.max(b));
            let (head, tail) = self.data.split_at_mut(hi * c);
            head[lo * c..(lo + 1) * c].swap_with_slice(&mut tail[..c]);
        }
        Ok(self)
    }

    /// Multiply one row by `k` in place.
    pub fn scale_row(&mut self, row: usize, k: f32) -> Result<&mut Self> {
        self.check_row(row)?;
        let c = self.cols;
        for v in &mut self.data[row * c..(row + 1) * c] {
            *v *= k;
        }
        Ok(self)
    }

    /// Add `k` times row `src` to row `dst` in place.
    pub fn add_row(&mut self, src: usize, dst: usize, k: f32) -> Result<&mut Self> {
        self.check_row(src)?;
        self.check_row(dst)?;
        let c = self.cols;
        for j in 0..c {
            let v = self.data[src * c + j];
            self.data[dst * c + j] += k * v;
        }
        Ok(self)
    }

    fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.rows {
            return Err(MathError::IndexOutOfBounds {
                row,
                col: 0,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }
}

impl NumericContainer for Matrix {
    #[inline]
    fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

/// Panics when the index is out of range, like slice indexing.
impl Index<(usize, usize)> for Matrix {
    type Output = f32;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &mut self.data[row * self.cols + col]
    }
}

impl Neg for Matrix {
    type Output = Matrix;
    fn neg(mut self) -> Matrix {
        for v in &mut self.data {
            *v = -*v;
        }
        self
    }
}

/// A borrowed row-major matrix over someone else's buffer.
#[derive(Debug, Clone, Copy)]
pub struct MatrixView<'a> {
    rows: usize,
    cols: usize,
    data: &'a [f32],
}

impl<'a> MatrixView<'a> {
    /// View `data` as a `rows` x `cols` matrix without copying.
    pub fn new(rows: usize, cols: usize, data: &'a [f32]) -> Result<Self> {
        check_len(rows, cols, data.len())?;
        Ok(Self { rows, cols, data })
    }

    /// The borrowed buffer.
    #[inline]
    pub fn data(&self) -> &'a [f32] {
        self.data
    }
}

impl NumericContainer for MatrixView<'_> {
    #[inline]
    fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn as_slice(&self) -> &[f32] {
        self.data
    }
}

impl PartialEq for MatrixView<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

fn check_len(rows: usize, cols: usize, actual: usize) -> Result<()> {
    let expected = rows * cols;
    if expected != actual {
        return Err(MathError::BufferLength { expected, actual });
    }
    Ok(())
}

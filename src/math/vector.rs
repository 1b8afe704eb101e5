//! Dynamically sized row vector.

use super::matrix::{Matrix, MatrixView, NumericContainer};
use super::scalar::sqrt_f32;
use crate::error::{MathError, Result};
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut, Neg};

/// A 1xN vector owning its components.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector {
    data: Vec<f32>,
}

impl Vector {
    /// Zero vector of length `n`.
    pub fn zeros(n: usize) -> Self {
        Self { data: vec![0.0; n] }
    }

    /// Vector of length `n` with every component one.
    pub fn ones(n: usize) -> Self {
        Self { data: vec![1.0; n] }
    }

    /// Take ownership of the components.
    #[inline]
    pub fn from_vec(data: Vec<f32>) -> Self {
        Self { data }
    }

    /// Copy the components.
    #[inline]
    pub fn from_slice(data: &[f32]) -> Self {
        Self { data: data.to_vec() }
    }

    /// Number of components.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the vector has no components.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Checked component read.
    pub fn get(&self, i: usize) -> Result<f32> {
        self.data.get(i).copied().ok_or(MathError::IndexOutOfBounds {
            row: 0,
            col: i,
            rows: 1,
            cols: self.data.len(),
        })
    }

    /// Checked component write.
    pub fn set(&mut self, i: usize, value: f32) -> Result<()> {
        let cols = self.data.len();
        let slot = self.data.get_mut(i).ok_or(MathError::IndexOutOfBounds {
            row: 0,
            col: i,
            rows: 1,
            cols,
        })?;
        *slot = value;
        Ok(())
    }

    /// Components as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Components as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Dot product. Lengths must match.
    pub fn dot(&self, other: &Vector) -> Result<f32> {
        if self.len() != other.len() {
            return Err(MathError::ShapeMismatch {
                op: "dot",
                left: (1, self.len()),
                right: (1, other.len()),
            });
        }
        Ok(self.data.iter().zip(&other.data).map(|(a, b)| a * b).sum())
    }

    /// Euclidean norm, `sqrt(dot(v, v))`.
    pub fn norm(&self) -> f32 {
        sqrt_f32(self.data.iter().map(|v| v * v).sum())
    }

    /// Divide every component by the norm, in place.
    ///
    /// Returns `self`; no new vector is produced. A zero vector is left
    /// unchanged.
    pub fn normalize(&mut self) -> &mut Self {
        let n = self.norm();
        if n > 0.0 {
            let inv = 1.0 / n;
            for v in &mut self.data {
                *v *= inv;
            }
        }
        self
    }

    /// Normalized copy.
    pub fn normalized(&self) -> Self {
        let mut v = self.clone();
        v.normalize();
        v
    }

    /// Componentwise sum.
    pub fn add(&self, other: &Vector) -> Result<Vector> {
        self.zip(other, "add", |a, b| a + b)
    }

    /// Componentwise difference.
    pub fn sub(&self, other: &Vector) -> Result<Vector> {
        self.zip(other, "sub", |a, b| a - b)
    }

    /// Scaled copy.
    pub fn scale(&self, k: f32) -> Vector {
        Self {
            data: self.data.iter().map(|v| v * k).collect(),
        }
    }

    /// Borrow as a 1xN matrix without copying.
    #[inline]
    pub fn as_matrix(&self) -> MatrixView<'_> {
        self.as_view()
    }

    /// Convert into an owned 1xN matrix, reusing the buffer.
    pub fn into_matrix(self) -> Matrix {
        Matrix::row_vector(self.data)
    }

    fn zip<F>(&self, other: &Vector, op: &'static str, f: F) -> Result<Vector>
    where
        F: Fn(f32, f32) -> f32,
    {
        if self.len() != other.len() {
            return Err(MathError::ShapeMismatch {
                op,
                left: (1, self.len()),
                right: (1, other.len()),
            });
        }
        Ok(Self {
            data: self.data.iter().zip(&other.data).map(|(a, b)| f(*a, *b)).collect(),
        })
    }
}

impl NumericContainer for Vector {
    #[inline]
    fn rows(&self) -> usize {
        1
    }

    #[inline]
    fn cols(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Index<usize> for Vector {
    type Output = f32;

    #[inline]
    fn index(&self, i: usize) -> &f32 {
        &self.data[i]
    }
}

impl IndexMut<usize> for Vector {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f32 {
        &mut self.data[i]
    }
}

impl Neg for Vector {
    type Output = Self;
    fn neg(mut self) -> Self {
        for v in &mut self.data {
            *v = -*v;
        }
        self
    }
}

impl From<Vec<f32>> for Vector {
    fn from(data: Vec<f32>) -> Self {
        Self { data }
    }
}

//! 3x3 Matrix implementation.

use super::matrix::NumericContainer;
use super::square_matrix::{self, SquareMatrix};
use super::{Matrix4, Quaternion, Vector2, Vector3};
use crate::error::{MathError, Result};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// A 3x3 matrix stored in row-major order.
/// Used for rotations, normal transformations and 2D homogeneous transforms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Matrix3 {
    /// Matrix elements in row-major order.
    /// [m00, m01, m02, m10, m11, m12, m20, m21, m22]
    pub elements: [f32; 9],
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix3 {
    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        elements: [
            1.0, 0.0, 0.0,
            0.0, 1.0, 0.0,
            0.0, 0.0, 1.0,
        ],
    };

    /// Zero matrix.
    pub const ZERO: Self = Self {
        elements: [0.0; 9],
    };

    /// Create a new Matrix3 from elements in row-major order.
    #[inline]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        m00: f32, m01: f32, m02: f32,
        m10: f32, m11: f32, m12: f32,
        m20: f32, m21: f32, m22: f32,
    ) -> Self {
        Self {
            elements: [
                m00, m01, m02,
                m10, m11, m12,
                m20, m21, m22,
            ],
        }
    }

    /// Build from three column vectors.
    pub fn from_cols(c0: &Vector3, c1: &Vector3, c2: &Vector3) -> Self {
        Self::new(
            c0.x, c1.x, c2.x,
            c0.y, c1.y, c2.y,
            c0.z, c1.z, c2.z,
        )
    }

    /// Create identity matrix.
    #[inline]
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Rotation of `angle` radians about `axis` (Rodrigues' formula).
    ///
    /// The axis is normalized first; a zero axis yields the identity.
    pub fn from_axis_angle(angle: f32, axis: &Vector3) -> Self {
        if axis.length_squared() == 0.0 {
            return Self::IDENTITY;
        }
        let k = axis.normalized();
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        let (x, y, z) = (k.x, k.y, k.z);

        Self::new(
            t * x * x + c,     t * x * y - s * z, t * x * z + s * y,
            t * x * y + s * z, t * y * y + c,     t * y * z - s * x,
            t * x * z - s * y, t * y * z + s * x, t * z * z + c,
        )
    }

    /// Create a rotation matrix from a quaternion.
    pub fn from_quaternion(q: &Quaternion) -> Self {
        q.to_matrix3()
    }

    /// Normal matrix of a model matrix: inverse transpose of its upper-left 3x3.
    pub fn from_matrix4_normal(m: &Matrix4) -> Result<Self> {
        Ok(m.upper_left().inverse()?.transpose())
    }

    /// Embed into the upper-left block of a 4x4 identity.
    pub fn to_matrix4(&self) -> Matrix4 {
        let e = &self.elements;
        Matrix4::new(
            e[0], e[1], e[2], 0.0,
            e[3], e[4], e[5], 0.0,
            e[6], e[7], e[8], 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Translate in 2D homogeneous coordinates: pre-multiplies by a
    /// translation matrix.
    pub fn translate(&mut self, v: &Vector2) -> &mut Self {
        let offsets = [v.x, v.y];
        for (row, offset) in offsets.iter().enumerate() {
            for col in 0..3 {
                self.elements[row * 3 + col] += offset * self.elements[6 + col];
            }
        }
        self
    }

    /// Return a translated copy.
    pub fn translated(&self, v: &Vector2) -> Self {
        let mut m = *self;
        m.translate(v);
        m
    }

    /// Rotate in the local frame: post-multiplies by the rotation of `angle`
    /// radians about `axis`.
    pub fn rotate(&mut self, angle: f32, axis: &Vector3) -> &mut Self {
        *self = self.multiply(&Self::from_axis_angle(angle, axis));
        self
    }

    /// Return a rotated copy.
    pub fn rotated(&self, angle: f32, axis: &Vector3) -> Self {
        let mut m = *self;
        m.rotate(angle, axis);
        m
    }

    /// Scale in the local frame: post-multiplies by a scale matrix.
    pub fn scale(&mut self, v: &Vector3) -> &mut Self {
        let factors = [v.x, v.y, v.z];
        for row in 0..3 {
            for (col, factor) in factors.iter().enumerate() {
                self.elements[row * 3 + col] *= factor;
            }
        }
        self
    }

    /// Return a scaled copy.
    pub fn scaled(&self, v: &Vector3) -> Self {
        let mut m = *self;
        m.scale(v);
        m
    }

    /// Multiply this matrix by another.
    pub fn multiply(&self, other: &Matrix3) -> Self {
        let a = &self.elements;
        let b = &other.elements;
        let mut out = [0.0; 9];

        for row in 0..3 {
            for col in 0..3 {
                out[row * 3 + col] = a[row * 3] * b[col]
                    + a[row * 3 + 1] * b[3 + col]
                    + a[row * 3 + 2] * b[6 + col];
            }
        }

        Self { elements: out }
    }

    /// Product with a column vector.
    pub fn mul_vector(&self, v: &Vector3) -> Vector3 {
        let e = &self.elements;
        Vector3 {
            x: e[0] * v.x + e[1] * v.y + e[2] * v.z,
            y: e[3] * v.x + e[4] * v.y + e[5] * v.z,
            z: e[6] * v.x + e[7] * v.y + e[8] * v.z,
        }
    }

    /// Calculate the determinant by cofactor expansion.
    pub fn determinant(&self) -> f32 {
        square_matrix::determinant(&self.elements, 3)
    }

    /// Return the inverse of this matrix.
    pub fn inverse(&self) -> Result<Self> {
        let data = square_matrix::inverse(&self.elements, 3)?;
        let mut elements = [0.0; 9];
        elements.copy_from_slice(&data);
        Ok(Self { elements })
    }

    /// Sum of the diagonal.
    pub fn trace(&self) -> f32 {
        square_matrix::trace(&self.elements, 3)
    }

    /// Return the transpose of this matrix.
    pub fn transpose(&self) -> Self {
        let mut m = *self;
        m.transpose_in_place();
        m
    }

    /// Transpose this matrix in place.
    pub fn transpose_in_place(&mut self) -> &mut Self {
        self.elements.swap(1, 3);
        self.elements.swap(2, 6);
        self.elements.swap(5, 7);
        self
    }

    /// Rows as nested arrays.
    pub fn rows_array(&self) -> [[f32; 3]; 3] {
        let e = &self.elements;
        [[e[0], e[1], e[2]], [e[3], e[4], e[5]], [e[6], e[7], e[8]]]
    }

    /// Copy into a dynamically sized square matrix.
    pub fn to_square(&self) -> SquareMatrix {
        SquareMatrix::from_rows(&self.rows_array())
    }

    /// Column-major array (GPU uniform layout).
    pub fn to_cols_array(&self) -> [f32; 9] {
        self.transpose().elements
    }

    /// Check if approximately equal.
    pub fn approx_eq(&self, other: &Matrix3, epsilon: f32) -> bool {
        self.elements
            .iter()
            .zip(other.elements.iter())
            .all(|(a, b)| (a - b).abs() < epsilon)
    }
}

impl NumericContainer for Matrix3 {
    #[inline]
    fn rows(&self) -> usize {
        3
    }

    #[inline]
    fn cols(&self) -> usize {
        3
    }

    #[inline]
    fn as_slice(&self) -> &[f32] {
        &self.elements
    }
}

impl TryFrom<&SquareMatrix> for Matrix3 {
    type Error = MathError;

    fn try_from(m: &SquareMatrix) -> Result<Self> {
        if m.dim() != 3 {
            return Err(MathError::ShapeMismatch {
                op: "Matrix3::try_from",
                left: (3, 3),
                right: m.shape(),
            });
        }
        let mut elements = [0.0; 9];
        elements.copy_from_slice(m.as_slice());
        Ok(Self { elements })
    }
}

/// `m[(row, col)]`; panics when out of range.
impl Index<(usize, usize)> for Matrix3 {
    type Output = f32;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        assert!(row < 3 && col < 3, "index ({row}, {col}) out of bounds for 3x3 matrix");
        &self.elements[row * 3 + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix3 {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        assert!(row < 3 && col < 3, "index ({row}, {col}) out of bounds for 3x3 matrix");
        &mut self.elements[row * 3 + col]
    }
}

impl std::ops::Mul for Matrix3 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl std::ops::Mul<Vector3> for Matrix3 {
    type Output = Vector3;
    fn mul(self, rhs: Vector3) -> Vector3 {
        self.mul_vector(&rhs)
    }
}

impl From<glam::Mat3> for Matrix3 {
    fn from(m: glam::Mat3) -> Self {
        Self {
            elements: m.to_cols_array(),
        }
        .transpose()
    }
}

impl From<Matrix3> for glam::Mat3 {
    fn from(m: Matrix3) -> Self {
        glam::Mat3::from_cols_array(&m.to_cols_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_rodrigues_matches_quaternion() {
        let axis = Vector3::new(1.0, 2.0, -0.5);
        let m = Matrix3::from_axis_angle(0.9, &axis);
        let q = Quaternion::from_axis_angle(0.9, &axis.normalized());
        assert!(m.approx_eq(&q.to_matrix3(), 1e-5));
    }

    #[test]
    fn test_rotation_determinant_is_one() {
        let m = Matrix3::from_axis_angle(1.3, &Vector3::new(0.2, -1.0, 0.4));
        assert!((m.determinant() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_inverse() {
        let m = Matrix3::new(2.0, 0.0, 1.0, 1.0, 3.0, 0.0, 0.0, 1.0, 4.0);
        let product = m * m.inverse().unwrap();
        assert!(product.approx_eq(&Matrix3::IDENTITY, 1e-5));
    }

    #[test]
    fn test_translate_2d() {
        let mut m = Matrix3::identity();
        m.translate(&Vector2::new(3.0, -2.0));
        let p = m.mul_vector(&Vector3::new(1.0, 1.0, 1.0));
        assert!(p.approx_eq(&Vector3::new(4.0, -1.0, 1.0), 1e-6));
    }

    #[test]
    fn test_rotate_and_scale() {
        let m = Matrix3::identity()
            .rotated(FRAC_PI_2, &Vector3::UNIT_Z)
            .scaled(&Vector3::new(3.0, 1.0, 1.0));
        let v = m.mul_vector(&Vector3::UNIT_X);
        assert!(v.approx_eq(&Vector3::new(0.0, 3.0, 0.0), 1e-6));
    }

    #[test]
    fn test_normal_matrix_of_rotation_is_rotation() {
        let model = Matrix4::from_axis_angle(0.4, &Vector3::UNIT_Y);
        let normal = Matrix3::from_matrix4_normal(&model).unwrap();
        assert!(normal.approx_eq(&model.upper_left(), 1e-5));
    }

    #[test]
    fn test_singular() {
        assert!(Matrix3::ZERO.inverse().is_err());
        assert!(Matrix3::from_matrix4_normal(&Matrix4::ZERO).is_err());
    }
}

//! 4x4 Matrix implementation.

use super::matrix::NumericContainer;
use super::square_matrix::{self, SquareMatrix};
use super::{Matrix3, Quaternion, Vector3, Vector4};
use crate::error::{MathError, Result};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// A 4x4 matrix stored in row-major order.
///
/// Used for 3D transformations (model, view, projection matrices). Points are
/// column vectors, so translation lives in the last column. Use
/// [`Matrix4::to_cols_array`] for GPU uniform uploads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Matrix4 {
    /// Matrix elements in row-major order.
    /// [m00, m01, m02, m03, m10, m11, m12, m13, m20, m21, m22, m23, m30, m31, m32, m33]
    pub elements: [f32; 16],
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4 {
    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        elements: [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Zero matrix.
    pub const ZERO: Self = Self {
        elements: [0.0; 16],
    };

    /// Create a new Matrix4 from elements in row-major order.
    #[inline]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        m00: f32, m01: f32, m02: f32, m03: f32,
        m10: f32, m11: f32, m12: f32, m13: f32,
        m20: f32, m21: f32, m22: f32, m23: f32,
        m30: f32, m31: f32, m32: f32, m33: f32,
    ) -> Self {
        Self {
            elements: [
                m00, m01, m02, m03,
                m10, m11, m12, m13,
                m20, m21, m22, m23,
                m30, m31, m32, m33,
            ],
        }
    }

    /// Create from a row-major array.
    #[inline]
    pub const fn from_rows_array(elements: [f32; 16]) -> Self {
        Self { elements }
    }

    /// Create from a column-major array.
    #[inline]
    pub fn from_cols_array(cols: &[f32; 16]) -> Self {
        Self { elements: *cols }.transpose()
    }

    /// Create identity matrix.
    #[inline]
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Extract the position (translation) component.
    #[inline]
    pub fn get_position(&self) -> Vector3 {
        let e = &self.elements;
        Vector3::new(e[3], e[7], e[11])
    }

    /// Create a translation matrix.
    pub fn from_translation(v: &Vector3) -> Self {
        Self::new(
            1.0, 0.0, 0.0, v.x,
            0.0, 1.0, 0.0, v.y,
            0.0, 0.0, 1.0, v.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Create a scale matrix.
    pub fn from_scale(v: &Vector3) -> Self {
        Self::new(
            v.x, 0.0, 0.0, 0.0,
            0.0, v.y, 0.0, 0.0,
            0.0, 0.0, v.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation of `angle` radians about `axis` (Rodrigues' formula).
    ///
    /// The axis is normalized first; a zero axis yields the identity.
    pub fn from_axis_angle(angle: f32, axis: &Vector3) -> Self {
        Matrix3::from_axis_angle(angle, axis).to_matrix4()
    }

    /// Create a rotation matrix from a quaternion.
    pub fn from_quaternion(q: &Quaternion) -> Self {
        q.to_matrix4()
    }

    /// Upper-left 3x3 block.
    pub fn upper_left(&self) -> Matrix3 {
        let e = &self.elements;
        Matrix3::new(
            e[0], e[1], e[2],
            e[4], e[5], e[6],
            e[8], e[9], e[10],
        )
    }

    /// Translate in world space: pre-multiplies by a translation matrix.
    ///
    /// For an affine matrix this adds `v` to the translation column.
    pub fn translate(&mut self, v: &Vector3) -> &mut Self {
        let offsets = [v.x, v.y, v.z];
        for (row, offset) in offsets.iter().enumerate() {
            for col in 0..4 {
                self.elements[row * 4 + col] += offset * self.elements[12 + col];
            }
        }
        self
    }

    /// Return a translated copy.
    pub fn translated(&self, v: &Vector3) -> Self {
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

    /// Post-multiply by the rotation of a quaternion.
    pub fn rotate_quaternion(&mut self, q: &Quaternion) -> &mut Self {
        *self = self.multiply(&q.to_matrix4());
        self
    }

    /// Scale in the local frame: post-multiplies by a scale matrix.
    pub fn scale(&mut self, v: &Vector3) -> &mut Self {
        let factors = [v.x, v.y, v.z];
        for row in 0..4 {
            for (col, factor) in factors.iter().enumerate() {
                self.elements[row * 4 + col] *= factor;
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
    pub fn multiply(&self, other: &Matrix4) -> Self {
        let a = &self.elements;
        let b = &other.elements;
        let mut out = [0.0; 16];

        for row in 0..4 {
            for col in 0..4 {
                out[row * 4 + col] = a[row * 4] * b[col]
                    + a[row * 4 + 1] * b[4 + col]
                    + a[row * 4 + 2] * b[8 + col]
                    + a[row * 4 + 3] * b[12 + col];
            }
        }

        Self { elements: out }
    }

    /// Pre-multiply this matrix by another.
    pub fn premultiply(&self, other: &Matrix4) -> Self {
        other.multiply(self)
    }

    /// Product with a column vector.
    pub fn mul_vector(&self, v: &Vector4) -> Vector4 {
        let e = &self.elements;
        Vector4 {
            x: e[0] * v.x + e[1] * v.y + e[2] * v.z + e[3] * v.w,
            y: e[4] * v.x + e[5] * v.y + e[6] * v.z + e[7] * v.w,
            z: e[8] * v.x + e[9] * v.y + e[10] * v.z + e[11] * v.w,
            w: e[12] * v.x + e[13] * v.y + e[14] * v.z + e[15] * v.w,
        }
    }

    /// Transform a Vector3 as a point (with translation and perspective divide).
    pub fn transform_point(&self, v: &Vector3) -> Vector3 {
        let r = self.mul_vector(&Vector4::from_vec3(*v, 1.0));
        r.xyz() * (1.0 / r.w)
    }

    /// Transform a Vector3 as a direction (without translation).
    pub fn transform_direction(&self, v: &Vector3) -> Vector3 {
        self.mul_vector(&Vector4::from_vec3(*v, 0.0)).xyz()
    }

    /// Calculate the determinant by cofactor expansion.
    pub fn determinant(&self) -> f32 {
        square_matrix::determinant(&self.elements, 4)
    }

    /// Return the inverse of this matrix.
    pub fn inverse(&self) -> Result<Self> {
        let data = square_matrix::inverse(&self.elements, 4)?;
        let mut elements = [0.0; 16];
        elements.copy_from_slice(&data);
        Ok(Self { elements })
    }

    /// Sum of the diagonal.
    pub fn trace(&self) -> f32 {
        square_matrix::trace(&self.elements, 4)
    }

    /// Return the transpose of this matrix.
    pub fn transpose(&self) -> Self {
        let mut m = *self;
        m.transpose_in_place();
        m
    }

    /// Transpose this matrix in place.
    pub fn transpose_in_place(&mut self) -> &mut Self {
        self.elements.swap(1, 4);
        self.elements.swap(2, 8);
        self.elements.swap(3, 12);
        self.elements.swap(6, 9);
        self.elements.swap(7, 13);
        self.elements.swap(11, 14);
        self
    }

    /// Copy into a dynamically sized square matrix.
    pub fn to_square(&self) -> SquareMatrix {
        SquareMatrix::from_rows(&self.rows_array())
    }

    /// Rows as nested arrays.
    pub fn rows_array(&self) -> [[f32; 4]; 4] {
        let e = &self.elements;
        [
            [e[0], e[1], e[2], e[3]],
            [e[4], e[5], e[6], e[7]],
            [e[8], e[9], e[10], e[11]],
            [e[12], e[13], e[14], e[15]],
        ]
    }

    /// Column-major array (GPU uniform layout).
    pub fn to_cols_array(&self) -> [f32; 16] {
        self.transpose().elements
    }

    /// Column-major 2D array (for GPU uniform buffers).
    pub fn to_cols_array_2d(&self) -> [[f32; 4]; 4] {
        self.transpose().rows_array()
    }

    /// Check if approximately equal to another matrix.
    pub fn approx_eq(&self, other: &Matrix4, epsilon: f32) -> bool {
        self.elements
            .iter()
            .zip(other.elements.iter())
            .all(|(a, b)| (a - b).abs() < epsilon)
    }
}

impl NumericContainer for Matrix4 {
    #[inline]
    fn rows(&self) -> usize {
        4
    }

    #[inline]
    fn cols(&self) -> usize {
        4
    }

    #[inline]
    fn as_slice(&self) -> &[f32] {
        &self.elements
    }
}

impl TryFrom<&SquareMatrix> for Matrix4 {
    type Error = MathError;

    fn try_from(m: &SquareMatrix) -> Result<Self> {
        if m.dim() != 4 {
            return Err(MathError::ShapeMismatch {
                op: "Matrix4::try_from",
                left: (4, 4),
                right: m.shape(),
            });
        }
        let mut elements = [0.0; 16];
        elements.copy_from_slice(m.as_slice());
        Ok(Self { elements })
    }
}

/// `m[(row, col)]`; panics when out of range.
impl Index<(usize, usize)> for Matrix4 {
    type Output = f32;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        assert!(row < 4 && col < 4, "index ({row}, {col}) out of bounds for 4x4 matrix");
        &self.elements[row * 4 + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix4 {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        assert!(row < 4 && col < 4, "index ({row}, {col}) out of bounds for 4x4 matrix");
        &mut self.elements[row * 4 + col]
    }
}

impl std::ops::Mul for Matrix4 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl std::ops::Mul<Vector4> for Matrix4 {
    type Output = Vector4;
    fn mul(self, rhs: Vector4) -> Vector4 {
        self.mul_vector(&rhs)
    }
}

impl std::ops::Mul<Vector3> for Matrix4 {
    type Output = Vector3;
    fn mul(self, rhs: Vector3) -> Vector3 {
        self.transform_point(&rhs)
    }
}

impl From<glam::Mat4> for Matrix4 {
    fn from(m: glam::Mat4) -> Self {
        Self::from_cols_array(&m.to_cols_array())
    }
}

impl From<Matrix4> for glam::Mat4 {
    fn from(m: Matrix4) -> Self {
        glam::Mat4::from_cols_array(&m.to_cols_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_identity() {
        let m = Matrix4::IDENTITY;
        let v = Vector3::new(1.0, 2.0, 3.0);
        let result = m.transform_point(&v);
        assert!(result.approx_eq(&v, 1e-6));
        assert_eq!(m.determinant(), 1.0);
        assert_eq!(m.trace(), 4.0);
    }

    #[test]
    fn test_translation() {
        let m = Matrix4::from_translation(&Vector3::new(10.0, 20.0, 30.0));
        let result = m.transform_point(&Vector3::ZERO);
        assert!(result.approx_eq(&Vector3::new(10.0, 20.0, 30.0), 1e-6));
        assert_eq!(m[(0, 3)], 10.0);
    }

    #[test]
    fn test_translate_is_world_space() {
        let mut m = Matrix4::identity();
        m.rotate(FRAC_PI_2, &Vector3::UNIT_Z);
        m.translate(&Vector3::new(1.0, 0.0, 0.0));
        assert!(m.get_position().approx_eq(&Vector3::new(1.0, 0.0, 0.0), 1e-6));
    }

    #[test]
    fn test_rotate() {
        let m = Matrix4::identity().rotated(FRAC_PI_2, &Vector3::UNIT_Z);
        let v = m.transform_direction(&Vector3::UNIT_X);
        assert!(v.approx_eq(&Vector3::UNIT_Y, 1e-6));
    }

    #[test]
    fn test_scale_is_local() {
        let m = Matrix4::identity()
            .rotated(FRAC_PI_2, &Vector3::UNIT_Z)
            .scaled(&Vector3::new(2.0, 1.0, 1.0));
        // Local x is scaled before rotation maps it onto world y.
        let v = m.transform_direction(&Vector3::UNIT_X);
        assert!(v.approx_eq(&Vector3::new(0.0, 2.0, 0.0), 1e-6));
    }

    #[test]
    fn test_inverse() {
        let m = Matrix4::from_translation(&Vector3::new(1.0, 2.0, 3.0))
            .rotated(0.7, &Vector3::new(1.0, 1.0, 0.0))
            .scaled(&Vector3::new(2.0, 3.0, 0.5));
        let inv = m.inverse().unwrap();
        let result = m.multiply(&inv);
        assert!(result.approx_eq(&Matrix4::IDENTITY, 1e-4));
    }

    #[test]
    fn test_inverse_singular() {
        assert!(matches!(Matrix4::ZERO.inverse(), Err(MathError::Singular { .. })));
    }

    #[test]
    fn test_square_roundtrip() {
        let m = Matrix4::from_translation(&Vector3::new(4.0, 5.0, 6.0));
        let sq = m.to_square();
        assert_eq!(sq.determinant(), m.determinant());
        assert_eq!(Matrix4::try_from(&sq).unwrap(), m);
        assert!(Matrix4::try_from(&SquareMatrix::identity(3)).is_err());
    }

    #[test]
    fn test_cols_array_layout() {
        let m = Matrix4::from_translation(&Vector3::new(7.0, 8.0, 9.0));
        let cols = m.to_cols_array();
        assert_eq!(&cols[12..15], &[7.0, 8.0, 9.0]);
        assert_eq!(Matrix4::from_cols_array(&cols), m);
    }

    #[test]
    fn test_glam_agrees() {
        let m = Matrix4::from_translation(&Vector3::new(1.0, 2.0, 3.0))
            .rotated(0.3, &Vector3::UNIT_Y);
        let g: glam::Mat4 = m.into();
        let p = g.transform_point3(glam::Vec3::new(1.0, 0.0, 0.0));
        let q = m.transform_point(&Vector3::UNIT_X);
        assert!(Vector3::from(p).approx_eq(&q, 1e-5));
    }
}

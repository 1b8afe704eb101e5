//! 4D Vector implementation.

use super::matrix::{MatrixView, NumericContainer};
use super::scalar::sqrt_f32;
use super::vector_ops::impl_vector_ops;
use super::Vector3;
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// A 4D vector with x, y, z, and w components.
///
/// Used for homogeneous coordinates. The layout is exactly `[f32; 4]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Vector4 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
    /// W component.
    pub w: f32,
}

impl Vector4 {
    /// Zero vector (0, 0, 0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 0.0 };
    /// One vector (1, 1, 1, 1).
    pub const ONE: Self = Self { x: 1.0, y: 1.0, z: 1.0, w: 1.0 };

    /// Create a new Vector4.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Vector with every component zero.
    #[inline]
    pub const fn zeros() -> Self {
        Self::ZERO
    }

    /// Vector with every component one.
    #[inline]
    pub const fn ones() -> Self {
        Self::ONE
    }

    /// Create from an array.
    #[inline]
    pub const fn from_array(a: [f32; 4]) -> Self {
        Self { x: a[0], y: a[1], z: a[2], w: a[3] }
    }

    /// Convert to an array.
    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Extend a Vector3 with a w component.
    #[inline]
    pub const fn from_vec3(v: Vector3, w: f32) -> Self {
        Self { x: v.x, y: v.y, z: v.z, w }
    }

    /// Get xyz components as Vector3.
    #[inline]
    pub const fn xyz(&self) -> Vector3 {
        Vector3 { x: self.x, y: self.y, z: self.z }
    }

    /// Components as a slice aliasing the fields.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        bytemuck::cast_ref::<Self, [f32; 4]>(self)
    }

    /// Mutable components aliasing the fields.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        bytemuck::cast_mut::<Self, [f32; 4]>(self)
    }

    /// Borrow as a 1x4 matrix.
    #[inline]
    pub fn as_matrix(&self) -> MatrixView<'_> {
        self.as_view()
    }

    /// Get the length of the vector.
    #[inline]
    pub fn length(&self) -> f32 {
        sqrt_f32(self.dot(self))
    }

    /// Alias for [`Vector4::length`].
    #[inline]
    pub fn norm(&self) -> f32 {
        self.length()
    }

    /// Normalize the vector in place and return it.
    #[inline]
    pub fn normalize(&mut self) -> &mut Self {
        let len = self.length();
        if len > 0.0 {
            let inv_len = 1.0 / len;
            self.x *= inv_len;
            self.y *= inv_len;
            self.z *= inv_len;
            self.w *= inv_len;
        }
        self
    }

    /// Return a normalized copy.
    #[inline]
    pub fn normalized(&self) -> Self {
        let mut v = *self;
        v.normalize();
        v
    }

    /// Dot product.
    #[inline]
    pub fn dot(&self, other: &Vector4) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Check if approximately equal.
    #[inline]
    pub fn approx_eq(&self, other: &Vector4, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
            && (self.w - other.w).abs() < epsilon
    }
}

impl_vector_ops!(Vector4, 4, { x, y, z, w });

impl From<glam::Vec4> for Vector4 {
    fn from(v: glam::Vec4) -> Self {
        Self { x: v.x, y: v.y, z: v.z, w: v.w }
    }
}

impl From<Vector4> for glam::Vec4 {
    fn from(v: Vector4) -> Self {
        glam::Vec4::new(v.x, v.y, v.z, v.w)
    }
}

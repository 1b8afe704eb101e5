//! 2D Vector implementation.

use super::matrix::{MatrixView, NumericContainer};
use super::scalar::sqrt_f32;
use super::vector_ops::impl_vector_ops;
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// A 2D vector with x and y components.
///
/// The layout is exactly `[f32; 2]`; [`Vector2::as_slice`] aliases the fields.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Vector2 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
}

impl Vector2 {
    /// Zero vector (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    /// One vector (1, 1).
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };
    /// Unit X vector (1, 0).
    pub const UNIT_X: Self = Self { x: 1.0, y: 0.0 };
    /// Unit Y vector (0, 1).
    pub const UNIT_Y: Self = Self { x: 0.0, y: 1.0 };

    /// Create a new Vector2.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Vector with both components zero.
    #[inline]
    pub const fn zeros() -> Self {
        Self::ZERO
    }

    /// Vector with both components one.
    #[inline]
    pub const fn ones() -> Self {
        Self::ONE
    }

    /// Create from an array.
    #[inline]
    pub const fn from_array(a: [f32; 2]) -> Self {
        Self { x: a[0], y: a[1] }
    }

    /// Convert to an array.
    #[inline]
    pub const fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }

    /// Components as a slice aliasing `x` and `y`.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        bytemuck::cast_ref::<Self, [f32; 2]>(self)
    }

    /// Mutable components aliasing `x` and `y`.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        bytemuck::cast_mut::<Self, [f32; 2]>(self)
    }

    /// Borrow as a 1x2 matrix.
    #[inline]
    pub fn as_matrix(&self) -> MatrixView<'_> {
        self.as_view()
    }

    /// Set the components of this vector.
    #[inline]
    pub fn set(&mut self, x: f32, y: f32) -> &mut Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Get the length (magnitude) of the vector.
    #[inline]
    pub fn length(&self) -> f32 {
        sqrt_f32(self.length_squared())
    }

    /// Alias for [`Vector2::length`].
    #[inline]
    pub fn norm(&self) -> f32 {
        self.length()
    }

    /// Get the squared length of the vector.
    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Normalize the vector in place.
    #[inline]
    pub fn normalize(&mut self) -> &mut Self {
        let len = self.length();
        if len > 0.0 {
            let inv_len = 1.0 / len;
            self.x *= inv_len;
            self.y *= inv_len;
        }
        self
    }

    /// Return a normalized copy of the vector.
    #[inline]
    pub fn normalized(&self) -> Self {
        let mut v = *self;
        v.normalize();
        v
    }

    /// Dot product with another vector.
    #[inline]
    pub fn dot(&self, other: &Vector2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (z component of the 3D cross product).
    #[inline]
    pub fn cross(&self, other: &Vector2) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Distance to another vector.
    #[inline]
    pub fn distance_to(&self, other: &Vector2) -> f32 {
        (*self - *other).length()
    }

    /// Check if approximately equal.
    #[inline]
    pub fn approx_eq(&self, other: &Vector2, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }
}

impl_vector_ops!(Vector2, 2, { x, y });

impl From<(f32, f32)> for Vector2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl From<glam::Vec2> for Vector2 {
    fn from(v: glam::Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Vector2> for glam::Vec2 {
    fn from(v: Vector2) -> Self {
        glam::Vec2::new(v.x, v.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let v = Vector2::new(1.0, 2.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
    }

    #[test]
    fn test_length() {
        let v = Vector2::new(3.0, 4.0);
        assert!((v.length() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize() {
        let mut v = Vector2::new(3.0, 4.0);
        v.normalize();
        assert!((v.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_slice_aliases_fields() {
        let mut v = Vector2::new(1.0, 2.0);
        assert_eq!(v.as_slice(), &[1.0, 2.0]);
        v.as_mut_slice()[1] = 7.0;
        assert_eq!(v.y, 7.0);
    }

    #[test]
    fn test_cross() {
        let a = Vector2::UNIT_X;
        let b = Vector2::UNIT_Y;
        assert_eq!(a.cross(&b), 1.0);
        assert_eq!(b.cross(&a), -1.0);
    }
}

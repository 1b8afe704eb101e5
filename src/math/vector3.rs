//! 3D Vector implementation.

use super::matrix::{MatrixView, NumericContainer};
use super::scalar::sqrt_f32;
use super::vector_ops::impl_vector_ops;
use super::{Quaternion, Vector2};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// A 3D vector with x, y, and z components.
///
/// The layout is exactly `[f32; 3]`; [`Vector3::as_slice`] aliases the fields.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Vector3 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
}

impl Vector3 {
    /// Zero vector (0, 0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };
    /// One vector (1, 1, 1).
    pub const ONE: Self = Self { x: 1.0, y: 1.0, z: 1.0 };
    /// Unit X vector (1, 0, 0).
    pub const UNIT_X: Self = Self { x: 1.0, y: 0.0, z: 0.0 };
    /// Unit Y vector (0, 1, 0).
    pub const UNIT_Y: Self = Self { x: 0.0, y: 1.0, z: 0.0 };
    /// Unit Z vector (0, 0, 1).
    pub const UNIT_Z: Self = Self { x: 0.0, y: 0.0, z: 1.0 };

    /// Create a new Vector3.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Create a vector with all components set to the same value.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
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
    pub const fn from_array(a: [f32; 3]) -> Self {
        Self { x: a[0], y: a[1], z: a[2] }
    }

    /// Convert to an array.
    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Create from a Vector2 and a z component.
    #[inline]
    pub const fn from_vec2(v: Vector2, z: f32) -> Self {
        Self { x: v.x, y: v.y, z }
    }

    /// Get xy components as Vector2.
    #[inline]
    pub const fn xy(&self) -> Vector2 {
        Vector2 { x: self.x, y: self.y }
    }

    /// Components as a slice aliasing `x`, `y` and `z`.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        bytemuck::cast_ref::<Self, [f32; 3]>(self)
    }

    /// Mutable components aliasing `x`, `y` and `z`.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        bytemuck::cast_mut::<Self, [f32; 3]>(self)
    }

    /// Borrow as a 1x3 matrix.
    #[inline]
    pub fn as_matrix(&self) -> MatrixView<'_> {
        self.as_view()
    }

    /// Set the components of this vector.
    #[inline]
    pub fn set(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self
    }

    /// Get the length (magnitude) of the vector.
    #[inline]
    pub fn length(&self) -> f32 {
        sqrt_f32(self.length_squared())
    }

    /// Alias for [`Vector3::length`].
    #[inline]
    pub fn norm(&self) -> f32 {
        self.length()
    }

    /// Get the squared length of the vector.
    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Normalize the vector in place and return it.
    ///
    /// A zero vector is left unchanged.
    #[inline]
    pub fn normalize(&mut self) -> &mut Self {
        let len = self.length();
        if len > 0.0 {
            let inv_len = 1.0 / len;
            self.x *= inv_len;
            self.y *= inv_len;
            self.z *= inv_len;
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
    pub fn dot(&self, other: &Vector3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product with another vector.
    #[inline]
    pub fn cross(&self, other: &Vector3) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Distance to another vector.
    #[inline]
    pub fn distance_to(&self, other: &Vector3) -> f32 {
        (*self - *other).length()
    }

    /// Linear interpolation to another vector.
    #[inline]
    pub fn lerp(&self, other: &Vector3, t: f32) -> Self {
        *self + (*other - *self) * t
    }

    /// Get the angle to another vector in radians.
    #[inline]
    pub fn angle_to(&self, other: &Vector3) -> f32 {
        let denominator = sqrt_f32(self.length_squared() * other.length_squared());
        if denominator == 0.0 {
            std::f32::consts::FRAC_PI_2
        } else {
            (self.dot(other) / denominator).clamp(-1.0, 1.0).acos()
        }
    }

    /// Project this vector onto another vector.
    #[inline]
    pub fn project(&self, onto: &Vector3) -> Self {
        let denom = onto.length_squared();
        if denom == 0.0 {
            Self::ZERO
        } else {
            *onto * (self.dot(onto) / denom)
        }
    }

    /// Rotate by a quaternion (`q * v * q^-1`).
    #[inline]
    pub fn apply_quaternion(&self, q: &Quaternion) -> Self {
        let qx = q.x;
        let qy = q.y;
        let qz = q.z;
        let qw = q.w;

        let ix = qw * self.x + qy * self.z - qz * self.y;
        let iy = qw * self.y + qz * self.x - qx * self.z;
        let iz = qw * self.z + qx * self.y - qy * self.x;
        let iw = -qx * self.x - qy * self.y - qz * self.z;

        Self {
            x: ix * qw + iw * -qx + iy * -qz - iz * -qy,
            y: iy * qw + iw * -qy + iz * -qx - ix * -qz,
            z: iz * qw + iw * -qz + ix * -qy - iy * -qx,
        }
    }

    /// Component-wise multiplication.
    #[inline]
    pub fn multiply(&self, other: &Vector3) -> Self {
        Self {
            x: self.x * other.x,
            y: self.y * other.y,
            z: self.z * other.z,
        }
    }

    /// Check if the vector is approximately equal to another.
    #[inline]
    pub fn approx_eq(&self, other: &Vector3, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
    }
}

impl_vector_ops!(Vector3, 3, { x, y, z });

impl From<(f32, f32, f32)> for Vector3 {
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Self { x, y, z }
    }
}

impl From<glam::Vec3> for Vector3 {
    fn from(v: glam::Vec3) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

impl From<Vector3> for glam::Vec3 {
    fn from(v: Vector3) -> Self {
        glam::Vec3::new(v.x, v.y, v.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_unit_axes() {
        let z = Vector3::UNIT_X.cross(&Vector3::UNIT_Y);
        assert_eq!(z, Vector3::UNIT_Z);
    }

    #[test]
    fn test_cross_is_orthogonal() {
        let pairs = [
            (Vector3::new(1.0, 2.0, 3.0), Vector3::new(-4.0, 0.5, 2.0)),
            (Vector3::new(0.3, -0.7, 0.1), Vector3::new(2.0, 2.0, -1.0)),
            (Vector3::new(10.0, 0.0, -3.0), Vector3::new(0.0, 1.0, 0.0)),
        ];
        for (a, b) in pairs {
            let c = Vector3::cross(&a, &b);
            assert!(c.dot(&a).abs() < 1e-4);
            assert!(c.dot(&b).abs() < 1e-4);
        }
    }

    #[test]
    fn test_normalize_returns_self() {
        let mut v = Vector3::new(0.0, 0.0, 2.0);
        let n = v.normalize().z;
        assert_eq!(n, 1.0);
        assert_eq!(v, Vector3::UNIT_Z);
    }

    #[test]
    fn test_normalize_tiny_vector() {
        let v = Vector3::new(1e-8, 0.0, 0.0).normalized();
        assert!(v.approx_eq(&Vector3::UNIT_X, 1e-6));
        assert!((Vector3::new(3e-9, 4e-9, 0.0).length() - 5e-9).abs() < 1e-14);
    }

    #[test]
    fn test_slice_aliases_fields() {
        let mut v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(v.as_slice(), &[1.0, 2.0, 3.0]);
        v.as_mut_slice()[2] = -1.0;
        assert_eq!(v.z, -1.0);
        assert_eq!(v.as_matrix().get(0, 1).unwrap(), 2.0);
    }

    #[test]
    fn test_factories() {
        assert_eq!(Vector3::ones(), Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(Vector3::zeros(), Vector3::ZERO);
    }

    #[test]
    fn test_apply_quaternion() {
        let q = Quaternion::from_axis_angle(std::f32::consts::FRAC_PI_2, &Vector3::UNIT_Z);
        let v = Vector3::UNIT_X.apply_quaternion(&q);
        assert!(v.approx_eq(&Vector3::UNIT_Y, 1e-6));
    }
}

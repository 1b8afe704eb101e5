//! Quaternion implementation for rotations.
//!
//! Quaternions are stored as `(w, x, y, z)` with `w` the scalar part. Only
//! unit quaternions represent rotations; arithmetic does not renormalize, so
//! callers composing many increments should call [`Quaternion::normalize`].

use super::consts::EPSILON;
use super::scalar::{clamp, sqrt_f32};
use super::{EulerAngles, Matrix3, Matrix4, Vector3};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, MulAssign, Neg, Sub};

/// A quaternion representing a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Quaternion {
    /// W component (scalar).
    pub w: f32,
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    /// Identity quaternion (no rotation).
    pub const IDENTITY: Self = Self { w: 1.0, x: 0.0, y: 0.0, z: 0.0 };

    /// Create a new quaternion from its scalar and vector parts.
    #[inline]
    pub const fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    /// Identity quaternion.
    #[inline]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Create from an array `[w, x, y, z]`.
    #[inline]
    pub const fn from_array(a: [f32; 4]) -> Self {
        Self { w: a[0], x: a[1], y: a[2], z: a[3] }
    }

    /// Convert to an array `[w, x, y, z]`.
    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.w, self.x, self.y, self.z]
    }

    /// Vector part `(x, y, z)`.
    #[inline]
    pub const fn vector(&self) -> Vector3 {
        Vector3 { x: self.x, y: self.y, z: self.z }
    }

    /// Rotation of `angle` radians about `axis`.
    ///
    /// `axis` is expected to be unit length.
    pub fn from_axis_angle(angle: f32, axis: &Vector3) -> Self {
        let (s, c) = (angle * 0.5).sin_cos();
        Self {
            w: c,
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
        }
    }

    /// Angle (radians) and unit axis of this rotation.
    ///
    /// Near the identity, where `sin(angle / 2)` vanishes, the axis is
    /// arbitrary; `(0.0, Vector3::UNIT_X)` is returned.
    pub fn to_axis_angle(&self) -> (f32, Vector3) {
        let w = clamp(self.w, -1.0, 1.0);
        let angle = 2.0 * w.acos();
        let s = (angle * 0.5).sin();

        if s.abs() < EPSILON {
            log::trace!("Degenerate axis-angle for {self:?}; using x axis");
            return (0.0, Vector3::UNIT_X);
        }

        (angle, self.vector() / s)
    }

    /// Rotation angle in radians.
    #[inline]
    pub fn angle(&self) -> f32 {
        self.to_axis_angle().0
    }

    /// Rotation axis.
    #[inline]
    pub fn axis(&self) -> Vector3 {
        self.to_axis_angle().1
    }

    /// Create from Euler angles (pitch about x, yaw about y, roll about z).
    pub fn from_euler(euler: &EulerAngles) -> Self {
        let (sx, cx) = (euler.pitch * 0.5).sin_cos();
        let (sy, cy) = (euler.yaw * 0.5).sin_cos();
        let (sz, cz) = (euler.roll * 0.5).sin_cos();

        Self {
            w: cx * cy * cz + sx * sy * sz,
            x: sx * cy * cz - cx * sy * sz,
            y: cx * sy * cz + sx * cy * sz,
            z: cx * cy * sz - sx * sy * cz,
        }
    }

    /// Convert to Euler angles (pitch, yaw, roll).
    ///
    /// At gimbal lock (yaw of ±90°) the pitch and roll formulas degenerate to
    /// `atan2(0, 0)` and only their combination is defined. Pitch then falls
    /// back to `2 * atan2(x, w)` and roll is zero.
    pub fn to_euler(&self) -> EulerAngles {
        let Self { w, x, y, z } = *self;

        let yaw = clamp(-2.0 * (x * z - w * y), -1.0, 1.0).asin();

        let pitch_y = 2.0 * (y * z + w * x);
        let pitch_x = w * w - x * x - y * y + z * z;
        if pitch_x.abs() < EPSILON && pitch_y.abs() < EPSILON {
            log::trace!("Gimbal lock converting {self:?} to Euler angles");
            return EulerAngles::new(2.0 * x.atan2(w), yaw, 0.0);
        }

        let pitch = pitch_y.atan2(pitch_x);
        let roll = (2.0 * (x * y + w * z)).atan2(w * w + x * x - y * y - z * z);

        EulerAngles::new(pitch, yaw, roll)
    }

    /// Create from a rotation matrix using Shepperd's method.
    ///
    /// The largest of `4w² - 1`, `4x² - 1`, `4y² - 1` and `4z² - 1` is taken
    /// from the diagonal, so the division below is always by the biggest
    /// available component.
    pub fn from_matrix3(m: &Matrix3) -> Self {
        let e = &m.elements;
        let (m00, m01, m02) = (e[0], e[1], e[2]);
        let (m10, m11, m12) = (e[3], e[4], e[5]);
        let (m20, m21, m22) = (e[6], e[7], e[8]);

        let four_w = m00 + m11 + m22;
        let four_x = m00 - m11 - m22;
        let four_y = m11 - m00 - m22;
        let four_z = m22 - m00 - m11;

        let mut biggest = four_w;
        let mut index = 0;
        for (i, candidate) in [four_x, four_y, four_z].into_iter().enumerate() {
            if candidate > biggest {
                biggest = candidate;
                index = i + 1;
            }
        }

        let value = sqrt_f32(biggest + 1.0) * 0.5;
        let mult = 0.25 / value;

        match index {
            0 => Self {
                w: value,
                x: (m21 - m12) * mult,
                y: (m02 - m20) * mult,
                z: (m10 - m01) * mult,
            },
            1 => Self {
                w: (m21 - m12) * mult,
                x: value,
                y: (m10 + m01) * mult,
                z: (m02 + m20) * mult,
            },
            2 => Self {
                w: (m02 - m20) * mult,
                x: (m10 + m01) * mult,
                y: value,
                z: (m21 + m12) * mult,
            },
            _ => Self {
                w: (m10 - m01) * mult,
                x: (m02 + m20) * mult,
                y: (m21 + m12) * mult,
                z: value,
            },
        }
    }

    /// Create from the rotation block of a Matrix4.
    pub fn from_matrix4(m: &Matrix4) -> Self {
        Self::from_matrix3(&m.upper_left())
    }

    /// Create from an orthonormal basis.
    ///
    /// The resulting rotation maps the x, y and z axes onto `right`, `up`
    /// and `front` respectively.
    pub fn from_basis(front: &Vector3, up: &Vector3, right: &Vector3) -> Self {
        Self::from_matrix3(&Matrix3::from_cols(right, up, front))
    }

    /// 3x3 rotation matrix.
    pub fn to_matrix3(&self) -> Matrix3 {
        let Self { w, x, y, z } = *self;
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);

        Matrix3::new(
            1.0 - 2.0 * (yy + zz), 2.0 * (xy - wz), 2.0 * (xz + wy),
            2.0 * (xy + wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz - wx),
            2.0 * (xz - wy), 2.0 * (yz + wx), 1.0 - 2.0 * (xx + yy),
        )
    }

    /// 4x4 rotation matrix.
    pub fn to_matrix4(&self) -> Matrix4 {
        self.to_matrix3().to_matrix4()
    }

    /// Get the length of the quaternion.
    #[inline]
    pub fn length(&self) -> f32 {
        sqrt_f32(self.dot(self))
    }

    /// Normalize in place: divide every component by `sqrt(dot(q, q))`.
    #[inline]
    pub fn normalize(&mut self) -> &mut Self {
        let len = self.length();
        if len > 0.0 {
            let inv_len = 1.0 / len;
            self.w *= inv_len;
            self.x *= inv_len;
            self.y *= inv_len;
            self.z *= inv_len;
        }
        self
    }

    /// Return a normalized copy.
    #[inline]
    pub fn normalized(&self) -> Self {
        let mut q = *self;
        q.normalize();
        q
    }

    /// Conjugate (inverse for unit quaternions).
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self {
            w: self.w,
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }

    /// Multiplicative inverse: the conjugate divided by `dot(q, q)`.
    #[inline]
    pub fn inverse(&self) -> Self {
        self.conjugate().scale(1.0 / self.dot(self))
    }

    /// Dot product.
    #[inline]
    pub fn dot(&self, other: &Quaternion) -> f32 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Multiply every component by `s`.
    #[inline]
    pub fn scale(&self, s: f32) -> Self {
        Self {
            w: self.w * s,
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    /// Hamilton product `self * other`.
    pub fn multiply(&self, other: &Quaternion) -> Self {
        Self {
            w: self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
            x: self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
            y: self.w * other.y + self.y * other.w + self.z * other.x - self.x * other.z,
            z: self.w * other.z + self.z * other.w + self.x * other.y - self.y * other.x,
        }
    }

    /// Pre-multiply by another quaternion.
    pub fn premultiply(&self, other: &Quaternion) -> Self {
        other.multiply(self)
    }

    /// Rotate a vector by this quaternion.
    #[inline]
    pub fn rotate_vector(&self, v: &Vector3) -> Vector3 {
        v.apply_quaternion(self)
    }

    /// Normalized linear interpolation.
    pub fn lerp(&self, other: &Quaternion, t: f32) -> Self {
        let other = if self.dot(other) < 0.0 { -*other } else { *other };
        (*self * (1.0 - t) + other * t).normalized()
    }

    /// Spherical linear interpolation.
    pub fn slerp(&self, other: &Quaternion, t: f32) -> Self {
        if t == 0.0 {
            return *self;
        }
        if t == 1.0 {
            return *other;
        }

        let mut cos_half_theta = self.dot(other);
        let mut other = *other;

        // Take shorter path
        if cos_half_theta < 0.0 {
            other = -other;
            cos_half_theta = -cos_half_theta;
        }

        if cos_half_theta >= 1.0 {
            return *self;
        }

        let sin_half_theta = sqrt_f32(1.0 - cos_half_theta * cos_half_theta);

        if sin_half_theta.abs() < 0.001 {
            return self.lerp(&other, t);
        }

        let half_theta = cos_half_theta.acos();
        let ratio_a = ((1.0 - t) * half_theta).sin() / sin_half_theta;
        let ratio_b = (t * half_theta).sin() / sin_half_theta;

        *self * ratio_a + other * ratio_b
    }

    /// Check if approximately equal, component by component.
    #[inline]
    pub fn approx_eq(&self, other: &Quaternion, epsilon: f32) -> bool {
        (self.w - other.w).abs() < epsilon
            && (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
    }

    /// Whether both describe the same rotation (`q` or `-q`).
    #[inline]
    pub fn same_rotation(&self, other: &Quaternion, epsilon: f32) -> bool {
        self.approx_eq(other, epsilon) || self.approx_eq(&-*other, epsilon)
    }
}

impl Add for Quaternion {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            w: self.w + rhs.w,
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl Sub for Quaternion {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self + -rhs
    }
}

impl Neg for Quaternion {
    type Output = Self;
    fn neg(self) -> Self {
        self.scale(-1.0)
    }
}

impl Mul for Quaternion {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl Mul<f32> for Quaternion {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        self.scale(rhs)
    }
}

impl MulAssign for Quaternion {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(&rhs);
    }
}

impl Mul<Vector3> for Quaternion {
    type Output = Vector3;
    fn mul(self, rhs: Vector3) -> Vector3 {
        self.rotate_vector(&rhs)
    }
}

impl From<glam::Quat> for Quaternion {
    fn from(q: glam::Quat) -> Self {
        Self {
            w: q.w,
            x: q.x,
            y: q.y,
            z: q.z,
        }
    }
}

impl From<Quaternion> for glam::Quat {
    fn from(q: Quaternion) -> Self {
        glam::Quat::from_xyzw(q.x, q.y, q.z, q.w)
    }
}

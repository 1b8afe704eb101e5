//! Euler angles implementation.

use super::consts::{DEG2RAD, RAD2DEG};
use super::scalar::pow;
use super::{Quaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Euler angles in radians.
///
/// Rotations are applied about x (pitch), then y (yaw), then z (roll),
/// matching [`Quaternion::from_euler`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EulerAngles {
    /// Rotation around the X axis in radians.
    pub pitch: f32,
    /// Rotation around the Y axis in radians.
    pub yaw: f32,
    /// Rotation around the Z axis in radians.
    pub roll: f32,
}

impl EulerAngles {
    /// Zero rotation.
    pub const ZERO: Self = Self {
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
    };

    /// Create new Euler angles from radians.
    #[inline]
    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Create from angles in degrees.
    #[inline]
    pub fn from_degrees(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self {
            pitch: pitch * DEG2RAD,
            yaw: yaw * DEG2RAD,
            roll: roll * DEG2RAD,
        }
    }

    /// Set the components.
    #[inline]
    pub fn set(&mut self, pitch: f32, yaw: f32, roll: f32) -> &mut Self {
        self.pitch = pitch;
        self.yaw = yaw;
        self.roll = roll;
        self
    }

    /// Angles in degrees as `(pitch, yaw, roll)`.
    #[inline]
    pub fn to_degrees(&self) -> Vector3 {
        self.to_vector3() * RAD2DEG
    }

    /// Angles in degrees rounded to `decimals` places, for property panels.
    pub fn rounded_degrees(&self, decimals: i32) -> Vector3 {
        let factor = pow(10.0_f32, decimals);
        let round = |v: f32| (v * factor).round() / factor;
        let d = self.to_degrees();
        Vector3::new(round(d.x), round(d.y), round(d.z))
    }

    /// Create from a quaternion.
    #[inline]
    pub fn from_quaternion(q: &Quaternion) -> Self {
        q.to_euler()
    }

    /// Convert to a quaternion.
    #[inline]
    pub fn to_quaternion(&self) -> Quaternion {
        Quaternion::from_euler(self)
    }

    /// Convert to a Vector3 (pitch, yaw, roll).
    #[inline]
    pub const fn to_vector3(&self) -> Vector3 {
        Vector3 {
            x: self.pitch,
            y: self.yaw,
            z: self.roll,
        }
    }

    /// Create from a Vector3 (pitch, yaw, roll).
    #[inline]
    pub const fn from_vector3(v: &Vector3) -> Self {
        Self {
            pitch: v.x,
            yaw: v.y,
            roll: v.z,
        }
    }

    /// Check if approximately equal.
    #[inline]
    pub fn approx_eq(&self, other: &EulerAngles, epsilon: f32) -> bool {
        (self.pitch - other.pitch).abs() < epsilon
            && (self.yaw - other.yaw).abs() < epsilon
            && (self.roll - other.roll).abs() < epsilon
    }
}

impl From<Vector3> for EulerAngles {
    fn from(v: Vector3) -> Self {
        Self::from_vector3(&v)
    }
}

impl From<EulerAngles> for Vector3 {
    fn from(e: EulerAngles) -> Self {
        e.to_vector3()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quaternion_roundtrip() {
        let euler = EulerAngles::new(0.1, 0.2, 0.3);
        let q = euler.to_quaternion();
        let euler2 = EulerAngles::from_quaternion(&q);
        assert!(euler.approx_eq(&euler2, 1e-5));
    }

    #[test]
    fn test_degrees() {
        let euler = EulerAngles::from_degrees(90.0, -45.0, 0.0);
        assert!((euler.pitch - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert!(euler.to_degrees().approx_eq(&Vector3::new(90.0, -45.0, 0.0), 1e-4));
    }

    #[test]
    fn test_rounded_degrees() {
        let euler = EulerAngles::from_degrees(12.3456, 0.0004, -7.25);
        let rounded = euler.rounded_degrees(2);
        assert!(rounded.approx_eq(&Vector3::new(12.35, 0.0, -7.25), 1e-4));
    }

    #[test]
    fn test_vector_conversion() {
        let v = Vector3::new(0.5, 1.0, 1.5);
        let euler: EulerAngles = v.into();
        assert_eq!(euler.yaw, 1.0);
        assert_eq!(Vector3::from(euler), v);
    }
}

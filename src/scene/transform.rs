//! Transform component for scene objects.

use crate::error::{MathError, Result};
use crate::math::consts::EPSILON;
use crate::math::{EulerAngles, Matrix3, Matrix4, Quaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Position, orientation and scale of an object.
///
/// The orientation is kept as a unit quaternion and renormalized after every
/// incremental rotation. Directions are derived on demand from the world axes
/// [`Transform::FRONT`], [`Transform::UP`] and [`Transform::RIGHT`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    position: Vector3,
    orientation: Quaternion,
    scale: Vector3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::ZERO,
            orientation: Quaternion::IDENTITY,
            scale: Vector3::ONE,
        }
    }
}

impl Transform {
    /// World front axis.
    pub const FRONT: Vector3 = Vector3::UNIT_Z;
    /// World up axis.
    pub const UP: Vector3 = Vector3::UNIT_Y;
    /// World right axis.
    pub const RIGHT: Vector3 = Vector3::UNIT_X;

    /// Create a transform at `position` oriented by Euler angles.
    pub fn new(position: Vector3, euler: EulerAngles) -> Self {
        Self {
            position,
            orientation: Quaternion::from_euler(&euler).normalized(),
            scale: Vector3::ONE,
        }
    }

    /// Create a transform at `position` facing `front` with `up` as the
    /// approximate up direction.
    pub fn from_basis(position: Vector3, front: &Vector3, up: &Vector3) -> Result<Self> {
        let mut t = Self {
            position,
            ..Self::default()
        };
        t.set_front_up(front, up)?;
        Ok(t)
    }

    /// Get the position.
    #[inline]
    pub fn position(&self) -> Vector3 {
        self.position
    }

    /// Set the position.
    #[inline]
    pub fn set_position(&mut self, position: &Vector3) -> &mut Self {
        self.position = *position;
        self
    }

    /// Translate by a world-space offset.
    #[inline]
    pub fn translate(&mut self, offset: &Vector3) -> &mut Self {
        self.position += *offset;
        self
    }

    /// Move along the current front direction.
    pub fn move_forward(&mut self, distance: f32) -> &mut Self {
        self.position += self.get_front() * distance;
        self
    }

    /// Move against the current front direction.
    pub fn move_back(&mut self, distance: f32) -> &mut Self {
        self.move_forward(-distance)
    }

    /// Move along the current right direction.
    pub fn move_right(&mut self, distance: f32) -> &mut Self {
        self.position += self.get_right() * distance;
        self
    }

    /// Move against the current right direction.
    pub fn move_left(&mut self, distance: f32) -> &mut Self {
        self.move_right(-distance)
    }

    /// Move along the current up direction.
    pub fn move_up(&mut self, distance: f32) -> &mut Self {
        self.position += self.get_up() * distance;
        self
    }

    /// Move against the current up direction.
    pub fn move_down(&mut self, distance: f32) -> &mut Self {
        self.move_up(-distance)
    }

    /// Get the scale.
    #[inline]
    pub fn scale(&self) -> Vector3 {
        self.scale
    }

    /// Set the scale.
    #[inline]
    pub fn set_scale(&mut self, scale: &Vector3) -> &mut Self {
        self.scale = *scale;
        self
    }

    /// Get the orientation.
    #[inline]
    pub fn orientation(&self) -> Quaternion {
        self.orientation
    }

    /// Set the orientation. The quaternion is normalized on the way in.
    #[inline]
    pub fn set_orientation(&mut self, orientation: &Quaternion) -> &mut Self {
        self.orientation = orientation.normalized();
        self
    }

    /// Set the orientation from Euler angles.
    #[inline]
    pub fn set_euler(&mut self, euler: &EulerAngles) -> &mut Self {
        self.set_orientation(&Quaternion::from_euler(euler))
    }

    /// Orientation as Euler angles.
    #[inline]
    pub fn euler(&self) -> EulerAngles {
        self.orientation.to_euler()
    }

    /// Orient so the transform faces `front` with `up` as the approximate up
    /// direction.
    ///
    /// The two vectors need not be orthogonal; the basis is rebuilt by cross
    /// products. Fails when either vector is zero or the two are parallel
    /// to within [`EPSILON`].
    pub fn set_front_up(&mut self, front: &Vector3, up: &Vector3) -> Result<&mut Self> {
        let front = front.normalized();
        let right = up.normalized().cross(&front);
        if front.length() < EPSILON || right.length() < EPSILON {
            log::debug!("Rejected degenerate basis front={front:?} up={up:?}");
            return Err(MathError::InvalidArgument(
                "front must be non-zero and not parallel to up".to_string(),
            ));
        }
        let right = right.normalized();
        let up = front.cross(&right);

        self.orientation = Quaternion::from_basis(&front, &up, &right).normalized();
        Ok(self)
    }

    /// Face `target` from the current position.
    pub fn look_at(&mut self, target: &Vector3, up: &Vector3) -> Result<&mut Self> {
        let front = *target - self.position;
        self.set_front_up(&front, up)
    }

    /// Rotate about the right axis: the transform's own when `local`,
    /// otherwise the world's.
    pub fn rotate_x(&mut self, angle: f32, local: bool) -> &mut Self {
        let axis = if local { self.get_right() } else { Self::RIGHT };
        self.apply_rotation(angle, &axis)
    }

    /// Rotate about the up axis: the transform's own when `local`, otherwise
    /// the world's.
    pub fn rotate_y(&mut self, angle: f32, local: bool) -> &mut Self {
        let axis = if local { self.get_up() } else { Self::UP };
        self.apply_rotation(angle, &axis)
    }

    /// Rotate about the front axis: the transform's own when `local`,
    /// otherwise the world's.
    pub fn rotate_z(&mut self, angle: f32, local: bool) -> &mut Self {
        let axis = if local { self.get_front() } else { Self::FRONT };
        self.apply_rotation(angle, &axis)
    }

    /// Orbit `center` about the transform's own right axis.
    pub fn move_around_vertically(&mut self, center: &Vector3, angle: f32) -> &mut Self {
        let axis = self.get_right();
        self.orbit(center, angle, &axis)
    }

    /// Orbit `center` about the transform's own up axis.
    pub fn move_around_horizontally(&mut self, center: &Vector3, angle: f32) -> &mut Self {
        let axis = self.get_up();
        self.orbit(center, angle, &axis)
    }

    /// Current front direction.
    pub fn get_front(&self) -> Vector3 {
        self.orientation.rotate_vector(&Self::FRONT).normalized()
    }

    /// Current right direction.
    pub fn get_right(&self) -> Vector3 {
        self.orientation.rotate_vector(&Self::RIGHT).normalized()
    }

    /// Current up direction.
    pub fn get_up(&self) -> Vector3 {
        self.orientation.rotate_vector(&Self::UP).normalized()
    }

    /// Model matrix `T * R * S`.
    pub fn get_model_matrix(&self) -> Matrix4 {
        let mut m = Matrix4::identity();
        m.rotate_quaternion(&self.orientation)
            .scale(&self.scale)
            .translate(&self.position);
        m
    }

    /// Normal matrix: inverse transpose of the orientation's rotation.
    pub fn get_normal_matrix(&self) -> Result<Matrix3> {
        Ok(self.orientation.to_matrix3().inverse()?.transpose())
    }

    fn apply_rotation(&mut self, angle: f32, axis: &Vector3) -> &mut Self {
        let q = Quaternion::from_axis_angle(angle, axis);
        self.orientation = (q * self.orientation).normalized();
        self
    }

    fn orbit(&mut self, center: &Vector3, angle: f32, axis: &Vector3) -> &mut Self {
        let q = Quaternion::from_axis_angle(angle, axis);
        self.position = *center + q.rotate_vector(&(self.position - *center));
        self.orientation = (q * self.orientation).normalized();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_default_transform() {
        let t = Transform::default();
        assert!(t.position().approx_eq(&Vector3::ZERO, 1e-6));
        assert!(t.scale().approx_eq(&Vector3::ONE, 1e-6));
        assert!(t.get_model_matrix().approx_eq(&Matrix4::IDENTITY, 1e-6));
    }

    #[test]
    fn test_from_basis_reports_axes() {
        let t = Transform::from_basis(Vector3::ZERO, &Vector3::UNIT_Z, &Vector3::UNIT_Y).unwrap();
        assert!(t.get_front().approx_eq(&Vector3::new(0.0, 0.0, 1.0), 1e-5));
        assert!(t.get_up().approx_eq(&Vector3::new(0.0, 1.0, 0.0), 1e-5));
        assert!(t.get_right().approx_eq(&Vector3::new(1.0, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn test_set_front_up_orthogonalizes() {
        let mut t = Transform::default();
        t.set_front_up(&Vector3::new(0.0, 0.0, 2.0), &Vector3::new(0.0, 1.0, 1.0))
            .unwrap();
        assert!(t.get_front().approx_eq(&Vector3::UNIT_Z, 1e-5));
        assert!(t.get_up().approx_eq(&Vector3::UNIT_Y, 1e-5));
    }

    #[test]
    fn test_set_front_up_rejects_parallel() {
        let mut t = Transform::default();
        assert!(t.set_front_up(&Vector3::UNIT_Y, &Vector3::UNIT_Y).is_err());
        assert!(t.set_front_up(&Vector3::ZERO, &Vector3::UNIT_Y).is_err());
        assert_eq!(t.orientation(), Quaternion::IDENTITY);
    }

    #[test]
    fn test_set_front_up_rejects_nearly_parallel() {
        let mut t = Transform::default();
        let front = Vector3::new(1.0, 1e-7, 0.0);
        assert!(t.set_front_up(&front, &Vector3::UNIT_X).is_err());
        assert!(t.set_front_up(&Vector3::UNIT_Z, &Vector3::new(0.0, 0.0, 1e-3)).is_err());
        assert_eq!(t.orientation(), Quaternion::IDENTITY);

        t.set_front_up(&Vector3::UNIT_Z, &Vector3::new(0.0, 1e-3, 1.0)).unwrap();
        assert!(t.get_up().approx_eq(&Vector3::UNIT_Y, 1e-4));
    }

    #[test]
    fn test_repeated_rotation_stays_unit() {
        let mut t = Transform::default();
        for _ in 0..10_000 {
            t.rotate_y(0.001, true);
        }
        assert!((t.orientation().length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_rotate_world_axis() {
        let mut t = Transform::default();
        t.rotate_y(FRAC_PI_2, false);
        assert!(t.get_front().approx_eq(&Vector3::UNIT_X, 1e-5));
        assert!(t.get_right().approx_eq(&-Vector3::UNIT_Z, 1e-5));
    }

    #[test]
    fn test_rotate_local_axis() {
        let mut t = Transform::default();
        t.rotate_y(FRAC_PI_2, false);
        // Own right is now -Z; pitching about it tilts the front upward.
        t.rotate_x(-FRAC_PI_2, true);
        assert!(t.get_front().approx_eq(&Vector3::UNIT_Y, 1e-5));
    }

    #[test]
    fn test_move_along_front() {
        let mut t = Transform::default();
        t.rotate_y(FRAC_PI_2, false);
        t.move_forward(2.0).move_up(1.0).move_left(3.0);
        assert!(t.position().approx_eq(&Vector3::new(2.0, 1.0, 3.0), 1e-5));
    }

    #[test]
    fn test_model_matrix_order() {
        let mut t = Transform::default();
        t.set_position(&Vector3::new(1.0, 2.0, 3.0))
            .set_scale(&Vector3::splat(2.0))
            .rotate_y(FRAC_PI_2, false);

        let p = t.get_model_matrix().transform_point(&Vector3::UNIT_X);
        assert!(p.approx_eq(&Vector3::new(1.0, 2.0, 1.0), 1e-5));
    }

    #[test]
    fn test_model_matrix_matches_glam() {
        let mut t = Transform::new(Vector3::new(-1.0, 0.5, 4.0), EulerAngles::new(0.3, -0.7, 1.1));
        t.set_scale(&Vector3::new(1.0, 2.0, 3.0));

        let expected = glam::Mat4::from_scale_rotation_translation(
            t.scale().into(),
            t.orientation().into(),
            t.position().into(),
        );
        assert!(t.get_model_matrix().approx_eq(&expected.into(), 1e-5));
    }

    #[test]
    fn test_orbit_horizontally() {
        let mut t = Transform::default();
        t.set_position(&Vector3::new(0.0, 0.0, 5.0));
        t.move_around_horizontally(&Vector3::ZERO, FRAC_PI_2);
        assert!(t.position().approx_eq(&Vector3::new(5.0, 0.0, 0.0), 1e-4));
        assert!(t.get_front().approx_eq(&Vector3::UNIT_X, 1e-5));
    }

    #[test]
    fn test_orbit_vertically() {
        let mut t = Transform::default();
        t.set_position(&Vector3::new(0.0, 0.0, 5.0));
        t.move_around_vertically(&Vector3::ZERO, -FRAC_PI_2);
        assert!(t.position().approx_eq(&Vector3::new(0.0, 5.0, 0.0), 1e-4));
    }

    #[test]
    fn test_look_at() {
        let mut t = Transform::default();
        t.set_position(&Vector3::new(1.0, 0.0, 0.0));
        t.look_at(&Vector3::new(1.0, 0.0, -4.0), &Transform::UP).unwrap();
        assert!(t.get_front().approx_eq(&-Vector3::UNIT_Z, 1e-5));
        assert!(t.get_up().approx_eq(&Vector3::UNIT_Y, 1e-5));
    }

    #[test]
    fn test_normal_matrix_is_rotation() {
        let mut t = Transform::default();
        t.rotate_z(0.6, false).rotate_x(0.2, true);
        let normal = t.get_normal_matrix().unwrap();
        assert!(normal.approx_eq(&t.orientation().to_matrix3(), 1e-5));
    }

    #[test]
    fn test_euler_roundtrip() {
        let mut t = Transform::default();
        let euler = EulerAngles::new(0.2, -0.4, 0.9);
        t.set_euler(&euler);
        assert!(t.euler().approx_eq(&euler, 1e-5));
    }
}

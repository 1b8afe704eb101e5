//! Free geometry functions: angle conversion, distances, view and projection
//! matrices, basis repair and 2D point tests.
//!
//! Projections follow OpenGL clip-space conventions: right-handed eye space
//! looking down -Z, depth mapped to -1..1.

use super::consts::{DEG2RAD, RAD2DEG};
use super::scalar::{clamp, sign};
use super::{Matrix4, Quaternion, Vector2, Vector3};

/// Degrees to radians.
#[inline]
pub fn radians(degrees: f32) -> f32 {
    degrees * DEG2RAD
}

/// Radians to degrees.
#[inline]
pub fn degrees(radians: f32) -> f32 {
    radians * RAD2DEG
}

/// Degrees to radians, per component.
#[inline]
pub fn radians_vec3(v: &Vector3) -> Vector3 {
    *v * DEG2RAD
}

/// Radians to degrees, per component.
#[inline]
pub fn degrees_vec3(v: &Vector3) -> Vector3 {
    *v * RAD2DEG
}

/// Unit vector in the direction of `v`. The zero vector is returned as is.
#[inline]
pub fn normalize(v: &Vector3) -> Vector3 {
    v.normalized()
}

/// Unit quaternion: every component divided by `sqrt(dot(q, q))`.
#[inline]
pub fn normalize_quaternion(q: &Quaternion) -> Quaternion {
    q.normalized()
}

/// Distance from `p` to the infinite line through `a` and `b`.
///
/// When `a == b` the line degenerates to a point and the distance to `a` is
/// returned.
pub fn dist_point_line(p: &Vector3, a: &Vector3, b: &Vector3) -> f32 {
    let dir = *b - *a;
    let len = dir.length();
    if len == 0.0 {
        return p.distance_to(a);
    }
    (*p - *a).cross(&dir).length() / len
}

/// Distance from `p` to the segment `[a, b]`.
pub fn dist_point_line_segment(p: &Vector3, a: &Vector3, b: &Vector3) -> f32 {
    let dir = *b - *a;
    let len_sq = dir.length_squared();
    if len_sq == 0.0 {
        return p.distance_to(a);
    }
    let t = clamp((*p - *a).dot(&dir) / len_sq, 0.0, 1.0);
    p.distance_to(&(*a + dir * t))
}

/// Quaternion rotating by `angle` radians about the unit `axis`.
#[inline]
pub fn angle_axis(angle: f32, axis: &Vector3) -> Quaternion {
    Quaternion::from_axis_angle(angle, axis)
}

/// Right-handed view matrix looking from `eye` towards `center`.
pub fn look_at(eye: &Vector3, center: &Vector3, up: &Vector3) -> Matrix4 {
    let f = (*center - *eye).normalized();
    let s = f.cross(up).normalized();
    let u = s.cross(&f);

    Matrix4::new(
        s.x, s.y, s.z, -s.dot(eye),
        u.x, u.y, u.z, -u.dot(eye),
        -f.x, -f.y, -f.z, f.dot(eye),
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Perspective projection.
///
/// `fov_y` is the vertical field of view in radians. Callers must pass a
/// non-zero aspect and distinct near and far planes.
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Matrix4 {
    let tan_half_fov = (fov_y / 2.0).tan();
    let depth = far - near;

    let mut m = Matrix4::ZERO;
    m.elements[0] = 1.0 / (aspect * tan_half_fov);
    m.elements[5] = 1.0 / tan_half_fov;
    m.elements[10] = -(far + near) / depth;
    m.elements[11] = -(2.0 * far * near) / depth;
    m.elements[14] = -1.0;
    m
}

/// Orthographic projection of the box `[left, right] x [bottom, top]`
/// between `near` and `far`.
pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Matrix4 {
    let w = right - left;
    let h = top - bottom;
    let d = far - near;

    Matrix4::new(
        2.0 / w, 0.0, 0.0, -(right + left) / w,
        0.0, 2.0 / h, 0.0, -(top + bottom) / h,
        0.0, 0.0, -2.0 / d, -(far + near) / d,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Perspective projection of an off-center view frustum.
pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Matrix4 {
    let w = right - left;
    let h = top - bottom;
    let d = far - near;

    Matrix4::new(
        2.0 * near / w, 0.0, (right + left) / w, 0.0,
        0.0, 2.0 * near / h, (top + bottom) / h, 0.0,
        0.0, 0.0, -(far + near) / d, -(2.0 * far * near) / d,
        0.0, 0.0, -1.0, 0.0,
    )
}

/// Re-orthonormalize a drifted basis.
///
/// `front` keeps its direction; `right` and then `up` are rebuilt from it.
pub fn orthonormalize(up: &mut Vector3, front: &mut Vector3, right: &mut Vector3) {
    front.normalize();
    *right = up.cross(front).normalized();
    *up = front.cross(right).normalized();
}

/// Which side of the directed line `a -> b` the point `p` lies on.
///
/// Returns `1.0` for the left, `-1.0` for the right and `0.0` on the line.
#[inline]
pub fn point_line_position(a: &Vector2, b: &Vector2, p: &Vector2) -> f32 {
    sign((*b - *a).cross(&(*p - *a)))
}

/// Unsigned area of the triangle `abc`.
#[inline]
pub fn area_triangle(a: &Vector2, b: &Vector2, c: &Vector2) -> f32 {
    ((*b - *a).cross(&(*c - *a)) * 0.5).abs()
}

/// Whether `p` lies inside or on the edge of triangle `abc`.
pub fn point_in_triangle(p: &Vector2, a: &Vector2, b: &Vector2, c: &Vector2) -> bool {
    let d1 = point_line_position(a, b, p);
    let d2 = point_line_position(b, c, p);
    let d3 = point_line_position(c, a, p);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;

    !(has_neg && has_pos)
}

/// Whether `p` lies inside or on the edge of a convex polygon.
///
/// Vertices may wind either way. Fewer than three vertices never contain a
/// point.
pub fn point_in_convex_polygon(p: &Vector2, polygon: &[Vector2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut side = 0.0;
    for (i, a) in polygon.iter().enumerate() {
        let b = &polygon[(i + 1) % polygon.len()];
        let s = point_line_position(a, b, p);
        if s == 0.0 {
            continue;
        }
        if side == 0.0 {
            side = s;
        } else if s != side {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector4;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_angle_conversion() {
        assert!((radians(180.0) - PI).abs() < 1e-6);
        assert!((degrees(FRAC_PI_2) - 90.0).abs() < 1e-4);
        let v = degrees_vec3(&radians_vec3(&Vector3::new(10.0, 20.0, 30.0)));
        assert!(v.approx_eq(&Vector3::new(10.0, 20.0, 30.0), 1e-4));
    }

    #[test]
    fn test_normalize_quaternion_divides_by_norm() {
        let q = normalize_quaternion(&Quaternion::new(2.0, 0.0, 0.0, 0.0));
        assert!(q.approx_eq(&Quaternion::IDENTITY, 1e-6));
        let q = normalize_quaternion(&Quaternion::new(1.0, 2.0, 3.0, 4.0));
        assert!((q.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_dist_point_line() {
        let a = Vector3::ZERO;
        let b = Vector3::new(1.0, 0.0, 0.0);
        let p = Vector3::new(5.0, 3.0, 0.0);
        assert!((dist_point_line(&p, &a, &b) - 3.0).abs() < 1e-6);
        assert!((dist_point_line_segment(&p, &a, &b) - 5.0).abs() < 1e-6);

        let inside = Vector3::new(0.5, 0.0, 2.0);
        assert!((dist_point_line_segment(&inside, &a, &b) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_dist_point_line_degenerate() {
        let a = Vector3::new(1.0, 1.0, 1.0);
        let p = Vector3::new(1.0, 1.0, 4.0);
        assert!((dist_point_line(&p, &a, &a) - 3.0).abs() < 1e-6);
        assert!((dist_point_line_segment(&p, &a, &a) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_look_at_moves_eye_to_origin() {
        let eye = Vector3::new(0.0, 0.0, 5.0);
        let view = look_at(&eye, &Vector3::ZERO, &Vector3::UNIT_Y);
        assert!(view.transform_point(&eye).approx_eq(&Vector3::ZERO, 1e-6));
        let target = view.transform_point(&Vector3::ZERO);
        assert!(target.approx_eq(&Vector3::new(0.0, 0.0, -5.0), 1e-6));
    }

    #[test]
    fn test_look_at_matches_glam() {
        let eye = Vector3::new(1.0, 2.0, 3.0);
        let center = Vector3::new(-1.0, 0.5, 0.0);
        let view = look_at(&eye, &center, &Vector3::UNIT_Y);
        let expected = glam::Mat4::look_at_rh(eye.into(), center.into(), glam::Vec3::Y);
        assert!(view.approx_eq(&expected.into(), 1e-5));
    }

    #[test]
    fn test_perspective_depth_range() {
        let proj = perspective(FRAC_PI_2, 1.5, 0.1, 100.0);
        let near = proj.mul_vector(&Vector4::new(0.0, 0.0, -0.1, 1.0));
        let far = proj.mul_vector(&Vector4::new(0.0, 0.0, -100.0, 1.0));
        assert!((near.z / near.w + 1.0).abs() < 1e-4);
        assert!((far.z / far.w - 1.0).abs() < 1e-4);

        let expected = glam::Mat4::perspective_rh_gl(FRAC_PI_2, 1.5, 0.1, 100.0);
        assert!(proj.approx_eq(&expected.into(), 1e-5));
    }

    #[test]
    fn test_orthographic_matches_glam() {
        let proj = orthographic(-2.0, 2.0, -1.0, 1.0, 0.1, 10.0);
        let expected = glam::Mat4::orthographic_rh_gl(-2.0, 2.0, -1.0, 1.0, 0.1, 10.0);
        assert!(proj.approx_eq(&expected.into(), 1e-6));
    }

    #[test]
    fn test_symmetric_frustum_is_perspective() {
        let near = 0.5;
        let top = near * (FRAC_PI_2 / 2.0).tan();
        let f = frustum(-top, top, -top, top, near, 50.0);
        assert!(f.approx_eq(&perspective(FRAC_PI_2, 1.0, near, 50.0), 1e-5));
    }

    #[test]
    fn test_orthonormalize() {
        let mut up = Vector3::new(0.1, 1.0, 0.05);
        let mut front = Vector3::new(0.0, 0.2, 2.0);
        let mut right = Vector3::ZERO;
        orthonormalize(&mut up, &mut front, &mut right);

        assert!((up.length() - 1.0).abs() < 1e-5);
        assert!((front.length() - 1.0).abs() < 1e-5);
        assert!((right.length() - 1.0).abs() < 1e-5);
        assert!(up.dot(&front).abs() < 1e-5);
        assert!(up.dot(&right).abs() < 1e-5);
        assert!(front.dot(&right).abs() < 1e-5);
        assert!(front.approx_eq(&Vector3::new(0.0, 0.2, 2.0).normalized(), 1e-6));
    }

    #[test]
    fn test_point_line_position() {
        let a = Vector2::new(0.0, 0.0);
        let b = Vector2::new(1.0, 0.0);
        assert_eq!(point_line_position(&a, &b, &Vector2::new(0.5, 1.0)), 1.0);
        assert_eq!(point_line_position(&a, &b, &Vector2::new(0.5, -1.0)), -1.0);
        assert_eq!(point_line_position(&a, &b, &Vector2::new(3.0, 0.0)), 0.0);
    }

    #[test]
    fn test_triangle() {
        let a = Vector2::new(0.0, 0.0);
        let b = Vector2::new(4.0, 0.0);
        let c = Vector2::new(0.0, 3.0);
        assert!((area_triangle(&a, &b, &c) - 6.0).abs() < 1e-6);
        assert!(point_in_triangle(&Vector2::new(1.0, 1.0), &a, &b, &c));
        assert!(point_in_triangle(&Vector2::new(1.0, 1.0), &a, &c, &b));
        assert!(!point_in_triangle(&Vector2::new(3.0, 3.0), &a, &b, &c));
    }

    #[test]
    fn test_convex_polygon() {
        let square = [
            Vector2::new(0.0, 0.0),
            Vector2::new(2.0, 0.0),
            Vector2::new(2.0, 2.0),
            Vector2::new(0.0, 2.0),
        ];
        assert!(point_in_convex_polygon(&Vector2::new(1.0, 1.0), &square));
        assert!(point_in_convex_polygon(&Vector2::new(2.0, 1.0), &square));
        assert!(!point_in_convex_polygon(&Vector2::new(3.0, 1.0), &square));
        assert!(!point_in_convex_polygon(&Vector2::new(1.0, 1.0), &square[..2]));
    }
}

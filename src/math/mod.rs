//! # Math Module
//!
//! Linear algebra for the Ren engine: dynamically sized matrices and vectors,
//! fixed-size vectors and matrices, quaternions and free geometry helpers.
//!
//! Dynamic containers ([`Matrix`], [`Vector`], [`SquareMatrix`]) report shape
//! errors as [`MathError`](crate::error::MathError). Fixed-size types are
//! `Copy`, `Pod` and convert to and from `glam`.

mod euler;
pub mod geometry;
mod matrix;
mod matrix3;
mod matrix4;
mod quaternion;
pub mod scalar;
mod square_matrix;
mod vector;
mod vector2;
mod vector3;
mod vector4;
mod vector_ops;

pub use euler::EulerAngles;
pub use matrix::{Matrix, MatrixView, NumericContainer};
pub use matrix3::Matrix3;
pub use matrix4::Matrix4;
pub use quaternion::Quaternion;
pub use scalar::{Epsilon, Sampleable, Sampler};
pub use square_matrix::SquareMatrix;
pub use vector::Vector;
pub use vector2::Vector2;
pub use vector3::Vector3;
pub use vector4::Vector4;

/// Common math constants.
pub mod consts {
    /// Pi constant.
    pub const PI: f32 = std::f32::consts::PI;
    /// Two times Pi.
    pub const TWO_PI: f32 = PI * 2.0;
    /// Half of Pi.
    pub const HALF_PI: f32 = PI / 2.0;
    /// Degrees to radians conversion factor.
    pub const DEG2RAD: f32 = PI / 180.0;
    /// Radians to degrees conversion factor.
    pub const RAD2DEG: f32 = 180.0 / PI;
    /// Tolerance for single precision comparisons.
    pub const EPSILON: f32 = 1e-5;
    /// Tolerance for double precision comparisons.
    pub const EPSILON_F64: f64 = 1e-9;
}

//! # Ren Math - Linear Algebra and Spatial Transforms
//!
//! The math core of the Ren engine: matrices, vectors, quaternions, geometry
//! helpers and the object [`Transform`](scene::Transform) whose model and
//! normal matrices feed shader uniforms.
//!
//! ## Features
//!
//! - **Math**: dynamic [`Matrix`](math::Matrix)/[`Vector`](math::Vector) with
//!   checked shapes, fixed `Vector2/3/4` and `Matrix3/4`, quaternions and
//!   Euler angles
//! - **Geometry**: view and projection matrices, distances, basis repair, 2D
//!   point tests
//! - **Scene**: position/orientation/scale transforms
//!
//! ## Example
//!
//! ```
//! use ren_math::prelude::*;
//!
//! let mut transform = Transform::default();
//! transform.set_position(&Vector3::new(0.0, 1.0, 5.0));
//! transform.rotate_y(0.5, true);
//!
//! let model = transform.get_model_matrix();
//! let view = geometry::look_at(&Vector3::new(0.0, 2.0, 10.0), &Vector3::ZERO, &Vector3::UNIT_Y);
//! let projection = geometry::perspective(1.0, 16.0 / 9.0, 0.1, 1000.0);
//! let mvp = projection * view * model;
//! let uniform: [f32; 16] = mvp.to_cols_array();
//! # assert!(uniform.iter().all(|v| v.is_finite()));
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod math;
pub mod scene;

// Re-export commonly used types
pub mod prelude {
    //! Convenient re-exports of commonly used types.

    pub use crate::config::MathConfig;
    pub use crate::error::MathError;
    pub use crate::math::*;
    pub use crate::scene::*;
}

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = "Ren Math";

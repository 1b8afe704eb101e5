//! # Scene Module
//!
//! Spatial state of scene objects: position, orientation and scale, with the
//! model and normal matrices renderers upload as uniforms.

mod transform;

pub use transform::Transform;

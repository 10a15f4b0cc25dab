//! GPU upload of the per-frame transform.
//!
//! The renderer reads the composed matrix from a single uniform; the
//! camera and input layers never touch wgpu directly.

/// Transform uniform and its bind group.
pub mod transform;

pub use transform::{TransformBinding, TransformUniform, GL_TO_WGPU_DEPTH};

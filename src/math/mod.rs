//! Vector and matrix kernel.
//!
//! Thin, checked layer over [`glam`]: every operation that can produce a
//! NaN-filled result on degenerate input (zero-length normalization,
//! parallel basis vectors, singular inverse, malformed frustum) returns a
//! [`ViewError`](crate::error::ViewError) instead. The plain operations
//! (add, negate, cross, dot, multiply) are used straight from `glam`.
//!
//! Conventions, fixed crate-wide:
//! - matrices are column-major and compose right-to-left (`a * b` applies
//!   `b` first);
//! - rotations follow the right-hand rule: a positive angle turns
//!   counter-clockwise when looking down the axis toward the origin;
//! - projection uses OpenGL clip depth (`[-1, 1]`).

mod matrix;
mod vector;

pub use matrix::{
    axis_rotation, checked_inverse, look_at, perspective, scaling,
    translation, unit_axis_rotation,
};
pub use vector::{is_parallel, try_normalize, EPSILON};

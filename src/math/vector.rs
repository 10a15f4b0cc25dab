use glam::Vec3;

use crate::error::ViewError;

/// Length below which a vector is treated as zero.
pub const EPSILON: f32 = 1e-6;

/// Normalize `v`, failing on a zero (or non-finite) vector.
///
/// The zero-vector policy is an error, never a silent zero result.
pub fn try_normalize(v: Vec3) -> Result<Vec3, ViewError> {
    let len = v.length();
    if !len.is_finite() || len <= EPSILON {
        return Err(ViewError::DegenerateGeometry(format!(
            "cannot normalize vector {v} of length {len}"
        )));
    }
    Ok(v / len)
}

/// Whether `a` and `b` point along the same line (or either is zero).
pub fn is_parallel(a: Vec3, b: Vec3) -> bool {
    let scale = a.length().max(1.0) * b.length().max(1.0);
    a.cross(b).length() <= EPSILON * scale
}

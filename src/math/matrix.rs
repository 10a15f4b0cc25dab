use glam::{Mat4, Vec3};

use super::vector::{is_parallel, try_normalize, EPSILON};
use crate::error::ViewError;

/// Determinant magnitude below which a matrix is treated as singular.
const SINGULAR_DET: f32 = 1e-12;

/// Camera-to-world matrix placing a camera at `eye` looking at `target`.
///
/// The camera looks down its local `-Z`; the columns are the camera's
/// right, up and back axes in world space, and the translation is `eye`.
/// The view matrix is the inverse of this.
///
/// # Errors
///
/// [`ViewError::Configuration`] when `eye == target`,
/// [`ViewError::DegenerateGeometry`] when `up` is zero or parallel to the
/// viewing direction.
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Result<Mat4, ViewError> {
    let back = eye - target;
    if back.length() <= EPSILON {
        return Err(ViewError::Configuration(format!(
            "camera eye and target coincide at {eye}"
        )));
    }
    if is_parallel(up, back) {
        return Err(ViewError::DegenerateGeometry(format!(
            "up vector {up} is parallel to the view direction {back}"
        )));
    }
    let z = try_normalize(back)?;
    let x = try_normalize(up.cross(z))?;
    let y = z.cross(x);
    Ok(Mat4::from_cols(
        x.extend(0.0),
        y.extend(0.0),
        z.extend(0.0),
        eye.extend(1.0),
    ))
}

/// Inverse of `m`, failing when `m` is singular or non-finite.
pub fn checked_inverse(m: Mat4) -> Result<Mat4, ViewError> {
    let det = m.determinant();
    if !det.is_finite() || det.abs() < SINGULAR_DET {
        return Err(ViewError::DegenerateGeometry(format!(
            "matrix is not invertible (det = {det})"
        )));
    }
    Ok(m.inverse())
}

/// Right-handed perspective projection with OpenGL clip depth.
///
/// `fov` is the vertical field of view in radians.
///
/// # Errors
///
/// [`ViewError::Configuration`] unless `0 < fov < π`, `aspect > 0`,
/// `near > 0` and `near < far`.
pub fn perspective(
    fov: f32,
    aspect: f32,
    near: f32,
    far: f32,
) -> Result<Mat4, ViewError> {
    if fov.is_nan() || fov <= 0.0 || fov >= std::f32::consts::PI {
        return Err(ViewError::Configuration(format!(
            "field of view {fov} rad is outside (0, pi)"
        )));
    }
    if !aspect.is_finite() || aspect <= 0.0 {
        return Err(ViewError::Configuration(format!(
            "aspect ratio {aspect} must be positive"
        )));
    }
    if near.is_nan() || near <= 0.0 || !far.is_finite() || near >= far {
        return Err(ViewError::Configuration(format!(
            "clip planes must satisfy 0 < near < far (near = {near}, far = \
             {far})"
        )));
    }
    Ok(Mat4::perspective_rh_gl(fov, aspect, near, far))
}

/// Rotation of `angle` radians about `axis` (right-hand rule).
///
/// The axis is normalized first, so callers may pass any non-zero length.
pub fn axis_rotation(axis: Vec3, angle: f32) -> Result<Mat4, ViewError> {
    Ok(unit_axis_rotation(try_normalize(axis)?, angle))
}

/// Rotation of `angle` radians about an already normalized `axis`
/// (right-hand rule).
#[inline]
pub fn unit_axis_rotation(axis: Vec3, angle: f32) -> Mat4 {
    debug_assert!(axis.is_normalized(), "rotation axis {axis} is not unit");
    Mat4::from_axis_angle(axis, angle)
}

/// Translation by `v`.
#[inline]
pub fn translation(v: Vec3) -> Mat4 {
    Mat4::from_translation(v)
}

/// Uniform scale by `s`.
#[inline]
pub fn scaling(s: f32) -> Mat4 {
    Mat4::from_scale(Vec3::splat(s))
}

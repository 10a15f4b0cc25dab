//! Perspective view volume.

use glam::Mat4;

use crate::error::ViewError;
use crate::math;

/// Validated perspective frustum together with its projection matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    fov: f32,
    aspect: f32,
    near: f32,
    far: f32,
    projection: Mat4,
    inverse_projection: Mat4,
}

impl Frustum {
    /// Build a frustum. `fov` is the vertical field of view in radians.
    ///
    /// # Errors
    ///
    /// [`ViewError::Configuration`] unless `0 < fov < π`, `aspect > 0` and
    /// `0 < near < far`.
    pub fn new(
        fov: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Result<Self, ViewError> {
        let projection = math::perspective(fov, aspect, near, far)?;
        let inverse_projection = math::checked_inverse(projection)?;
        Ok(Self {
            fov,
            aspect,
            near,
            far,
            projection,
            inverse_projection,
        })
    }

    /// Same frustum with a different aspect ratio.
    pub fn with_aspect(&self, aspect: f32) -> Result<Self, ViewError> {
        Self::new(self.fov, aspect, self.near, self.far)
    }

    /// Vertical field of view in radians.
    #[must_use]
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Width over height.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Near clipping plane distance.
    #[must_use]
    pub fn near(&self) -> f32 {
        self.near
    }

    /// Far clipping plane distance.
    #[must_use]
    pub fn far(&self) -> f32 {
        self.far
    }

    /// Projection matrix (OpenGL clip depth).
    #[must_use]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Inverse of [`projection`](Self::projection).
    #[must_use]
    pub fn inverse_projection(&self) -> Mat4 {
        self.inverse_projection
    }

    /// World units covered by one pixel at `distance` from the eye, for a
    /// viewport `height_px` pixels tall.
    #[must_use]
    pub fn world_per_pixel(&self, distance: f32, height_px: f32) -> f32 {
        let visible_height = 2.0 * distance * (self.fov * 0.5).tan();
        visible_height / height_px.max(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_and_inverse_cancel() {
        let f = Frustum::new(30.0_f32.to_radians(), 4.0 / 3.0, 1.0, 2000.0)
            .unwrap();
        assert!((f.projection() * f.inverse_projection())
            .abs_diff_eq(Mat4::IDENTITY, 1e-4));
    }

    #[test]
    fn rejects_inverted_clip_planes() {
        assert!(matches!(
            Frustum::new(1.0, 1.0, 10.0, 1.0),
            Err(ViewError::Configuration(_))
        ));
    }

    #[test]
    fn with_aspect_keeps_other_parameters() {
        let f = Frustum::new(0.5, 1.0, 2.0, 500.0).unwrap();
        let g = f.with_aspect(2.0).unwrap();
        assert_eq!(g.aspect(), 2.0);
        assert_eq!((g.fov(), g.near(), g.far()), (0.5, 2.0, 500.0));
        assert!(f.with_aspect(-1.0).is_err());
    }

    #[test]
    fn world_per_pixel_spans_visible_height() {
        let f = Frustum::new(90.0_f32.to_radians(), 1.0, 1.0, 100.0).unwrap();
        // tan(45°) = 1, so 10 units away the view is 20 units tall
        assert!((f.world_per_pixel(10.0, 200.0) - 0.1).abs() < 1e-5);
    }
}

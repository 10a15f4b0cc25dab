//! Camera placement.

use glam::{Mat4, Vec3};

use crate::error::ViewError;
use crate::math;

/// Eye position, look-at target and up direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector. Must not be parallel to `eye - target`.
    pub up: Vec3,
}

impl CameraPose {
    /// Create a pose. Validation happens when the pose is placed.
    #[must_use]
    pub fn new(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        Self { eye, target, up }
    }

    /// Camera-to-world matrix for this pose.
    ///
    /// # Errors
    ///
    /// Fails when `eye == target` or `up` is parallel to the view
    /// direction.
    pub fn camera_matrix(&self) -> Result<Mat4, ViewError> {
        math::look_at(self.eye, self.target, self.up)
    }

    /// Distance from eye to target.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.eye.distance(self.target)
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 500.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }
}

/// Orthonormal camera basis in world space, plus the pose's own up
/// direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    /// Screen-right direction.
    pub right: Vec3,
    /// Screen-up direction (orthogonalized).
    pub up: Vec3,
    /// Direction from target toward eye (out of the screen).
    pub back: Vec3,
    /// The pose's up vector, normalized. Yaw turns about this axis.
    pub world_up: Vec3,
}

impl CameraFrame {
    /// Read the basis out of a camera-to-world matrix.
    pub(crate) fn from_camera(camera: Mat4, pose_up: Vec3) -> Self {
        Self {
            right: camera.x_axis.truncate(),
            up: camera.y_axis.truncate(),
            back: camera.z_axis.truncate(),
            world_up: pose_up.normalize(),
        }
    }

    /// Map a direction given in screen coordinates (x right, y up, z out of
    /// the screen) into world space.
    #[must_use]
    pub fn screen_to_world(&self, v: Vec3) -> Vec3 {
        self.right * v.x + self.up * v.y + self.back * v.z
    }

    /// Unit pitch axis, `back × world_up`.
    ///
    /// Never degenerate for a validated pose, since `up` is not parallel to
    /// the view direction.
    #[must_use]
    pub fn pitch_axis(&self) -> Vec3 {
        math::try_normalize(self.back.cross(self.world_up))
            .unwrap_or(-self.right)
    }
}

//! Camera system for the mesh viewer.
//!
//! A [`ViewComposer`] owns the frustum, the camera pose, the model's world
//! transform and the live [`OrientationModel`], and composes them into the
//! per-frame model-view-projection matrix.

/// Transform composition and pointer-driven camera control.
pub mod composer;
/// Validated perspective frustum.
pub mod frustum;
/// Drag-to-rotation strategies.
pub mod orientation;
/// Camera placement and basis.
pub mod pose;

pub use composer::{ModelViewState, ViewComposer, WorldTransform};
pub use frustum::Frustum;
pub use orientation::{Arcball, ArcballStep, Euler, OrientationModel};
pub use pose::{CameraFrame, CameraPose};

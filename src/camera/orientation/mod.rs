//! Drag-to-rotation strategies.
//!
//! Both strategies sit behind [`OrientationModel`] so the composer never
//! knows which one is live. Only one is active per composer, selected by
//! [`RotationStrategy`].

mod arcball;
mod euler;

pub use arcball::{Arcball, ArcballStep};
pub use euler::Euler;
use glam::Mat4;

use super::pose::CameraFrame;
use crate::input::DragSample;
use crate::options::{InteractionOptions, RotationStrategy};

/// Accumulated model rotation driven by rotate-drags.
pub trait OrientationModel {
    /// Fold one drag sample into the accumulated rotation and return the
    /// updated rotation.
    fn apply(&mut self, sample: &DragSample, frame: &CameraFrame) -> Mat4;

    /// Turn by `angle` radians about the frame's world-up axis
    /// (continuous, time-driven rotation).
    fn spin(&mut self, angle: f32, frame: &CameraFrame) -> Mat4;

    /// Current accumulated rotation.
    fn rotation(&self) -> Mat4;

    /// Whether the camera currently looks at the model's back, in which
    /// case vertical drags are mirrored.
    fn faces_back(&self) -> bool;

    /// Return to the identity rotation.
    fn reset(&mut self);

    /// Which strategy this is.
    fn strategy(&self) -> RotationStrategy;
}

/// Build the orientation model selected by `options`.
#[must_use]
pub fn for_options(options: &InteractionOptions) -> Box<dyn OrientationModel> {
    match options.strategy {
        RotationStrategy::Arcball => {
            Box::new(Arcball::new(options.arcball_radius))
        }
        RotationStrategy::Euler => {
            Box::new(Euler::new(options.rotate_sensitivity))
        }
    }
}

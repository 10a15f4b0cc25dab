use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Mat4, Vec2, Vec3};

use super::OrientationModel;
use crate::camera::pose::CameraFrame;
use crate::input::DragSample;
use crate::math;
use crate::options::RotationStrategy;

/// Independent yaw and pitch angles.
///
/// Yaw turns about the pose's up vector, pitch about the axis captured at
/// pointer-down. Both rotations are rebuilt from the angles on every
/// update, so the result is `R(up, yaw) × R(pitch_axis, pitch)`.
#[derive(Debug, Clone)]
pub struct Euler {
    /// Radians per full canvas extent dragged.
    sensitivity: f32,
    yaw: f32,
    pitch: f32,
    yaw_axis: Vec3,
    pitch_axis: Vec3,
    rotation: Mat4,
}

impl Euler {
    /// Create a model at zero yaw and pitch.
    #[must_use]
    pub fn new(sensitivity: f32) -> Self {
        Self {
            sensitivity,
            yaw: 0.0,
            pitch: 0.0,
            yaw_axis: Vec3::Y,
            pitch_axis: Vec3::X,
            rotation: Mat4::IDENTITY,
        }
    }

    /// Yaw in radians, in `[-π, π]`.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in radians, in `[-π/2, π/2]`.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Add `delta` to the yaw. Leaving `[-π, π]` jumps to the opposite
    /// bound instead of wrapping continuously.
    pub fn add_yaw(&mut self, delta: f32) {
        self.yaw += delta;
        if self.yaw < -PI {
            self.yaw = PI;
        } else if self.yaw > PI {
            self.yaw = -PI;
        }
    }

    /// Add `delta` to the pitch, pinned to `[-π/2, π/2]`.
    pub fn add_pitch(&mut self, delta: f32) {
        self.pitch = (self.pitch + delta).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    fn rebuild(&mut self) -> Mat4 {
        self.rotation = math::unit_axis_rotation(self.yaw_axis, self.yaw)
            * math::unit_axis_rotation(self.pitch_axis, self.pitch);
        self.rotation
    }
}

impl OrientationModel for Euler {
    fn apply(&mut self, sample: &DragSample, frame: &CameraFrame) -> Mat4 {
        let extent = sample.extent.max(Vec2::ONE);
        self.add_yaw(self.sensitivity / extent.x * sample.delta.x);
        self.add_pitch(self.sensitivity / extent.y * sample.delta.y);
        self.yaw_axis = frame.world_up;
        self.pitch_axis = sample.axis;
        self.rebuild()
    }

    fn spin(&mut self, angle: f32, frame: &CameraFrame) -> Mat4 {
        self.add_yaw(angle);
        self.yaw_axis = frame.world_up;
        self.rebuild()
    }

    fn rotation(&self) -> Mat4 {
        self.rotation
    }

    fn faces_back(&self) -> bool {
        self.yaw.abs() >= FRAC_PI_2
    }

    fn reset(&mut self) {
        self.yaw = 0.0;
        self.pitch = 0.0;
        self.rotation = Mat4::IDENTITY;
    }

    fn strategy(&self) -> RotationStrategy {
        RotationStrategy::Euler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::DragMode;

    fn frame() -> CameraFrame {
        CameraFrame {
            right: -Vec3::X,
            up: Vec3::Y,
            back: -Vec3::Z,
            world_up: Vec3::Y,
        }
    }

    fn sample(dx: f32, dy: f32) -> DragSample {
        DragSample {
            mode: DragMode::Rotate,
            previous: Vec2::ZERO,
            current: Vec2::new(dx, dy),
            delta: Vec2::new(dx, dy),
            axis: Vec3::X,
            extent: Vec2::new(800.0, 600.0),
        }
    }

    #[test]
    fn horizontal_drag_scales_by_canvas_width() {
        let mut e = Euler::new(10.0);
        let _ = e.apply(&sample(100.0, 0.0), &frame());
        assert!((e.yaw() - 1.25).abs() < 1e-6);
        assert_eq!(e.pitch(), 0.0);
    }

    #[test]
    fn vertical_drag_scales_by_canvas_height() {
        let mut e = Euler::new(10.0);
        let _ = e.apply(&sample(0.0, 60.0), &frame());
        assert!((e.pitch() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn yaw_flips_sign_at_pi() {
        let mut e = Euler::new(10.0);
        let step = 0.5;
        let mut seen = Vec::new();
        for _ in 0..7 {
            e.add_yaw(step);
            seen.push(e.yaw());
        }
        // 0.5 .. 3.0, then 3.5 > π jumps to -π, then continues from there
        assert!((seen[5] - 3.0).abs() < 1e-6);
        assert_eq!(seen[6], -PI);
        e.add_yaw(step);
        assert!((e.yaw() - (-PI + step)).abs() < 1e-6);

        // And the other way round
        let mut e = Euler::new(10.0);
        e.add_yaw(-PI - 0.1);
        assert_eq!(e.yaw(), PI);
    }

    #[test]
    fn pitch_is_pinned_at_half_pi() {
        let mut e = Euler::new(10.0);
        for _ in 0..50 {
            let _ = e.apply(&sample(0.0, 300.0), &frame());
        }
        assert_eq!(e.pitch(), FRAC_PI_2);
        let _ = e.apply(&sample(0.0, -1.0e6), &frame());
        assert_eq!(e.pitch(), -FRAC_PI_2);
    }

    #[test]
    fn rotation_is_yaw_then_pitch_product() {
        let mut e = Euler::new(10.0);
        let r = e.apply(&sample(80.0, 30.0), &frame());
        let expected = Mat4::from_axis_angle(Vec3::Y, e.yaw())
            * Mat4::from_axis_angle(Vec3::X, e.pitch());
        assert!(r.abs_diff_eq(expected, 1e-6));
        assert_eq!(r, e.rotation());
    }

    #[test]
    fn faces_back_past_quarter_turn() {
        let mut e = Euler::new(10.0);
        assert!(!e.faces_back());
        e.add_yaw(FRAC_PI_2 + 0.01);
        assert!(e.faces_back());
        e.reset();
        assert!(!e.faces_back());
        assert_eq!(e.rotation(), Mat4::IDENTITY);
    }

    #[test]
    fn spin_turns_about_world_up() {
        let mut e = Euler::new(10.0);
        let r = e.spin(0.3, &frame());
        assert!((e.yaw() - 0.3).abs() < 1e-6);
        assert!(r.abs_diff_eq(Mat4::from_axis_angle(Vec3::Y, 0.3), 1e-6));
    }
}

use glam::{Mat4, Quat, Vec2, Vec3};

use super::OrientationModel;
use crate::camera::pose::CameraFrame;
use crate::input::DragSample;
use crate::math::{self, EPSILON};
use crate::options::RotationStrategy;

/// Axis reported for a zero-angle step. Any unit vector would do.
const IDLE_AXIS: Vec3 = Vec3::Y;

/// One incremental arcball rotation, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcballStep {
    /// Rotation angle in radians, in `[0, π]`.
    pub angle: f32,
    /// Unit rotation axis (x right, y up, z out of the screen).
    pub axis: Vec3,
}

impl ArcballStep {
    /// The no-motion step.
    pub const IDLE: Self = Self {
        angle: 0.0,
        axis: IDLE_AXIS,
    };
}

/// Virtual-sphere rotation.
///
/// Pointer positions are lifted onto a sphere of fixed radius centered on
/// the canvas; the great-circle arc between two lifted points gives the
/// incremental rotation, which is mapped into world space through the
/// camera basis and composed on the left of the accumulated orientation.
#[derive(Debug, Clone)]
pub struct Arcball {
    /// Sphere radius in pixels.
    radius: f32,
    orientation: Mat4,
}

impl Arcball {
    /// Create an arcball with identity orientation.
    ///
    /// A non-positive radius falls back to 1 pixel.
    #[must_use]
    pub fn new(radius: f32) -> Self {
        let radius = if radius > 0.0 { radius } else { 1.0 };
        Self {
            radius,
            orientation: Mat4::IDENTITY,
        }
    }

    /// Sphere radius in pixels.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Lift a centered screen point onto the unit sphere.
    ///
    /// Points inside the sphere's silhouette get `z = √(R² − x² − y²)`;
    /// points outside are pulled onto the rim (`z = 0`).
    #[must_use]
    pub fn project(&self, p: Vec2) -> Vec3 {
        let r2 = self.radius * self.radius;
        let d2 = p.length_squared();
        let lifted = if d2 <= r2 {
            p.extend((r2 - d2).sqrt())
        } else {
            (p * (self.radius / d2.sqrt())).extend(0.0)
        };
        lifted / self.radius
    }

    /// Incremental rotation carrying `previous` onto `current`.
    #[must_use]
    pub fn step(&self, previous: Vec2, current: Vec2) -> ArcballStep {
        let v1 = self.project(previous);
        let v2 = self.project(current);
        let norm_product = v1.length() * v2.length();
        if norm_product <= EPSILON {
            return ArcballStep::IDLE;
        }
        let Ok(axis) = math::try_normalize(v1.cross(v2)) else {
            return ArcballStep::IDLE;
        };
        let cos = (v1.dot(v2) / norm_product).clamp(-1.0, 1.0);
        ArcballStep {
            angle: cos.acos(),
            axis,
        }
    }

    /// World-space rotation matrix for a screen-space step.
    #[must_use]
    pub fn increment(step: ArcballStep, frame: &CameraFrame) -> Mat4 {
        if step.angle == 0.0 {
            return Mat4::IDENTITY;
        }
        let world_axis = frame.screen_to_world(step.axis);
        math::axis_rotation(world_axis, step.angle).unwrap_or(Mat4::IDENTITY)
    }

    /// Left-multiply `increment` onto the orientation, re-orthonormalizing
    /// so repeated small steps do not accumulate shear.
    fn compose(&mut self, increment: Mat4) -> Mat4 {
        let combined = increment * self.orientation;
        self.orientation =
            Mat4::from_quat(Quat::from_mat4(&combined).normalize());
        self.orientation
    }
}

impl OrientationModel for Arcball {
    fn apply(&mut self, sample: &DragSample, frame: &CameraFrame) -> Mat4 {
        let step = self.step(sample.previous, sample.current);
        self.compose(Self::increment(step, frame))
    }

    fn spin(&mut self, angle: f32, frame: &CameraFrame) -> Mat4 {
        self.compose(math::unit_axis_rotation(frame.world_up, angle))
    }

    fn rotation(&self) -> Mat4 {
        self.orientation
    }

    /// The arcball works on absolute sphere positions, which already turn
    /// the right way from any side.
    fn faces_back(&self) -> bool {
        false
    }

    fn reset(&mut self) {
        self.orientation = Mat4::IDENTITY;
    }

    fn strategy(&self) -> RotationStrategy {
        RotationStrategy::Arcball
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::input::DragMode;

    fn frame() -> CameraFrame {
        CameraFrame {
            right: Vec3::X,
            up: Vec3::Y,
            back: Vec3::Z,
            world_up: Vec3::Y,
        }
    }

    fn sample(from: Vec2, to: Vec2) -> DragSample {
        DragSample {
            mode: DragMode::Rotate,
            previous: from,
            current: to,
            delta: to - from,
            axis: Vec3::X,
            extent: Vec2::new(800.0, 600.0),
        }
    }

    #[test]
    fn projection_stays_on_unit_sphere() {
        let ball = Arcball::new(1000.0);
        assert!(ball.project(Vec2::ZERO).abs_diff_eq(Vec3::Z, 1e-6));
        for p in [
            Vec2::new(300.0, -400.0),
            Vec2::new(999.0, 0.0),
            Vec2::new(5000.0, 5000.0),
        ] {
            let v = ball.project(p);
            assert!(v.is_finite());
            assert!((v.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn outside_points_land_on_rim() {
        let ball = Arcball::new(100.0);
        let v = ball.project(Vec2::new(300.0, 400.0));
        assert_eq!(v.z, 0.0);
        assert!(v.abs_diff_eq(Vec3::new(0.6, 0.8, 0.0), 1e-6));
    }

    #[test]
    fn zero_motion_is_identity() {
        let mut ball = Arcball::new(1000.0);
        let a = Vec2::new(120.0, -45.0);
        let step = ball.step(a, a);
        assert_eq!(step.angle, 0.0);
        assert_eq!(step.axis, IDLE_AXIS);
        assert_eq!(Arcball::increment(step, &frame()), Mat4::IDENTITY);
        assert_eq!(ball.apply(&sample(a, a), &frame()), Mat4::IDENTITY);
    }

    #[test]
    fn horizontal_drag_turns_about_screen_up() {
        let ball = Arcball::new(1000.0);
        let step = ball.step(Vec2::ZERO, Vec2::new(1000.0, 0.0));
        assert!((step.angle - FRAC_PI_2).abs() < 1e-5);
        assert!(step.axis.abs_diff_eq(Vec3::Y, 1e-5));
    }

    #[test]
    fn increment_follows_the_cursor() {
        let ball = Arcball::new(1000.0);
        let from = Vec2::new(0.0, 0.0);
        let to = Vec2::new(200.0, 100.0);
        let step = ball.step(from, to);
        let r = Arcball::increment(step, &frame());
        let moved = r.transform_vector3(ball.project(from));
        assert!(moved.abs_diff_eq(ball.project(to), 1e-5));
    }

    #[test]
    fn increments_compose_on_the_left() {
        let mut ball = Arcball::new(1000.0);
        let f = frame();
        let first = ball.apply(&sample(Vec2::ZERO, Vec2::new(300.0, 0.0)), &f);
        let s2 = sample(Vec2::ZERO, Vec2::new(0.0, 250.0));
        let inc = Arcball::increment(ball.step(s2.previous, s2.current), &f);
        let second = ball.apply(&s2, &f);
        assert!(second.abs_diff_eq(inc * first, 1e-5));
        assert!(!second.abs_diff_eq(first * inc, 1e-3));
    }

    #[test]
    fn many_small_drags_stay_orthonormal() {
        let mut ball = Arcball::new(1000.0);
        let f = frame();
        let mut p = Vec2::ZERO;
        for i in 0..2000 {
            let next = p + Vec2::new(3.0, if i % 2 == 0 { 2.0 } else { -1.0 });
            let _ = ball.apply(&sample(p, next), &f);
            p = next;
        }
        let r = ball.rotation();
        assert!((r.determinant() - 1.0).abs() < 1e-4);
        assert!((r.transpose() * r).abs_diff_eq(Mat4::IDENTITY, 1e-4));
    }

    #[test]
    fn spin_and_reset() {
        let mut ball = Arcball::new(1000.0);
        let r = ball.spin(0.25, &frame());
        assert!(r.abs_diff_eq(Mat4::from_axis_angle(Vec3::Y, 0.25), 1e-5));
        assert!(!ball.faces_back());
        ball.reset();
        assert_eq!(ball.rotation(), Mat4::IDENTITY);
    }

    #[test]
    fn non_positive_radius_is_replaced() {
        assert_eq!(Arcball::new(0.0).radius(), 1.0);
        assert_eq!(Arcball::new(-5.0).radius(), 1.0);
    }
}

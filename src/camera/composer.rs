//! Camera/transform composer: owns every camera and model transform and
//! produces the model-view-projection matrix once per frame.

use glam::{Mat4, Vec2, Vec3};

use super::frustum::Frustum;
use super::orientation::{self, OrientationModel};
use super::pose::{CameraFrame, CameraPose};
use crate::error::ViewError;
use crate::input::{DragMode, Modifiers, PointerEvent, PointerTracker};
use crate::math;
use crate::options::{InteractionOptions, Options};

/// Translation and uniform scale of the model, applied once at load time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldTransform {
    /// Offset that brings the rotation pivot to the world origin.
    pub translation: Vec3,
    /// Uniform model scale.
    pub scale: f32,
}

impl Default for WorldTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

/// Per-frame output of [`ViewComposer::update_view`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelViewState {
    /// Model-view-projection matrix handed to the renderer.
    pub model_view: Mat4,
    /// `inverse(projection) × model_view`: the model's frame in eye space,
    /// for inspection only.
    pub world_state: Mat4,
}

impl Default for ModelViewState {
    fn default() -> Self {
        Self {
            model_view: Mat4::IDENTITY,
            world_state: Mat4::IDENTITY,
        }
    }
}

/// Owns projection, view, world transform, drag state and orientation.
///
/// A composer can only be built from a valid frustum and camera pose, so
/// it is ready to produce a transform from the moment it exists. Every
/// mutator validates its input and leaves the previous state in place on
/// failure; internal matrices are never exposed for mutation.
///
/// The per-frame transform is composed as
/// `P × V × S(s) × T(−t) × R × T(t)`: the accumulated rotation `R` pivots
/// about the translated model center, not the world origin. The scale sits
/// outside the pivot, so a scaled model still turns about its own center.
pub struct ViewComposer {
    frustum: Frustum,
    fixed_aspect: Option<f32>,
    pose: CameraPose,
    view: Mat4,
    frame: CameraFrame,
    world: WorldTransform,
    orientation: Box<dyn OrientationModel>,
    tracker: PointerTracker,
    interaction: InteractionOptions,
    auto_rotate: bool,
    state: ModelViewState,
}

impl ViewComposer {
    /// Create a composer for a `width × height` canvas.
    ///
    /// # Errors
    ///
    /// Fails when the options describe a degenerate frustum or an invalid
    /// zoom distance range, or when `pose` is degenerate.
    pub fn new(
        options: &Options,
        width: u32,
        height: u32,
        pose: CameraPose,
    ) -> Result<Self, ViewError> {
        let camera = &options.camera;
        let frustum = Frustum::new(
            camera.fov(),
            camera.aspect_for(width, height),
            camera.znear,
            camera.zfar,
        )?;
        let camera_matrix = pose.camera_matrix()?;
        let view = math::checked_inverse(camera_matrix)?;
        let interaction = options.interaction.clone();
        let _ = interaction.distance_range()?;

        let mut composer = Self {
            frustum,
            fixed_aspect: camera.aspect,
            pose,
            view,
            frame: CameraFrame::from_camera(camera_matrix, pose.up),
            world: WorldTransform::default(),
            orientation: orientation::for_options(&interaction),
            tracker: PointerTracker::new(
                width,
                height,
                interaction.pan_modifier,
            ),
            auto_rotate: interaction.auto_rotate,
            interaction,
            state: ModelViewState::default(),
        };
        let _ = composer.update_view();
        Ok(composer)
    }

    // ── Frustum & camera ────────────────────────────────────────────────

    /// Replace the frustum. `fov` is in radians.
    ///
    /// An explicitly set aspect ratio sticks across later resizes.
    pub fn set_frustum(
        &mut self,
        fov: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Result<(), ViewError> {
        self.frustum = Frustum::new(fov, aspect, near, far)?;
        self.fixed_aspect = Some(aspect);
        log::debug!(
            "frustum set: fov {fov} rad, aspect {aspect}, near {near}, far \
             {far}"
        );
        Ok(())
    }

    /// Follow a canvas resize: recenters pointer input and, unless the
    /// aspect ratio is fixed, updates the projection.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), ViewError> {
        if width == 0 || height == 0 {
            log::warn!("ignoring resize to empty canvas {width}x{height}");
            return Ok(());
        }
        if self.fixed_aspect.is_none() {
            self.frustum =
                self.frustum.with_aspect(width as f32 / height as f32)?;
        }
        self.tracker.resize(width, height);
        Ok(())
    }

    /// Place the camera at `eye`, looking at `target`.
    ///
    /// # Errors
    ///
    /// Fails, leaving the previous pose in place, when `eye == target` or
    /// `up` is parallel to the view direction.
    pub fn place_camera(
        &mut self,
        eye: Vec3,
        target: Vec3,
        up: Vec3,
    ) -> Result<(), ViewError> {
        self.set_pose(CameraPose::new(eye, target, up))?;
        log::debug!("camera placed at {eye} looking at {target}");
        Ok(())
    }

    fn set_pose(&mut self, pose: CameraPose) -> Result<(), ViewError> {
        let camera_matrix = pose.camera_matrix()?;
        self.view = math::checked_inverse(camera_matrix)?;
        self.frame = CameraFrame::from_camera(camera_matrix, pose.up);
        self.pose = pose;
        Ok(())
    }

    // ── World transform ────────────────────────────────────────────────

    /// Shift the model by `v` (accumulates). `v` is in unscaled model
    /// units.
    pub fn translate_world(&mut self, v: Vec3) {
        self.world.translation += v;
    }

    /// Scale the model by `s` (multiplies).
    ///
    /// # Errors
    ///
    /// [`ViewError::Configuration`] unless `s` is finite and positive.
    pub fn scale_world(&mut self, s: f32) -> Result<(), ViewError> {
        if !s.is_finite() || s <= 0.0 {
            return Err(ViewError::Configuration(format!(
                "world scale {s} must be positive"
            )));
        }
        self.world.scale *= s;
        Ok(())
    }

    /// Clear translation and scale back to identity.
    pub fn reset_world(&mut self) {
        self.world = WorldTransform::default();
    }

    // ── Pointer input ───────────────────────────────────────────────────

    /// Dispatch a platform-agnostic event.
    pub fn handle_event(&mut self, event: PointerEvent) -> Result<(), ViewError> {
        match event {
            PointerEvent::Down { x, y, modifiers } => {
                self.pointer_down(x, y, modifiers);
            }
            PointerEvent::Moved { x, y } => self.pointer_move(x, y),
            PointerEvent::Up => self.pointer_up(),
            PointerEvent::Scroll { delta } => self.zoom(delta),
            PointerEvent::Resized { width, height } => {
                self.resize(width, height)?;
            }
        }
        Ok(())
    }

    /// Start a drag. Ignored while a drag is already active.
    pub fn pointer_down(&mut self, x: f32, y: f32, modifiers: Modifiers) {
        let axis = self.frame.pitch_axis();
        self.tracker.pointer_down(x, y, modifiers, axis);
    }

    /// Continue the active drag; ignored when no drag is active.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        let flip = self.orientation.faces_back();
        let Some(sample) = self.tracker.pointer_move(x, y, flip) else {
            return;
        };
        match sample.mode {
            DragMode::Rotate => {
                let _ = self.orientation.apply(&sample, &self.frame);
            }
            DragMode::Pan => self.pan(sample.delta),
        }
    }

    /// End the active drag. Accumulated orientation is kept.
    pub fn pointer_up(&mut self) {
        self.tracker.pointer_up();
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.tracker.is_dragging()
    }

    /// Mode of the drag in progress, if any.
    #[must_use]
    pub fn drag_mode(&self) -> Option<DragMode> {
        self.tracker.active().map(|drag| drag.mode)
    }

    // ── Pan / zoom / auto-rotate ────────────────────────────────────────

    /// Slide eye and target across the view plane by a centered-pixel
    /// delta, so the model follows the cursor at the target's depth.
    pub fn pan(&mut self, delta: Vec2) {
        let height = self.tracker.extent().y;
        let per_pixel =
            self.frustum.world_per_pixel(self.pose.distance(), height)
                * self.interaction.pan_speed;
        let offset =
            -(self.frame.right * delta.x + self.frame.up * delta.y) * per_pixel;
        let pose = CameraPose::new(
            self.pose.eye + offset,
            self.pose.target + offset,
            self.pose.up,
        );
        if let Err(e) = self.set_pose(pose) {
            log::warn!("pan rejected: {e}");
        }
    }

    /// Dolly toward (`delta > 0`) or away from the target, clamped to the
    /// configured distance range.
    pub fn zoom(&mut self, delta: f32) {
        let distance = (self.pose.distance()
            * (1.0 - delta * self.interaction.zoom_speed))
            .clamp(self.interaction.min_distance, self.interaction.max_distance);
        let pose = CameraPose::new(
            self.pose.target + self.frame.back * distance,
            self.pose.target,
            self.pose.up,
        );
        if let Err(e) = self.set_pose(pose) {
            log::warn!("zoom rejected: {e}");
        }
    }

    /// Apply time-driven motion for a frame that took `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        if self.auto_rotate && dt > 0.0 {
            let angle = self.interaction.auto_rotate_speed * dt;
            let _ = self.orientation.spin(angle, &self.frame);
        }
    }

    /// Toggle turntable auto-rotation. Returns the new state.
    pub fn toggle_auto_rotate(&mut self) -> bool {
        self.auto_rotate = !self.auto_rotate;
        self.auto_rotate
    }

    /// Whether auto-rotation is on.
    #[must_use]
    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    /// Drop all accumulated rotation.
    pub fn reset_orientation(&mut self) {
        self.orientation.reset();
    }

    // ── Composition ─────────────────────────────────────────────────────

    /// Compose the model-view-projection matrix for this frame.
    ///
    /// Also refreshes the diagnostic [`ModelViewState::world_state`].
    pub fn update_view(&mut self) -> Mat4 {
        let t = self.world.translation;
        let model_view = self.frustum.projection()
            * self.view
            * math::scaling(self.world.scale)
            * math::translation(-t)
            * self.orientation.rotation()
            * math::translation(t);
        self.state = ModelViewState {
            model_view,
            world_state: self.frustum.inverse_projection() * model_view,
        };
        model_view
    }

    // ── Read access ─────────────────────────────────────────────────────

    /// State produced by the last [`update_view`](Self::update_view).
    #[must_use]
    pub fn state(&self) -> &ModelViewState {
        &self.state
    }

    /// Current frustum.
    #[must_use]
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Current camera pose.
    #[must_use]
    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    /// Camera basis of the current pose.
    #[must_use]
    pub fn frame(&self) -> &CameraFrame {
        &self.frame
    }

    /// View matrix (inverse of the camera matrix).
    #[must_use]
    pub fn view(&self) -> Mat4 {
        self.view
    }

    /// Projection matrix.
    #[must_use]
    pub fn projection(&self) -> Mat4 {
        self.frustum.projection()
    }

    /// Model translation and scale.
    #[must_use]
    pub fn world(&self) -> &WorldTransform {
        &self.world
    }

    /// The live orientation model.
    #[must_use]
    pub fn orientation(&self) -> &dyn OrientationModel {
        self.orientation.as_ref()
    }
}

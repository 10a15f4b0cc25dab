//! Viewer session: the glue between a host's event loop and the camera.
//!
//! A [`Viewer`] owns the [`ViewComposer`], a [`FrameClock`] and a
//! [`TransformSink`]. Hosts feed it [`PointerEvent`]s as they arrive and
//! call [`frame`](Viewer::frame) once per animation callback; each frame
//! composes the transform and hands it to the sink.
//!
//! ```no_run
//! # use femview::{ModelViewState, TransformSink, ViewerBuilder};
//! # use femview::resource::{FsLoader, SourcePaths};
//! struct Latest(Option<ModelViewState>);
//! impl TransformSink for Latest {
//!     fn submit(&mut self, state: &ModelViewState) {
//!         self.0 = Some(*state);
//!     }
//! }
//!
//! let mut viewer =
//!     ViewerBuilder::new().with_size(800, 600).build(Latest(None))?;
//! let paths = SourcePaths::for_model("data/welding_sim", "shaders");
//! let _ = viewer.load_scene(&FsLoader::new("."), &paths)?;
//! let _ = viewer.frame(16.0);
//! # Ok::<(), femview::ViewError>(())
//! ```

use glam::Vec3;

use crate::camera::{CameraPose, ModelViewState, ViewComposer};
use crate::error::ViewError;
use crate::input::PointerEvent;
use crate::options::Options;
use crate::resource::{ResourceLoader, SceneSources, SourcePaths};
use crate::util::FrameClock;

/// Receives the composed transform once per frame.
///
/// The renderer side of the viewer: a GPU uniform, a test recorder, or
/// anything else that consumes the matrix.
pub trait TransformSink {
    /// Consume this frame's transform.
    fn submit(&mut self, state: &ModelViewState);
}

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
#[derive(Debug, Clone)]
pub struct ViewerBuilder {
    options: Option<Options>,
    width: u32,
    height: u32,
    pose: CameraPose,
}

impl Default for ViewerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewerBuilder {
    /// Create a builder with sensible defaults (800×600 canvas, default
    /// options, camera 500 units out on +Z).
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: None,
            width: 800,
            height: 600,
            pose: CameraPose::default(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the initial canvas size in pixels.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the initial camera pose.
    #[must_use]
    pub fn with_pose(mut self, pose: CameraPose) -> Self {
        self.pose = pose;
        self
    }

    /// Consume the builder and produce a [`Viewer`] that submits to `sink`.
    ///
    /// # Errors
    ///
    /// Fails when the options or the pose are degenerate.
    pub fn build<S: TransformSink>(
        self,
        sink: S,
    ) -> Result<Viewer<S>, ViewError> {
        let options = self.options.unwrap_or_default();
        let composer =
            ViewComposer::new(&options, self.width, self.height, self.pose)?;
        Ok(Viewer {
            composer,
            clock: FrameClock::new(),
            sink,
            options,
            scene: None,
        })
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// One interactive viewing session.
pub struct Viewer<S> {
    composer: ViewComposer,
    clock: FrameClock,
    sink: S,
    options: Options,
    scene: Option<SceneSources>,
}

impl<S: TransformSink> Viewer<S> {
    /// Load a scene's sources and frame the model.
    ///
    /// # Errors
    ///
    /// The first loader failure is returned as
    /// [`ViewError::ResourceLoad`]; the previous scene stays in place.
    pub fn load_scene(
        &mut self,
        loader: &impl ResourceLoader,
        paths: &SourcePaths,
    ) -> Result<&SceneSources, ViewError> {
        let sources = SceneSources::load(loader, paths)?;
        let center = sources.model_center()?;
        self.frame_model(center)?;
        log::info!("Loaded scene {} centered at {center}", paths.triangles);
        Ok(self.scene.insert(sources))
    }

    /// Point the camera at a model centered on `center` and make that
    /// center the rotation pivot.
    ///
    /// The model is scaled by `model_scale`; the camera looks at the scaled
    /// center from `view_distance` along z, with screen-up along −Y.
    ///
    /// # Errors
    ///
    /// Fails, leaving camera and world untouched, when the resulting pose
    /// is degenerate or the scale is not positive.
    pub fn frame_model(&mut self, center: Vec3) -> Result<(), ViewError> {
        let camera = &self.options.camera;
        let scale = camera.model_scale;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ViewError::Configuration(format!(
                "model scale {scale} must be positive"
            )));
        }
        let target = center * scale;
        let eye = Vec3::new(target.x, target.y, camera.view_distance);
        self.composer.place_camera(eye, target, Vec3::NEG_Y)?;

        self.composer.reset_world();
        self.composer.reset_orientation();
        self.composer.translate_world(-center);
        self.composer.scale_world(scale)
    }

    /// Feed one host input event.
    pub fn handle_event(&mut self, event: PointerEvent) -> Result<(), ViewError> {
        self.composer.handle_event(event)
    }

    /// Run one frame for an animation callback stamped `timestamp_ms`.
    ///
    /// Advances time-driven motion, composes the transform and submits it.
    pub fn frame(&mut self, timestamp_ms: f64) -> ModelViewState {
        let dt = self.clock.tick(timestamp_ms);
        self.compose(dt)
    }

    /// Run one frame timed by the system clock.
    pub fn frame_now(&mut self) -> ModelViewState {
        let dt = self.clock.tick_now();
        self.compose(dt)
    }

    fn compose(&mut self, dt: f32) -> ModelViewState {
        self.composer.advance(dt);
        let _ = self.composer.update_view();
        let state = *self.composer.state();
        self.sink.submit(&state);
        state
    }

    /// Forget the last frame time, e.g. when the host resumes after being
    /// hidden.
    pub fn pause(&mut self) {
        self.clock.reset();
    }

    // ── Accessors ───────────────────────────────────────────────────────

    /// The camera composer.
    #[must_use]
    pub fn composer(&self) -> &ViewComposer {
        &self.composer
    }

    /// Mutable access to the camera composer.
    pub fn composer_mut(&mut self) -> &mut ViewComposer {
        &mut self.composer
    }

    /// The transform sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Currently loaded scene, if any.
    #[must_use]
    pub fn scene(&self) -> Option<&SceneSources> {
        self.scene.as_ref()
    }

    /// Options this viewer was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.clock.fps()
    }
}

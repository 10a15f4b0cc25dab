//! Standalone window that drives the camera engine from mouse input.
//!
//! Usage: `femview [MODEL_STEM] [SHADER_DIR]`, e.g.
//! `femview data/welding_sim shaders`. Drawing is left to a renderer
//! plugged in as a [`TransformSink`]; this binary only reports the
//! composed transform and frame rate through the log and the window title.
//!
//! Keys: `A` toggles auto-rotation, `R` resets the orientation.

use std::{sync::Arc, time::Duration};

use femview::input::window::WindowInput;
use femview::resource::{FsLoader, SourcePaths};
use femview::{ModelViewState, TransformSink, Viewer, ViewerBuilder};
use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

/// How often the window title shows fresh stats.
const STATS_INTERVAL: Duration = Duration::from_secs(1);

/// Keeps the most recent transform and counts frames.
#[derive(Default)]
struct LatestTransform {
    state: ModelViewState,
    frames: u64,
}

impl TransformSink for LatestTransform {
    fn submit(&mut self, state: &ModelViewState) {
        self.state = *state;
        self.frames += 1;
    }
}

struct ViewerApp {
    window: Option<Arc<Window>>,
    viewer: Option<Viewer<LatestTransform>>,
    input: WindowInput,
    paths: SourcePaths,
    last_stats: Instant,
}

impl ViewerApp {
    fn new(paths: SourcePaths) -> Self {
        Self {
            window: None,
            viewer: None,
            input: WindowInput::new(),
            paths,
            last_stats: Instant::now(),
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        let Some(viewer) = &mut self.viewer else {
            return;
        };
        match code {
            KeyCode::KeyA => {
                let on = viewer.composer_mut().toggle_auto_rotate();
                log::info!("auto-rotate {}", if on { "on" } else { "off" });
            }
            KeyCode::KeyR => viewer.composer_mut().reset_orientation(),
            _ => {}
        }
    }

    fn report_stats(&mut self) {
        let (Some(window), Some(viewer)) = (&self.window, &self.viewer) else {
            return;
        };
        if self.last_stats.elapsed() < STATS_INTERVAL {
            return;
        }
        self.last_stats = Instant::now();
        let sink = viewer.sink();
        window.set_title(&format!(
            "femview - {:.0} fps - {} frames",
            viewer.fps(),
            sink.frames
        ));
        log::debug!("model-view: {}", sink.state.model_view);
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = Window::default_attributes()
            .with_title("femview")
            .with_inner_size(winit::dpi::LogicalSize::new(800, 600));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let viewer = ViewerBuilder::new()
            .with_size(size.width.max(1), size.height.max(1))
            .build(LatestTransform::default());
        let mut viewer = match viewer {
            Ok(v) => v,
            Err(e) => {
                log::error!("failed to start viewer: {e}");
                event_loop.exit();
                return;
            }
        };
        if let Err(e) = viewer.load_scene(&FsLoader::new("."), &self.paths) {
            log::warn!("showing an empty scene: {e}");
        }

        window.request_redraw();
        self.window = Some(window);
        self.viewer = Some(viewer);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
                return;
            }
            WindowEvent::RedrawRequested => {
                if let Some(viewer) = &mut self.viewer {
                    let _ = viewer.frame_now();
                }
                self.report_stats();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
                return;
            }
            WindowEvent::KeyboardInput { event: key, .. } => {
                if key.state == ElementState::Pressed {
                    if let PhysicalKey::Code(code) = key.physical_key {
                        self.handle_key(code);
                    }
                }
                return;
            }
            _ => {}
        }

        let (Some(pointer), Some(viewer)) =
            (self.input.translate(&event), &mut self.viewer)
        else {
            return;
        };
        if let Err(e) = viewer.handle_event(pointer) {
            log::warn!("input rejected: {e}");
        }
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let stem = args.next().unwrap_or_else(|| "data/welding_sim".to_owned());
    let shader_dir = args.next().unwrap_or_else(|| "shaders".to_owned());
    let paths = SourcePaths::for_model(&stem, &shader_dir);

    let event_loop = match EventLoop::new() {
        Ok(l) => l,
        Err(e) => {
            log::error!("failed to create event loop: {e}");
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = ViewerApp::new(paths);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("event loop error: {e}");
        std::process::exit(1);
    }
}

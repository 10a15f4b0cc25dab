//! Browser host: binds a [`Viewer`] to an HTML canvas.
//!
//! `mousedown` and `wheel` listen on the canvas, and `resize` on the
//! window, for the lifetime of the binding. `mousemove` and `mouseup`
//! listen on the document, and only while a drag is active, so a drag
//! keeps tracking when the cursor leaves the canvas. [`DragListeners`]
//! registers and removes those two with the same capture flag; a
//! mismatched flag would leave the listener attached.

use std::cell::{Cell, OnceCell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Event, EventTarget, HtmlCanvasElement, MouseEvent, WheelEvent,
};

use crate::error::ViewError;
use crate::input::{Modifiers, PointerEvent};
use crate::viewer::{TransformSink, Viewer};

/// Capture flag used for both registering and removing drag listeners.
const DRAG_CAPTURE: bool = true;

/// Wheel pixels that count as one zoom step.
const PIXELS_PER_STEP: f32 = 100.0;

/// A viewer shared between DOM callbacks and the animation loop.
pub type SharedViewer<S> = Rc<RefCell<Viewer<S>>>;

type MouseCallback = Closure<dyn FnMut(MouseEvent)>;

/// Route panics and `log` output to the browser console. Call once at
/// startup; later calls are ignored.
pub fn install_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("console logger already installed");
    }
}

fn js_error(context: &str, err: &JsValue) -> ViewError {
    ViewError::Configuration(format!("{context}: {err:?}"))
}

fn modifiers_of(event: &MouseEvent) -> Modifiers {
    Modifiers {
        shift: event.shift_key(),
        control: event.ctrl_key(),
        alt: event.alt_key(),
    }
}

/// Event position relative to the canvas's top-left corner.
fn canvas_position(canvas: &HtmlCanvasElement, event: &MouseEvent) -> (f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    (
        (f64::from(event.client_x()) - rect.left()) as f32,
        (f64::from(event.client_y()) - rect.top()) as f32,
    )
}

/// Displayed canvas size in CSS pixels, the space pointer positions are
/// measured in. Falls back to the drawing-buffer size while the canvas is
/// not laid out.
fn canvas_size(canvas: &HtmlCanvasElement) -> (u32, u32) {
    let rect = canvas.get_bounding_client_rect();
    let (width, height) = (rect.width().round(), rect.height().round());
    if width >= 1.0 && height >= 1.0 {
        (width as u32, height as u32)
    } else {
        (canvas.width(), canvas.height())
    }
}

// ── Drag listeners ───────────────────────────────────────────────────────

/// Document-level `mousemove`/`mouseup` listeners for an active drag.
///
/// [`attach`](Self::attach) and [`detach`](Self::detach) are idempotent
/// and use the same capture flag. Dropping the listeners detaches them.
pub struct DragListeners {
    target: EventTarget,
    on_move: MouseCallback,
    on_up: MouseCallback,
    attached: Cell<bool>,
}

impl DragListeners {
    fn new(
        target: EventTarget,
        on_move: MouseCallback,
        on_up: MouseCallback,
    ) -> Self {
        Self {
            target,
            on_move,
            on_up,
            attached: Cell::new(false),
        }
    }

    /// Start delivering move and release events.
    ///
    /// # Errors
    ///
    /// Fails when the browser refuses a listener; nothing stays attached.
    pub fn attach(&self) -> Result<(), ViewError> {
        if self.attached.get() {
            return Ok(());
        }
        self.target
            .add_event_listener_with_callback_and_bool(
                "mousemove",
                self.on_move.as_ref().unchecked_ref(),
                DRAG_CAPTURE,
            )
            .map_err(|e| js_error("mousemove listener", &e))?;
        if let Err(e) = self.target.add_event_listener_with_callback_and_bool(
            "mouseup",
            self.on_up.as_ref().unchecked_ref(),
            DRAG_CAPTURE,
        ) {
            let _ = self.target.remove_event_listener_with_callback_and_bool(
                "mousemove",
                self.on_move.as_ref().unchecked_ref(),
                DRAG_CAPTURE,
            );
            return Err(js_error("mouseup listener", &e));
        }
        self.attached.set(true);
        Ok(())
    }

    /// Stop delivering move and release events.
    pub fn detach(&self) {
        if !self.attached.replace(false) {
            return;
        }
        let _ = self.target.remove_event_listener_with_callback_and_bool(
            "mousemove",
            self.on_move.as_ref().unchecked_ref(),
            DRAG_CAPTURE,
        );
        let _ = self.target.remove_event_listener_with_callback_and_bool(
            "mouseup",
            self.on_up.as_ref().unchecked_ref(),
            DRAG_CAPTURE,
        );
    }

    /// Whether the listeners are currently registered.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached.get()
    }
}

impl Drop for DragListeners {
    fn drop(&mut self) {
        self.detach();
    }
}

// ── Canvas binding ───────────────────────────────────────────────────────

/// Listeners connecting a canvas to a shared viewer. Dropping the binding
/// removes every listener it registered.
pub struct CanvasBinding<S: 'static> {
    viewer: SharedViewer<S>,
    window: web_sys::Window,
    canvas: HtmlCanvasElement,
    drag: Rc<OnceCell<DragListeners>>,
    on_down: MouseCallback,
    on_wheel: Closure<dyn FnMut(WheelEvent)>,
    on_resize: Closure<dyn FnMut(Event)>,
}

impl<S: TransformSink + 'static> CanvasBinding<S> {
    /// Bind the canvas with element id `canvas_id` to `viewer`.
    ///
    /// # Errors
    ///
    /// Fails when there is no document, no element with that id, the
    /// element is not a canvas, or a listener cannot be registered.
    pub fn bind(
        canvas_id: &str,
        viewer: SharedViewer<S>,
    ) -> Result<Self, ViewError> {
        let window = web_sys::window().ok_or_else(|| {
            ViewError::Configuration("no browser window".into())
        })?;
        let document = window.document().ok_or_else(|| {
            ViewError::Configuration("no browser document".into())
        })?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| {
                ViewError::Configuration(format!("no element #{canvas_id}"))
            })?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| {
                ViewError::Configuration(format!("#{canvas_id} is not a canvas"))
            })?;

        let drag: Rc<OnceCell<DragListeners>> = Rc::new(OnceCell::new());
        let listeners = DragListeners::new(
            document.into(),
            move_callback(&viewer, &canvas),
            up_callback(&viewer, Rc::downgrade(&drag)),
        );
        let _ = drag.set(listeners);

        let binding = Self {
            on_down: down_callback(&viewer, &canvas, Rc::downgrade(&drag)),
            on_wheel: wheel_callback(&viewer),
            on_resize: resize_callback(&viewer, &canvas),
            viewer,
            window,
            canvas,
            drag,
        };
        binding
            .canvas
            .add_event_listener_with_callback(
                "mousedown",
                binding.on_down.as_ref().unchecked_ref(),
            )
            .map_err(|e| js_error("mousedown listener", &e))?;
        binding
            .canvas
            .add_event_listener_with_callback(
                "wheel",
                binding.on_wheel.as_ref().unchecked_ref(),
            )
            .map_err(|e| js_error("wheel listener", &e))?;
        binding
            .window
            .add_event_listener_with_callback(
                "resize",
                binding.on_resize.as_ref().unchecked_ref(),
            )
            .map_err(|e| js_error("resize listener", &e))?;

        let (width, height) = canvas_size(&binding.canvas);
        binding
            .viewer
            .borrow_mut()
            .handle_event(PointerEvent::Resized { width, height })?;
        log::info!("Bound viewer to canvas #{canvas_id} ({width}x{height})");
        Ok(binding)
    }

    /// The shared viewer.
    #[must_use]
    pub fn viewer(&self) -> &SharedViewer<S> {
        &self.viewer
    }

    /// Whether a drag currently holds document listeners.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.get().is_some_and(DragListeners::is_attached)
    }
}

impl<S: 'static> Drop for CanvasBinding<S> {
    fn drop(&mut self) {
        let _ = self.canvas.remove_event_listener_with_callback(
            "mousedown",
            self.on_down.as_ref().unchecked_ref(),
        );
        let _ = self.canvas.remove_event_listener_with_callback(
            "wheel",
            self.on_wheel.as_ref().unchecked_ref(),
        );
        let _ = self.window.remove_event_listener_with_callback(
            "resize",
            self.on_resize.as_ref().unchecked_ref(),
        );
    }
}

fn dispatch<S: TransformSink>(viewer: &SharedViewer<S>, event: PointerEvent) {
    // A callback fired while the viewer is mid-frame is dropped
    let Ok(mut viewer) = viewer.try_borrow_mut() else {
        log::warn!("viewer busy, dropping {event:?}");
        return;
    };
    if let Err(e) = viewer.handle_event(event) {
        log::warn!("pointer event rejected: {e}");
    }
}

fn down_callback<S: TransformSink + 'static>(
    viewer: &SharedViewer<S>,
    canvas: &HtmlCanvasElement,
    drag: Weak<OnceCell<DragListeners>>,
) -> MouseCallback {
    let viewer = Rc::clone(viewer);
    let canvas = canvas.clone();
    Closure::new(move |event: MouseEvent| {
        if event.button() != 0 {
            return;
        }
        event.prevent_default();
        let (x, y) = canvas_position(&canvas, &event);
        dispatch(
            &viewer,
            PointerEvent::Down {
                x,
                y,
                modifiers: modifiers_of(&event),
            },
        );
        let Some(drag) = drag.upgrade() else {
            return;
        };
        if let Some(Err(e)) = drag.get().map(DragListeners::attach) {
            log::warn!("drag listeners not attached: {e}");
            dispatch(&viewer, PointerEvent::Up);
        }
    })
}

fn move_callback<S: TransformSink + 'static>(
    viewer: &SharedViewer<S>,
    canvas: &HtmlCanvasElement,
) -> MouseCallback {
    let viewer = Rc::clone(viewer);
    let canvas = canvas.clone();
    Closure::new(move |event: MouseEvent| {
        let (x, y) = canvas_position(&canvas, &event);
        dispatch(&viewer, PointerEvent::Moved { x, y });
    })
}

fn up_callback<S: TransformSink + 'static>(
    viewer: &SharedViewer<S>,
    drag: Weak<OnceCell<DragListeners>>,
) -> MouseCallback {
    let viewer = Rc::clone(viewer);
    Closure::new(move |_event: MouseEvent| {
        dispatch(&viewer, PointerEvent::Up);
        if let Some(drag) = drag.upgrade() {
            if let Some(listeners) = drag.get() {
                listeners.detach();
            }
        }
    })
}

fn wheel_callback<S: TransformSink + 'static>(
    viewer: &SharedViewer<S>,
) -> Closure<dyn FnMut(WheelEvent)> {
    let viewer = Rc::clone(viewer);
    Closure::new(move |event: WheelEvent| {
        event.prevent_default();
        // Positive deltaY scrolls down, which zooms out
        let delta = match event.delta_mode() {
            WheelEvent::DOM_DELTA_PIXEL => {
                -(event.delta_y() as f32) / PIXELS_PER_STEP
            }
            _ => -(event.delta_y() as f32),
        };
        dispatch(&viewer, PointerEvent::Scroll { delta });
    })
}

fn resize_callback<S: TransformSink + 'static>(
    viewer: &SharedViewer<S>,
    canvas: &HtmlCanvasElement,
) -> Closure<dyn FnMut(Event)> {
    let viewer = Rc::clone(viewer);
    let canvas = canvas.clone();
    Closure::new(move |_event: Event| {
        let (width, height) = canvas_size(&canvas);
        dispatch(&viewer, PointerEvent::Resized { width, height });
    })
}

// ── Animation loop ───────────────────────────────────────────────────────

/// Drive `viewer` from `requestAnimationFrame`, one frame per callback,
/// for the lifetime of the page.
///
/// # Errors
///
/// Fails when the first frame cannot be requested.
pub fn start_animation<S: TransformSink + 'static>(
    viewer: SharedViewer<S>,
) -> Result<(), ViewError> {
    let holder: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> =
        Rc::new(RefCell::new(None));
    let next = Rc::clone(&holder);
    *holder.borrow_mut() = Some(Closure::new(move |timestamp_ms: f64| {
        if let Ok(mut viewer) = viewer.try_borrow_mut() {
            let _ = viewer.frame(timestamp_ms);
        }
        if let Some(callback) = next.borrow().as_ref() {
            if let Err(e) = request_frame(callback) {
                log::warn!("animation loop stopped: {e}");
            }
        }
    }));
    if let Some(callback) = holder.borrow().as_ref() {
        request_frame(callback)?;
    }
    Ok(())
}

fn request_frame(callback: &Closure<dyn FnMut(f64)>) -> Result<(), ViewError> {
    let window = web_sys::window()
        .ok_or_else(|| ViewError::Configuration("no browser window".into()))?;
    let _ = window
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .map_err(|e| js_error("requestAnimationFrame", &e))?;
    Ok(())
}

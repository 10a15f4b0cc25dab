//! Input handling: platform-agnostic events and the pointer tracker that
//! turns them into drag samples.

/// Platform-agnostic pointer events.
pub mod event;
/// Drag state machine.
pub mod pointer;
/// Translation of winit window events.
#[cfg(feature = "viewer")]
pub mod window;

pub use event::{Modifiers, PointerEvent};
pub use pointer::{ActiveDrag, DragMode, DragSample, PointerTracker};

//! Drag tracking: raw pointer positions in, drag samples out.

use glam::{Vec2, Vec3};

use super::event::Modifiers;
use crate::options::ModifierKey;

/// What an active drag does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Turn the model.
    Rotate,
    /// Slide the camera in its view plane.
    Pan,
}

/// State of the drag in progress. Exists only between pointer-down and
/// pointer-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveDrag {
    /// Rotate or pan, fixed at pointer-down.
    pub mode: DragMode,
    /// Centered position where the drag started.
    pub origin: Vec2,
    /// Centered position of the last processed move.
    pub previous: Vec2,
    /// Delta of the last processed move.
    pub delta: Vec2,
    /// Unit pitch axis captured at pointer-down.
    pub axis: Vec3,
}

/// One processed pointer move, handed to the orientation model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSample {
    /// Rotate or pan.
    pub mode: DragMode,
    /// Centered position before the move.
    pub previous: Vec2,
    /// Centered position after the move.
    pub current: Vec2,
    /// `current - previous`, with the vertical component negated when the
    /// camera faces the model's back.
    pub delta: Vec2,
    /// Unit pitch axis captured at pointer-down.
    pub axis: Vec3,
    /// Canvas width and height in pixels.
    pub extent: Vec2,
}

/// Converts pointer-down/move/up into drag samples.
///
/// Positions are re-expressed in a canvas-centered frame: x grows to the
/// right, y grows upward, (0, 0) is the canvas center.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    width: u32,
    height: u32,
    pan_key: ModifierKey,
    drag: Option<ActiveDrag>,
}

impl PointerTracker {
    /// Create a tracker for a canvas of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32, pan_key: ModifierKey) -> Self {
        Self {
            width,
            height,
            pan_key,
            drag: None,
        }
    }

    /// Update the canvas size used for centering.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Canvas width and height in pixels.
    #[must_use]
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Map a top-left-origin canvas position into the centered frame.
    #[must_use]
    pub fn to_centered(&self, x: f32, y: f32) -> Vec2 {
        let half = self.extent() * 0.5;
        Vec2::new(x - half.x, half.y - y)
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// The drag in progress, if any.
    #[must_use]
    pub fn active(&self) -> Option<&ActiveDrag> {
        self.drag.as_ref()
    }

    /// Start a drag at `(x, y)`.
    ///
    /// A second press while a drag is active is ignored. `axis` is the
    /// unit pitch axis derived from the camera at press time.
    pub fn pointer_down(
        &mut self,
        x: f32,
        y: f32,
        modifiers: Modifiers,
        axis: Vec3,
    ) {
        if self.drag.is_some() {
            return;
        }
        let origin = self.to_centered(x, y);
        let mode = if modifiers.is_held(self.pan_key) {
            DragMode::Pan
        } else {
            DragMode::Rotate
        };
        self.drag = Some(ActiveDrag {
            mode,
            origin,
            previous: origin,
            delta: Vec2::ZERO,
            axis,
        });
    }

    /// Process a move to `(x, y)`. Returns `None` when no drag is active.
    ///
    /// `flip_vertical` negates the vertical delta of a rotate drag, so that
    /// dragging up keeps tilting the model the same visual way once the
    /// camera has swung round to its back. Pan drags move along the
    /// camera's own axes and are never flipped.
    pub fn pointer_move(
        &mut self,
        x: f32,
        y: f32,
        flip_vertical: bool,
    ) -> Option<DragSample> {
        let current = self.to_centered(x, y);
        let extent = self.extent();
        let drag = self.drag.as_mut()?;

        let mut delta = current - drag.previous;
        if flip_vertical && drag.mode == DragMode::Rotate {
            delta.y = -delta.y;
        }
        let sample = DragSample {
            mode: drag.mode,
            previous: drag.previous,
            current,
            delta,
            axis: drag.axis,
            extent,
        };
        drag.delta = delta;
        drag.previous = current;
        Some(sample)
    }

    /// End the drag. A release without an active drag is ignored.
    pub fn pointer_up(&mut self) {
        if let Some(drag) = self.drag.take() {
            log::debug!(
                "drag ended {} px from its origin",
                (drag.previous - drag.origin).length()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> PointerTracker {
        PointerTracker::new(800, 600, ModifierKey::Shift)
    }

    #[test]
    fn positions_are_centered_with_y_up() {
        let t = tracker();
        assert_eq!(t.to_centered(400.0, 300.0), Vec2::ZERO);
        assert_eq!(t.to_centered(0.0, 0.0), Vec2::new(-400.0, 300.0));
        assert_eq!(t.to_centered(800.0, 600.0), Vec2::new(400.0, -300.0));
    }

    #[test]
    fn move_without_drag_is_ignored() {
        let mut t = tracker();
        assert!(t.pointer_move(10.0, 10.0, false).is_none());
        assert!(!t.is_dragging());
    }

    #[test]
    fn drag_reports_deltas_between_moves() {
        let mut t = tracker();
        t.pointer_down(0.0, 0.0, Modifiers::default(), Vec3::X);
        let s1 = t.pointer_move(100.0, 0.0, false).unwrap();
        assert_eq!(s1.delta, Vec2::new(100.0, 0.0));
        assert_eq!(s1.mode, DragMode::Rotate);
        assert_eq!(s1.extent, Vec2::new(800.0, 600.0));

        // Screen y grows downward, centered y grows upward
        let s2 = t.pointer_move(100.0, 50.0, false).unwrap();
        assert_eq!(s2.delta, Vec2::new(0.0, -50.0));
        assert_eq!(s2.previous, s1.current);
    }

    #[test]
    fn flip_negates_only_vertical_delta() {
        let mut t = tracker();
        t.pointer_down(400.0, 300.0, Modifiers::default(), Vec3::X);
        let s = t.pointer_move(410.0, 280.0, true).unwrap();
        assert_eq!(s.delta, Vec2::new(10.0, -20.0));
    }

    #[test]
    fn flip_leaves_pan_delta_alone() {
        let mut t = tracker();
        t.pointer_down(400.0, 300.0, Modifiers::SHIFT, Vec3::X);
        let s = t.pointer_move(410.0, 280.0, true).unwrap();
        assert_eq!(s.mode, DragMode::Pan);
        assert_eq!(s.delta, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn second_press_does_not_restart_drag() {
        let mut t = tracker();
        t.pointer_down(0.0, 0.0, Modifiers::default(), Vec3::X);
        t.pointer_down(500.0, 500.0, Modifiers::SHIFT, Vec3::Y);
        let drag = t.active().unwrap();
        assert_eq!(drag.origin, Vec2::new(-400.0, 300.0));
        assert_eq!(drag.mode, DragMode::Rotate);
        assert_eq!(drag.axis, Vec3::X);
    }

    #[test]
    fn pan_modifier_selects_pan_mode() {
        let mut t = tracker();
        t.pointer_down(0.0, 0.0, Modifiers::SHIFT, Vec3::X);
        assert_eq!(t.active().unwrap().mode, DragMode::Pan);

        let mut ctrl = PointerTracker::new(800, 600, ModifierKey::Control);
        ctrl.pointer_down(0.0, 0.0, Modifiers::SHIFT, Vec3::X);
        assert_eq!(ctrl.active().unwrap().mode, DragMode::Rotate);
    }

    #[test]
    fn release_ends_drag_and_is_idempotent() {
        let mut t = tracker();
        t.pointer_up();
        assert!(!t.is_dragging());

        t.pointer_down(0.0, 0.0, Modifiers::default(), Vec3::X);
        t.pointer_up();
        assert!(!t.is_dragging());
        assert!(t.pointer_move(50.0, 50.0, false).is_none());
        t.pointer_up();
    }
}

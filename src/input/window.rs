//! Translation of winit window events into [`PointerEvent`]s.
//!
//! winit reports the cursor position and button presses as separate
//! events, so the translator remembers the last cursor position and
//! modifier state and stamps them onto button events.

use ::winit::event::{
    ElementState, MouseButton, MouseScrollDelta, WindowEvent,
};

use super::event::{Modifiers, PointerEvent};

/// Pixels of trackpad scroll that count as one wheel step.
const PIXELS_PER_STEP: f32 = 100.0;

/// Stateful winit-to-[`PointerEvent`] translator.
#[derive(Debug, Default)]
pub struct WindowInput {
    cursor: (f32, f32),
    modifiers: Modifiers,
}

impl WindowInput {
    /// Create a translator with the cursor at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate one window event. Returns `None` for events the camera
    /// does not consume.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<PointerEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x as f32, position.y as f32);
                Some(PointerEvent::Moved {
                    x: self.cursor.0,
                    y: self.cursor.1,
                })
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => Some(match state {
                ElementState::Pressed => PointerEvent::Down {
                    x: self.cursor.0,
                    y: self.cursor.1,
                    modifiers: self.modifiers,
                },
                ElementState::Released => PointerEvent::Up,
            }),
            WindowEvent::ModifiersChanged(modifiers) => {
                let state = modifiers.state();
                self.modifiers = Modifiers {
                    shift: state.shift_key(),
                    control: state.control_key(),
                    alt: state.alt_key(),
                };
                None
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => {
                        pos.y as f32 / PIXELS_PER_STEP
                    }
                };
                Some(PointerEvent::Scroll { delta: steps })
            }
            WindowEvent::Resized(size) => Some(PointerEvent::Resized {
                width: size.width,
                height: size.height,
            }),
            // Losing focus mid-drag would otherwise leave the drag active
            WindowEvent::Focused(false) => Some(PointerEvent::Up),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use ::winit::dpi::PhysicalSize;

    use super::*;

    #[test]
    fn resize_is_forwarded() {
        let mut input = WindowInput::new();
        let event = WindowEvent::Resized(PhysicalSize::new(1024, 768));
        assert_eq!(
            input.translate(&event),
            Some(PointerEvent::Resized {
                width: 1024,
                height: 768
            })
        );
    }

    #[test]
    fn focus_loss_ends_the_drag() {
        let mut input = WindowInput::new();
        assert_eq!(
            input.translate(&WindowEvent::Focused(false)),
            Some(PointerEvent::Up)
        );
        assert_eq!(input.translate(&WindowEvent::Focused(true)), None);
    }
}

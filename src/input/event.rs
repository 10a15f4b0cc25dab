use crate::options::ModifierKey;

/// Platform-agnostic pointer and viewport events.
///
/// Positions are in canvas pixels with the origin at the top-left corner,
/// as delivered by window systems and the DOM.
///
/// # Example
///
/// ```ignore
/// viewer.handle_event(PointerEvent::Down {
///     x: 400.0,
///     y: 300.0,
///     modifiers: Modifiers::default(),
/// })?;
/// viewer.handle_event(PointerEvent::Moved { x: 500.0, y: 300.0 })?;
/// viewer.handle_event(PointerEvent::Up)?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed.
    Down {
        /// Horizontal position in pixels.
        x: f32,
        /// Vertical position in pixels.
        y: f32,
        /// Modifier keys held at press time.
        modifiers: Modifiers,
    },
    /// Pointer moved to an absolute canvas position.
    Moved {
        /// Horizontal position in pixels.
        x: f32,
        /// Vertical position in pixels.
        y: f32,
    },
    /// Primary button released.
    Up,
    /// Scroll wheel (positive = zoom in).
    Scroll {
        /// Scroll amount in wheel steps.
        delta: f32,
    },
    /// Canvas resized.
    Resized {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },
}

/// Modifier key state at the time of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct Modifiers {
    /// Whether a shift key is held.
    pub shift: bool,
    /// Whether a control key is held.
    pub control: bool,
    /// Whether an alt/option key is held.
    pub alt: bool,
}

impl Modifiers {
    /// Only shift held.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
    };

    /// Whether `key` is held.
    #[must_use]
    pub fn is_held(self, key: ModifierKey) -> bool {
        match key {
            ModifierKey::Shift => self.shift,
            ModifierKey::Control => self.control,
            ModifierKey::Alt => self.alt,
        }
    }
}

use glam::Vec2;

use crate::camera::controller::{BUTTON_LEFT, BUTTON_MIDDLE, BUTTON_RIGHT};

/// Platform-agnostic input events over the canvas.
///
/// These are fed into an [`InputDispatcher`](super::InputDispatcher), which
/// offers pointer events to the placement system first and falls back to
/// the camera.
///
/// # Example
///
/// ```ignore
/// session.handle_input(InputEvent::PointerDown {
///     button: MouseButton::Left,
///     x: 100.0,
///     y: 200.0,
/// });
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse button pressed.
    PointerDown {
        /// Which button.
        button: MouseButton,
        /// Horizontal position in canvas pixels.
        x: f32,
        /// Vertical position in canvas pixels.
        y: f32,
    },
    /// Cursor moved to an absolute canvas position.
    PointerMove {
        /// Horizontal position in canvas pixels.
        x: f32,
        /// Vertical position in canvas pixels.
        y: f32,
    },
    /// Mouse button released.
    PointerUp {
        /// Which button.
        button: MouseButton,
    },
    /// Cursor left the canvas; held buttons are released.
    PointerLeave,
    /// Scroll wheel (positive = zoom out).
    Wheel {
        /// Vertical scroll amount.
        delta_y: f32,
    },
    /// Fingers touched down; all current contacts.
    TouchStart {
        /// Contact positions in canvas pixels.
        touches: Vec<Vec2>,
    },
    /// Fingers moved; all current contacts.
    TouchMove {
        /// Contact positions in canvas pixels.
        touches: Vec<Vec2>,
    },
    /// Fingers lifted; the contacts still down.
    TouchEnd {
        /// Remaining contact positions.
        remaining: Vec<Vec2>,
    },
    /// Key pressed (`KeyboardEvent.code` / `winit` `KeyCode` debug string).
    KeyDown {
        /// Key string, e.g. `"ArrowLeft"` or `"KeyQ"`.
        key: String,
    },
    /// Key released.
    KeyUp {
        /// Key string.
        key: String,
    },
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

impl MouseButton {
    /// Bit for this button in a pointer button mask.
    #[must_use]
    pub fn mask_bit(self) -> u8 {
        match self {
            Self::Left => BUTTON_LEFT,
            Self::Right => BUTTON_RIGHT,
            Self::Middle => BUTTON_MIDDLE,
        }
    }
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            _ => Self::Left,
        }
    }
}

use glam::Vec2;

use super::controller::{OrbitCameraController, BUTTON_LEFT};
use crate::input::MouseButton;

/// Tracks pointer buttons and touch points between events and feeds the
/// resulting deltas to an [`OrbitCameraController`].
///
/// One finger orbits like a left-button drag. Two fingers pinch-zoom by the
/// ratio of finger spreads and pan by the midpoint delta.
#[derive(Debug, Clone, Default)]
pub struct CameraGestures {
    buttons: u8,
    last_pointer: Option<Vec2>,
    last_touch: Option<Vec2>,
    /// Finger spread at the previous two-finger event; 0 when unset.
    last_pinch_distance: f32,
}

impl CameraGestures {
    /// Create an idle tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently held pointer buttons as a mask.
    #[must_use]
    pub fn buttons(&self) -> u8 {
        self.buttons
    }

    /// Button press at `pos`.
    pub fn pointer_down(&mut self, button: MouseButton, pos: Vec2) {
        self.buttons |= button.mask_bit();
        self.last_pointer = Some(pos);
    }

    /// Button release.
    pub fn pointer_up(&mut self, button: MouseButton) {
        self.buttons &= !button.mask_bit();
    }

    /// Pointer motion. Returns whether the camera consumed it as a drag.
    pub fn pointer_move(&mut self, pos: Vec2, controller: &mut OrbitCameraController) -> bool {
        let last = self.last_pointer.replace(pos);
        match last {
            Some(last) if self.buttons != 0 => {
                let delta = pos - last;
                controller.on_pointer_drag(self.buttons, delta.x, delta.y);
                true
            }
            _ => false,
        }
    }

    /// Forget held buttons, e.g. when the pointer leaves the canvas.
    pub fn release_all(&mut self) {
        self.buttons = 0;
    }

    /// New touch contacts.
    pub fn touch_start(&mut self, touches: &[Vec2]) {
        self.reset_touch(touches);
    }

    /// Touch motion with the current contact positions.
    pub fn touch_move(&mut self, touches: &[Vec2], controller: &mut OrbitCameraController) {
        match touches {
            [one] => {
                if let Some(last) = self.last_touch {
                    let delta = *one - last;
                    controller.on_pointer_drag(BUTTON_LEFT, delta.x, delta.y);
                }
                self.last_touch = Some(*one);
            }
            [a, b, ..] => {
                let spread = a.distance(*b);
                if self.last_pinch_distance > 0.0 {
                    controller.on_pinch(spread / self.last_pinch_distance);
                }
                self.last_pinch_distance = spread;

                let mid = (*a + *b) * 0.5;
                if let Some(last) = self.last_touch {
                    let delta = mid - last;
                    controller.on_two_finger_pan(delta.x, delta.y);
                }
                self.last_touch = Some(mid);
            }
            [] => {}
        }
    }

    /// Contacts lifted; `remaining` are the ones still down.
    pub fn touch_end(&mut self, remaining: &[Vec2]) {
        self.reset_touch(remaining);
    }

    fn reset_touch(&mut self, touches: &[Vec2]) {
        self.last_pinch_distance = 0.0;
        self.last_touch = match touches {
            [one] => Some(*one),
            [a, b, ..] => {
                self.last_pinch_distance = a.distance(*b);
                Some((*a + *b) * 0.5)
            }
            [] => None,
        };
    }
}

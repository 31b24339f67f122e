//! Routes canvas input between the placement system and the camera.
//!
//! Pointer events are offered to the [`PlacementSystem`] first. Whatever
//! it claims (a spawn, a pick that starts a drag, drag motion, the release
//! that ends a drag) never reaches the camera, so dragging a placeholder
//! never orbits at the same time. Everything else drives the orbit camera
//! through [`CameraGestures`]. Discrete keys map to [`ViewerCommand`]s
//! through [`KeyBindings`]; arrow keys are tracked as held state for the
//! per-frame key pan.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::event::{InputEvent, MouseButton};
use crate::camera::controller::{ArrowKeys, OrbitCameraController};
use crate::camera::input::CameraGestures;
use crate::placement::PlacementSystem;
use crate::render::Renderer;
use crate::session::ViewerCommand;

/// Rotation step for the rotate-left/right keys, in degrees.
pub const ROTATE_STEP_DEGREES: f32 = 15.0;

/// Maps physical key strings to [`ViewerCommand`] variants.
///
/// Key strings use the `KeyboardEvent.code` format, which matches the
/// `winit::keyboard::KeyCode` debug format: `"KeyQ"`, `"Delete"`,
/// `"Escape"`, etc.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeyBindings {
    /// Forward map: key string → command tag.
    bindings: HashMap<String, KeyCommandTag>,
}

/// Serializable tag for the subset of [`ViewerCommand`] that can be
/// key-bound (discrete, parameterless actions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommandTag {
    /// Delete the selected placeholder.
    DeleteSelected,
    /// Cancel placement mode and clear the selection.
    Cancel,
    /// Rotate the selection by -15°.
    RotateLeft,
    /// Rotate the selection by +15°.
    RotateRight,
    /// Leave the hotspot view.
    Back,
}

impl KeyCommandTag {
    /// Convert to the corresponding [`ViewerCommand`].
    fn to_command(self) -> ViewerCommand {
        match self {
            Self::DeleteSelected => ViewerCommand::DeleteSelected,
            Self::Cancel => ViewerCommand::CancelInteraction,
            Self::RotateLeft => ViewerCommand::NudgeSelectedRotation {
                delta_degrees: -ROTATE_STEP_DEGREES,
            },
            Self::RotateRight => ViewerCommand::NudgeSelectedRotation {
                delta_degrees: ROTATE_STEP_DEGREES,
            },
            Self::Back => ViewerCommand::Back,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = HashMap::from([
            ("Delete".into(), KeyCommandTag::DeleteSelected),
            ("Backspace".into(), KeyCommandTag::DeleteSelected),
            ("Escape".into(), KeyCommandTag::Cancel),
            ("KeyQ".into(), KeyCommandTag::RotateLeft),
            ("KeyE".into(), KeyCommandTag::RotateRight),
        ]);
        Self { bindings }
    }
}

impl KeyBindings {
    /// Look up the command for a physical key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<ViewerCommand> {
        self.bindings.get(key).map(|tag| tag.to_command())
    }

    /// Bind `key` to `tag`, replacing any previous binding of that key.
    pub fn bind(&mut self, key: impl Into<String>, tag: KeyCommandTag) {
        let _ = self.bindings.insert(key.into(), tag);
    }

    /// Remove a key's binding.
    pub fn unbind(&mut self, key: &str) {
        let _ = self.bindings.remove(key);
    }
}

/// Where an input event ended up.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    /// Claimed by the placement system.
    Placement,
    /// Consumed by the camera.
    Camera,
    /// A bound key produced a command for the session to execute.
    Command(ViewerCommand),
    /// Nobody wanted it.
    Ignored,
}

/// Converts raw canvas events into placement and camera calls.
///
/// Owns the transient input state (held buttons, touch baseline, held
/// arrows) and the keyboard binding map.
#[derive(Debug, Clone, Default)]
pub struct InputDispatcher {
    gestures: CameraGestures,
    arrows: ArrowKeys,
    key_bindings: KeyBindings,
}

impl InputDispatcher {
    /// Create a dispatcher with the given key bindings.
    #[must_use]
    pub fn new(key_bindings: KeyBindings) -> Self {
        Self {
            key_bindings,
            ..Self::default()
        }
    }

    /// Arrow keys currently held.
    #[must_use]
    pub fn arrow_keys(&self) -> ArrowKeys {
        self.arrows
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeyBindings {
        &self.key_bindings
    }

    /// Mutable access to the key bindings for reconfiguration.
    pub fn key_bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.key_bindings
    }

    /// Route one event.
    pub fn handle_event<R: Renderer + ?Sized>(
        &mut self,
        event: InputEvent,
        placement: &mut PlacementSystem,
        renderer: &mut R,
        camera: &mut OrbitCameraController,
    ) -> Route {
        match event {
            InputEvent::PointerDown { button, x, y } => {
                // Only a lone left press is offered to placement.
                let lone_left = button == MouseButton::Left && self.gestures.buttons() == 0;
                if lone_left && placement.pointer_down(renderer, x, y) {
                    return Route::Placement;
                }
                self.gestures.pointer_down(button, Vec2::new(x, y));
                Route::Camera
            }
            InputEvent::PointerMove { x, y } => {
                if placement.pointer_move(renderer, x, y) {
                    return Route::Placement;
                }
                if self.gestures.pointer_move(Vec2::new(x, y), camera) {
                    Route::Camera
                } else {
                    Route::Ignored
                }
            }
            InputEvent::PointerUp { button } => {
                let held = self.gestures.buttons() & button.mask_bit() != 0;
                self.gestures.pointer_up(button);
                if button == MouseButton::Left && placement.pointer_up() {
                    Route::Placement
                } else if held {
                    Route::Camera
                } else {
                    Route::Ignored
                }
            }
            InputEvent::PointerLeave => {
                self.gestures.release_all();
                if placement.pointer_up() {
                    Route::Placement
                } else {
                    Route::Ignored
                }
            }
            InputEvent::Wheel { delta_y } => {
                camera.on_scroll(delta_y);
                Route::Camera
            }
            InputEvent::TouchStart { touches } => self.touch_start(&touches, placement, renderer),
            InputEvent::TouchMove { touches } => {
                if let [one] = touches.as_slice() {
                    if placement.pointer_move(renderer, one.x, one.y) {
                        return Route::Placement;
                    }
                }
                self.gestures.touch_move(&touches, camera);
                Route::Camera
            }
            InputEvent::TouchEnd { remaining } => {
                self.gestures.touch_end(&remaining);
                if placement.pointer_up() {
                    Route::Placement
                } else {
                    Route::Camera
                }
            }
            InputEvent::KeyDown { key } => {
                if self.set_arrow(&key, true) {
                    return Route::Camera;
                }
                self.key_bindings
                    .lookup(&key)
                    .map_or(Route::Ignored, Route::Command)
            }
            InputEvent::KeyUp { key } => {
                if self.set_arrow(&key, false) {
                    Route::Camera
                } else {
                    Route::Ignored
                }
            }
        }
    }

    fn touch_start<R: Renderer + ?Sized>(
        &mut self,
        touches: &[Vec2],
        placement: &mut PlacementSystem,
        renderer: &mut R,
    ) -> Route {
        match touches {
            [one] if placement.pointer_down(renderer, one.x, one.y) => Route::Placement,
            _ => {
                // Multi-touch is camera-only.
                if touches.len() > 1 {
                    let _ = placement.end_drag();
                }
                self.gestures.touch_start(touches);
                Route::Camera
            }
        }
    }

    /// Track arrow keys. Returns whether `key` is an arrow.
    fn set_arrow(&mut self, key: &str, held: bool) -> bool {
        let slot = match key {
            "ArrowLeft" => &mut self.arrows.left,
            "ArrowRight" => &mut self.arrows.right,
            "ArrowUp" => &mut self.arrows.up,
            "ArrowDown" => &mut self.arrows.down,
            _ => return false,
        };
        *slot = held;
        true
    }

    /// Drop all held input, e.g. when the canvas loses focus.
    pub fn reset(&mut self) {
        self.gestures = CameraGestures::default();
        self.arrows = ArrowKeys::default();
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::geometry::PanBounds;
    use crate::options::{CameraBoundsConfig, OrbitOptions, PlacementOptions};
    use crate::render::{HeadlessRenderer, Projection};

    struct Rig {
        dispatcher: InputDispatcher,
        placement: PlacementSystem,
        renderer: HeadlessRenderer,
        camera: OrbitCameraController,
    }

    impl Rig {
        fn new() -> Self {
            let options = PlacementOptions {
                plane_y: 0.0,
                rotation_y_degrees: 0.0,
                width: 6.0,
                length: 4.0,
                visible: false,
            };
            let bounds = PanBounds::new(Vec3::splat(-1.0), Vec3::splat(1.0));
            Self {
                dispatcher: InputDispatcher::default(),
                placement: PlacementSystem::new(&options, Some(bounds)),
                renderer: HeadlessRenderer::new(800.0, 600.0).with_projection(Projection::TopDown {
                    pixels_per_unit: 100.0,
                    height: 10.0,
                }),
                camera: OrbitCameraController::new(&OrbitOptions::default(), CameraBoundsConfig::default()),
            }
        }

        fn send(&mut self, event: InputEvent) -> Route {
            self.dispatcher
                .handle_event(event, &mut self.placement, &mut self.renderer, &mut self.camera)
        }
    }

    fn down(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerDown {
            button: MouseButton::Left,
            x,
            y,
        }
    }

    #[test]
    fn placement_gets_first_refusal() {
        let mut rig = Rig::new();
        assert!(rig.placement.enter_placement_mode("chair", "Chair"));
        let goal = rig.camera.goal();

        assert_eq!(rig.send(down(400.0, 300.0)), Route::Placement);
        let id = rig.placement.selected_id().unwrap();

        // Press on the new placeholder: drag, not orbit.
        assert_eq!(rig.send(down(400.0, 300.0)), Route::Placement);
        assert_eq!(rig.send(InputEvent::PointerMove { x: 450.0, y: 300.0 }), Route::Placement);
        assert_eq!(
            rig.send(InputEvent::PointerUp { button: MouseButton::Left }),
            Route::Placement
        );
        assert_eq!(rig.camera.goal(), goal);
        assert!((rig.placement.placeholder(id).unwrap().position.x - 0.5).abs() < 1e-5);
    }

    #[test]
    fn empty_press_falls_back_to_camera() {
        let mut rig = Rig::new();
        let yaw = rig.camera.goal().yaw;
        assert_eq!(rig.send(down(100.0, 100.0)), Route::Camera);
        assert_eq!(rig.send(InputEvent::PointerMove { x: 120.0, y: 100.0 }), Route::Camera);
        assert!(rig.camera.goal().yaw < yaw);
        assert_eq!(
            rig.send(InputEvent::PointerUp { button: MouseButton::Left }),
            Route::Camera
        );
        assert_eq!(rig.send(InputEvent::PointerMove { x: 150.0, y: 100.0 }), Route::Ignored);
    }

    #[test]
    fn left_press_with_other_button_held_stays_with_camera() {
        let mut rig = Rig::new();
        assert!(rig.placement.enter_placement_mode("chair", "Chair"));
        assert_eq!(rig.send(down(400.0, 300.0)), Route::Placement);
        let _ = rig.placement.end_drag();

        let right = InputEvent::PointerDown {
            button: MouseButton::Right,
            x: 400.0,
            y: 300.0,
        };
        assert_eq!(rig.send(right), Route::Camera);
        assert_eq!(rig.send(down(400.0, 300.0)), Route::Camera);
        assert!(rig.placement.dragging().is_none());
    }

    #[test]
    fn only_left_release_ends_drag() {
        let mut rig = Rig::new();
        assert!(rig.placement.enter_placement_mode("chair", "Chair"));
        assert_eq!(rig.send(down(400.0, 300.0)), Route::Placement);
        let id = rig.placement.selected_id();
        assert_eq!(rig.send(down(400.0, 300.0)), Route::Placement);
        assert_eq!(rig.placement.dragging(), id);

        let _ = rig.send(InputEvent::PointerUp { button: MouseButton::Right });
        assert_eq!(rig.placement.dragging(), id);
        assert_eq!(
            rig.send(InputEvent::PointerUp { button: MouseButton::Left }),
            Route::Placement
        );
        assert!(rig.placement.dragging().is_none());
    }

    #[test]
    fn second_finger_ends_placeholder_drag() {
        let mut rig = Rig::new();
        assert!(rig.placement.enter_placement_mode("chair", "Chair"));
        let _ = rig.send(down(400.0, 300.0));
        let start = InputEvent::TouchStart {
            touches: vec![Vec2::new(400.0, 300.0)],
        };
        assert_eq!(rig.send(start), Route::Placement);
        assert!(rig.placement.dragging().is_some());
        let pinch = InputEvent::TouchStart {
            touches: vec![Vec2::new(400.0, 300.0), Vec2::new(500.0, 300.0)],
        };
        assert_eq!(rig.send(pinch), Route::Camera);
        assert!(rig.placement.dragging().is_none());
    }

    #[test]
    fn keys_map_to_commands_and_arrows() {
        let mut rig = Rig::new();
        let key = |k: &str| InputEvent::KeyDown { key: k.into() };
        assert_eq!(rig.send(key("Backspace")), Route::Command(ViewerCommand::DeleteSelected));
        assert_eq!(
            rig.send(key("KeyQ")),
            Route::Command(ViewerCommand::NudgeSelectedRotation { delta_degrees: -15.0 })
        );
        assert_eq!(rig.send(key("Escape")), Route::Command(ViewerCommand::CancelInteraction));
        assert_eq!(rig.send(key("KeyZ")), Route::Ignored);

        assert_eq!(rig.send(key("ArrowLeft")), Route::Camera);
        assert!(rig.dispatcher.arrow_keys().left);
        let _ = rig.send(InputEvent::KeyUp { key: "ArrowLeft".into() });
        assert!(!rig.dispatcher.arrow_keys().any());
    }

    #[test]
    fn custom_binding_overrides_default() {
        let mut bindings = KeyBindings::default();
        bindings.bind("KeyB", KeyCommandTag::Back);
        bindings.unbind("KeyQ");
        assert_eq!(bindings.lookup("KeyB"), Some(ViewerCommand::Back));
        assert_eq!(bindings.lookup("KeyQ"), None);
    }
}

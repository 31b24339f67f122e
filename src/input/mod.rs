//! Input handling: event types, key bindings, and the dispatcher that
//! routes canvas events to the placement system or the camera.

/// Event routing with placement first refusal.
pub mod dispatcher;
/// Platform-agnostic input events.
pub mod event;

pub use dispatcher::{InputDispatcher, KeyBindings, KeyCommandTag, Route};
pub use event::{InputEvent, MouseButton};

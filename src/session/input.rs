use super::ViewerSession;
use crate::input::{InputEvent, KeyBindings, Route};
use crate::render::Renderer;

impl<R: Renderer> ViewerSession<R> {
    /// Route one canvas event.
    ///
    /// The placement system gets first refusal on pointer events; whatever
    /// it declines drives the camera. Bound keys execute their command.
    pub fn handle_input(&mut self, event: InputEvent) -> Route {
        let route = self.tracked(|s| {
            s.dispatcher
                .handle_event(event, &mut s.placement, &mut s.renderer, &mut s.camera)
        });
        if let Route::Command(command) = &route {
            self.execute(command.clone());
        }
        route
    }

    /// Current keyboard bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeyBindings {
        self.dispatcher.key_bindings()
    }

    /// Mutable access to the keyboard bindings for reconfiguration.
    pub fn key_bindings_mut(&mut self) -> &mut KeyBindings {
        self.dispatcher.key_bindings_mut()
    }
}

//! The viewer session: one exclusive owner of all interactive state.
//!
//! A [`ViewerSession`] ties the orbit camera, the placement system, the
//! scene coordinator and the input dispatcher to a host [`Renderer`]. The
//! host feeds it input events and a per-frame [`tick`](ViewerSession::tick);
//! UI panels subscribe to [`ViewerEvent`]s instead of polling.

mod accessors;
mod command;
mod events;
mod input;

pub use command::ViewerCommand;
pub use events::{SubscriptionId, ViewerEvent};
use glam::Vec3;

use self::events::Subscribers;
use crate::camera::controller::OrbitCameraController;
use crate::error::SplatViewError;
use crate::input::InputDispatcher;
use crate::options::ViewerOptions;
use crate::placement::{PlaceholderId, PlacementMode, PlacementSystem};
use crate::render::{EntityDesc, EntityId, EntityTransform, Renderer, Rgb};
use crate::scene::{SceneCoordinator, ViewState};
use crate::util::frame_timing::FrameTiming;

/// Line colour of the pan bounds box.
const BOUNDS_BOX_COLOR: Rgb = [1.0, 0.85, 0.2];

/// Smallest edge the bounds box is drawn with, so a flat box stays visible.
const MIN_BOUNDS_BOX_EDGE: f32 = 1e-3;

/// Interactive viewer bound to a renderer.
///
/// Created by [`initialize`](Self::initialize) and torn down by
/// [`destroy`](Self::destroy), which consumes the session so teardown runs
/// exactly once. All state lives here and is only touched through `&mut
/// self`, so handlers and ticks never interleave.
#[derive(Debug)]
pub struct ViewerSession<R: Renderer> {
    renderer: R,
    camera: OrbitCameraController,
    placement: PlacementSystem,
    scene: SceneCoordinator,
    dispatcher: InputDispatcher,
    frame_timing: FrameTiming,
    bounds_box: Option<EntityId>,
    subscribers: Subscribers,
    options: ViewerOptions,
}

/// The slice of state whose changes are broadcast generically.
#[derive(Debug, Clone, PartialEq)]
struct Observed {
    revision: u64,
    selected: Option<PlaceholderId>,
    mode: Option<PlacementMode>,
    view: ViewState,
    loading: bool,
}

impl<R: Renderer> ViewerSession<R> {
    /// Start a session: build the camera from `options`, create the plane
    /// visual, and request the main scene asset.
    pub fn initialize(options: ViewerOptions, mut renderer: R) -> Self {
        let viewport = renderer.viewport();
        let mut camera = OrbitCameraController::new(&options.camera, options.bounds.clone());
        camera.set_viewport(viewport.x, viewport.y);
        renderer.set_camera(camera.camera());

        let mut placement = PlacementSystem::new(&options.placement, Some(options.bounds.pan_bounds()));
        placement.attach(&mut renderer);

        let mut scene = SceneCoordinator::new(&options.scene, options.display.marker_margin_px);
        scene.start(&mut renderer);

        let mut session = Self {
            renderer,
            camera,
            placement,
            scene,
            dispatcher: InputDispatcher::new(options.keybindings.clone()),
            frame_timing: FrameTiming::new(options.display.target_fps),
            bounds_box: None,
            subscribers: Subscribers::default(),
            options,
        };
        session.sync_bounds_box();
        let _ = session.scene.update_markers(&session.renderer);

        log::info!(
            "viewer session initialized ({}x{}, {} hotspots)",
            viewport.x,
            viewport.y,
            session.scene.hotspots().len()
        );
        session
    }

    /// Release every entity the session created, drop all listeners, and
    /// hand the renderer back. Loads still in flight are discarded.
    pub fn destroy(mut self) -> R {
        self.placement.destroy(&mut self.renderer);
        self.scene.destroy(&mut self.renderer);
        if let Some(entity) = self.bounds_box.take() {
            self.renderer.destroy_entity(entity);
        }
        let listeners = self.subscribers.len();
        self.subscribers.clear();
        self.dispatcher.reset();
        log::info!("viewer session destroyed ({listeners} listeners released)");
        self.renderer
    }

    // ── Frame loop ───────────────────────────────────────────────────────

    /// Advance one frame of `dt` seconds.
    ///
    /// Applies finished asset loads, pans for held arrow keys, smooths the
    /// camera toward its goal, pushes it to the renderer, and re-projects
    /// the hotspot markers.
    pub fn tick(&mut self, dt: f32) {
        self.tracked(|s| {
            for failure in s.scene.poll_loads(&mut s.renderer, &mut s.camera) {
                if let SplatViewError::AssetLoad { url, message } = failure {
                    s.subscribers.emit(&ViewerEvent::AssetLoadFailed { url, message });
                }
            }

            let arrows = s.dispatcher.arrow_keys();
            if arrows.any() {
                let speed = s.camera.bounds().key_pan_speed;
                s.camera.on_arrow_key_pan(dt, speed, arrows);
            }

            let viewport = s.renderer.viewport();
            s.camera.set_viewport(viewport.x, viewport.y);
            s.camera.tick(dt);
            s.renderer.set_camera(s.camera.camera());
            let _ = s.scene.update_markers(&s.renderer);
        });
    }

    /// Frame-limited tick for hosts driven by a display callback.
    ///
    /// Returns the `dt` that was ticked, or `None` when the frame was
    /// skipped to honour the FPS cap.
    pub fn frame(&mut self) -> Option<f32> {
        if !self.frame_timing.should_render() {
            return None;
        }
        let dt = self.frame_timing.end_frame();
        self.tick(dt);
        Some(dt)
    }

    // ── Notifications ────────────────────────────────────────────────────

    /// Register a listener. Listeners run synchronously, in subscription
    /// order, after the operation that caused the change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&ViewerEvent) + 'static,
    {
        self.subscribers.subscribe(Box::new(listener))
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    fn observe(&self) -> Observed {
        Observed {
            revision: self.placement.registry().revision(),
            selected: self.placement.selected_id(),
            mode: self.placement.placement_mode().cloned(),
            view: self.scene.view(),
            loading: self.scene.is_loading(),
        }
    }

    /// Run `f`, then broadcast whatever observable state it changed.
    fn tracked<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let before = self.observe();
        let out = f(self);
        let after = self.observe();
        if after == before {
            return out;
        }
        if after.revision != before.revision {
            self.subscribers.emit(&ViewerEvent::PlaceholdersChanged);
        }
        if after.selected != before.selected {
            self.subscribers.emit(&ViewerEvent::SelectionChanged(after.selected));
        }
        if after.mode != before.mode {
            self.subscribers.emit(&ViewerEvent::PlacementModeChanged(after.mode));
        }
        if after.view != before.view {
            self.subscribers.emit(&ViewerEvent::ViewChanged(after.view));
        }
        if after.loading != before.loading {
            self.subscribers.emit(&ViewerEvent::LoadingChanged(after.loading));
        }
        out
    }

    // ── Bounds box ───────────────────────────────────────────────────────

    /// Keep the wireframe box in step with the bounds config. The entity is
    /// created on first show and only hidden afterwards.
    fn sync_bounds_box(&mut self) {
        let config = self.camera.bounds();
        if !config.show_bounds_box {
            if let Some(entity) = self.bounds_box {
                self.renderer.set_enabled(entity, false);
            }
            return;
        }
        let bounds = config.pan_bounds();
        let entity = match self.bounds_box {
            Some(entity) => entity,
            None => {
                let entity = self.renderer.create_entity(EntityDesc::WireBox {
                    half_extents: Vec3::splat(0.5),
                    color: BOUNDS_BOX_COLOR,
                });
                self.bounds_box = Some(entity);
                entity
            }
        };
        self.renderer.set_transform(
            entity,
            EntityTransform {
                scale: bounds.size().max(Vec3::splat(MIN_BOUNDS_BOX_EDGE)),
                ..EntityTransform::at(bounds.center())
            },
        );
        self.renderer.set_enabled(entity, true);
    }
}

//! View state machine coordinating the main scene and hotspot sub-scenes.
//!
//! The [`SceneCoordinator`] owns the splat asset slots, drives their
//! asynchronous loads, toggles entity visibility on view changes, and
//! applies hotspot camera snapshots through an injected
//! [`CameraController`]. Load results arrive on a channel and are applied
//! by [`SceneCoordinator::poll_loads`] from the session tick, so handlers
//! always run to completion and any number of input events may land
//! between a request and its result.

/// Hotspot slots and marker projection.
pub mod hotspot;
/// Euler orientation corrections and their named targets.
pub mod orientation;

use std::sync::mpsc;

pub use hotspot::{project_marker, Hotspot, HotspotMarker, SplatSlot};
pub use orientation::{EulerDegrees, OrientationTarget, UnknownTarget};
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::camera::CameraController;
use crate::error::SplatViewError;
use crate::options::SceneOptions;
use crate::render::{EntityDesc, EntityId, LoadCompletion, LoadOutcome, Renderer};

/// Which scene is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "view", content = "hotspot", rename_all = "snake_case")]
pub enum ViewState {
    /// The main scene with its hotspot markers.
    #[default]
    Main,
    /// An embedded hotspot scene.
    Hotspot(usize),
}

/// Host UI visibility derived from the view and pending loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiFlags {
    /// Hotspot markers are shown.
    pub markers_visible: bool,
    /// The back control is shown.
    pub back_visible: bool,
    /// The loading indicator is shown.
    pub loading: bool,
}

/// Result of clicking a hotspot marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotspotActivation {
    /// Unknown or decorative hotspot, or not reachable from this view.
    Ignored,
    /// Asset load requested; the view changes when it resolves.
    LoadStarted,
    /// A load for this hotspot is already in flight.
    AlreadyLoading,
    /// Switched to the hotspot view.
    Entered,
    /// Toggled back to the main view.
    Exited,
}

/// Result of the back control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// Left a hotspot view.
    ReturnedToMain,
    /// Already on the main view; the host should leave the viewer.
    ExitRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadSlot {
    Main,
    Hotspot(usize),
}

/// Owns the view state and the splat asset slots.
#[derive(Debug)]
pub struct SceneCoordinator {
    view: ViewState,
    main: SplatSlot,
    hotspots: Vec<Hotspot>,
    markers: Vec<HotspotMarker>,
    marker_margin: f32,
    loads_tx: mpsc::Sender<LoadOutcome>,
    loads_rx: mpsc::Receiver<LoadOutcome>,
    requests: FxHashMap<u64, LoadSlot>,
    next_request: u64,
}

impl SceneCoordinator {
    /// Coordinator for the configured scene, starting in [`ViewState::Main`]
    /// with nothing loaded.
    #[must_use]
    pub fn new(options: &SceneOptions, marker_margin: f32) -> Self {
        let (loads_tx, loads_rx) = mpsc::channel();
        let hotspots: Vec<_> = options.hotspots.iter().map(Hotspot::from_options).collect();
        let markers = hotspots
            .iter()
            .enumerate()
            .map(|(index, h)| HotspotMarker {
                index,
                label: h.label.clone(),
                screen: glam::Vec2::ZERO,
                visible: false,
            })
            .collect();
        Self {
            view: ViewState::Main,
            main: SplatSlot::from_options(&options.main_asset),
            hotspots,
            markers,
            marker_margin,
            loads_tx,
            loads_rx,
            requests: FxHashMap::default(),
            next_request: 0,
        }
    }

    /// Request the main asset.
    pub fn start<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        let _ = self.request_load(renderer, LoadSlot::Main);
    }

    /// Current view.
    #[must_use]
    pub fn view(&self) -> ViewState {
        self.view
    }

    /// Whether any asset load is outstanding.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        !self.requests.is_empty()
    }

    /// Visibility flags for the host UI.
    #[must_use]
    pub fn ui_flags(&self) -> UiFlags {
        let main = self.view == ViewState::Main;
        UiFlags {
            markers_visible: main,
            back_visible: !main,
            loading: self.is_loading(),
        }
    }

    /// The main asset slot.
    #[must_use]
    pub fn main_slot(&self) -> &SplatSlot {
        &self.main
    }

    /// Configured hotspots.
    #[must_use]
    pub fn hotspots(&self) -> &[Hotspot] {
        &self.hotspots
    }

    /// Marker screen state as of the last [`update_markers`](Self::update_markers).
    #[must_use]
    pub fn markers(&self) -> &[HotspotMarker] {
        &self.markers
    }

    // ── Transitions ──────────────────────────────────────────────────────

    /// Handle a click on hotspot `index`'s marker.
    pub fn activate_hotspot<R, C>(&mut self, renderer: &mut R, camera: &mut C, index: usize) -> HotspotActivation
    where
        R: Renderer + ?Sized,
        C: CameraController + ?Sized,
    {
        let Some(slot) = self.hotspots.get(index).and_then(|h| h.asset.as_ref()) else {
            log::debug!("hotspot {index} has no scene");
            return HotspotActivation::Ignored;
        };
        let (loaded, in_flight) = (slot.is_loaded(), slot.in_flight);

        match self.view {
            ViewState::Hotspot(active) if active == index => {
                self.show_main(renderer);
                HotspotActivation::Exited
            }
            ViewState::Hotspot(active) => {
                log::debug!("hotspot {index} ignored while in hotspot {active}");
                HotspotActivation::Ignored
            }
            ViewState::Main if loaded => {
                self.enter_hotspot(renderer, camera, index);
                HotspotActivation::Entered
            }
            ViewState::Main if in_flight => HotspotActivation::AlreadyLoading,
            ViewState::Main => {
                if self.request_load(renderer, LoadSlot::Hotspot(index)) {
                    HotspotActivation::LoadStarted
                } else {
                    HotspotActivation::Ignored
                }
            }
        }
    }

    /// Handle the back control.
    pub fn back<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> BackOutcome {
        match self.view {
            ViewState::Hotspot(_) => {
                self.show_main(renderer);
                BackOutcome::ReturnedToMain
            }
            ViewState::Main => {
                log::info!("exit requested from main view");
                BackOutcome::ExitRequested
            }
        }
    }

    fn enter_hotspot<R, C>(&mut self, renderer: &mut R, camera: &mut C, index: usize)
    where
        R: Renderer + ?Sized,
        C: CameraController + ?Sized,
    {
        let Some(hotspot) = self.hotspots.get(index) else {
            return;
        };
        if let Some(entity) = self.main.entity {
            renderer.set_enabled(entity, false);
        }
        if let Some(entity) = hotspot.asset.as_ref().and_then(|slot| slot.entity) {
            renderer.set_enabled(entity, true);
        }
        if let Some(snapshot) = hotspot.camera {
            camera.set_state(snapshot.position(), snapshot.target());
        }
        log::info!("entered hotspot {index} ({})", hotspot.label);
        self.view = ViewState::Hotspot(index);
    }

    /// Restore main-scene visibility. The camera stays where it is.
    fn show_main<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        if let ViewState::Hotspot(index) = self.view {
            if let Some(entity) = self.hotspot_entity(index) {
                renderer.set_enabled(entity, false);
            }
        }
        if let Some(entity) = self.main.entity {
            renderer.set_enabled(entity, true);
        }
        log::info!("returned to main view");
        self.view = ViewState::Main;
    }

    fn hotspot_entity(&self, index: usize) -> Option<EntityId> {
        self.hotspots
            .get(index)
            .and_then(|h| h.asset.as_ref())
            .and_then(|slot| slot.entity)
    }

    // ── Loading ──────────────────────────────────────────────────────────

    fn slot_mut(&mut self, slot: LoadSlot) -> Option<&mut SplatSlot> {
        match slot {
            LoadSlot::Main => Some(&mut self.main),
            LoadSlot::Hotspot(i) => self.hotspots.get_mut(i).and_then(|h| h.asset.as_mut()),
        }
    }

    /// Issue a load unless the slot is loaded or already loading.
    fn request_load<R: Renderer + ?Sized>(&mut self, renderer: &mut R, key: LoadSlot) -> bool {
        let request = self.next_request;
        let tx = self.loads_tx.clone();
        let Some(slot) = self.slot_mut(key) else {
            return false;
        };
        if slot.is_loaded() || slot.in_flight {
            return false;
        }
        slot.in_flight = true;
        log::info!("loading asset {}", slot.url);
        let completion = LoadCompletion::new(request, slot.url.clone(), tx);
        self.next_request += 1;
        let _ = self.requests.insert(request, key);
        renderer.load_asset(completion);
        true
    }

    /// Apply every load result received since the last poll.
    ///
    /// A loaded hotspot scene is entered only if the view is still
    /// [`ViewState::Main`]. Failures leave the view unchanged and are
    /// returned for reporting.
    pub fn poll_loads<R, C>(&mut self, renderer: &mut R, camera: &mut C) -> Vec<SplatViewError>
    where
        R: Renderer + ?Sized,
        C: CameraController + ?Sized,
    {
        let mut failures = Vec::new();
        while let Ok(outcome) = self.loads_rx.try_recv() {
            let Some(key) = self.requests.remove(&outcome.request) else {
                continue;
            };
            let Some(slot) = self.slot_mut(key) else {
                continue;
            };
            slot.in_flight = false;

            match outcome.result {
                Ok(asset) => {
                    let entity = renderer.create_entity(EntityDesc::Splat { asset });
                    renderer.set_transform(entity, slot.transform());
                    slot.entity = Some(entity);
                    log::info!("loaded asset {}", outcome.url);
                    match key {
                        LoadSlot::Main => {
                            renderer.set_enabled(entity, self.view == ViewState::Main);
                        }
                        LoadSlot::Hotspot(index) => {
                            renderer.set_enabled(entity, false);
                            if self.view == ViewState::Main {
                                self.enter_hotspot(renderer, camera, index);
                            }
                        }
                    }
                }
                Err(message) => {
                    let err = SplatViewError::AssetLoad {
                        url: outcome.url,
                        message,
                    };
                    log::error!("{err}");
                    failures.push(err);
                }
            }
        }
        failures
    }

    // ── Orientation ──────────────────────────────────────────────────────

    /// Correction for a target; `None` if it has no asset.
    #[must_use]
    pub fn orientation(&self, target: OrientationTarget) -> Option<EulerDegrees> {
        match target {
            OrientationTarget::Main => Some(self.main.euler),
            OrientationTarget::Hotspot(i) => self
                .hotspots
                .get(i)
                .and_then(|h| h.asset.as_ref())
                .map(|slot| slot.euler),
        }
    }

    /// Record a correction, re-applying it to the entity if loaded.
    /// Non-finite angles and unknown targets are ignored.
    pub fn set_orientation<R: Renderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        target: OrientationTarget,
        euler: EulerDegrees,
    ) -> bool {
        if !euler.is_finite() {
            return false;
        }
        let key = match target {
            OrientationTarget::Main => LoadSlot::Main,
            OrientationTarget::Hotspot(i) => LoadSlot::Hotspot(i),
        };
        let Some(slot) = self.slot_mut(key) else {
            return false;
        };
        slot.euler = euler;
        if let Some(entity) = slot.entity {
            renderer.set_transform(entity, slot.transform());
        }
        true
    }

    // ── Markers ──────────────────────────────────────────────────────────

    /// Re-project hotspot markers. Returns whether any changed.
    pub fn update_markers<R: Renderer + ?Sized>(&mut self, renderer: &R) -> bool {
        let show = self.view == ViewState::Main;
        let mut changed = false;
        for (marker, hotspot) in self.markers.iter_mut().zip(&self.hotspots) {
            let (screen, in_view) = project_marker(renderer, hotspot.position, self.marker_margin);
            let visible = show && in_view;
            if marker.screen != screen || marker.visible != visible {
                marker.screen = screen;
                marker.visible = visible;
                changed = true;
            }
        }
        changed
    }

    /// Release every loaded entity. Late load results are discarded.
    pub fn destroy<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        let entities = std::iter::once(&mut self.main)
            .chain(self.hotspots.iter_mut().filter_map(|h| h.asset.as_mut()))
            .filter_map(|slot| {
                slot.in_flight = false;
                slot.entity.take()
            });
        for entity in entities {
            renderer.destroy_entity(entity);
        }
        self.requests.clear();
        self.view = ViewState::Main;
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::camera::controller::OrbitCameraController;
    use crate::options::{CameraBoundsConfig, OrbitOptions};
    use crate::render::HeadlessRenderer;

    const HOTSPOT_URL: &str = "/Maniero Concrete Area.sog";

    fn setup() -> (SceneCoordinator, HeadlessRenderer, OrbitCameraController) {
        let scene = SceneCoordinator::new(&SceneOptions::default(), 50.0);
        let renderer = HeadlessRenderer::new(800.0, 600.0);
        let camera = OrbitCameraController::new(&OrbitOptions::default(), CameraBoundsConfig::default());
        (scene, renderer, camera)
    }

    fn loaded_main() -> (SceneCoordinator, HeadlessRenderer, OrbitCameraController) {
        let (mut scene, mut r, mut cam) = setup();
        scene.start(&mut r);
        let _ = r.resolve_loads();
        assert!(scene.poll_loads(&mut r, &mut cam).is_empty());
        (scene, r, cam)
    }

    fn main_enabled(scene: &SceneCoordinator, r: &HeadlessRenderer) -> bool {
        r.entity(scene.main_slot().entity.unwrap()).unwrap().enabled
    }

    #[test]
    fn loading_flag_tracks_main_load() {
        let (mut scene, mut r, mut cam) = setup();
        scene.start(&mut r);
        assert!(scene.ui_flags().loading);
        let _ = r.resolve_loads();
        assert!(scene.ui_flags().loading);
        let _ = scene.poll_loads(&mut r, &mut cam);
        assert!(!scene.ui_flags().loading);
        assert!(main_enabled(&scene, &r));
    }

    #[test]
    fn main_asset_gets_its_correction() {
        let (scene, r, _) = loaded_main();
        let entity = r.entity(scene.main_slot().entity.unwrap()).unwrap();
        let up = entity.transform.rotation * Vec3::Y;
        assert!((up - Vec3::NEG_Y).length() < 1e-5);
    }

    #[test]
    fn hotspot_waits_for_load_then_enters() {
        let (mut scene, mut r, mut cam) = loaded_main();
        assert_eq!(scene.activate_hotspot(&mut r, &mut cam, 0), HotspotActivation::LoadStarted);
        assert_eq!(scene.view(), ViewState::Main);
        // Input during the load does not disturb it.
        cam.on_scroll(10.0);
        assert_eq!(scene.activate_hotspot(&mut r, &mut cam, 0), HotspotActivation::AlreadyLoading);
        assert_eq!(r.loads_started(), 2);

        let _ = r.resolve_loads();
        assert!(scene.poll_loads(&mut r, &mut cam).is_empty());
        assert_eq!(scene.view(), ViewState::Hotspot(0));
        assert!(!main_enabled(&scene, &r));
        let hotspot = scene.hotspots()[0].asset.as_ref().unwrap().entity.unwrap();
        assert!(r.entity(hotspot).unwrap().enabled);

        let snapshot = scene.hotspots()[0].camera.unwrap();
        assert!((cam.camera().eye - snapshot.position()).length() < 1e-4);
        let flags = scene.ui_flags();
        assert!(!flags.markers_visible && flags.back_visible && !flags.loading);
    }

    #[test]
    fn failed_load_stays_on_main() {
        let (mut scene, mut r, mut cam) = loaded_main();
        r.fail_url(HOTSPOT_URL);
        let _ = scene.activate_hotspot(&mut r, &mut cam, 0);
        let _ = r.resolve_loads();
        let failures = scene.poll_loads(&mut r, &mut cam);
        assert_eq!(failures.len(), 1);
        assert!(failures[0].to_string().contains(HOTSPOT_URL));
        assert_eq!(scene.view(), ViewState::Main);
        assert!(!scene.ui_flags().loading);
        assert!(main_enabled(&scene, &r));
        // Not loaded, so a retry issues a fresh request.
        assert_eq!(scene.activate_hotspot(&mut r, &mut cam, 0), HotspotActivation::LoadStarted);
    }

    #[test]
    fn toggle_and_back_restore_main_without_moving_camera() {
        let (mut scene, mut r, mut cam) = loaded_main();
        let _ = scene.activate_hotspot(&mut r, &mut cam, 0);
        let _ = r.resolve_loads();
        let _ = scene.poll_loads(&mut r, &mut cam);

        cam.set_state(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO);
        let eye = cam.camera().eye;
        assert_eq!(scene.activate_hotspot(&mut r, &mut cam, 0), HotspotActivation::Exited);
        assert_eq!(scene.view(), ViewState::Main);
        assert!(main_enabled(&scene, &r));
        assert_eq!(cam.camera().eye, eye);

        // Re-entering reuses the loaded asset.
        assert_eq!(scene.activate_hotspot(&mut r, &mut cam, 0), HotspotActivation::Entered);
        assert_eq!(r.loads_started(), 2);
        assert_eq!(scene.back(&mut r), BackOutcome::ReturnedToMain);
        assert_eq!(scene.back(&mut r), BackOutcome::ExitRequested);
        assert_eq!(scene.view(), ViewState::Main);
    }

    #[test]
    fn decorative_hotspot_is_ignored() {
        let (mut scene, mut r, mut cam) = loaded_main();
        assert_eq!(scene.activate_hotspot(&mut r, &mut cam, 1), HotspotActivation::Ignored);
        assert_eq!(scene.activate_hotspot(&mut r, &mut cam, 42), HotspotActivation::Ignored);
    }

    #[test]
    fn orientation_before_and_after_load() {
        let (mut scene, mut r, mut cam) = setup();
        let target = OrientationTarget::Hotspot(0);
        assert_eq!(scene.orientation(target), Some(EulerDegrees::new(175.0, 0.0, 0.0)));
        assert!(scene.set_orientation(&mut r, target, EulerDegrees::new(0.0, 90.0, 0.0)));

        scene.start(&mut r);
        let _ = scene.activate_hotspot(&mut r, &mut cam, 0);
        let _ = r.resolve_loads();
        let _ = scene.poll_loads(&mut r, &mut cam);
        let entity = scene.hotspots()[0].asset.as_ref().unwrap().entity.unwrap();
        let forward = r.entity(entity).unwrap().transform.rotation * Vec3::Z;
        assert!((forward - Vec3::X).length() < 1e-5);

        assert!(scene.set_orientation(&mut r, target, EulerDegrees::new(0.0, 0.0, 0.0)));
        assert_eq!(r.entity(entity).unwrap().transform.rotation, glam::Quat::IDENTITY);
        assert!(!scene.set_orientation(&mut r, OrientationTarget::Hotspot(2), EulerDegrees::default()));
        assert!(!scene.set_orientation(&mut r, target, EulerDegrees::new(f32::NAN, 0.0, 0.0)));
    }

    #[test]
    fn markers_hide_in_hotspot_view() {
        let (mut scene, mut r, mut cam) = loaded_main();
        cam.set_state(Vec3::new(0.0, 3.0, 6.0), Vec3::new(0.0, 1.0, 0.0));
        r.set_camera(cam.camera());
        let _ = scene.update_markers(&r);
        assert!(scene.markers().iter().any(|m| m.visible));

        let _ = scene.activate_hotspot(&mut r, &mut cam, 0);
        let _ = r.resolve_loads();
        let _ = scene.poll_loads(&mut r, &mut cam);
        assert!(scene.update_markers(&r));
        assert!(scene.markers().iter().all(|m| !m.visible));
    }

    #[test]
    fn destroy_releases_entities() {
        let (mut scene, mut r, _) = loaded_main();
        assert_eq!(r.entity_count(), 1);
        scene.destroy(&mut r);
        assert_eq!(r.entity_count(), 0);
        assert!(!scene.is_loading());
    }
}

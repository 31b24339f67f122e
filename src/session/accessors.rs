//! Queries and host-callable operations on a [`ViewerSession`].

use glam::Vec3;

use super::{ViewerEvent, ViewerSession};
use crate::camera::{CameraController, CameraTelemetry};
use crate::options::{CameraBoundsConfig, CameraBoundsUpdate, ViewerOptions};
use crate::placement::{PlaceholderId, PlaceholderRecord, PlacementMode, PlacementPlane, PlaneUpdate};
use crate::render::Renderer;
use crate::scene::{
    BackOutcome, EulerDegrees, Hotspot, HotspotActivation, HotspotMarker, OrientationTarget, UiFlags,
    UnknownTarget, ViewState,
};
use crate::util::frame_timing::FrameTiming;

impl<R: Renderer> ViewerSession<R> {
    // ── Collaborators ────────────────────────────────────────────────────

    /// The renderer the session draws through.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable renderer access, e.g. for viewport resizes.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Options the session was initialized with.
    #[must_use]
    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    /// Frame limiter state.
    #[must_use]
    pub fn frame_timing(&self) -> &FrameTiming {
        &self.frame_timing
    }

    /// Change the presentation FPS cap (0 = unlimited).
    pub fn set_target_fps(&mut self, fps: u32) {
        self.frame_timing.set_target_fps(fps);
        self.options.display.target_fps = fps;
    }

    // ── Camera ───────────────────────────────────────────────────────────

    /// Current camera position, look-at target and rotation.
    #[must_use]
    pub fn telemetry(&self) -> CameraTelemetry {
        self.camera.telemetry()
    }

    /// Current camera bounds configuration.
    #[must_use]
    pub fn camera_bounds(&self) -> &CameraBoundsConfig {
        self.camera.bounds()
    }

    /// Apply a partial bounds update. Returns whether anything changed.
    pub fn set_camera_bounds(&mut self, update: &CameraBoundsUpdate) -> bool {
        if !self.camera.set_bounds(update) {
            return false;
        }
        self.renderer.set_camera(self.camera.camera());
        self.sync_bounds_box();
        self.options.bounds = self.camera.bounds().clone();
        let event = ViewerEvent::CameraBoundsChanged(self.camera.bounds().clone());
        self.subscribers.emit(&event);
        true
    }

    /// Jump the camera to an eye/target pair with no animation.
    pub fn set_camera_state(&mut self, position: Vec3, target: Vec3) {
        self.camera.set_state(position, target);
        self.renderer.set_camera(self.camera.camera());
    }

    // ── Placement ────────────────────────────────────────────────────────

    /// Placed markers in insertion order.
    pub fn placeholders(&self) -> impl Iterator<Item = &PlaceholderRecord> + '_ {
        self.placement.placeholders()
    }

    /// Armed placement, if any.
    #[must_use]
    pub fn placement_mode(&self) -> Option<&PlacementMode> {
        self.placement.placement_mode()
    }

    /// The selected placeholder.
    #[must_use]
    pub fn selected(&self) -> Option<&PlaceholderRecord> {
        self.placement.selected()
    }

    /// Yaw of the selection in degrees; 0 when nothing is selected.
    #[must_use]
    pub fn selected_yaw(&self) -> f32 {
        self.placement.selected_yaw()
    }

    /// Scale of the selection; one when nothing is selected.
    #[must_use]
    pub fn selected_scale(&self) -> Vec3 {
        self.placement.selected_scale()
    }

    /// Current placement plane.
    #[must_use]
    pub fn plane(&self) -> &PlacementPlane {
        self.placement.plane()
    }

    /// Arm one-shot placement. Refused while a drag is active.
    pub fn enter_placement_mode(&mut self, type_id: &str, display_name: &str) -> bool {
        self.tracked(|s| s.placement.enter_placement_mode(type_id, display_name))
    }

    /// Disarm placement. Returns whether it was armed.
    pub fn cancel_placement_mode(&mut self) -> bool {
        self.tracked(|s| s.placement.cancel_placement_mode())
    }

    /// Spawn the armed type at a canvas point.
    pub fn place_at(&mut self, x: f32, y: f32) -> Option<PlaceholderId> {
        self.tracked(|s| s.placement.place_at(&mut s.renderer, x, y))
    }

    /// Nearest placeholder under a canvas point.
    #[must_use]
    pub fn pick_at(&self, x: f32, y: f32) -> Option<PlaceholderId> {
        self.placement.pick_at(&self.renderer, x, y)
    }

    /// Start dragging a placeholder.
    pub fn begin_drag(&mut self, id: PlaceholderId) -> bool {
        self.tracked(|s| s.placement.begin_drag(id))
    }

    /// Move the dragged placeholder under a canvas point.
    pub fn update_drag(&mut self, x: f32, y: f32) -> bool {
        self.tracked(|s| s.placement.update_drag(&mut s.renderer, x, y))
    }

    /// Finish the drag, returning the placeholder that was dragged.
    pub fn end_drag(&mut self) -> Option<PlaceholderId> {
        self.tracked(|s| s.placement.end_drag())
    }

    /// Select a placeholder or clear the selection.
    pub fn select(&mut self, id: Option<PlaceholderId>) -> bool {
        self.tracked(|s| s.placement.select(id))
    }

    /// Set the selection's yaw in degrees.
    pub fn set_selected_yaw(&mut self, degrees: f32) -> bool {
        self.tracked(|s| s.placement.set_selected_yaw(&mut s.renderer, degrees))
    }

    /// Rotate the selection by `delta_degrees`.
    pub fn nudge_selected_rotation(&mut self, delta_degrees: f32) -> bool {
        self.tracked(|s| s.placement.nudge_selected_rotation(&mut s.renderer, delta_degrees))
    }

    /// Set the selection's per-axis scale.
    pub fn set_selected_scale(&mut self, scale: Vec3) -> bool {
        self.tracked(|s| s.placement.set_selected_scale(&mut s.renderer, scale))
    }

    /// Delete the selection.
    pub fn delete_selected(&mut self) -> Option<PlaceholderId> {
        self.tracked(|s| s.placement.delete_selected(&mut s.renderer))
    }

    /// Disarm placement and clear the selection.
    pub fn cancel_interaction(&mut self) {
        self.tracked(|s| {
            let _ = s.placement.cancel_placement_mode();
            let _ = s.placement.select(None);
        });
    }

    /// Apply a partial plane update. Returns whether the plane changed.
    pub fn set_plane(&mut self, update: &PlaneUpdate) -> bool {
        self.tracked(|s| {
            let changed = s.placement.set_plane(&mut s.renderer, update);
            if changed {
                let event = ViewerEvent::PlaneChanged(*s.placement.plane());
                s.subscribers.emit(&event);
            }
            changed
        })
    }

    // ── Scene ────────────────────────────────────────────────────────────

    /// Which scene is shown.
    #[must_use]
    pub fn view(&self) -> ViewState {
        self.scene.view()
    }

    /// Marker, back-control and loading-indicator visibility.
    #[must_use]
    pub fn ui_flags(&self) -> UiFlags {
        self.scene.ui_flags()
    }

    /// Hotspot definitions and their asset slots.
    #[must_use]
    pub fn hotspots(&self) -> &[Hotspot] {
        self.scene.hotspots()
    }

    /// Hotspot marker screen positions as of the last tick.
    #[must_use]
    pub fn markers(&self) -> &[HotspotMarker] {
        self.scene.markers()
    }

    /// Handle a click on hotspot `index`'s marker.
    pub fn activate_hotspot(&mut self, index: usize) -> HotspotActivation {
        self.tracked(|s| {
            let outcome = s.scene.activate_hotspot(&mut s.renderer, &mut s.camera, index);
            if outcome == HotspotActivation::Entered {
                s.renderer.set_camera(s.camera.camera());
            }
            let _ = s.scene.update_markers(&s.renderer);
            outcome
        })
    }

    /// Handle the back control. On the main view this asks the host to
    /// leave via [`ViewerEvent::ExitRequested`].
    pub fn back(&mut self) -> BackOutcome {
        self.tracked(|s| {
            let outcome = s.scene.back(&mut s.renderer);
            match outcome {
                BackOutcome::ReturnedToMain => {
                    let _ = s.scene.update_markers(&s.renderer);
                }
                BackOutcome::ExitRequested => s.subscribers.emit(&ViewerEvent::ExitRequested),
            }
            outcome
        })
    }

    /// Orientation correction of a scene asset; `None` if it has no asset.
    #[must_use]
    pub fn orientation(&self, target: OrientationTarget) -> Option<EulerDegrees> {
        self.scene.orientation(target)
    }

    /// Change an asset's orientation correction. Non-finite angles and
    /// targets without an asset are ignored.
    pub fn set_orientation(&mut self, target: OrientationTarget, euler: EulerDegrees) -> bool {
        if !self.scene.set_orientation(&mut self.renderer, target, euler) {
            log::debug!("orientation for {target} ignored");
            return false;
        }
        self.subscribers
            .emit(&ViewerEvent::OrientationChanged { target, euler });
        true
    }

    /// [`orientation`](Self::orientation) by target name (`"main"`,
    /// `"hotspot0"`, ...).
    pub fn orientation_by_name(&self, name: &str) -> Result<Option<EulerDegrees>, UnknownTarget> {
        Ok(self.orientation(name.parse()?))
    }

    /// [`set_orientation`](Self::set_orientation) by target name.
    pub fn set_orientation_by_name(&mut self, name: &str, euler: EulerDegrees) -> Result<bool, UnknownTarget> {
        let target = name.parse()?;
        Ok(self.set_orientation(target, euler))
    }
}

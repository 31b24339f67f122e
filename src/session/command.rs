//! The viewer's complete interactive vocabulary.
//!
//! Every host-callable operation, whether triggered by a key press, a
//! panel control, or a programmatic call, is a `ViewerCommand`. Consumers
//! construct commands and pass them to
//! [`ViewerSession::execute`](super::ViewerSession::execute).

use glam::Vec3;

use super::ViewerSession;
use crate::options::CameraBoundsUpdate;
use crate::placement::{PlaceholderId, PlaneUpdate};
use crate::render::Renderer;
use crate::scene::{EulerDegrees, OrientationTarget};

/// A discrete or parameterized operation the viewer can perform.
///
/// ```ignore
/// session.execute(ViewerCommand::EnterPlacementMode {
///     type_id: "chair".into(),
///     display_name: "Chair".into(),
/// });
/// session.execute(ViewerCommand::NudgeSelectedRotation { delta_degrees: 15.0 });
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerCommand {
    // ── Placement ───────────────────────────────────────────────────
    /// Arm one-shot placement of a placeholder type.
    EnterPlacementMode {
        /// Catalogue type id.
        type_id: String,
        /// Label for the spawned placeholder.
        display_name: String,
    },

    /// Disarm placement.
    CancelPlacementMode,

    /// Spawn the armed type at a canvas point.
    PlaceAt {
        /// Canvas x in pixels.
        x: f32,
        /// Canvas y in pixels.
        y: f32,
    },

    /// Start dragging a placeholder.
    BeginDrag {
        /// Placeholder to drag.
        id: PlaceholderId,
    },

    /// Move the dragged placeholder under a canvas point.
    UpdateDrag {
        /// Canvas x in pixels.
        x: f32,
        /// Canvas y in pixels.
        y: f32,
    },

    /// Finish the drag.
    EndDrag,

    // ── Selection ───────────────────────────────────────────────────
    /// Select a placeholder, or clear the selection.
    Select {
        /// Placeholder to select; `None` clears.
        id: Option<PlaceholderId>,
    },

    /// Set the selection's yaw.
    SetSelectedYaw {
        /// Yaw in degrees.
        degrees: f32,
    },

    /// Rotate the selection.
    NudgeSelectedRotation {
        /// Degrees to add.
        delta_degrees: f32,
    },

    /// Set the selection's per-axis scale.
    SetSelectedScale {
        /// Requested scale.
        scale: Vec3,
    },

    /// Delete the selection.
    DeleteSelected,

    /// Disarm placement and clear the selection.
    CancelInteraction,

    // ── Plane and camera ────────────────────────────────────────────
    /// Partially update the placement plane.
    SetPlane(PlaneUpdate),

    /// Partially update the camera bounds.
    SetCameraBounds(CameraBoundsUpdate),

    /// Jump the camera to an eye/target pair.
    SetCameraState {
        /// Eye position.
        position: Vec3,
        /// Look-at target.
        target: Vec3,
    },

    // ── Scene ───────────────────────────────────────────────────────
    /// Change an asset's orientation correction.
    SetOrientation {
        /// Which asset.
        target: OrientationTarget,
        /// New correction.
        euler: EulerDegrees,
    },

    /// Click a hotspot marker.
    ActivateHotspot {
        /// Hotspot index.
        index: usize,
    },

    /// The back control.
    Back,
}

impl<R: Renderer> ViewerSession<R> {
    /// Execute a command.
    pub fn execute(&mut self, command: ViewerCommand) {
        match command {
            ViewerCommand::EnterPlacementMode {
                type_id,
                display_name,
            } => {
                let _ = self.enter_placement_mode(&type_id, &display_name);
            }
            ViewerCommand::CancelPlacementMode => {
                let _ = self.cancel_placement_mode();
            }
            ViewerCommand::PlaceAt { x, y } => {
                let _ = self.place_at(x, y);
            }
            ViewerCommand::BeginDrag { id } => {
                let _ = self.begin_drag(id);
            }
            ViewerCommand::UpdateDrag { x, y } => {
                let _ = self.update_drag(x, y);
            }
            ViewerCommand::EndDrag => {
                let _ = self.end_drag();
            }
            ViewerCommand::Select { id } => {
                let _ = self.select(id);
            }
            ViewerCommand::SetSelectedYaw { degrees } => {
                let _ = self.set_selected_yaw(degrees);
            }
            ViewerCommand::NudgeSelectedRotation { delta_degrees } => {
                let _ = self.nudge_selected_rotation(delta_degrees);
            }
            ViewerCommand::SetSelectedScale { scale } => {
                let _ = self.set_selected_scale(scale);
            }
            ViewerCommand::DeleteSelected => {
                let _ = self.delete_selected();
            }
            ViewerCommand::CancelInteraction => self.cancel_interaction(),
            ViewerCommand::SetPlane(update) => {
                let _ = self.set_plane(&update);
            }
            ViewerCommand::SetCameraBounds(update) => {
                let _ = self.set_camera_bounds(&update);
            }
            ViewerCommand::SetCameraState { position, target } => {
                self.set_camera_state(position, target);
            }
            ViewerCommand::SetOrientation { target, euler } => {
                let _ = self.set_orientation(target, euler);
            }
            ViewerCommand::ActivateHotspot { index } => {
                let _ = self.activate_hotspot(index);
            }
            ViewerCommand::Back => {
                let _ = self.back();
            }
        }
    }
}

//! Orbit camera: projection math, the smoothed controller, and gesture
//! tracking that turns raw pointer/touch input into controller calls.

/// Smoothed yaw/pitch/distance controller with pan bounds.
pub mod controller;
/// Core camera struct with projection and ray helpers.
pub mod core;
/// Mouse button-mask and touch gesture tracking.
pub mod input;

use glam::Vec3;
use serde::Serialize;

use self::core::Camera;
use crate::geometry::PanBounds;
use crate::scene::EulerDegrees;

/// Camera readout for display and debugging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraTelemetry {
    /// Eye position.
    pub position: Vec3,
    /// Look-at point.
    pub look_at_target: Vec3,
    /// Camera orientation.
    pub rotation: EulerDegrees,
}

impl CameraTelemetry {
    /// Read telemetry off a camera.
    #[must_use]
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            position: camera.eye,
            look_at_target: camera.target,
            rotation: EulerDegrees::from(camera.euler_degrees()),
        }
    }
}

/// The camera capability the scene coordinator drives.
///
/// Passed explicitly to the operations that need it rather than looked up.
pub trait CameraController {
    /// Jump to an eye/target pair with no animation.
    fn set_state(&mut self, position: Vec3, target: Vec3);

    /// Current position, target and orientation.
    fn telemetry(&self) -> CameraTelemetry;

    /// Configured pan bounds box, whether or not clamping is enabled.
    fn pan_bounds(&self) -> PanBounds;

    /// The camera as of the last update.
    fn camera(&self) -> &Camera;
}

use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Orbit controller sensitivities, smoothing, and the initial camera pose.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Orbit Camera", inline)]
#[serde(default)]
pub struct OrbitOptions {
    /// Degrees of yaw/pitch per pixel of left-button drag.
    #[schemars(title = "Orbit Sensitivity", range(min = 0.05, max = 1.0), extend("step" = 0.05))]
    pub orbit_sensitivity: f32,
    /// World units of pan per pixel, per unit of orbit distance.
    #[schemars(title = "Pan Sensitivity", range(min = 0.001, max = 0.02), extend("step" = 0.001))]
    pub pan_sensitivity: f32,
    /// Zoom speed for wheel input.
    #[schemars(title = "Zoom Sensitivity", range(min = 0.05, max = 1.0), extend("step" = 0.05))]
    pub zoom_sensitivity: f32,
    /// Fraction of the remaining distance to the goal left after one
    /// 1/60 s step. 0 snaps immediately.
    #[schemars(title = "Inertia", range(min = 0.0, max = 0.95), extend("step" = 0.01))]
    pub inertia: f32,
    /// Initial yaw in degrees.
    #[schemars(skip)]
    pub initial_yaw: f32,
    /// Initial pitch in degrees.
    #[schemars(skip)]
    pub initial_pitch: f32,
    /// Initial orbit distance.
    #[schemars(skip)]
    pub initial_distance: f32,
    /// Initial look-at target.
    #[schemars(skip)]
    pub initial_target: [f32; 3],
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
}

impl Default for OrbitOptions {
    fn default() -> Self {
        Self {
            orbit_sensitivity: 0.3,
            pan_sensitivity: 0.005,
            zoom_sensitivity: 0.3,
            inertia: 0.12,
            initial_yaw: -15.3,
            initial_pitch: 27.3,
            initial_distance: 5.383,
            initial_target: [0.128, 0.731, -0.487],
            fovy: 45.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}

impl OrbitOptions {
    /// Initial look-at target as a vector.
    #[must_use]
    pub fn initial_target(&self) -> Vec3 {
        Vec3::from_array(self.initial_target)
    }
}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Initial placement plane. The centre is derived from the pan bounds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Placement Plane", inline)]
#[serde(default)]
pub struct PlacementOptions {
    /// World-space height of the plane.
    #[schemars(title = "Height", range(min = -2.0, max = 5.0), extend("step" = 0.05))]
    pub plane_y: f32,
    /// Rotation about +Y in degrees.
    #[schemars(title = "Rotation", range(min = -180.0, max = 180.0), extend("step" = 1.0))]
    pub rotation_y_degrees: f32,
    /// Extent along the plane's local X axis.
    #[schemars(title = "Width", range(min = 0.1, max = 20.0), extend("step" = 0.1))]
    pub width: f32,
    /// Extent along the plane's local Z axis.
    #[schemars(title = "Length", range(min = 0.1, max = 20.0), extend("step" = 0.1))]
    pub length: f32,
    /// Whether the translucent plane is drawn.
    #[schemars(title = "Show Plane")]
    pub visible: bool,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            plane_y: 1.1,
            rotation_y_degrees: 27.0,
            width: 6.1,
            length: 3.1,
            visible: false,
        }
    }
}

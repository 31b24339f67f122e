use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::frame_timing::DEFAULT_TARGET_FPS;

/// Presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
pub struct DisplayOptions {
    /// Frame cap (0 = unlimited).
    #[schemars(title = "Target FPS", range(min = 0, max = 144))]
    pub target_fps: u32,
    /// Hotspot markers stay visible this many pixels past the viewport edge.
    #[schemars(skip)]
    pub marker_margin_px: f32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            target_fps: DEFAULT_TARGET_FPS,
            marker_margin_px: 50.0,
        }
    }
}

//! Viewer configuration with TOML preset support.
//!
//! Every tunable the session reads at initialization (camera feel, bounds,
//! placement plane, scene assets, display pacing, keybindings) is
//! consolidated in [`ViewerOptions`]. Options serialize to/from TOML so a
//! host can ship presets, and the UI-exposed subset is described by a JSON
//! schema.

mod bounds;
mod camera;
mod display;
mod placement;
mod scene;

use std::path::Path;

pub use bounds::{CameraBoundsConfig, CameraBoundsUpdate};
pub use camera::OrbitOptions;
pub use display::DisplayOptions;
pub use placement::PlacementOptions;
pub use scene::{CameraSnapshot, HotspotOptions, SceneOptions, SplatAssetOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::SplatViewError;
use crate::input::KeyBindings;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[bounds]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[serde(default)]
pub struct ViewerOptions {
    /// Orbit feel and initial pose.
    pub camera: OrbitOptions,
    /// Pan bounds and zoom range.
    pub bounds: CameraBoundsConfig,
    /// Initial placement plane.
    pub placement: PlacementOptions,
    /// Frame pacing.
    pub display: DisplayOptions,
    /// Main asset and hotspots.
    #[schemars(skip)]
    pub scene: SceneOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeyBindings,
}

impl ViewerOptions {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(ViewerOptions)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, SplatViewError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, SplatViewError> {
        toml::from_str(content).map_err(|e| SplatViewError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), SplatViewError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SplatViewError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(SplatViewError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

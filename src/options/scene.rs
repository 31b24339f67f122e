use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::scene::EulerDegrees;

/// A splat asset and the orientation correction applied when it loads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SplatAssetOptions {
    /// URL handed to the renderer's asset loader.
    pub url: String,
    /// Euler correction in degrees.
    #[serde(default)]
    pub euler: EulerDegrees,
}

/// Camera pose applied when entering a hotspot view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CameraSnapshot {
    /// Eye position.
    pub position: [f32; 3],
    /// Look-at target.
    pub target: [f32; 3],
}

impl CameraSnapshot {
    /// Eye position as a vector.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    /// Look-at target as a vector.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        Vec3::from_array(self.target)
    }
}

/// A clickable hotspot marker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HotspotOptions {
    /// Display label.
    pub label: String,
    /// World position of the marker.
    pub position: [f32; 3],
    /// Embedded scene; markers without one are decorative.
    #[serde(default)]
    pub asset: Option<SplatAssetOptions>,
    /// Camera pose applied on entering the hotspot view.
    #[serde(default)]
    pub camera: Option<CameraSnapshot>,
}

impl HotspotOptions {
    /// Marker position as a vector.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// The main scene and its hotspots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneOptions {
    /// Asset loaded at startup.
    pub main_asset: SplatAssetOptions,
    /// Hotspot markers; index `n` is addressed as orientation target
    /// `hotspotN`.
    pub hotspots: Vec<HotspotOptions>,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            main_asset: SplatAssetOptions {
                url: "/mainScene.sog".into(),
                euler: EulerDegrees::new(180.0, 0.0, 0.0),
            },
            hotspots: vec![
                HotspotOptions {
                    label: "Concrete Area".into(),
                    position: [-0.59, 0.95, 0.06],
                    asset: Some(SplatAssetOptions {
                        url: "/Maniero Concrete Area.sog".into(),
                        euler: EulerDegrees::new(175.0, 0.0, 0.0),
                    }),
                    camera: Some(CameraSnapshot {
                        position: [0.0, 1.2, 2.5],
                        target: [0.0, 0.6, 0.0],
                    }),
                },
                HotspotOptions {
                    label: "Hotspot 2".into(),
                    position: [0.42, 1.24, -2.32],
                    asset: None,
                    camera: None,
                },
                HotspotOptions {
                    label: "Hotspot 3".into(),
                    position: [1.69, 0.93, 0.64],
                    asset: None,
                    camera: None,
                },
            ],
        }
    }
}

use glam::{Vec2, Vec3};
use serde::Serialize;

use super::orientation::EulerDegrees;
use crate::options::{CameraSnapshot, HotspotOptions, SplatAssetOptions};
use crate::render::{EntityId, EntityTransform, Renderer};

/// A splat asset slot: at most one load in flight, at most one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct SplatSlot {
    /// URL loaded into this slot.
    pub url: String,
    /// Orientation correction.
    pub euler: EulerDegrees,
    /// Entity once loaded.
    pub entity: Option<EntityId>,
    /// Whether a load is outstanding.
    pub in_flight: bool,
}

impl SplatSlot {
    pub(crate) fn from_options(options: &SplatAssetOptions) -> Self {
        Self {
            url: options.url.clone(),
            euler: options.euler,
            entity: None,
            in_flight: false,
        }
    }

    /// Whether the asset is loaded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.entity.is_some()
    }

    pub(crate) fn transform(&self) -> EntityTransform {
        EntityTransform {
            rotation: self.euler.to_quat(),
            ..EntityTransform::default()
        }
    }
}

/// A hotspot marker and the embedded scene it opens.
#[derive(Debug, Clone, PartialEq)]
pub struct Hotspot {
    /// Display label.
    pub label: String,
    /// Marker position in world space.
    pub position: Vec3,
    /// Embedded scene; `None` for decorative markers.
    pub asset: Option<SplatSlot>,
    /// Camera pose applied on entry.
    pub camera: Option<CameraSnapshot>,
}

impl Hotspot {
    pub(crate) fn from_options(options: &HotspotOptions) -> Self {
        Self {
            label: options.label.clone(),
            position: options.position(),
            asset: options.asset.as_ref().map(SplatSlot::from_options),
            camera: options.camera,
        }
    }
}

/// Screen-space state of a hotspot marker, for the host to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotspotMarker {
    /// Hotspot index.
    pub index: usize,
    /// Display label.
    pub label: String,
    /// Canvas position in pixels.
    pub screen: Vec2,
    /// Whether the marker should be drawn.
    pub visible: bool,
}

/// Project a marker to the canvas.
///
/// Returns the screen position and whether it is in front of the camera
/// and within `margin` pixels of the viewport.
pub fn project_marker<R: Renderer + ?Sized>(renderer: &R, position: Vec3, margin: f32) -> (Vec2, bool) {
    let Some(p) = renderer.world_to_screen(position) else {
        return (Vec2::ZERO, false);
    };
    let viewport = renderer.viewport();
    let screen = p.truncate();
    let visible = p.z > 0.0
        && screen.x >= -margin
        && screen.y >= -margin
        && screen.x <= viewport.x + margin
        && screen.y <= viewport.y + margin;
    (screen, visible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{HeadlessRenderer, Projection};

    fn renderer() -> HeadlessRenderer {
        HeadlessRenderer::new(800.0, 600.0).with_projection(Projection::TopDown {
            pixels_per_unit: 100.0,
            height: 10.0,
        })
    }

    #[test]
    fn margin_extends_visibility_past_edges() {
        let r = renderer();
        // x = 4.3 lands at 830 px: 30 px outside, within the 50 px margin.
        let (screen, visible) = project_marker(&r, Vec3::new(4.3, 0.0, 0.0), 50.0);
        assert!((screen.x - 830.0).abs() < 1e-3);
        assert!(visible);
        let (_, visible) = project_marker(&r, Vec3::new(4.6, 0.0, 0.0), 50.0);
        assert!(!visible);
    }

    #[test]
    fn marker_behind_camera_is_hidden() {
        let r = renderer();
        let (_, visible) = project_marker(&r, Vec3::new(0.0, 12.0, 0.0), 50.0);
        assert!(!visible);
    }
}

use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::geometry::PanBounds;
use crate::util::numeric::{finite_or, finite_option};

/// Smallest orbit distance a config may request.
const MIN_DISTANCE_FLOOR: f32 = 0.01;

/// Camera constraint settings: pan bounds, zoom range, and key pan speed.
///
/// Field names serialize in camelCase (`usePanBounds`, `panBoundsMinX`, ...)
/// so host UIs can pass their settings objects straight through.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera Bounds", inline)]
#[serde(default, rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct CameraBoundsConfig {
    /// Whether the look-at target is clamped into the pan bounds box.
    #[schemars(title = "Use Pan Bounds")]
    pub use_pan_bounds: bool,
    #[allow(missing_docs)]
    pub pan_bounds_min_x: f32,
    #[allow(missing_docs)]
    pub pan_bounds_min_y: f32,
    #[allow(missing_docs)]
    pub pan_bounds_min_z: f32,
    #[allow(missing_docs)]
    pub pan_bounds_max_x: f32,
    #[allow(missing_docs)]
    pub pan_bounds_max_y: f32,
    #[allow(missing_docs)]
    pub pan_bounds_max_z: f32,
    /// Closest allowed orbit distance.
    #[schemars(title = "Min Distance", range(min = 0.1, max = 10.0), extend("step" = 0.1))]
    pub distance_min: f32,
    /// Farthest allowed orbit distance.
    #[schemars(title = "Max Distance", range(min = 1.0, max = 100.0), extend("step" = 0.5))]
    pub distance_max: f32,
    /// Arrow-key pan speed in world units per second.
    #[schemars(title = "Key Pan Speed", range(min = 0.1, max = 10.0), extend("step" = 0.1))]
    pub key_pan_speed: f32,
    /// Show a wireframe box outlining the pan bounds.
    #[schemars(title = "Show Bounds Box")]
    pub show_bounds_box: bool,
}

impl Default for CameraBoundsConfig {
    fn default() -> Self {
        let bounds = PanBounds::default();
        Self {
            use_pan_bounds: false,
            pan_bounds_min_x: bounds.min.x,
            pan_bounds_min_y: bounds.min.y,
            pan_bounds_min_z: bounds.min.z,
            pan_bounds_max_x: bounds.max.x,
            pan_bounds_max_y: bounds.max.y,
            pan_bounds_max_z: bounds.max.z,
            distance_min: 0.5,
            distance_max: 20.0,
            key_pan_speed: 2.0,
            show_bounds_box: false,
        }
    }
}

impl CameraBoundsConfig {
    /// The pan bounds box, with corners ordered per axis.
    #[must_use]
    pub fn pan_bounds(&self) -> PanBounds {
        PanBounds::new(
            Vec3::new(self.pan_bounds_min_x, self.pan_bounds_min_y, self.pan_bounds_min_z),
            Vec3::new(self.pan_bounds_max_x, self.pan_bounds_max_y, self.pan_bounds_max_z),
        )
    }

    /// The pan bounds if clamping is enabled.
    #[must_use]
    pub fn active_pan_bounds(&self) -> Option<PanBounds> {
        self.use_pan_bounds.then(|| self.pan_bounds())
    }

    /// Clamp an orbit distance into `[distance_min, distance_max]`.
    #[must_use]
    pub fn clamp_distance(&self, distance: f32) -> f32 {
        distance.max(self.distance_min).min(self.distance_max)
    }

    /// Apply a partial update. Unspecified and non-finite fields keep their
    /// current value. Returns whether anything changed.
    pub fn apply(&mut self, update: &CameraBoundsUpdate) -> bool {
        let before = self.clone();

        if let Some(v) = update.use_pan_bounds {
            self.use_pan_bounds = v;
        }
        if let Some(v) = update.show_bounds_box {
            self.show_bounds_box = v;
        }
        for (slot, value) in [
            (&mut self.pan_bounds_min_x, update.pan_bounds_min_x),
            (&mut self.pan_bounds_min_y, update.pan_bounds_min_y),
            (&mut self.pan_bounds_min_z, update.pan_bounds_min_z),
            (&mut self.pan_bounds_max_x, update.pan_bounds_max_x),
            (&mut self.pan_bounds_max_y, update.pan_bounds_max_y),
            (&mut self.pan_bounds_max_z, update.pan_bounds_max_z),
            (&mut self.key_pan_speed, update.key_pan_speed),
        ] {
            *slot = finite_or(value, *slot);
        }
        if let Some(v) = finite_option(update.distance_min) {
            self.distance_min = v.max(MIN_DISTANCE_FLOOR);
        }
        if let Some(v) = finite_option(update.distance_max) {
            self.distance_max = v.max(MIN_DISTANCE_FLOOR);
        }
        // Keep the zoom range non-empty.
        if self.distance_max < self.distance_min {
            self.distance_max = self.distance_min;
        }
        self.key_pan_speed = self.key_pan_speed.max(0.0);

        *self != before
    }
}

/// Partial update of [`CameraBoundsConfig`]; `None` fields are unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct CameraBoundsUpdate {
    pub use_pan_bounds: Option<bool>,
    pub pan_bounds_min_x: Option<f32>,
    pub pan_bounds_min_y: Option<f32>,
    pub pan_bounds_min_z: Option<f32>,
    pub pan_bounds_max_x: Option<f32>,
    pub pan_bounds_max_y: Option<f32>,
    pub pan_bounds_max_z: Option<f32>,
    pub distance_min: Option<f32>,
    pub distance_max: Option<f32>,
    pub key_pan_speed: Option<f32>,
    pub show_bounds_box: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_update_leaves_other_fields() {
        let mut cfg = CameraBoundsConfig::default();
        let update: CameraBoundsUpdate =
            serde_json::from_str(r#"{"usePanBounds": true, "panBoundsMaxX": 4.0}"#).unwrap();
        assert!(cfg.apply(&update));
        assert!(cfg.use_pan_bounds);
        assert_eq!(cfg.pan_bounds_max_x, 4.0);
        assert_eq!(cfg.pan_bounds_min_x, -2.0);
        assert_eq!(cfg.distance_max, 20.0);
    }

    #[test]
    fn non_finite_values_are_ignored() {
        let mut cfg = CameraBoundsConfig::default();
        let update = CameraBoundsUpdate {
            distance_min: Some(f32::NAN),
            key_pan_speed: Some(f32::INFINITY),
            ..CameraBoundsUpdate::default()
        };
        assert!(!cfg.apply(&update));
        assert_eq!(cfg, CameraBoundsConfig::default());
    }

    #[test]
    fn zoom_range_stays_non_empty() {
        let mut cfg = CameraBoundsConfig::default();
        let _ = cfg.apply(&CameraBoundsUpdate {
            distance_min: Some(30.0),
            ..CameraBoundsUpdate::default()
        });
        assert_eq!(cfg.distance_min, 30.0);
        assert_eq!(cfg.distance_max, 30.0);
        assert_eq!(cfg.clamp_distance(5.0), 30.0);
    }

    #[test]
    fn inverted_corners_are_reordered() {
        let cfg = CameraBoundsConfig {
            pan_bounds_min_x: 5.0,
            pan_bounds_max_x: -1.0,
            ..CameraBoundsConfig::default()
        };
        let b = cfg.pan_bounds();
        assert_eq!(b.min.x, -1.0);
        assert_eq!(b.max.x, 5.0);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(CameraBoundsConfig::default()).unwrap();
        assert_eq!(json["usePanBounds"], false);
        assert_eq!(json["distanceMin"], 0.5);
        assert!(json.get("keyPanSpeed").is_some());
    }
}

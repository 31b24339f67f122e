use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::geometry::{clamp_to_rotated_rectangle, ray_plane_intersect_y, PanBounds, Ray, RotatedRect};
use crate::options::PlacementOptions;
use crate::render::{EntityDesc, EntityTransform, Rgb};
use crate::util::numeric::finite_option;

/// Width and length never drop below this.
pub const MIN_PLANE_EXTENT: f32 = 0.1;

/// Colour of the plane visual.
pub const PLANE_COLOR: Rgb = [0.1, 0.55, 0.85];
/// Alpha of the plane visual.
pub const PLANE_OPACITY: f32 = 0.55;

/// Rotated rectangle placeholders are projected onto and clamped to.
///
/// Clamping applies whether or not the plane is visible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementPlane {
    /// Centre in world (x, z); fixed at creation.
    pub center: Vec2,
    /// Height.
    pub y: f32,
    /// Rotation about +Y in degrees.
    pub rotation_y_degrees: f32,
    /// Extent along local X.
    pub width: f32,
    /// Extent along local Z.
    pub length: f32,
    /// Whether the visual is shown.
    pub visible: bool,
}

/// Partial plane update; `None` fields are unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct PlaneUpdate {
    pub y: Option<f32>,
    pub rotation_y_degrees: Option<f32>,
    pub width: Option<f32>,
    pub length: Option<f32>,
    pub visible: Option<bool>,
}

impl PlacementPlane {
    /// Plane from options, centred over the midpoint of `bounds`.
    #[must_use]
    pub fn new(options: &PlacementOptions, bounds: &PanBounds) -> Self {
        let center = bounds.center();
        Self {
            center: Vec2::new(center.x, center.z),
            y: options.plane_y,
            rotation_y_degrees: options.rotation_y_degrees,
            width: options.width.max(MIN_PLANE_EXTENT),
            length: options.length.max(MIN_PLANE_EXTENT),
            visible: options.visible,
        }
    }

    /// Footprint as a rotated rectangle.
    #[must_use]
    pub fn rect(&self) -> RotatedRect {
        RotatedRect {
            center: self.center,
            rotation_y_degrees: self.rotation_y_degrees,
            width: self.width,
            length: self.length,
        }
    }

    /// Where `ray` meets the plane's height, unclamped.
    #[must_use]
    pub fn intersect(&self, ray: &Ray) -> Option<Vec3> {
        ray_plane_intersect_y(ray, self.y)
    }

    /// Where `ray` meets the plane, clamped into the rectangle.
    #[must_use]
    pub fn project(&self, ray: &Ray) -> Option<Vec3> {
        let hit = self.intersect(ray)?;
        let (x, z) = clamp_to_rotated_rectangle(hit.x, hit.z, &self.rect());
        Some(Vec3::new(x, self.y, z))
    }

    /// Apply a partial update. Non-finite numbers are ignored. Returns
    /// whether the plane changed.
    pub fn apply(&mut self, update: &PlaneUpdate) -> bool {
        let before = *self;
        if let Some(y) = finite_option(update.y) {
            self.y = y;
        }
        if let Some(rotation) = finite_option(update.rotation_y_degrees) {
            self.rotation_y_degrees = rotation;
        }
        if let Some(width) = finite_option(update.width) {
            self.width = width.max(MIN_PLANE_EXTENT);
        }
        if let Some(length) = finite_option(update.length) {
            self.length = length.max(MIN_PLANE_EXTENT);
        }
        if let Some(visible) = update.visible {
            self.visible = visible;
        }
        *self != before
    }

    /// Visual: a unit plane scaled to the footprint.
    pub(crate) fn entity_desc() -> EntityDesc {
        EntityDesc::Plane {
            width: 1.0,
            length: 1.0,
            color: PLANE_COLOR,
            opacity: PLANE_OPACITY,
        }
    }

    pub(crate) fn entity_transform(&self) -> EntityTransform {
        EntityTransform {
            position: Vec3::new(self.center.x, self.y, self.center.y),
            rotation: Quat::from_rotation_y(self.rotation_y_degrees.to_radians()),
            scale: Vec3::new(self.width, 1.0, self.length),
        }
    }
}

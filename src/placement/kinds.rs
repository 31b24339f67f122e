use glam::Vec3;

use crate::render::Rgb;

/// Visual and placement properties of a placeholder type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaceholderKind {
    /// Box half size before scaling.
    pub half_extents: Vec3,
    /// Box colour.
    pub color: Rgb,
    /// Height of the centre above the plane, so the base rests on it.
    pub y_offset: f32,
}

const CHAIR: PlaceholderKind = PlaceholderKind {
    half_extents: Vec3::new(0.25, 0.35, 0.25),
    color: [1.0, 0.55, 0.1],
    y_offset: 0.35,
};

const TABLE: PlaceholderKind = PlaceholderKind {
    half_extents: Vec3::new(0.5, 0.2, 0.4),
    color: [0.6, 0.3, 0.85],
    y_offset: 0.2,
};

const GENERIC: PlaceholderKind = PlaceholderKind {
    half_extents: Vec3::splat(0.3),
    color: [0.6, 0.6, 0.6],
    y_offset: 0.3,
};

impl PlaceholderKind {
    /// Properties for a type id. Unknown ids get a generic grey cube.
    #[must_use]
    pub fn for_type(type_id: &str) -> Self {
        match type_id {
            "chair" => CHAIR,
            "table" => TABLE,
            _ => GENERIC,
        }
    }

    /// Scale new placeholders of this kind start with.
    #[must_use]
    pub fn default_scale(&self) -> Vec3 {
        Vec3::ONE
    }
}

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned box constraining where the camera's look-at target may sit.
///
/// Also provides the fallback extent for the placement plane when no camera
/// bounds are configured.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanBounds {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl PanBounds {
    /// Build bounds from two corners, ordering each axis so `min <= max`.
    #[must_use]
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Midpoint of the box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Edge lengths along each axis.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Whether `point` lies inside or on the boundary.
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Clamp `point` into the box.
    #[must_use]
    pub fn clamp(&self, point: Vec3) -> Vec3 {
        clamp_to_aabb(point, self)
    }
}

impl Default for PanBounds {
    /// Extent of the default scene's walkable area.
    fn default() -> Self {
        Self {
            min: Vec3::new(-2.0, 0.0, -4.0),
            max: Vec3::new(3.0, 2.5, 1.0),
        }
    }
}

/// Per-axis clamp of `point` into `bounds`.
///
/// Tolerates an inverted box (`min > max` on some axis): the max bound wins.
#[must_use]
pub fn clamp_to_aabb(point: Vec3, bounds: &PanBounds) -> Vec3 {
    Vec3::new(
        point.x.max(bounds.min.x).min(bounds.max.x),
        point.y.max(bounds.min.y).min(bounds.max.y),
        point.z.max(bounds.min.z).min(bounds.max.z),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_pulls_outside_point_onto_face() {
        let b = PanBounds::new(Vec3::new(-2.0, 0.0, -4.0), Vec3::new(3.0, 2.5, 1.0));
        let p = clamp_to_aabb(Vec3::new(3.4, 1.0, 0.0), &b);
        assert_eq!(p, Vec3::new(3.0, 1.0, 0.0));
    }

    #[test]
    fn clamp_leaves_inside_point_untouched() {
        let b = PanBounds::default();
        let p = Vec3::new(0.5, 1.0, -1.0);
        assert_eq!(b.clamp(p), p);
        assert!(b.contains(p));
    }

    #[test]
    fn new_orders_corners() {
        let b = PanBounds::new(Vec3::new(1.0, 5.0, -1.0), Vec3::new(-1.0, 0.0, 1.0));
        assert_eq!(b.min, Vec3::new(-1.0, 0.0, -1.0));
        assert_eq!(b.max, Vec3::new(1.0, 5.0, 1.0));
        assert_eq!(b.center(), Vec3::new(0.0, 2.5, 0.0));
    }
}

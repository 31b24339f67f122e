use glam::Vec3;

/// Below this `|direction.y|` a ray is treated as parallel to a horizontal
/// plane.
const PARALLEL_EPSILON: f32 = 1e-6;

/// A half-line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Direction (not required to be unit length).
    pub direction: Vec3,
}

impl Ray {
    /// Construct a ray, normalizing `direction` when it has non-zero length.
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Ray from `from` through `to`.
    #[must_use]
    pub fn through(from: Vec3, to: Vec3) -> Self {
        Self::new(from, to - from)
    }

    /// Point at parameter `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Intersect `ray` with the horizontal plane `y = plane_y`.
///
/// Returns `None` when the ray is parallel to the plane or the plane lies
/// behind the ray origin. The returned point has `y == plane_y` exactly.
#[must_use]
pub fn ray_plane_intersect_y(ray: &Ray, plane_y: f32) -> Option<Vec3> {
    if ray.direction.y.abs() < PARALLEL_EPSILON {
        return None;
    }
    let t = (plane_y - ray.origin.y) / ray.direction.y;
    if t < 0.0 || !t.is_finite() {
        return None;
    }
    let hit = ray.at(t);
    Some(Vec3::new(hit.x, plane_y, hit.z))
}

use glam::Vec2;

/// A rectangle on a horizontal plane, rotated about the vertical axis.
///
/// `width` runs along the rectangle's local X axis and `length` along its
/// local Z axis. The rotation follows `Quat::from_rotation_y`, so a rect
/// and an entity rotated by the same angle line up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotatedRect {
    /// Centre in world (x, z).
    pub center: Vec2,
    /// Rotation about +Y in degrees.
    pub rotation_y_degrees: f32,
    /// Extent along local X.
    pub width: f32,
    /// Extent along local Z.
    pub length: f32,
}

impl RotatedRect {
    /// Map world (x, z) into the rectangle's local frame.
    fn to_local(&self, world: Vec2) -> Vec2 {
        let (sin, cos) = self.rotation_y_degrees.to_radians().sin_cos();
        let d = world - self.center;
        Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos)
    }

    /// Map local (x, z) back to world.
    fn to_world(&self, local: Vec2) -> Vec2 {
        let (sin, cos) = self.rotation_y_degrees.to_radians().sin_cos();
        self.center
            + Vec2::new(local.x * cos + local.y * sin, -local.x * sin + local.y * cos)
    }

    /// Whether world (x, z) lies inside the rectangle, with `tolerance`
    /// slack on each edge.
    #[must_use]
    pub fn contains(&self, world: Vec2, tolerance: f32) -> bool {
        let local = self.to_local(world);
        local.x.abs() <= self.width * 0.5 + tolerance
            && local.y.abs() <= self.length * 0.5 + tolerance
    }
}

/// Clamp world (x, z) onto or inside `rect`.
///
/// The point is rotated into the rectangle's frame, clamped to the half
/// extents, and rotated back. Points already inside come back unchanged (up
/// to floating-point round-off), so the operation is idempotent.
#[must_use]
pub fn clamp_to_rotated_rectangle(world_x: f32, world_z: f32, rect: &RotatedRect) -> (f32, f32) {
    let world = Vec2::new(world_x, world_z);
    let local = rect.to_local(world);
    let half_w = rect.width * 0.5;
    let half_l = rect.length * 0.5;
    if local.x.abs() <= half_w && local.y.abs() <= half_l {
        return (world_x, world_z);
    }
    let clamped = Vec2::new(
        local.x.max(-half_w).min(half_w),
        local.y.max(-half_l).min(half_l),
    );
    let out = rect.to_world(clamped);
    (out.x, out.y)
}

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3, Vec4};

use crate::geometry::Ray;

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy: 45.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}

impl Camera {
    /// World-to-view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Get just the projection matrix.
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        // perspective_rh uses the [0,1] depth range
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.view_matrix()
    }

    /// World-space orientation of the camera (looking down its local -Z).
    #[must_use]
    pub fn rotation(&self) -> Quat {
        let world = self.view_matrix().inverse();
        Quat::from_mat4(&world).normalize()
    }

    /// Camera's world-space right axis.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }

    /// Camera's world-space up axis (perpendicular to the view direction,
    /// unlike [`Camera::up`] which is only the look-at hint).
    #[must_use]
    pub fn up_axis(&self) -> Vec3 {
        self.rotation() * Vec3::Y
    }

    /// Camera orientation as XYZ Euler angles in degrees.
    #[must_use]
    pub fn euler_degrees(&self) -> Vec3 {
        let (x, y, z) = self.rotation().to_euler(EulerRot::XYZ);
        Vec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees())
    }

    /// Unproject a screen point (pixels, origin top-left) into a world ray.
    ///
    /// Returns `None` for an empty viewport or a degenerate projection.
    #[must_use]
    pub fn screen_to_world_ray(&self, screen: Vec2, viewport: Vec2) -> Option<Ray> {
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return None;
        }
        let ndc_x = screen.x / viewport.x * 2.0 - 1.0;
        let ndc_y = 1.0 - screen.y / viewport.y * 2.0;
        let inv = self.build_matrix().inverse();
        let near = inv * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
        let far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        if near.w.abs() < f32::EPSILON || far.w.abs() < f32::EPSILON {
            return None;
        }
        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;
        let ray = Ray::through(near, far);
        (ray.direction != Vec3::ZERO && ray.origin.is_finite()).then_some(ray)
    }

    /// Project a world point to screen pixels.
    ///
    /// The returned `z` is the view-space depth in front of the camera
    /// (positive = visible side). Returns `None` if the projection is
    /// degenerate.
    #[must_use]
    pub fn world_to_screen(&self, point: Vec3, viewport: Vec2) -> Option<Vec3> {
        let view = self.view_matrix().transform_point3(point);
        let clip = self.build_projection() * view.extend(1.0);
        if clip.w.abs() < f32::EPSILON {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        let x = (ndc.x + 1.0) * 0.5 * viewport.x;
        let y = (1.0 - ndc.y) * 0.5 * viewport.y;
        Some(Vec3::new(x, y, -view.z))
    }
}

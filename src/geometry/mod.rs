//! Stateless geometry helpers shared by the camera and placement systems.
//!
//! Everything here is pure: axis-aligned box clamping for the camera's pan
//! bounds, closed-form ray/horizontal-plane intersection for picking, and
//! rotated-rectangle clamping for the placement plane.

/// Axis-aligned pan bounds and point clamping.
pub mod bounds;
/// Rays and ray/plane intersection.
pub mod ray;
/// Rectangles rotated about the vertical axis.
pub mod rect;

pub use bounds::{clamp_to_aabb, PanBounds};
pub use ray::{ray_plane_intersect_y, Ray};
pub use rect::{clamp_to_rotated_rectangle, RotatedRect};

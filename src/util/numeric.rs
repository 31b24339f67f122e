//! Finite-number guards for values arriving from UI controls.
//!
//! Interactive operations never fail on bad numbers: a non-finite input
//! falls back to the previous value.

use glam::Vec3;

/// `value` if it is present and finite.
#[must_use]
pub fn finite_option(value: Option<f32>) -> Option<f32> {
    value.filter(|v| v.is_finite())
}

/// `value` if it is present and finite, otherwise `fallback`.
#[must_use]
pub fn finite_or(value: Option<f32>, fallback: f32) -> f32 {
    finite_option(value).unwrap_or(fallback)
}

/// Per-axis finite fallback for vectors.
#[must_use]
pub fn finite_vec3_or(value: Vec3, fallback: Vec3) -> Vec3 {
    Vec3::new(
        finite_or(Some(value.x), fallback.x),
        finite_or(Some(value.y), fallback.y),
        finite_or(Some(value.z), fallback.z),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_falls_back() {
        assert_eq!(finite_or(Some(f32::NAN), 2.0), 2.0);
        assert_eq!(finite_or(None, 2.0), 2.0);
        assert_eq!(finite_or(Some(-1.5), 2.0), -1.5);
    }

    #[test]
    fn vector_fallback_is_per_axis() {
        let v = finite_vec3_or(Vec3::new(f32::INFINITY, 3.0, f32::NAN), Vec3::ONE);
        assert_eq!(v, Vec3::new(1.0, 3.0, 1.0));
    }
}

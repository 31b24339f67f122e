//! Shared utilities: frame pacing and finite-number guards.

/// Frame limiter and smoothed FPS meter.
pub mod frame_timing;
/// Finite-number fallbacks for UI-supplied values.
pub mod numeric;

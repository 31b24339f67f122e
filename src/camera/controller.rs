use glam::Vec3;

use super::core::Camera;
use super::{CameraController, CameraTelemetry};
use crate::geometry::PanBounds;
use crate::options::{CameraBoundsConfig, CameraBoundsUpdate, OrbitOptions};

/// Pitch is kept strictly inside the poles so the look-at basis never
/// degenerates.
pub const PITCH_LIMIT_DEGREES: f32 = 89.0;

/// Bit in a pointer button mask for the primary (left) button.
pub const BUTTON_LEFT: u8 = 1;
/// Bit in a pointer button mask for the secondary (right) button.
pub const BUTTON_RIGHT: u8 = 2;
/// Bit in a pointer button mask for the middle button.
pub const BUTTON_MIDDLE: u8 = 4;

/// Below this length a position/target offset is treated as zero.
const DEGENERATE_OFFSET: f32 = 1e-6;

/// Spherical camera pose around a look-at target. Angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitPose {
    /// Rotation about +Y; 0 puts the camera on the target's +Z side.
    pub yaw: f32,
    /// Elevation above the target's horizontal plane.
    pub pitch: f32,
    /// Distance from eye to target.
    pub distance: f32,
    /// Look-at point.
    pub target: Vec3,
}

impl OrbitPose {
    /// Unit offset from target to eye.
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.to_radians().sin_cos();
        Vec3::new(sin_yaw * cos_pitch, sin_pitch, cos_yaw * cos_pitch)
    }

    /// World-space eye position.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        self.target + self.direction() * self.distance
    }

    fn lerp(&self, goal: &Self, t: f32) -> Self {
        if t >= 1.0 {
            return *goal;
        }
        Self {
            yaw: self.yaw + (goal.yaw - self.yaw) * t,
            pitch: self.pitch + (goal.pitch - self.pitch) * t,
            distance: self.distance + (goal.distance - self.distance) * t,
            target: self.target.lerp(goal.target, t),
        }
    }
}

/// Which arrow keys are held during a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ArrowKeys {
    #[allow(missing_docs)]
    pub left: bool,
    #[allow(missing_docs)]
    pub right: bool,
    #[allow(missing_docs)]
    pub up: bool,
    #[allow(missing_docs)]
    pub down: bool,
}

impl ArrowKeys {
    /// Whether any arrow is held.
    #[must_use]
    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }

    /// Screen-space direction: +x right, +y up.
    fn axes(self) -> (f32, f32) {
        let h = f32::from(u8::from(self.right)) - f32::from(u8::from(self.left));
        let v = f32::from(u8::from(self.up)) - f32::from(u8::from(self.down));
        (h, v)
    }
}

/// Smoothed orbit camera.
///
/// Input handlers only move the goal pose; [`tick`](Self::tick) eases the
/// live pose toward it with frame-rate-independent exponential smoothing
/// and writes the result onto the owned [`Camera`]. Pitch, distance and (with
/// pan bounds enabled) the look-at target are kept inside their limits on
/// both poses after every mutation.
#[derive(Debug, Clone)]
pub struct OrbitCameraController {
    camera: Camera,
    live: OrbitPose,
    goal: OrbitPose,
    orbit_sensitivity: f32,
    pan_sensitivity: f32,
    zoom_sensitivity: f32,
    inertia: f32,
    bounds: CameraBoundsConfig,
}

impl OrbitCameraController {
    /// Create a controller at the configured initial pose.
    #[must_use]
    pub fn new(options: &OrbitOptions, bounds: CameraBoundsConfig) -> Self {
        let pose = OrbitPose {
            yaw: 0.0,
            pitch: 0.0,
            distance: 1.0,
            target: Vec3::ZERO,
        };
        let mut controller = Self {
            camera: Camera {
                fovy: options.fovy,
                znear: options.znear,
                zfar: options.zfar,
                ..Camera::default()
            },
            live: pose,
            goal: pose,
            orbit_sensitivity: 0.0,
            pan_sensitivity: 0.0,
            zoom_sensitivity: 0.0,
            inertia: 0.0,
            bounds,
        };
        controller.initialize(options);
        controller
    }

    /// Reset to the configured initial pose with no pending animation.
    pub fn initialize(&mut self, options: &OrbitOptions) {
        self.orbit_sensitivity = options.orbit_sensitivity;
        self.pan_sensitivity = options.pan_sensitivity;
        self.zoom_sensitivity = options.zoom_sensitivity;
        self.inertia = options.inertia.clamp(0.0, 1.0);

        let pose = OrbitPose {
            yaw: options.initial_yaw,
            pitch: options.initial_pitch,
            distance: options.initial_distance,
            target: options.initial_target(),
        };
        self.live = self.constrain(pose);
        self.goal = self.live;
        self.apply_to_camera();
    }

    // ── Input ────────────────────────────────────────────────────────────

    /// Pointer drag with the given button mask: left orbits, right or
    /// middle pans. Deltas are in pixels.
    pub fn on_pointer_drag(&mut self, buttons: u8, dx: f32, dy: f32) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        if buttons & BUTTON_LEFT != 0 {
            self.goal.yaw -= dx * self.orbit_sensitivity;
            self.goal.pitch = clamp_pitch(self.goal.pitch + dy * self.orbit_sensitivity);
        } else if buttons & (BUTTON_RIGHT | BUTTON_MIDDLE) != 0 {
            self.pan(dx, dy);
        }
    }

    /// Wheel zoom; positive `delta_y` moves away. Proportional to the
    /// current goal distance.
    pub fn on_scroll(&mut self, delta_y: f32) {
        if !delta_y.is_finite() {
            return;
        }
        let distance = self.goal.distance;
        self.goal.distance = self
            .bounds
            .clamp_distance(distance + delta_y * self.zoom_sensitivity * 0.01 * distance);
    }

    /// Pinch zoom; `ratio` is the new finger spread over the previous one.
    pub fn on_pinch(&mut self, ratio: f32) {
        if !ratio.is_finite() || ratio <= 0.0 {
            return;
        }
        self.goal.distance = self.bounds.clamp_distance(self.goal.distance / ratio);
    }

    /// Two-finger pan; same mapping as a right-button drag.
    pub fn on_two_finger_pan(&mut self, dx: f32, dy: f32) {
        if dx.is_finite() && dy.is_finite() {
            self.pan(dx, dy);
        }
    }

    /// Move the target along the camera's right/up axes at `speed` world
    /// units per second. Applies to the live pose immediately and shifts
    /// the goal by the same amount.
    pub fn on_arrow_key_pan(&mut self, dt: f32, speed: f32, keys: ArrowKeys) {
        if !dt.is_finite() || !speed.is_finite() || dt <= 0.0 {
            return;
        }
        let (h, v) = keys.axes();
        let delta = (self.camera.right() * h + self.camera.up_axis() * v) * speed * dt;
        if delta == Vec3::ZERO {
            return;
        }
        self.live.target = self.clamp_target(self.live.target + delta);
        self.goal.target = self.clamp_target(self.goal.target + delta);
        self.apply_to_camera();
    }

    fn pan(&mut self, dx: f32, dy: f32) {
        let scale = self.pan_sensitivity * self.live.distance;
        let offset = self.camera.right() * (-dx * scale) + self.camera.up_axis() * (dy * scale);
        self.goal.target = self.clamp_target(self.goal.target + offset);
    }

    // ── Per-frame ────────────────────────────────────────────────────────

    /// Advance the live pose toward the goal by `dt` seconds and update the
    /// camera.
    pub fn tick(&mut self, dt: f32) {
        if !dt.is_finite() || dt < 0.0 {
            return;
        }
        let t = 1.0 - self.inertia.powf(dt * 60.0);
        let next = self.live.lerp(&self.goal, t);
        self.live = self.constrain(next);
        self.apply_to_camera();
    }

    /// Jump to an explicit eye/target pair with no animation.
    ///
    /// Yaw, pitch and distance are back-solved from `position - target`. A
    /// zero-length offset falls back to distance 1.
    pub fn set_state(&mut self, position: Vec3, target: Vec3) {
        if !position.is_finite() || !target.is_finite() {
            log::debug!("ignoring non-finite camera state");
            return;
        }
        let offset = position - target;
        let length = offset.length();
        let distance = if length > DEGENERATE_OFFSET { length } else { 1.0 };
        let pose = OrbitPose {
            yaw: offset.x.atan2(offset.z).to_degrees(),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin().to_degrees(),
            distance,
            target,
        };
        self.live = self.constrain(pose);
        self.goal = self.live;
        self.apply_to_camera();
    }

    // ── Bounds ───────────────────────────────────────────────────────────

    /// Current bounds configuration.
    #[must_use]
    pub fn bounds(&self) -> &CameraBoundsConfig {
        &self.bounds
    }

    /// Apply a partial bounds update and re-clamp both poses, so the camera
    /// satisfies the new limits immediately. Returns whether the
    /// configuration changed.
    pub fn set_bounds(&mut self, update: &CameraBoundsUpdate) -> bool {
        if !self.bounds.apply(update) {
            return false;
        }
        self.goal = self.constrain(self.goal);
        self.live = self.constrain(self.live);
        self.apply_to_camera();
        true
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// The camera as of the last update.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The smoothed pose currently shown.
    #[must_use]
    pub fn pose(&self) -> OrbitPose {
        self.live
    }

    /// The pose the camera is easing toward.
    #[must_use]
    pub fn goal(&self) -> OrbitPose {
        self.goal
    }

    /// Update the projection aspect ratio from a viewport size.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite() {
            self.camera.aspect = width / height;
        }
    }

    fn clamp_target(&self, target: Vec3) -> Vec3 {
        self.bounds
            .active_pan_bounds()
            .map_or(target, |bounds| bounds.clamp(target))
    }

    fn constrain(&self, pose: OrbitPose) -> OrbitPose {
        OrbitPose {
            yaw: pose.yaw,
            pitch: clamp_pitch(pose.pitch),
            distance: self.bounds.clamp_distance(pose.distance),
            target: self.clamp_target(pose.target),
        }
    }

    fn apply_to_camera(&mut self) {
        self.camera.target = self.live.target;
        self.camera.eye = self.live.eye();
    }
}

fn clamp_pitch(pitch: f32) -> f32 {
    pitch.clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES)
}

impl CameraController for OrbitCameraController {
    fn set_state(&mut self, position: Vec3, target: Vec3) {
        Self::set_state(self, position, target);
    }

    fn telemetry(&self) -> CameraTelemetry {
        CameraTelemetry::from_camera(&self.camera)
    }

    fn pan_bounds(&self) -> PanBounds {
        self.bounds.pan_bounds()
    }

    fn camera(&self) -> &Camera {
        &self.camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> OrbitCameraController {
        OrbitCameraController::new(&OrbitOptions::default(), CameraBoundsConfig::default())
    }

    fn bounded() -> OrbitCameraController {
        let bounds = CameraBoundsConfig {
            use_pan_bounds: true,
            ..CameraBoundsConfig::default()
        };
        OrbitCameraController::new(&OrbitOptions::default(), bounds)
    }

    fn settle(c: &mut OrbitCameraController) {
        for _ in 0..600 {
            c.tick(1.0 / 60.0);
        }
    }

    #[test]
    fn initialize_has_no_pending_animation() {
        let c = controller();
        assert_eq!(c.pose(), c.goal());
        assert!((c.pose().yaw + 15.3).abs() < 1e-6);
        assert!((c.pose().distance - 5.383).abs() < 1e-6);
    }

    #[test]
    fn pitch_stays_within_limits() {
        let mut c = controller();
        for dy in [5000.0, -20000.0, 1e6] {
            c.on_pointer_drag(BUTTON_LEFT, 0.0, dy);
            c.tick(1.0 / 30.0);
            assert!(c.pose().pitch.abs() <= PITCH_LIMIT_DEGREES);
        }
    }

    #[test]
    fn scroll_clamps_to_min_distance() {
        let mut c = controller();
        c.set_state(Vec3::new(0.0, 0.0, 1.0), Vec3::ZERO);
        // 1 + d * 0.3 * 0.01 * 1 = 0.2
        c.on_scroll(-0.8 / 0.003);
        assert!((c.goal().distance - 0.5).abs() < 1e-5);
        settle(&mut c);
        assert!((c.pose().distance - 0.5).abs() < 1e-4);
    }

    #[test]
    fn pinch_clamps_to_max_distance() {
        let mut c = controller();
        c.on_pinch(0.01);
        assert_eq!(c.goal().distance, 20.0);
        c.tick(0.1);
        assert!(c.pose().distance <= 20.0);
    }

    #[test]
    fn pan_clamps_target_to_bounds() {
        let mut c = bounded();
        c.set_state(Vec3::new(2.9, 1.0, 5.0), Vec3::new(2.9, 1.0, 0.0));
        // Camera looks down -Z so right is +X.
        c.on_pointer_drag(BUTTON_RIGHT, -0.5 / (0.005 * 5.0), 0.0);
        assert!((c.goal().target.x - 3.0).abs() < 1e-5);
        settle(&mut c);
        assert!((c.pose().target.x - 3.0).abs() < 1e-4);
        assert!(c.bounds().pan_bounds().contains(c.pose().target));
    }

    #[test]
    fn target_stays_in_bounds_every_tick() {
        let mut c = bounded();
        for i in 0..200 {
            let dx = if i % 3 == 0 { -400.0 } else { 250.0 };
            c.on_pointer_drag(BUTTON_MIDDLE, dx, 300.0);
            c.on_two_finger_pan(-dx, -50.0);
            c.tick(1.0 / 60.0);
            assert!(c.bounds().pan_bounds().contains(c.pose().target));
        }
    }

    #[test]
    fn tick_with_zero_inertia_snaps() {
        let opts = OrbitOptions {
            inertia: 0.0,
            ..OrbitOptions::default()
        };
        let mut c = OrbitCameraController::new(&opts, CameraBoundsConfig::default());
        c.on_pointer_drag(BUTTON_LEFT, 10.0, 0.0);
        c.tick(1.0 / 60.0);
        assert_eq!(c.pose(), c.goal());
    }

    #[test]
    fn smoothing_is_frame_rate_independent() {
        let mut a = controller();
        let mut b = controller();
        a.on_pointer_drag(BUTTON_LEFT, 100.0, 0.0);
        b.on_pointer_drag(BUTTON_LEFT, 100.0, 0.0);
        a.tick(1.0 / 30.0);
        b.tick(1.0 / 60.0);
        b.tick(1.0 / 60.0);
        assert!((a.pose().yaw - b.pose().yaw).abs() < 1e-3);
    }

    #[test]
    fn set_state_back_solves_spherical_pose() {
        let mut c = controller();
        c.set_state(Vec3::new(3.0, 1.0, 3.0), Vec3::new(0.0, 1.0, 0.0));
        let pose = c.pose();
        assert!((pose.yaw - 45.0).abs() < 1e-4);
        assert!(pose.pitch.abs() < 1e-4);
        assert!((pose.distance - 18.0_f32.sqrt()).abs() < 1e-4);
        assert!((c.camera().eye - Vec3::new(3.0, 1.0, 3.0)).length() < 1e-4);
        assert_eq!(pose, c.goal());
    }

    #[test]
    fn set_state_with_coincident_points_defaults_distance() {
        let mut c = controller();
        c.set_state(Vec3::ONE, Vec3::ONE);
        assert_eq!(c.pose().distance, 1.0);
        assert!(c.camera().eye.is_finite());
    }

    #[test]
    fn non_finite_input_is_ignored() {
        let mut c = controller();
        let before = c.goal();
        c.on_pointer_drag(BUTTON_LEFT, f32::NAN, 1.0);
        c.on_scroll(f32::INFINITY);
        c.on_pinch(f32::NAN);
        c.set_state(Vec3::splat(f32::NAN), Vec3::ZERO);
        assert_eq!(c.goal(), before);
    }

    #[test]
    fn arrow_pan_moves_live_and_goal_together() {
        let mut c = controller();
        c.set_state(Vec3::new(0.0, 1.0, 5.0), Vec3::new(0.0, 1.0, 0.0));
        let keys = ArrowKeys {
            right: true,
            up: true,
            ..ArrowKeys::default()
        };
        c.on_arrow_key_pan(0.5, 2.0, keys);
        let target = c.pose().target;
        assert!((target.x - 1.0).abs() < 1e-4);
        assert!((target.y - 2.0).abs() < 1e-4);
        assert_eq!(c.goal().target, target);
        c.tick(1.0 / 60.0);
        assert!((c.pose().target - target).length() < 1e-5);
    }

    #[test]
    fn opposite_arrows_cancel() {
        let mut c = controller();
        let before = c.pose();
        let keys = ArrowKeys {
            left: true,
            right: true,
            ..ArrowKeys::default()
        };
        c.on_arrow_key_pan(0.5, 2.0, keys);
        assert_eq!(c.pose(), before);
    }

    #[test]
    fn tightening_bounds_reclamps_goal() {
        let mut c = controller();
        let changed = c.set_bounds(&CameraBoundsUpdate {
            distance_max: Some(2.0),
            ..CameraBoundsUpdate::default()
        });
        assert!(changed);
        assert_eq!(c.goal().distance, 2.0);
        c.tick(1.0 / 60.0);
        assert!(c.pose().distance <= 2.0);
    }

    #[test]
    fn enabling_bounds_clamps_live_camera_immediately() {
        let mut c = controller();
        c.set_state(Vec3::new(10.0, 1.0, 5.0), Vec3::new(10.0, 1.0, 0.0));
        assert!(c.set_bounds(&CameraBoundsUpdate {
            use_pan_bounds: Some(true),
            distance_max: Some(3.0),
            ..CameraBoundsUpdate::default()
        }));
        let bounds = c.bounds().pan_bounds();
        assert!(bounds.contains(c.pose().target));
        assert!(bounds.contains(c.camera().target));
        assert!(c.pose().distance <= 3.0);
        assert!((c.camera().eye - c.camera().target).length() <= 3.0 + 1e-4);
    }
}

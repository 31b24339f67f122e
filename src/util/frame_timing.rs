use web_time::{Duration, Instant};

/// Presentation rate used when no display options override it.
pub const DEFAULT_TARGET_FPS: u32 = 35;

/// Frame limiter and smoothed FPS meter.
///
/// The host drives it once per animation frame: skip the frame when
/// [`should_render`](Self::should_render) is false, otherwise tick the
/// session and call [`end_frame`](Self::end_frame) to get the elapsed time.
#[derive(Debug, Clone)]
pub struct FrameTiming {
    /// Target FPS (0 = unlimited)
    target_fps: u32,
    /// Minimum frame duration based on target FPS
    min_frame_duration: Duration,
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Weight of the newest sample in the moving average
    smoothing: f32,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_FPS)
    }
}

fn min_frame_duration(target_fps: u32) -> Duration {
    if target_fps > 0 {
        Duration::from_secs_f64(1.0 / f64::from(target_fps))
    } else {
        Duration::ZERO
    }
}

impl FrameTiming {
    /// Create a new frame timer with the given FPS target (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        Self {
            target_fps,
            min_frame_duration: min_frame_duration(target_fps),
            last_frame: Instant::now(),
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Current FPS cap (0 = unlimited).
    #[must_use]
    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Change the FPS cap.
    pub fn set_target_fps(&mut self, target_fps: u32) {
        self.target_fps = target_fps;
        self.min_frame_duration = min_frame_duration(target_fps);
    }

    /// Shortest time between two presented frames.
    #[must_use]
    pub fn frame_budget(&self) -> Duration {
        self.min_frame_duration
    }

    /// Whether enough time has passed since the last frame to render again.
    #[must_use]
    pub fn should_render(&self) -> bool {
        if self.target_fps == 0 {
            return true;
        }
        self.last_frame.elapsed() >= self.min_frame_duration
    }

    /// Mark a frame as presented. Returns the seconds elapsed since the
    /// previous frame, for use as the tick `dt`.
    pub fn end_frame(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        frame_time
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_caps_at_35_fps() {
        let timing = FrameTiming::default();
        assert_eq!(timing.target_fps(), 35);
        let budget = timing.frame_budget().as_secs_f64();
        assert!((budget - 1.0 / 35.0).abs() < 1e-9);
    }

    #[test]
    fn unlimited_always_renders() {
        let mut timing = FrameTiming::new(35);
        timing.set_target_fps(0);
        assert!(timing.should_render());
        assert_eq!(timing.frame_budget(), Duration::ZERO);
    }

    #[test]
    fn end_frame_reports_non_negative_dt() {
        let mut timing = FrameTiming::new(0);
        let dt = timing.end_frame();
        assert!(dt >= 0.0);
        assert!(timing.fps() > 0.0);
    }
}

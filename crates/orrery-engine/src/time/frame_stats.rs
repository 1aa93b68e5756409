/// Length of one FPS sampling window, in milliseconds.
pub const FPS_WINDOW_MS: f64 = 500.0;

/// Rolling frames-per-second estimator.
///
/// Frames are counted until at least [`FPS_WINDOW_MS`] has passed since the window
/// opened; the count is then converted to a rate and the window restarts at the
/// closing timestamp. A publish therefore happens at most once per window.
///
/// No attempt is made to correct the first window after a long stall (e.g. a
/// minimized window): it simply reports what it measured.
#[derive(Debug, Clone)]
pub struct FrameStatsTracker {
    frame_count: u32,
    window_start_ms: f64,
    last_fps: u32,
}

impl FrameStatsTracker {
    /// Creates a tracker whose first window opens at `start_ms`.
    pub fn new(start_ms: f64) -> Self {
        Self {
            frame_count: 0,
            window_start_ms: start_ms,
            last_fps: 0,
        }
    }

    /// Records one frame at `now_ms`.
    ///
    /// Returns the FPS estimate when this frame closes the window, `None` otherwise.
    pub fn tick(&mut self, now_ms: f64) -> Option<u32> {
        self.frame_count += 1;

        let span = now_ms - self.window_start_ms;
        if span < FPS_WINDOW_MS {
            return None;
        }

        let fps = (f64::from(self.frame_count) * 1000.0 / span).round() as u32;
        self.frame_count = 0;
        self.window_start_ms = now_ms;
        self.last_fps = fps;

        Some(fps)
    }

    /// Most recently published estimate (`0` until the first window closes).
    pub fn last_fps(&self) -> u32 {
        self.last_fps
    }

    /// Frames counted in the currently open window.
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Timestamp at which the current window opened.
    pub fn window_start_ms(&self) -> f64 {
        self.window_start_ms
    }
}

impl Default for FrameStatsTracker {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_inside_window() {
        let mut stats = FrameStatsTracker::new(0.0);
        for i in 0..10 {
            assert_eq!(stats.tick(i as f64 * 16.0), None);
        }
        assert_eq!(stats.frame_count(), 10);
        assert_eq!(stats.last_fps(), 0);
    }

    #[test]
    fn thirty_frames_then_close_at_510ms() {
        let mut stats = FrameStatsTracker::new(0.0);

        let mut published = Vec::new();
        for i in 0..30 {
            // Spread over [0, 490] ms.
            if let Some(fps) = stats.tick(i as f64 * 490.0 / 29.0) {
                published.push(fps);
            }
        }
        if let Some(fps) = stats.tick(510.0) {
            published.push(fps);
        }

        assert_eq!(published.len(), 1);
        // 31 frames counted over 510 ms.
        assert_eq!(published[0], (31.0_f64 * 1000.0 / 510.0).round() as u32);
    }

    #[test]
    fn closing_resets_window() {
        let mut stats = FrameStatsTracker::new(0.0);
        stats.tick(100.0);
        assert_eq!(stats.tick(500.0), Some(4));

        assert_eq!(stats.frame_count(), 0);
        assert_eq!(stats.window_start_ms(), 500.0);
        assert_eq!(stats.last_fps(), 4);
    }

    #[test]
    fn exactly_500ms_closes_window() {
        let mut stats = FrameStatsTracker::new(1000.0);
        assert_eq!(stats.tick(1499.9), None);
        assert_eq!(stats.tick(1500.0), Some(4));
    }

    #[test]
    fn steady_sixty_hz() {
        let mut stats = FrameStatsTracker::new(0.0);
        let frame = 1000.0 / 60.0;
        let mut last = None;
        for i in 1..=120 {
            if let Some(fps) = stats.tick(i as f64 * frame) {
                last = Some(fps);
            }
        }
        assert_eq!(last, Some(60));
    }

    #[test]
    fn long_stall_reports_low_rate() {
        let mut stats = FrameStatsTracker::new(0.0);
        // A single frame after five seconds of nothing.
        assert_eq!(stats.tick(5000.0), Some(0));
    }
}

use web_time::Instant;

/// Elapsed time between animation callbacks, with a smoothed FPS readout.
///
/// Hosts that receive a timestamp with each callback (browsers pass one to
/// `requestAnimationFrame`) use [`tick`](Self::tick); native hosts use
/// [`tick_now`](Self::tick_now).
pub struct FrameClock {
    /// Timestamp of the previous tick in milliseconds.
    last_ms: Option<f64>,
    /// Origin for `tick_now` timestamps.
    epoch: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a clock that has not ticked yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_ms: None,
            epoch: Instant::now(),
            smoothed_fps: 60.0, // Start with reasonable default
            smoothing: 0.05,    /* 5% new value, 95% old value for smooth
                                 * display */
        }
    }

    /// Advance to `timestamp_ms` and return the seconds since the previous
    /// tick.
    ///
    /// The first tick returns 0. A timestamp earlier than the previous one
    /// also returns 0 and leaves the clock where it was.
    pub fn tick(&mut self, timestamp_ms: f64) -> f32 {
        let Some(last) = self.last_ms else {
            self.last_ms = Some(timestamp_ms);
            return 0.0;
        };
        if timestamp_ms.is_nan() || timestamp_ms < last {
            return 0.0;
        }
        self.last_ms = Some(timestamp_ms);

        let dt = ((timestamp_ms - last) * 0.001) as f32;
        if dt > 0.0 {
            let instant_fps = 1.0 / dt;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        dt
    }

    /// Tick using the monotonic system clock.
    pub fn tick_now(&mut self) -> f32 {
        let ms = self.epoch.elapsed().as_secs_f64() * 1000.0;
        self.tick(ms)
    }

    /// Forget the previous timestamp so the next tick returns 0.
    ///
    /// Used when the animation loop resumes after a pause, so the pause is
    /// not replayed as one long frame.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(12_345.0), 0.0);
    }

    #[test]
    fn tick_returns_seconds_between_timestamps() {
        let mut clock = FrameClock::new();
        let _ = clock.tick(1000.0);
        assert!((clock.tick(1016.0) - 0.016).abs() < 1e-6);
        assert!((clock.tick(1516.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn backwards_timestamp_does_not_rewind() {
        let mut clock = FrameClock::new();
        let _ = clock.tick(1000.0);
        let _ = clock.tick(2000.0);
        assert_eq!(clock.tick(1500.0), 0.0);
        // Still measured from 2000, not 1500
        assert!((clock.tick(2100.0) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn reset_restarts_from_zero() {
        let mut clock = FrameClock::new();
        let _ = clock.tick(0.0);
        clock.reset();
        assert_eq!(clock.tick(60_000.0), 0.0);
    }

    #[test]
    fn fps_moves_toward_frame_rate() {
        let mut clock = FrameClock::new();
        let mut t = 0.0;
        for _ in 0..400 {
            let _ = clock.tick(t);
            t += 1000.0 / 30.0;
        }
        assert!((clock.fps() - 30.0).abs() < 1.0);
    }

    #[test]
    fn tick_now_is_monotonic() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick_now(), 0.0);
        assert!(clock.tick_now() >= 0.0);
    }
}

//! Frame clock
//!
//! The scene advances once per animation frame. Scripts integrate with the
//! normalized delta this clock produces rather than wall-clock seconds, so the
//! simulation speed is tied to the ideal frame rate instead of jitter.

use std::time::Instant;

/// Ideal frame interval for a 60 Hz display, in milliseconds
pub const IDEAL_FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

/// Frame clock producing a normalized per-frame delta
///
/// `delta = (timestamp - last_timestamp) / ideal_frame_interval`, so a frame
/// rendered on time yields a delta of about 1.0; a frame that took twice as
/// long yields about 2.0.
///
/// # Known discontinuity
/// The delta is not clamped. A long pause (a backgrounded window, a debugger
/// break) shows up as one large delta on the next tick, and everything that
/// integrates with it jumps forward accordingly.
#[derive(Debug, Clone)]
pub struct Clock {
    origin: Instant,
    ideal_frame_interval_ms: f64,
    last_timestamp_ms: f64,
    delta: f64,
    frame_count: u64,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    /// Create a clock targeting 60 Hz
    pub fn new() -> Self {
        Self::with_frame_interval(IDEAL_FRAME_INTERVAL_MS)
    }

    /// Create a clock with a custom ideal frame interval in milliseconds
    pub fn with_frame_interval(ideal_frame_interval_ms: f64) -> Self {
        Self {
            origin: Instant::now(),
            ideal_frame_interval_ms,
            last_timestamp_ms: 0.0,
            delta: 0.0,
            frame_count: 0,
        }
    }

    /// Advance the clock to `timestamp_ms` (milliseconds since an arbitrary origin)
    ///
    /// Must be called exactly once per rendered frame, before the scene update.
    pub fn tick(&mut self, timestamp_ms: f64) {
        self.delta = (timestamp_ms - self.last_timestamp_ms) / self.ideal_frame_interval_ms;
        self.last_timestamp_ms = timestamp_ms;
        self.frame_count += 1;
        log::trace!("Clock tick #{}: delta {:.4}", self.frame_count, self.delta);
    }

    /// Advance the clock using the wall time elapsed since the clock was created
    pub fn tick_now(&mut self) {
        let timestamp_ms = self.origin.elapsed().as_secs_f64() * 1000.0;
        self.tick(timestamp_ms);
    }

    /// Normalized delta of the last tick (about 1.0 at the ideal frame rate)
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Timestamp passed to the last tick, in milliseconds
    pub fn last_timestamp_ms(&self) -> f64 {
        self.last_timestamp_ms
    }

    /// Ideal frame interval in milliseconds
    pub fn ideal_frame_interval_ms(&self) -> f64 {
        self.ideal_frame_interval_ms
    }

    /// Number of ticks so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_on_time_frame_has_unit_delta() {
        let mut clock = Clock::new();
        clock.tick(1000.0);
        clock.tick(1000.0 + IDEAL_FRAME_INTERVAL_MS);
        assert_relative_eq!(clock.delta(), 1.0, epsilon = 1e-9);
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn test_slow_frame_scales_delta() {
        let mut clock = Clock::new();
        clock.tick(0.0);
        clock.tick(IDEAL_FRAME_INTERVAL_MS * 3.0);
        assert_relative_eq!(clock.delta(), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_long_pause_is_not_clamped() {
        let mut clock = Clock::new();
        clock.tick(0.0);
        clock.tick(10_000.0);
        assert_relative_eq!(clock.delta(), 600.0, epsilon = 1e-9);
    }

    #[test]
    fn test_custom_frame_interval() {
        let mut clock = Clock::with_frame_interval(10.0);
        clock.tick(25.0);
        assert_relative_eq!(clock.delta(), 2.5);
        assert_relative_eq!(clock.last_timestamp_ms(), 25.0);
    }
}

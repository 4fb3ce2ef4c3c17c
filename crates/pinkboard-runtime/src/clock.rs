//! Frame clock with first-frame and spike clamping

use std::time::Instant;

/// Tracks per-frame elapsed time.
///
/// The first tick always yields a zero delta, and later deltas are clamped
/// to `max_delta` so a stalled tab or debugger pause can't produce one huge
/// integration step.
pub struct FrameClock {
    /// Total elapsed animation time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// Largest delta a single frame may report (default: 250ms)
    pub max_delta: f64,
    /// Last tick instant
    last_instant: Instant,
    /// Whether this is the first tick
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            max_delta: 0.25,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock with a custom delta clamp
    pub fn with_max_delta(max_delta: f64) -> Self {
        Self {
            max_delta,
            ..Self::default()
        }
    }

    /// Advance from the wall clock. Call once per frame.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.advance(elapsed)
    }

    /// Advance by an externally measured (or synthetic) elapsed time.
    /// Returns the delta the frame should use.
    pub fn advance(&mut self, elapsed: f64) -> f64 {
        if self.first_tick {
            self.first_tick = false;
            self.delta_time = 0.0;
            return 0.0;
        }

        self.delta_time = if elapsed.is_finite() {
            elapsed.clamp(0.0, self.max_delta)
        } else {
            0.0
        };
        self.total_time += self.delta_time;
        self.delta_time
    }

    /// Forget the previous tick so the next one reports a zero delta again
    pub fn reset(&mut self) {
        self.first_tick = true;
        self.delta_time = 0.0;
        self.last_instant = Instant::now();
    }
}

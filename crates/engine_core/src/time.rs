//! Frame timing for host-owned simulation loops.

use std::time::Duration;

/// Longest step handed to the simulation. A stall (debugger, window drag)
/// otherwise turns into one huge integration step.
const DEFAULT_MAX_DELTA: Duration = Duration::from_millis(100);

/// Tracks per-tick elapsed time. Steps are variable and driven explicitly
/// with [`FrameClock::advance`], which keeps headless runs deterministic.
#[derive(Debug)]
pub struct FrameClock {
    /// Duration of the current step (after clamping).
    delta: Duration,
    /// Total simulated time.
    elapsed: Duration,
    /// Ticks since start.
    frame_count: u64,
    /// Upper bound applied to every step.
    max_delta: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
            max_delta: DEFAULT_MAX_DELTA,
        }
    }

    /// Advance by one step, clamped to the max delta.
    pub fn advance(&mut self, step: Duration) {
        self.delta = step.min(self.max_delta);
        self.elapsed += self.delta;
        self.frame_count += 1;
    }

    /// Get the delta time in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Get total simulated time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

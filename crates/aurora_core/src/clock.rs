//! # Frame Clock
//!
//! The single shared notion of "now" for one render tick.
//!
//! Elapsed time is monotonic and never resets mid-session. Closed-form
//! systems read [`FrameTime::elapsed`]; integrated systems read
//! [`FrameTime::delta`], which is clamped so a stalled tab does not fling
//! accumulated rotations forward in one frame.
//!
//! The clock keeps seconds as `f64` and narrows only when it hands out a
//! [`FrameTime`], so deltas stay exact in long-running sessions.

use std::time::Instant;

use crate::config::ClockConfig;

/// Timing for a single frame, copied into every updater call.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds since the clock started.
    pub elapsed: f32,
    /// Seconds since the previous tick, clamped to `max_delta`.
    pub delta: f32,
    /// Frame counter, starting at 1 for the first tick.
    pub frame: u64,
}

impl FrameTime {
    /// Builds a frame time directly (tests, offline drivers).
    #[must_use]
    pub const fn at(elapsed: f32, delta: f32, frame: u64) -> Self {
        Self {
            elapsed,
            delta,
            frame,
        }
    }
}

/// Where the clock reads time from.
#[derive(Clone, Copy, Debug)]
enum Source {
    /// Real monotonic time.
    Wall(Instant),
    /// Time advanced explicitly by the driver.
    Manual,
}

/// Monotonic elapsed-time source driving every system.
#[derive(Clone, Debug)]
pub struct FrameClock {
    source: Source,
    /// Last reported elapsed seconds.
    elapsed: f64,
    /// Manual-mode target elapsed seconds.
    manual_elapsed: f64,
    /// Frames ticked so far.
    frame: u64,
    /// Delta clamp.
    max_delta: f32,
}

impl FrameClock {
    /// Creates a clock reading the wall clock from now.
    #[must_use]
    pub fn start(config: &ClockConfig) -> Self {
        Self::with_source(Source::Wall(Instant::now()), config)
    }

    /// Creates a clock that only moves when [`FrameClock::advance`] is called.
    #[must_use]
    pub fn manual(config: &ClockConfig) -> Self {
        Self::with_source(Source::Manual, config)
    }

    fn with_source(source: Source, config: &ClockConfig) -> Self {
        Self {
            source,
            elapsed: 0.0,
            manual_elapsed: 0.0,
            frame: 0,
            max_delta: config.max_delta,
        }
    }

    /// Moves a manual clock forward. Negative or non-finite steps are ignored.
    pub fn advance(&mut self, seconds: f32) {
        if seconds.is_finite() && seconds > 0.0 {
            self.manual_elapsed += f64::from(seconds);
        }
    }

    /// Returns seconds elapsed as of the last tick.
    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed as f32
    }

    /// Returns the number of ticks so far.
    #[inline]
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Samples the source and produces this frame's timing.
    ///
    /// Elapsed never decreases; delta is in `[0, max_delta]`.
    pub fn tick(&mut self) -> FrameTime {
        let now = match self.source {
            Source::Wall(start) => start.elapsed().as_secs_f64(),
            Source::Manual => self.manual_elapsed,
        };
        let now = if now.is_finite() { now.max(self.elapsed) } else { self.elapsed };

        let delta = (now - self.elapsed).clamp(0.0, f64::from(self.max_delta));
        self.elapsed = now;
        self.frame += 1;

        FrameTime {
            elapsed: now as f32,
            delta: delta as f32,
            frame: self.frame,
        }
    }
}

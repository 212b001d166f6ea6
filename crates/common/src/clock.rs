//! Clock and timing utilities for gesture sessions and animation frames.
//!
//! A discovery session is anchored to a monotonic epoch recorded when
//! the session starts. Animations advance in fixed frame steps so that
//! replays are deterministic regardless of wall-clock jitter.

use std::time::{Duration, Instant};

/// A session clock that provides monotonic timestamps relative to
/// a fixed epoch (the moment the session started).
#[derive(Debug, Clone)]
pub struct SessionClock {
    /// The instant the session started.
    epoch: Instant,

    /// Wall-clock time at epoch (RFC 3339 string).
    epoch_wall: String,
}

impl SessionClock {
    /// Create a new session clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Milliseconds elapsed since session start.
    pub fn elapsed_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    /// Wall-clock time at session start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }
}

impl Default for SessionClock {
    fn default() -> Self {
        Self::start()
    }
}

/// Fixed-step frame clock used to drive animations.
#[derive(Debug, Clone)]
pub struct FrameClock {
    hz: u32,
    frames: u64,
}

impl FrameClock {
    /// Create a clock ticking at the given Hz rate. A zero rate is
    /// treated as 1 Hz.
    pub fn new(target_hz: u32) -> Self {
        Self {
            hz: target_hz.max(1),
            frames: 0,
        }
    }

    pub fn hz(&self) -> u32 {
        self.hz
    }

    /// Duration of a single frame, for pacing against the wall clock.
    pub fn interval(&self) -> Duration {
        Duration::from_secs_f64(self.dt_secs())
    }

    /// Duration of a single frame in seconds.
    pub fn dt_secs(&self) -> f64 {
        1.0 / self.hz as f64
    }

    /// Advance by one frame, returning the new frame count.
    pub fn tick(&mut self) -> u64 {
        self.frames += 1;
        self.frames
    }

    /// Frames ticked so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Simulated time elapsed across all ticked frames.
    pub fn elapsed_secs(&self) -> f64 {
        self.frames as f64 / self.hz as f64
    }

    /// Number of whole frames needed to cover `ms` milliseconds.
    pub fn frames_for_ms(&self, ms: u64) -> u64 {
        ms.saturating_mul(self.hz as u64).div_ceil(1_000)
    }
}

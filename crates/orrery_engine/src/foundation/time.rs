//! Time management utilities

use std::fmt;

/// A span of time measured in seconds
///
/// Recreated every frame from two clock samples and handed to layers as
/// their update delta.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Time {
    seconds: f32,
}

impl Time {
    /// Zero-length span
    pub const ZERO: Self = Self { seconds: 0.0 };

    /// Create a span from seconds
    pub fn from_seconds(seconds: f32) -> Self {
        Self { seconds }
    }

    /// Span in seconds
    pub fn seconds(self) -> f32 {
        self.seconds
    }

    /// Span in milliseconds
    pub fn milliseconds(self) -> f32 {
        self.seconds * 1000.0
    }
}

impl From<f32> for Time {
    fn from(seconds: f32) -> Self {
        Self::from_seconds(seconds)
    }
}

impl From<Time> for f32 {
    fn from(time: Time) -> Self {
        time.seconds
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} ms", self.milliseconds())
    }
}

/// Frame timer fed by clock samples
///
/// The application samples its window clock once per frame and calls
/// [`tick`](Self::tick); the timer keeps the derived statistics.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    last_sample: f64,
    delta_time: Time,
    total_time: f64,
    frame_count: u64,
}

impl FrameTimer {
    /// Create a timer whose first delta is measured from `start`
    pub fn new(start: f64) -> Self {
        Self {
            last_sample: start,
            delta_time: Time::ZERO,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Record a new clock sample and return the delta since the previous one
    ///
    /// A sample older than the previous one yields a zero delta rather than a
    /// negative span.
    pub fn tick(&mut self, now: f64) -> Time {
        let elapsed = (now - self.last_sample).max(0.0);
        self.last_sample = now;
        self.delta_time = Time::from_seconds(elapsed as f32);
        self.total_time += elapsed;
        self.frame_count += 1;
        self.delta_time
    }

    /// Delta of the most recent frame
    pub fn delta_time(&self) -> Time {
        self.delta_time
    }

    /// Seconds accumulated across all ticks
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Number of ticks recorded
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// FPS derived from the most recent frame
    pub fn current_fps(&self) -> f32 {
        if self.delta_time.seconds() > 0.0 {
            1.0 / self.delta_time.seconds()
        } else {
            0.0
        }
    }

    /// Average FPS since the timer was created
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            (self.frame_count as f64 / self.total_time) as f32
        } else {
            0.0
        }
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new(0.0)
    }
}

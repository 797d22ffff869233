use crate::geo::Rect;
use crate::settings::Settings;
use std::time::{Duration, Instant};

/// A free-running frame counter driven by wall-clock time.
///
/// It advances at most one frame per call, no matter how much time has passed, and restarts its
/// timer from the instant it advanced.
#[derive(Debug)]
pub struct Animation {
    frame: u32,
    frame_count: u32,
    duration: Duration,
    last_change: Instant,
    frame_width: i32,
    frame_height: i32,
}

impl Animation {
    /// Create an animation starting at frame 0 at the instant `start`.
    ///
    /// # Panics
    ///
    /// Panics when `settings.frame_count` is 0. Use `Settings::validate` first.
    pub fn new(settings: &Settings, start: Instant) -> Self {
        assert!(settings.frame_count > 0);

        Self {
            frame: 0,
            frame_count: settings.frame_count,
            duration: settings.frame_duration(),
            last_change: start,
            frame_width: settings.frame_width as i32,
            frame_height: settings.frame_height as i32,
        }
    }

    /// Advance to the next frame when the current one has been shown long enough.
    ///
    /// Returns `true` when the frame changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_change) >= self.duration {
            self.frame = (self.frame + 1) % self.frame_count;
            self.last_change = now;

            true
        } else {
            false
        }
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// The sheet region for the current frame, taken from the top row.
    pub fn rect(&self) -> Rect {
        let x = (self.frame as i32).saturating_mul(self.frame_width);

        Rect::from_size(x, 0, self.frame_width, self.frame_height)
    }
}

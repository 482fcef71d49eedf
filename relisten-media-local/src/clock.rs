//! Wall-clock model of a playback position.

use std::time::Instant;

/// Playback position as a base offset plus the wall time elapsed since
/// playback started, clamped to the media duration.
///
/// While stopped the position is exactly `base`; while running it is
/// interpolated from the start instant, so no timer has to tick for the
/// position to be current.
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    duration: f64,
    base: f64,
    running_since: Option<Instant>,
}

impl PlaybackClock {
    /// A stopped clock at position zero.
    #[must_use]
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            base: 0.0,
            running_since: None,
        }
    }

    /// Total media duration in seconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    /// Current position in seconds, clamped to `[0, duration]`.
    #[must_use]
    pub fn position(&self) -> f64 {
        let elapsed = self
            .running_since
            .map_or(0.0, |since| since.elapsed().as_secs_f64());
        (self.base + elapsed).min(self.duration)
    }

    /// Start advancing. Idempotent while already running.
    pub fn start(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    /// Freeze the position where it is.
    pub fn stop(&mut self) {
        self.base = self.position();
        self.running_since = None;
    }

    /// Move to the given position, clamped to the media bounds. Non-finite
    /// input is ignored.
    pub fn seek(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            return;
        }
        self.base = seconds.clamp(0.0, self.duration);
        if self.running_since.is_some() {
            self.running_since = Some(Instant::now());
        }
    }

    /// Whether the playhead has reached the end of the media.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.position() >= self.duration
    }
}

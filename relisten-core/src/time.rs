//! Time display conversion for playback positions and durations.

/// Display text used when no meaningful time is known.
pub const UNKNOWN_TIME_TEXT: &str = "--:--";

/// A playback instant that may not be known yet.
///
/// The underlying media reports no usable duration until enough of the
/// source has loaded; `Unknown` models that window as a proper variant
/// instead of a sentinel string. Rendering to the `--:--` display happens
/// only at the presentation edge, via [`MediaTime::display`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaTime {
    /// A known instant, in seconds from the start of the media.
    Known(f64),
    /// No finite duration/position is available.
    Unknown,
}

impl MediaTime {
    /// Whether this carries a concrete second count.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// Render as display text (`MM:SS` / `H:MM:SS`, or `--:--`).
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Known(seconds) => format_duration_text(*seconds),
            Self::Unknown => UNKNOWN_TIME_TEXT.to_string(),
        }
    }
}

/// Format a second count as `MM:SS`, or `H:MM:SS` once hours are reached.
///
/// Input is floored to whole seconds. Hours are unpadded and the hour field
/// is omitted entirely below one hour; minutes and seconds are always two
/// digits. Callers guard against negative or non-finite input —
/// [`MediaTime`] does so at the model boundary.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_duration_text(seconds: f64) -> String {
    let total = seconds.floor() as u64;
    let second = total % 60;
    let minute = (total / 60) % 60;
    let hour = total / 3600;

    if hour > 0 {
        format!("{hour}:{minute:02}:{second:02}")
    } else {
        format!("{minute:02}:{second:02}")
    }
}

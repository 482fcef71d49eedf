use crate::time::MediaTime;

/// Whether the underlying media is playing, paused, or not loaded at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayingState {
    /// Media is loaded and advancing.
    Playing,
    /// Media is loaded but halted.
    Paused,
    /// Nothing meaningful to report; used instead of null/undefined.
    NotLoaded,
}

/// Immutable snapshot of the engine's observable state.
///
/// Invariant: [`PlayingState::NotLoaded`] always pairs with two
/// [`MediaTime::Unknown`] times; any other state pairs with two `Known`
/// times derived from the same instant. The constructors are the only way
/// the engine builds a snapshot, so the invariant holds by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioState {
    pub playing: PlayingState,
    pub position: MediaTime,
    pub duration: MediaTime,
}

impl AudioState {
    /// The sentinel snapshot for media with no loaded content.
    #[must_use]
    pub const fn not_loaded() -> Self {
        Self {
            playing: PlayingState::NotLoaded,
            position: MediaTime::Unknown,
            duration: MediaTime::Unknown,
        }
    }

    /// Snapshot of loaded media from its live properties.
    #[must_use]
    pub const fn loaded(paused: bool, position: f64, duration: f64) -> Self {
        Self {
            playing: if paused {
                PlayingState::Paused
            } else {
                PlayingState::Playing
            },
            position: MediaTime::Known(position),
            duration: MediaTime::Known(duration),
        }
    }

    /// Whether the snapshot reports actively advancing playback.
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        matches!(self.playing, PlayingState::Playing)
    }
}

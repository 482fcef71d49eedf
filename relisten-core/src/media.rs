//! The seam between the playback engine and the platform media primitive.

use crate::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Events raised by the underlying media primitive.
///
/// Backends queue these as their state changes; the engine drains the queue
/// and turns each event into one plugin notification round, preserving
/// occurrence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    /// Playback actually started (after a play request resolved).
    Started,
    /// Playback was halted.
    Paused,
    /// The playback position moved, by normal progress or by a seek.
    PositionUpdated,
    /// The media's duration became known or changed.
    DurationChanged,
}

/// A playable source: an opaque resolvable byte source plus the display
/// name shown to the listener and recorded on notes.
///
/// The core never inspects the bytes behind `path`; resolving them is the
/// backend's business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSource {
    pub display_name: String,
    pub path: PathBuf,
}

impl MediaSource {
    /// Build a source from a local path, deriving the display name from
    /// the file name.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display_name = path.file_name().map_or_else(
            || path.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        );
        Self { display_name, path }
    }
}

/// The underlying media primitive, exclusively owned by one engine
/// instance.
///
/// Implementations should:
///
/// - Resolve `load` only once enough data is buffered to play the source
///   through without interruption
/// - Resolve `play` once playback has actually started
/// - Queue a [`MediaEvent`] for every externally observable transition,
///   drained by the engine via [`drain_events`](MediaBackend::drain_events)
/// - Clamp seeks to their own bounds and report the seek as a
///   position-updated event on the next drain
///
/// The engine does not serialize overlapping `play` calls; its `&mut`
/// receiver already limits one engine instance to a single in-flight call,
/// and backends may assume that.
#[async_trait]
pub trait MediaBackend: Send {
    /// (Re)load a source, replacing whatever was loaded before.
    ///
    /// # Errors
    ///
    /// Returns an error when the source cannot be resolved or decoded.
    async fn load(&mut self, source: &MediaSource) -> Result<()>;

    /// Start or resume playback of the loaded media.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoMediaLoaded`](crate::CoreError::NoMediaLoaded)
    /// when nothing is loaded, or a playback error from the platform.
    async fn play(&mut self) -> Result<()>;

    /// Halt playback. Synchronous and idempotent.
    fn pause(&mut self);

    /// Live elapsed seconds, `0.0` when nothing is loaded.
    fn position(&self) -> f64;

    /// Seek to the given second count, clamped to the media's bounds.
    fn seek(&mut self, seconds: f64);

    /// Total duration in seconds, `None` until known.
    fn duration(&self) -> Option<f64>;

    /// Whether playback is currently halted.
    fn is_paused(&self) -> bool;

    /// Take all queued events, oldest first.
    fn drain_events(&mut self) -> Vec<MediaEvent>;

    /// Release the media resource. The backend reports nothing afterwards.
    fn unload(&mut self);
}

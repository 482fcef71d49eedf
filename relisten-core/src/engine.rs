//! The playback engine: owns the media backend and fans its events out to
//! registered plugins.

use crate::error::Result;
use crate::media::{MediaBackend, MediaEvent, MediaSource};
use crate::state::AudioState;

/// Handle identifying a registered plugin, returned by
/// [`AudioEngine::register_plugin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PluginId(u64);

/// Observer registered with the [`AudioEngine`].
///
/// All hooks are optional (default to no-ops) and side-effect-only. Each
/// receives the freshly computed [`AudioState`] snapshot plus the media
/// handle, which is what a plugin needs to read or move the playhead.
///
/// `on_tick` fires after every state-changing event, so it is a strict
/// superset of the `on_play`/`on_pause` calls. `dispose` fires exactly
/// once, at engine teardown, with the not-loaded sentinel state.
pub trait EnginePlugin: Send {
    /// Playback started.
    fn on_play(&mut self, _state: &AudioState, _media: &mut dyn MediaBackend) {}

    /// Playback was paused.
    fn on_pause(&mut self, _state: &AudioState, _media: &mut dyn MediaBackend) {}

    /// A fresh state snapshot is available.
    fn on_tick(&mut self, _state: &AudioState, _media: &mut dyn MediaBackend) {}

    /// The engine is tearing down; release plugin-owned resources.
    fn dispose(&mut self, _state: &AudioState) {}
}

/// Owns one media backend, exposes play/pause/seek, and distributes
/// lifecycle events to plugins in registration order.
///
/// Notification protocol, per drained event: compute the state once, then
/// for `Started` notify every plugin's `on_play`, for `Paused` every
/// `on_pause`, and in all cases finish the round with every plugin's
/// `on_tick`. One event is one round; rounds never interleave. A seek a
/// plugin performs mid-round is queued by the backend and becomes its own
/// round on the next [`pump`](AudioEngine::pump).
pub struct AudioEngine {
    media: Box<dyn MediaBackend>,
    plugins: Vec<(PluginId, Box<dyn EnginePlugin>)>,
    next_plugin_id: u64,
}

impl AudioEngine {
    #[must_use]
    pub fn new(media: Box<dyn MediaBackend>) -> Self {
        Self {
            media,
            plugins: Vec::new(),
            next_plugin_id: 0,
        }
    }

    /// Start playback.
    ///
    /// With a source, (re)loads it and starts once enough data is
    /// buffered; without one, resumes the already loaded media. Resolves
    /// when playback has actually started. The engine does not queue or
    /// serialize overlapping calls; the `&mut` receiver limits one engine
    /// instance to a single in-flight play.
    ///
    /// # Errors
    ///
    /// Propagates the backend's load or play failure; resuming with
    /// nothing loaded fails with
    /// [`CoreError::NoMediaLoaded`](crate::CoreError::NoMediaLoaded).
    pub async fn play(&mut self, source: Option<&MediaSource>) -> Result<()> {
        if let Some(source) = source {
            self.media.load(source).await?;
        }
        self.media.play().await
    }

    /// Halt playback. Synchronous and idempotent.
    pub fn pause(&mut self) {
        self.media.pause();
    }

    /// Live elapsed seconds.
    #[must_use]
    pub fn position(&self) -> f64 {
        self.media.position()
    }

    /// Seek, clamped by the backend to the media's bounds. Observers see
    /// the move as a position round on the next [`pump`](Self::pump).
    pub fn seek(&mut self, seconds: f64) {
        self.media.seek(seconds);
    }

    /// Whether the backend currently has a resolvable source loaded.
    #[must_use]
    pub fn has_loaded_media(&self) -> bool {
        self.media.duration().is_some()
    }

    /// Register an observer; insertion order is notification order.
    pub fn register_plugin(&mut self, plugin: Box<dyn EnginePlugin>) -> PluginId {
        let id = PluginId(self.next_plugin_id);
        self.next_plugin_id += 1;
        self.plugins.push((id, plugin));
        id
    }

    /// Remove an observer. Unknown ids are a no-op. An unregistered plugin
    /// receives no further notifications, including no `dispose`.
    pub fn unregister_plugin(&mut self, id: PluginId) {
        self.plugins.retain(|(plugin_id, _)| *plugin_id != id);
    }

    /// Derive the current [`AudioState`] from live backend properties.
    ///
    /// Guards against stale media: whenever the reported duration is not a
    /// finite positive number, the not-loaded sentinel wins regardless of
    /// the other fields.
    #[must_use]
    pub fn calculate_state(&self) -> AudioState {
        match self.media.duration() {
            Some(duration) if duration.is_finite() && duration > 0.0 => {
                AudioState::loaded(self.media.is_paused(), self.media.position(), duration)
            }
            _ => AudioState::not_loaded(),
        }
    }

    /// Drain the backend's queued events and run one notification round
    /// per event. The embedder drives this from its own callback loop;
    /// the engine keeps no timer of its own.
    pub fn pump(&mut self) {
        for event in self.media.drain_events() {
            self.dispatch(event);
        }
    }

    fn dispatch(&mut self, event: MediaEvent) {
        let state = self.calculate_state();
        let media = self.media.as_mut();

        match event {
            MediaEvent::Started => {
                for (_, plugin) in &mut self.plugins {
                    plugin.on_play(&state, media);
                }
            }
            MediaEvent::Paused => {
                for (_, plugin) in &mut self.plugins {
                    plugin.on_pause(&state, media);
                }
            }
            MediaEvent::PositionUpdated | MediaEvent::DurationChanged => {}
        }

        for (_, plugin) in &mut self.plugins {
            plugin.on_tick(&state, media);
        }
    }

    /// Deterministic scoped teardown, consuming the engine.
    ///
    /// Pauses the backend with its event queue detached, then notifies
    /// every still-registered plugin with `on_pause`, `on_tick`, and
    /// `dispose` in that order using the not-loaded sentinel state, and
    /// finally releases the media resource. Entirely synchronous, with no
    /// asynchronous tail; further use is a compile error.
    pub fn dispose(mut self) {
        let state = AudioState::not_loaded();
        self.media.pause();
        let media = self.media.as_mut();

        for (_, plugin) in &mut self.plugins {
            plugin.on_pause(&state, media);
            plugin.on_tick(&state, media);
            plugin.dispose(&state);
        }

        self.media.unload();
    }
}

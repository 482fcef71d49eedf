//! Shared test doubles for the engine, checkpoint, and controller tests.

use crate::error::{CoreError, Result};
use crate::media::{MediaBackend, MediaEvent, MediaSource};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

/// Observable state of a [`ScriptedMedia`] backend.
#[derive(Debug)]
pub(crate) struct ScriptedState {
    pub duration: Option<f64>,
    pub position: f64,
    pub paused: bool,
    pub events: Vec<MediaEvent>,
    /// Duration reported after the next successful `load`.
    pub load_duration: f64,
    pub loads: Vec<String>,
    pub play_calls: usize,
    pub pause_calls: usize,
    pub seeks: Vec<f64>,
    pub fail_next_load: bool,
    pub fail_next_play: bool,
    pub unloaded: bool,
}

impl Default for ScriptedState {
    fn default() -> Self {
        Self {
            duration: None,
            position: 0.0,
            paused: true,
            events: Vec::new(),
            load_duration: 60.0,
            loads: Vec::new(),
            play_calls: 0,
            pause_calls: 0,
            seeks: Vec::new(),
            fail_next_load: false,
            fail_next_play: false,
            unloaded: false,
        }
    }
}

/// Cloneable probe into a [`ScriptedMedia`] that has been boxed into an
/// engine.
#[derive(Clone)]
pub(crate) struct ScriptedHandle {
    state: Arc<Mutex<ScriptedState>>,
}

impl ScriptedHandle {
    pub fn with<R>(&self, f: impl FnOnce(&mut ScriptedState) -> R) -> R {
        f(&mut self.state.lock())
    }

    /// Move the playhead, queueing the position-updated event the platform
    /// would raise.
    pub fn advance_to(&self, position: f64) {
        self.with(|state| {
            state.position = position;
            state.events.push(MediaEvent::PositionUpdated);
        });
    }

    pub fn push(&self, event: MediaEvent) {
        self.with(|state| state.events.push(event));
    }
}

/// Deterministic media backend driven entirely by the test.
pub(crate) struct ScriptedMedia {
    state: Arc<Mutex<ScriptedState>>,
}

impl ScriptedMedia {
    /// A backend with nothing loaded yet.
    pub fn new() -> (Self, ScriptedHandle) {
        let state = Arc::new(Mutex::new(ScriptedState::default()));
        let handle = ScriptedHandle {
            state: Arc::clone(&state),
        };
        (Self { state }, handle)
    }

    /// A backend that already has media of the given duration loaded,
    /// paused at zero.
    pub fn loaded(duration: f64) -> (Self, ScriptedHandle) {
        let (media, handle) = Self::new();
        handle.with(|state| state.duration = Some(duration));
        (media, handle)
    }
}

#[async_trait]
impl MediaBackend for ScriptedMedia {
    async fn load(&mut self, source: &MediaSource) -> Result<()> {
        let mut state = self.state.lock();
        if state.fail_next_load {
            state.fail_next_load = false;
            return Err(CoreError::MediaLoadFailed {
                reason: "scripted failure".to_string(),
            });
        }
        state.loads.push(source.display_name.clone());
        state.duration = Some(state.load_duration);
        state.position = 0.0;
        state.paused = true;
        state.events.push(MediaEvent::DurationChanged);
        Ok(())
    }

    async fn play(&mut self) -> Result<()> {
        let mut state = self.state.lock();
        state.play_calls += 1;
        if state.fail_next_play {
            state.fail_next_play = false;
            return Err(CoreError::PlaybackFailed {
                reason: "scripted failure".to_string(),
            });
        }
        if state.duration.is_none() {
            return Err(CoreError::NoMediaLoaded);
        }
        state.paused = false;
        state.events.push(MediaEvent::Started);
        Ok(())
    }

    fn pause(&mut self) {
        let mut state = self.state.lock();
        state.pause_calls += 1;
        if !state.paused {
            state.paused = true;
            state.events.push(MediaEvent::Paused);
        }
    }

    fn position(&self) -> f64 {
        self.state.lock().position
    }

    fn seek(&mut self, seconds: f64) {
        let mut state = self.state.lock();
        state.seeks.push(seconds);
        state.position = seconds;
        state.events.push(MediaEvent::PositionUpdated);
    }

    fn duration(&self) -> Option<f64> {
        self.state.lock().duration
    }

    fn is_paused(&self) -> bool {
        self.state.lock().paused
    }

    fn drain_events(&mut self) -> Vec<MediaEvent> {
        std::mem::take(&mut self.state.lock().events)
    }

    fn unload(&mut self) {
        let mut state = self.state.lock();
        state.duration = None;
        state.position = 0.0;
        state.paused = true;
        state.events.clear();
        state.unloaded = true;
    }
}

//! The playback controller: a small state machine over the primary
//! button, between the file selection surface and the engine.

use crate::engine::{AudioEngine, EnginePlugin};
use crate::error::Result;
use crate::media::{MediaBackend, MediaSource};
use crate::session::SessionContext;
use crate::state::AudioState;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info};

/// Which user action the primary button currently performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    /// No file selected yet; the button opens the selection surface.
    NoFile,
    /// Media is playing; the button pauses.
    Playing,
    /// Media is paused; the button resumes.
    Pausing,
    /// A play request is in flight; the button is ignored.
    DisableOperation,
}

pub const LABEL_OPEN_FILE: &str = "Open file";
pub const LABEL_PLAY: &str = "Play";
pub const LABEL_LOADING: &str = "Loading…";

/// The file selection surface, supplied by the embedding UI.
///
/// The core consumes exactly one capability from it: "the user picked a
/// file", delivered as an opaque [`MediaSource`].
#[async_trait]
pub trait FileSelector: Send {
    /// Open the surface and wait for the user's choice. `None` means the
    /// selection was dismissed.
    ///
    /// # Errors
    ///
    /// Returns an error when the surface itself fails.
    async fn select_file(&mut self) -> Result<Option<MediaSource>>;
}

/// Cells observed by the embedding UI: the FSM state and the display
/// label. Values are pushed; the core never reads UI internals back.
struct UiCells {
    play_state: Mutex<PlayState>,
    label: watch::Sender<String>,
}

impl UiCells {
    fn set(&self, state: PlayState, label: &str) {
        *self.play_state.lock() = state;
        self.label.send_replace(label.to_string());
    }
}

/// Engine observer mirroring playback into the controller's cells.
struct StateMirrorPlugin {
    cells: Arc<UiCells>,
}

impl EnginePlugin for StateMirrorPlugin {
    fn on_tick(&mut self, state: &AudioState, _media: &mut dyn MediaBackend) {
        if state.is_playing() {
            *self.cells.play_state.lock() = PlayState::Playing;
            self.cells.label.send_replace(format!(
                "{} / {}",
                state.position.display(),
                state.duration.display()
            ));
        } else {
            self.cells.set(PlayState::Pausing, LABEL_PLAY);
        }
    }
}

/// Drives the engine through the `NoFile` / `Playing` / `Pausing` / busy
/// state machine off a single external trigger.
///
/// The busy state is the only guard against overlapping play triggers
/// from the UI; there is no lock underneath it, matching the
/// single-threaded callback model the controller lives in.
pub struct PlaybackController {
    engine: AudioEngine,
    selector: Box<dyn FileSelector>,
    session: SessionContext,
    cells: Arc<UiCells>,
}

impl PlaybackController {
    /// Wrap an engine (with any domain plugins already registered) and
    /// register the controller's own state-mirroring observer last.
    #[must_use]
    pub fn new(
        mut engine: AudioEngine,
        selector: Box<dyn FileSelector>,
        session: SessionContext,
    ) -> Self {
        let (label, _) = watch::channel(LABEL_OPEN_FILE.to_string());
        let cells = Arc::new(UiCells {
            play_state: Mutex::new(PlayState::NoFile),
            label,
        });
        engine.register_plugin(Box::new(StateMirrorPlugin {
            cells: Arc::clone(&cells),
        }));

        Self {
            engine,
            selector,
            session,
            cells,
        }
    }

    /// The current FSM state.
    #[must_use]
    pub fn play_state(&self) -> PlayState {
        *self.cells.play_state.lock()
    }

    /// Subscribe to the human-readable label for the primary button.
    #[must_use]
    pub fn subscribe_label(&self) -> watch::Receiver<String> {
        self.cells.label.subscribe()
    }

    /// The current label value.
    #[must_use]
    pub fn label(&self) -> String {
        self.cells.label.borrow().clone()
    }

    /// Drive pending media events through the engine's observers.
    pub fn pump(&mut self) {
        self.engine.pump();
    }

    /// Handle a press of the primary button.
    ///
    /// Every reachable state has a defined handler, so the illegal-state
    /// branch of the trigger is unrepresentable here; the enum is closed
    /// and the match exhaustive.
    ///
    /// # Errors
    ///
    /// Returns an error when the file selection surface fails. Play
    /// failures are logged and recovered, not surfaced.
    pub async fn handle_trigger(&mut self) -> Result<()> {
        match self.play_state() {
            PlayState::NoFile => {
                let Some(source) = self.selector.select_file().await? else {
                    return Ok(());
                };
                info!(file = %source.display_name, "file selected");
                self.session.set_file_name(source.display_name.clone());
                self.start_playing(Some(source)).await;
            }
            PlayState::Playing => {
                self.engine.pause();
                self.engine.pump();
            }
            PlayState::Pausing => self.start_playing(None).await,
            PlayState::DisableOperation => {
                // Busy: a play request is still in flight.
            }
        }
        Ok(())
    }

    async fn start_playing(&mut self, source: Option<MediaSource>) {
        self.cells.set(PlayState::DisableOperation, LABEL_LOADING);

        match self.engine.play(source.as_ref()).await {
            Ok(()) => self.engine.pump(),
            Err(err) => {
                error!(%err, "playback request failed");
                // Leave the busy state recoverable instead of wedging the
                // UI: fall back to paused when media is loaded, otherwise
                // back to file selection.
                if self.engine.has_loaded_media() {
                    self.cells.set(PlayState::Pausing, LABEL_PLAY);
                } else {
                    self.cells.set(PlayState::NoFile, LABEL_OPEN_FILE);
                }
            }
        }
    }

    /// Tear down the controller and its engine.
    pub fn dispose(self) {
        self.engine.dispose();
    }
}

//! The comprehension checkpoint plugin: gates forward progress on an
//! explicit "understood / not understood" decision every few seconds of
//! media time, and records the segments that were not understood.

use crate::engine::EnginePlugin;
use crate::media::MediaBackend;
use crate::notes::{Note, NoteStore};
use crate::session::SessionContext;
use crate::state::AudioState;
use crate::time::format_duration_text;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, warn};

/// Media seconds the listener may advance past the checkpoint before the
/// next comprehension decision is due.
pub const CHECKPOINT_INTERVAL_SECS: f64 = 10.0;

/// The listener's declared understanding of the segment since the last
/// checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mark {
    #[default]
    NotMarked,
    Understood,
    NotUnderstood,
}

impl Mark {
    /// XOR-toggle semantics of the two mark buttons: clicking the current
    /// mark clears it, clicking the other switches directly.
    #[must_use]
    pub fn toggled(self, clicked: Self) -> Self {
        if self == clicked {
            Self::NotMarked
        } else {
            clicked
        }
    }
}

/// Cloneable handle the UI layer uses to flip the comprehension mark.
#[derive(Debug, Clone, Default)]
pub struct MarkHandle {
    mark: Arc<Mutex<Mark>>,
}

impl MarkHandle {
    pub fn toggle_understood(&self) {
        let mut mark = self.mark.lock();
        *mark = mark.toggled(Mark::Understood);
    }

    pub fn toggle_not_understood(&self) {
        let mut mark = self.mark.lock();
        *mark = mark.toggled(Mark::NotUnderstood);
    }

    #[must_use]
    pub fn current(&self) -> Mark {
        *self.mark.lock()
    }
}

/// Cloneable read handle over the recorded note list, for display.
#[derive(Debug, Clone)]
pub struct NotesHandle {
    notes: Arc<Mutex<Vec<Note>>>,
}

impl NotesHandle {
    #[must_use]
    pub fn snapshot(&self) -> Vec<Note> {
        self.notes.lock().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notes.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.lock().is_empty()
    }
}

/// Engine observer implementing the rewind-on-timeout policy.
///
/// On every tick: once the playhead is a full interval past the
/// checkpoint, an unmarked listener is seeked straight back to the
/// checkpoint; a marked one advances it by one interval (recording a note
/// over the elapsed segment first when the mark was "not understood").
/// The checkpoint starts at zero and never moves backwards within a
/// session.
pub struct CheckpointPlugin {
    checkpoint: f64,
    interval: f64,
    mark: Arc<Mutex<Mark>>,
    notes: Arc<Mutex<Vec<Note>>>,
    store: NoteStore,
    session: SessionContext,
}

impl CheckpointPlugin {
    /// Build the plugin, reading previously persisted notes once. Missing
    /// or malformed stored data yields an empty list, never an error.
    #[must_use]
    pub fn new(store: NoteStore, session: SessionContext) -> Self {
        let notes = store.load();
        debug!(count = notes.len(), "loaded persisted notes");
        Self {
            checkpoint: 0.0,
            interval: CHECKPOINT_INTERVAL_SECS,
            mark: Arc::new(Mutex::new(Mark::NotMarked)),
            notes: Arc::new(Mutex::new(notes)),
            store,
            session,
        }
    }

    /// Handle for the UI's two mark buttons.
    #[must_use]
    pub fn mark_handle(&self) -> MarkHandle {
        MarkHandle {
            mark: Arc::clone(&self.mark),
        }
    }

    /// Handle for displaying the recorded notes.
    #[must_use]
    pub fn notes_handle(&self) -> NotesHandle {
        NotesHandle {
            notes: Arc::clone(&self.notes),
        }
    }

    /// The current checkpoint, in media seconds.
    #[must_use]
    pub fn checkpoint(&self) -> f64 {
        self.checkpoint
    }
}

impl EnginePlugin for CheckpointPlugin {
    fn on_tick(&mut self, _state: &AudioState, media: &mut dyn MediaBackend) {
        if media.position() < self.checkpoint + self.interval {
            return;
        }

        let mark = *self.mark.lock();
        if mark == Mark::NotMarked {
            // No decision yet: trap the listener back at the checkpoint.
            debug!(checkpoint = self.checkpoint, "segment unmarked, rewinding");
            media.seek(self.checkpoint);
            return;
        }

        if mark == Mark::NotUnderstood {
            let note = Note {
                file_name: self.session.file_name().unwrap_or_default(),
                start: format_duration_text(self.checkpoint),
                end: format_duration_text(self.checkpoint + self.interval),
            };
            let mut notes = self.notes.lock();
            notes.push(note);
            // Persistence is best-effort; the in-memory list stays intact.
            if let Err(err) = self.store.save(&notes) {
                warn!(%err, "failed to persist note list");
            }
        }

        *self.mark.lock() = Mark::NotMarked;
        self.checkpoint += self.interval;
    }
}

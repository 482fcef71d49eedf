pub mod checkpoint;
pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod media;
pub mod notes;
pub mod paths;
pub mod session;
pub mod state;
pub mod time;

#[cfg(test)]
pub(crate) mod testing;

pub use checkpoint::{CheckpointPlugin, Mark, MarkHandle, NotesHandle, CHECKPOINT_INTERVAL_SECS};
pub use config::{RelistenConfig, StorageConfig};
pub use controller::{FileSelector, PlayState, PlaybackController};
pub use engine::{AudioEngine, EnginePlugin, PluginId};
pub use error::{CoreError, Result};
pub use media::{MediaBackend, MediaEvent, MediaSource};
pub use notes::{decode_notes, encode_notes, Note, NoteStore, StoredNotes};
pub use paths::{config_dir, config_path, notes_path, CONFIG_DIR_NAME, CONFIG_FILE_NAME, NOTES_FILE_NAME};
pub use session::SessionContext;
pub use state::{AudioState, PlayingState};
pub use time::{format_duration_text, MediaTime, UNKNOWN_TIME_TEXT};

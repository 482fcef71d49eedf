//! Notes over segments the listener did not understand, and the persisted
//! store holding them.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A segment of one file the listener marked as not understood.
///
/// Immutable once created; `start`/`end` are display-formatted times
/// (`MM:SS` / `H:MM:SS`) bounding the segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub file_name: String,
    pub start: String,
    pub end: String,
}

/// The on-disk representation: a deduplicated file-name table plus
/// `(file index, start, end)` triples, so repeated file names are stored
/// once.
///
/// Invariant: the table holds no duplicate names and every index is valid.
/// [`decode_notes`] checks both and discards the whole record on a
/// violation rather than partially trusting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredNotes {
    pub file_names: Vec<String>,
    pub notes: Vec<(usize, String, String)>,
}

/// Encode a note list into the deduplicated storage form. File names enter
/// the table in first-appearance order.
#[must_use]
pub fn encode_notes(notes: &[Note]) -> StoredNotes {
    let mut file_names: Vec<String> = Vec::new();
    let mut index_of: HashMap<&str, usize> = HashMap::new();

    for note in notes {
        if !index_of.contains_key(note.file_name.as_str()) {
            index_of.insert(note.file_name.as_str(), file_names.len());
            file_names.push(note.file_name.clone());
        }
    }

    let notes = notes
        .iter()
        .map(|note| {
            (
                index_of[note.file_name.as_str()],
                note.start.clone(),
                note.end.clone(),
            )
        })
        .collect();

    StoredNotes { file_names, notes }
}

/// Decode the storage form back into a note list, or `None` when the
/// record violates its invariants (a duplicated table entry or an
/// out-of-range index).
#[must_use]
pub fn decode_notes(stored: &StoredNotes) -> Option<Vec<Note>> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(stored.file_names.len());
    for name in &stored.file_names {
        if !seen.insert(name.as_str()) {
            return None;
        }
    }

    let mut notes = Vec::with_capacity(stored.notes.len());
    for (index, start, end) in &stored.notes {
        let file_name = stored.file_names.get(*index)?;
        notes.push(Note {
            file_name: file_name.clone(),
            start: start.clone(),
            end: end.clone(),
        });
    }

    Some(notes)
}

/// File-backed store for the single serialized note list.
///
/// One JSON document under one well-known path stands in for the single
/// named key of a key-value store.
#[derive(Debug, Clone)]
pub struct NoteStore {
    path: PathBuf,
}

impl NoteStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location (`~/.config/relisten/notes.json`).
    #[must_use]
    pub fn at_default_path() -> Self {
        Self::new(crate::paths::notes_path())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted list. An absent file, unreadable data, malformed
    /// JSON, or an invariant-violating record all yield an empty list,
    /// never an error.
    #[must_use]
    pub fn load(&self) -> Vec<Note> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no stored notes yet");
                return Vec::new();
            }
            Err(err) => {
                warn!(%err, path = %self.path.display(), "failed to read note store");
                return Vec::new();
            }
        };

        let stored: StoredNotes = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(err) => {
                warn!(%err, path = %self.path.display(), "malformed note store, starting empty");
                return Vec::new();
            }
        };

        match decode_notes(&stored) {
            Some(notes) => notes,
            None => {
                warn!(path = %self.path.display(), "note store violates its invariants, discarding");
                Vec::new()
            }
        }
    }

    /// Re-serialize and write the whole list.
    ///
    /// # Errors
    ///
    /// Returns an error when the encoded list cannot be written; callers
    /// treat persistence as best-effort.
    pub fn save(&self, notes: &[Note]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let encoded = serde_json::to_string(&encode_notes(notes))?;
        fs::write(&self.path, encoded)?;
        Ok(())
    }
}

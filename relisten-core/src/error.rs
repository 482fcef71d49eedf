use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    // Playback errors
    #[error("no media loaded; play() needs a source first")]
    NoMediaLoaded,

    #[error("media source failed to load: {reason}")]
    MediaLoadFailed { reason: String },

    #[error("playback could not start: {reason}")]
    PlaybackFailed { reason: String },

    // File selection errors
    #[error("file selection failed: {reason}")]
    SelectionFailed { reason: String },

    // Configuration errors
    #[error("failed to parse config file: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    // Note store errors
    #[error("note store serialization failed: {0}")]
    NoteEncodingError(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;

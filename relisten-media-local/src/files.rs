//! Accepted media container types for the file selection surface.

use std::path::Path;

/// Container extensions the selection surface offers. The playback stack
/// only needs a probeable duration, so audio and video containers both
/// qualify.
pub const ACCEPTED_EXTENSIONS: &[&str] = &[
    "opus", "flac", "webm", "weba", "wav", "ogg", "m4a", "mp3", "wma", "aac", "wmv", "mpg", "mov",
    "mpeg", "mp4", "m4v", "avi", "3gp",
];

/// Whether the path carries one of the accepted container extensions
/// (case-insensitive).
#[must_use]
pub fn is_supported_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            ACCEPTED_EXTENSIONS.contains(&ext.as_str())
        })
}

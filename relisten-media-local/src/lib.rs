pub mod clock;
pub mod files;
pub mod player;

pub use clock::PlaybackClock;
pub use files::{is_supported_file, ACCEPTED_EXTENSIONS};
pub use player::LocalMediaPlayer;

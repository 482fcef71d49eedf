//! A headless media element over local files.

use crate::clock::PlaybackClock;
use async_trait::async_trait;
use lofty::prelude::AudioFile;
use lofty::probe::Probe;
use relisten_core::{CoreError, MediaBackend, MediaEvent, MediaSource, Result};
use std::path::Path;
use tracing::{debug, info};

/// [`MediaBackend`] for local files.
///
/// The duration comes from probing the actual file's properties; the
/// position is modeled by a [`PlaybackClock`] instead of decoding audio,
/// which is all the engine's contract needs. Events are queued at the
/// matching transitions and a position tick is synthesized per drain while
/// running, standing in for the platform's periodic time updates.
pub struct LocalMediaPlayer {
    clock: Option<PlaybackClock>,
    events: Vec<MediaEvent>,
}

impl LocalMediaPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: None,
            events: Vec::new(),
        }
    }
}

impl Default for LocalMediaPlayer {
    fn default() -> Self {
        Self::new()
    }
}

async fn probe_duration(path: &Path) -> Result<f64> {
    let path = path.to_path_buf();
    let probed = tokio::task::spawn_blocking(move || -> Result<f64> {
        let tagged = Probe::open(&path)
            .map_err(|err| CoreError::MediaLoadFailed {
                reason: err.to_string(),
            })?
            .read()
            .map_err(|err| CoreError::MediaLoadFailed {
                reason: err.to_string(),
            })?;
        Ok(tagged.properties().duration().as_secs_f64())
    })
    .await
    .map_err(|err| CoreError::MediaLoadFailed {
        reason: err.to_string(),
    })?;
    probed
}

#[async_trait]
impl MediaBackend for LocalMediaPlayer {
    async fn load(&mut self, source: &MediaSource) -> Result<()> {
        let duration = probe_duration(&source.path).await?;
        if !duration.is_finite() || duration <= 0.0 {
            return Err(CoreError::MediaLoadFailed {
                reason: format!("no usable duration in {}", source.path.display()),
            });
        }

        info!(file = %source.display_name, duration, "media loaded");
        self.clock = Some(PlaybackClock::new(duration));
        self.events.push(MediaEvent::DurationChanged);
        Ok(())
    }

    async fn play(&mut self) -> Result<()> {
        let clock = self.clock.as_mut().ok_or(CoreError::NoMediaLoaded)?;
        clock.start();
        self.events.push(MediaEvent::Started);
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(clock) = self.clock.as_mut() {
            if clock.is_running() {
                clock.stop();
                self.events.push(MediaEvent::Paused);
            }
        }
    }

    fn position(&self) -> f64 {
        self.clock.as_ref().map_or(0.0, PlaybackClock::position)
    }

    fn seek(&mut self, seconds: f64) {
        if let Some(clock) = self.clock.as_mut() {
            clock.seek(seconds);
            self.events.push(MediaEvent::PositionUpdated);
        }
    }

    fn duration(&self) -> Option<f64> {
        self.clock.as_ref().map(PlaybackClock::duration)
    }

    fn is_paused(&self) -> bool {
        self.clock.as_ref().map_or(true, |clock| !clock.is_running())
    }

    fn drain_events(&mut self) -> Vec<MediaEvent> {
        if let Some(clock) = self.clock.as_mut() {
            if clock.is_running() {
                if clock.at_end() {
                    clock.stop();
                    self.events.push(MediaEvent::Paused);
                } else {
                    // Stand-in for the platform's periodic time update.
                    self.events.push(MediaEvent::PositionUpdated);
                }
            }
        }
        std::mem::take(&mut self.events)
    }

    fn unload(&mut self) {
        debug!("releasing media");
        self.clock = None;
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Write a minimal PCM WAV file of the given length.
    fn write_test_wav(path: &Path, seconds: u32) {
        let sample_rate = 8000u32;
        let bytes_per_sample = 2u32;
        let data_len = sample_rate * bytes_per_sample * seconds;

        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
        bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
        bytes.extend_from_slice(&sample_rate.to_le_bytes());
        bytes.extend_from_slice(&(sample_rate * bytes_per_sample).to_le_bytes());
        bytes.extend_from_slice(&2u16.to_le_bytes()); // block align
        bytes.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&data_len.to_le_bytes());
        bytes.resize(bytes.len() + data_len as usize, 0);

        std::fs::write(path, bytes).unwrap();
    }

    fn wav_source(dir: &Path, seconds: u32) -> MediaSource {
        let path = dir.join("tone.wav");
        write_test_wav(&path, seconds);
        MediaSource::from_path(path)
    }

    #[tokio::test]
    async fn test_load_probes_real_duration() {
        let dir = tempfile::tempdir().unwrap();
        let mut player = LocalMediaPlayer::new();

        player.load(&wav_source(dir.path(), 2)).await.unwrap();

        let duration = player.duration().unwrap();
        assert!((1.9..=2.1).contains(&duration), "duration was {duration}");
        assert_eq!(player.drain_events(), vec![MediaEvent::DurationChanged]);
        assert!(player.is_paused());
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        let mut player = LocalMediaPlayer::new();
        let source = MediaSource::from_path(PathBuf::from("/nonexistent/tone.wav"));
        assert!(player.load(&source).await.is_err());
        assert!(player.duration().is_none());
    }

    #[tokio::test]
    async fn test_play_without_media_fails() {
        let mut player = LocalMediaPlayer::new();
        assert!(matches!(
            player.play().await,
            Err(CoreError::NoMediaLoaded)
        ));
    }

    #[tokio::test]
    async fn test_play_queues_started_and_ticks_on_drain() {
        let dir = tempfile::tempdir().unwrap();
        let mut player = LocalMediaPlayer::new();
        player.load(&wav_source(dir.path(), 2)).await.unwrap();
        player.drain_events();

        player.play().await.unwrap();
        assert!(!player.is_paused());
        assert_eq!(
            player.drain_events(),
            vec![MediaEvent::Started, MediaEvent::PositionUpdated]
        );

        // Each drain while running synthesizes another position tick.
        assert_eq!(player.drain_events(), vec![MediaEvent::PositionUpdated]);
    }

    #[tokio::test]
    async fn test_pause_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut player = LocalMediaPlayer::new();
        player.load(&wav_source(dir.path(), 2)).await.unwrap();
        player.play().await.unwrap();
        player.drain_events();

        player.pause();
        player.pause();

        assert!(player.is_paused());
        assert_eq!(player.drain_events(), vec![MediaEvent::Paused]);
    }

    #[tokio::test]
    async fn test_seek_clamps_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let mut player = LocalMediaPlayer::new();
        player.load(&wav_source(dir.path(), 2)).await.unwrap();
        player.drain_events();

        player.seek(999.0);
        let duration = player.duration().unwrap();
        assert_eq!(player.position(), duration);
        assert_eq!(player.drain_events(), vec![MediaEvent::PositionUpdated]);
    }

    #[tokio::test]
    async fn test_reaching_the_end_pauses() {
        let dir = tempfile::tempdir().unwrap();
        let mut player = LocalMediaPlayer::new();
        player.load(&wav_source(dir.path(), 2)).await.unwrap();
        player.play().await.unwrap();
        player.drain_events();

        player.seek(999.0);
        let events = player.drain_events();

        assert_eq!(
            events,
            vec![MediaEvent::PositionUpdated, MediaEvent::Paused]
        );
        assert!(player.is_paused());
    }

    #[tokio::test]
    async fn test_unload_releases_everything() {
        let dir = tempfile::tempdir().unwrap();
        let mut player = LocalMediaPlayer::new();
        player.load(&wav_source(dir.path(), 2)).await.unwrap();
        player.play().await.unwrap();

        player.unload();

        assert!(player.duration().is_none());
        assert_eq!(player.position(), 0.0);
        assert!(player.is_paused());
        assert!(player.drain_events().is_empty());
    }
}

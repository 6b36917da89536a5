//! Background music playback
//!
//! One track at a time, optionally looped. With the `audio` feature the
//! player streams through rodio; without it [`open_music`] reports
//! [`AudioError::BackendUnavailable`] and callers carry on silently.

#[cfg(feature = "audio")]
mod rodio_player;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Audio system errors
#[derive(Error, Debug)]
pub enum AudioError {
    /// Built without an audio backend
    #[error("Audio backend unavailable (built without the `audio` feature)")]
    BackendUnavailable,

    /// No output device could be opened
    #[error("Audio device unavailable: {0}")]
    DeviceUnavailable(String),

    /// The track file could not be opened
    #[error("Failed to open {path}: {source}")]
    Io {
        /// Track path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The track could not be decoded
    #[error("Failed to decode audio: {0}")]
    Decode(String),

    /// The output sink rejected playback
    #[error("Playback failed: {0}")]
    PlaybackFailed(String),
}

/// How a music track plays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicSettings {
    /// Output volume, 0.0 to 1.0
    pub volume: f32,
    /// Restart the track when it ends
    pub looping: bool,
}

impl Default for MusicSettings {
    fn default() -> Self {
        Self {
            volume: 1.0,
            looping: true,
        }
    }
}

/// Controls for one music track
pub trait MusicPlayer {
    /// Start or resume playback
    fn play(&mut self);

    /// Pause, keeping the position
    fn pause(&mut self);

    /// Stop and rewind
    fn stop(&mut self);

    /// Whether audio is currently coming out
    fn is_playing(&self) -> bool;

    /// Set output volume, clamped to 0.0..=1.0
    fn set_volume(&mut self, volume: f32);

    /// Current output volume
    fn volume(&self) -> f32;
}

/// Open a track for playback; it starts paused
///
/// # Errors
/// [`AudioError::BackendUnavailable`] without the `audio` feature, otherwise
/// device, file or decode failures.
#[cfg(feature = "audio")]
pub fn open_music(
    path: impl AsRef<Path>,
    settings: &MusicSettings,
) -> Result<Box<dyn MusicPlayer>, AudioError> {
    let player = rodio_player::RodioMusicPlayer::open(path.as_ref(), settings)?;
    Ok(Box::new(player))
}

/// Open a track for playback; it starts paused
///
/// # Errors
/// Always [`AudioError::BackendUnavailable`]: built without the `audio`
/// feature.
#[cfg(not(feature = "audio"))]
pub fn open_music(
    path: impl AsRef<Path>,
    _settings: &MusicSettings,
) -> Result<Box<dyn MusicPlayer>, AudioError> {
    log::debug!("Not opening {}: no audio backend", path.as_ref().display());
    Err(AudioError::BackendUnavailable)
}

/// Player that produces no sound but tracks its state
///
/// Stands in when the track exists but no output device is available, and
/// serves as a test double for layers that drive a player.
#[derive(Debug, Clone, PartialEq)]
pub struct SilentPlayer {
    playing: bool,
    volume: f32,
}

impl SilentPlayer {
    /// Create a paused player
    pub fn new(settings: &MusicSettings) -> Self {
        Self {
            playing: false,
            volume: settings.volume.clamp(0.0, 1.0),
        }
    }
}

impl MusicPlayer for SilentPlayer {
    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn stop(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn volume(&self) -> f32 {
        self.volume
    }
}

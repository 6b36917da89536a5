//! Ambient soundtrack layer
//!
//! Opens the configured track when attached and loops it for the lifetime of
//! the layer. Hiding the layer pauses the music, showing it resumes.

use crate::config::AudioConfig;
use orrery_engine::audio::{self, AudioError, MusicPlayer, MusicSettings, SilentPlayer};
use orrery_engine::prelude::*;
use std::path::PathBuf;

pub struct AudioLayer {
    track: Option<PathBuf>,
    settings: MusicSettings,
    player: Option<Box<dyn MusicPlayer>>,
}

impl AudioLayer {
    /// Layer that opens `config.track` on attach, if audio is enabled
    pub fn new(config: &AudioConfig) -> Self {
        Self {
            track: config.enabled.then(|| config.track.clone()),
            settings: config.music_settings(),
            player: None,
        }
    }

    /// Layer driving an already opened player
    pub fn with_player(player: Box<dyn MusicPlayer>) -> Self {
        Self {
            track: None,
            settings: MusicSettings::default(),
            player: Some(player),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.player.as_ref().is_some_and(|player| player.is_playing())
    }

    pub fn has_player(&self) -> bool {
        self.player.is_some()
    }
}

/// Keep an opened player, or go silent when there is no output device
///
/// Any other failure leaves the layer without a player.
fn player_or_silent(
    opened: Result<Box<dyn MusicPlayer>, AudioError>,
    settings: &MusicSettings,
) -> Option<Box<dyn MusicPlayer>> {
    match opened {
        Ok(player) => Some(player),
        Err(AudioError::DeviceUnavailable(reason)) => {
            log::warn!("No audio device ({reason}), playing silently");
            Some(Box::new(SilentPlayer::new(settings)))
        }
        Err(AudioError::BackendUnavailable) => {
            log::info!("Built without audio, soundtrack disabled");
            None
        }
        Err(e) => {
            log::warn!("Soundtrack disabled: {e}");
            None
        }
    }
}

impl Layer for AudioLayer {
    fn name(&self) -> &str {
        "AudioLayer"
    }

    fn on_attach(&mut self) {
        if self.player.is_none() {
            if let Some(track) = &self.track {
                let opened = audio::open_music(track, &self.settings);
                self.player = player_or_silent(opened, &self.settings);
                if self.player.is_some() {
                    log::info!("Playing {}", track.display());
                }
            }
        }

        if let Some(player) = &mut self.player {
            player.play();
        }
    }

    fn on_detach(&mut self) {
        if let Some(player) = &mut self.player {
            player.stop();
        }
    }

    fn on_visibility_changed(&mut self, visible: bool) {
        if let Some(player) = &mut self.player {
            if visible {
                player.play();
            } else {
                player.pause();
            }
        }
    }
}

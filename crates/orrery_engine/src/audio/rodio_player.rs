//! Rodio-backed music player

use super::{AudioError, MusicPlayer, MusicSettings};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Streams one track through the default output device
pub struct RodioMusicPlayer {
    /// Output stream (must be kept alive)
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
    path: PathBuf,
    looping: bool,
    volume: f32,
}

impl RodioMusicPlayer {
    /// Open the default device and queue `path`, paused
    pub fn open(path: &Path, settings: &MusicSettings) -> Result<Self, AudioError> {
        std::fs::metadata(path).map_err(|source| AudioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| AudioError::DeviceUnavailable(e.to_string()))?;

        let mut player = Self {
            _stream: stream,
            handle,
            sink: None,
            path: path.to_path_buf(),
            looping: settings.looping,
            volume: settings.volume.clamp(0.0, 1.0),
        };
        player.sink = Some(player.load()?);

        log::info!("Loaded music track {}", path.display());
        Ok(player)
    }

    fn load(&self) -> Result<Sink, AudioError> {
        let sink = Sink::try_new(&self.handle)
            .map_err(|e| AudioError::PlaybackFailed(format!("Failed to create sink: {e}")))?;

        let file = File::open(&self.path).map_err(|source| AudioError::Io {
            path: self.path.clone(),
            source,
        })?;
        let source =
            Decoder::new(BufReader::new(file)).map_err(|e| AudioError::Decode(e.to_string()))?;

        sink.pause();
        sink.set_volume(self.volume);
        if self.looping {
            sink.append(source.repeat_infinite());
        } else {
            sink.append(source);
        }
        Ok(sink)
    }
}

impl MusicPlayer for RodioMusicPlayer {
    fn play(&mut self) {
        if self.sink.is_none() {
            match self.load() {
                Ok(sink) => self.sink = Some(sink),
                Err(e) => {
                    log::warn!("Cannot restart {}: {e}", self.path.display());
                    return;
                }
            }
        }
        if let Some(sink) = &self.sink {
            sink.play();
        }
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    fn is_playing(&self) -> bool {
        self.sink
            .as_ref()
            .map_or(false, |sink| !sink.is_paused() && !sink.empty())
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(sink) = &self.sink {
            sink.set_volume(self.volume);
        }
    }

    fn volume(&self) -> f32 {
        self.volume
    }
}

//! Solar system demo configuration
//!
//! ```toml
//! [app.engine]
//! log_level = "info"
//!
//! [app.window]
//! title = "Solar System"
//! width = 1280
//! height = 720
//!
//! [audio]
//! enabled = true
//! track = "assets/audio/space-ambient.mp3"
//! volume = 0.6
//!
//! [scene]
//! orbital_speed_scale = 0.05
//! show_orbits = true
//! ```

use orrery_engine::audio::MusicSettings;
use orrery_engine::config::{Config, ConfigError};
use orrery_engine::core::config::{ApplicationConfig, WindowConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Ambient soundtrack settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Whether the audio layer opens a track at all
    pub enabled: bool,
    /// Track to loop
    pub track: PathBuf,
    /// Output volume, 0.0 to 1.0
    pub volume: f32,
}

impl AudioConfig {
    /// Playback settings for the track
    pub fn music_settings(&self) -> MusicSettings {
        MusicSettings {
            volume: self.volume,
            looping: true,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            track: PathBuf::from("assets/audio/space-ambient.mp3"),
            volume: 0.6,
        }
    }
}

/// Scene settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Multiplier applied to every orbital speed
    pub orbital_speed_scale: f32,
    /// Draw a ring along each orbit
    pub show_orbits: bool,
    /// Start with the spinning cube scene visible
    pub show_example_layer: bool,
    /// Frames to run with `--headless` before closing
    pub headless_frames: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            orbital_speed_scale: 0.05,
            show_orbits: true,
            show_example_layer: false,
            headless_frames: 600,
        }
    }
}

/// Complete demo configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolarAppConfig {
    /// Runtime and window configuration
    pub app: ApplicationConfig,
    /// Soundtrack configuration
    pub audio: AudioConfig,
    /// Scene configuration
    pub scene: SceneConfig,
}

impl SolarAppConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.app.validate()?;
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(ConfigError::Invalid(format!(
                "audio volume must be within 0.0..=1.0, got {}",
                self.audio.volume
            )));
        }
        if self.scene.orbital_speed_scale < 0.0 {
            return Err(ConfigError::Invalid(
                "orbital speed scale cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SolarAppConfig {
    fn default() -> Self {
        Self {
            app: ApplicationConfig {
                window: WindowConfig::new("Solar System"),
                ..ApplicationConfig::default()
            },
            audio: AudioConfig::default(),
            scene: SceneConfig::default(),
        }
    }
}

impl Config for SolarAppConfig {}

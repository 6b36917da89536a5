//! # Runtime Configuration
//!
//! Configuration for the application runtime: engine behaviour (logging,
//! exit shortcuts) and the main window. Applications embed
//! [`ApplicationConfig`] in their own config type and load it through the
//! [`Config`] trait from TOML or RON.
//!
//! ```toml
//! [engine]
//! log_level = "debug"
//! exit_on_escape = true
//!
//! [window]
//! title = "Solar System"
//! width = 1280
//! height = 720
//! vsync = true
//! resizable = true
//! cursor_mode = "normal"
//! ```

use crate::input::CursorMode;
use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};

/// # Window Configuration
///
/// Properties the native window is created with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Client area width in pixels
    pub width: u32,
    /// Client area height in pixels
    pub height: u32,
    /// Whether buffer swaps wait for vertical sync
    pub vsync: bool,
    /// Whether the user may resize the window
    pub resizable: bool,
    /// Initial cursor behaviour
    pub cursor_mode: CursorMode,
}

impl WindowConfig {
    /// Create a window configuration with defaults for everything but the title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the client area size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Enable or disable vsync
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Orrery".to_string(),
            width: 1280,
            height: 720,
            vsync: true,
            resizable: true,
            cursor_mode: CursorMode::Normal,
        }
    }
}

/// # Engine Configuration
///
/// Core runtime behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default log filter, overridden by `RUST_LOG`
    pub log_level: String,
    /// Whether a held Escape key ends the main loop
    pub exit_on_escape: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            exit_on_escape: true,
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable or disable the Escape exit shortcut
    pub fn with_exit_on_escape(mut self, enabled: bool) -> Self {
        self.exit_on_escape = enabled;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration handed to the application builder.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Main window configuration
    pub window: WindowConfig,
}

impl ApplicationConfig {
    /// Create a configuration with defaults and the given window title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            engine: EngineConfig::default(),
            window: WindowConfig::new(title),
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid("log level cannot be empty".to_string()));
        }
        self.window.validate()
    }
}

impl Config for ApplicationConfig {}

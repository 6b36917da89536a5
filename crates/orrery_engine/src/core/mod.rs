//! # Core Engine Module
//!
//! Shared runtime configuration.

pub mod config;

pub use config::{ApplicationConfig, Config, ConfigError, EngineConfig, WindowConfig};

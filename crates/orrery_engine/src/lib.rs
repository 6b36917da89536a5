//! # Orrery Engine
//!
//! A layered real-time application runtime: a window feeding events into a
//! single application entry point, an ordered stack of update/render layers
//! and overlays, and typed event dispatch with short-circuiting.
//!
//! ## Features
//!
//! - **Layer stack**: regular layers below overlays, attach/detach lifecycle
//! - **Event dispatch**: overlays see events first; a handled event stops
//! - **Window backends**: GLFW (feature `glfw`) or a scripted headless window
//! - **Configuration**: TOML or RON through the [`Config`](config::Config) trait
//! - **Music**: looping background tracks through rodio (feature `audio`)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use orrery_engine::prelude::*;
//!
//! struct Hello;
//!
//! impl Layer for Hello {
//!     fn name(&self) -> &str {
//!         "Hello"
//!     }
//!
//!     fn on_update(&mut self, _ctx: &mut LayerContext<'_>, dt: Time) {
//!         log::trace!("frame took {dt}");
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     orrery_engine::foundation::logging::init_with_level("info");
//!     let mut app = Application::builder(ApplicationConfig::new("Hello"))
//!         .layer(Hello)
//!         .build()?;
//!     app.run()?;
//!     Ok(())
//! }
//! ```

pub mod application;
pub mod audio;
pub mod config;
pub mod core;
pub mod events;
pub mod foundation;
pub mod input;
pub mod layers;
pub mod render;

#[cfg(test)]
mod tests;

pub use application::{AppError, AppState, Application, ApplicationBuilder};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        application::{AppError, AppState, Application, ApplicationBuilder},
        config::Config,
        core::config::{ApplicationConfig, EngineConfig, WindowConfig},
        events::{
            Event, EventCategory, EventDispatcher, EventKind, EventType, KeyPressed,
            KeyReleased, KeyRepeat, MouseButtonPressed, MouseButtonReleased, MouseMoved,
            MouseScrolled, WindowClosed, WindowResized,
        },
        foundation::{
            math::{Mat4, Mat4Ext, Vec3},
            time::{FrameTimer, Time},
        },
        input::{CursorMode, KeyCode, MouseButton},
        layers::{Layer, LayerContext, LayerId, LayerInfo, LayerStack},
        render::{
            Camera, Color, DrawCommand, GraphicsDevice, Primitive, Window, WindowError,
        },
    };
}

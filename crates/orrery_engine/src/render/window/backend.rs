//! Backend-agnostic window management trait
//!
//! This module defines the trait every window backend implements. The
//! application only ever sees the [`Window`](super::Window) handle; the
//! backend behind it is either the native GLFW window or the scripted
//! headless one used for tests and windowless runs.

use crate::events::Event;
use crate::input::{CursorMode, KeyCode};
use crate::render::graphics::GraphicsDevice;
use thiserror::Error;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// The windowing system could not be initialized
    #[error("Window system initialization failed: {0}")]
    InitializationFailed(String),

    /// The native window or its surface could not be created
    #[error("Window creation failed")]
    CreationFailed,

    /// Presenting the frame or pumping events failed
    #[error("Frame present failed: {0}")]
    PresentFailed(String),

    /// The requested backend was compiled out
    #[error("Window backend unavailable: {0}")]
    BackendUnavailable(&'static str),
}

/// Result alias for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// Trait for window backend implementations
///
/// # Thread Safety
/// Backends are not `Send`. Window operations happen on the thread that
/// created the window, which is also the thread running the main loop.
pub trait WindowBackend {
    /// Present the current frame
    fn present(&mut self) -> WindowResult<()>;

    /// Pump pending OS events, handing each translated event to `sink`
    ///
    /// Called once per frame right after [`present`](Self::present).
    fn poll_events(&mut self, sink: &mut dyn FnMut(Event));

    /// Monotonic clock in seconds
    fn time(&self) -> f64;

    /// Current client area size in pixels
    fn size(&self) -> (u32, u32);

    /// Resize the client area
    fn set_size(&mut self, width: u32, height: u32);

    /// Current window title
    fn title(&self) -> &str;

    /// Set the window title text
    fn set_title(&mut self, title: &str);

    /// Whether buffer swaps wait for vertical sync
    fn is_vsync(&self) -> bool;

    /// Enable or disable vertical sync
    fn set_vsync(&mut self, enabled: bool);

    /// Current cursor behaviour
    fn cursor_mode(&self) -> CursorMode;

    /// Change cursor behaviour
    fn set_cursor_mode(&mut self, mode: CursorMode);

    /// Whether `key` is currently held down
    fn is_key_pressed(&self, key: KeyCode) -> bool;

    /// Graphics device that collects the frame's draw commands
    fn graphics(&mut self) -> &mut dyn GraphicsDevice;

    /// Get access to the concrete type for downcasting
    fn as_any(&self) -> &dyn std::any::Any;

    /// Get mutable access to the concrete type for downcasting
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}

//! High-level window handle for applications
//!
//! [`Window`] owns a backend and the single event sink registered for it.
//! Each frame the application calls [`Window::on_update`], which presents
//! and then pumps input; every event the backend detects during that call
//! is passed to the sink synchronously.

use super::backend::{WindowBackend, WindowResult};
use crate::core::config::WindowConfig;
use crate::events::Event;
use crate::input::{CursorMode, KeyCode};
use crate::render::graphics::GraphicsDevice;

/// Callback receiving every backend-detected event
pub type EventCallback = Box<dyn FnMut(Event)>;

/// Window handle that abstracts windowing system details
pub struct Window {
    backend: Box<dyn WindowBackend>,
    event_callback: Option<EventCallback>,
}

impl Window {
    /// Create the native window described by `config`
    ///
    /// # Errors
    /// Fails if the windowing system cannot be initialized or the window and
    /// its context cannot be created. Callers treat this as fatal at startup.
    #[cfg(feature = "glfw")]
    pub fn new(config: &WindowConfig) -> WindowResult<Self> {
        let backend = super::glfw_backend::GlfwBackend::new(config)?;
        Ok(Self::from_backend(Box::new(backend)))
    }

    /// Create the native window described by `config`
    ///
    /// # Errors
    /// Always fails: the GLFW backend was compiled out.
    #[cfg(not(feature = "glfw"))]
    pub fn new(_config: &WindowConfig) -> WindowResult<Self> {
        Err(super::backend::WindowError::BackendUnavailable(
            "built without the `glfw` feature",
        ))
    }

    /// Wrap an existing backend
    pub fn from_backend(backend: Box<dyn WindowBackend>) -> Self {
        Self {
            backend,
            event_callback: None,
        }
    }

    /// Register the sink for all backend events, replacing any previous one
    pub fn set_event_callback(&mut self, callback: impl FnMut(Event) + 'static) {
        self.event_callback = Some(Box::new(callback));
    }

    /// Whether an event sink is registered
    pub fn has_event_callback(&self) -> bool {
        self.event_callback.is_some()
    }

    /// Present the frame, then pump pending input
    ///
    /// Zero or more events reach the registered callback before this returns.
    /// Events detected while no callback is registered are dropped.
    ///
    /// # Errors
    /// Propagates backend present failures. Events are not polled if
    /// presenting failed.
    pub fn on_update(&mut self) -> WindowResult<()> {
        let Self {
            backend,
            event_callback,
        } = self;

        backend.present()?;
        backend.poll_events(&mut |event: Event| match event_callback.as_mut() {
            Some(callback) => callback(event),
            None => log::trace!("Dropping {event}: no event callback registered"),
        });
        Ok(())
    }

    /// Monotonic clock in seconds
    pub fn time(&self) -> f64 {
        self.backend.time()
    }

    /// Client area width in pixels
    pub fn width(&self) -> u32 {
        self.backend.size().0
    }

    /// Client area height in pixels
    pub fn height(&self) -> u32 {
        self.backend.size().1
    }

    /// Client area size in pixels
    pub fn size(&self) -> (u32, u32) {
        self.backend.size()
    }

    /// Resize the client area
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.backend.set_size(width, height);
    }

    /// Current window title
    pub fn title(&self) -> &str {
        self.backend.title()
    }

    /// Set the window title
    pub fn set_title(&mut self, title: &str) {
        self.backend.set_title(title);
    }

    /// Whether vsync is enabled
    pub fn is_vsync(&self) -> bool {
        self.backend.is_vsync()
    }

    /// Enable or disable vsync
    pub fn set_vsync(&mut self, enabled: bool) {
        self.backend.set_vsync(enabled);
    }

    /// Current cursor behaviour
    pub fn cursor_mode(&self) -> CursorMode {
        self.backend.cursor_mode()
    }

    /// Change cursor behaviour
    pub fn set_cursor_mode(&mut self, mode: CursorMode) {
        self.backend.set_cursor_mode(mode);
    }

    /// Whether `key` is currently held down
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.backend.is_key_pressed(key)
    }

    /// Graphics device for the current frame
    pub fn graphics(&mut self) -> &mut dyn GraphicsDevice {
        self.backend.graphics()
    }

    /// Borrow the concrete backend, e.g. to reach the native GLFW window
    pub fn native<T: 'static>(&self) -> Option<&T> {
        self.backend.as_any().downcast_ref::<T>()
    }

    /// Mutably borrow the concrete backend
    pub fn native_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.backend.as_any_mut().downcast_mut::<T>()
    }
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("title", &self.title())
            .field("size", &self.size())
            .field("has_event_callback", &self.has_event_callback())
            .finish()
    }
}

//! Application lifecycle and main loop
//!
//! The [`Application`] owns the window and the layer stack, receives every
//! window event through a single entry point and drives the per-frame
//! update and render passes. Only one application may exist per process.

use crate::config::ConfigError;
use crate::core::config::{ApplicationConfig, EngineConfig};
use crate::events::{Event, EventDispatcher, WindowClosed, WindowResized};
use crate::foundation::time::{FrameTimer, Time};
use crate::input::KeyCode;
use crate::layers::{Layer, LayerCommand, LayerContext, LayerId, LayerStack};
use crate::render::window::{Window, WindowError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use thiserror::Error;

static INSTANCE_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Another application is alive in this process
    #[error("Application already exists")]
    AlreadyExists,

    /// Window creation or the per-frame present failed
    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    /// The configuration was rejected
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Lifecycle stage of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Built but the main loop has not started
    Constructing,
    /// Inside the main loop
    Running,
    /// Exit requested or the loop has returned
    ShuttingDown,
    /// Being dropped
    Destroyed,
}

/// Whether an application currently exists in this process
pub fn instance_exists() -> bool {
    INSTANCE_ACTIVE.load(Ordering::Acquire)
}

/// Claim on the process-wide application slot, released on drop
#[derive(Debug)]
struct InstanceGuard;

impl InstanceGuard {
    fn acquire() -> Result<Self, AppError> {
        INSTANCE_ACTIVE
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| Self)
            .map_err(|_| AppError::AlreadyExists)
    }
}

impl Drop for InstanceGuard {
    fn drop(&mut self) {
        INSTANCE_ACTIVE.store(false, Ordering::Release);
    }
}

enum Pending {
    Layer(Box<dyn Layer>),
    Overlay(Box<dyn Layer>),
}

/// Builder for [`Application`]
///
/// Layers and overlays are pushed in the order they were added, so base
/// content goes first and UI overlays last.
pub struct ApplicationBuilder {
    config: ApplicationConfig,
    window: Option<Window>,
    pending: Vec<Pending>,
}

impl ApplicationBuilder {
    /// Start from a configuration
    pub fn new(config: ApplicationConfig) -> Self {
        Self {
            config,
            window: None,
            pending: Vec::new(),
        }
    }

    /// Use an existing window instead of creating one from the config
    pub fn window(mut self, window: Window) -> Self {
        self.window = Some(window);
        self
    }

    /// Add a regular layer
    pub fn layer(mut self, layer: impl Layer + 'static) -> Self {
        self.pending.push(Pending::Layer(Box::new(layer)));
        self
    }

    /// Add an overlay
    pub fn overlay(mut self, overlay: impl Layer + 'static) -> Self {
        self.pending.push(Pending::Overlay(Box::new(overlay)));
        self
    }

    /// Create the application
    ///
    /// # Errors
    /// [`AppError::AlreadyExists`] if another application is alive, checked
    /// before the window is created or any layer is attached.
    /// [`AppError::Config`] for an invalid configuration and
    /// [`AppError::Window`] if the native window cannot be created.
    pub fn build(self) -> Result<Application, AppError> {
        let guard = InstanceGuard::acquire()?;
        self.config.validate()?;

        let mut window = match self.window {
            Some(window) => window,
            None => Window::new(&self.config.window)?,
        };

        let (sender, events) = mpsc::channel();
        window.set_event_callback(move |event| {
            if sender.send(event).is_err() {
                log::trace!("Application gone, dropping window event");
            }
        });

        let timer = FrameTimer::new(window.time());
        let mut app = Application {
            layer_stack: LayerStack::new(),
            window,
            events,
            commands: Vec::new(),
            timer,
            engine: self.config.engine,
            running: true,
            minimized: false,
            state: AppState::Constructing,
            _guard: guard,
        };

        for pending in self.pending {
            match pending {
                Pending::Layer(layer) => app.layer_stack.push_layer(layer),
                Pending::Overlay(overlay) => app.layer_stack.push_overlay(overlay),
            };
        }

        log::info!(
            "Application created with {} layers and {} overlays",
            app.layer_stack.layer_count(),
            app.layer_stack.overlay_count()
        );
        Ok(app)
    }
}

/// The running application
///
/// Owns the window and the layer stack exclusively. Field order matters on
/// drop: layers detach first, then the window closes, then the process-wide
/// slot is released.
pub struct Application {
    layer_stack: LayerStack,
    window: Window,
    events: Receiver<Event>,
    commands: Vec<LayerCommand>,
    timer: FrameTimer,
    engine: EngineConfig,
    running: bool,
    minimized: bool,
    state: AppState,
    _guard: InstanceGuard,
}

impl Application {
    /// Create an application with a native window and no layers
    ///
    /// # Errors
    /// See [`ApplicationBuilder::build`].
    pub fn new(config: ApplicationConfig) -> Result<Self, AppError> {
        ApplicationBuilder::new(config).build()
    }

    /// Start building an application
    pub fn builder(config: ApplicationConfig) -> ApplicationBuilder {
        ApplicationBuilder::new(config)
    }

    /// Run the main loop until something requests exit
    ///
    /// # Errors
    /// A failed present or poll ends the loop and is returned.
    pub fn run(&mut self) -> Result<(), AppError> {
        self.state = AppState::Running;
        log::info!("Starting main loop");

        let result = self.main_loop();

        self.state = AppState::ShuttingDown;
        match &result {
            Ok(()) => log::info!(
                "Main loop finished after {} frames ({:.1} fps average)",
                self.timer.frame_count(),
                self.timer.average_fps()
            ),
            Err(e) => log::error!("Main loop aborted: {e}"),
        }
        result
    }

    fn main_loop(&mut self) -> Result<(), AppError> {
        while self.running {
            let dt = self.timer.tick(self.window.time());

            if !self.minimized {
                self.update_pass(dt);
                self.render_pass();
            }

            self.window.on_update()?;
            while let Ok(mut event) = self.events.try_recv() {
                self.on_event(&mut event);
            }

            if self.engine.exit_on_escape && self.window.is_key_pressed(KeyCode::Escape) {
                log::info!("Escape pressed, closing");
                self.close();
            }
        }
        Ok(())
    }

    fn update_pass(&mut self, dt: Time) {
        let infos = self.layer_stack.infos();
        let Self {
            layer_stack,
            window,
            commands,
            timer,
            ..
        } = self;
        let mut ctx = LayerContext::new(window, &infos, timer, commands);
        for entry in layer_stack.iter_mut().filter(|entry| entry.is_visible()) {
            entry.layer_mut().on_update(&mut ctx, dt);
        }
        self.apply_commands();
    }

    fn render_pass(&mut self) {
        let infos = self.layer_stack.infos();
        let Self {
            layer_stack,
            window,
            commands,
            timer,
            ..
        } = self;
        let mut ctx = LayerContext::new(window, &infos, timer, commands);
        for entry in layer_stack.iter_mut().filter(|entry| entry.is_visible()) {
            entry.layer_mut().on_render(&mut ctx);
        }
        self.apply_commands();
    }

    /// Single entry point for window events
    ///
    /// Core handlers run first: `WindowClosed` stops the loop and is marked
    /// handled; `WindowResized` tracks minimization and keeps propagating.
    /// The event then travels the stack top to bottom, hidden layers
    /// included, until some layer marks it handled.
    pub fn on_event(&mut self, event: &mut Event) {
        log::trace!("{event}");

        let mut dispatcher = EventDispatcher::new(event);
        dispatcher.dispatch::<WindowClosed>(|_| {
            self.close();
            true
        });
        dispatcher.dispatch::<WindowResized>(|e| {
            self.on_window_resize(e.width, e.height);
            false
        });

        let infos = self.layer_stack.infos();
        let Self {
            layer_stack,
            window,
            commands,
            timer,
            ..
        } = self;
        let mut ctx = LayerContext::new(window, &infos, timer, commands);
        for entry in layer_stack.iter_mut().rev() {
            if event.is_handled() {
                break;
            }
            entry.layer_mut().on_event(&mut ctx, event);
        }
        self.apply_commands();
    }

    fn on_window_resize(&mut self, width: u32, height: u32) {
        log::debug!("Window resized to {width}x{height}");
        let minimized = width == 0 && height == 0;
        if minimized != self.minimized {
            log::debug!("Window {}", if minimized { "minimized" } else { "restored" });
        }
        self.minimized = minimized;
    }

    fn apply_commands(&mut self) {
        for command in std::mem::take(&mut self.commands) {
            log::trace!("Applying {command:?}");
            match command {
                LayerCommand::SetVisible(id, visible) => {
                    if !self.layer_stack.set_visible(id, visible) {
                        log::debug!("No layer {id} to change visibility of");
                    }
                }
                LayerCommand::PushLayer(layer) => {
                    self.layer_stack.push_layer(layer);
                }
                LayerCommand::PushOverlay(overlay) => {
                    self.layer_stack.push_overlay(overlay);
                }
                LayerCommand::PopLayer(id) => {
                    if self.layer_stack.pop_layer(id).is_none() {
                        log::debug!("No layer {id} to pop");
                    }
                }
                LayerCommand::PopOverlay(id) => {
                    if self.layer_stack.pop_overlay(id).is_none() {
                        log::debug!("No overlay {id} to pop");
                    }
                }
                LayerCommand::RequestExit => self.close(),
            }
        }
    }

    /// Stop the main loop at the top of its next iteration
    pub fn close(&mut self) {
        if self.running {
            log::info!("Application closing");
        }
        self.running = false;
        self.state = AppState::ShuttingDown;
    }

    /// Push a regular layer
    pub fn push_layer(&mut self, layer: impl Layer + 'static) -> LayerId {
        self.layer_stack.push_layer(Box::new(layer))
    }

    /// Push an overlay
    pub fn push_overlay(&mut self, overlay: impl Layer + 'static) -> LayerId {
        self.layer_stack.push_overlay(Box::new(overlay))
    }

    /// The window
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// The window, mutably
    pub fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    /// The layer stack
    pub fn layer_stack(&self) -> &LayerStack {
        &self.layer_stack
    }

    /// The layer stack, mutably
    pub fn layer_stack_mut(&mut self) -> &mut LayerStack {
        &mut self.layer_stack
    }

    /// Frame statistics
    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    /// Whether the main loop keeps going
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether update and render are being skipped for a zero-sized window
    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    /// Lifecycle stage
    pub fn state(&self) -> AppState {
        self.state
    }
}

impl Drop for Application {
    fn drop(&mut self) {
        self.state = AppState::Destroyed;
        log::debug!("Application shutting down");
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("state", &self.state)
            .field("running", &self.running)
            .field("minimized", &self.minimized)
            .field("layer_stack", &self.layer_stack)
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

//! # Layers
//!
//! A layer is a unit of per-frame behaviour the [`Application`] drives:
//! content scenes, audio, UI overlays. Layers live in a [`LayerStack`],
//! which orders regular layers below overlays.
//!
//! Every hook has a no-op default, so a concrete layer implements only what
//! it needs:
//!
//! ```
//! use orrery_engine::prelude::*;
//!
//! struct Pause {
//!     paused: bool,
//! }
//!
//! impl Layer for Pause {
//!     fn name(&self) -> &str {
//!         "Pause"
//!     }
//!
//!     fn on_event(&mut self, _ctx: &mut LayerContext<'_>, event: &mut Event) {
//!         let mut dispatcher = EventDispatcher::new(event);
//!         dispatcher.dispatch::<KeyPressed>(|e| {
//!             if e.key == KeyCode::Space {
//!                 self.paused = !self.paused;
//!                 return true;
//!             }
//!             false
//!         });
//!     }
//! }
//! ```
//!
//! Hooks that run while the stack is being walked (update, render, event)
//! receive a [`LayerContext`]. Structural changes requested through it are
//! queued and applied once the walk finishes. Changes made during the update
//! pass are in place before the render pass of the same frame: a layer pushed
//! from `on_update` renders once before its first update, and a layer popped
//! or hidden from `on_update` does not render that frame.
//!
//! [`Application`]: crate::application::Application

pub mod stack;

pub use stack::LayerStack;

use crate::events::Event;
use crate::foundation::time::{FrameTimer, Time};
use crate::render::window::Window;
use std::fmt;

/// Identity of a layer within its stack
///
/// Ids are never reused by the stack that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub(crate) u64);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Per-frame behaviour driven by the application
pub trait Layer {
    /// Debug name shown in logs and the layer panel
    fn name(&self) -> &str {
        "Unnamed Layer"
    }

    /// Called once when the layer is pushed, before the push returns
    fn on_attach(&mut self) {}

    /// Called once when the layer is popped or its stack is dropped
    fn on_detach(&mut self) {}

    /// Advance the layer by `dt`; skipped while the layer is hidden
    fn on_update(&mut self, _ctx: &mut LayerContext<'_>, _dt: Time) {}

    /// Draw the layer; skipped while the layer is hidden
    fn on_render(&mut self, _ctx: &mut LayerContext<'_>) {}

    /// React to an event, marking it handled to stop propagation
    ///
    /// Delivered whether or not the layer is visible.
    fn on_event(&mut self, _ctx: &mut LayerContext<'_>, _event: &mut Event) {}

    /// Called when the stack changes this layer's visibility
    fn on_visibility_changed(&mut self, _visible: bool) {}
}

/// Snapshot of one stack entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerInfo {
    /// Stack identity
    pub id: LayerId,
    /// Layer debug name
    pub name: String,
    /// Whether update and render reach the layer
    pub visible: bool,
    /// Whether the layer sits in the overlay segment
    pub overlay: bool,
}

/// Stack change requested from inside a hook
pub enum LayerCommand {
    /// Show or hide a layer
    SetVisible(LayerId, bool),
    /// Push a regular layer
    PushLayer(Box<dyn Layer>),
    /// Push an overlay
    PushOverlay(Box<dyn Layer>),
    /// Pop a regular layer
    PopLayer(LayerId),
    /// Pop an overlay
    PopOverlay(LayerId),
    /// Stop the main loop
    RequestExit,
}

impl fmt::Debug for LayerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetVisible(id, visible) => write!(f, "SetVisible({id}, {visible})"),
            Self::PushLayer(layer) => write!(f, "PushLayer({})", layer.name()),
            Self::PushOverlay(layer) => write!(f, "PushOverlay({})", layer.name()),
            Self::PopLayer(id) => write!(f, "PopLayer({id})"),
            Self::PopOverlay(id) => write!(f, "PopOverlay({id})"),
            Self::RequestExit => write!(f, "RequestExit"),
        }
    }
}

/// What a layer can reach while the application walks the stack
///
/// Requests are applied after the current pass, so update-pass requests
/// already show in the render pass of the same frame.
pub struct LayerContext<'a> {
    window: &'a mut Window,
    layers: &'a [LayerInfo],
    timer: &'a FrameTimer,
    commands: &'a mut Vec<LayerCommand>,
}

impl<'a> LayerContext<'a> {
    /// Bundle the pieces of one stack walk
    pub fn new(
        window: &'a mut Window,
        layers: &'a [LayerInfo],
        timer: &'a FrameTimer,
        commands: &'a mut Vec<LayerCommand>,
    ) -> Self {
        Self {
            window,
            layers,
            timer,
            commands,
        }
    }

    /// The application window
    pub fn window(&self) -> &Window {
        self.window
    }

    /// The application window, mutably (graphics device, title, cursor)
    pub fn window_mut(&mut self) -> &mut Window {
        self.window
    }

    /// Stack entries as they were when the walk started, bottom to top
    pub fn layers(&self) -> &'a [LayerInfo] {
        self.layers
    }

    /// Frame statistics
    pub fn timer(&self) -> &'a FrameTimer {
        self.timer
    }

    /// Show or hide a layer once the walk finishes
    pub fn set_layer_visible(&mut self, id: LayerId, visible: bool) {
        self.commands.push(LayerCommand::SetVisible(id, visible));
    }

    /// Push a regular layer once the walk finishes
    pub fn push_layer(&mut self, layer: impl Layer + 'static) {
        self.commands.push(LayerCommand::PushLayer(Box::new(layer)));
    }

    /// Push an overlay once the walk finishes
    pub fn push_overlay(&mut self, layer: impl Layer + 'static) {
        self.commands.push(LayerCommand::PushOverlay(Box::new(layer)));
    }

    /// Pop a regular layer once the walk finishes
    pub fn pop_layer(&mut self, id: LayerId) {
        self.commands.push(LayerCommand::PopLayer(id));
    }

    /// Pop an overlay once the walk finishes
    pub fn pop_overlay(&mut self, id: LayerId) {
        self.commands.push(LayerCommand::PopOverlay(id));
    }

    /// Ask the application to stop after the current frame
    pub fn request_exit(&mut self) {
        self.commands.push(LayerCommand::RequestExit);
    }
}

//! Event model and typed dispatch
//!
//! Every input or window notification the backend detects becomes one
//! [`Event`]: an immutable [`EventKind`] payload plus a single mutable
//! `handled` flag. Consumers that hold an untyped `&mut Event` try typed
//! handlers against it through an [`EventDispatcher`]:
//!
//! ```
//! use orrery_engine::events::{Event, EventDispatcher, WindowResized};
//!
//! let mut event = Event::from(WindowResized { width: 800, height: 600 });
//! let dispatched = EventDispatcher::new(&mut event)
//!     .dispatch::<WindowResized>(|resize| resize.width == 0);
//! assert!(dispatched);
//! assert!(!event.is_handled());
//! ```
//!
//! Handlers return `true` when they consumed the event. The flag is what the
//! application checks to stop forwarding down the layer stack.

use crate::input::{KeyCode, MouseButton};
use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Coarse event filter groups
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EventCategory: u32 {
        /// Keyboard input
        const KEYBOARD = 1 << 0;
        /// Any mouse input
        const MOUSE = 1 << 1;
        /// Mouse button input
        const MOUSE_BUTTON = 1 << 2;
        /// Window lifecycle and geometry
        const WINDOW = 1 << 3;
        /// All user input
        const INPUT = Self::KEYBOARD.bits() | Self::MOUSE.bits() | Self::MOUSE_BUTTON.bits();
    }
}

/// Event type identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Key went down (or auto-repeated, see [`KeyPressed::repeat`])
    KeyPressed,
    /// Key went up
    KeyReleased,
    /// Key auto-repeat reported as its own event
    KeyRepeat,
    /// Cursor moved
    MouseMoved,
    /// Mouse button went down
    MouseButtonPressed,
    /// Mouse button went up
    MouseButtonReleased,
    /// Scroll wheel or trackpad scroll
    MouseScrolled,
    /// Window client area changed size
    WindowResized,
    /// Window close requested
    WindowClosed,
}

impl EventType {
    /// Category flags derived from the kind
    pub fn category(self) -> EventCategory {
        match self {
            Self::KeyPressed | Self::KeyReleased | Self::KeyRepeat => EventCategory::KEYBOARD,
            Self::MouseMoved | Self::MouseScrolled => EventCategory::MOUSE,
            Self::MouseButtonPressed | Self::MouseButtonReleased => {
                EventCategory::MOUSE | EventCategory::MOUSE_BUTTON
            }
            Self::WindowResized | Self::WindowClosed => EventCategory::WINDOW,
        }
    }
}

/// Key went down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPressed {
    /// Key that was pressed
    pub key: KeyCode,
    /// Whether this press is an auto-repeat of a held key
    pub repeat: bool,
}

/// Key went up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyReleased {
    /// Key that was released
    pub key: KeyCode,
}

/// Key auto-repeat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRepeat {
    /// Key being held
    pub key: KeyCode,
}

/// Cursor moved, in window coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseMoved {
    /// Cursor X position
    pub x: f32,
    /// Cursor Y position
    pub y: f32,
}

/// Mouse button went down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseButtonPressed {
    /// Button that was pressed
    pub button: MouseButton,
}

/// Mouse button went up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseButtonReleased {
    /// Button that was released
    pub button: MouseButton,
}

/// Scroll input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseScrolled {
    /// Horizontal scroll delta
    pub x_offset: f32,
    /// Vertical scroll delta
    pub y_offset: f32,
}

/// Window client area changed size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowResized {
    /// New width in pixels
    pub width: u32,
    /// New height in pixels
    pub height: u32,
}

/// Window close requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowClosed;

/// Payload of an event, one variant per [`EventType`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventKind {
    /// See [`KeyPressed`]
    KeyPressed(KeyPressed),
    /// See [`KeyReleased`]
    KeyReleased(KeyReleased),
    /// See [`KeyRepeat`]
    KeyRepeat(KeyRepeat),
    /// See [`MouseMoved`]
    MouseMoved(MouseMoved),
    /// See [`MouseButtonPressed`]
    MouseButtonPressed(MouseButtonPressed),
    /// See [`MouseButtonReleased`]
    MouseButtonReleased(MouseButtonReleased),
    /// See [`MouseScrolled`]
    MouseScrolled(MouseScrolled),
    /// See [`WindowResized`]
    WindowResized(WindowResized),
    /// See [`WindowClosed`]
    WindowClosed(WindowClosed),
}

/// Payload types that can be matched out of an [`EventKind`]
pub trait TypedEvent: Sized {
    /// Kind tag this payload corresponds to
    const EVENT_TYPE: EventType;

    /// Borrow the payload if `kind` carries this type
    fn from_kind(kind: &EventKind) -> Option<&Self>;
}

macro_rules! typed_event {
    ($($payload:ident),* $(,)?) => {
        $(
            impl TypedEvent for $payload {
                const EVENT_TYPE: EventType = EventType::$payload;

                fn from_kind(kind: &EventKind) -> Option<&Self> {
                    match kind {
                        EventKind::$payload(payload) => Some(payload),
                        _ => None,
                    }
                }
            }

            impl From<$payload> for EventKind {
                fn from(payload: $payload) -> Self {
                    Self::$payload(payload)
                }
            }

            impl From<$payload> for Event {
                fn from(payload: $payload) -> Self {
                    Self::new(EventKind::$payload(payload))
                }
            }
        )*

        impl EventKind {
            /// Kind tag of this payload
            pub fn event_type(&self) -> EventType {
                match self {
                    $(Self::$payload(_) => EventType::$payload,)*
                }
            }
        }
    };
}

typed_event!(
    KeyPressed,
    KeyReleased,
    KeyRepeat,
    MouseMoved,
    MouseButtonPressed,
    MouseButtonReleased,
    MouseScrolled,
    WindowResized,
    WindowClosed,
);

/// An input or window event travelling through the dispatch chain
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    kind: EventKind,
    handled: bool,
}

impl Event {
    /// Create an unhandled event
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            handled: false,
        }
    }

    /// Payload of the event
    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    /// Kind tag of the event
    pub fn event_type(&self) -> EventType {
        self.kind.event_type()
    }

    /// Category flags of the event
    pub fn category(&self) -> EventCategory {
        self.event_type().category()
    }

    /// Check whether the event belongs to any of the given categories
    pub fn is_in_category(&self, category: EventCategory) -> bool {
        self.category().intersects(category)
    }

    /// Whether some handler consumed the event
    pub fn is_handled(&self) -> bool {
        self.handled
    }

    /// Mark the event consumed (or not)
    pub fn set_handled(&mut self, handled: bool) {
        self.handled = handled;
    }

    /// Borrow the payload as `T` if the event is of that kind
    pub fn get<T: TypedEvent>(&self) -> Option<&T> {
        T::from_kind(&self.kind)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            EventKind::KeyPressed(e) => {
                write!(f, "KeyPressedEvent: {} (repeat: {})", e.key, e.repeat)
            }
            EventKind::KeyReleased(e) => write!(f, "KeyReleasedEvent: {}", e.key),
            EventKind::KeyRepeat(e) => write!(f, "KeyRepeatEvent: {}", e.key),
            EventKind::MouseMoved(e) => write!(f, "MouseMovedEvent: ({}, {})", e.x, e.y),
            EventKind::MouseButtonPressed(e) => {
                write!(f, "MouseButtonPressedEvent: {}", e.button)
            }
            EventKind::MouseButtonReleased(e) => {
                write!(f, "MouseButtonReleasedEvent: {}", e.button)
            }
            EventKind::MouseScrolled(e) => {
                write!(f, "MouseScrolledEvent: ({}, {})", e.x_offset, e.y_offset)
            }
            EventKind::WindowResized(e) => {
                write!(f, "WindowResizedEvent: {}x{}", e.width, e.height)
            }
            EventKind::WindowClosed(_) => write!(f, "WindowClosedEvent"),
        }
    }
}

/// Typed dispatch over one bound event
///
/// Each [`dispatch`](Self::dispatch) call fires at most one handler and
/// stores the handler's return value into the event's `handled` flag.
pub struct EventDispatcher<'a> {
    event: &'a mut Event,
}

impl<'a> EventDispatcher<'a> {
    /// Bind a dispatcher to an event
    pub fn new(event: &'a mut Event) -> Self {
        Self { event }
    }

    /// Invoke `handler` if the bound event is a `T`
    ///
    /// Returns whether the handler ran. A mismatch leaves the event untouched.
    pub fn dispatch<T: TypedEvent>(&mut self, handler: impl FnOnce(&T) -> bool) -> bool {
        if self.event.event_type() != T::EVENT_TYPE {
            return false;
        }
        match T::from_kind(&self.event.kind) {
            Some(payload) => {
                let handled = handler(payload);
                self.event.handled = handled;
                true
            }
            None => false,
        }
    }

    /// The bound event
    pub fn event(&self) -> &Event {
        self.event
    }
}

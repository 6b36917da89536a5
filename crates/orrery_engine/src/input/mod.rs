//! Input identifiers shared by events, window backends and layers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Key codes
///
/// Named variants cover the keys the runtime and demo layers care about.
/// Anything else arrives as `Other` carrying the backend's raw key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// Digit row key (0-9)
    Digit(u8),
    /// Function key (F1-F12)
    Function(u8),
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Tab key
    Tab,
    /// Backspace key
    Backspace,
    /// Left shift
    LeftShift,
    /// Left control
    LeftControl,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Key without a named variant (raw backend code)
    Other(i32),
}

impl KeyCode {
    /// Digit this key stands for, if it is on the digit row
    pub fn digit(self) -> Option<u8> {
        match self {
            Self::Digit(n) => Some(n),
            _ => None,
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit(n) => write!(f, "{n}"),
            Self::Function(n) => write!(f, "F{n}"),
            Self::Other(code) => write!(f, "Key({code})"),
            named => write!(f, "{named:?}"),
        }
    }
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
    /// Extra button, numbered from 4 upwards
    Other(u8),
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Other(n) => write!(f, "Button{n}"),
            named => write!(f, "{named:?}"),
        }
    }
}

/// Cursor behaviour over the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorMode {
    /// Visible and free to leave the window
    #[default]
    Normal,
    /// Invisible while over the window
    Hidden,
    /// Hidden and locked to the window, for unbounded mouse look
    Disabled,
}

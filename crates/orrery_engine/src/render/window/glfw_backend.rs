//! GLFW window backend
//!
//! Owns the GLFW context, the native window and its event receiver. Native
//! window events are translated into engine [`Event`]s during
//! [`poll_events`](WindowBackend::poll_events).

use super::backend::{WindowBackend, WindowError, WindowResult};
use crate::core::config::WindowConfig;
use crate::events::{
    Event, KeyPressed, KeyReleased, MouseButtonPressed, MouseButtonReleased, MouseMoved,
    MouseScrolled, WindowClosed, WindowResized,
};
use crate::input::{CursorMode, KeyCode, MouseButton};
use crate::render::graphics::{GraphicsDevice, RecordingDevice};
use glfw::Context;

const LETTERS: [(glfw::Key, KeyCode); 26] = [
    (glfw::Key::A, KeyCode::A),
    (glfw::Key::B, KeyCode::B),
    (glfw::Key::C, KeyCode::C),
    (glfw::Key::D, KeyCode::D),
    (glfw::Key::E, KeyCode::E),
    (glfw::Key::F, KeyCode::F),
    (glfw::Key::G, KeyCode::G),
    (glfw::Key::H, KeyCode::H),
    (glfw::Key::I, KeyCode::I),
    (glfw::Key::J, KeyCode::J),
    (glfw::Key::K, KeyCode::K),
    (glfw::Key::L, KeyCode::L),
    (glfw::Key::M, KeyCode::M),
    (glfw::Key::N, KeyCode::N),
    (glfw::Key::O, KeyCode::O),
    (glfw::Key::P, KeyCode::P),
    (glfw::Key::Q, KeyCode::Q),
    (glfw::Key::R, KeyCode::R),
    (glfw::Key::S, KeyCode::S),
    (glfw::Key::T, KeyCode::T),
    (glfw::Key::U, KeyCode::U),
    (glfw::Key::V, KeyCode::V),
    (glfw::Key::W, KeyCode::W),
    (glfw::Key::X, KeyCode::X),
    (glfw::Key::Y, KeyCode::Y),
    (glfw::Key::Z, KeyCode::Z),
];

const DIGITS: [glfw::Key; 10] = [
    glfw::Key::Num0,
    glfw::Key::Num1,
    glfw::Key::Num2,
    glfw::Key::Num3,
    glfw::Key::Num4,
    glfw::Key::Num5,
    glfw::Key::Num6,
    glfw::Key::Num7,
    glfw::Key::Num8,
    glfw::Key::Num9,
];

const FUNCTION_KEYS: [glfw::Key; 12] = [
    glfw::Key::F1,
    glfw::Key::F2,
    glfw::Key::F3,
    glfw::Key::F4,
    glfw::Key::F5,
    glfw::Key::F6,
    glfw::Key::F7,
    glfw::Key::F8,
    glfw::Key::F9,
    glfw::Key::F10,
    glfw::Key::F11,
    glfw::Key::F12,
];

const NAMED: [(glfw::Key, KeyCode); 11] = [
    (glfw::Key::Space, KeyCode::Space),
    (glfw::Key::Enter, KeyCode::Enter),
    (glfw::Key::Escape, KeyCode::Escape),
    (glfw::Key::Tab, KeyCode::Tab),
    (glfw::Key::Backspace, KeyCode::Backspace),
    (glfw::Key::LeftShift, KeyCode::LeftShift),
    (glfw::Key::LeftControl, KeyCode::LeftControl),
    (glfw::Key::Up, KeyCode::Up),
    (glfw::Key::Down, KeyCode::Down),
    (glfw::Key::Left, KeyCode::Left),
    (glfw::Key::Right, KeyCode::Right),
];

fn from_glfw_key(key: glfw::Key) -> KeyCode {
    if let Some(&(_, code)) = LETTERS.iter().chain(NAMED.iter()).find(|(k, _)| *k == key) {
        return code;
    }
    if let Some(n) = DIGITS.iter().position(|k| *k == key) {
        return KeyCode::Digit(n as u8);
    }
    if let Some(n) = FUNCTION_KEYS.iter().position(|k| *k == key) {
        return KeyCode::Function(n as u8 + 1);
    }
    KeyCode::Other(key as i32)
}

fn to_glfw_key(code: KeyCode) -> Option<glfw::Key> {
    match code {
        KeyCode::Digit(n) => DIGITS.get(usize::from(n)).copied(),
        KeyCode::Function(n) => FUNCTION_KEYS.get(usize::from(n).checked_sub(1)?).copied(),
        KeyCode::Other(_) => None,
        named => LETTERS
            .iter()
            .chain(NAMED.iter())
            .find(|(_, c)| *c == named)
            .map(|&(k, _)| k),
    }
}

fn from_glfw_button(button: glfw::MouseButton) -> MouseButton {
    match button {
        glfw::MouseButton::Button1 => MouseButton::Left,
        glfw::MouseButton::Button2 => MouseButton::Right,
        glfw::MouseButton::Button3 => MouseButton::Middle,
        other => MouseButton::Other(other as u8),
    }
}

fn to_glfw_cursor(mode: CursorMode) -> glfw::CursorMode {
    match mode {
        CursorMode::Normal => glfw::CursorMode::Normal,
        CursorMode::Hidden => glfw::CursorMode::Hidden,
        CursorMode::Disabled => glfw::CursorMode::Disabled,
    }
}

fn translate(event: glfw::WindowEvent) -> Option<Event> {
    let event = match event {
        glfw::WindowEvent::Key(key, _, glfw::Action::Press, _) => KeyPressed {
            key: from_glfw_key(key),
            repeat: false,
        }
        .into(),
        glfw::WindowEvent::Key(key, _, glfw::Action::Repeat, _) => KeyPressed {
            key: from_glfw_key(key),
            repeat: true,
        }
        .into(),
        glfw::WindowEvent::Key(key, _, glfw::Action::Release, _) => KeyReleased {
            key: from_glfw_key(key),
        }
        .into(),
        glfw::WindowEvent::MouseButton(button, glfw::Action::Release, _) => MouseButtonReleased {
            button: from_glfw_button(button),
        }
        .into(),
        glfw::WindowEvent::MouseButton(button, _, _) => MouseButtonPressed {
            button: from_glfw_button(button),
        }
        .into(),
        glfw::WindowEvent::CursorPos(x, y) => MouseMoved {
            x: x as f32,
            y: y as f32,
        }
        .into(),
        glfw::WindowEvent::Scroll(x, y) => MouseScrolled {
            x_offset: x as f32,
            y_offset: y as f32,
        }
        .into(),
        glfw::WindowEvent::Size(width, height) => WindowResized {
            width: width.max(0) as u32,
            height: height.max(0) as u32,
        }
        .into(),
        glfw::WindowEvent::Close => WindowClosed.into(),
        _ => return None,
    };
    Some(event)
}

/// Native window backed by GLFW with an OpenGL 4.1 core context
pub struct GlfwBackend {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    title: String,
    vsync: bool,
    cursor_mode: CursorMode,
    device: RecordingDevice,
}

impl GlfwBackend {
    /// Initialize GLFW and open a window as described by `config`
    ///
    /// # Errors
    /// Returns [`WindowError::InitializationFailed`] if GLFW cannot start and
    /// [`WindowError::CreationFailed`] if the window or context cannot be made.
    pub fn new(config: &WindowConfig) -> WindowResult<Self> {
        let mut glfw = glfw::init(glfw::log_errors)
            .map_err(|e| WindowError::InitializationFailed(format!("{e:?}")))?;

        glfw.window_hint(glfw::WindowHint::ContextVersion(4, 1));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
        glfw.window_hint(glfw::WindowHint::Resizable(config.resizable));

        let (mut window, events) = glfw
            .create_window(
                config.width,
                config.height,
                &config.title,
                glfw::WindowMode::Windowed,
            )
            .ok_or(WindowError::CreationFailed)?;

        window.make_current();
        window.set_key_polling(true);
        window.set_close_polling(true);
        window.set_size_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_mouse_button_polling(true);
        window.set_scroll_polling(true);
        window.set_cursor_mode(to_glfw_cursor(config.cursor_mode));

        let mut backend = Self {
            glfw,
            window,
            events,
            title: config.title.clone(),
            vsync: config.vsync,
            cursor_mode: config.cursor_mode,
            device: RecordingDevice::new(),
        };
        backend.set_vsync(config.vsync);
        backend.device.set_viewport(config.width, config.height);

        log::info!(
            "Created window '{}' ({}x{})",
            config.title,
            config.width,
            config.height
        );
        Ok(backend)
    }

    /// The native GLFW window
    pub fn native_window(&self) -> &glfw::PWindow {
        &self.window
    }
}

impl WindowBackend for GlfwBackend {
    fn present(&mut self) -> WindowResult<()> {
        self.device.end_frame();
        self.window.swap_buffers();
        Ok(())
    }

    fn poll_events(&mut self, sink: &mut dyn FnMut(Event)) {
        self.glfw.poll_events();
        for (_, native) in glfw::flush_messages(&self.events) {
            if let glfw::WindowEvent::Size(width, height) = native {
                self.device
                    .set_viewport(width.max(0) as u32, height.max(0) as u32);
            }
            if let Some(event) = translate(native) {
                sink(event);
            }
        }
    }

    fn time(&self) -> f64 {
        self.glfw.get_time()
    }

    fn size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_size();
        (width.max(0) as u32, height.max(0) as u32)
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.window.set_size(width as i32, height as i32);
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
        self.title = title.to_string();
    }

    fn is_vsync(&self) -> bool {
        self.vsync
    }

    fn set_vsync(&mut self, enabled: bool) {
        let interval = if enabled {
            glfw::SwapInterval::Sync(1)
        } else {
            glfw::SwapInterval::None
        };
        self.glfw.set_swap_interval(interval);
        self.vsync = enabled;
    }

    fn cursor_mode(&self) -> CursorMode {
        self.cursor_mode
    }

    fn set_cursor_mode(&mut self, mode: CursorMode) {
        self.window.set_cursor_mode(to_glfw_cursor(mode));
        self.cursor_mode = mode;
    }

    fn is_key_pressed(&self, key: KeyCode) -> bool {
        to_glfw_key(key).map_or(false, |key| {
            matches!(
                self.window.get_key(key),
                glfw::Action::Press | glfw::Action::Repeat
            )
        })
    }

    fn graphics(&mut self) -> &mut dyn GraphicsDevice {
        &mut self.device
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

//! Window management subsystem
//!
//! - **`handle`**: the application-facing [`Window`]
//! - **`backend`**: the [`WindowBackend`] contract and window errors
//! - **`glfw_backend`**: native window with an OpenGL context (feature `glfw`)
//! - **`headless`**: scripted backend for tests and windowless runs

pub mod backend;
#[cfg(feature = "glfw")]
pub mod glfw_backend;
pub mod handle;
pub mod headless;

pub use backend::{WindowBackend, WindowError, WindowResult};
#[cfg(feature = "glfw")]
pub use glfw_backend::GlfwBackend;
pub use handle::{EventCallback, Window};
pub use headless::HeadlessBackend;

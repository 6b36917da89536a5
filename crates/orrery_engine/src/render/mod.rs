//! # Rendering System
//!
//! The window, the graphics capability render hooks draw through, and the
//! fly camera used by the demo scenes.
//!
//! - **Window**: [`Window`] handle over a GLFW or headless backend
//! - **Graphics**: [`GraphicsDevice`] and the [`DrawCommand`]s layers submit
//! - **Camera**: perspective fly [`Camera`]

pub mod camera;
pub mod graphics;
pub mod window;

pub use camera::Camera;
pub use graphics::{Color, DrawCommand, GraphicsDevice, Primitive, RecordingDevice};
pub use window::{Window, WindowBackend, WindowError, WindowResult};

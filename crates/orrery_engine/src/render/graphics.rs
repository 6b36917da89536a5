//! Graphics device capability handed to render hooks
//!
//! Layers never talk to a graphics API directly. During the render pass they
//! describe what to draw through a [`GraphicsDevice`], which the window
//! backend owns and flushes when the frame is presented.

use crate::foundation::math::Mat4;

/// RGBA clear color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Alpha channel
    pub a: f32,
}

impl Color {
    /// Opaque black
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Opaque color from RGB channels
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// Shapes a draw command can reference
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Unit sphere
    Sphere,
    /// Unit cube
    Cube,
    /// Flat ring in the XZ plane
    OrbitRing {
        /// Ring radius in world units
        radius: f32,
    },
}

/// One unit of work for the graphics device
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Draw a primitive
    Mesh {
        /// Shape to draw
        primitive: Primitive,
        /// Model-view-projection matrix
        transform: Mat4,
        /// Material or texture name
        material: String,
        /// Whether the surface emits light instead of receiving it
        emissive: bool,
    },
    /// Draw screen-space text, position in pixels from the top-left corner
    Text {
        /// Screen position
        position: [f32; 2],
        /// Text content
        text: String,
    },
}

/// Opaque rendering capability
pub trait GraphicsDevice {
    /// Clear the frame to a color
    fn clear(&mut self, color: Color);

    /// Set the viewport to the given framebuffer size
    fn set_viewport(&mut self, width: u32, height: u32);

    /// Queue a draw command for the current frame
    fn draw(&mut self, command: DrawCommand);

    /// Finish the current frame, returning how many draw commands it held
    fn end_frame(&mut self) -> usize;
}

/// Graphics device that records each frame's commands
///
/// Backends use it as their frame list; tests use it to inspect what the
/// render pass produced.
#[derive(Debug, Default)]
pub struct RecordingDevice {
    clear_color: Option<Color>,
    viewport: (u32, u32),
    commands: Vec<DrawCommand>,
    last_frame: Vec<DrawCommand>,
    frames: u64,
}

impl RecordingDevice {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands queued since the last `end_frame`
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands of the most recently finished frame
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last_frame
    }

    /// Clear color of the current frame, if one was set
    pub fn clear_color(&self) -> Option<Color> {
        self.clear_color
    }

    /// Current viewport size
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Number of finished frames
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl GraphicsDevice for RecordingDevice {
    fn clear(&mut self, color: Color) {
        self.clear_color = Some(color);
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    fn draw(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    fn end_frame(&mut self) -> usize {
        self.last_frame = std::mem::take(&mut self.commands);
        self.clear_color = None;
        self.frames += 1;
        log::trace!("Frame {} finished with {} draw commands", self.frames, self.last_frame.len());
        self.last_frame.len()
    }
}

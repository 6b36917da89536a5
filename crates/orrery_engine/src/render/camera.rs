//! # Fly Camera
//!
//! First-person camera steered by yaw and pitch. Movement is driven by key
//! state sampled each update; looking around is driven by mouse deltas and
//! the scroll wheel narrows or widens the field of view.
//!
//! # Coordinate System
//! Right-handed, Y-up. Yaw 0 looks down +X, yaw -90 looks down -Z.

use crate::foundation::math::{Mat4, Point3, Vec3};
use crate::input::KeyCode;

const PITCH_LIMIT: f32 = 89.0;
const MIN_FOV: f32 = 1.0;
const MAX_FOV: f32 = 90.0;

/// Key bindings the camera reacts to, as `(key, movement)` pairs
const MOVE_KEYS: [(KeyCode, Movement); 6] = [
    (KeyCode::W, Movement::Forward),
    (KeyCode::S, Movement::Backward),
    (KeyCode::A, Movement::Left),
    (KeyCode::D, Movement::Right),
    (KeyCode::Up, Movement::Up),
    (KeyCode::Down, Movement::Down),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Movement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// First-person perspective camera
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,
    up: Vec3,
    yaw: f32,
    pitch: f32,
    /// Distance moved per update while a movement key is held
    pub speed: f32,
    /// Degrees turned per update while an arrow key is held
    pub rotation_speed: f32,
    /// Degrees per pixel of mouse movement
    pub sensitivity: f32,
    fov: f32,
    aspect: f32,
    near: f32,
    far: f32,
    last_cursor: Option<(f32, f32)>,
}

impl Camera {
    /// Create a camera at `position` looking along `yaw`/`pitch` (degrees)
    pub fn new(position: Vec3, yaw: f32, pitch: f32, aspect: f32) -> Self {
        Self {
            position,
            up: Vec3::y(),
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            speed: 0.2,
            rotation_speed: 0.6,
            sensitivity: 0.05,
            fov: 60.0,
            aspect,
            near: 0.1,
            far: 1000.0,
            last_cursor: None,
        }
    }

    /// Yaw in degrees
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees, always within ±89
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Vertical field of view in degrees
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Width over height of the viewport
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Unit vector the camera looks along
    pub fn front(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
    }

    /// Unit vector to the camera's right
    pub fn right(&self) -> Vec3 {
        self.front().cross(&self.up).normalize()
    }

    /// Update the aspect ratio from a framebuffer size
    ///
    /// A zero width or height leaves the last valid aspect in place.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let aspect = width as f32 / height as f32;
        if (self.aspect - aspect).abs() > 0.01 {
            log::debug!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// Apply one update's worth of held keys
    ///
    /// `pressed` reports whether a key is down, usually
    /// [`Window::is_key_pressed`](crate::render::window::Window::is_key_pressed).
    pub fn process_keys(&mut self, pressed: impl Fn(KeyCode) -> bool) {
        let front = self.front();
        let right = self.right();
        for (key, movement) in MOVE_KEYS {
            if !pressed(key) {
                continue;
            }
            let offset = match movement {
                Movement::Forward => front,
                Movement::Backward => -front,
                Movement::Left => -right,
                Movement::Right => right,
                Movement::Up => self.up,
                Movement::Down => -self.up,
            };
            self.position += offset * self.speed;
        }

        if pressed(KeyCode::Left) {
            self.yaw -= self.rotation_speed;
        }
        if pressed(KeyCode::Right) {
            self.yaw += self.rotation_speed;
        }
    }

    /// Turn by a mouse delta in pixels
    pub fn process_mouse_delta(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch = (self.pitch + dy * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Turn toward an absolute cursor position
    ///
    /// The first position only records the cursor. Screen Y grows downward,
    /// so moving the cursor up pitches the camera up.
    pub fn process_cursor(&mut self, x: f32, y: f32) {
        if let Some((last_x, last_y)) = self.last_cursor {
            self.process_mouse_delta(x - last_x, last_y - y);
        }
        self.last_cursor = Some((x, y));
    }

    /// Zoom by a scroll offset
    pub fn process_scroll(&mut self, y_offset: f32) {
        self.fov = (self.fov - y_offset).clamp(MIN_FOV, MAX_FOV);
    }

    /// World-to-view transform
    pub fn view_matrix(&self) -> Mat4 {
        let eye = Point3::from(self.position);
        let target = Point3::from(self.position + self.front());
        Mat4::look_at_rh(&eye, &target, &self.up)
    }

    /// Perspective projection
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::new_perspective(self.aspect, self.fov.to_radians(), self.near, self.far)
    }

    /// Projection times view
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(-80.0, 20.0, -50.0), -20.0, -15.0, 16.0 / 9.0)
    }
}

//! Spinning cube scene, hidden by default

use orrery_engine::prelude::*;

/// Degrees per second
const SPIN_SPEED: f32 = 45.0;

/// A lone textured cube turning in front of its own camera
pub struct ExampleLayer {
    camera: Camera,
    angle: f32,
}

impl ExampleLayer {
    pub fn new() -> Self {
        Self {
            camera: Camera::new(Vec3::new(0.0, 0.0, 3.0), -90.0, 0.0, 16.0 / 9.0),
            angle: 0.0,
        }
    }

    /// Current spin in degrees, kept within `[0, 360)`
    pub fn angle(&self) -> f32 {
        self.angle
    }

    fn model(&self) -> Mat4 {
        Mat4::identity().rotated(self.angle, &Vec3::new(0.5, 1.0, 0.0))
    }
}

impl Default for ExampleLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Layer for ExampleLayer {
    fn name(&self) -> &str {
        "ExampleLayer"
    }

    fn on_update(&mut self, _ctx: &mut LayerContext<'_>, dt: Time) {
        self.angle = (self.angle + SPIN_SPEED * dt.seconds()).rem_euclid(360.0);
    }

    fn on_event(&mut self, _ctx: &mut LayerContext<'_>, event: &mut Event) {
        EventDispatcher::new(event).dispatch::<WindowResized>(|e| {
            self.camera.set_viewport(e.width, e.height);
            false
        });
    }

    fn on_render(&mut self, ctx: &mut LayerContext<'_>) {
        let transform = self.camera.view_projection() * self.model();
        ctx.window_mut().graphics().draw(DrawCommand::Mesh {
            primitive: Primitive::Cube,
            transform,
            material: "container".to_string(),
            emissive: false,
        });
    }

    fn on_visibility_changed(&mut self, visible: bool) {
        log::debug!("ExampleLayer {}", if visible { "shown" } else { "hidden" });
    }
}

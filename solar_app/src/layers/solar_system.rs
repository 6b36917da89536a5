//! # Solar System Layer
//!
//! The Sun, the eight planets, Pluto and Earth's Moon. Planets move on
//! circular orbits in the XZ plane around the Sun at the origin; every body
//! spins about its own tilted axis.
//!
//! ## Controls
//! - `W`/`A`/`S`/`D`, `Up`/`Down`: fly the camera
//! - `Left`/`Right`: turn the camera
//! - mouse: look around; scroll: zoom
//! - `Space`: pause or resume the orbits

use crate::config::SceneConfig;
use orrery_engine::prelude::*;

/// Physical and orbital parameters of one body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CelestialBody {
    /// Display name, also used as the material name (lowercased)
    pub name: &'static str,
    /// Uniform scale of the unit sphere
    pub size: f32,
    /// Spin in degrees per second
    pub rotation_speed: f32,
    /// Axial tilt in degrees
    pub axial_tilt: f32,
    /// Distance from the Sun
    pub orbital_radius: f32,
    /// Orbital speed in degrees per second before scaling
    pub orbital_speed: f32,
}

const fn body(
    name: &'static str,
    size: f32,
    rotation_speed: f32,
    axial_tilt: f32,
    orbital_radius: f32,
    orbital_speed: f32,
) -> CelestialBody {
    CelestialBody {
        name,
        size,
        rotation_speed,
        axial_tilt,
        orbital_radius,
        orbital_speed,
    }
}

/// Bodies in draw order; the Sun comes first and sits at the origin
pub const BODIES: [CelestialBody; 10] = [
    body("Sun", 50.0, 2.0, 7.25, 0.0, 0.0),
    body("Mercury", 0.38, 10.0, 0.03, 30.0, 47.87),
    body("Venus", 0.95, 6.5, 177.4, 35.0, 35.02),
    body("Earth", 1.0, 15.0, 23.44, 45.0, 29.78),
    body("Mars", 0.53, 13.0, 25.19, 55.0, 24.07),
    body("Jupiter", 11.21, 30.0, 62.13, 80.0, 13.07),
    body("Saturn", 9.45, 25.0, 26.73, 110.0, 9.69),
    body("Uranus", 4.01, 10.0, 97.77, 140.0, 6.81),
    body("Neptune", 3.88, 12.0, 28.32, 160.0, 5.43),
    body("Pluto", 0.18, 5.0, 122.5, 180.0, 4.74),
];

const EARTH: usize = 3;
const MOON_DISTANCE: f32 = 2.0;
const MOON_SCALE: f32 = 0.27;
const MOON_ORBITAL_SPEED: f32 = 40.0;

const SPACE: Color = Color::rgb(0.01, 0.01, 0.03);

/// Animated solar system scene
pub struct SolarSystemLayer {
    camera: Camera,
    time: f32,
    orbital_speed_scale: f32,
    show_orbits: bool,
    paused: bool,
}

impl SolarSystemLayer {
    pub fn new(scene: &SceneConfig) -> Self {
        Self {
            camera: Camera::default(),
            time: 0.0,
            orbital_speed_scale: scene.orbital_speed_scale,
            show_orbits: scene.show_orbits,
            paused: false,
        }
    }

    /// Scene time in seconds; frozen while paused
    pub fn elapsed(&self) -> f32 {
        self.time
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Model matrix of `BODIES[index]` at the current scene time
    pub fn body_transform(&self, index: usize) -> Option<Mat4> {
        let body = BODIES.get(index)?;
        let mut model = Mat4::identity();
        if index > 0 {
            let angle = self.time * (body.orbital_speed * self.orbital_speed_scale).to_radians();
            model = model.translated(&Vec3::new(
                body.orbital_radius * angle.cos(),
                0.0,
                body.orbital_radius * angle.sin(),
            ));
        }
        Some(
            model
                .scaled(body.size)
                .rotated(body.axial_tilt, &Vec3::x())
                .rotated(self.time * body.rotation_speed, &Vec3::y()),
        )
    }

    /// Model matrix of the Moon, expressed in Earth's frame
    pub fn moon_transform(&self) -> Mat4 {
        let earth = self.body_transform(EARTH).unwrap_or_else(Mat4::identity);
        let angle = self.time * (MOON_ORBITAL_SPEED * self.orbital_speed_scale).to_radians();
        earth
            .translated(&Vec3::new(
                MOON_DISTANCE * angle.cos(),
                0.0,
                MOON_DISTANCE * angle.sin(),
            ))
            .scaled(MOON_SCALE)
    }
}

impl Layer for SolarSystemLayer {
    fn name(&self) -> &str {
        "SolarSystemLayer"
    }

    fn on_attach(&mut self) {
        log::debug!("SolarSystemLayer attached with {} bodies", BODIES.len());
    }

    fn on_detach(&mut self) {
        log::debug!("SolarSystemLayer detached at t={:.2}s", self.time);
    }

    fn on_update(&mut self, ctx: &mut LayerContext<'_>, dt: Time) {
        if !self.paused {
            self.time += dt.seconds();
        }
        let window = ctx.window();
        self.camera.process_keys(|key| window.is_key_pressed(key));
    }

    fn on_event(&mut self, _ctx: &mut LayerContext<'_>, event: &mut Event) {
        let mut dispatcher = EventDispatcher::new(event);
        dispatcher.dispatch::<KeyPressed>(|e| {
            if e.key == KeyCode::Space && !e.repeat {
                self.paused = !self.paused;
                log::info!("Orbits {}", if self.paused { "paused" } else { "resumed" });
                return true;
            }
            false
        });
        dispatcher.dispatch::<MouseMoved>(|e| {
            self.camera.process_cursor(e.x, e.y);
            false
        });
        dispatcher.dispatch::<MouseScrolled>(|e| {
            self.camera.process_scroll(e.y_offset);
            false
        });
        dispatcher.dispatch::<WindowResized>(|e| {
            self.camera.set_viewport(e.width, e.height);
            false
        });
    }

    fn on_render(&mut self, ctx: &mut LayerContext<'_>) {
        let view_projection = self.camera.view_projection();
        let (width, height) = ctx.window().size();
        let device = ctx.window_mut().graphics();
        device.set_viewport(width, height);
        device.clear(SPACE);

        if self.show_orbits {
            for body in BODIES.iter().skip(1) {
                device.draw(DrawCommand::Mesh {
                    primitive: Primitive::OrbitRing {
                        radius: body.orbital_radius,
                    },
                    transform: view_projection,
                    material: "orbit".to_string(),
                    emissive: false,
                });
            }
        }

        for (index, body) in BODIES.iter().enumerate() {
            let Some(model) = self.body_transform(index) else {
                continue;
            };
            device.draw(DrawCommand::Mesh {
                primitive: Primitive::Sphere,
                transform: view_projection * model,
                material: body.name.to_lowercase(),
                emissive: index == 0,
            });

            if index == EARTH {
                device.draw(DrawCommand::Mesh {
                    primitive: Primitive::Sphere,
                    transform: view_projection * self.moon_transform(),
                    material: "moon".to_string(),
                    emissive: false,
                });
            }
        }
    }
}

//! Layers making up the solar system demo

pub mod audio;
pub mod example;
pub mod layer_panel;
pub mod solar_system;

pub use audio::AudioLayer;
pub use example::ExampleLayer;
pub use layer_panel::LayerPanelOverlay;
pub use solar_system::SolarSystemLayer;

#[cfg(test)]
pub(crate) mod test_support {
    use orrery_engine::layers::LayerCommand;
    use orrery_engine::prelude::*;
    use orrery_engine::render::window::HeadlessBackend;

    /// Everything a layer hook needs, owned so tests can build a context from it
    pub(crate) struct Harness {
        pub window: Window,
        pub layers: Vec<LayerInfo>,
        pub timer: FrameTimer,
        pub commands: Vec<LayerCommand>,
    }

    impl Harness {
        pub(crate) fn new() -> Self {
            Self {
                window: Window::from_backend(Box::new(HeadlessBackend::new("test", 800, 600))),
                layers: Vec::new(),
                timer: FrameTimer::default(),
                commands: Vec::new(),
            }
        }

        /// Run `f` with a context borrowing the harness
        pub(crate) fn with_ctx<R>(&mut self, f: impl FnOnce(&mut LayerContext<'_>) -> R) -> R {
            let mut ctx = LayerContext::new(
                &mut self.window,
                &self.layers,
                &self.timer,
                &mut self.commands,
            );
            f(&mut ctx)
        }

        /// Draw commands recorded since the last present
        pub(crate) fn drawn(&self) -> Vec<DrawCommand> {
            self.window
                .native::<HeadlessBackend>()
                .map(|backend| backend.device().commands().to_vec())
                .unwrap_or_default()
        }
    }
}

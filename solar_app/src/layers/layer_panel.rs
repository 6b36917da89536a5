//! Debug overlay listing the layer stack
//!
//! `F1` shows or hides the panel. `1`..`9` toggle the visibility of the
//! matching stack entry, counted from the bottom. The overlay keeps
//! receiving keys while hidden, so it can always be brought back.

use orrery_engine::prelude::*;

const FPS_LOG_INTERVAL: f32 = 5.0;
const ORIGIN: [f32; 2] = [10.0, 10.0];
const LINE_HEIGHT: f32 = 18.0;

/// Overlay drawing the layer panel and frame statistics
pub struct LayerPanelOverlay {
    panel_open: bool,
    since_fps_log: f32,
}

impl LayerPanelOverlay {
    pub fn new() -> Self {
        Self {
            panel_open: true,
            since_fps_log: 0.0,
        }
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    /// Text lines the panel shows for the given stack and timer
    pub fn panel_lines(layers: &[LayerInfo], timer: &FrameTimer) -> Vec<String> {
        let mut lines = Vec::with_capacity(layers.len() + 3);
        lines.push("Layers".to_string());
        for (index, info) in layers.iter().enumerate() {
            lines.push(format!(
                "{} [{}] {}{}",
                index + 1,
                if info.visible { "x" } else { " " },
                info.name,
                if info.overlay { " (overlay)" } else { "" }
            ));
        }
        lines.push(format!("FPS: {:.1}", timer.current_fps()));
        lines.push(format!("Frame: {:.3} ms", timer.delta_time().milliseconds()));
        lines
    }

    fn toggle_entry(ctx: &mut LayerContext<'_>, slot: u8) -> bool {
        let Some(info) = usize::from(slot)
            .checked_sub(1)
            .and_then(|index| ctx.layers().get(index))
        else {
            return false;
        };
        log::debug!(
            "{} {} via layer panel",
            if info.visible { "Hiding" } else { "Showing" },
            info.name
        );
        ctx.set_layer_visible(info.id, !info.visible);
        true
    }
}

impl Default for LayerPanelOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Layer for LayerPanelOverlay {
    fn name(&self) -> &str {
        "LayerPanel"
    }

    fn on_update(&mut self, ctx: &mut LayerContext<'_>, dt: Time) {
        self.since_fps_log += dt.seconds();
        if self.since_fps_log >= FPS_LOG_INTERVAL {
            self.since_fps_log = 0.0;
            let timer = ctx.timer();
            log::info!(
                "FPS: {:.1} (avg {:.1}), frame {}",
                timer.current_fps(),
                timer.average_fps(),
                dt
            );
        }
    }

    fn on_event(&mut self, ctx: &mut LayerContext<'_>, event: &mut Event) {
        EventDispatcher::new(event).dispatch::<KeyPressed>(|e| {
            if e.repeat {
                return false;
            }
            match e.key {
                KeyCode::Function(1) => {
                    self.panel_open = !self.panel_open;
                    true
                }
                KeyCode::Digit(slot) if slot > 0 => Self::toggle_entry(ctx, slot),
                _ => false,
            }
        });
    }

    fn on_render(&mut self, ctx: &mut LayerContext<'_>) {
        if !self.panel_open {
            return;
        }
        let lines = Self::panel_lines(ctx.layers(), ctx.timer());
        let device = ctx.window_mut().graphics();
        for (row, text) in lines.into_iter().enumerate() {
            device.draw(DrawCommand::Text {
                position: [ORIGIN[0], ORIGIN[1] + LINE_HEIGHT * row as f32],
                text,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::test_support::Harness;
    use orrery_engine::layers::LayerCommand;

    fn press(key: KeyCode) -> Event {
        Event::from(KeyPressed { key, repeat: false })
    }

    /// Harness whose context sees a two-layer stack plus this overlay
    fn harness() -> Harness {
        struct Named(&'static str);
        impl Layer for Named {
            fn name(&self) -> &str {
                self.0
            }
        }

        let mut stack = LayerStack::new();
        stack.push_layer(Box::new(Named("SolarSystemLayer")));
        let example = stack.push_layer(Box::new(Named("ExampleLayer")));
        stack.push_overlay(Box::new(Named("LayerPanel")));
        stack.set_visible(example, false);

        let mut harness = Harness::new();
        harness.layers = stack.infos();
        harness
    }

    #[test]
    fn test_f1_toggles_panel() {
        let mut harness = harness();
        let mut overlay = LayerPanelOverlay::new();
        let mut event = press(KeyCode::Function(1));
        harness.with_ctx(|ctx| overlay.on_event(ctx, &mut event));
        assert!(event.is_handled());
        assert!(!overlay.is_panel_open());

        harness.with_ctx(|ctx| overlay.on_render(ctx));
        assert!(harness.drawn().is_empty());
    }

    #[test]
    fn test_digit_toggles_matching_entry() {
        let mut harness = harness();
        let mut overlay = LayerPanelOverlay::new();
        let target = harness.layers[1].id;

        let mut event = press(KeyCode::Digit(2));
        harness.with_ctx(|ctx| overlay.on_event(ctx, &mut event));

        assert!(event.is_handled());
        assert!(matches!(
            harness.commands.as_slice(),
            [LayerCommand::SetVisible(id, true)] if *id == target
        ));
    }

    #[test]
    fn test_digit_without_entry_passes_through() {
        let mut harness = harness();
        let mut overlay = LayerPanelOverlay::new();
        for key in [KeyCode::Digit(0), KeyCode::Digit(9)] {
            let mut event = press(key);
            harness.with_ctx(|ctx| overlay.on_event(ctx, &mut event));
            assert!(!event.is_handled());
        }
        assert!(harness.commands.is_empty());
    }

    #[test]
    fn test_repeats_are_ignored() {
        let mut harness = harness();
        let mut overlay = LayerPanelOverlay::new();
        let mut event = Event::from(KeyPressed {
            key: KeyCode::Function(1),
            repeat: true,
        });
        harness.with_ctx(|ctx| overlay.on_event(ctx, &mut event));
        assert!(!event.is_handled());
        assert!(overlay.is_panel_open());
    }

    #[test]
    fn test_panel_lists_layers_and_stats() {
        let harness = harness();
        let lines = LayerPanelOverlay::panel_lines(&harness.layers, &harness.timer);
        assert_eq!(
            lines,
            vec![
                "Layers".to_string(),
                "1 [x] SolarSystemLayer".to_string(),
                "2 [ ] ExampleLayer".to_string(),
                "3 [x] LayerPanel (overlay)".to_string(),
                "FPS: 0.0".to_string(),
                "Frame: 0.000 ms".to_string(),
            ]
        );
    }

    #[test]
    fn test_render_emits_one_text_per_line() {
        let mut harness = harness();
        let mut overlay = LayerPanelOverlay::new();
        harness.with_ctx(|ctx| overlay.on_render(ctx));
        let drawn = harness.drawn();
        assert_eq!(drawn.len(), 6);
        assert!(drawn.iter().all(|c| matches!(c, DrawCommand::Text { .. })));
    }
}

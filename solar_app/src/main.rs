//! Solar system demo
//!
//! ```text
//! solar_system [config.toml|config.ron] [--headless]
//! ```
//!
//! Without a config argument `solar_system.toml` in the working directory is
//! used when present, built-in defaults otherwise. `--headless` runs the
//! configured number of frames without opening a window, then exits.

mod config;
mod layers;

use config::SolarAppConfig;
use layers::{AudioLayer, ExampleLayer, LayerPanelOverlay, SolarSystemLayer};
use orrery_engine::config::{Config, ConfigError};
use orrery_engine::foundation::logging;
use orrery_engine::render::window::HeadlessBackend;
use orrery_engine::render::Window;
use orrery_engine::{AppError, Application};
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_CONFIG: &str = "solar_system.toml";

#[derive(Error, Debug)]
enum CliError {
    #[error("Unknown argument: {0}")]
    UnknownArgument(String),

    #[error("Only one config file may be given")]
    DuplicateConfig,

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Application error: {0}")]
    App(#[from] AppError),
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    config: Option<PathBuf>,
    headless: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args, CliError> {
    let mut parsed = Args::default();
    for arg in args {
        if arg == "--headless" {
            parsed.headless = true;
        } else if arg.starts_with('-') {
            return Err(CliError::UnknownArgument(arg));
        } else if parsed.config.is_some() {
            return Err(CliError::DuplicateConfig);
        } else {
            parsed.config = Some(PathBuf::from(arg));
        }
    }
    Ok(parsed)
}

fn headless_window(config: &SolarAppConfig) -> Window {
    let window = &config.app.window;
    let backend = HeadlessBackend::new(window.title.clone(), window.width, window.height)
        .with_idle_frames(config.scene.headless_frames)
        .close_when_exhausted();
    Window::from_backend(Box::new(backend))
}

fn build_app(config: &SolarAppConfig, headless: bool) -> Result<Application, CliError> {
    let mut builder = Application::builder(config.app.clone());
    if headless {
        log::info!("Running headless for {} frames", config.scene.headless_frames);
        builder = builder.window(headless_window(config));
    }

    let mut app = builder
        .layer(AudioLayer::new(&config.audio))
        .layer(SolarSystemLayer::new(&config.scene))
        .layer(ExampleLayer::new())
        .overlay(LayerPanelOverlay::new())
        .build()?;

    if !config.scene.show_example_layer {
        if let Some(id) = app.layer_stack().find_by_name("ExampleLayer") {
            app.layer_stack_mut().set_visible(id, false);
        }
    }
    Ok(app)
}

fn run() -> Result<(), CliError> {
    let args = parse_args(std::env::args().skip(1))?;
    let config = match &args.config {
        Some(path) => SolarAppConfig::load_from_file(path)?,
        None => SolarAppConfig::load_or_default(DEFAULT_CONFIG)?,
    };

    logging::init_with_level(&config.app.engine.log_level);
    config.validate()?;
    log::info!("Starting {}", config.app.window.title);

    let mut app = build_app(&config, args.headless)?;
    app.run()?;
    log::info!(
        "Ran {} frames, {:.1} FPS on average",
        app.timer().frame_count(),
        app.timer().average_fps()
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("solar_system panicked: {panic_info}");
    }));

    if let Err(e) = run() {
        log::error!("{e}");
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::AppState;

    fn args(list: &[&str]) -> Result<Args, CliError> {
        parse_args(list.iter().map(ToString::to_string))
    }

    #[test]
    fn test_no_arguments() {
        assert_eq!(args(&[]).unwrap(), Args::default());
    }

    #[test]
    fn test_config_and_headless_in_any_order() {
        let expected = Args {
            config: Some(PathBuf::from("scene.ron")),
            headless: true,
        };
        assert_eq!(args(&["scene.ron", "--headless"]).unwrap(), expected);
        assert_eq!(args(&["--headless", "scene.ron"]).unwrap(), expected);
    }

    #[test]
    fn test_rejects_unknown_flags() {
        assert!(matches!(args(&["--fast"]), Err(CliError::UnknownArgument(flag)) if flag == "--fast"));
        assert!(matches!(args(&["a.toml", "b.toml"]), Err(CliError::DuplicateConfig)));
    }

    #[test]
    fn test_headless_window_uses_configured_size() {
        let config = SolarAppConfig::default();
        let window = headless_window(&config);
        assert_eq!(window.size(), (config.app.window.width, config.app.window.height));
        assert_eq!(window.title(), "Solar System");
    }

    #[test]
    fn test_headless_run_closes_itself() {
        let mut config = SolarAppConfig::default();
        config.audio.enabled = false;
        config.scene.headless_frames = 10;

        let mut app = build_app(&config, true).unwrap();
        let names: Vec<String> = app.layer_stack().infos().into_iter().map(|info| info.name).collect();
        assert_eq!(names, ["AudioLayer", "SolarSystemLayer", "ExampleLayer", "LayerPanel"]);
        let example = app.layer_stack().find_by_name("ExampleLayer").unwrap();
        assert_eq!(app.layer_stack().is_visible(example), Some(false));

        app.run().unwrap();
        assert_eq!(app.state(), AppState::ShuttingDown);
        assert!(app.timer().frame_count() >= 10);
    }
}

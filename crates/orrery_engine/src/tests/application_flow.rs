//! End-to-end main loop behaviour: ordering, propagation, minimization and exit

use super::support::{app_lock, lines, Journal, Probe};
use crate::application::{instance_exists, AppError, AppState, Application, ApplicationBuilder};
use crate::core::config::{ApplicationConfig, EngineConfig};
use crate::events::{Event, EventType, KeyPressed, KeyReleased, WindowClosed, WindowResized};
use crate::foundation::time::Time;
use crate::input::KeyCode;
use crate::layers::{Layer, LayerContext};
use crate::render::window::{HeadlessBackend, Window, WindowError};

fn builder(backend: HeadlessBackend) -> ApplicationBuilder {
    Application::builder(ApplicationConfig::new("test"))
        .window(Window::from_backend(Box::new(backend)))
}

fn key(key: KeyCode) -> Event {
    Event::from(KeyPressed { key, repeat: false })
}

fn resize(width: u32, height: u32) -> Event {
    Event::from(WindowResized { width, height })
}

fn presented(app: &Application) -> u64 {
    app.window()
        .native::<HeadlessBackend>()
        .map_or(0, HeadlessBackend::frames_presented)
}

#[test]
fn test_layers_then_overlays_scenario() {
    let _lock = app_lock();
    let journal = Journal::default();
    let backend = HeadlessBackend::new("scenario", 800, 600)
        .with_batch([key(KeyCode::A)])
        .with_batch([Event::from(WindowClosed)]);

    let mut app = builder(backend)
        .layer(Probe::new("L1", &journal))
        .overlay(Probe::new("O1", &journal))
        .layer(Probe::new("L2", &journal))
        .build()
        .unwrap();

    let names: Vec<_> = app
        .layer_stack()
        .iter()
        .map(|entry| entry.layer().name().to_string())
        .collect();
    assert_eq!(names, ["L1", "L2", "O1"]);
    assert_eq!(lines(&journal, "attach"), ["attach L1", "attach O1", "attach L2"]);
    assert_eq!(app.state(), AppState::Constructing);

    app.run().unwrap();

    assert!(!app.is_running());
    assert_eq!(app.state(), AppState::ShuttingDown);
    assert_eq!(
        lines(&journal, "event"),
        ["event O1 KeyPressed", "event L2 KeyPressed", "event L1 KeyPressed"]
    );
    assert_eq!(
        lines(&journal, "update"),
        ["update L1", "update L2", "update O1", "update L1", "update L2", "update O1"]
    );
    assert_eq!(lines(&journal, "render").len(), 6);
    assert_eq!(presented(&app), 2);
    assert_eq!(app.timer().frame_count(), 2);
}

#[test]
fn test_updates_finish_before_renders() {
    let _lock = app_lock();
    let journal = Journal::default();
    let backend = HeadlessBackend::new("passes", 800, 600).close_when_exhausted();

    let mut app = builder(backend)
        .layer(Probe::new("L1", &journal))
        .overlay(Probe::new("O1", &journal))
        .build()
        .unwrap();
    app.run().unwrap();

    let frame: Vec<_> = journal
        .borrow()
        .iter()
        .filter(|line| line.starts_with("update") || line.starts_with("render"))
        .cloned()
        .collect();
    assert_eq!(frame, ["update L1", "update O1", "render L1", "render O1"]);
}

#[test]
fn test_handled_event_stops_propagation() {
    let _lock = app_lock();
    let journal = Journal::default();
    let backend = HeadlessBackend::new("handled", 800, 600)
        .with_batch([key(KeyCode::Space)])
        .close_when_exhausted();

    let mut app = builder(backend)
        .layer(Probe::new("L1", &journal))
        .layer(Probe::new("L2", &journal).consuming(EventType::KeyPressed))
        .overlay(Probe::new("O1", &journal))
        .build()
        .unwrap();
    app.run().unwrap();

    assert_eq!(
        lines(&journal, "event"),
        ["event O1 KeyPressed", "event L2 KeyPressed"]
    );
}

#[test]
fn test_window_close_reaches_no_layer() {
    let _lock = app_lock();
    let journal = Journal::default();
    let mut app = builder(HeadlessBackend::new("close", 800, 600))
        .layer(Probe::new("L1", &journal))
        .overlay(Probe::new("O1", &journal))
        .build()
        .unwrap();

    let mut event = Event::from(WindowClosed);
    app.on_event(&mut event);

    assert!(event.is_handled());
    assert!(!app.is_running());
    assert_eq!(app.state(), AppState::ShuttingDown);
    assert!(lines(&journal, "event").is_empty());
}

#[test]
fn test_closed_application_runs_no_frames() {
    let _lock = app_lock();
    let journal = Journal::default();
    let mut app = builder(HeadlessBackend::new("closed", 800, 600).with_idle_frames(3))
        .layer(Probe::new("L1", &journal))
        .build()
        .unwrap();

    app.close();
    app.run().unwrap();

    assert!(lines(&journal, "update").is_empty());
    assert_eq!(presented(&app), 0);
}

#[test]
fn test_resize_to_zero_minimizes_and_propagates() {
    let _lock = app_lock();
    let journal = Journal::default();
    let mut app = builder(HeadlessBackend::new("resize", 800, 600))
        .layer(Probe::new("L1", &journal))
        .build()
        .unwrap();

    let mut event = resize(0, 0);
    app.on_event(&mut event);
    assert!(app.is_minimized());
    assert!(!event.is_handled());

    let mut event = resize(800, 600);
    app.on_event(&mut event);
    assert!(!app.is_minimized());
    assert!(!event.is_handled());

    let mut event = resize(0, 600);
    app.on_event(&mut event);
    assert!(!app.is_minimized());

    assert_eq!(lines(&journal, "event").len(), 3);
}

#[test]
fn test_minimized_frames_still_present_and_poll() {
    let _lock = app_lock();
    let journal = Journal::default();
    let backend = HeadlessBackend::new("minimized", 800, 600)
        .with_batch([resize(0, 0)])
        .with_idle_frames(1)
        .with_batch([resize(800, 600)])
        .with_idle_frames(1)
        .close_when_exhausted();

    let mut app = builder(backend)
        .layer(Probe::new("L1", &journal))
        .build()
        .unwrap();
    app.run().unwrap();

    assert_eq!(lines(&journal, "update").len(), 3);
    assert_eq!(lines(&journal, "render").len(), 3);
    assert_eq!(presented(&app), 5);
    assert_eq!(
        lines(&journal, "event"),
        ["event L1 WindowResized", "event L1 WindowResized"]
    );
}

#[test]
fn test_hidden_layers_still_receive_events() {
    let _lock = app_lock();
    let journal = Journal::default();
    let backend = HeadlessBackend::new("hidden", 800, 600)
        .with_batch([key(KeyCode::H)])
        .close_when_exhausted();

    let mut app = builder(backend)
        .layer(Probe::new("L1", &journal))
        .build()
        .unwrap();
    let Some(id) = app.layer_stack().find_by_name("L1") else {
        panic!("L1 missing");
    };
    app.layer_stack_mut().set_visible(id, false);
    app.run().unwrap();

    assert!(lines(&journal, "update").is_empty());
    assert!(lines(&journal, "render").is_empty());
    assert_eq!(lines(&journal, "event"), ["event L1 KeyPressed"]);
}

#[test]
fn test_escape_key_closes() {
    let _lock = app_lock();
    let backend = HeadlessBackend::new("escape", 800, 600)
        .with_batch([key(KeyCode::Escape)])
        .with_idle_frames(5);

    let mut app = builder(backend).build().unwrap();
    app.run().unwrap();

    assert_eq!(presented(&app), 1);
    assert_eq!(app.state(), AppState::ShuttingDown);
}

#[test]
fn test_escape_shortcut_can_be_disabled() {
    let _lock = app_lock();
    let mut config = ApplicationConfig::new("no-escape");
    config.engine = EngineConfig::new().with_exit_on_escape(false);
    let backend = HeadlessBackend::new("no-escape", 800, 600)
        .with_batch([key(KeyCode::Escape)])
        .with_batch([Event::from(KeyReleased {
            key: KeyCode::Escape,
        })])
        .close_when_exhausted();

    let mut app = ApplicationBuilder::new(config)
        .window(Window::from_backend(Box::new(backend)))
        .build()
        .unwrap();
    app.run().unwrap();

    assert_eq!(presented(&app), 3);
}

#[test]
fn test_second_application_is_rejected() {
    let _lock = app_lock();
    let journal = Journal::default();
    let first = builder(HeadlessBackend::new("first", 1, 1)).build().unwrap();
    assert!(instance_exists());

    let second = builder(HeadlessBackend::new("second", 1, 1))
        .layer(Probe::new("L1", &journal))
        .build();
    assert!(matches!(second, Err(AppError::AlreadyExists)));
    assert!(lines(&journal, "attach").is_empty());

    drop(first);
    assert!(!instance_exists());
    assert!(builder(HeadlessBackend::new("third", 1, 1)).build().is_ok());
}

#[test]
fn test_invalid_config_releases_the_slot() {
    let _lock = app_lock();
    let mut config = ApplicationConfig::new("bad");
    config.window.width = 0;

    let result = ApplicationBuilder::new(config)
        .window(Window::from_backend(Box::new(HeadlessBackend::new("bad", 1, 1))))
        .build();
    assert!(matches!(result, Err(AppError::Config(_))));
    assert!(!instance_exists());
}

#[test]
fn test_present_failure_ends_the_loop() {
    let _lock = app_lock();
    let journal = Journal::default();
    let backend = HeadlessBackend::new("fail", 800, 600)
        .with_idle_frames(10)
        .fail_present_at(3);

    let mut app = builder(backend)
        .layer(Probe::new("L1", &journal))
        .build()
        .unwrap();
    let result = app.run();

    assert!(matches!(
        result,
        Err(AppError::Window(WindowError::PresentFailed(_)))
    ));
    assert_eq!(app.state(), AppState::ShuttingDown);
    assert_eq!(presented(&app), 2);
    assert_eq!(lines(&journal, "update").len(), 3);
}

#[test]
fn test_drop_detaches_remaining_layers() {
    let _lock = app_lock();
    let journal = Journal::default();
    let app = builder(HeadlessBackend::new("drop", 1, 1))
        .overlay(Probe::new("O1", &journal))
        .layer(Probe::new("L1", &journal))
        .build()
        .unwrap();

    drop(app);
    assert_eq!(lines(&journal, "detach"), ["detach L1", "detach O1"]);
    assert!(!instance_exists());
}

/// Pushes an overlay the first time it sees `P`, and pops it on `O`
struct Spawner {
    journal: Journal,
}

impl Layer for Spawner {
    fn name(&self) -> &str {
        "Spawner"
    }

    fn on_event(&mut self, ctx: &mut LayerContext<'_>, event: &mut Event) {
        let Some(pressed) = event.get::<KeyPressed>() else {
            return;
        };
        match pressed.key {
            KeyCode::P => ctx.push_overlay(Probe::new("Spawned", &self.journal)),
            KeyCode::O => {
                if let Some(info) = ctx.layers().iter().find(|info| info.name == "Spawned") {
                    ctx.pop_overlay(info.id);
                }
            }
            _ => {}
        }
    }
}

#[test]
fn test_stack_changes_from_events_apply_after_dispatch() {
    let _lock = app_lock();
    let journal = Journal::default();
    let mut app = builder(HeadlessBackend::new("spawn", 1, 1))
        .layer(Spawner {
            journal: Journal::clone(&journal),
        })
        .build()
        .unwrap();

    app.on_event(&mut key(KeyCode::P));
    assert_eq!(app.layer_stack().overlay_count(), 1);
    assert_eq!(lines(&journal, "attach"), ["attach Spawned"]);
    assert!(lines(&journal, "event").is_empty());

    app.on_event(&mut key(KeyCode::A));
    assert_eq!(lines(&journal, "event"), ["event Spawned KeyPressed"]);

    app.on_event(&mut key(KeyCode::O));
    assert_eq!(app.layer_stack().overlay_count(), 0);
    assert_eq!(lines(&journal, "detach"), ["detach Spawned"]);
}

/// Pops itself during its first update and asks to exit on its second
struct OneShot {
    journal: Journal,
    updates: u32,
}

impl Layer for OneShot {
    fn name(&self) -> &str {
        "OneShot"
    }

    fn on_update(&mut self, ctx: &mut LayerContext<'_>, _dt: Time) {
        self.updates += 1;
        self.journal.borrow_mut().push(format!("update OneShot {}", self.updates));
        let Some(me) = ctx.layers().iter().find(|info| info.name == "OneShot") else {
            return;
        };
        let id = me.id;
        ctx.pop_layer(id);
        ctx.request_exit();
    }

    fn on_render(&mut self, _ctx: &mut LayerContext<'_>) {
        self.journal.borrow_mut().push("render OneShot".to_string());
    }

    fn on_detach(&mut self) {
        self.journal.borrow_mut().push("detach OneShot".to_string());
    }
}

#[test]
fn test_pop_and_exit_requested_during_update() {
    let _lock = app_lock();
    let journal = Journal::default();
    let backend = HeadlessBackend::new("oneshot", 1, 1).with_idle_frames(5);

    let mut app = builder(backend)
        .layer(OneShot {
            journal: Journal::clone(&journal),
            updates: 0,
        })
        .layer(Probe::new("L2", &journal))
        .build()
        .unwrap();
    app.run().unwrap();

    assert_eq!(lines(&journal, "update OneShot"), ["update OneShot 1"]);
    assert!(lines(&journal, "render OneShot").is_empty());
    assert_eq!(lines(&journal, "detach"), ["detach OneShot"]);
    assert_eq!(lines(&journal, "render L2"), ["render L2"]);
    assert_eq!(presented(&app), 1);
    assert_eq!(app.layer_stack().len(), 1);
}

/// Pushes a `Late` probe during its first update
struct Summoner {
    journal: Journal,
    summoned: bool,
}

impl Layer for Summoner {
    fn on_update(&mut self, ctx: &mut LayerContext<'_>, _dt: Time) {
        if !self.summoned {
            self.summoned = true;
            ctx.push_layer(Probe::new("Late", &self.journal));
        }
    }
}

#[test]
fn test_layer_pushed_during_update_renders_that_frame() {
    let _lock = app_lock();
    let journal = Journal::default();
    let backend = HeadlessBackend::new("summon", 1, 1)
        .with_idle_frames(1)
        .close_when_exhausted();

    let mut app = builder(backend)
        .layer(Summoner {
            journal: Journal::clone(&journal),
            summoned: false,
        })
        .build()
        .unwrap();
    app.run().unwrap();

    assert_eq!(
        *journal.borrow(),
        ["attach Late", "render Late", "update Late", "render Late"]
    );
    assert_eq!(presented(&app), 2);
}

/// Hides the layer below it when `H` is pressed
struct Hider;

impl Layer for Hider {
    fn on_event(&mut self, ctx: &mut LayerContext<'_>, event: &mut Event) {
        if event.get::<KeyPressed>().map(|e| e.key) == Some(KeyCode::H) {
            if let Some(target) = ctx.layers().first() {
                let id = target.id;
                ctx.set_layer_visible(id, false);
            }
            event.set_handled(true);
        }
    }
}

#[test]
fn test_visibility_toggled_from_overlay() {
    let _lock = app_lock();
    let journal = Journal::default();
    let backend = HeadlessBackend::new("hider", 1, 1)
        .with_batch([key(KeyCode::H)])
        .with_idle_frames(1)
        .close_when_exhausted();

    let mut app = builder(backend)
        .layer(Probe::new("L1", &journal))
        .overlay(Hider)
        .build()
        .unwrap();
    app.run().unwrap();

    assert_eq!(lines(&journal, "update L1"), ["update L1"]);
    assert!(lines(&journal, "event").is_empty());
    let infos = app.layer_stack().infos();
    assert!(!infos[0].visible);
    assert_eq!(infos[1].name, "Unnamed Layer");
}

//! Scripted window backend without a native window
//!
//! Each call to `poll_events` delivers the next scripted batch of events and
//! advances a virtual clock by a fixed step. Tests drive the main loop with
//! it, and the demo can run windowless for a fixed number of frames.

use super::backend::{WindowBackend, WindowError, WindowResult};
use crate::events::{Event, EventKind};
use crate::input::{CursorMode, KeyCode};
use crate::render::graphics::{GraphicsDevice, RecordingDevice};
use std::collections::{HashSet, VecDeque};

/// Headless window backend driven by a script of event batches
#[derive(Debug)]
pub struct HeadlessBackend {
    title: String,
    size: (u32, u32),
    vsync: bool,
    cursor_mode: CursorMode,
    clock: f64,
    frame_step: f64,
    script: VecDeque<Vec<Event>>,
    close_when_exhausted: bool,
    close_sent: bool,
    fail_present_at: Option<u64>,
    pressed_keys: HashSet<KeyCode>,
    device: RecordingDevice,
    frames_presented: u64,
    polls: u64,
}

impl HeadlessBackend {
    /// Create a backend with an empty script
    ///
    /// The clock advances 1/60 s per poll and nothing closes the window
    /// until the script or the application does.
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            size: (width, height),
            vsync: true,
            cursor_mode: CursorMode::Normal,
            clock: 0.0,
            frame_step: 1.0 / 60.0,
            script: VecDeque::new(),
            close_when_exhausted: false,
            close_sent: false,
            fail_present_at: None,
            pressed_keys: HashSet::new(),
            device: RecordingDevice::new(),
            frames_presented: 0,
            polls: 0,
        }
    }

    /// Set how far the virtual clock moves per poll, in seconds
    pub fn with_frame_step(mut self, seconds: f64) -> Self {
        self.frame_step = seconds;
        self
    }

    /// Append one poll's worth of events to the script
    pub fn with_batch(mut self, events: impl IntoIterator<Item = Event>) -> Self {
        self.push_batch(events);
        self
    }

    /// Append `count` polls that deliver nothing
    pub fn with_idle_frames(mut self, count: usize) -> Self {
        for _ in 0..count {
            self.script.push_back(Vec::new());
        }
        self
    }

    /// Emit a `WindowClosed` event on the first poll after the script runs out
    pub fn close_when_exhausted(mut self) -> Self {
        self.close_when_exhausted = true;
        self
    }

    /// Make the `n`th present (1-based) fail
    pub fn fail_present_at(mut self, n: u64) -> Self {
        self.fail_present_at = Some(n);
        self
    }

    /// Append one poll's worth of events to the script
    pub fn push_batch(&mut self, events: impl IntoIterator<Item = Event>) {
        self.script.push_back(events.into_iter().collect());
    }

    /// Number of successful presents
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Number of event polls
    pub fn polls(&self) -> u64 {
        self.polls
    }

    /// Batches not yet delivered
    pub fn remaining_batches(&self) -> usize {
        self.script.len()
    }

    /// The recording graphics device
    pub fn device(&self) -> &RecordingDevice {
        &self.device
    }

    fn track(&mut self, event: &Event) {
        match event.kind() {
            EventKind::KeyPressed(e) => {
                self.pressed_keys.insert(e.key);
            }
            EventKind::KeyRepeat(e) => {
                self.pressed_keys.insert(e.key);
            }
            EventKind::KeyReleased(e) => {
                self.pressed_keys.remove(&e.key);
            }
            EventKind::WindowResized(e) => self.size = (e.width, e.height),
            _ => {}
        }
    }
}

impl WindowBackend for HeadlessBackend {
    fn present(&mut self) -> WindowResult<()> {
        if self.fail_present_at == Some(self.frames_presented + 1) {
            return Err(WindowError::PresentFailed("scripted present failure".to_string()));
        }
        self.device.end_frame();
        self.frames_presented += 1;
        Ok(())
    }

    fn poll_events(&mut self, sink: &mut dyn FnMut(Event)) {
        self.polls += 1;
        self.clock += self.frame_step;

        match self.script.pop_front() {
            Some(batch) => {
                for event in batch {
                    self.track(&event);
                    sink(event);
                }
            }
            None if self.close_when_exhausted && !self.close_sent => {
                self.close_sent = true;
                sink(Event::from(crate::events::WindowClosed));
            }
            None => {}
        }
    }

    fn time(&self) -> f64 {
        self.clock
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn is_vsync(&self) -> bool {
        self.vsync
    }

    fn set_vsync(&mut self, enabled: bool) {
        self.vsync = enabled;
    }

    fn cursor_mode(&self) -> CursorMode {
        self.cursor_mode
    }

    fn set_cursor_mode(&mut self, mode: CursorMode) {
        self.cursor_mode = mode;
    }

    fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed_keys.contains(&key)
    }

    fn graphics(&mut self) -> &mut dyn GraphicsDevice {
        &mut self.device
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{KeyPressed, KeyReleased, WindowResized};
    use crate::render::window::Window;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn collect(window: &mut Window) -> Rc<RefCell<Vec<Event>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        window.set_event_callback(move |event| sink.borrow_mut().push(event));
        seen
    }

    #[test]
    fn test_batches_arrive_one_per_update() {
        let backend = HeadlessBackend::new("test", 800, 600)
            .with_batch([Event::from(WindowResized {
                width: 1024,
                height: 768,
            })])
            .with_idle_frames(1);
        let mut window = Window::from_backend(Box::new(backend));
        let seen = collect(&mut window);

        window.on_update().unwrap();
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(window.size(), (1024, 768));

        window.on_update().unwrap();
        window.on_update().unwrap();
        assert_eq!(seen.borrow().len(), 1);

        let backend = window.native::<HeadlessBackend>().unwrap();
        assert_eq!(backend.frames_presented(), 3);
        assert_eq!(backend.polls(), 3);
    }

    #[test]
    fn test_clock_advances_per_poll() {
        let mut window = Window::from_backend(Box::new(
            HeadlessBackend::new("clock", 1, 1).with_frame_step(0.5),
        ));
        assert_eq!(window.time(), 0.0);
        window.on_update().unwrap();
        window.on_update().unwrap();
        assert!((window.time() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_close_when_exhausted_fires_once() {
        let mut window = Window::from_backend(Box::new(
            HeadlessBackend::new("close", 1, 1).close_when_exhausted(),
        ));
        let seen = collect(&mut window);
        window.on_update().unwrap();
        window.on_update().unwrap();
        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].event_type(), crate::events::EventType::WindowClosed);
    }

    #[test]
    fn test_key_state_follows_script() {
        let backend = HeadlessBackend::new("keys", 1, 1)
            .with_batch([Event::from(KeyPressed {
                key: KeyCode::W,
                repeat: false,
            })])
            .with_batch([Event::from(KeyReleased { key: KeyCode::W })]);
        let mut window = Window::from_backend(Box::new(backend));
        window.on_update().unwrap();
        assert!(window.is_key_pressed(KeyCode::W));
        window.on_update().unwrap();
        assert!(!window.is_key_pressed(KeyCode::W));
    }

    #[test]
    fn test_present_failure_skips_poll() {
        let backend = HeadlessBackend::new("fail", 1, 1)
            .with_idle_frames(2)
            .fail_present_at(2);
        let mut window = Window::from_backend(Box::new(backend));
        assert!(window.on_update().is_ok());
        assert!(matches!(window.on_update(), Err(WindowError::PresentFailed(_))));
        let backend = window.native::<HeadlessBackend>().unwrap();
        assert_eq!(backend.polls(), 1);
        assert_eq!(backend.remaining_batches(), 1);
    }

    #[test]
    fn test_events_dropped_without_callback() {
        let backend = HeadlessBackend::new("quiet", 1, 1).with_batch([Event::from(
            crate::events::WindowClosed,
        )]);
        let mut window = Window::from_backend(Box::new(backend));
        assert!(!window.has_event_callback());
        window.on_update().unwrap();
        assert_eq!(window.native::<HeadlessBackend>().unwrap().remaining_batches(), 0);
    }
}

//! Application-level tests driven by the headless window backend

mod application_flow;

pub(crate) mod support {
    use crate::events::{Event, EventType};
    use crate::foundation::time::Time;
    use crate::layers::{Layer, LayerContext};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::{Mutex, MutexGuard};

    static APP_LOCK: Mutex<()> = Mutex::new(());

    /// Serializes tests that build an application; only one may exist at a time
    pub(crate) fn app_lock() -> MutexGuard<'static, ()> {
        APP_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub(crate) type Journal = Rc<RefCell<Vec<String>>>;

    /// Journal lines starting with `prefix`
    pub(crate) fn lines(journal: &Journal, prefix: &str) -> Vec<String> {
        journal
            .borrow()
            .iter()
            .filter(|line| line.starts_with(prefix))
            .cloned()
            .collect()
    }

    /// Layer that writes every hook call to a shared journal
    pub(crate) struct Probe {
        name: &'static str,
        journal: Journal,
        consumes: Option<EventType>,
    }

    impl Probe {
        pub(crate) fn new(name: &'static str, journal: &Journal) -> Self {
            Self {
                name,
                journal: Rc::clone(journal),
                consumes: None,
            }
        }

        /// Mark events of `event_type` handled
        pub(crate) fn consuming(mut self, event_type: EventType) -> Self {
            self.consumes = Some(event_type);
            self
        }

        fn log(&self, line: String) {
            self.journal.borrow_mut().push(line);
        }
    }

    impl Layer for Probe {
        fn name(&self) -> &str {
            self.name
        }

        fn on_attach(&mut self) {
            self.log(format!("attach {}", self.name));
        }

        fn on_detach(&mut self) {
            self.log(format!("detach {}", self.name));
        }

        fn on_update(&mut self, _ctx: &mut LayerContext<'_>, _dt: Time) {
            self.log(format!("update {}", self.name));
        }

        fn on_render(&mut self, _ctx: &mut LayerContext<'_>) {
            self.log(format!("render {}", self.name));
        }

        fn on_event(&mut self, _ctx: &mut LayerContext<'_>, event: &mut Event) {
            self.log(format!("event {} {:?}", self.name, event.event_type()));
            if self.consumes == Some(event.event_type()) {
                event.set_handled(true);
            }
        }
    }
}

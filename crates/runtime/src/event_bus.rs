use std::fmt;

/// One step of the navigation controller, kept for the page console.
///
/// `kind` names the handler outcome (`"active"`, `"reveal_scheduled"`, ...);
/// `message` carries the ids or timer handle involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Controller event counter at the time of emission.
    pub tick: u64,
    pub kind: &'static str,
    pub message: String,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[nav #{}] {}: {}", self.tick, self.kind, self.message)
    }
}

/// Trace buffer owned by a controller and drained by the page binding after
/// every handler.
#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, tick: u64, kind: &'static str, message: impl Into<String>) {
        self.events.push(Event {
            tick,
            kind,
            message: message.into(),
        });
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

use crate::catalog::{EventCatalog, EventType};
use crate::error::PredicateError;
use crate::model::Requirement;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Always-true leaf.
pub fn t<C: ?Sized>(name: &str) -> Requirement<C> {
    Requirement::leaf(name, |_: &C| true)
}

/// Always-false leaf.
pub fn f<C: ?Sized>(name: &str) -> Requirement<C> {
    Requirement::leaf(name, |_: &C| false)
}

/// Leaf whose predicate always errors.
pub fn failing<C: ?Sized>(name: &str) -> Requirement<C> {
    Requirement::try_leaf(name, |_: &C| Err(PredicateError::new("trace data unavailable")))
}

/// Constant leaf that counts how often it is tested.
pub fn counting<C: ?Sized>(name: &str, verdict: bool) -> (Requirement<C>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let req = Requirement::leaf(name, move |_: &C| {
        seen.fetch_add(1, Ordering::SeqCst);
        verdict
    });
    (req, calls)
}

/// Minimal trace context for catalog requirements.
#[derive(Clone, Debug, Default)]
pub struct StubTrace {
    events: Option<Vec<EventType>>,
}

impl StubTrace {
    pub fn with_events(events: Vec<EventType>) -> Self {
        Self {
            events: Some(events),
        }
    }

    pub fn undeclared() -> Self {
        Self { events: None }
    }
}

impl EventCatalog for StubTrace {
    fn event_types(&self) -> Option<&[EventType]> {
        self.events.as_deref()
    }
}

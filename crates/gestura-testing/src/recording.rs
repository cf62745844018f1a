//! Event recorders.

use gestura_foundation::{GestureEvent, GestureType};
use std::cell::RefCell;
use std::rc::Rc;

/// Records every event handed to its [`sink`](Self::sink), in order.
///
/// Clones share the same log, so one handle can be moved into a session
/// while the test keeps another for assertions.
#[derive(Clone, Debug, Default)]
pub struct RecordingConsumer {
    events: Rc<RefCell<Vec<GestureEvent>>>,
}

impl RecordingConsumer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: &GestureEvent) {
        self.events.borrow_mut().push(event.clone());
    }

    /// Closure form, accepted anywhere an event callback is.
    pub fn sink(&self) -> impl FnMut(&GestureEvent) + 'static {
        let events = Rc::clone(&self.events);
        move |event| events.borrow_mut().push(event.clone())
    }

    pub fn events(&self) -> Vec<GestureEvent> {
        self.events.borrow().clone()
    }

    pub fn types(&self) -> Vec<GestureType> {
        gesture_types(&self.events.borrow())
    }

    pub fn count(&self, gesture_type: GestureType) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.gesture_type() == gesture_type)
            .count()
    }

    pub fn last(&self) -> Option<GestureEvent> {
        self.events.borrow().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

pub fn gesture_types(events: &[GestureEvent]) -> Vec<GestureType> {
    events.iter().map(GestureEvent::gesture_type).collect()
}

//! Consumer registration and staged delivery.

use gestura_foundation::{GestureEvent, GestureType};
use std::fmt;

/// Receives routed gesture events. Events arrive by shared reference, so no
/// consumer can alter what a later one sees.
pub trait GestureConsumer {
    fn on_gesture(&mut self, event: &GestureEvent);
}

impl<F> GestureConsumer for F
where
    F: FnMut(&GestureEvent),
{
    fn on_gesture(&mut self, event: &GestureEvent) {
        self(event)
    }
}

/// Delivery stage of a full-stream consumer. Stages run in declaration
/// order for every routed event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConsumerRole {
    /// Camera orbit, zoom and pan.
    Navigation,
    /// Selection and object manipulation.
    Manipulation,
    Education,
    Telemetry,
}

impl ConsumerRole {
    pub const ALL: [ConsumerRole; 4] = [
        ConsumerRole::Navigation,
        ConsumerRole::Manipulation,
        ConsumerRole::Education,
        ConsumerRole::Telemetry,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConsumerRole::Navigation => "navigation",
            ConsumerRole::Manipulation => "manipulation",
            ConsumerRole::Education => "education",
            ConsumerRole::Telemetry => "telemetry",
        }
    }
}

/// Handle returned by every registration, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Interest {
    Role(ConsumerRole),
    Type(GestureType),
    Processed,
}

struct Entry {
    id: ListenerId,
    interest: Interest,
    consumer: Box<dyn GestureConsumer>,
}

#[derive(Default)]
pub(crate) struct ConsumerRegistry {
    next_id: u64,
    entries: Vec<Entry>,
}

impl ConsumerRegistry {
    pub fn register(
        &mut self,
        interest: Interest,
        consumer: Box<dyn GestureConsumer>,
    ) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.entries.push(Entry {
            id,
            interest,
            consumer,
        });
        id
    }

    pub fn unregister(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Delivers `event` to every consumer registered for `interest`, in
    /// registration order.
    pub fn deliver(&mut self, interest: Interest, event: &GestureEvent) {
        for entry in self
            .entries
            .iter_mut()
            .filter(|entry| entry.interest == interest)
        {
            entry.consumer.on_gesture(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gestura_testing::{sample_event, RecordingConsumer};

    #[test]
    fn delivers_only_to_matching_interest() {
        let mut registry = ConsumerRegistry::default();
        let navigation = RecordingConsumer::new();
        let taps = RecordingConsumer::new();
        registry.register(
            Interest::Role(ConsumerRole::Navigation),
            Box::new(navigation.sink()),
        );
        registry.register(Interest::Type(GestureType::Tap), Box::new(taps.sink()));

        let pan = sample_event(GestureType::Pan, 0);
        registry.deliver(Interest::Role(ConsumerRole::Navigation), &pan);
        registry.deliver(Interest::Type(GestureType::Pan), &pan);

        assert_eq!(navigation.count(GestureType::Pan), 1);
        assert!(taps.is_empty());
    }

    #[test]
    fn unregister_removes_once() {
        let mut registry = ConsumerRegistry::default();
        let id = registry.register(Interest::Processed, Box::new(|_: &GestureEvent| {}));
        assert_eq!(registry.len(), 1);
        assert!(registry.unregister(id));
        assert!(!registry.unregister(id));
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn ids_are_never_reused() {
        let mut registry = ConsumerRegistry::default();
        let first = registry.register(Interest::Processed, Box::new(|_: &GestureEvent| {}));
        registry.clear();
        let second = registry.register(Interest::Processed, Box::new(|_: &GestureEvent| {}));
        assert_ne!(first, second);
    }
}

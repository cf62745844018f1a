//! Bounded, debounced gesture queue.

use gestura_core::Millis;
use gestura_foundation::{GestureEvent, OverflowPolicy};
use std::collections::VecDeque;

/// What [`GestureQueue::push`] did with an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueueOutcome {
    Enqueued,
    /// A queued event of the same type within the debounce window was
    /// replaced in place.
    Replaced,
    /// The queue was full and the incoming event was refused.
    Rejected,
    /// The queue was full and the oldest entry made room.
    EvictedOldest,
}

#[derive(Clone, Debug)]
pub struct GestureQueue {
    events: VecDeque<GestureEvent>,
    capacity: usize,
    debounce: Millis,
    overflow: OverflowPolicy,
}

impl GestureQueue {
    pub fn new(capacity: usize, debounce: Millis, overflow: OverflowPolicy) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            debounce,
            overflow,
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn configure(&mut self, capacity: usize, debounce: Millis, overflow: OverflowPolicy) {
        self.capacity = capacity.max(1);
        self.debounce = debounce;
        self.overflow = overflow;
        while self.events.len() > self.capacity {
            self.events.pop_front();
        }
    }

    pub fn push(&mut self, event: GestureEvent) -> QueueOutcome {
        let gesture_type = event.gesture_type();
        let debounce = self.debounce;
        if let Some(slot) = self.events.iter_mut().find(|queued| {
            queued.gesture_type() == gesture_type
                && queued.timestamp.abs_diff(event.timestamp) < debounce
        }) {
            *slot = event;
            return QueueOutcome::Replaced;
        }

        if self.events.len() < self.capacity {
            self.events.push_back(event);
            return QueueOutcome::Enqueued;
        }
        match self.overflow {
            OverflowPolicy::RejectNewest => QueueOutcome::Rejected,
            OverflowPolicy::DropOldest => {
                self.events.pop_front();
                self.events.push_back(event);
                QueueOutcome::EvictedOldest
            }
        }
    }

    /// Empties the queue, yielding events in queue order.
    pub fn take_all(&mut self) -> impl Iterator<Item = GestureEvent> + '_ {
        self.events.drain(..)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GestureEvent> {
        self.events.iter()
    }

    pub fn reserve(&mut self) {
        self.events
            .reserve(self.capacity.saturating_sub(self.events.len()));
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

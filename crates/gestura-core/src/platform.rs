//! Clock abstraction for the gesture layer.
//!
//! Input samples carry their own timestamps; the clock is only consulted for
//! work that happens without an input sample (governor drains, stale-cluster
//! sweeps, momentum frames). Both must share one timeline.

use crate::Millis;
use std::cell::Cell;
use std::rc::Rc;
use web_time::Instant;

/// Provides the current time in milliseconds.
pub trait Clock {
    fn now_millis(&self) -> Millis;

    /// Milliseconds elapsed since `since`, saturating at zero.
    fn elapsed_millis(&self, since: Millis) -> Millis {
        self.now_millis().saturating_sub(since)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> Millis {
        (**self).now_millis()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now_millis(&self) -> Millis {
        (**self).now_millis()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now_millis(&self) -> Millis {
        (**self).now_millis()
    }
}

/// Wall clock measured from the moment the clock was created.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> Millis {
        self.origin.elapsed().as_millis() as Millis
    }
}

/// Hand-driven clock. Clones share the same time cell, so a test can keep one
/// handle while the session owns another.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<Millis>>,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, now: Millis) {
        if now < self.now.get() {
            log::warn!(
                "ManualClock moved backwards from {} to {}",
                self.now.get(),
                now
            );
        }
        self.now.set(now);
    }

    pub fn advance(&self, by: Millis) -> Millis {
        let next = self.now.get().saturating_add(by);
        self.now.set(next);
        next
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> Millis {
        self.now.get()
    }
}

#[cfg(test)]
#[path = "tests/platform_tests.rs"]
mod tests;

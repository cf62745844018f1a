use crate::Millis;

/// Fixed-interval task gate polled from the host's timer callback.
///
/// The first poll is always due. Afterwards a poll is due once `interval`
/// milliseconds have passed since the last due poll. Polling never blocks and
/// never catches up on missed intervals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntervalSchedule {
    interval: Millis,
    last: Option<Millis>,
}

impl IntervalSchedule {
    pub const fn new(interval: Millis) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn interval(&self) -> Millis {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Millis) {
        self.interval = interval;
    }

    /// Returns `true` and records `now` when the task should run.
    pub fn poll(&mut self, now: Millis) -> bool {
        match self.last {
            Some(last) if now.saturating_sub(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    pub fn last_run(&self) -> Option<Millis> {
        self.last
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_poll_is_due_then_waits_for_interval() {
        let mut schedule = IntervalSchedule::new(16);
        assert!(schedule.poll(100));
        assert!(!schedule.poll(110));
        assert!(schedule.poll(116));
        assert_eq!(schedule.last_run(), Some(116));
    }

    #[test]
    fn reset_makes_next_poll_due() {
        let mut schedule = IntervalSchedule::new(5_000);
        assert!(schedule.poll(0));
        schedule.reset();
        assert!(schedule.poll(1));
    }
}

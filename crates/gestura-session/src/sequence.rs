//! Multi-step gesture sequences.
//!
//! A [`GestureSequence`] is an ordered list of steps, each a gesture type plus
//! [`Condition`]s over the matching event. The [`SequenceTracker`] follows
//! every registered sequence at once: a matching event advances a sequence,
//! non-matching events are ignored, and a gap longer than the step timeout
//! sends the sequence back to its first step.

use gestura_core::Millis;
use gestura_foundation::{GestureEvent, GestureType};
use smallvec::SmallVec;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConditionKind {
    /// `state.duration` in milliseconds.
    Duration,
    /// Length of the payload translation, zero when there is none.
    Distance,
    /// Speed of the payload velocity in px/ms, zero when there is none.
    Velocity,
    Pressure,
    /// Reported contact count, one when unknown.
    FingerCount,
}

impl ConditionKind {
    pub fn measure(self, event: &GestureEvent) -> f32 {
        let data = &event.data;
        match self {
            ConditionKind::Duration => event.state.duration as f32,
            ConditionKind::Distance => data.translation().map_or(0.0, |t| t.length()),
            ConditionKind::Velocity => data.velocity().map_or(0.0, |v| v.length()),
            ConditionKind::Pressure => data.pressure().unwrap_or(0.0),
            ConditionKind::FingerCount => {
                data.touch_count().filter(|&count| count > 0).unwrap_or(1) as f32
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConditionKind::Duration => "duration",
            ConditionKind::Distance => "distance",
            ConditionKind::Velocity => "velocity",
            ConditionKind::Pressure => "pressure",
            ConditionKind::FingerCount => "finger-count",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Comparison {
    Greater(f32),
    Less(f32),
    Equal { value: f32, tolerance: f32 },
    /// Inclusive on both ends.
    Between(f32, f32),
}

impl Comparison {
    pub fn holds(self, measured: f32) -> bool {
        match self {
            Comparison::Greater(value) => measured > value,
            Comparison::Less(value) => measured < value,
            Comparison::Equal { value, tolerance } => (measured - value).abs() <= tolerance,
            Comparison::Between(min, max) => measured >= min && measured <= max,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Condition {
    pub kind: ConditionKind,
    pub comparison: Comparison,
}

impl Condition {
    pub fn new(kind: ConditionKind, comparison: Comparison) -> Self {
        Self { kind, comparison }
    }

    pub fn matches(&self, event: &GestureEvent) -> bool {
        self.comparison.holds(self.kind.measure(event))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SequenceStep {
    pub gesture_type: GestureType,
    pub conditions: SmallVec<[Condition; 2]>,
    /// Overrides the sequence timeout for the wait before this step.
    pub timeout_ms: Option<Millis>,
}

impl SequenceStep {
    pub fn new(gesture_type: GestureType) -> Self {
        Self {
            gesture_type,
            conditions: SmallVec::new(),
            timeout_ms: None,
        }
    }

    pub fn when(mut self, kind: ConditionKind, comparison: Comparison) -> Self {
        self.conditions.push(Condition::new(kind, comparison));
        self
    }

    pub fn within(mut self, timeout_ms: Millis) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn matches(&self, event: &GestureEvent) -> bool {
        event.gesture_type() == self.gesture_type
            && self.conditions.iter().all(|condition| condition.matches(event))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GestureSequence {
    pub name: String,
    pub steps: Vec<SequenceStep>,
    /// Longest allowed gap between two consecutive steps.
    pub timeout_ms: Millis,
    /// Starts over after completing instead of retiring.
    pub repeatable: bool,
}

impl GestureSequence {
    pub fn new(name: impl Into<String>, timeout_ms: Millis) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
            timeout_ms,
            repeatable: false,
        }
    }

    pub fn step(mut self, step: SequenceStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn repeatable(mut self, repeatable: bool) -> Self {
        self.repeatable = repeatable;
        self
    }

    fn timeout_before(&self, step: usize) -> Millis {
        self.steps
            .get(step)
            .and_then(|step| step.timeout_ms)
            .unwrap_or(self.timeout_ms)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceOutcome {
    /// `completed` of `total` steps are done.
    Progressed { completed: usize, total: usize },
    Completed,
    TimedOut { completed: usize },
}

impl fmt::Display for SequenceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceOutcome::Progressed { completed, total } => {
                write!(f, "progressed {completed}/{total}")
            }
            SequenceOutcome::Completed => f.write_str("completed"),
            SequenceOutcome::TimedOut { completed } => {
                write!(f, "timed out after {completed} steps")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SequenceUpdate {
    pub name: String,
    pub outcome: SequenceOutcome,
    /// Type of the step that was just satisfied, if any.
    pub matched: Option<GestureType>,
}

#[derive(Debug)]
struct Progress {
    sequence: GestureSequence,
    next_step: usize,
    last_step_at: Millis,
    retired: bool,
}

impl Progress {
    fn expired(&self, now: Millis) -> bool {
        self.next_step > 0
            && now.saturating_sub(self.last_step_at) > self.sequence.timeout_before(self.next_step)
    }

    fn time_out(&mut self) -> SequenceUpdate {
        let completed = self.next_step;
        self.next_step = 0;
        log::debug!(
            "gesture sequence `{}` timed out after {completed} steps",
            self.sequence.name
        );
        SequenceUpdate {
            name: self.sequence.name.clone(),
            outcome: SequenceOutcome::TimedOut { completed },
            matched: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct SequenceTracker {
    sequences: Vec<Progress>,
}

impl SequenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking `sequence`, replacing any sequence with the same name.
    /// Sequences without steps are ignored.
    pub fn register(&mut self, sequence: GestureSequence) -> bool {
        if sequence.steps.is_empty() {
            log::warn!("gesture sequence `{}` has no steps", sequence.name);
            return false;
        }
        self.remove(&sequence.name);
        self.sequences.push(Progress {
            sequence,
            next_step: 0,
            last_step_at: 0,
            retired: false,
        });
        true
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.sequences.len();
        self.sequences
            .retain(|progress| progress.sequence.name != name);
        self.sequences.len() != before
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Steps completed so far by the sequence called `name`.
    pub fn progress(&self, name: &str) -> Option<usize> {
        self.sequences
            .iter()
            .find(|progress| progress.sequence.name == name)
            .map(|progress| progress.next_step)
    }

    pub fn is_retired(&self, name: &str) -> bool {
        self.sequences
            .iter()
            .any(|progress| progress.sequence.name == name && progress.retired)
    }

    /// Feeds one routed event to every live sequence.
    pub fn observe(&mut self, event: &GestureEvent) -> Vec<SequenceUpdate> {
        let mut updates = Vec::new();
        for progress in self.sequences.iter_mut().filter(|p| !p.retired) {
            if progress.expired(event.timestamp) {
                updates.push(progress.time_out());
            }
            let step = progress.next_step;
            let Some(expected) = progress.sequence.steps.get(step) else {
                continue;
            };
            if !expected.matches(event) {
                continue;
            }
            progress.next_step += 1;
            progress.last_step_at = event.timestamp;
            let total = progress.sequence.steps.len();
            let outcome = if progress.next_step == total {
                progress.next_step = 0;
                progress.retired = !progress.sequence.repeatable;
                log::debug!("gesture sequence `{}` completed", progress.sequence.name);
                SequenceOutcome::Completed
            } else {
                SequenceOutcome::Progressed {
                    completed: progress.next_step,
                    total,
                }
            };
            updates.push(SequenceUpdate {
                name: progress.sequence.name.clone(),
                outcome,
                matched: Some(expected.gesture_type),
            });
        }
        updates
    }

    /// Times out sequences that have waited too long for their next step.
    pub fn expire(&mut self, now: Millis) -> Vec<SequenceUpdate> {
        self.sequences
            .iter_mut()
            .filter(|progress| !progress.retired && progress.expired(now))
            .map(Progress::time_out)
            .collect()
    }

    /// Sends every sequence back to its first step and revives retired ones.
    pub fn reset(&mut self) {
        for progress in &mut self.sequences {
            progress.next_step = 0;
            progress.retired = false;
        }
    }

    pub fn clear(&mut self) {
        self.sequences.clear();
    }
}

#[cfg(test)]
#[path = "tests/sequence_tests.rs"]
mod tests;

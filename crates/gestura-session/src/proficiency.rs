//! Per-gesture proficiency estimates.
//!
//! Every routed event contributes an accuracy sample. Proficiency only moves
//! when [`ProficiencyTracker::update`] is called, which the session does
//! whenever an event satisfies a gesture sequence step.

use gestura_core::collections::map::HashMap;
use gestura_foundation::{GestureEvent, GestureType};
use std::collections::VecDeque;

const SAMPLE_LIMIT: usize = 50;
const RECENT_SAMPLES: usize = 10;
const SMOOTHING: f32 = 0.3;
const SLOW_GESTURE_MS: u64 = 1_000;
const FAST_HORIZONTAL_VELOCITY: f32 = 5.0;
const PRECISE_RADIUS: f32 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProficiencyLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl ProficiencyLevel {
    pub fn from_score(score: f32) -> Self {
        if score < 0.3 {
            ProficiencyLevel::Beginner
        } else if score < 0.6 {
            ProficiencyLevel::Intermediate
        } else if score < 0.8 {
            ProficiencyLevel::Advanced
        } else {
            ProficiencyLevel::Expert
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProficiencyLevel::Beginner => "beginner",
            ProficiencyLevel::Intermediate => "intermediate",
            ProficiencyLevel::Advanced => "advanced",
            ProficiencyLevel::Expert => "expert",
        }
    }
}

/// Quality of a single event in `[0, 1]`.
pub fn gesture_accuracy(event: &GestureEvent) -> f32 {
    let mut accuracy = 1.0f32;
    let holds = matches!(
        event.gesture_type(),
        GestureType::LongPress | GestureType::PressureHold
    );
    if !holds && event.state.duration > SLOW_GESTURE_MS {
        accuracy -= 0.1;
    }
    if event
        .data
        .velocity()
        .is_some_and(|v| v.x.abs() > FAST_HORIZONTAL_VELOCITY)
    {
        accuracy -= 0.1;
    }
    if event.data.center().length() < PRECISE_RADIUS {
        accuracy += 0.1;
    }
    accuracy.clamp(0.0, 1.0)
}

#[derive(Clone, Debug, Default)]
pub struct ProficiencyTracker {
    samples: HashMap<GestureType, VecDeque<f32>>,
    scores: HashMap<GestureType, f32>,
}

impl ProficiencyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the accuracy of `event` and returns it.
    pub fn record(&mut self, event: &GestureEvent) -> f32 {
        let accuracy = gesture_accuracy(event);
        let samples = self.samples.entry(event.gesture_type()).or_default();
        samples.push_back(accuracy);
        while samples.len() > SAMPLE_LIMIT {
            samples.pop_front();
        }
        accuracy
    }

    /// Folds the recent accuracy of `gesture_type` into its proficiency.
    /// Returns the new score, or `None` if the type was never used.
    pub fn update(&mut self, gesture_type: GestureType) -> Option<f32> {
        let samples = self.samples.get(&gesture_type)?;
        if samples.is_empty() {
            return None;
        }
        let recent = samples.len().min(RECENT_SAMPLES);
        let mean = samples.iter().rev().take(recent).sum::<f32>() / recent as f32;
        let previous = self.proficiency(gesture_type);
        let score = (previous * (1.0 - SMOOTHING) + mean * SMOOTHING).clamp(0.0, 1.0);
        self.scores.insert(gesture_type, score);
        Some(score)
    }

    pub fn proficiency(&self, gesture_type: GestureType) -> f32 {
        self.scores.get(&gesture_type).copied().unwrap_or(0.0)
    }

    pub fn level(&self, gesture_type: GestureType) -> ProficiencyLevel {
        ProficiencyLevel::from_score(self.proficiency(gesture_type))
    }

    /// Mean proficiency over every type that has a score.
    pub fn average(&self) -> f32 {
        if self.scores.is_empty() {
            return 0.0;
        }
        self.scores.values().sum::<f32>() / self.scores.len() as f32
    }

    pub fn uses(&self, gesture_type: GestureType) -> usize {
        self.samples.get(&gesture_type).map_or(0, VecDeque::len)
    }

    pub fn total_uses(&self) -> usize {
        self.samples.values().map(VecDeque::len).sum()
    }

    pub fn reset(&mut self) {
        self.samples.clear();
        self.scores.clear();
    }
}

#[cfg(test)]
#[path = "tests/proficiency_tests.rs"]
mod tests;

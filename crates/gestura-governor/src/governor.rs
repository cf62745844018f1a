use crate::presets::{device_preset, PerformanceLevel};
use crate::queue::{GestureQueue, QueueOutcome};
use crate::stats::{PerformanceStats, StatsInputs, NOMINAL_FRAME_TIME_MS};
use crate::window::SampleWindow;
use gestura_core::{IntervalSchedule, Millis};
use gestura_foundation::{
    ConfigError, GestureEvent, PerformanceConfig, PerformanceConfigPatch, QualityTier,
};
use gestura_platform::DeviceTier;
use std::collections::VecDeque;

const FRAME_WINDOW: usize = 60;
const MEMORY_WINDOW: usize = 30;
const STABILITY_WINDOW: usize = 10;
const CUSTOM_METRIC_LIMIT: usize = 100;
/// Average frame time above which the renderer is asked to shed quality.
pub const REDUCE_QUALITY_ABOVE_MS: f32 = 20.0;
/// Average frame time below which the renderer may raise quality again.
pub const INCREASE_QUALITY_BELOW_MS: f32 = 12.0;
/// Fraction of the memory limit that triggers a cleanup pass.
pub const MEMORY_HIGH_WATER: f64 = 0.8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderSuggestion {
    ReduceShadowQuality,
    DisablePostProcessing,
    LowerParticleCount,
    SimplifyMaterials,
    EnableShadows,
    IncreaseTextureResolution,
    EnablePostProcessing,
}

impl RenderSuggestion {
    pub const REDUCE: [RenderSuggestion; 4] = [
        RenderSuggestion::ReduceShadowQuality,
        RenderSuggestion::DisablePostProcessing,
        RenderSuggestion::LowerParticleCount,
        RenderSuggestion::SimplifyMaterials,
    ];
    pub const INCREASE: [RenderSuggestion; 3] = [
        RenderSuggestion::EnableShadows,
        RenderSuggestion::IncreaseTextureResolution,
        RenderSuggestion::EnablePostProcessing,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RenderSuggestion::ReduceShadowQuality => "reduce-shadow-quality",
            RenderSuggestion::DisablePostProcessing => "disable-post-processing",
            RenderSuggestion::LowerParticleCount => "lower-particle-count",
            RenderSuggestion::SimplifyMaterials => "simplify-materials",
            RenderSuggestion::EnableShadows => "enable-shadows",
            RenderSuggestion::IncreaseTextureResolution => "increase-texture-resolution",
            RenderSuggestion::EnablePostProcessing => "enable-post-processing",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QualityDirection {
    Reduce,
    Increase,
}

impl QualityDirection {
    pub fn suggestions(self) -> &'static [RenderSuggestion] {
        match self {
            QualityDirection::Reduce => &RenderSuggestion::REDUCE,
            QualityDirection::Increase => &RenderSuggestion::INCREASE,
        }
    }
}

/// Notifications for the renderer, collected until the host takes them.
#[derive(Clone, Debug, PartialEq)]
pub enum GovernorSignal {
    Quality {
        direction: QualityDirection,
        average_frame_time: f32,
        /// Tier after the adjustment; unchanged when adaptive quality is off.
        tier: QualityTier,
    },
    MemoryCleanup {
        timestamp: Millis,
        used_bytes: u64,
    },
}

/// Result of one drain tick.
#[derive(Clone, Debug, Default)]
pub struct Drain {
    /// Events to route, in queue order.
    pub delivered: Vec<GestureEvent>,
    /// Low-priority events dropped because the renderer was over budget.
    pub discarded: usize,
    pub conservative: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CustomMetric {
    pub name: String,
    pub value: f64,
    pub timestamp: Millis,
}

/// Queue counters since construction or the last [`PerformanceGovernor::reset_history`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QueueCounters {
    pub enqueued: u64,
    pub replaced: u64,
    pub rejected: u64,
    pub evicted: u64,
    pub delivered: u64,
    pub discarded: u64,
}

/// Everything the governor has measured, for offline inspection.
#[derive(Clone, Debug, PartialEq)]
pub struct PerformanceReport {
    pub timestamp: Millis,
    pub config: PerformanceConfig,
    pub stats: PerformanceStats,
    pub frame_times: Vec<f32>,
    pub memory_samples: Vec<f64>,
    pub custom_metrics: Vec<CustomMetric>,
    pub counters: QueueCounters,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FrameBand {
    Slow,
    Nominal,
    Fast,
}

/// Frame-budget governor sitting between recognition and routing.
///
/// Events are queued as they are recognized and leave the queue on the drain
/// tick. All decisions are taken from samples the host reported earlier;
/// nothing here measures the current call.
pub struct PerformanceGovernor {
    config: PerformanceConfig,
    queue: GestureQueue,
    drain_schedule: IntervalSchedule,
    frames: SampleWindow<f32>,
    memory: SampleWindow<f64>,
    band: FrameBand,
    monitoring: bool,
    last_frame_at: Option<Millis>,
    frame_count: u64,
    custom_metrics: VecDeque<CustomMetric>,
    signals: Vec<GovernorSignal>,
    counters: QueueCounters,
}

impl PerformanceGovernor {
    pub fn new(config: PerformanceConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::warn!("invalid performance config ({err}), using defaults");
                PerformanceConfig::default()
            }
        };
        Self {
            queue: GestureQueue::new(config.max_queue_size, config.debounce_ms, config.overflow),
            drain_schedule: IntervalSchedule::new(config.throttle_ms),
            frames: SampleWindow::new(FRAME_WINDOW),
            memory: SampleWindow::new(MEMORY_WINDOW),
            band: FrameBand::Nominal,
            monitoring: false,
            last_frame_at: None,
            frame_count: 0,
            custom_metrics: VecDeque::new(),
            signals: Vec::new(),
            counters: QueueCounters::default(),
            config,
        }
    }

    pub fn config(&self) -> &PerformanceConfig {
        &self.config
    }

    /// Merges `patch` into the active configuration. Invalid patches are
    /// logged and ignored.
    pub fn update_config(&mut self, patch: &PerformanceConfigPatch) {
        let _ = self.try_update_config(patch);
    }

    pub fn try_update_config(&mut self, patch: &PerformanceConfigPatch) -> Result<(), ConfigError> {
        self.config.try_apply(patch)?;
        self.reconfigure();
        Ok(())
    }

    pub fn apply_device_preset(&mut self, tier: DeviceTier) {
        log::debug!("applying {} performance preset", tier.as_str());
        self.config.apply(&device_preset(tier));
        self.reconfigure();
    }

    pub fn adjust_for_performance_level(&mut self, level: PerformanceLevel) {
        level.retune(&mut self.config);
        log::debug!(
            "{} performance level: throttle {}ms, debounce {}ms",
            level.as_str(),
            self.config.throttle_ms,
            self.config.debounce_ms
        );
        self.reconfigure();
    }

    fn reconfigure(&mut self) {
        self.queue.configure(
            self.config.max_queue_size,
            self.config.debounce_ms,
            self.config.overflow,
        );
        self.drain_schedule.set_interval(self.config.throttle_ms);
    }

    pub fn queue(&mut self, event: GestureEvent) -> QueueOutcome {
        let gesture_type = event.gesture_type();
        let outcome = self.queue.push(event);
        match outcome {
            QueueOutcome::Enqueued => self.counters.enqueued += 1,
            QueueOutcome::Replaced => self.counters.replaced += 1,
            QueueOutcome::Rejected => {
                self.counters.rejected += 1;
                log::trace!("queue full, rejected {gesture_type}");
            }
            QueueOutcome::EvictedOldest => {
                self.counters.enqueued += 1;
                self.counters.evicted += 1;
                log::trace!("queue full, evicted oldest for {gesture_type}");
            }
        }
        outcome
    }

    pub fn queued_len(&self) -> usize {
        self.queue.len()
    }

    /// Drains the queue if the throttle interval has elapsed at `now`.
    pub fn poll_drain(&mut self, now: Millis) -> Option<Drain> {
        self.drain_schedule.poll(now).then(|| self.drain())
    }

    /// Empties the queue. While the average frame time is over budget only
    /// high-priority continuous gestures are delivered; the rest are dropped.
    pub fn drain(&mut self) -> Drain {
        if self.queue.is_empty() {
            return Drain::default();
        }
        let conservative = self.average_frame_time() > self.config.frame_budget_ms();
        let mut drain = Drain {
            conservative,
            ..Drain::default()
        };
        for event in self.queue.take_all() {
            if !conservative || event.gesture_type().is_high_priority() {
                drain.delivered.push(event);
            } else {
                drain.discarded += 1;
            }
        }
        if drain.discarded > 0 {
            log::trace!(
                "over frame budget, discarded {} low-priority events",
                drain.discarded
            );
        }
        self.counters.delivered += drain.delivered.len() as u64;
        self.counters.discarded += drain.discarded as u64;
        drain
    }

    pub fn start_monitoring(&mut self, now: Millis) {
        if !self.monitoring {
            log::debug!("performance monitoring started");
        }
        self.monitoring = true;
        self.last_frame_at = Some(now);
    }

    pub fn stop_monitoring(&mut self) {
        if self.monitoring {
            log::debug!("performance monitoring stopped");
        }
        self.monitoring = false;
        self.last_frame_at = None;
    }

    pub fn is_monitoring(&self) -> bool {
        self.monitoring
    }

    /// Frame callback timestamp. Ignored unless monitoring.
    pub fn record_frame(&mut self, now: Millis) {
        if !self.monitoring {
            return;
        }
        if let Some(last) = self.last_frame_at.replace(now) {
            if now > last {
                self.record_frame_time((now - last) as f32);
            }
        }
    }

    /// Feeds one measured frame time and re-evaluates the quality bands.
    pub fn record_frame_time(&mut self, frame_time: f32) {
        if !frame_time.is_finite() || frame_time <= 0.0 {
            return;
        }
        self.frames.push(frame_time);
        self.frame_count += 1;

        let average = self.average_frame_time();
        let band = if average > REDUCE_QUALITY_ABOVE_MS {
            FrameBand::Slow
        } else if average < INCREASE_QUALITY_BELOW_MS {
            FrameBand::Fast
        } else {
            FrameBand::Nominal
        };
        if band == self.band {
            return;
        }
        self.band = band;
        let direction = match band {
            FrameBand::Slow => QualityDirection::Reduce,
            FrameBand::Fast => QualityDirection::Increase,
            FrameBand::Nominal => return,
        };
        if self.config.adaptive_quality {
            let tier = match direction {
                QualityDirection::Reduce => self.config.quality.lower(),
                QualityDirection::Increase => self.config.quality.higher(),
            };
            if tier != self.config.quality {
                log::info!(
                    "quality {} -> {} at {:.1}ms average frame time",
                    self.config.quality.as_str(),
                    tier.as_str(),
                    average
                );
                self.config.quality = tier;
            }
        }
        self.signals.push(GovernorSignal::Quality {
            direction,
            average_frame_time: average,
            tier: self.config.quality,
        });
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn average_frame_time(&self) -> f32 {
        self.frames
            .mean()
            .map_or(NOMINAL_FRAME_TIME_MS, |mean| mean as f32)
    }

    /// Heap usage sample, where the host can observe it. Crossing the high
    /// water mark trims the histories and emits a cleanup signal.
    pub fn record_memory(&mut self, used_bytes: u64, now: Millis) {
        self.memory.push(used_bytes as f64);
        let limit = self.config.memory_limit_bytes as f64;
        if used_bytes as f64 > limit * MEMORY_HIGH_WATER {
            log::warn!(
                "memory at {used_bytes} bytes exceeds {:.0}% of {limit} byte limit, cleaning up",
                MEMORY_HIGH_WATER * 100.0
            );
            self.custom_metrics.clear();
            self.frames.retain_recent(FRAME_WINDOW / 2);
            self.memory.retain_recent(10);
            self.signals.push(GovernorSignal::MemoryCleanup {
                timestamp: now,
                used_bytes,
            });
        }
    }

    /// Builds a snapshot. `classification_ratio` is the recognizer's share of
    /// ended clusters that produced a gesture, if any ended yet.
    pub fn stats(&self, classification_ratio: Option<f32>) -> PerformanceStats {
        PerformanceStats::compute(StatsInputs {
            average_frame_time: self.average_frame_time(),
            recent_variance: self.frames.recent_variance(STABILITY_WINDOW),
            average_memory: self.memory.mean().unwrap_or(0.0),
            last_memory: self.memory.last().unwrap_or(0.0),
            classification_ratio,
        })
    }

    pub fn monitor_custom_metric(&mut self, name: impl Into<String>, value: f64, now: Millis) {
        self.custom_metrics.push_back(CustomMetric {
            name: name.into(),
            value,
            timestamp: now,
        });
        while self.custom_metrics.len() > CUSTOM_METRIC_LIMIT {
            self.custom_metrics.pop_front();
        }
    }

    pub fn custom_metrics(&self) -> impl Iterator<Item = &CustomMetric> {
        self.custom_metrics.iter()
    }

    /// Reserves queue and history storage up front.
    pub fn preallocate(&mut self) {
        self.queue.reserve();
        self.frames.reserve();
        self.memory.reserve();
        self.custom_metrics
            .reserve(CUSTOM_METRIC_LIMIT.saturating_sub(self.custom_metrics.len()));
    }

    pub fn counters(&self) -> QueueCounters {
        self.counters
    }

    pub fn take_signals(&mut self) -> Vec<GovernorSignal> {
        std::mem::take(&mut self.signals)
    }

    /// Forgets measurements and counters. Queued events are kept.
    pub fn reset_history(&mut self) {
        self.frames.clear();
        self.memory.clear();
        self.custom_metrics.clear();
        self.counters = QueueCounters::default();
        self.band = FrameBand::Nominal;
        self.frame_count = 0;
    }

    pub fn export(&self, now: Millis, classification_ratio: Option<f32>) -> PerformanceReport {
        PerformanceReport {
            timestamp: now,
            config: self.config.clone(),
            stats: self.stats(classification_ratio),
            frame_times: self.frames.to_vec(),
            memory_samples: self.memory.to_vec(),
            custom_metrics: self.custom_metrics.iter().cloned().collect(),
            counters: self.counters,
        }
    }

    /// Stops monitoring and drops queued events, history and pending signals.
    pub fn dispose(&mut self) {
        self.stop_monitoring();
        self.queue.clear();
        self.signals.clear();
        self.drain_schedule.reset();
        self.reset_history();
    }
}

impl Default for PerformanceGovernor {
    fn default() -> Self {
        Self::new(PerformanceConfig::default())
    }
}

#[cfg(test)]
#[path = "tests/governor_tests.rs"]
mod tests;

use crate::consumer::{ConsumerRegistry, ConsumerRole, GestureConsumer, Interest, ListenerId};
use crate::proficiency::ProficiencyTracker;
use crate::sequence::{GestureSequence, SequenceTracker};
use crate::signal::SessionSignal;
use crate::state::SessionState;
use gestura_animation::MomentumAnimation;
use gestura_core::{Clock, IntervalSchedule, Millis, SystemClock};
use gestura_foundation::{
    ClusterClass, ClusterKey, ConfigError, GestureConfig, GestureConfigPatch, GestureContext,
    GestureEvent, GestureType, PerformanceConfig, PerformanceConfigPatch, PointerPhase,
    PointerSample, RawInput,
};
use gestura_governor::{
    PerformanceGovernor, PerformanceLevel, PerformanceReport, PerformanceStats, QueueOutcome,
    Recommendation,
};
use gestura_platform::{ContextDetector, DeviceTier, Environment, PlatformAdapter, PlatformError};
use gestura_recognition::{ClusterPhase, ClusterSnapshot, GestureRecognizer, RecognitionStats};
use smallvec::SmallVec;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub enum SessionError {
    /// The session was disposed.
    Disposed,
    InvalidConfig(ConfigError),
    Platform(PlatformError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Disposed => f.write_str("gesture session has been disposed"),
            SessionError::InvalidConfig(err) => write!(f, "invalid configuration: {err}"),
            SessionError::Platform(err) => write!(f, "platform error: {err}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Disposed => None,
            SessionError::InvalidConfig(err) => Some(err),
            SessionError::Platform(err) => Some(err),
        }
    }
}

impl From<ConfigError> for SessionError {
    fn from(err: ConfigError) -> Self {
        SessionError::InvalidConfig(err)
    }
}

impl From<PlatformError> for SessionError {
    fn from(err: PlatformError) -> Self {
        SessionError::Platform(err)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Initialized,
    Disposed,
}

/// Single entry point of the gesture layer.
///
/// Raw input is normalized by the [`PlatformAdapter`], classified by the
/// [`GestureRecognizer`] and queued in the [`PerformanceGovernor`]. Each
/// [`tick`](Self::tick) drains the governor and routes the delivered events
/// through the registered consumers in stage order:
///
/// 1. mirrored [`SessionState`] and bounded history
/// 2. [`ConsumerRole::Navigation`]
/// 3. [`ConsumerRole::Manipulation`]
/// 4. [`ConsumerRole::Education`], proficiency and sequences
/// 5. [`ConsumerRole::Telemetry`]
/// 6. per-type subscribers
/// 7. processed listeners
///
/// Work that happens without an input sample (drains, sweeps, momentum)
/// reads the injected [`Clock`], which must share the input timeline.
pub struct GestureSession<C: Clock = SystemClock> {
    clock: C,
    lifecycle: Lifecycle,
    tier: DeviceTier,
    device_presets: bool,
    adapter: PlatformAdapter,
    base_config: GestureConfig,
    overrides: GestureConfigPatch,
    recognizer: GestureRecognizer,
    governor: PerformanceGovernor,
    momentum: MomentumAnimation,
    consumers: ConsumerRegistry,
    state: SessionState,
    history: VecDeque<GestureEvent>,
    proficiency: ProficiencyTracker,
    sequences: SequenceTracker,
    cleanup: IntervalSchedule,
    signals: Vec<SessionSignal>,
}

impl<C: Clock> GestureSession<C> {
    pub fn new(env: &Environment, clock: C) -> Self {
        Self::build(
            env,
            clock,
            GestureConfig::default(),
            PerformanceConfig::default(),
        )
    }

    /// Starts from caller-supplied base configurations. Platform strategy
    /// overrides are layered on top of `gesture`.
    pub fn with_config(
        env: &Environment,
        clock: C,
        gesture: GestureConfig,
        performance: PerformanceConfig,
    ) -> Result<Self, SessionError> {
        gesture.validate()?;
        performance.validate()?;
        Ok(Self::build(env, clock, gesture, performance))
    }

    fn build(
        env: &Environment,
        clock: C,
        base_config: GestureConfig,
        performance: PerformanceConfig,
    ) -> Self {
        let adapter = PlatformAdapter::new(env);
        let tier = ContextDetector::tier(env);
        let recognizer =
            GestureRecognizer::new(adapter.adapt(&base_config), Rc::clone(adapter.context()));
        let cleanup = IntervalSchedule::new(performance.cleanup_interval_ms);
        Self {
            clock,
            lifecycle: Lifecycle::Created,
            tier,
            device_presets: true,
            adapter,
            base_config,
            overrides: GestureConfigPatch::default(),
            recognizer,
            governor: PerformanceGovernor::new(performance),
            momentum: MomentumAnimation::default(),
            consumers: ConsumerRegistry::default(),
            state: SessionState::default(),
            history: VecDeque::new(),
            proficiency: ProficiencyTracker::new(),
            sequences: SequenceTracker::new(),
            cleanup,
            signals: Vec::new(),
        }
    }

    /// Keeps the performance configuration as supplied instead of replacing
    /// it with the detected device tier's preset on initialize.
    pub fn without_device_presets(mut self) -> Self {
        self.device_presets = false;
        self
    }

    /// Applies platform optimizations, pre-sizes buffers, applies the device
    /// preset and starts frame monitoring. Returns `Ok(false)` when the
    /// session was already initialized.
    pub fn initialize(&mut self) -> Result<bool, SessionError> {
        match self.lifecycle {
            Lifecycle::Disposed => return Err(SessionError::Disposed),
            Lifecycle::Initialized => return Ok(false),
            Lifecycle::Created => {}
        }
        let applied = self.adapter.apply_platform_optimizations();
        self.recognizer.set_config(self.effective_config());
        if self.device_presets {
            self.governor.apply_device_preset(self.tier);
            self.sync_cleanup_interval();
        }
        self.governor.preallocate();
        self.governor.start_monitoring(self.clock.now_millis());
        self.lifecycle = Lifecycle::Initialized;
        log::debug!(
            "gesture session initialized on {} with {applied} platform optimizations",
            self.tier.as_str()
        );
        self.signals.push(SessionSignal::Initialized { tier: self.tier });
        self.collect_component_signals();
        Ok(true)
    }

    /// Releases consumers, queued events and history. Later calls do
    /// nothing and return `false`.
    pub fn dispose(&mut self) -> bool {
        if self.lifecycle == Lifecycle::Disposed {
            return false;
        }
        self.momentum.cancel();
        self.governor.dispose();
        self.recognizer.reset();
        self.consumers.clear();
        self.history.clear();
        self.sequences.clear();
        self.signals.clear();
        self.adapter.take_effects();
        self.lifecycle = Lifecycle::Disposed;
        log::debug!("gesture session disposed");
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.lifecycle == Lifecycle::Initialized
    }

    pub fn is_disposed(&self) -> bool {
        self.lifecycle == Lifecycle::Disposed
    }

    /// Feeds one raw platform sample. Recognized events are queued in
    /// arrival order and routed on the next due [`tick`](Self::tick).
    /// Returns how many events the queue accepted.
    pub fn handle_input(&mut self, input: RawInput) -> usize {
        if self.is_disposed() {
            return 0;
        }
        match self.adapter.normalize(input) {
            Some(input) => self.process(input),
            None => 0,
        }
    }

    /// Pointer-event style entry point. The sample is mapped to the matching
    /// raw input first.
    pub fn handle_pointer(&mut self, sample: &PointerSample) -> usize {
        if self.is_disposed() {
            return 0;
        }
        match self.adapter.normalize_pointer(sample) {
            Some(input) => self.process(input),
            None => 0,
        }
    }

    fn process(&mut self, input: RawInput) -> usize {
        let phase = input.phase();
        if phase == Some(PointerPhase::Start) && self.momentum.cancel() {
            log::trace!("new contact cancelled momentum");
        }
        let panning: SmallVec<[ClusterSnapshot; ClusterClass::COUNT]> = self
            .recognizer
            .clusters()
            .filter(|cluster| cluster.phase == ClusterPhase::Pan)
            .collect();

        let events = self.recognizer.process(&input);

        if phase == Some(PointerPhase::End) && self.recognizer.config().pan.momentum {
            self.start_momentum(&panning, &events, input.timestamp());
        }
        let mut accepted = 0;
        for event in events {
            if self.governor.queue(event) != QueueOutcome::Rejected {
                accepted += 1;
            }
        }
        accepted
    }

    fn start_momentum(&mut self, panning: &[ClusterSnapshot], events: &[GestureEvent], now: Millis) {
        let released = panning
            .iter()
            .find(|pan| !self.recognizer.is_active(pan.key));
        let Some(released) = released else {
            return;
        };
        let velocity = events
            .iter()
            .filter(|event| event.cluster == released.key)
            .find_map(|event| match event.gesture_type() {
                GestureType::Swipe => event.data.velocity(),
                _ => None,
            })
            .unwrap_or(released.state.velocity);
        if self.momentum.start(now, velocity) {
            log::debug!("pan on {} released into momentum", released.key);
        }
    }

    /// Timer callback. Drains the governor when its throttle interval is
    /// due, routes what it delivers, runs the cleanup sweep and expires
    /// stalled sequences. Returns how many events were routed.
    pub fn tick(&mut self) -> usize {
        if self.is_disposed() {
            return 0;
        }
        let now = self.clock.now_millis();
        let mut routed = 0;
        if let Some(drain) = self.governor.poll_drain(now) {
            for event in drain.delivered {
                self.route(event);
                routed += 1;
            }
        }
        if self.cleanup.poll(now) {
            let max_idle = self.governor.config().history_window_ms;
            let evicted = self.recognizer.sweep_stale(now, max_idle);
            if evicted > 0 {
                self.signals.push(SessionSignal::ClustersEvicted(evicted));
            }
        }
        for update in self.sequences.expire(now) {
            self.signals.push(SessionSignal::Sequence(update));
        }
        self.collect_component_signals();
        routed
    }

    fn route(&mut self, event: GestureEvent) {
        self.state.mirror(&event);

        let limit = self.governor.config().max_gesture_history;
        if limit > 0 {
            while self.history.len() >= limit {
                self.history.pop_front();
            }
            self.history.push_back(event.clone());
        }

        self.consumers
            .deliver(Interest::Role(ConsumerRole::Navigation), &event);
        self.consumers
            .deliver(Interest::Role(ConsumerRole::Manipulation), &event);

        self.proficiency.record(&event);
        for update in self.sequences.observe(&event) {
            if let Some(gesture_type) = update.matched {
                if let Some(proficiency) = self.proficiency.update(gesture_type) {
                    self.signals.push(SessionSignal::Proficiency {
                        gesture_type,
                        proficiency,
                        level: self.proficiency.level(gesture_type),
                    });
                }
            }
            self.signals.push(SessionSignal::Sequence(update));
        }
        self.consumers
            .deliver(Interest::Role(ConsumerRole::Education), &event);
        self.consumers
            .deliver(Interest::Role(ConsumerRole::Telemetry), &event);
        self.consumers
            .deliver(Interest::Type(event.gesture_type()), &event);
        self.consumers.deliver(Interest::Processed, &event);
    }

    /// Registers a full-stream consumer for one routing stage.
    pub fn subscribe(
        &mut self,
        role: ConsumerRole,
        consumer: impl GestureConsumer + 'static,
    ) -> ListenerId {
        self.consumers.register(Interest::Role(role), Box::new(consumer))
    }

    /// Registers a consumer for one gesture type only.
    pub fn subscribe_type(
        &mut self,
        gesture_type: GestureType,
        consumer: impl GestureConsumer + 'static,
    ) -> ListenerId {
        self.consumers
            .register(Interest::Type(gesture_type), Box::new(consumer))
    }

    /// Notified last, once every other stage has seen the event.
    pub fn on_processed(&mut self, consumer: impl GestureConsumer + 'static) -> ListenerId {
        self.consumers.register(Interest::Processed, Box::new(consumer))
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.consumers.unregister(id)
    }

    pub fn listener_count(&self) -> usize {
        self.consumers.len()
    }

    /// Animation frame callback. Feeds frame timing to the governor and
    /// advances momentum, queuing a [`SessionSignal::Momentum`] per frame.
    /// Returns whether momentum is still running.
    pub fn on_animation_frame(&mut self, now: Millis) -> bool {
        if self.is_disposed() {
            return false;
        }
        self.governor.record_frame(now);
        if let Some(frame) = self.momentum.on_frame(now) {
            self.signals.push(SessionSignal::Momentum(frame));
        }
        self.collect_component_signals();
        self.momentum.is_running()
    }

    /// Stops a running momentum continuation. Returns whether one was
    /// running.
    pub fn cancel_momentum(&mut self) -> bool {
        self.momentum.cancel()
    }

    pub fn is_momentum_running(&self) -> bool {
        self.momentum.is_running()
    }

    /// Re-detects the context, re-adapts thresholds and hands future events
    /// the new context. Active clusters keep running.
    pub fn on_environment_change(&mut self, env: &Environment) {
        if self.is_disposed() {
            return;
        }
        self.adapter.refresh(env);
        let tier = ContextDetector::tier(env);
        if self.is_initialized() {
            self.adapter.apply_platform_optimizations();
            if self.device_presets && tier != self.tier {
                self.governor.apply_device_preset(tier);
                self.sync_cleanup_interval();
            }
        }
        self.tier = tier;
        self.recognizer.set_config(self.effective_config());
        let context = Rc::clone(self.adapter.context());
        self.recognizer.set_context(Rc::clone(&context));
        log::debug!(
            "gesture context changed to {}-{}",
            context.device_type.as_str(),
            context.platform.as_str()
        );
        self.signals.push(SessionSignal::ContextChanged(context));
        self.collect_component_signals();
    }

    fn effective_config(&self) -> GestureConfig {
        self.adapter.adapt(&self.base_config).merged(&self.overrides)
    }

    /// Merges `patch` into the active thresholds. The patch survives later
    /// re-adaptation. On error nothing changes.
    pub fn update_gesture_config(&mut self, patch: &GestureConfigPatch) -> Result<(), SessionError> {
        let mut overrides = self.overrides.clone();
        overrides.merge(patch);
        let candidate = self.adapter.adapt(&self.base_config).merged(&overrides);
        if let Err(err) = candidate.validate() {
            log::warn!("rejected gesture config patch: {err}");
            return Err(err.into());
        }
        self.overrides = overrides;
        self.recognizer.set_config(candidate);
        Ok(())
    }

    pub fn update_performance_config(
        &mut self,
        patch: &PerformanceConfigPatch,
    ) -> Result<(), SessionError> {
        self.governor.try_update_config(patch)?;
        self.sync_cleanup_interval();
        Ok(())
    }

    fn sync_cleanup_interval(&mut self) {
        let interval = self.governor.config().cleanup_interval_ms;
        self.cleanup.set_interval(interval);
    }

    pub fn adjust_for_performance_level(&mut self, level: PerformanceLevel) {
        self.governor.adjust_for_performance_level(level);
    }

    /// Applies one platform optimization by name.
    pub fn apply_optimization(&mut self, name: &str) -> Result<bool, SessionError> {
        let applied = self.adapter.apply_optimization_named(name)?;
        if applied {
            self.recognizer.set_config(self.effective_config());
            self.collect_component_signals();
        }
        Ok(applied)
    }

    pub fn record_memory(&mut self, used_bytes: u64) {
        let now = self.clock.now_millis();
        self.governor.record_memory(used_bytes, now);
        self.collect_component_signals();
    }

    pub fn monitor_custom_metric(&mut self, name: impl Into<String>, value: f64) {
        let now = self.clock.now_millis();
        self.governor.monitor_custom_metric(name, value, now);
    }

    pub fn register_sequence(&mut self, sequence: GestureSequence) -> bool {
        self.sequences.register(sequence)
    }

    pub fn remove_sequence(&mut self, name: &str) -> bool {
        self.sequences.remove(name)
    }

    pub fn sequence_progress(&self, name: &str) -> Option<usize> {
        self.sequences.progress(name)
    }

    /// Drains the outbox: session signals, platform effects and governor
    /// signals in the order they were raised.
    pub fn take_signals(&mut self) -> Vec<SessionSignal> {
        self.collect_component_signals();
        std::mem::take(&mut self.signals)
    }

    fn collect_component_signals(&mut self) {
        self.signals.extend(
            self.adapter
                .take_effects()
                .into_iter()
                .map(SessionSignal::Platform),
        );
        self.signals.extend(
            self.governor
                .take_signals()
                .into_iter()
                .map(SessionSignal::Governor),
        );
    }

    pub fn supports(&self, feature: &str) -> bool {
        self.adapter.supports(feature)
    }

    pub fn context(&self) -> &Rc<GestureContext> {
        self.adapter.context()
    }

    pub fn tier(&self) -> DeviceTier {
        self.tier
    }

    pub fn config(&self) -> &GestureConfig {
        self.recognizer.config()
    }

    pub fn performance_config(&self) -> &PerformanceConfig {
        self.governor.config()
    }

    pub fn performance_stats(&self) -> PerformanceStats {
        self.governor.stats(self.recognizer.stats().classification_ratio())
    }

    pub fn recommendations(&self) -> Vec<Recommendation> {
        self.performance_stats().recommendations()
    }

    pub fn export_performance(&self) -> PerformanceReport {
        self.governor.export(
            self.clock.now_millis(),
            self.recognizer.stats().classification_ratio(),
        )
    }

    pub fn recognition_stats(&self) -> RecognitionStats {
        self.recognizer.stats()
    }

    pub fn active_clusters(&self) -> Vec<ClusterSnapshot> {
        self.recognizer.active_clusters()
    }

    pub fn is_cluster_active(&self, key: ClusterKey) -> bool {
        self.recognizer.is_active(key)
    }

    pub fn queued_len(&self) -> usize {
        self.governor.queued_len()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Most recently routed events, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &GestureEvent> {
        self.history.iter()
    }

    pub fn proficiency(&self) -> &ProficiencyTracker {
        &self.proficiency
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;

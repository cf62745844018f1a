use crate::cluster::{Cluster, ClusterSample};
use crate::contacts::ContactTable;
use crate::criteria::{classify, DiscreteGesture};
use gestura_core::Millis;
use gestura_foundation::gesture_constants::{
    WHEEL_NOTCH_MILLIS, WHEEL_ZOOM_IN_SCALE, WHEEL_ZOOM_OUT_SCALE,
};
use gestura_foundation::{
    ClusterClass, ClusterKey, ConfigError, GestureConfig, GestureConfigPatch, GestureContext,
    GestureData, GestureEvent, GestureState, MouseSample, PointerId, PointerPhase, RawInput,
    StylusSample, Tilt, TouchFrame, TouchPoint, Touches, WheelSample,
};
use gestura_geometry::Point;
use std::rc::Rc;

pub use crate::cluster::ClusterPhase;

/// Pointer id reported for the mouse in emitted touch lists.
pub const MOUSE_POINTER_ID: PointerId = 0;

const TOUCH: usize = ClusterClass::Touch as usize;
const MOUSE: usize = ClusterClass::Mouse as usize;
const STYLUS: usize = ClusterClass::Stylus as usize;

/// Counters kept across the recognizer's lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecognitionStats {
    pub clusters_started: u64,
    /// Ended clusters that produced a discrete gesture or committed to a
    /// continuous one.
    pub classified: u64,
    /// Ended clusters that produced nothing.
    pub unclassified: u64,
    /// Replaced by an arity change before they could end.
    pub superseded: u64,
    /// Reclaimed by [`GestureRecognizer::sweep_stale`].
    pub evicted: u64,
    pub events_emitted: u64,
}

impl RecognitionStats {
    /// Share of ended clusters that were recognized as something.
    pub fn classification_ratio(&self) -> Option<f32> {
        let ended = self.classified + self.unclassified;
        (ended > 0).then(|| self.classified as f32 / ended as f32)
    }
}

/// Read-only view of an active cluster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClusterSnapshot {
    pub key: ClusterKey,
    pub phase: ClusterPhase,
    pub state: GestureState,
    pub origin: Point,
    pub position: Point,
    pub max_travel: f32,
}

#[derive(Clone, Copy, Debug)]
struct TapRecord {
    timestamp: Millis,
    center: Point,
}

/// Classifies normalized raw input into gesture events.
///
/// Holds at most one cluster per [`ClusterClass`]. The table is only mutated
/// through [`process`](Self::process), [`sweep_stale`](Self::sweep_stale)
/// and [`reset`](Self::reset); everything else reads snapshots.
pub struct GestureRecognizer {
    config: GestureConfig,
    context: Rc<GestureContext>,
    clusters: [Option<Cluster>; ClusterClass::COUNT],
    contacts: ContactTable,
    last_tap: Option<TapRecord>,
    hover_since: Option<Millis>,
    stats: RecognitionStats,
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig, context: Rc<GestureContext>) -> Self {
        Self {
            config,
            context,
            clusters: [None, None, None],
            contacts: ContactTable::default(),
            last_tap: None,
            hover_since: None,
            stats: RecognitionStats::default(),
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    /// Merges `patch` into the active thresholds. Active clusters pick the
    /// new values up on their next sample.
    pub fn update_config(&mut self, patch: &GestureConfigPatch) {
        self.config.apply(patch);
    }

    /// Like [`update_config`](Self::update_config) but keeps the current
    /// thresholds when the result would not validate.
    pub fn try_update_config(&mut self, patch: &GestureConfigPatch) -> Result<(), ConfigError> {
        self.config.try_apply(patch)
    }

    pub fn context(&self) -> &Rc<GestureContext> {
        &self.context
    }

    /// Replaces the context attached to future events. Active clusters keep
    /// running.
    pub fn set_context(&mut self, context: Rc<GestureContext>) {
        self.context = context;
    }

    pub fn stats(&self) -> RecognitionStats {
        self.stats
    }

    pub fn active_count(&self) -> usize {
        self.clusters.iter().flatten().count()
    }

    /// Snapshots of the active clusters, without allocating.
    pub fn clusters(&self) -> impl Iterator<Item = ClusterSnapshot> + '_ {
        self.clusters.iter().flatten().map(|cluster| ClusterSnapshot {
            key: cluster.key,
            phase: cluster.phase,
            state: cluster.state,
            origin: cluster.origin,
            position: cluster.position,
            max_travel: cluster.max_travel,
        })
    }

    pub fn active_clusters(&self) -> Vec<ClusterSnapshot> {
        self.clusters().collect()
    }

    pub fn is_active(&self, key: ClusterKey) -> bool {
        self.clusters.iter().flatten().any(|cluster| cluster.key == key)
    }

    /// Number of touch contacts currently down.
    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    /// Drops every cluster and contact without emitting anything.
    pub fn reset(&mut self) {
        self.clusters = [None, None, None];
        self.contacts.clear();
        self.last_tap = None;
        self.hover_since = None;
    }

    /// Runs one raw sample through the state machines. Events come back in
    /// the order they were recognized.
    pub fn process(&mut self, input: &RawInput) -> Vec<GestureEvent> {
        let mut out = Vec::new();
        match input {
            RawInput::Touch(frame) => self.process_touch(frame, &mut out),
            RawInput::Mouse(sample) => self.process_mouse(sample, &mut out),
            RawInput::Stylus(sample) => self.process_stylus(sample, &mut out),
            RawInput::Wheel(sample) => self.process_wheel(sample, &mut out),
        }
        self.stats.events_emitted += out.len() as u64;
        out
    }

    /// Evicts clusters and touch contacts that have not seen a sample for
    /// longer than `max_idle`. Returns how many were dropped.
    ///
    /// A contact whose lift was never reported would otherwise count towards
    /// the arity of every later touch. While a live touch cluster holds the
    /// slot only spent contacts are reclaimed, and the cluster restarts on
    /// the contacts that remain.
    pub fn sweep_stale(&mut self, now: Millis, max_idle: Millis) -> usize {
        let mut evicted = 0;
        for (class, slot) in self.clusters.iter_mut().enumerate() {
            let stale = slot
                .as_ref()
                .is_some_and(|cluster| cluster.idle_for(now) > max_idle);
            if !stale {
                continue;
            }
            if let Some(cluster) = slot.take() {
                log::warn!(
                    "evicting stale cluster {} idle for {}ms",
                    cluster.key,
                    cluster.idle_for(now)
                );
                if class == TOUCH {
                    self.contacts.clear();
                }
                evicted += 1;
            }
        }

        let live = self.clusters[TOUCH].is_some();
        let orphaned = self.contacts.evict_idle(now, max_idle, live);
        if orphaned > 0 {
            log::warn!("evicting {orphaned} touch contacts idle for over {max_idle}ms");
            if live {
                self.supersede(TOUCH);
                self.begin_touch_cluster(now);
            }
            evicted += orphaned;
        }
        self.stats.evicted += evicted as u64;
        evicted
    }

    fn process_touch(&mut self, frame: &TouchFrame, out: &mut Vec<GestureEvent>) {
        let ts = frame.timestamp;
        match frame.phase {
            PointerPhase::Start | PointerPhase::Move => {
                let before = self.contacts.len();
                let capacity = self.config.multi_touch.max_touches;
                for touch in &frame.touches {
                    if !self.contacts.upsert(touch, ts, capacity) {
                        log::trace!("ignoring contact {} above {capacity} touches", touch.id);
                    }
                }
                if self.contacts.len() > before {
                    self.supersede(TOUCH);
                    self.begin_touch_cluster(ts);
                } else {
                    self.advance_touch(ts, false, out);
                }
            }
            PointerPhase::End | PointerPhase::Cancel => {
                for touch in &frame.touches {
                    self.contacts.update(touch, ts);
                }
                let lifted = self.contacts.snapshot(ts);
                self.advance_touch(ts, true, out);

                let before = self.contacts.len();
                for touch in &frame.touches {
                    self.contacts.remove(touch.id);
                }
                if self.contacts.len() == before {
                    return;
                }
                if self.contacts.is_empty() {
                    let completed = frame.phase == PointerPhase::End;
                    if let Some(cluster) = self.clusters[TOUCH].take() {
                        self.finish(cluster, ts, completed, lifted, out);
                    }
                } else {
                    // Lifting some fingers ends the cluster; the rest are spent.
                    if let Some(mut cluster) = self.clusters[TOUCH].take() {
                        log::debug!("{} ended by arity drop", cluster.key);
                        cluster.state.finish(ts);
                        self.count_ended(&cluster, false);
                    }
                    self.contacts.mark_all_spent();
                }
            }
        }
    }

    fn begin_touch_cluster(&mut self, ts: Millis) {
        if self.contacts.all_spent() {
            return;
        }
        let Some(first) = self.contacts.first_id() else {
            return;
        };
        let Some(key) = ClusterKey::for_touch_arity(self.contacts.len(), first) else {
            return;
        };
        let sample = self.touch_sample(ts, false);
        self.start(TOUCH, Cluster::begin(key, &sample));
    }

    fn touch_sample(&self, ts: Millis, lifting: bool) -> ClusterSample {
        ClusterSample {
            timestamp: ts,
            position: self.contacts.centroid(),
            pressure: self.config.pressure.map(self.contacts.mean_pressure()),
            pair: self.contacts.pair(),
            tilt: Tilt::default(),
            lifting,
        }
    }

    fn advance_touch(&mut self, ts: Millis, lifting: bool, out: &mut Vec<GestureEvent>) {
        if self.clusters[TOUCH].is_none() {
            return;
        }
        let sample = self.touch_sample(ts, lifting);
        let touches = self.contacts.snapshot(ts);
        self.advance(TOUCH, &sample, &touches, out);
    }

    fn process_mouse(&mut self, sample: &MouseSample, out: &mut Vec<GestureEvent>) {
        let ts = sample.timestamp;
        let cluster_sample = ClusterSample {
            timestamp: ts,
            position: sample.position,
            pressure: self.config.pressure.map(sample.pressure),
            pair: None,
            tilt: Tilt::default(),
            lifting: sample.phase.is_terminal(),
        };
        let touches = single_touch(MOUSE_POINTER_ID, sample.position, sample.pressure, ts);

        match sample.phase {
            PointerPhase::Start => {
                self.hover_since = None;
                self.supersede(MOUSE);
                self.start(MOUSE, Cluster::begin(ClusterKey::Mouse, &cluster_sample));
            }
            PointerPhase::Move if self.clusters[MOUSE].is_some() => {
                if sample.buttons.is_empty() {
                    // Release happened outside our view.
                    if let Some(cluster) = self.clusters[MOUSE].take() {
                        self.finish(cluster, ts, false, touches, out);
                    }
                } else {
                    self.advance(MOUSE, &cluster_sample, &touches, out);
                }
            }
            PointerPhase::Move => {
                if sample.buttons.is_empty() {
                    let since = *self.hover_since.get_or_insert(ts);
                    let mut state = GestureState::begin(since, 0.0);
                    state.record_sample(ts, None, 0.0);
                    out.push(GestureEvent {
                        data: GestureData::Hover {
                            point: sample.position,
                            hover_duration: state.duration,
                        },
                        state,
                        context: Rc::clone(&self.context),
                        cluster: ClusterKey::Mouse,
                        timestamp: ts,
                    });
                } else {
                    self.hover_since = None;
                    self.start(MOUSE, Cluster::begin(ClusterKey::Mouse, &cluster_sample));
                }
            }
            PointerPhase::End | PointerPhase::Cancel => {
                self.hover_since = None;
                if self.clusters[MOUSE].is_none() {
                    return;
                }
                self.advance(MOUSE, &cluster_sample, &touches, out);
                if let Some(cluster) = self.clusters[MOUSE].take() {
                    let completed = sample.phase == PointerPhase::End;
                    self.finish(cluster, ts, completed, touches, out);
                }
            }
        }
    }

    fn process_stylus(&mut self, sample: &StylusSample, out: &mut Vec<GestureEvent>) {
        let ts = sample.timestamp;
        let key = ClusterKey::Stylus(sample.id);
        let cluster_sample = ClusterSample {
            timestamp: ts,
            position: sample.position,
            pressure: self.config.pressure.map(sample.pressure),
            pair: None,
            tilt: sample.tilt,
            lifting: sample.phase.is_terminal(),
        };
        let touches = single_touch(sample.id, sample.position, sample.pressure, ts);
        let tracked = self.clusters[STYLUS]
            .as_ref()
            .is_some_and(|cluster| cluster.key == key);

        match sample.phase {
            PointerPhase::Start => {
                self.supersede(STYLUS);
                self.start(STYLUS, Cluster::begin(key, &cluster_sample));
            }
            PointerPhase::Move if tracked => {
                self.advance(STYLUS, &cluster_sample, &touches, out);
            }
            PointerPhase::Move => {
                // A pen moving without contact is hovering.
                if sample.pressure > 0.0 {
                    self.supersede(STYLUS);
                    self.start(STYLUS, Cluster::begin(key, &cluster_sample));
                }
            }
            PointerPhase::End | PointerPhase::Cancel => {
                if !tracked {
                    return;
                }
                self.advance(STYLUS, &cluster_sample, &touches, out);
                if let Some(cluster) = self.clusters[STYLUS].take() {
                    let completed = sample.phase == PointerPhase::End;
                    self.finish(cluster, ts, completed, touches, out);
                }
            }
        }
    }

    /// One synthetic pinch per notch. Anything but a downward delta zooms
    /// in, a zero delta included; non-finite deltas are dropped.
    fn process_wheel(&mut self, sample: &WheelSample, out: &mut Vec<GestureEvent>) {
        if !sample.delta_y.is_finite() {
            return;
        }
        let scale = if sample.delta_y > 0.0 {
            WHEEL_ZOOM_OUT_SCALE
        } else {
            WHEEL_ZOOM_IN_SCALE
        };
        let mut state = GestureState::begin(sample.timestamp, 0.0);
        state.finish(sample.timestamp);
        out.push(GestureEvent {
            data: GestureData::Pinch {
                center: sample.position,
                scale,
                scale_delta: scale - 1.0,
                scale_velocity: sample.delta_y.abs() / WHEEL_NOTCH_MILLIS,
                touches: Touches::new(),
                touch_count: 0,
            },
            state,
            context: Rc::clone(&self.context),
            cluster: ClusterKey::WheelZoom,
            timestamp: sample.timestamp,
        });
    }

    fn start(&mut self, class: usize, cluster: Cluster) {
        log::trace!("cluster {} started", cluster.key);
        self.stats.clusters_started += 1;
        self.clusters[class] = Some(cluster);
    }

    /// Drops the cluster in `class` without classifying it.
    fn supersede(&mut self, class: usize) {
        if let Some(cluster) = self.clusters[class].take() {
            log::debug!(
                "cluster {} superseded after {}ms",
                cluster.key,
                cluster.state.duration
            );
            self.stats.superseded += 1;
        }
    }

    fn advance(
        &mut self,
        class: usize,
        sample: &ClusterSample,
        touches: &Touches,
        out: &mut Vec<GestureEvent>,
    ) {
        let Some(cluster) = self.clusters[class].as_mut() else {
            return;
        };
        let emitted = cluster.advance(sample, touches, &self.config);
        for data in emitted {
            out.push(GestureEvent {
                data,
                state: cluster.state,
                context: Rc::clone(&self.context),
                cluster: cluster.key,
                timestamp: sample.timestamp,
            });
        }
    }

    /// Ends `cluster`. Only a completed lift is classified; cancellations
    /// never produce discrete gestures.
    fn finish(
        &mut self,
        mut cluster: Cluster,
        ts: Millis,
        completed: bool,
        touches: Touches,
        out: &mut Vec<GestureEvent>,
    ) {
        cluster.state.finish(ts);
        let discrete = if completed && cluster.classifiable() {
            classify(
                &cluster.summary(),
                &self.config,
                self.context.supports_pressure,
            )
        } else {
            None
        };
        self.count_ended(&cluster, discrete.is_some());

        let Some(discrete) = discrete else {
            return;
        };
        let data = self.discrete_data(&cluster, discrete, ts, touches);
        log::trace!("{} classified as {}", cluster.key, data.gesture_type());
        out.push(GestureEvent {
            data,
            state: cluster.state,
            context: Rc::clone(&self.context),
            cluster: cluster.key,
            timestamp: ts,
        });
    }

    fn discrete_data(
        &mut self,
        cluster: &Cluster,
        discrete: DiscreteGesture,
        ts: Millis,
        touches: Touches,
    ) -> GestureData {
        let center = cluster.position;
        if discrete != DiscreteGesture::Tap {
            self.last_tap = None;
        }
        match discrete {
            DiscreteGesture::Tap => {
                let double_tap = &self.config.double_tap;
                let previous = self.last_tap.take().filter(|prev| {
                    ts.saturating_sub(prev.timestamp) <= double_tap.max_interval
                        && prev.center.distance_to(center) <= double_tap.max_distance
                });
                match previous {
                    Some(prev) => GestureData::DoubleTap {
                        center,
                        interval: ts.saturating_sub(prev.timestamp),
                        touches,
                    },
                    None => {
                        self.last_tap = Some(TapRecord {
                            timestamp: ts,
                            center,
                        });
                        GestureData::Tap { center, touches }
                    }
                }
            }
            DiscreteGesture::LongPress => GestureData::LongPress {
                center,
                pressure: cluster.peak_pressure,
                touches,
            },
            DiscreteGesture::Swipe(direction) => GestureData::Swipe {
                center,
                direction,
                swipe_velocity: cluster.state.speed(),
                velocity: cluster.state.velocity,
                translation: cluster.position - cluster.origin,
                touches,
            },
        }
    }

    fn count_ended(&mut self, cluster: &Cluster, discrete: bool) {
        if discrete || cluster.phase.is_committed() {
            self.stats.classified += 1;
        } else {
            self.stats.unclassified += 1;
        }
    }
}

fn single_touch(id: PointerId, position: Point, pressure: f32, ts: Millis) -> Touches {
    let mut touches = Touches::new();
    touches.push(TouchPoint::new(id, position, pressure, ts));
    touches
}

#[cfg(test)]
#[path = "tests/engine_tests.rs"]
mod tests;

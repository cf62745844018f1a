use gestura_core::Millis;
use gestura_foundation::{ClusterKey, GestureEvent, GestureType};
use gestura_geometry::Point;

/// Session-level mirror of the most recently routed event.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SessionState {
    pub is_active: bool,
    pub start_time: Millis,
    pub current_time: Millis,
    pub duration: Millis,
    pub velocity: Point,
    pub acceleration: Point,
    pub pressure: f32,
    pub last_gesture: Option<GestureType>,
    pub cluster: Option<ClusterKey>,
    pub events_routed: u64,
}

impl SessionState {
    pub(crate) fn mirror(&mut self, event: &GestureEvent) {
        self.is_active = event.state.is_active;
        self.start_time = event.state.start_time;
        self.current_time = event.timestamp;
        self.duration = event.state.duration;
        self.velocity = event.data.velocity().unwrap_or(event.state.velocity);
        self.acceleration = event.state.acceleration;
        self.pressure = event.data.pressure().unwrap_or(event.state.pressure);
        self.last_gesture = Some(event.gesture_type());
        self.cluster = Some(event.cluster);
        self.events_routed += 1;
    }
}

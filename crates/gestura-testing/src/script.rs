//! Scripted raw input.
//!
//! An [`InputScript`] keeps a time cursor and appends raw samples stamped
//! with it. Primitive steps (`touch_down`, `mouse_move`, ...) never advance
//! the cursor; `wait` and the composite helpers (`tap`, `drag`, `spread`)
//! do.
//!
//! ```
//! use gestura_testing::InputScript;
//!
//! let inputs = InputScript::new()
//!     .tap(1, 100.0, 100.0, 120)
//!     .wait(400)
//!     .drag(2, (0.0, 0.0), (300.0, 0.0), 200, 10)
//!     .build();
//! assert_eq!(inputs.len(), 2 + 12);
//! ```

use gestura_core::Millis;
use gestura_foundation::{
    MouseSample, PointerButton, PointerButtons, PointerId, PointerPhase, RawInput, StylusSample,
    TouchFrame, WheelSample,
};
use gestura_geometry::Point;

#[derive(Clone, Debug, Default)]
pub struct InputScript {
    now: Millis,
    inputs: Vec<RawInput>,
}

impl InputScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(timestamp: Millis) -> Self {
        Self {
            now: timestamp,
            inputs: Vec::new(),
        }
    }

    /// Timestamp the next sample will carry.
    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn inputs(&self) -> &[RawInput] {
        &self.inputs
    }

    pub fn build(self) -> Vec<RawInput> {
        self.inputs
    }

    pub fn wait(mut self, millis: Millis) -> Self {
        self.now += millis;
        self
    }

    pub fn push(mut self, input: impl Into<RawInput>) -> Self {
        self.inputs.push(input.into());
        self
    }

    /// One touch frame carrying `contacts` as `(id, x, y, pressure)`.
    pub fn touch_frame(self, phase: PointerPhase, contacts: &[(PointerId, f32, f32, f32)]) -> Self {
        let frame = contacts
            .iter()
            .fold(TouchFrame::new(phase, self.now), |frame, &(id, x, y, p)| {
                frame.with_touch(id, Point::new(x, y), p)
            });
        self.push(frame)
    }

    pub fn touch_down(self, id: PointerId, x: f32, y: f32) -> Self {
        self.touch_frame(PointerPhase::Start, &[(id, x, y, 1.0)])
    }

    pub fn touch_move(self, id: PointerId, x: f32, y: f32) -> Self {
        self.touch_frame(PointerPhase::Move, &[(id, x, y, 1.0)])
    }

    pub fn touch_up(self, id: PointerId, x: f32, y: f32) -> Self {
        self.touch_frame(PointerPhase::End, &[(id, x, y, 1.0)])
    }

    pub fn touch_cancel(self, id: PointerId, x: f32, y: f32) -> Self {
        self.touch_frame(PointerPhase::Cancel, &[(id, x, y, 1.0)])
    }

    pub fn mouse_down(self, x: f32, y: f32) -> Self {
        let sample = MouseSample::new(PointerPhase::Start, Point::new(x, y), self.now)
            .with_buttons(primary());
        self.push(sample)
    }

    /// Moves with the primary button held.
    pub fn mouse_move(self, x: f32, y: f32) -> Self {
        let sample = MouseSample::new(PointerPhase::Move, Point::new(x, y), self.now)
            .with_buttons(primary());
        self.push(sample)
    }

    pub fn mouse_up(self, x: f32, y: f32) -> Self {
        let sample = MouseSample::new(PointerPhase::End, Point::new(x, y), self.now);
        self.push(sample)
    }

    /// Moves with no button held.
    pub fn hover(self, x: f32, y: f32) -> Self {
        let sample = MouseSample::new(PointerPhase::Move, Point::new(x, y), self.now);
        self.push(sample)
    }

    pub fn stylus_down(self, id: PointerId, x: f32, y: f32, pressure: f32) -> Self {
        let sample = StylusSample::new(id, PointerPhase::Start, Point::new(x, y), self.now)
            .with_pressure(pressure);
        self.push(sample)
    }

    pub fn stylus_move(self, id: PointerId, x: f32, y: f32, pressure: f32) -> Self {
        let sample = StylusSample::new(id, PointerPhase::Move, Point::new(x, y), self.now)
            .with_pressure(pressure);
        self.push(sample)
    }

    pub fn stylus_up(self, id: PointerId, x: f32, y: f32) -> Self {
        let sample = StylusSample::new(id, PointerPhase::End, Point::new(x, y), self.now);
        self.push(sample)
    }

    pub fn wheel(self, delta_y: f32, x: f32, y: f32) -> Self {
        let sample = WheelSample {
            delta_y,
            position: Point::new(x, y),
            timestamp: self.now,
        };
        self.push(sample)
    }

    /// Press, wait `hold` milliseconds, release in place.
    pub fn tap(self, id: PointerId, x: f32, y: f32, hold: Millis) -> Self {
        self.touch_down(id, x, y).wait(hold).touch_up(id, x, y)
    }

    /// Stationary press at `pressure`, reported every `step` milliseconds.
    pub fn hold(
        self,
        id: PointerId,
        (x, y): (f32, f32),
        pressure: f32,
        duration: Millis,
        step: Millis,
    ) -> Self {
        let step = step.max(1);
        let mut script = self.touch_frame(PointerPhase::Start, &[(id, x, y, pressure)]);
        let mut elapsed = 0;
        while elapsed + step <= duration {
            elapsed += step;
            script = script
                .wait(step)
                .touch_frame(PointerPhase::Move, &[(id, x, y, pressure)]);
        }
        script
            .wait(duration - elapsed)
            .touch_frame(PointerPhase::End, &[(id, x, y, pressure)])
    }

    /// Straight-line drag in `steps` evenly spaced moves, lifted at the
    /// final position without further delay.
    pub fn drag(
        self,
        id: PointerId,
        from: (f32, f32),
        to: (f32, f32),
        duration: Millis,
        steps: u32,
    ) -> Self {
        let steps = steps.max(1);
        let dt = duration / steps as Millis;
        let mut script = self.touch_down(id, from.0, from.1);
        for i in 1..=steps {
            let (x, y) = lerp(from, to, i as f32 / steps as f32);
            script = script.wait(dt).touch_move(id, x, y);
        }
        script.touch_up(id, to.0, to.1)
    }

    /// Two contacts (ids 1 and 2) on a horizontal line through `center`,
    /// moved apart from `from_distance` to `to_distance`.
    pub fn spread(
        self,
        center: (f32, f32),
        from_distance: f32,
        to_distance: f32,
        duration: Millis,
        steps: u32,
    ) -> Self {
        let steps = steps.max(1);
        let dt = duration / steps as Millis;
        let pair = |distance: f32| {
            let half = distance / 2.0;
            [
                (1, center.0 - half, center.1, 1.0),
                (2, center.0 + half, center.1, 1.0),
            ]
        };
        let mut script = self.touch_frame(PointerPhase::Start, &pair(from_distance));
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            let distance = from_distance + (to_distance - from_distance) * t;
            script = script
                .wait(dt)
                .touch_frame(PointerPhase::Move, &pair(distance));
        }
        script.touch_frame(PointerPhase::End, &pair(to_distance))
    }
}

fn primary() -> PointerButtons {
    PointerButtons::NONE.with(PointerButton::Primary)
}

fn lerp(from: (f32, f32), to: (f32, f32), t: f32) -> (f32, f32) {
    (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t)
}

/// Ready-made contexts for the common device classes.
pub mod contexts {
    use gestura_foundation::{DeviceType, GestureContext, InputType, Platform};
    use gestura_geometry::Size;
    use std::rc::Rc;

    pub fn touch_phone() -> Rc<GestureContext> {
        Rc::new(GestureContext {
            device_type: DeviceType::Touch,
            input_type: InputType::Finger,
            platform: Platform::Mobile,
            screen_size: Size::new(390.0, 844.0),
            pixel_ratio: 3.0,
            supports_pressure: false,
            max_touch_points: 5,
        })
    }

    /// Touch hardware that reports force.
    pub fn pressure_touch() -> Rc<GestureContext> {
        Rc::new(GestureContext {
            supports_pressure: true,
            ..(*touch_phone()).clone()
        })
    }

    pub fn desktop_mouse() -> Rc<GestureContext> {
        Rc::new(GestureContext::default())
    }

    pub fn stylus_tablet() -> Rc<GestureContext> {
        Rc::new(GestureContext {
            device_type: DeviceType::Stylus,
            input_type: InputType::Pen,
            platform: Platform::Tablet,
            screen_size: Size::new(1024.0, 1366.0),
            pixel_ratio: 2.0,
            supports_pressure: true,
            max_touch_points: 10,
        })
    }
}

use gestura_core::Millis;
use gestura_geometry::Point;
use smallvec::SmallVec;

pub type PointerId = u64;

/// Contacts carried by one frame. Four covers almost every real frame without
/// spilling to the heap.
pub type Touches = SmallVec<[TouchPoint; 4]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Start,
    Move,
    End,
    Cancel,
}

impl PointerPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, PointerPhase::End | PointerPhase::Cancel)
    }
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary = 0,
    Secondary = 1,
    Middle = 2,
    Back = 3,
    Forward = 4,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerButtons(u8);

impl PointerButtons {
    pub const NONE: Self = Self(0);

    pub fn new() -> Self {
        Self::NONE
    }

    /// Builds the mask from a host bitfield (bit 0 primary, bit 1 secondary, ...).
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0b1_1111)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn with(mut self, button: PointerButton) -> Self {
        self.insert(button);
        self
    }

    pub fn insert(&mut self, button: PointerButton) {
        self.0 |= 1 << (button as u8);
    }

    pub fn remove(&mut self, button: PointerButton) {
        self.0 &= !(1 << (button as u8));
    }

    pub fn contains(&self, button: PointerButton) -> bool {
        (self.0 & (1 << (button as u8))) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl Default for PointerButtons {
    fn default() -> Self {
        Self::NONE
    }
}

/// One physical contact as reported in a single frame.
///
/// `id` is assigned by the platform and stays stable for the lifetime of the
/// contact; everything else is only valid for the frame that carried it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub id: PointerId,
    pub point: Point,
    /// Normalized to `[0, 1]`.
    pub pressure: f32,
    pub timestamp: Millis,
}

impl TouchPoint {
    pub const fn new(id: PointerId, point: Point, pressure: f32, timestamp: Millis) -> Self {
        Self {
            id,
            point,
            pressure,
            timestamp,
        }
    }
}

/// Multi-contact touch sample.
///
/// `touches` lists the contacts that changed in this frame: the new contacts
/// for `Start`, the moved ones for `Move`, the lifted ones for `End`/`Cancel`.
/// Contacts that did not change are not repeated.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchFrame {
    pub phase: PointerPhase,
    pub touches: Touches,
    pub timestamp: Millis,
}

impl TouchFrame {
    pub fn new(phase: PointerPhase, timestamp: Millis) -> Self {
        Self {
            phase,
            touches: Touches::new(),
            timestamp,
        }
    }

    pub fn with_touch(mut self, id: PointerId, point: Point, pressure: f32) -> Self {
        self.touches
            .push(TouchPoint::new(id, point, pressure, self.timestamp));
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouseSample {
    pub phase: PointerPhase,
    pub position: Point,
    pub buttons: PointerButtons,
    /// Filled in by normalization from the button mask.
    pub pressure: f32,
    pub timestamp: Millis,
}

impl MouseSample {
    pub fn new(phase: PointerPhase, position: Point, timestamp: Millis) -> Self {
        Self {
            phase,
            position,
            buttons: PointerButtons::NONE,
            pressure: 0.5,
            timestamp,
        }
    }

    pub fn with_buttons(mut self, buttons: PointerButtons) -> Self {
        self.buttons = buttons;
        self
    }
}

/// Pen tilt in degrees, `[-90, 90]` on each axis.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Tilt {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StylusSample {
    pub id: PointerId,
    pub phase: PointerPhase,
    pub position: Point,
    pub pressure: f32,
    pub tilt: Tilt,
    pub timestamp: Millis,
}

impl StylusSample {
    pub fn new(id: PointerId, phase: PointerPhase, position: Point, timestamp: Millis) -> Self {
        Self {
            id,
            phase,
            position,
            pressure: 0.0,
            tilt: Tilt::default(),
            timestamp,
        }
    }

    pub fn with_pressure(mut self, pressure: f32) -> Self {
        self.pressure = pressure;
        self
    }

    pub fn with_tilt(mut self, x: f32, y: f32) -> Self {
        self.tilt = Tilt { x, y };
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelSample {
    /// Positive values scroll down (zoom out).
    pub delta_y: f32,
    pub position: Point,
    pub timestamp: Millis,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerType {
    Mouse,
    Pen,
    Touch,
}

/// Unified pointer sample as delivered by hosts with pointer-event style
/// input. The platform adapter turns it into the matching [`RawInput`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub id: PointerId,
    pub pointer_type: PointerType,
    pub phase: PointerPhase,
    pub position: Point,
    /// `None` when the host cannot report pressure.
    pub pressure: Option<f32>,
    pub tilt: Tilt,
    pub buttons: PointerButtons,
    pub timestamp: Millis,
}

/// Everything the recognition engine consumes.
#[derive(Clone, Debug, PartialEq)]
pub enum RawInput {
    Touch(TouchFrame),
    Mouse(MouseSample),
    Stylus(StylusSample),
    Wheel(WheelSample),
}

impl RawInput {
    pub fn timestamp(&self) -> Millis {
        match self {
            RawInput::Touch(frame) => frame.timestamp,
            RawInput::Mouse(sample) => sample.timestamp,
            RawInput::Stylus(sample) => sample.timestamp,
            RawInput::Wheel(sample) => sample.timestamp,
        }
    }

    /// Pointer phase of the sample. Wheel samples have none.
    pub fn phase(&self) -> Option<PointerPhase> {
        match self {
            RawInput::Touch(frame) => Some(frame.phase),
            RawInput::Mouse(sample) => Some(sample.phase),
            RawInput::Stylus(sample) => Some(sample.phase),
            RawInput::Wheel(_) => None,
        }
    }

    /// Applies `f` to every position carried by the input.
    pub fn map_positions(&mut self, mut f: impl FnMut(Point) -> Point) {
        match self {
            RawInput::Touch(frame) => {
                for touch in frame.touches.iter_mut() {
                    touch.point = f(touch.point);
                }
            }
            RawInput::Mouse(sample) => sample.position = f(sample.position),
            RawInput::Stylus(sample) => sample.position = f(sample.position),
            RawInput::Wheel(sample) => sample.position = f(sample.position),
        }
    }
}

impl From<TouchFrame> for RawInput {
    fn from(frame: TouchFrame) -> Self {
        RawInput::Touch(frame)
    }
}

impl From<MouseSample> for RawInput {
    fn from(sample: MouseSample) -> Self {
        RawInput::Mouse(sample)
    }
}

impl From<StylusSample> for RawInput {
    fn from(sample: StylusSample) -> Self {
        RawInput::Stylus(sample)
    }
}

impl From<WheelSample> for RawInput {
    fn from(sample: WheelSample) -> Self {
        RawInput::Wheel(sample)
    }
}

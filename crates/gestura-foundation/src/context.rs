use gestura_geometry::Size;

/// Primary input hardware. Independent from [`Platform`]: a touch laptop is
/// `DeviceType::Touch` on `Platform::Desktop`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeviceType {
    Touch,
    Mouse,
    Stylus,
    Trackpad,
}

impl DeviceType {
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceType::Touch => "touch",
            DeviceType::Mouse => "mouse",
            DeviceType::Stylus => "stylus",
            DeviceType::Trackpad => "trackpad",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputType {
    Finger,
    Pen,
    Mouse,
    Trackpad,
}

impl InputType {
    pub fn as_str(self) -> &'static str {
        match self {
            InputType::Finger => "finger",
            InputType::Pen => "pen",
            InputType::Mouse => "mouse",
            InputType::Trackpad => "trackpad",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Platform {
    Mobile,
    Tablet,
    Desktop,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Mobile => "mobile",
            Platform::Tablet => "tablet",
            Platform::Desktop => "desktop",
        }
    }
}

/// Immutable snapshot of device capabilities.
///
/// Computed once per session. An environment change produces a new snapshot;
/// an existing one is never edited.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureContext {
    pub device_type: DeviceType,
    pub input_type: InputType,
    pub platform: Platform,
    pub screen_size: Size,
    pub pixel_ratio: f32,
    pub supports_pressure: bool,
    pub max_touch_points: u32,
}

impl GestureContext {
    pub fn supports_multi_touch(&self) -> bool {
        self.max_touch_points > 1
    }
}

impl Default for GestureContext {
    fn default() -> Self {
        Self {
            device_type: DeviceType::Mouse,
            input_type: InputType::Mouse,
            platform: Platform::Desktop,
            screen_size: Size::new(1920.0, 1080.0),
            pixel_ratio: 1.0,
            supports_pressure: false,
            max_touch_points: 0,
        }
    }
}

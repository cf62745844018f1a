use gestura_geometry::Size;

/// What the host can tell us about the device, collected once at startup.
///
/// Hosts fill in what they can observe and leave the rest at the defaults,
/// which describe a plain desktop with a mouse.
#[derive(Clone, Debug, PartialEq)]
pub struct Environment {
    /// Lower-cased before matching.
    pub user_agent: String,
    pub max_touch_points: u32,
    /// Host exposes touch events at all.
    pub touch_events: bool,
    /// Host exposes unified pointer events.
    pub pointer_events: bool,
    /// The primary pointer has been identified as a pen.
    pub pen_primary: bool,
    /// Touch force or pen pressure is reported by the hardware.
    pub pressure_input: bool,
    pub wheel_events: bool,
    pub screen_size: Size,
    pub pixel_ratio: f32,
    pub hardware_concurrency: Option<u32>,
    pub device_memory_gb: Option<f32>,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            user_agent: String::new(),
            max_touch_points: 0,
            touch_events: false,
            pointer_events: true,
            pen_primary: false,
            pressure_input: false,
            wheel_events: true,
            screen_size: Size::new(1920.0, 1080.0),
            pixel_ratio: 1.0,
            hardware_concurrency: None,
            device_memory_gb: None,
        }
    }
}

impl Environment {
    pub fn is_touch_capable(&self) -> bool {
        self.touch_events || self.max_touch_points > 0
    }

    pub(crate) fn user_agent_lower(&self) -> String {
        self.user_agent.to_ascii_lowercase()
    }
}

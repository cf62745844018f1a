use crate::detector::{ContextDetector, DeviceCapabilities};
use crate::environment::Environment;
use crate::strategy::{AdaptationStrategy, Optimization};
use gestura_core::collections::map::HashSet;
use gestura_foundation::{
    GestureConfig, GestureContext, MouseSample, Platform, PointerPhase, PointerSample,
    PointerType, RawInput, StylusSample, Tilt, TouchFrame, TouchPoint,
};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// Minimum touch target edge applied by `increase-touch-tolerance`.
const MIN_HIT_TARGET: f32 = 44.0;

/// Mouse pressure derived from the held buttons.
const PRIMARY_BUTTON_PRESSURE: f32 = 0.7;
const SECONDARY_BUTTON_PRESSURE: f32 = 0.9;
const DEFAULT_MOUSE_PRESSURE: f32 = 0.5;

/// Pen contact that reports no pressure.
const DEFAULT_PEN_PRESSURE: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Feature {
    MultiTouch,
    Pressure,
    Stylus,
    MomentumScroll,
    WheelZoom,
}

impl Feature {
    pub fn as_str(self) -> &'static str {
        match self {
            Feature::MultiTouch => "multi-touch",
            Feature::Pressure => "pressure",
            Feature::Stylus => "stylus",
            Feature::MomentumScroll => "momentum-scroll",
            Feature::WheelZoom => "wheel-zoom",
        }
    }
}

impl FromStr for Feature {
    type Err = PlatformError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "multi-touch" => Ok(Feature::MultiTouch),
            "pressure" => Ok(Feature::Pressure),
            "stylus" => Ok(Feature::Stylus),
            "momentum-scroll" => Ok(Feature::MomentumScroll),
            "wheel-zoom" => Ok(Feature::WheelZoom),
            other => Err(PlatformError::UnknownFeature(other.to_owned())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlatformError {
    UnknownOptimization(String),
    UnknownFeature(String),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::UnknownOptimization(name) => write!(f, "unknown optimization {name:?}"),
            PlatformError::UnknownFeature(name) => write!(f, "unknown feature {name:?}"),
        }
    }
}

impl std::error::Error for PlatformError {}

/// Host-side change requested by an optimization. The gesture layer never
/// touches presentation itself; hosts drain these and apply them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlatformEffect {
    /// Disable double-tap zoom and tap highlight on gesture targets.
    SuppressTapHighlight,
    /// Grow interactive regions to at least this edge length.
    MinimumHitTarget(f32),
    /// Stop the browser-level pinch zoom from fighting scene zoom.
    LockViewportScale,
    /// Register a non-passive wheel listener so wheel deltas become zoom.
    CaptureWheel,
    SmoothScrolling,
}

/// Mutable per-session platform switches flipped by optimizations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlatformSettings {
    /// Cap on simultaneously tracked touches, on top of the gesture config.
    pub max_touches: Option<usize>,
    pub wheel_zoom: bool,
    /// Drop touch frames while a pen is in contact.
    pub palm_rejection: bool,
    pub right_click_pan: bool,
}

/// Maps the detected context onto thresholds and normalizes raw input.
pub struct PlatformAdapter {
    context: Rc<GestureContext>,
    capabilities: DeviceCapabilities,
    strategy: Option<AdaptationStrategy>,
    applied: HashSet<Optimization>,
    settings: PlatformSettings,
    effects: Vec<PlatformEffect>,
    pen_down: bool,
}

impl PlatformAdapter {
    pub fn new(env: &Environment) -> Self {
        Self::from_parts(
            ContextDetector::detect(env),
            ContextDetector::capabilities(env),
        )
    }

    pub fn from_parts(context: GestureContext, capabilities: DeviceCapabilities) -> Self {
        let strategy = AdaptationStrategy::for_context(context.device_type, context.platform);
        match &strategy {
            Some(strategy) => log::debug!("selected platform strategy {}", strategy.name),
            None => log::debug!(
                "no platform strategy for {}-{}, keeping base thresholds",
                context.device_type.as_str(),
                context.platform.as_str()
            ),
        }
        Self {
            context: Rc::new(context),
            settings: PlatformSettings {
                max_touches: None,
                wheel_zoom: capabilities.wheel,
                palm_rejection: false,
                right_click_pan: false,
            },
            capabilities,
            strategy,
            applied: HashSet::default(),
            effects: Vec::new(),
            pen_down: false,
        }
    }

    /// Replaces the context after an environment change. Applied
    /// optimizations stay applied.
    pub fn refresh(&mut self, env: &Environment) {
        let context = ContextDetector::detect(env);
        self.capabilities = ContextDetector::capabilities(env);
        self.strategy = AdaptationStrategy::for_context(context.device_type, context.platform);
        self.context = Rc::new(context);
    }

    pub fn context(&self) -> &Rc<GestureContext> {
        &self.context
    }

    pub fn capabilities(&self) -> &DeviceCapabilities {
        &self.capabilities
    }

    pub fn strategy(&self) -> Option<&AdaptationStrategy> {
        self.strategy.as_ref()
    }

    pub fn settings(&self) -> &PlatformSettings {
        &self.settings
    }

    /// Layers the strategy's overrides onto `base`. Fields the strategy does
    /// not mention keep their base values.
    pub fn adapt(&self, base: &GestureConfig) -> GestureConfig {
        let mut config = match &self.strategy {
            Some(strategy) => base.merged(&strategy.gesture_config),
            None => base.clone(),
        };
        if let Some(cap) = self.settings.max_touches {
            config.multi_touch.max_touches = config.multi_touch.max_touches.min(cap);
        }
        config
    }

    /// Capability query by name. Unknown names are unsupported.
    pub fn supports(&self, feature: &str) -> bool {
        match feature.parse::<Feature>() {
            Ok(feature) => self.supports_feature(feature),
            Err(err) => {
                log::debug!("{err}");
                false
            }
        }
    }

    pub fn supports_feature(&self, feature: Feature) -> bool {
        match feature {
            Feature::MultiTouch => self.capabilities.max_touch_points > 1,
            Feature::Pressure => self.capabilities.pressure,
            Feature::Stylus => self.capabilities.pointer_events,
            Feature::MomentumScroll => self.capabilities.momentum_scroll,
            Feature::WheelZoom => self.capabilities.wheel,
        }
    }

    /// Applies every optimization of the selected strategy. Returns how many
    /// were newly applied.
    pub fn apply_platform_optimizations(&mut self) -> usize {
        let Some(strategy) = &self.strategy else {
            return 0;
        };
        let optimizations = strategy.optimizations;
        optimizations
            .iter()
            .filter(|opt| self.apply_optimization(**opt))
            .count()
    }

    /// Applies `optimization` once. Returns `false` if it was already applied.
    pub fn apply_optimization(&mut self, optimization: Optimization) -> bool {
        if !self.applied.insert(optimization) {
            return false;
        }
        log::debug!("applying platform optimization {}", optimization.as_str());
        match optimization {
            Optimization::ReduceGestureThresholds => {
                self.effects.push(PlatformEffect::SuppressTapHighlight)
            }
            Optimization::IncreaseTouchTolerance => self
                .effects
                .push(PlatformEffect::MinimumHitTarget(MIN_HIT_TARGET)),
            Optimization::EnableSimplifiedGestures => self.settings.max_touches = Some(2),
            Optimization::OptimizeForSmallScreens => {
                self.effects.push(PlatformEffect::LockViewportScale)
            }
            Optimization::EnableMultiTouch => self.settings.max_touches = None,
            Optimization::PreciseGestureDetection => self.settings.wheel_zoom = true,
            Optimization::EnableWheelZoom => {
                self.settings.wheel_zoom = true;
                self.effects.push(PlatformEffect::CaptureWheel);
            }
            Optimization::SupportRightClickPan => self.settings.right_click_pan = true,
            Optimization::PalmRejection => self.settings.palm_rejection = true,
            Optimization::MomentumScroll => self.effects.push(PlatformEffect::SmoothScrolling),
            Optimization::StandardGestureThresholds
            | Optimization::OptimizeForPrecision
            | Optimization::HighPrecisionMode
            | Optimization::PressureSensitiveControls
            | Optimization::TiltAwareRotation
            | Optimization::ForceTouch
            | Optimization::GestureContinuity
            | Optimization::SmoothScrolling => {}
        }
        true
    }

    pub fn apply_optimization_named(&mut self, name: &str) -> Result<bool, PlatformError> {
        let optimization = name.parse::<Optimization>().map_err(|err| {
            log::warn!("{err}");
            err
        })?;
        Ok(self.apply_optimization(optimization))
    }

    pub fn is_applied(&self, optimization: Optimization) -> bool {
        self.applied.contains(&optimization)
    }

    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }

    /// Hands pending host effects to the caller.
    pub fn take_effects(&mut self) -> Vec<PlatformEffect> {
        std::mem::take(&mut self.effects)
    }

    /// Brings a raw sample into the shape the recognizer expects.
    ///
    /// Returns `None` for input that must not reach the recognizer: touches
    /// rejected as palm contact, wheel deltas when wheel zoom is off, and
    /// samples with non-finite coordinates.
    pub fn normalize(&mut self, mut input: RawInput) -> Option<RawInput> {
        match &mut input {
            RawInput::Touch(frame) => {
                if self.settings.palm_rejection && self.pen_down {
                    log::trace!("palm rejection dropped {} touches", frame.touches.len());
                    return None;
                }
                frame.touches.retain(|touch| touch.point.is_finite());
                if frame.touches.is_empty() {
                    return None;
                }
                for touch in frame.touches.iter_mut() {
                    touch.pressure = touch_pressure(touch.pressure);
                }
            }
            RawInput::Mouse(sample) => {
                if !sample.position.is_finite() {
                    return None;
                }
                sample.pressure = mouse_pressure(sample.buttons.bits());
            }
            RawInput::Stylus(sample) => {
                if !sample.position.is_finite() {
                    return None;
                }
                self.pen_down = !sample.phase.is_terminal();
                sample.pressure = unit(sample.pressure);
                sample.tilt = Tilt {
                    x: sample.tilt.x.clamp(-90.0, 90.0),
                    y: sample.tilt.y.clamp(-90.0, 90.0),
                };
            }
            RawInput::Wheel(sample) => {
                if !self.settings.wheel_zoom
                    || !sample.delta_y.is_finite()
                    || !sample.position.is_finite()
                {
                    return None;
                }
            }
        }

        if self.context.platform == Platform::Mobile {
            if let RawInput::Touch(_) = input {
                let ratio = self.context.pixel_ratio;
                input.map_positions(|p| p * ratio);
            }
        }
        Some(input)
    }

    /// Routes a unified pointer sample by pointer type, then normalizes it.
    pub fn normalize_pointer(&mut self, sample: &PointerSample) -> Option<RawInput> {
        let raw = match sample.pointer_type {
            PointerType::Mouse => RawInput::Mouse(
                MouseSample::new(sample.phase, sample.position, sample.timestamp)
                    .with_buttons(sample.buttons),
            ),
            PointerType::Pen => RawInput::Stylus(StylusSample {
                id: sample.id,
                phase: sample.phase,
                position: sample.position,
                pressure: sample.pressure.unwrap_or(match sample.phase {
                    PointerPhase::End | PointerPhase::Cancel => 0.0,
                    _ => DEFAULT_PEN_PRESSURE,
                }),
                tilt: sample.tilt,
                timestamp: sample.timestamp,
            }),
            PointerType::Touch => {
                let mut frame = TouchFrame::new(sample.phase, sample.timestamp);
                frame.touches.push(TouchPoint::new(
                    sample.id,
                    sample.position,
                    sample.pressure.unwrap_or(0.0),
                    sample.timestamp,
                ));
                RawInput::Touch(frame)
            }
        };
        self.normalize(raw)
    }
}

/// Hosts without touch force report zero; treat it as full contact.
fn touch_pressure(raw: f32) -> f32 {
    if !raw.is_finite() || raw <= 0.0 {
        1.0
    } else {
        raw.min(1.0)
    }
}

fn mouse_pressure(buttons: u8) -> f32 {
    match buttons {
        1 => PRIMARY_BUTTON_PRESSURE,
        2 => SECONDARY_BUTTON_PRESSURE,
        _ => DEFAULT_MOUSE_PRESSURE,
    }
}

fn unit(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
#[path = "tests/adapter_tests.rs"]
mod tests;

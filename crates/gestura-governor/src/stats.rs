use std::fmt;

const MIB: f64 = 1024.0 * 1024.0;
/// Frame time assumed before any frame has been measured.
pub const NOMINAL_FRAME_TIME_MS: f32 = 1000.0 / 60.0;
/// Classification ratio assumed before any cluster has ended.
pub const BASELINE_ACCURACY: f32 = 0.95;

/// Read-only performance snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerformanceStats {
    /// Rolling mean over the frame window, in milliseconds.
    pub average_frame_time: f32,
    pub gesture_recognition_accuracy: f32,
    /// Mean of the memory samples, in bytes.
    pub memory_usage: f64,
    /// Rough power cost in `[0, 1]`.
    pub battery_impact: f32,
    pub user_experience_score: f32,
}

/// Inputs gathered by the governor for [`PerformanceStats::compute`].
#[derive(Clone, Copy, Debug)]
pub(crate) struct StatsInputs {
    pub average_frame_time: f32,
    pub recent_variance: f64,
    pub average_memory: f64,
    pub last_memory: f64,
    pub classification_ratio: Option<f32>,
}

impl PerformanceStats {
    pub(crate) fn compute(inputs: StatsInputs) -> Self {
        let frame_time = inputs.average_frame_time.max(f32::EPSILON);
        let fps = 1000.0 / frame_time;
        let frame_rate_score = (fps / 60.0).min(1.0);
        let stability = (1.0 - inputs.recent_variance / 100.0).max(0.0) as f32;
        let memory_score = (1.0 - inputs.average_memory / (100.0 * MIB)).max(0.0) as f32;
        let ratio = inputs.classification_ratio.unwrap_or(BASELINE_ACCURACY);
        let battery = (fps / 60.0) * 0.5 + (inputs.last_memory / (50.0 * MIB)) as f32 * 0.3;

        PerformanceStats {
            average_frame_time: inputs.average_frame_time,
            gesture_recognition_accuracy: frame_rate_score * ratio.clamp(0.0, 1.0),
            memory_usage: inputs.average_memory,
            battery_impact: battery.min(1.0),
            user_experience_score: frame_rate_score * 0.5 + stability * 0.3 + memory_score * 0.2,
        }
    }

    pub fn recommendations(&self) -> Vec<Recommendation> {
        let mut out = Vec::new();
        if self.average_frame_time > 20.0 {
            out.push(Recommendation::LowerRenderQuality);
        }
        if self.memory_usage > 50.0 * MIB {
            out.push(Recommendation::FreeMemory);
        }
        if self.gesture_recognition_accuracy < 0.8 {
            out.push(Recommendation::TuneGestureSensitivity);
        }
        if self.battery_impact > 0.7 {
            out.push(Recommendation::ReduceProcessingRate);
        }
        out
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Recommendation {
    LowerRenderQuality,
    FreeMemory,
    TuneGestureSensitivity,
    ReduceProcessingRate,
}

impl Recommendation {
    pub fn as_str(self) -> &'static str {
        match self {
            Recommendation::LowerRenderQuality => "lower-render-quality",
            Recommendation::FreeMemory => "free-memory",
            Recommendation::TuneGestureSensitivity => "tune-gesture-sensitivity",
            Recommendation::ReduceProcessingRate => "reduce-processing-rate",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Recommendation::LowerRenderQuality => "lower graphics quality for smoother frames",
            Recommendation::FreeMemory => "run a memory cleanup",
            Recommendation::TuneGestureSensitivity => "adjust gesture sensitivity",
            Recommendation::ReduceProcessingRate => "process gestures less often to save power",
        };
        f.write_str(text)
    }
}

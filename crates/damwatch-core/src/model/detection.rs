use serde::Serialize;

/// Human-presence detector status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HumanDetection {
    pub human_detected: bool,
    /// Detector confidence as a fraction in `0.0..=1.0`. Normalized at
    /// the conversion boundary regardless of the unit the detector
    /// reported in.
    pub confidence: f64,
    pub last_checked: String,
    pub detector_running: bool,
}

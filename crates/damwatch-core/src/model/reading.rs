use serde::Serialize;

use super::ValveState;

/// One sensor record, newest first in feed order.
///
/// Optional fields stay `None` when the originating node did not report
/// them; resolution treats `None` as "consult the next source", never
/// as zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorReading {
    pub id: String,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    /// Distance from sensor to water surface, in centimeters.
    pub distance_cm: Option<f64>,
    /// Water level as a percentage of capacity.
    pub water_level_pct: Option<f64>,
    pub rain_prediction_pct: Option<f64>,
    pub vibration: Option<bool>,
    pub valve_state: Option<ValveState>,
    pub human_detected: Option<bool>,
    /// Service-formatted display timestamp; opaque to the client.
    pub timestamp: String,
}

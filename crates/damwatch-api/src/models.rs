// Telemetry service response types
//
// Wire models for the dam service's JSON API. Fields use `#[serde(default)]`
// liberally because the service omits fields freely depending on sensor
// availability — a missing numeric field must stay `None`, never become zero.

use serde::{Deserialize, Serialize};

// ── Liveness probe ───────────────────────────────────────────────────

/// Response of `GET /`, used by the connectivity self-test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

// ── Sensor readings ──────────────────────────────────────────────────

/// One sensor record from `GET /api/readings` (newest first).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorReadingDto {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    /// Distance from sensor to water surface, in centimeters.
    #[serde(default)]
    pub distance: Option<f64>,
    /// Water level as a percentage of capacity.
    #[serde(default)]
    pub percent: Option<f64>,
    #[serde(default)]
    pub rain_prediction: Option<f64>,
    #[serde(default)]
    pub vibration: Option<bool>,
    #[serde(default)]
    pub valve_state: Option<String>,
    #[serde(default)]
    pub human_detected: Option<bool>,
    /// Service-formatted display timestamp; opaque to the client.
    #[serde(default)]
    pub timestamp: String,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Weather ──────────────────────────────────────────────────────────

/// Current weather from `GET /api/weather`. All fields nullable — the
/// service proxies an upstream forecast API that can partially fail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherDto {
    #[serde(rename = "locationName", default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub cloud: Option<f64>,
    #[serde(default)]
    pub rain_prob: Option<f64>,
    #[serde(default)]
    pub windspeed: Option<f64>,
    #[serde(default)]
    pub wind_direction: Option<f64>,
    #[serde(default)]
    pub sunshine: Option<f64>,
    #[serde(default)]
    pub time: Option<String>,
}

// ── Rainfall prediction ──────────────────────────────────────────────

/// Rain prediction from `GET /api/rainfall`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RainfallDto {
    #[serde(default)]
    pub percent: f64,
    #[serde(rename = "rainLabel", default)]
    pub rain_label: String,
    #[serde(default)]
    pub timestamp: String,
}

// ── Valve ────────────────────────────────────────────────────────────

/// Valve state from `GET /api/valve/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValveStatusDto {
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub timestamp: String,
}

/// Body of `POST /api/valve/control`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValveControlRequest {
    /// `"AUTO"` or `"MANUAL"`.
    pub mode: String,
    /// `"OPEN"`, `"CLOSE"`, or `"NONE"` (mode change only).
    pub command: String,
    pub user_role: String,
    pub user_id: String,
}

/// Acknowledgement of a valve control write. The service documents no
/// schema beyond the success flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

// ── Human detection ──────────────────────────────────────────────────

/// Detector status from `GET /api/human-detection/status`.
///
/// `confidence` is unit-ambiguous at the wire level (fraction or percent
/// depending on detector version); normalization happens in damwatch-core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanDetectionDto {
    #[serde(default)]
    pub human_detected: bool,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub last_checked: String,
    #[serde(default)]
    pub detector_running: bool,
}

// ── Dashboard stats ──────────────────────────────────────────────────

/// Aggregated snapshot from `GET /api/dashboard/stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsDto {
    pub current_reading: CurrentReadingDto,
    #[serde(default)]
    pub statistics: StatisticsDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentReadingDto {
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub water_level: Option<f64>,
    #[serde(default)]
    pub valve_state: Option<String>,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsDto {
    #[serde(default)]
    pub total_readings: u64,
    #[serde(default)]
    pub total_alerts: u64,
    #[serde(default)]
    pub vibration_alerts: u64,
    #[serde(default)]
    pub water_level_alerts: u64,
    #[serde(default)]
    pub human_detection_alerts: u64,
}

// ── Alert logs ───────────────────────────────────────────────────────

/// One alert record from `GET /api/alerts/{kind}/logs` (newest first).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertLogDto {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(rename = "distanceCm", default)]
    pub distance_cm: Option<f64>,
    #[serde(default)]
    pub percent: Option<f64>,
    #[serde(default)]
    pub detected: Option<bool>,
    #[serde(rename = "nodeId", default)]
    pub node_id: Option<String>,
    #[serde(default)]
    pub timestamp: String,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

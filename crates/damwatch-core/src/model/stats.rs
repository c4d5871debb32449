use serde::Serialize;

use super::ValveState;

/// Aggregated dashboard snapshot maintained server-side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub current: CurrentReading,
    pub totals: AlertTotals,
}

/// The service's notion of "the current reading". Preferred over the
/// raw readings feed during value resolution because the service
/// deduplicates and timestamps it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CurrentReading {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub water_level_pct: Option<f64>,
    pub valve_state: Option<ValveState>,
    pub timestamp: String,
}

/// Lifetime counters kept by the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AlertTotals {
    pub total_readings: u64,
    pub total_alerts: u64,
    pub vibration_alerts: u64,
    pub water_level_alerts: u64,
    pub human_detection_alerts: u64,
}

// Wire-to-domain conversion
//
// The single place where service quirks are absorbed: lenient enum
// parsing (unknown valve strings fall back to the safe defaults) and
// detector confidence unit normalization. Nothing past this module
// sees a raw DTO.

use damwatch_api::models::{
    AlertLogDto, CurrentReadingDto, DashboardStatsDto, HumanDetectionDto, RainfallDto,
    SensorReadingDto, ValveStatusDto, WeatherDto,
};

use crate::model::{
    AlertLog, AlertTotals, CurrentReading, DashboardStats, HumanDetection, RainfallForecast,
    SensorReading, ValveMode, ValveState, ValveStatus, Weather,
};

/// Normalize detector confidence to a fraction in `0.0..=1.0`.
///
/// Detector firmware versions disagree on the unit: some report a
/// fraction, some a percentage. Anything above `1.0` is taken as a
/// percentage and divided down exactly once; the result is clamped.
pub fn normalize_confidence(raw: f64) -> f64 {
    let fraction = if raw > 1.0 { raw / 100.0 } else { raw };
    fraction.clamp(0.0, 1.0)
}

/// Parse a wire valve-state string, defaulting to `Closed`.
///
/// `Closed` is the fail-safe reading: treating an unknown state as open
/// would suppress the open-valve warning path.
fn parse_state(raw: &str) -> ValveState {
    raw.parse().unwrap_or(ValveState::Closed)
}

/// Parse a wire valve-mode string, defaulting to `Auto`.
///
/// `Auto` is the restrictive default: it blocks manual actuation until
/// the mode is positively known.
fn parse_mode(raw: &str) -> ValveMode {
    raw.parse().unwrap_or(ValveMode::Auto)
}

impl From<SensorReadingDto> for SensorReading {
    fn from(dto: SensorReadingDto) -> Self {
        Self {
            id: dto.id,
            temperature: dto.temp,
            humidity: dto.humidity,
            distance_cm: dto.distance,
            water_level_pct: dto.percent,
            rain_prediction_pct: dto.rain_prediction,
            vibration: dto.vibration,
            valve_state: dto.valve_state.as_deref().map(parse_state),
            human_detected: dto.human_detected,
            timestamp: dto.timestamp,
        }
    }
}

impl From<WeatherDto> for Weather {
    fn from(dto: WeatherDto) -> Self {
        Self {
            location: dto.location_name,
            temperature: dto.temperature,
            humidity: dto.humidity,
            cloud_pct: dto.cloud,
            rain_probability_pct: dto.rain_prob,
            wind_speed: dto.windspeed,
            wind_direction_deg: dto.wind_direction,
            sunshine: dto.sunshine,
            time: dto.time,
        }
    }
}

impl From<RainfallDto> for RainfallForecast {
    fn from(dto: RainfallDto) -> Self {
        Self {
            percent: dto.percent,
            label: dto.rain_label,
            timestamp: dto.timestamp,
        }
    }
}

impl From<ValveStatusDto> for ValveStatus {
    fn from(dto: ValveStatusDto) -> Self {
        Self {
            state: parse_state(&dto.state),
            mode: parse_mode(&dto.mode),
            reason: dto.reason,
            timestamp: dto.timestamp,
        }
    }
}

impl From<HumanDetectionDto> for HumanDetection {
    fn from(dto: HumanDetectionDto) -> Self {
        Self {
            human_detected: dto.human_detected,
            confidence: normalize_confidence(dto.confidence),
            last_checked: dto.last_checked,
            detector_running: dto.detector_running,
        }
    }
}

impl From<CurrentReadingDto> for CurrentReading {
    fn from(dto: CurrentReadingDto) -> Self {
        Self {
            temperature: dto.temperature,
            humidity: dto.humidity,
            water_level_pct: dto.water_level,
            valve_state: dto.valve_state.as_deref().map(parse_state),
            timestamp: dto.timestamp,
        }
    }
}

impl From<DashboardStatsDto> for DashboardStats {
    fn from(dto: DashboardStatsDto) -> Self {
        Self {
            current: dto.current_reading.into(),
            totals: AlertTotals {
                total_readings: dto.statistics.total_readings,
                total_alerts: dto.statistics.total_alerts,
                vibration_alerts: dto.statistics.vibration_alerts,
                water_level_alerts: dto.statistics.water_level_alerts,
                human_detection_alerts: dto.statistics.human_detection_alerts,
            },
        }
    }
}

impl From<AlertLogDto> for AlertLog {
    fn from(dto: AlertLogDto) -> Self {
        Self {
            id: dto.id,
            kind: dto.kind,
            level: dto.level,
            distance_cm: dto.distance_cm,
            water_level_pct: dto.percent,
            detected: dto.detected,
            node_id: dto.node_id,
            timestamp: dto.timestamp,
        }
    }
}

/// Convert a whole readings feed, preserving order (newest first).
pub fn readings(dtos: Vec<SensorReadingDto>) -> Vec<SensorReading> {
    dtos.into_iter().map(SensorReading::from).collect()
}

/// Convert a whole alert log feed, preserving order (newest first).
pub fn alert_logs(dtos: Vec<AlertLogDto>) -> Vec<AlertLog> {
    dtos.into_iter().map(AlertLog::from).collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp)]

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_confidence_fraction_passes_through() {
        assert_eq!(normalize_confidence(0.42), 0.42);
        assert_eq!(normalize_confidence(1.0), 1.0);
    }

    #[test]
    fn test_confidence_percent_divided_once() {
        assert_eq!(normalize_confidence(87.0), 0.87);
        assert_eq!(normalize_confidence(100.0), 1.0);
    }

    #[test]
    fn test_confidence_out_of_range_clamped() {
        assert_eq!(normalize_confidence(-0.5), 0.0);
        assert_eq!(normalize_confidence(250.0), 1.0);
    }

    #[test]
    fn test_valve_strings_lenient() {
        let dto = ValveStatusDto {
            state: "open".into(),
            mode: "garbage".into(),
            reason: String::new(),
            timestamp: String::new(),
        };
        let status = ValveStatus::from(dto);
        assert_eq!(status.state, ValveState::Open);
        // Unknown mode falls back to the restrictive default.
        assert_eq!(status.mode, ValveMode::Auto);
    }

    #[test]
    fn test_unknown_state_defaults_closed() {
        let dto = ValveStatusDto {
            state: "???".into(),
            mode: "MANUAL".into(),
            reason: String::new(),
            timestamp: String::new(),
        };
        assert_eq!(ValveStatus::from(dto).state, ValveState::Closed);
    }

    #[test]
    fn test_reading_absent_fields_stay_none() {
        let dto = SensorReadingDto {
            id: "r1".into(),
            temp: Some(28.0),
            humidity: None,
            distance: None,
            percent: None,
            rain_prediction: None,
            vibration: None,
            valve_state: None,
            human_detected: None,
            timestamp: "t".into(),
            extra: serde_json::Map::new(),
        };
        let reading = SensorReading::from(dto);
        assert_eq!(reading.temperature, Some(28.0));
        assert_eq!(reading.water_level_pct, None);
        assert_eq!(reading.valve_state, None);
    }
}

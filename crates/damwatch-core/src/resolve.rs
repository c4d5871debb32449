// Value resolution
//
// Collapses the overlapping feeds of a snapshot into one displayable
// figure per metric, tagging each with the source that supplied it.
// Pure function of the snapshot: no I/O, no clock, same input gives
// the same view.

use serde::Serialize;

use crate::model::{AlertLog, SensorReading, ValveState, ValveStatus};
use crate::snapshot::Snapshot;

/// Which feed a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Stats,
    Readings,
    Detector,
    Rainfall,
    AlertLog,
    Fallback,
}

/// A display value together with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolved<T> {
    pub value: T,
    pub source: Source,
}

fn resolved<T>(value: T, source: Source) -> Resolved<T> {
    Resolved { value, source }
}

/// The fully resolved dashboard, one entry per display slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub temperature: Resolved<f64>,
    pub humidity: Resolved<f64>,
    pub timestamp: Resolved<String>,
    pub water_level_pct: Resolved<f64>,
    pub rain_pct: Resolved<f64>,
    pub rain_label: Resolved<String>,
    pub vibration: Resolved<bool>,
    pub human_detected: Resolved<bool>,
    /// Authoritative valve status, absent until its feed first succeeds.
    pub valve: Option<ValveStatus>,
    pub last_water_alert: Resolved<String>,
    pub last_vibration_alert: Resolved<String>,
    pub last_human_alert: Resolved<String>,
    /// Human presence with the valve open. Display emphasis only; the
    /// control interlock decides independently.
    pub critical: bool,
}

/// Resolve a snapshot into its dashboard view.
///
/// Each metric walks a fixed precedence chain, taking the first source
/// that actually has the value. Stale feeds participate like live ones;
/// freshness is surfaced separately, not by dropping data.
pub fn resolve(snapshot: &Snapshot) -> DashboardView {
    let current = snapshot.stats.value().map(|s| &s.current);
    let latest = latest_reading(snapshot);

    let temperature = current
        .and_then(|c| c.temperature)
        .map(|v| resolved(v, Source::Stats))
        .or_else(|| {
            latest
                .and_then(|r| r.temperature)
                .map(|v| resolved(v, Source::Readings))
        })
        .unwrap_or_else(|| resolved(0.0, Source::Fallback));

    let humidity = current
        .and_then(|c| c.humidity)
        .map(|v| resolved(v, Source::Stats))
        .or_else(|| {
            latest
                .and_then(|r| r.humidity)
                .map(|v| resolved(v, Source::Readings))
        })
        .unwrap_or_else(|| resolved(0.0, Source::Fallback));

    let water_level_pct = current
        .and_then(|c| c.water_level_pct)
        .map(|v| resolved(v, Source::Stats))
        .or_else(|| {
            latest
                .and_then(|r| r.water_level_pct)
                .map(|v| resolved(v, Source::Readings))
        })
        .unwrap_or_else(|| resolved(0.0, Source::Fallback));

    let timestamp = current
        .map(|c| c.timestamp.as_str())
        .filter(|t| !t.is_empty())
        .map(|t| resolved(t.to_string(), Source::Stats))
        .or_else(|| {
            latest
                .map(|r| r.timestamp.as_str())
                .filter(|t| !t.is_empty())
                .map(|t| resolved(t.to_string(), Source::Readings))
        })
        .unwrap_or_else(|| resolved(String::new(), Source::Fallback));

    let (rain_pct, rain_label) = match snapshot.rainfall.value() {
        Some(r) => (
            resolved(r.percent, Source::Rainfall),
            resolved(r.label.clone(), Source::Rainfall),
        ),
        None => (
            resolved(0.0, Source::Fallback),
            resolved("NO".to_string(), Source::Fallback),
        ),
    };

    let vibration = latest.and_then(|r| r.vibration).map_or_else(
        || resolved(false, Source::Fallback),
        |v| resolved(v, Source::Readings),
    );

    let human_detected = resolve_human(snapshot, latest);

    let valve = snapshot.valve.value().cloned();
    let critical =
        human_detected.value && valve.as_ref().is_some_and(|v| v.state == ValveState::Open);

    DashboardView {
        temperature,
        humidity,
        timestamp,
        water_level_pct,
        rain_pct,
        rain_label,
        vibration,
        human_detected,
        valve,
        last_water_alert: latest_alert(&snapshot.water_alerts),
        last_vibration_alert: latest_alert(&snapshot.vibration_alerts),
        last_human_alert: latest_alert(&snapshot.human_alerts),
        critical,
    }
}

fn latest_reading(snapshot: &Snapshot) -> Option<&SensorReading> {
    snapshot.readings.value().and_then(|r| r.first())
}

/// Human presence is biased toward reporting danger: a `true` from
/// either the detector or the latest reading wins over a `false` from
/// the other.
fn resolve_human(snapshot: &Snapshot, latest: Option<&SensorReading>) -> Resolved<bool> {
    let detector = snapshot.detection.value().map(|d| d.human_detected);
    let reading = latest.and_then(|r| r.human_detected);

    match (detector, reading) {
        (Some(true), _) => resolved(true, Source::Detector),
        (_, Some(true)) => resolved(true, Source::Readings),
        (Some(false), _) => resolved(false, Source::Detector),
        (None, Some(false)) => resolved(false, Source::Readings),
        (None, None) => resolved(false, Source::Fallback),
    }
}

fn latest_alert(feed: &crate::snapshot::FeedValue<Vec<AlertLog>>) -> Resolved<String> {
    feed.value().and_then(|logs| logs.first()).map_or_else(
        || resolved(String::new(), Source::Fallback),
        |log| resolved(log.timestamp.clone(), Source::AlertLog),
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp)]

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{
        AlertLog, CurrentReading, DashboardStats, HumanDetection, SensorReading, ValveMode,
        ValveStatus,
    };
    use crate::snapshot::FeedValue;

    fn reading(id: &str) -> SensorReading {
        SensorReading {
            id: id.into(),
            temperature: Some(27.0),
            humidity: Some(60.0),
            distance_cm: Some(40.0),
            water_level_pct: Some(82.0),
            rain_prediction_pct: None,
            vibration: Some(false),
            valve_state: None,
            human_detected: Some(false),
            timestamp: "reading-ts".into(),
        }
    }

    fn stats_with_level(level: Option<f64>) -> DashboardStats {
        DashboardStats {
            current: CurrentReading {
                temperature: Some(28.5),
                humidity: Some(61.0),
                water_level_pct: level,
                valve_state: None,
                timestamp: "stats-ts".into(),
            },
            totals: crate::model::AlertTotals::default(),
        }
    }

    fn detection(detected: bool) -> HumanDetection {
        HumanDetection {
            human_detected: detected,
            confidence: 0.9,
            last_checked: "t".into(),
            detector_running: true,
        }
    }

    fn valve(state: ValveState) -> ValveStatus {
        ValveStatus {
            state,
            mode: ValveMode::Manual,
            reason: "MANUAL".into(),
            timestamp: "t".into(),
        }
    }

    #[test]
    fn test_stats_wins_over_readings() {
        let snapshot = Snapshot {
            stats: FeedValue::Live(stats_with_level(Some(55.0))),
            readings: FeedValue::Live(vec![reading("r1")]),
            ..Snapshot::default()
        };
        let view = resolve(&snapshot);

        assert_eq!(view.water_level_pct, resolved(55.0, Source::Stats));
        assert_eq!(view.temperature, resolved(28.5, Source::Stats));
        assert_eq!(view.timestamp.value, "stats-ts");
    }

    #[test]
    fn test_readings_fill_stats_gap() {
        // Stats feed is present but its water level slot is empty: the
        // chain must step down to the readings feed, not to zero.
        let snapshot = Snapshot {
            stats: FeedValue::Live(stats_with_level(None)),
            readings: FeedValue::Live(vec![reading("r1")]),
            ..Snapshot::default()
        };
        let view = resolve(&snapshot);
        assert_eq!(view.water_level_pct, resolved(82.0, Source::Readings));
    }

    #[test]
    fn test_fallback_is_tagged() {
        let view = resolve(&Snapshot::default());
        assert_eq!(view.water_level_pct, resolved(0.0, Source::Fallback));
        assert_eq!(view.rain_label, resolved("NO".to_string(), Source::Fallback));
        assert!(!view.critical);
        assert_eq!(view.valve, None);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let snapshot = Snapshot {
            stats: FeedValue::Live(stats_with_level(Some(55.0))),
            readings: FeedValue::Stale(vec![reading("r1")]),
            detection: FeedValue::Live(detection(false)),
            ..Snapshot::default()
        };
        assert_eq!(resolve(&snapshot), resolve(&snapshot));
    }

    #[test]
    fn test_stale_feed_still_resolves() {
        let snapshot = Snapshot {
            readings: FeedValue::Stale(vec![reading("r1")]),
            ..Snapshot::default()
        };
        let view = resolve(&snapshot);
        assert_eq!(view.water_level_pct, resolved(82.0, Source::Readings));
    }

    #[test]
    fn test_human_flag_or_biased() {
        // Detector says no, latest reading says yes: danger wins.
        let mut r = reading("r1");
        r.human_detected = Some(true);
        let snapshot = Snapshot {
            detection: FeedValue::Live(detection(false)),
            readings: FeedValue::Live(vec![r]),
            ..Snapshot::default()
        };
        let view = resolve(&snapshot);
        assert_eq!(view.human_detected, resolved(true, Source::Readings));
    }

    #[test]
    fn test_detector_true_wins() {
        let snapshot = Snapshot {
            detection: FeedValue::Live(detection(true)),
            readings: FeedValue::Live(vec![reading("r1")]),
            ..Snapshot::default()
        };
        let view = resolve(&snapshot);
        assert_eq!(view.human_detected, resolved(true, Source::Detector));
    }

    #[test]
    fn test_critical_needs_open_valve_and_human() {
        let snapshot = Snapshot {
            detection: FeedValue::Live(detection(true)),
            valve: FeedValue::Live(valve(ValveState::Open)),
            ..Snapshot::default()
        };
        assert!(resolve(&snapshot).critical);

        let snapshot = Snapshot {
            detection: FeedValue::Live(detection(true)),
            valve: FeedValue::Live(valve(ValveState::Closed)),
            ..Snapshot::default()
        };
        assert!(!resolve(&snapshot).critical);
    }

    #[test]
    fn test_latest_alert_timestamps() {
        let log = AlertLog {
            id: "a1".into(),
            kind: "vibration".into(),
            level: Some("HIGH".into()),
            distance_cm: None,
            water_level_pct: None,
            detected: None,
            node_id: None,
            timestamp: "alert-ts".into(),
        };
        let snapshot = Snapshot {
            vibration_alerts: FeedValue::Live(vec![log]),
            water_alerts: FeedValue::Live(vec![]),
            ..Snapshot::default()
        };
        let view = resolve(&snapshot);

        assert_eq!(
            view.last_vibration_alert,
            resolved("alert-ts".to_string(), Source::AlertLog)
        );
        // Empty log list falls through to the fallback, tagged as such.
        assert_eq!(
            view.last_water_alert,
            resolved(String::new(), Source::Fallback)
        );
    }
}

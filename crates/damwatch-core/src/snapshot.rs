// Snapshot store
//
// A `Snapshot` is an immutable view of every feed the console tracks,
// replaced wholesale after each poll cycle. A failed feed carries its
// last known value forward, demoted to `Stale` so a reader can always
// tell carried data from fresh data.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{
    AlertLog, DashboardStats, HumanDetection, RainfallForecast, SensorReading, ValveStatus, Weather,
};

/// Banner text shown when every feed attempted in a cycle failed.
pub const ALL_FEEDS_DOWN: &str = "telemetry service unreachable, showing last known data";

// ── Feed freshness ───────────────────────────────────────────────────

/// One feed's value together with its freshness.
///
/// `Stale` holds the last successfully fetched value after one or more
/// failed polls. `Unavailable` means the feed has never succeeded since
/// startup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "freshness", content = "value", rename_all = "snake_case")]
pub enum FeedValue<T> {
    Live(T),
    Stale(T),
    Unavailable,
}

impl<T> Default for FeedValue<T> {
    fn default() -> Self {
        FeedValue::Unavailable
    }
}

impl<T> FeedValue<T> {
    /// The value regardless of freshness, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            FeedValue::Live(v) | FeedValue::Stale(v) => Some(v),
            FeedValue::Unavailable => None,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, FeedValue::Live(_))
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, FeedValue::Unavailable)
    }
}

impl<T: Clone> FeedValue<T> {
    /// The value to keep after a failed poll: whatever was held before,
    /// demoted to `Stale`. A feed that never succeeded stays
    /// `Unavailable`.
    fn carried(&self) -> FeedValue<T> {
        match self {
            FeedValue::Live(v) | FeedValue::Stale(v) => FeedValue::Stale(v.clone()),
            FeedValue::Unavailable => FeedValue::Unavailable,
        }
    }
}

// ── Snapshot ─────────────────────────────────────────────────────────

/// Everything the console knows about the dam at one point in time.
///
/// Snapshots are immutable once published; each poll cycle builds a new
/// one from the previous snapshot plus that cycle's outcomes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    pub readings: FeedValue<Vec<SensorReading>>,
    pub weather: FeedValue<Weather>,
    pub rainfall: FeedValue<RainfallForecast>,
    pub valve: FeedValue<ValveStatus>,
    pub detection: FeedValue<HumanDetection>,
    pub stats: FeedValue<DashboardStats>,
    pub water_alerts: FeedValue<Vec<AlertLog>>,
    pub vibration_alerts: FeedValue<Vec<AlertLog>>,
    pub human_alerts: FeedValue<Vec<AlertLog>>,
    /// When the last poll cycle completed, `None` before the first.
    pub last_update: Option<DateTime<Utc>>,
    /// Set when every feed attempted in the last cycle failed.
    pub error: Option<String>,
}

/// Per-feed results of one poll cycle.
///
/// `None` means the feed was not part of this cycle's set (the two
/// cadences poll different subsets) and the previous value passes
/// through untouched, freshness included.
pub type FeedOutcome<T> = Option<Result<T, damwatch_api::Error>>;

#[derive(Debug, Default)]
pub struct CycleOutcome {
    pub readings: FeedOutcome<Vec<SensorReading>>,
    pub weather: FeedOutcome<Weather>,
    pub rainfall: FeedOutcome<RainfallForecast>,
    pub valve: FeedOutcome<ValveStatus>,
    pub detection: FeedOutcome<HumanDetection>,
    pub stats: FeedOutcome<DashboardStats>,
    pub water_alerts: FeedOutcome<Vec<AlertLog>>,
    pub vibration_alerts: FeedOutcome<Vec<AlertLog>>,
    pub human_alerts: FeedOutcome<Vec<AlertLog>>,
}

/// Running tally of how a cycle's attempted feeds fared.
#[derive(Debug, Default)]
struct Tally {
    attempted: usize,
    failed: usize,
}

impl Tally {
    fn apply<T: Clone>(&mut self, prev: &FeedValue<T>, outcome: FeedOutcome<T>) -> FeedValue<T> {
        match outcome {
            None => prev.clone(),
            Some(Ok(value)) => {
                self.attempted += 1;
                FeedValue::Live(value)
            }
            Some(Err(_)) => {
                self.attempted += 1;
                self.failed += 1;
                prev.carried()
            }
        }
    }
}

impl Snapshot {
    /// Fold one cycle's outcomes into a new snapshot.
    ///
    /// Pure with respect to `prev`: the previous snapshot is never
    /// mutated. The error banner is set exactly when every feed the
    /// cycle attempted failed; any single success clears it.
    pub fn merge(prev: &Snapshot, cycle: CycleOutcome, now: DateTime<Utc>) -> Snapshot {
        let mut tally = Tally::default();

        let next = Snapshot {
            readings: tally.apply(&prev.readings, cycle.readings),
            weather: tally.apply(&prev.weather, cycle.weather),
            rainfall: tally.apply(&prev.rainfall, cycle.rainfall),
            valve: tally.apply(&prev.valve, cycle.valve),
            detection: tally.apply(&prev.detection, cycle.detection),
            stats: tally.apply(&prev.stats, cycle.stats),
            water_alerts: tally.apply(&prev.water_alerts, cycle.water_alerts),
            vibration_alerts: tally.apply(&prev.vibration_alerts, cycle.vibration_alerts),
            human_alerts: tally.apply(&prev.human_alerts, cycle.human_alerts),
            last_update: Some(now),
            error: None,
        };

        let all_failed = tally.attempted > 0 && tally.failed == tally.attempted;
        Snapshot {
            error: all_failed.then(|| ALL_FEEDS_DOWN.to_string()),
            ..next
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::RainfallForecast;

    fn unreachable_err() -> damwatch_api::Error {
        damwatch_api::Error::Http { status: 503 }
    }

    fn rainfall(pct: f64) -> RainfallForecast {
        RainfallForecast {
            percent: pct,
            label: "NO".into(),
            timestamp: "t".into(),
        }
    }

    #[test]
    fn test_success_publishes_live() {
        let cycle = CycleOutcome {
            rainfall: Some(Ok(rainfall(10.0))),
            ..CycleOutcome::default()
        };
        let next = Snapshot::merge(&Snapshot::default(), cycle, Utc::now());

        assert_eq!(next.rainfall, FeedValue::Live(rainfall(10.0)));
        assert_eq!(next.error, None);
        assert!(next.last_update.is_some());
    }

    #[test]
    fn test_failure_carries_forward_as_stale() {
        let prev = Snapshot {
            rainfall: FeedValue::Live(rainfall(10.0)),
            ..Snapshot::default()
        };
        let cycle = CycleOutcome {
            rainfall: Some(Err(unreachable_err())),
            weather: Some(Ok(Weather::default())),
            ..CycleOutcome::default()
        };
        let next = Snapshot::merge(&prev, cycle, Utc::now());

        // Carried value is demoted, never silently live.
        assert_eq!(next.rainfall, FeedValue::Stale(rainfall(10.0)));
        // One success in the cycle keeps the banner clear.
        assert_eq!(next.error, None);
    }

    #[test]
    fn test_never_succeeded_stays_unavailable() {
        let cycle = CycleOutcome {
            rainfall: Some(Err(unreachable_err())),
            weather: Some(Ok(Weather::default())),
            ..CycleOutcome::default()
        };
        let next = Snapshot::merge(&Snapshot::default(), cycle, Utc::now());
        assert_eq!(next.rainfall, FeedValue::Unavailable);
    }

    #[test]
    fn test_banner_set_when_all_attempted_fail() {
        let prev = Snapshot {
            rainfall: FeedValue::Live(rainfall(10.0)),
            ..Snapshot::default()
        };
        let cycle = CycleOutcome {
            rainfall: Some(Err(unreachable_err())),
            weather: Some(Err(unreachable_err())),
            ..CycleOutcome::default()
        };
        let next = Snapshot::merge(&prev, cycle, Utc::now());

        assert_eq!(next.error.as_deref(), Some(ALL_FEEDS_DOWN));
        assert_eq!(next.rainfall, FeedValue::Stale(rainfall(10.0)));
    }

    #[test]
    fn test_banner_clears_on_recovery() {
        let prev = Snapshot {
            error: Some(ALL_FEEDS_DOWN.into()),
            ..Snapshot::default()
        };
        let cycle = CycleOutcome {
            rainfall: Some(Ok(rainfall(5.0))),
            ..CycleOutcome::default()
        };
        let next = Snapshot::merge(&prev, cycle, Utc::now());
        assert_eq!(next.error, None);
    }

    #[test]
    fn test_unattempted_feed_passes_through_untouched() {
        let prev = Snapshot {
            rainfall: FeedValue::Stale(rainfall(10.0)),
            weather: FeedValue::Live(Weather::default()),
            ..Snapshot::default()
        };
        let cycle = CycleOutcome {
            detection: Some(Err(unreachable_err())),
            ..CycleOutcome::default()
        };
        let next = Snapshot::merge(&prev, cycle, Utc::now());

        // Feeds outside the cycle's set keep value and freshness.
        assert_eq!(next.rainfall, FeedValue::Stale(rainfall(10.0)));
        assert_eq!(next.weather, FeedValue::Live(Weather::default()));
        // The banner only considers attempted feeds.
        assert_eq!(next.error.as_deref(), Some(ALL_FEEDS_DOWN));
    }

    #[test]
    fn test_stale_value_repromoted_on_success() {
        let prev = Snapshot {
            rainfall: FeedValue::Stale(rainfall(10.0)),
            ..Snapshot::default()
        };
        let cycle = CycleOutcome {
            rainfall: Some(Ok(rainfall(20.0))),
            ..CycleOutcome::default()
        };
        let next = Snapshot::merge(&prev, cycle, Utc::now());
        assert_eq!(next.rainfall, FeedValue::Live(rainfall(20.0)));
    }
}

// Console orchestrator
//
// Owns the API client, the published snapshot, and the poll tasks.
// Two cadences poll disjoint feed emphasis: the fast set drives the
// dashboard, the slow set refreshes histories. Both settle every feed
// independently; a cycle never fails as a whole.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use damwatch_api::models::{HealthStatus, ValveControlRequest};
use damwatch_api::{ApiClient, TlsMode, TransportConfig};

use crate::config::{ConsoleConfig, TlsVerification};
use crate::control::{self, ControlError, ControlRequest, ValveCommand};
use crate::convert;
use crate::error::CoreError;
use crate::model::{
    AlertKind, AlertLog, DashboardStats, HumanDetection, RainfallForecast, SensorReading,
    ValveMode, ValveStatus, Weather,
};
use crate::resolve;
use crate::session::Session;
use crate::snapshot::{CycleOutcome, Snapshot};

/// The operator console core: polls the telemetry service, publishes
/// snapshots, and routes gated control commands.
///
/// Cheap to clone; all clones share the same snapshot channel, cancel
/// token, and in-flight guard.
#[derive(Clone)]
pub struct Console {
    inner: Arc<ConsoleInner>,
}

struct ConsoleInner {
    config: ConsoleConfig,
    client: ApiClient,
    snapshot_tx: watch::Sender<Arc<Snapshot>>,
    cancel: CancellationToken,
    control_in_flight: AtomicBool,
}

/// Handle to one running poll task.
///
/// [`PollHandle::stop`] cancels the task and waits for it to finish,
/// so no poll cycle is left mid-flight after it returns.
pub struct PollHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl PollHandle {
    pub async fn stop(self) {
        self.cancel.cancel();
        // The task only exits through its select loop; a join error
        // would mean it panicked, which the poll body cannot do.
        let _ = self.task.await;
    }
}

enum PollSet {
    Dashboard,
    Logs,
}

impl Console {
    /// Build a console from a resolved configuration.
    pub fn new(config: ConsoleConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: match &config.tls {
                TlsVerification::SystemDefaults => TlsMode::System,
                TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
                TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
            },
            timeout: config.timeout,
        };
        let client = ApiClient::new(config.url.clone(), &transport)?;
        let (snapshot_tx, _) = watch::channel(Arc::new(Snapshot::default()));

        Ok(Self {
            inner: Arc::new(ConsoleInner {
                config,
                client,
                snapshot_tx,
                cancel: CancellationToken::new(),
                control_in_flight: AtomicBool::new(false),
            }),
        })
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.inner.config
    }

    // ── Snapshot access ──────────────────────────────────────────────

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.inner.snapshot_tx.borrow().clone()
    }

    /// Subscribe to snapshot updates. Each published snapshot is
    /// delivered at most once per receiver; slow readers only ever
    /// skip intermediates, never see them out of order.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.inner.snapshot_tx.subscribe()
    }

    // ── Poll cycles ──────────────────────────────────────────────────

    /// Run one dashboard cycle: all fast feeds concurrently, each
    /// settled independently, then publish the merged snapshot.
    pub async fn poll_dashboard_once(&self) -> Arc<Snapshot> {
        let client = &self.inner.client;
        let (readings, weather, rainfall, valve, detection, stats, vibration, human) = tokio::join!(
            client.readings(),
            client.weather(),
            client.rainfall(),
            client.valve_status(),
            client.human_detection_status(),
            client.dashboard_stats(),
            client.alert_logs(AlertKind::Vibration.as_path()),
            client.alert_logs(AlertKind::Human.as_path()),
        );

        let cycle = CycleOutcome {
            readings: Some(settle("readings", readings.map(convert::readings))),
            weather: Some(settle("weather", weather.map(Weather::from))),
            rainfall: Some(settle("rainfall", rainfall.map(RainfallForecast::from))),
            valve: Some(settle("valve", valve.map(ValveStatus::from))),
            detection: Some(settle("detection", detection.map(HumanDetection::from))),
            stats: Some(settle("stats", stats.map(DashboardStats::from))),
            vibration_alerts: Some(settle("vibration_alerts", vibration.map(convert::alert_logs))),
            human_alerts: Some(settle("human_alerts", human.map(convert::alert_logs))),
            ..CycleOutcome::default()
        };
        self.publish(cycle)
    }

    /// Run one logs cycle: the history feeds, same settle rules.
    pub async fn poll_logs_once(&self) -> Arc<Snapshot> {
        let client = &self.inner.client;
        let (readings, water, vibration, human) = tokio::join!(
            client.readings(),
            client.alert_logs(AlertKind::WaterLevel.as_path()),
            client.alert_logs(AlertKind::Vibration.as_path()),
            client.alert_logs(AlertKind::Human.as_path()),
        );

        let cycle = CycleOutcome {
            readings: Some(settle("readings", readings.map(convert::readings))),
            water_alerts: Some(settle("water_alerts", water.map(convert::alert_logs))),
            vibration_alerts: Some(settle("vibration_alerts", vibration.map(convert::alert_logs))),
            human_alerts: Some(settle("human_alerts", human.map(convert::alert_logs))),
            ..CycleOutcome::default()
        };
        self.publish(cycle)
    }

    fn publish(&self, cycle: CycleOutcome) -> Arc<Snapshot> {
        let prev = self.snapshot();
        let next = Arc::new(Snapshot::merge(&prev, cycle, Utc::now()));
        self.inner.snapshot_tx.send_replace(Arc::clone(&next));
        debug!(error = ?next.error, "snapshot published");
        next
    }

    /// Start the dashboard poll task. The first cycle runs immediately.
    pub fn start_dashboard_poll(&self) -> PollHandle {
        self.spawn_poll(PollSet::Dashboard, self.inner.config.dashboard_poll)
    }

    /// Start the logs poll task. The first cycle runs immediately.
    pub fn start_logs_poll(&self) -> PollHandle {
        self.spawn_poll(PollSet::Logs, self.inner.config.logs_poll)
    }

    fn spawn_poll(&self, set: PollSet, period: Duration) -> PollHandle {
        let cancel = self.inner.cancel.child_token();
        let token = cancel.clone();
        let console = self.clone();

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // A cycle slower than the period delays the next tick
            // instead of bursting; cycles never overlap.
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    () = token.cancelled() => break,
                    _ = interval.tick() => {
                        match set {
                            PollSet::Dashboard => { console.poll_dashboard_once().await; }
                            PollSet::Logs => { console.poll_logs_once().await; }
                        }
                    }
                }
            }
        });

        PollHandle { cancel, task }
    }

    /// Cancel every poll task started from this console.
    pub fn shutdown(&self) {
        self.inner.cancel.cancel();
    }

    // ── One-shot reads ───────────────────────────────────────────────

    pub async fn health(&self) -> Result<HealthStatus, CoreError> {
        Ok(self.inner.client.health().await?)
    }

    pub async fn readings(&self) -> Result<Vec<SensorReading>, CoreError> {
        Ok(convert::readings(self.inner.client.readings().await?))
    }

    pub async fn weather(&self) -> Result<Weather, CoreError> {
        Ok(self.inner.client.weather().await?.into())
    }

    pub async fn rainfall(&self) -> Result<RainfallForecast, CoreError> {
        Ok(self.inner.client.rainfall().await?.into())
    }

    pub async fn stats(&self) -> Result<DashboardStats, CoreError> {
        Ok(self.inner.client.dashboard_stats().await?.into())
    }

    pub async fn valve_status(&self) -> Result<ValveStatus, CoreError> {
        Ok(self.inner.client.valve_status().await?.into())
    }

    pub async fn detection(&self) -> Result<HumanDetection, CoreError> {
        Ok(self.inner.client.human_detection_status().await?.into())
    }

    pub async fn alert_logs(&self, kind: AlertKind) -> Result<Vec<AlertLog>, CoreError> {
        Ok(convert::alert_logs(
            self.inner.client.alert_logs(kind.as_path()).await?,
        ))
    }

    // ── Control ──────────────────────────────────────────────────────

    /// Issue a gated valve control command.
    ///
    /// Gates run against the current snapshot before any HTTP is sent;
    /// a local rejection produces no network traffic at all. On
    /// success nothing is updated optimistically: the next status poll
    /// is the only source of the new state.
    pub async fn control_valve(
        &self,
        session: &Session,
        request: ControlRequest,
    ) -> Result<(), ControlError> {
        let snapshot = self.snapshot();
        let Some(status) = snapshot.valve.value() else {
            return Err(ControlError::StatusUnknown);
        };
        let human_detected = resolve::resolve(&snapshot).human_detected.value;

        control::authorize(session, status, human_detected, request)?;

        // One command in flight at a time, across all clones.
        if self
            .inner
            .control_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ControlError::CommandInFlight);
        }

        let (mode, command) = match request {
            ControlRequest::SetMode(mode) => (mode, "NONE"),
            ControlRequest::Actuate(cmd) => (ValveMode::Manual, cmd.as_wire()),
        };
        let wire = ValveControlRequest {
            mode: mode.to_string(),
            command: command.to_string(),
            user_role: "admin".to_string(),
            user_id: session.user().unwrap_or("operator").to_string(),
        };

        let result = self.inner.client.valve_control(&wire).await;
        self.inner.control_in_flight.store(false, Ordering::Release);

        match result {
            Ok(ack) if ack.success => Ok(()),
            Ok(ack) => {
                let message = ack
                    .error
                    .unwrap_or_else(|| "command refused without detail".to_string());
                warn!(message, "valve control refused");
                Err(ControlError::Remote(CoreError::Rejected { message }))
            }
            Err(e) => Err(ControlError::Remote(e.into())),
        }
    }

    /// Convenience wrappers over [`Console::control_valve`].
    pub async fn open_valve(&self, session: &Session) -> Result<(), ControlError> {
        self.control_valve(session, ControlRequest::Actuate(ValveCommand::Open))
            .await
    }

    pub async fn close_valve(&self, session: &Session) -> Result<(), ControlError> {
        self.control_valve(session, ControlRequest::Actuate(ValveCommand::Close))
            .await
    }

    pub async fn set_valve_mode(
        &self,
        session: &Session,
        mode: ValveMode,
    ) -> Result<(), ControlError> {
        self.control_valve(session, ControlRequest::SetMode(mode)).await
    }
}

/// Settle one feed outcome: log the failure and keep the error for the
/// merge instead of propagating it.
fn settle<T>(
    feed: &'static str,
    result: Result<T, damwatch_api::Error>,
) -> Result<T, damwatch_api::Error> {
    if let Err(e) = &result {
        warn!(feed, error = %e, transient = e.is_transient(), "feed poll failed");
    }
    result
}

// Telemetry read endpoints
//
// Sensor history, weather, rainfall prediction, and the aggregated
// dashboard snapshot. Each is an independently pollable feed.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{DashboardStatsDto, RainfallDto, SensorReadingDto, WeatherDto};

impl ApiClient {
    /// Fetch the sensor reading history, newest first.
    ///
    /// `GET /api/readings`
    pub async fn readings(&self) -> Result<Vec<SensorReadingDto>, Error> {
        debug!("fetching sensor readings");
        self.get("/api/readings").await
    }

    /// Fetch the current weather at the installation site.
    ///
    /// `GET /api/weather`
    pub async fn weather(&self) -> Result<WeatherDto, Error> {
        debug!("fetching weather");
        self.get("/api/weather").await
    }

    /// Fetch the current rain prediction.
    ///
    /// `GET /api/rainfall`
    pub async fn rainfall(&self) -> Result<RainfallDto, Error> {
        debug!("fetching rainfall prediction");
        self.get("/api/rainfall").await
    }

    /// Fetch the aggregated dashboard snapshot (current reading + totals).
    ///
    /// `GET /api/dashboard/stats`
    pub async fn dashboard_stats(&self) -> Result<DashboardStatsDto, Error> {
        debug!("fetching dashboard stats");
        self.get("/api/dashboard/stats").await
    }
}

use serde::Serialize;

/// Current weather at the dam site. The service proxies an upstream
/// forecast API that can partially fail, so every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Weather {
    pub location: Option<String>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub cloud_pct: Option<f64>,
    pub rain_probability_pct: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction_deg: Option<f64>,
    pub sunshine: Option<f64>,
    pub time: Option<String>,
}

/// Rain prediction for the site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RainfallForecast {
    /// Chance of rain, 0..=100.
    pub percent: f64,
    /// Human-readable label, e.g. `"NO"`, `"LIGHT"`, `"HEAVY"`.
    pub label: String,
    pub timestamp: String,
}

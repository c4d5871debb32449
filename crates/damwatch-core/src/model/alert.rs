use serde::Serialize;
use strum::{Display, EnumString};

/// The three alert categories the service keeps separate logs for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    #[strum(serialize = "waterlevel", serialize = "water-level")]
    WaterLevel,
    #[strum(serialize = "vibration")]
    Vibration,
    #[strum(serialize = "human")]
    Human,
}

impl AlertKind {
    pub const ALL: [AlertKind; 3] = [AlertKind::WaterLevel, AlertKind::Vibration, AlertKind::Human];

    /// The path segment the service expects in `/api/alerts/{kind}/logs`.
    pub fn as_path(self) -> &'static str {
        match self {
            AlertKind::WaterLevel => "waterlevel",
            AlertKind::Vibration => "vibration",
            AlertKind::Human => "human",
        }
    }
}

/// One alert record, newest first in feed order. Which detail fields
/// are populated depends on the category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertLog {
    pub id: String,
    /// Raw category string as recorded by the service.
    pub kind: String,
    pub level: Option<String>,
    pub distance_cm: Option<f64>,
    pub water_level_pct: Option<f64>,
    pub detected: Option<bool>,
    pub node_id: Option<String>,
    pub timestamp: String,
}

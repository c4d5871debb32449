use serde::Serialize;
use strum::{Display, EnumString};

/// Physical valve position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValveState {
    Open,
    Closed,
}

/// Valve control mode.
///
/// In `Auto` the service's own controller drives the valve and operator
/// actuation commands are rejected locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValveMode {
    Auto,
    Manual,
}

/// Authoritative valve state as last reported by the service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValveStatus {
    pub state: ValveState,
    pub mode: ValveMode,
    /// Service-side reason string, e.g. `MANUAL_OPEN` or `AUTO_HIGH_WATER`.
    pub reason: String,
    pub timestamp: String,
}

// Domain model
//
// Parsed, unit-normalized counterparts of the wire DTOs in
// damwatch-api. Everything downstream (snapshot store, resolution,
// control gating, CLI rendering) works on these types only.

mod alert;
mod detection;
mod reading;
mod stats;
mod valve;
mod weather;

pub use alert::{AlertKind, AlertLog};
pub use detection::HumanDetection;
pub use reading::SensorReading;
pub use stats::{AlertTotals, CurrentReading, DashboardStats};
pub use valve::{ValveMode, ValveState, ValveStatus};
pub use weather::{RainfallForecast, Weather};

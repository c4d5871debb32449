//! Sensor readings command handler.

use tabled::Tabled;

use damwatch_core::Console;
use damwatch_core::model::SensorReading;

use crate::cli::{GlobalOpts, ReadingsArgs};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct ReadingRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Temp °C")]
    temperature: String,
    #[tabled(rename = "Humidity %")]
    humidity: String,
    #[tabled(rename = "Level %")]
    level: String,
    #[tabled(rename = "Vibration")]
    vibration: String,
    #[tabled(rename = "Human")]
    human: String,
    #[tabled(rename = "Valve")]
    valve: String,
    #[tabled(rename = "Timestamp")]
    timestamp: String,
}

fn to_row(reading: &SensorReading) -> ReadingRow {
    ReadingRow {
        id: reading.id.clone(),
        temperature: util::opt_num(reading.temperature),
        humidity: util::opt_num(reading.humidity),
        level: util::opt_num(reading.water_level_pct),
        vibration: util::opt_bool(reading.vibration),
        human: util::opt_bool(reading.human_detected),
        valve: util::opt_valve(reading.valve_state),
        timestamp: reading.timestamp.clone(),
    }
}

pub async fn handle(
    console: &Console,
    args: ReadingsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut readings = console.readings().await?;
    readings.truncate(args.limit);

    let rendered = output::render_rows(&global.output, &readings, to_row);
    output::print_output(&rendered, global.quiet);
    Ok(())
}

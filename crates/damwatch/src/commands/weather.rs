//! Weather command handler.

use std::fmt::Write as _;

use damwatch_core::Console;
use damwatch_core::model::Weather;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(console: &Console, global: &GlobalOpts) -> Result<(), CliError> {
    let weather = console.weather().await?;

    let rendered = output::render_single(&global.output, &weather, detail);
    output::print_output(&rendered, global.quiet);
    Ok(())
}

fn detail(weather: &Weather) -> String {
    let mut out = String::new();
    if let Some(location) = &weather.location {
        let _ = writeln!(out, "Location       {location}");
    }
    let _ = writeln!(out, "Temperature    {} °C", util::opt_num(weather.temperature));
    let _ = writeln!(out, "Humidity       {} %", util::opt_num(weather.humidity));
    let _ = writeln!(out, "Cloud cover    {} %", util::opt_num(weather.cloud_pct));
    let _ = writeln!(
        out,
        "Rain chance    {} %",
        util::opt_num(weather.rain_probability_pct)
    );
    let _ = writeln!(out, "Wind           {} km/h", util::opt_num(weather.wind_speed));
    let _ = writeln!(out, "Sunshine       {}", util::opt_num(weather.sunshine));
    if let Some(time) = &weather.time {
        let _ = writeln!(out, "As of          {time}");
    }
    out.trim_end().to_string()
}

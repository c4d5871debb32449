//! Service statistics command handler.

use std::fmt::Write as _;

use damwatch_core::Console;
use damwatch_core::model::DashboardStats;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(console: &Console, global: &GlobalOpts) -> Result<(), CliError> {
    let stats = console.stats().await?;

    let rendered = output::render_single(&global.output, &stats, detail);
    output::print_output(&rendered, global.quiet);
    Ok(())
}

fn detail(stats: &DashboardStats) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Current reading");
    let _ = writeln!(
        out,
        "  Temperature    {} °C",
        util::opt_num(stats.current.temperature)
    );
    let _ = writeln!(out, "  Humidity       {} %", util::opt_num(stats.current.humidity));
    let _ = writeln!(
        out,
        "  Water level    {} %",
        util::opt_num(stats.current.water_level_pct)
    );
    let _ = writeln!(out, "  Valve          {}", util::opt_valve(stats.current.valve_state));
    if !stats.current.timestamp.is_empty() {
        let _ = writeln!(out, "  As of          {}", stats.current.timestamp);
    }

    let _ = writeln!(out, "Totals");
    let _ = writeln!(out, "  Readings       {}", stats.totals.total_readings);
    let _ = writeln!(out, "  Alerts         {}", stats.totals.total_alerts);
    let _ = writeln!(out, "  Vibration      {}", stats.totals.vibration_alerts);
    let _ = writeln!(out, "  Water level    {}", stats.totals.water_level_alerts);
    let _ = writeln!(out, "  Human          {}", stats.totals.human_detection_alerts);

    out.trim_end().to_string()
}

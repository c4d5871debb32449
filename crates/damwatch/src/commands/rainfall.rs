//! Rainfall prediction command handler.

use damwatch_core::Console;
use damwatch_core::model::RainfallForecast;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub async fn handle(console: &Console, global: &GlobalOpts) -> Result<(), CliError> {
    let forecast = console.rainfall().await?;

    let rendered = output::render_single(&global.output, &forecast, detail);
    output::print_output(&rendered, global.quiet);
    Ok(())
}

fn detail(forecast: &RainfallForecast) -> String {
    let mut out = format!(
        "Rain chance    {:.0} %\nPrediction     {}",
        forecast.percent, forecast.label
    );
    if !forecast.timestamp.is_empty() {
        out.push_str(&format!("\nAs of          {}", forecast.timestamp));
    }
    out
}

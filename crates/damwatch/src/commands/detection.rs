//! Human-detection command handler.

use damwatch_core::Console;
use damwatch_core::model::HumanDetection;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub async fn handle(console: &Console, global: &GlobalOpts) -> Result<(), CliError> {
    let detection = console.detection().await?;

    let color = output::should_color(&global.color);
    let rendered = output::render_single(&global.output, &detection, |d| detail(d, color));
    output::print_output(&rendered, global.quiet);
    Ok(())
}

fn detail(detection: &HumanDetection, color: bool) -> String {
    let presence = if detection.human_detected {
        output::alarm("DETECTED", color)
    } else {
        "clear".to_string()
    };

    let mut out = format!(
        "Presence       {presence}\nConfidence     {:.0} %\nDetector       {}",
        detection.confidence * 100.0,
        if detection.detector_running { "running" } else { "stopped" }
    );
    if !detection.last_checked.is_empty() {
        out.push_str(&format!("\nLast checked   {}", detection.last_checked));
    }
    out
}

//! Dashboard command handler: one poll cycle, resolved and rendered.

use std::fmt::Write as _;

use damwatch_core::snapshot::{FeedValue, Snapshot};
use damwatch_core::{Console, DashboardView, resolve};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub async fn handle(console: &Console, global: &GlobalOpts) -> Result<(), CliError> {
    let snapshot = console.poll_dashboard_once().await;

    // One-shot invocation has no last-known data to fall back on; a
    // fully failed cycle is a connection error.
    if let Some(message) = &snapshot.error {
        return Err(CliError::ConnectionFailed {
            url: console.config().url.to_string(),
            source: message.clone().into(),
        });
    }

    let view = resolve(&snapshot);
    let color = output::should_color(&global.color);
    let rendered =
        output::render_single(&global.output, &view, |v| detail(v, &snapshot, color));
    output::print_output(&rendered, global.quiet);
    Ok(())
}

fn detail(view: &DashboardView, snapshot: &Snapshot, color: bool) -> String {
    let mut out = String::new();

    if view.critical {
        let line = output::alarm("CRITICAL: human detected while the valve is open", color);
        let _ = writeln!(out, "{line}\n");
    }

    let _ = writeln!(
        out,
        "Water level    {}",
        output::resolved_num(&view.water_level_pct, "%")
    );
    let _ = writeln!(
        out,
        "Temperature    {}",
        output::resolved_num(&view.temperature, "°C")
    );
    let _ = writeln!(out, "Humidity       {}", output::resolved_num(&view.humidity, "%"));
    let _ = writeln!(
        out,
        "Rain           {}  ({})",
        output::resolved_num(&view.rain_pct, "%"),
        view.rain_label.value
    );
    let _ = writeln!(out, "Vibration      {}", yn(view.vibration.value));

    let human = if view.human_detected.value {
        output::alarm("DETECTED", color)
    } else {
        "clear".to_string()
    };
    let _ = writeln!(out, "Human presence {human}");

    match &view.valve {
        Some(valve) => {
            let _ = writeln!(
                out,
                "Valve          {} ({} mode, {})",
                valve.state, valve.mode, valve.reason
            );
        }
        None => {
            let _ = writeln!(out, "Valve          unknown");
        }
    }

    if !view.last_vibration_alert.value.is_empty() {
        let _ = writeln!(out, "Last vibration alert: {}", view.last_vibration_alert.value);
    }
    if !view.last_human_alert.value.is_empty() {
        let _ = writeln!(out, "Last human alert:     {}", view.last_human_alert.value);
    }
    if !view.timestamp.value.is_empty() {
        let _ = writeln!(out, "As of          {}", view.timestamp.value);
    }

    let degraded = degraded_feeds(snapshot);
    if !degraded.is_empty() {
        let _ = writeln!(out, "Feeds without data: {}", degraded.join(", "));
    }

    out.trim_end().to_string()
}

fn yn(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// Names of dashboard feeds that produced no data this cycle.
fn degraded_feeds(snapshot: &Snapshot) -> Vec<&'static str> {
    fn check<T>(name: &'static str, feed: &FeedValue<T>, out: &mut Vec<&'static str>) {
        if !feed.is_available() {
            out.push(name);
        }
    }

    let mut out = Vec::new();
    check("readings", &snapshot.readings, &mut out);
    check("weather", &snapshot.weather, &mut out);
    check("rainfall", &snapshot.rainfall, &mut out);
    check("valve", &snapshot.valve, &mut out);
    check("detection", &snapshot.detection, &mut out);
    check("stats", &snapshot.stats, &mut out);
    out
}

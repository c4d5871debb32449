//! Watch command handler: continuous polling until interrupted.

use std::time::Duration;

use damwatch_core::snapshot::Snapshot;
use damwatch_core::{Console, resolve};

use crate::cli::{GlobalOpts, OutputFormat, WatchArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    console: &Console,
    args: WatchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    // An interval override needs a rebuilt console; the poll cadence is
    // fixed at construction.
    let console = match args.interval {
        Some(secs) => {
            let mut config = console.config().clone();
            config.dashboard_poll = Duration::from_secs(secs);
            Console::new(config)?
        }
        None => console.clone(),
    };

    let color = output::should_color(&global.color);
    let mut rx = console.subscribe();
    let dashboard = console.start_dashboard_poll();
    let logs = console.start_logs_poll();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = rx.borrow_and_update().clone();
                print_update(&snapshot, global, color);
            }
        }
    }

    // Deterministic teardown: no poll cycle survives past this point.
    dashboard.stop().await;
    logs.stop().await;
    console.shutdown();
    Ok(())
}

fn print_update(snapshot: &Snapshot, global: &GlobalOpts, color: bool) {
    let view = resolve(snapshot);

    let line = match global.output {
        OutputFormat::Json | OutputFormat::JsonCompact => output::render_json_compact(&view),
        OutputFormat::Yaml => output::render_yaml(&view),
        OutputFormat::Table | OutputFormat::Plain => {
            let now = chrono::Local::now().format("%H:%M:%S");
            let valve = view
                .valve
                .as_ref()
                .map_or_else(|| "unknown".to_string(), |v| format!("{}/{}", v.state, v.mode));
            let human = if view.human_detected.value {
                output::alarm("HUMAN", color)
            } else {
                "clear".to_string()
            };

            let mut line = format!(
                "{now}  level {:5.1}%  temp {:5.1}°C  rain {:3.0}%  valve {valve}  {human}",
                view.water_level_pct.value, view.temperature.value, view.rain_pct.value,
            );
            if let Some(banner) = &snapshot.error {
                line.push_str(&format!("  [{}]", output::caution(banner, color)));
            }
            line
        }
    };

    output::print_output(&line, global.quiet);
}

//! Valve command handlers.
//!
//! Actuation commands establish an admin session, run one poll cycle
//! so the gates see current state, then submit. The printed state
//! afterwards is always a fresh read, never the command's intent.

use owo_colors::OwoColorize;

use damwatch_core::model::ValveStatus;
use damwatch_core::{Console, ControlRequest, ValveCommand as CoreValveCommand};

use crate::cli::{GlobalOpts, ValveArgs, ValveCommand};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(console: &Console, args: ValveArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ValveCommand::Status => show_status(console, global).await,

        ValveCommand::Open => {
            let session = util::login(console.config())?;
            console.poll_dashboard_once().await;

            if !util::confirm("Open the discharge valve?", global.yes)? {
                return Ok(());
            }
            console
                .control_valve(&session, ControlRequest::Actuate(CoreValveCommand::Open))
                .await?;
            report_accepted("Open", global);
            show_status(console, global).await
        }

        // Closing is the fail-safe direction: it runs without the
        // confirmation prompt that opening requires.
        ValveCommand::Close => {
            let session = util::login(console.config())?;
            console.poll_dashboard_once().await;

            console
                .control_valve(&session, ControlRequest::Actuate(CoreValveCommand::Close))
                .await?;
            report_accepted("Close", global);
            show_status(console, global).await
        }

        ValveCommand::Mode { mode } => {
            let session = util::login(console.config())?;
            console.poll_dashboard_once().await;

            console
                .control_valve(&session, ControlRequest::SetMode(mode.into()))
                .await?;
            report_accepted("Mode change", global);
            show_status(console, global).await
        }
    }
}

fn report_accepted(what: &str, global: &GlobalOpts) {
    if !global.quiet {
        eprintln!("{what} command accepted; the service applies it asynchronously.");
    }
}

async fn show_status(console: &Console, global: &GlobalOpts) -> Result<(), CliError> {
    let status = console.valve_status().await?;

    let color = output::should_color(&global.color);
    let rendered = output::render_single(&global.output, &status, |s| detail(s, color));
    output::print_output(&rendered, global.quiet);
    Ok(())
}

fn detail(status: &ValveStatus, color: bool) -> String {
    let state = if color {
        match status.state {
            damwatch_core::model::ValveState::Open => status.state.to_string().yellow().to_string(),
            damwatch_core::model::ValveState::Closed => {
                status.state.to_string().green().to_string()
            }
        }
    } else {
        status.state.to_string()
    };

    let mut out = format!("State          {state}\nMode           {}", status.mode);
    if !status.reason.is_empty() {
        out.push_str(&format!("\nReason         {}", status.reason));
    }
    if !status.timestamp.is_empty() {
        out.push_str(&format!("\nAs of          {}", status.timestamp));
    }
    out
}

//! Command dispatch: bridges CLI args -> console operations -> output formatting.

pub mod alerts;
pub mod config_cmd;
pub mod dashboard;
pub mod detection;
pub mod rainfall;
pub mod readings;
pub mod stats;
pub mod util;
pub mod valve;
pub mod watch;
pub mod weather;

use damwatch_core::Console;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a service-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    console: &Console,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Dashboard => dashboard::handle(console, global).await,
        Command::Watch(args) => watch::handle(console, args, global).await,
        Command::Readings(args) => readings::handle(console, args, global).await,
        Command::Weather => weather::handle(console, global).await,
        Command::Rainfall => rainfall::handle(console, global).await,
        Command::Stats => stats::handle(console, global).await,
        Command::Detection => detection::handle(console, global).await,
        Command::Alerts(args) => alerts::handle(console, args, global).await,
        Command::Valve(args) => valve::handle(console, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}

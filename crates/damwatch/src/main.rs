mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use damwatch_core::Console;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a service connection
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global).await,

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "damwatch", &mut std::io::stdout());
            Ok(())
        }

        // All other commands talk to the telemetry service
        cmd => {
            let console_config = build_console_config(&cli.global)?;
            let console = Console::new(console_config)?;

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &console, &cli.global).await
        }
    }
}

/// Build a `ConsoleConfig` from the config file plus CLI flag overrides.
fn build_console_config(
    global: &cli::GlobalOpts,
) -> Result<damwatch_core::ConsoleConfig, CliError> {
    let mut cfg = match &global.config {
        Some(path) => damwatch_config::load_config_from(path)?,
        None => damwatch_config::load_config_or_default(),
    };

    if let Some(url) = &global.service {
        cfg.service_url = Some(url.clone());
    }
    if global.insecure {
        cfg.defaults.insecure = true;
    }
    if let Some(timeout) = global.timeout {
        cfg.defaults.timeout = timeout;
    }

    Ok(damwatch_config::to_console_config(&cfg)?)
}

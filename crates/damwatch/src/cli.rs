//! Clap derive structures for the `damwatch` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use damwatch_core::model::{AlertKind, ValveMode};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// damwatch -- operator console for smart dam installations
#[derive(Debug, Parser)]
#[command(
    name = "damwatch",
    version,
    about = "Watch dam telemetry and control the discharge valve from the command line",
    long_about = "Operator console for smart dam telemetry services.\n\n\
        Polls sensor, weather, and alert feeds, resolves them into one\n\
        dashboard view, and routes safety-gated valve control commands.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Telemetry service URL (overrides the config file)
    #[arg(long, short = 's', env = "DAMWATCH_SERVICE_URL", global = true)]
    pub service: Option<String>,

    /// Path to an alternate config file
    #[arg(long, env = "DAMWATCH_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "DAMWATCH_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "DAMWATCH_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long, env = "DAMWATCH_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the resolved dashboard (one poll cycle)
    #[command(alias = "dash")]
    Dashboard,

    /// Poll continuously and print updates until interrupted
    Watch(WatchArgs),

    /// List raw sensor readings, newest first
    Readings(ReadingsArgs),

    /// Show current weather at the dam site
    Weather,

    /// Show the rain prediction
    Rainfall,

    /// Show service statistics and the current reading
    Stats,

    /// Show human-presence detector status
    Detection,

    /// List alert history for one category
    Alerts(AlertsArgs),

    /// Inspect and control the discharge valve
    Valve(ValveArgs),

    /// Manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Watch ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Dashboard poll interval in seconds (overrides the config file)
    #[arg(long)]
    pub interval: Option<u64>,
}

// ── Readings ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ReadingsArgs {
    /// Show at most this many readings
    #[arg(long, short = 'n', default_value = "20")]
    pub limit: usize,
}

// ── Alerts ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AlertsArgs {
    /// Alert category
    #[arg(value_enum)]
    pub kind: AlertKindArg,

    /// Show at most this many alerts
    #[arg(long, short = 'n', default_value = "20")]
    pub limit: usize,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AlertKindArg {
    /// Water level alerts
    #[value(alias = "water")]
    Waterlevel,
    /// Vibration alerts
    Vibration,
    /// Human detection alerts
    Human,
}

impl From<AlertKindArg> for AlertKind {
    fn from(arg: AlertKindArg) -> Self {
        match arg {
            AlertKindArg::Waterlevel => AlertKind::WaterLevel,
            AlertKindArg::Vibration => AlertKind::Vibration,
            AlertKindArg::Human => AlertKind::Human,
        }
    }
}

// ── Valve ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ValveArgs {
    #[command(subcommand)]
    pub command: ValveCommand,
}

#[derive(Debug, Subcommand)]
pub enum ValveCommand {
    /// Show the authoritative valve state
    Status,

    /// Open the valve (admin, MANUAL mode only)
    Open,

    /// Close the valve (admin, MANUAL mode only)
    Close,

    /// Switch the control mode
    Mode {
        #[arg(value_enum)]
        mode: ModeArg,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// Service-side controller drives the valve
    Auto,
    /// Operator commands drive the valve
    Manual,
}

impl From<ModeArg> for ValveMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Auto => ValveMode::Auto,
            ModeArg::Manual => ValveMode::Manual,
        }
    }
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration (secrets redacted)
    Show,

    /// Set the telemetry service URL
    SetUrl { url: String },

    /// Store the admin password in the system keyring
    SetPassword {
        /// Admin username (defaults to the configured one)
        #[arg(long)]
        username: Option<String>,
    },

    /// Print the config file path
    Path,

    /// Test connectivity to the configured service
    Test,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

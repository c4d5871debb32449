//! CLI error types with miette diagnostics.
//!
//! Maps core and config errors into user-facing errors with actionable
//! help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use damwatch_core::{ControlError, CoreError};

/// Exit codes. Success is the process default; these cover failures.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the telemetry service at {url}")]
    #[diagnostic(
        code(damwatch::connection_failed),
        help(
            "Check that the service is running and accessible.\n\
             Try: damwatch config test"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(damwatch::timeout),
        help("Increase the timeout with --timeout or check service responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Admin authentication failed")]
    #[diagnostic(
        code(damwatch::auth_failed),
        help("The entered password does not match the configured admin credentials.")
    )]
    AuthFailed,

    #[error("No admin credentials configured")]
    #[diagnostic(
        code(damwatch::no_credentials),
        help(
            "Valve control needs an [admin] section in the config file.\n\
             Store the password with: damwatch config set-password"
        )
    )]
    NoCredentials,

    // ── Valve control ────────────────────────────────────────────────
    #[error("Valve is in AUTO mode")]
    #[diagnostic(
        code(damwatch::auto_mode),
        help("Switch to manual control first: damwatch valve mode manual")
    )]
    AutoMode,

    #[error("Safety interlock engaged: human detected near the discharge area")]
    #[diagnostic(
        code(damwatch::interlock),
        help("Opening is blocked while a person is detected. Closing is always allowed.")
    )]
    Interlock,

    #[error("{message}")]
    #[diagnostic(code(damwatch::redundant_command))]
    RedundantCommand { message: String },

    #[error("Another control command is still in flight")]
    #[diagnostic(
        code(damwatch::command_in_flight),
        help("Wait for the pending command to settle, then retry.")
    )]
    CommandInFlight,

    #[error("Valve status unknown")]
    #[diagnostic(
        code(damwatch::status_unknown),
        help("The valve status feed has not been reached yet; check connectivity.")
    )]
    StatusUnknown,

    // ── Service ──────────────────────────────────────────────────────
    #[error("Service error: {message}")]
    #[diagnostic(code(damwatch::api_error))]
    ApiError {
        message: String,
        status: Option<u16>,
    },

    #[error("Unexpected response from the service: {message}")]
    #[diagnostic(
        code(damwatch::unexpected_response),
        help("The configured URL may not point at a dam telemetry service.")
    )]
    UnexpectedResponse { message: String },

    // ── Validation / Configuration ───────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(damwatch::validation))]
    Validation { field: String, reason: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(damwatch::config),
        help("Inspect the config with: damwatch config show")
    )]
    Config { message: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Operation '{action}' requires confirmation")]
    #[diagnostic(
        code(damwatch::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::ApiError {
                status: Some(404), ..
            } => exit_code::NOT_FOUND,
            Self::AuthFailed | Self::NoCredentials => exit_code::AUTH,
            Self::Interlock => exit_code::PERMISSION,
            Self::AutoMode | Self::RedundantCommand { .. } | Self::CommandInFlight => {
                exit_code::CONFLICT
            }
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Timeout => CliError::Timeout,

            CoreError::Api { message, status } => CliError::ApiError { message, status },

            CoreError::Rejected { message } => CliError::ApiError {
                message,
                status: None,
            },

            CoreError::Config { message } => CliError::Config { message },

            CoreError::UnexpectedResponse(message) => CliError::UnexpectedResponse { message },
        }
    }
}

// ── ControlError → CliError mapping ──────────────────────────────────

impl From<ControlError> for CliError {
    fn from(err: ControlError) -> Self {
        match err {
            ControlError::NotAuthorized => CliError::AuthFailed,
            ControlError::AutoMode => CliError::AutoMode,
            ControlError::InterlockEngaged => CliError::Interlock,
            ControlError::AlreadyOpen
            | ControlError::AlreadyClosed
            | ControlError::RedundantMode(_) => CliError::RedundantCommand {
                message: err.to_string(),
            },
            ControlError::CommandInFlight => CliError::CommandInFlight,
            ControlError::StatusUnknown => CliError::StatusUnknown,
            ControlError::Remote(core) => core.into(),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<damwatch_config::ConfigError> for CliError {
    fn from(err: damwatch_config::ConfigError) -> Self {
        match err {
            damwatch_config::ConfigError::Validation { field, reason } => {
                CliError::Validation { field, reason }
            }
            damwatch_config::ConfigError::NoCredentials => CliError::NoCredentials,
            damwatch_config::ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}

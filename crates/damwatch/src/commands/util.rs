//! Shared helpers for command handlers.

use std::io::IsTerminal;

use damwatch_core::model::ValveState;
use damwatch_core::{AdminCredentials, ConsoleConfig, Session};

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
/// Without a terminal on stdin there is nobody to ask, so the command
/// fails instead of hanging on a prompt.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.trim_end_matches('?').to_string(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Establish an admin session for a control command.
///
/// The password is taken from `DAMWATCH_ADMIN_PASSWORD` when set
/// (non-interactive use), otherwise prompted. Either way it must match
/// the configured admin credentials.
pub fn login(config: &ConsoleConfig) -> Result<Session, CliError> {
    let Some(credentials) = &config.admin else {
        return Err(CliError::NoCredentials);
    };

    let password = password_input(credentials)?;
    let mut session = Session::default();
    if !session.authenticate(credentials.username(), &password, credentials) {
        return Err(CliError::AuthFailed);
    }
    Ok(session)
}

fn password_input(credentials: &AdminCredentials) -> Result<String, CliError> {
    if let Ok(pw) = std::env::var(damwatch_config::PASSWORD_ENV) {
        return Ok(pw);
    }
    let prompt = format!("Admin password for {}: ", credentials.username());
    Ok(rpassword::prompt_password(prompt)?)
}

/// Format an optional float for table cells.
pub fn opt_num(value: Option<f64>) -> String {
    value.map_or_else(|| "-".into(), |v| format!("{v:.1}"))
}

/// Format an optional bool for table cells.
pub fn opt_bool(value: Option<bool>) -> String {
    match value {
        Some(true) => "yes".into(),
        Some(false) => "no".into(),
        None => "-".into(),
    }
}

/// Format an optional valve state for table cells.
pub fn opt_valve(state: Option<ValveState>) -> String {
    state.map_or_else(|| "-".into(), |s| s.to_string())
}

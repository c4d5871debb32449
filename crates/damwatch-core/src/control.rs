// Valve control gating
//
// Every control request passes a fixed gate order before any HTTP
// leaves the process: authorization, mode, safety interlock, then
// redundancy. A rejection here is purely local; the service never
// sees the request.

use thiserror::Error;

use crate::error::CoreError;
use crate::model::{ValveMode, ValveState, ValveStatus};
use crate::session::Session;

/// Actuation direction for a manual valve command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValveCommand {
    Open,
    Close,
}

impl ValveCommand {
    /// The command string the service expects on the wire.
    pub fn as_wire(self) -> &'static str {
        match self {
            ValveCommand::Open => "OPEN",
            ValveCommand::Close => "CLOSE",
        }
    }
}

/// A control request as issued by the operator surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlRequest {
    /// Switch the control mode. Exempt from the mode gate, since it is
    /// the only way out of `Auto`.
    SetMode(ValveMode),
    /// Actuate the valve. Only legal in `Manual` mode.
    Actuate(ValveCommand),
}

/// Why a control request was rejected.
#[derive(Debug, Error)]
pub enum ControlError {
    #[error("admin session required")]
    NotAuthorized,

    #[error("valve is in AUTO mode; switch to MANUAL before actuating")]
    AutoMode,

    #[error("safety interlock engaged: human detected near the discharge area")]
    InterlockEngaged,

    #[error("valve is already open")]
    AlreadyOpen,

    #[error("valve is already closed")]
    AlreadyClosed,

    #[error("valve is already in {0} mode")]
    RedundantMode(ValveMode),

    #[error("another control command is still in flight")]
    CommandInFlight,

    #[error("valve status unknown; wait for a poll cycle to complete")]
    StatusUnknown,

    #[error("command rejected by the service: {0}")]
    Remote(#[source] CoreError),
}

/// Gate a control request against the current session and valve state.
///
/// Gate order is fixed: authorization, mode, interlock, redundancy.
/// Closing is always allowed past the interlock; shutting off flow is
/// the safe response to a person near the discharge area, opening is
/// not.
pub fn authorize(
    session: &Session,
    status: &ValveStatus,
    human_detected: bool,
    request: ControlRequest,
) -> Result<(), ControlError> {
    if !session.is_admin() {
        return Err(ControlError::NotAuthorized);
    }

    match request {
        ControlRequest::SetMode(mode) => {
            if status.mode == mode {
                return Err(ControlError::RedundantMode(mode));
            }
            Ok(())
        }
        ControlRequest::Actuate(command) => {
            if status.mode != ValveMode::Manual {
                return Err(ControlError::AutoMode);
            }
            if human_detected && command == ValveCommand::Open {
                return Err(ControlError::InterlockEngaged);
            }
            match (command, status.state) {
                (ValveCommand::Open, ValveState::Open) => Err(ControlError::AlreadyOpen),
                (ValveCommand::Close, ValveState::Closed) => Err(ControlError::AlreadyClosed),
                _ => Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use secrecy::SecretString;

    use super::*;
    use crate::session::AdminCredentials;

    fn admin_session() -> Session {
        let creds = AdminCredentials::new("operator", SecretString::from("pw"));
        let mut session = Session::default();
        assert!(session.authenticate("operator", "pw", &creds));
        session
    }

    fn status(state: ValveState, mode: ValveMode) -> ValveStatus {
        ValveStatus {
            state,
            mode,
            reason: String::new(),
            timestamp: String::new(),
        }
    }

    #[test]
    fn test_actuation_gate_grid() {
        // Every admin/mode/human combination for an OPEN command
        // against a closed valve. Allowed exactly when the session is
        // admin, the mode is MANUAL, and no human is detected.
        for admin in [false, true] {
            for mode in [ValveMode::Auto, ValveMode::Manual] {
                for human in [false, true] {
                    let session = if admin { admin_session() } else { Session::default() };
                    let result = authorize(
                        &session,
                        &status(ValveState::Closed, mode),
                        human,
                        ControlRequest::Actuate(ValveCommand::Open),
                    );
                    let allowed = admin && mode == ValveMode::Manual && !human;
                    assert_eq!(
                        result.is_ok(),
                        allowed,
                        "admin={admin} mode={mode} human={human}: {result:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_gate_order_auth_first() {
        // Non-admin in AUTO mode with a human present: the rejection
        // must be NotAuthorized, not one of the later gates.
        let result = authorize(
            &Session::default(),
            &status(ValveState::Closed, ValveMode::Auto),
            true,
            ControlRequest::Actuate(ValveCommand::Open),
        );
        assert!(matches!(result, Err(ControlError::NotAuthorized)));
    }

    #[test]
    fn test_close_allowed_despite_interlock() {
        let result = authorize(
            &admin_session(),
            &status(ValveState::Open, ValveMode::Manual),
            true,
            ControlRequest::Actuate(ValveCommand::Close),
        );
        assert!(result.is_ok(), "close must pass the interlock: {result:?}");
    }

    #[test]
    fn test_interlock_blocks_open_only() {
        let result = authorize(
            &admin_session(),
            &status(ValveState::Closed, ValveMode::Manual),
            true,
            ControlRequest::Actuate(ValveCommand::Open),
        );
        assert!(matches!(result, Err(ControlError::InterlockEngaged)));
    }

    #[test]
    fn test_redundant_actuation_rejected() {
        let result = authorize(
            &admin_session(),
            &status(ValveState::Open, ValveMode::Manual),
            false,
            ControlRequest::Actuate(ValveCommand::Open),
        );
        assert!(matches!(result, Err(ControlError::AlreadyOpen)));

        let result = authorize(
            &admin_session(),
            &status(ValveState::Closed, ValveMode::Manual),
            false,
            ControlRequest::Actuate(ValveCommand::Close),
        );
        assert!(matches!(result, Err(ControlError::AlreadyClosed)));
    }

    #[test]
    fn test_mode_change_exempt_from_mode_gate() {
        // Switching out of AUTO must be possible while in AUTO.
        let result = authorize(
            &admin_session(),
            &status(ValveState::Closed, ValveMode::Auto),
            true,
            ControlRequest::SetMode(ValveMode::Manual),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_redundant_mode_change_rejected() {
        let result = authorize(
            &admin_session(),
            &status(ValveState::Closed, ValveMode::Auto),
            false,
            ControlRequest::SetMode(ValveMode::Auto),
        );
        assert!(matches!(
            result,
            Err(ControlError::RedundantMode(ValveMode::Auto))
        ));
    }
}

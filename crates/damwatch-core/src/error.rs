use thiserror::Error;

/// Top-level error type for the `damwatch-core` crate.
///
/// Transport-level detail from `damwatch-api` is flattened into a small
/// set of operator-meaningful classes; the CLI maps these onto exit
/// codes and help text.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Could not reach the telemetry service at all.
    #[error("Cannot reach the telemetry service at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    /// The request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The service answered with an error.
    #[error("Service error{}: {message}", status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Api { message: String, status: Option<u16> },

    /// The service acknowledged the request but refused it.
    #[error("{message}")]
    Rejected { message: String },

    /// Configuration problem (bad URL, missing credentials, etc.)
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The service answered with a body that does not match its API.
    #[error("Unexpected response from the service: {0}")]
    UnexpectedResponse(String),
}

impl From<damwatch_api::Error> for CoreError {
    fn from(err: damwatch_api::Error) -> Self {
        match err {
            damwatch_api::Error::Transport(e) if e.is_timeout() => CoreError::Timeout,
            damwatch_api::Error::Transport(e) if e.is_connect() => CoreError::ConnectionFailed {
                url: e.url().map(ToString::to_string).unwrap_or_default(),
                reason: e.to_string(),
            },
            damwatch_api::Error::Transport(e) => CoreError::Api {
                message: e.to_string(),
                status: e.status().map(|s| s.as_u16()),
            },
            damwatch_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid service URL: {e}"),
            },
            damwatch_api::Error::Tls(message) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: message,
            },
            damwatch_api::Error::Http { status } => CoreError::Api {
                message: format!("request failed with HTTP {status}"),
                status: Some(status),
            },
            damwatch_api::Error::Decode { message, .. } => CoreError::UnexpectedResponse(message),
        }
    }
}

impl CoreError {
    /// The HTTP status associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            CoreError::Api { status, .. } => *status,
            _ => None,
        }
    }
}

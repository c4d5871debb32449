// Console runtime configuration
//
// The resolved, validated settings a `Console` runs with. Building
// this from files, environment, and CLI flags is damwatch-config's
// job; this type is what comes out the other end.

use std::time::Duration;

use url::Url;

use crate::session::AdminCredentials;

/// TLS verification behavior for the service connection.
#[derive(Debug, Clone, Default)]
pub enum TlsVerification {
    /// Verify against the system certificate store.
    #[default]
    SystemDefaults,
    /// Verify against a custom CA certificate (PEM file path).
    CustomCa(std::path::PathBuf),
    /// Skip verification entirely, for self-signed field deployments.
    DangerAcceptInvalid,
}

/// Fully resolved console configuration.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Telemetry service root, e.g. `http://dam-gateway.local:5000`.
    pub url: Url,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Cadence of the dashboard feed set.
    pub dashboard_poll: Duration,
    /// Cadence of the logs feed set.
    pub logs_poll: Duration,
    /// Admin credentials, when configured. Control commands are
    /// impossible without them.
    pub admin: Option<AdminCredentials>,
}

impl ConsoleConfig {
    /// Defaults for everything except the service URL.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(10),
            dashboard_poll: Duration::from_secs(5),
            logs_poll: Duration::from_secs(10),
            admin: None,
        }
    }
}

//! Configuration for the damwatch console.
//!
//! TOML file + environment layering, admin credential resolution
//! (env var, keyring, plaintext — in that order), and translation to
//! `damwatch_core::ConsoleConfig`.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use damwatch_core::{AdminCredentials, ConsoleConfig, TlsVerification};

/// Environment variable prefix for all overrides, e.g.
/// `DAMWATCH_SERVICE_URL`, `DAMWATCH_DEFAULTS_TIMEOUT`.
pub const ENV_PREFIX: &str = "DAMWATCH_";

/// Environment variable consulted first for the admin password.
pub const PASSWORD_ENV: &str = "DAMWATCH_ADMIN_PASSWORD";

const KEYRING_SERVICE: &str = "damwatch";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no admin credentials configured")]
    NoCredentials,

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Telemetry service root URL (e.g., "http://dam-gateway.local:5000").
    pub service_url: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Admin credentials for valve control.
    pub admin: Option<AdminSection>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    /// Path to a custom CA certificate (PEM).
    pub ca_cert: Option<PathBuf>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Dashboard feed cadence in seconds.
    #[serde(default = "default_dashboard_poll")]
    pub dashboard_poll_secs: u64,

    /// Alert/history feed cadence in seconds.
    #[serde(default = "default_logs_poll")]
    pub logs_poll_secs: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            ca_cert: None,
            timeout: default_timeout(),
            dashboard_poll_secs: default_dashboard_poll(),
            logs_poll_secs: default_logs_poll(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    10
}
fn default_dashboard_poll() -> u64 {
    5
}
fn default_logs_poll() -> u64 {
    10
}

/// The `[admin]` section.
#[derive(Debug, Deserialize, Serialize)]
pub struct AdminSection {
    pub username: String,

    /// Plaintext password (prefer keyring or the env var).
    pub password: Option<String>,

    /// Environment variable name holding the password, overriding the
    /// default `DAMWATCH_ADMIN_PASSWORD`.
    pub password_env: Option<String>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "damwatch", "damwatch").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("damwatch");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full `Config` from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load a `Config` from an explicit file path + environment. The env
/// layer wins over the file.
///
/// Env keys map onto the config tree by section prefix, so
/// underscore-containing keys stay addressable: `DAMWATCH_SERVICE_URL`
/// hits `service_url`, `DAMWATCH_DEFAULTS_DASHBOARD_POLL_SECS` hits
/// `defaults.dashboard_poll_secs`. [`PASSWORD_ENV`] is excluded; the
/// credential chain in [`resolve_admin`] owns it.
pub fn load_config_from(path: &std::path::Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).map(section_key).split("."));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Map a prefix-stripped env key onto its config-tree path. Only the
/// `defaults` and `admin` sections nest; everything else is top-level.
fn section_key(key: &figment::value::UncasedStr) -> figment::value::Uncased<'_> {
    let key = key.as_str().to_ascii_lowercase();
    let dotted = if key == "admin_password" {
        // never folded into the config tree; see resolve_admin
        key
    } else if let Some(rest) = key.strip_prefix("defaults_") {
        format!("defaults.{rest}")
    } else if let Some(rest) = key.strip_prefix("admin_") {
        format!("admin.{rest}")
    } else {
        key
    };
    dotted.into()
}

/// Load config, returning defaults if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

/// Serialize config to TOML and write it to an explicit path.
pub fn save_config_to(cfg: &Config, path: &std::path::Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Store the admin password in the system keyring.
pub fn store_password(username: &str, password: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, username)?;
    entry.set_password(password)?;
    Ok(())
}

/// Resolve admin credentials from the chain: env var, keyring,
/// plaintext config. Returns `None` when no `[admin]` section exists;
/// control commands are simply unavailable then.
pub fn resolve_admin(config: &Config) -> Result<Option<AdminCredentials>, ConfigError> {
    let Some(admin) = &config.admin else {
        return Ok(None);
    };

    // 1. Environment variable
    let env_name = admin.password_env.as_deref().unwrap_or(PASSWORD_ENV);
    if let Ok(pw) = std::env::var(env_name) {
        return Ok(Some(AdminCredentials::new(
            admin.username.clone(),
            SecretString::from(pw),
        )));
    }

    // 2. System keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &admin.username) {
        if let Ok(pw) = entry.get_password() {
            return Ok(Some(AdminCredentials::new(
                admin.username.clone(),
                SecretString::from(pw),
            )));
        }
    }

    // 3. Plaintext in config
    if let Some(pw) = &admin.password {
        return Ok(Some(AdminCredentials::new(
            admin.username.clone(),
            SecretString::from(pw.clone()),
        )));
    }

    Err(ConfigError::NoCredentials)
}

// ── Translation to ConsoleConfig ────────────────────────────────────

/// Build a `ConsoleConfig` from the loaded TOML config.
pub fn to_console_config(config: &Config) -> Result<ConsoleConfig, ConfigError> {
    let raw_url = config
        .service_url
        .as_deref()
        .ok_or_else(|| ConfigError::Validation {
            field: "service_url".into(),
            reason: "no service URL configured; run `damwatch config set-url`".into(),
        })?;

    let url: url::Url = raw_url.parse().map_err(|_| ConfigError::Validation {
        field: "service_url".into(),
        reason: format!("invalid URL: {raw_url}"),
    })?;

    let tls = if config.defaults.insecure {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ca_path) = &config.defaults.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let admin = resolve_admin(config)?;

    Ok(ConsoleConfig {
        url,
        tls,
        timeout: Duration::from_secs(config.defaults.timeout),
        dashboard_poll: Duration::from_secs(config.defaults.dashboard_poll_secs),
        logs_poll: Duration::from_secs(config.defaults.logs_poll_secs),
        admin,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;

    use super::*;

    fn write_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_defaults_applied() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "service_url = \"http://localhost:5000\"\n");

        let config = load_config_from(&path).unwrap();

        assert_eq!(config.service_url.as_deref(), Some("http://localhost:5000"));
        assert_eq!(config.defaults.output, "table");
        assert_eq!(config.defaults.dashboard_poll_secs, 5);
        assert_eq!(config.defaults.logs_poll_secs, 10);
        assert!(config.admin.is_none());
    }

    #[test]
    fn test_file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            "service_url = \"http://dam.local:5000\"\n\n[defaults]\ntimeout = 3\ndashboard_poll_secs = 2\n",
        );

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.defaults.timeout, 3);
        assert_eq!(config.defaults.dashboard_poll_secs, 2);
        // Unset keys keep their defaults.
        assert_eq!(config.defaults.logs_poll_secs, 10);
    }

    #[test]
    fn test_env_overrides_underscored_keys() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("DAMWATCH_SERVICE_URL", "http://dam.example:5000");
            jail.set_env("DAMWATCH_DEFAULTS_DASHBOARD_POLL_SECS", "2");
            jail.set_env("DAMWATCH_DEFAULTS_TIMEOUT", "3");

            let config = load_config_from(std::path::Path::new("absent.toml"))
                .map_err(|e| figment::Error::from(e.to_string()))?;

            assert_eq!(config.service_url.as_deref(), Some("http://dam.example:5000"));
            assert_eq!(config.defaults.dashboard_poll_secs, 2);
            assert_eq!(config.defaults.timeout, 3);
            assert_eq!(config.defaults.logs_poll_secs, 10);
            Ok(())
        });
    }

    #[test]
    fn test_password_env_stays_out_of_the_config_tree() {
        figment::Jail::expect_with(|jail| {
            jail.set_env(PASSWORD_ENV, "pw");

            let config = load_config_from(std::path::Path::new("absent.toml"))
                .map_err(|e| figment::Error::from(e.to_string()))?;

            // The password env var feeds resolve_admin, not an [admin]
            // section of its own.
            assert!(config.admin.is_none());
            Ok(())
        });
    }

    #[test]
    fn test_round_trip_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            service_url: Some("http://dam.local:5000".into()),
            defaults: Defaults::default(),
            admin: Some(AdminSection {
                username: "operator".into(),
                password: Some("pw".into()),
                password_env: None,
            }),
        };

        save_config_to(&config, &path).unwrap();
        let loaded = load_config_from(&path).unwrap();

        assert_eq!(loaded.service_url, config.service_url);
        assert_eq!(loaded.admin.unwrap().username, "operator");
    }

    #[test]
    fn test_missing_url_is_validation_error() {
        let config = Config::default();
        let result = to_console_config(&config);
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "service_url"
        ));
    }

    #[test]
    fn test_plaintext_password_resolves() {
        let config = Config {
            service_url: Some("http://dam.local:5000".into()),
            defaults: Defaults::default(),
            admin: Some(AdminSection {
                username: "operator".into(),
                password: Some("pw".into()),
                // Point the env step at a variable that never exists so
                // the test is immune to the ambient environment.
                password_env: Some("DAMWATCH_TEST_UNSET_VAR".into()),
            }),
        };

        let creds = resolve_admin(&config).unwrap().unwrap();
        assert_eq!(creds.username(), "operator");

        let console = to_console_config(&config).unwrap();
        assert!(console.admin.is_some());
        assert_eq!(console.dashboard_poll, Duration::from_secs(5));
    }

    #[test]
    fn test_resolved_credentials_authenticate() {
        let config = Config {
            service_url: None,
            defaults: Defaults::default(),
            admin: Some(AdminSection {
                username: "operator".into(),
                password: Some("pw".into()),
                password_env: Some("DAMWATCH_TEST_UNSET_VAR".into()),
            }),
        };

        let creds = resolve_admin(&config).unwrap().unwrap();
        let mut session = damwatch_core::Session::default();
        assert!(session.authenticate("operator", "pw", &creds));
        assert!(!session.authenticate("operator", "wrong", &creds));
    }

    #[test]
    fn test_no_admin_section_is_not_an_error() {
        let config = Config::default();
        assert!(resolve_admin(&config).unwrap().is_none());
    }
}

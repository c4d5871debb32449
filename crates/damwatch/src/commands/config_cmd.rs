//! Config command handlers.
//!
//! These run without a service connection, except `config test` which
//! probes the configured endpoint.

use std::path::PathBuf;

use damwatch_config::{Config, ConfigError};
use damwatch_core::Console;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub async fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => show(global),
        ConfigCommand::SetUrl { url } => set_url(&url, global),
        ConfigCommand::SetPassword { username } => set_password(username, global),
        ConfigCommand::Path => {
            output::print_output(&file_path(global).display().to_string(), global.quiet);
            Ok(())
        }
        ConfigCommand::Test => test(global).await,
    }
}

fn file_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(damwatch_config::config_path)
}

fn load(global: &GlobalOpts) -> Result<Config, ConfigError> {
    damwatch_config::load_config_from(&file_path(global))
}

fn show(global: &GlobalOpts) -> Result<(), CliError> {
    let mut config = load(global)?;

    // Never print the plaintext password back out.
    if let Some(admin) = &mut config.admin {
        if admin.password.is_some() {
            admin.password = Some("<redacted>".into());
        }
    }

    let rendered = toml::to_string_pretty(&config)
        .map_err(|e| CliError::Config { message: e.to_string() })?;
    output::print_output(rendered.trim_end(), global.quiet);
    Ok(())
}

fn set_url(url: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let parsed: url::Url = url.parse().map_err(|_| CliError::Validation {
        field: "url".into(),
        reason: format!("invalid URL: {url}"),
    })?;

    let mut config = load(global)?;
    config.service_url = Some(parsed.to_string());
    damwatch_config::save_config_to(&config, &file_path(global))?;

    if !global.quiet {
        eprintln!("Service URL set to {parsed}");
    }
    Ok(())
}

fn set_password(username: Option<String>, global: &GlobalOpts) -> Result<(), CliError> {
    let mut config = load(global)?;

    let username = match username.or_else(|| config.admin.as_ref().map(|a| a.username.clone())) {
        Some(name) => name,
        None => {
            return Err(CliError::Validation {
                field: "username".into(),
                reason: "no admin username configured; pass --username".into(),
            });
        }
    };

    let password = rpassword::prompt_password(format!("New admin password for {username}: "))?;
    damwatch_config::store_password(&username, &password)?;

    // Record the username so the keyring entry is findable later; the
    // password itself stays out of the file.
    match &mut config.admin {
        Some(admin) => admin.username.clone_from(&username),
        None => {
            config.admin = Some(damwatch_config::AdminSection {
                username: username.clone(),
                password: None,
                password_env: None,
            });
        }
    }
    damwatch_config::save_config_to(&config, &file_path(global))?;

    if !global.quiet {
        eprintln!("Password for '{username}' stored in the system keyring");
    }
    Ok(())
}

async fn test(global: &GlobalOpts) -> Result<(), CliError> {
    let console_config = crate::build_console_config(global)?;
    let url = console_config.url.clone();
    let console = Console::new(console_config)?;

    let health = console.health().await?;
    if health.status == "ok" {
        if !global.quiet {
            let service = health.service.as_deref().unwrap_or("telemetry service");
            match &health.version {
                Some(version) => eprintln!("{service} {version} reachable at {url}"),
                None => eprintln!("{service} reachable at {url}"),
            }
        }
        Ok(())
    } else {
        Err(CliError::UnexpectedResponse {
            message: format!("service answered with status '{}'", health.status),
        })
    }
}

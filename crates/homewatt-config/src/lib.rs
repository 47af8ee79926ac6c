//! Shared configuration for the homewatt CLI and TUI.
//!
//! A single TOML file plus `HOMEWATT_*` environment variables (env wins),
//! translated into `homewatt_core::DashboardConfig`. Both binaries layer
//! their own flags on top; flags beat everything here.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use homewatt_core::{Credentials, DashboardConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config struct ──────────────────────────────────────────────

/// On-disk configuration shared by CLI and TUI.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Backend root URL.
    #[serde(default = "default_server")]
    pub server: String,

    /// Login username. Leave unset to skip the login step (useful when
    /// the backend runs without auth in development).
    pub username: Option<String>,

    /// Login password (plaintext -- prefer `password_env`).
    pub password: Option<String>,

    /// Name of an environment variable holding the password.
    pub password_env: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Polling period in seconds. Zero disables the live refresh cycle.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: default_server(),
            username: None,
            password: None,
            password_env: None,
            timeout_secs: default_timeout(),
            poll_interval_secs: default_poll_interval(),
        }
    }
}

fn default_server() -> String {
    "http://127.0.0.1:5000".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_poll_interval() -> u64 {
    5
}

// ── Loading ─────────────────────────────────────────────────────────

/// The default config file path: `<config dir>/homewatt/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "homewatt").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load configuration from the default path (if present) and environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));
    if let Some(path) = config_path() {
        figment = figment.merge(Toml::file(path));
    }
    Ok(figment.merge(Env::prefixed("HOMEWATT_")).extract()?)
}

/// Load configuration from an explicit file path plus environment.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    Ok(Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("HOMEWATT_"))
        .extract()?)
}

// ── Translation ─────────────────────────────────────────────────────

/// Resolve a [`Config`] into the core's runtime `DashboardConfig`.
pub fn to_dashboard_config(config: &Config) -> Result<DashboardConfig, ConfigError> {
    let base_url = config
        .server
        .parse()
        .map_err(|e| ConfigError::Validation {
            field: "server".into(),
            reason: format!("{e}"),
        })?;

    let credentials = match &config.username {
        Some(username) => {
            let password = resolve_password(config)?;
            Some(Credentials {
                username: username.clone(),
                password,
            })
        }
        None => None,
    };

    Ok(DashboardConfig {
        base_url,
        credentials,
        timeout: Duration::from_secs(config.timeout_secs),
        poll_interval: Duration::from_secs(config.poll_interval_secs),
    })
}

/// Password resolution order: named env var, then the plaintext field.
fn resolve_password(config: &Config) -> Result<SecretString, ConfigError> {
    if let Some(ref var) = config.password_env {
        return match std::env::var(var) {
            Ok(value) => Ok(SecretString::from(value)),
            Err(_) => Err(ConfigError::Validation {
                field: "password_env".into(),
                reason: format!("environment variable {var} is not set"),
            }),
        };
    }
    match &config.password {
        Some(password) => Ok(SecretString::from(password.clone())),
        None => Err(ConfigError::Validation {
            field: "password".into(),
            reason: "username set but no password or password_env".into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.server, "http://127.0.0.1:5000");
        assert_eq!(config.poll_interval_secs, 5);
        assert!(config.username.is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                "server = \"http://energy.local:8000\"\npoll_interval_secs = 10",
            )?;

            let config = load_config_from(Path::new("config.toml")).expect("load");
            assert_eq!(config.server, "http://energy.local:8000");
            assert_eq!(config.poll_interval_secs, 10);
            assert_eq!(config.timeout_secs, 30); // untouched default
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file_values() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", "server = \"http://file.local:5000\"")?;
            jail.set_env("HOMEWATT_SERVER", "http://env.local:5000");
            jail.set_env("HOMEWATT_TIMEOUT_SECS", "12");

            let config = load_config_from(Path::new("config.toml")).expect("load");
            assert_eq!(config.server, "http://env.local:5000");
            assert_eq!(config.timeout_secs, 12);
            Ok(())
        });
    }

    #[test]
    fn translation_builds_credentials() {
        let config = Config {
            username: Some("alice".into()),
            password: Some("hunter2".into()),
            ..Config::default()
        };
        let dashboard = to_dashboard_config(&config).expect("translate");
        assert!(dashboard.credentials.is_some());
        assert_eq!(dashboard.poll_interval, Duration::from_secs(5));
    }

    #[test]
    fn username_without_password_is_rejected() {
        let config = Config {
            username: Some("alice".into()),
            ..Config::default()
        };
        let err = to_dashboard_config(&config).expect_err("should fail");
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn bad_server_url_is_rejected() {
        let config = Config {
            server: "not a url".into(),
            ..Config::default()
        };
        assert!(to_dashboard_config(&config).is_err());
    }
}

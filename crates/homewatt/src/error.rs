//! CLI error types and exit codes.
//!
//! Maps `CoreError` variants into user-facing errors with actionable hints.

use thiserror::Error;

use homewatt_core::CoreError;

/// Exit codes, stable for scripting.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Cannot reach the backend at {url}: {reason}\n  Check that the server is running, or pass --server")]
    Connection { url: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication required\n  Set username/password in the config file or HOMEWATT_USERNAME / HOMEWATT_PASSWORD")]
    Auth,

    #[error("Login failed: {message}")]
    LoginFailed { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource} '{identifier}' not found\n  Run `homewatt {list_command}` to see what exists")]
    NotFound {
        resource: &'static str,
        identifier: String,
        list_command: &'static str,
    },

    // ── API ──────────────────────────────────────────────────────────
    /// The backend said no; its message is shown verbatim.
    #[error("{message}")]
    Rejected { message: String },

    #[error("Request failed (HTTP {status}): {message}")]
    RequestFailed { status: u16, message: String },

    /// A view fetch degraded; the reason is the transport error text.
    #[error("Could not load {view}: {reason}")]
    Fetch { view: &'static str, reason: String },

    // ── Input ────────────────────────────────────────────────────────
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Internal(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Connection { .. } => exit_code::CONNECTION,
            Self::Auth | Self::LoginFailed { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::Connection { url, reason },
            CoreError::AuthRequired => CliError::Auth,
            CoreError::LoginFailed { message } => CliError::LoginFailed { message },
            CoreError::Rejected { message } => CliError::Rejected { message },
            CoreError::RequestFailed { status, message } => {
                CliError::RequestFailed { status, message }
            }
            CoreError::Config { message } => CliError::Config(message),
            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

impl From<homewatt_config::ConfigError> for CliError {
    fn from(err: homewatt_config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}

// ── Core error types ──
//
// User-facing errors from homewatt-core. Consumers never see raw reqwest
// errors or JSON parse failures directly; the `From<homewatt_api::Error>`
// impl translates the transport taxonomy into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Not authenticated -- log in first")]
    AuthRequired,

    #[error("Login failed: {message}")]
    LoginFailed { message: String },

    // ── Operation errors ─────────────────────────────────────────────
    /// The backend processed the request and said no. The message is the
    /// server's own and is what users should see.
    #[error("{message}")]
    Rejected { message: String },

    #[error("Request failed (HTTP {status}): {message}")]
    RequestFailed { status: u16, message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The message to put in a notification: the server's own words when
    /// it supplied any, a generic line otherwise.
    pub fn notification_message(&self) -> String {
        match self {
            Self::Rejected { message } => message.clone(),
            Self::AuthRequired => "Session expired -- please log in again".into(),
            _ => "Request failed -- see the log for details".into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<homewatt_api::Error> for CoreError {
    fn from(err: homewatt_api::Error) -> Self {
        match err {
            homewatt_api::Error::AuthRequired => CoreError::AuthRequired,
            homewatt_api::Error::LoginFailed { message } => CoreError::LoginFailed { message },
            homewatt_api::Error::Api { message } => CoreError::Rejected { message },
            homewatt_api::Error::RequestFailed { status, message } => {
                CoreError::RequestFailed { status, message }
            }
            homewatt_api::Error::Transport(ref e) => CoreError::ConnectionFailed {
                url: e
                    .url()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "<unknown>".into()),
                reason: e.to_string(),
            },
            homewatt_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            homewatt_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

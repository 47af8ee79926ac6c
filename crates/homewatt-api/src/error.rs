use thiserror::Error;

/// Top-level error type for the `homewatt-api` crate.
///
/// Covers the failure taxonomy of the backend: authentication (redirect to
/// the login page), plain HTTP failures, the `{success, message}` mutation
/// envelope, transport, and malformed payloads. `homewatt-core` maps these
/// into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The backend redirected to the login page — session expired or
    /// never established.
    #[error("Not authenticated -- the backend redirected to the login page")]
    AuthRequired,

    /// The login form was rejected (wrong credentials, locked account).
    #[error("Login failed: {message}")]
    LoginFailed { message: String },

    // ── HTTP ────────────────────────────────────────────────────────
    /// Non-2xx HTTP status without a parseable error envelope.
    #[error("Request failed (HTTP {status}): {message}")]
    RequestFailed { status: u16, message: String },

    /// The backend answered with `{"success": false, "message": ...}`.
    #[error("{message}")]
    Api { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error means the session is gone and a fresh
    /// login might resolve it.
    pub fn is_auth_required(&self) -> bool {
        matches!(self, Self::AuthRequired)
    }

    /// Returns `true` if this is a transient error worth retrying manually.
    /// The client itself never retries.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// The message the backend supplied, if it supplied one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message } => Some(message),
            _ => None,
        }
    }
}

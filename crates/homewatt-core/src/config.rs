// ── Runtime connection configuration ──
//
// These types describe *how* to reach the energy backend. They carry
// credential data and connection tuning, but never touch disk. The
// CLI/TUI constructs a `DashboardConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Login-form credentials for the backend's session auth.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

/// Configuration for connecting to a single backend.
///
/// Built by CLI/TUI -- core never reads config files.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Backend root URL (e.g., `http://127.0.0.1:5000`).
    pub base_url: Url,
    /// Login credentials, if the session isn't established out of band.
    pub credentials: Option<Credentials>,
    /// Request timeout.
    pub timeout: Duration,
    /// Polling period for the live refresh cycle. Zero = never poll.
    pub poll_interval: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".parse().expect("default URL"),
            credentials: None,
            timeout: Duration::from_secs(30),
            poll_interval: Duration::from_secs(5),
        }
    }
}

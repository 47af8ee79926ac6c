// Energy backend HTTP client
//
// Wraps `reqwest::Client` with URL construction, login-redirect detection,
// and mutation-envelope unwrapping. All endpoint modules (rooms, alerts,
// etc.) are implemented as inherent methods via separate files to keep this
// module focused on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::MutationEnvelope;
use crate::transport::TransportConfig;

/// Outcome of a fetch against a session-authenticated endpoint.
///
/// The backend never answers an expired session with a 401 — it redirects
/// to the login page. Every fetch therefore returns a tagged outcome so
/// view updaters can render a login prompt instead of data, without
/// treating auth expiry as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome<T> {
    /// The session is live and the payload was parsed.
    Authenticated(T),
    /// The request was redirected to the login page.
    Unauthenticated,
}

impl<T> FetchOutcome<T> {
    /// The payload, if authenticated.
    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Authenticated(data) => Some(data),
            Self::Unauthenticated => None,
        }
    }

    /// Map the authenticated payload, preserving the auth tag.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchOutcome<U> {
        match self {
            Self::Authenticated(data) => FetchOutcome::Authenticated(f(data)),
            Self::Unauthenticated => FetchOutcome::Unauthenticated,
        }
    }
}

/// Acknowledgement of a successful mutation.
///
/// Carries the server's human-readable message and, for the alert
/// simulation endpoint, the usage figure it reports.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationAck {
    pub message: String,
    pub current_usage_kwh: Option<f64>,
}

/// Raw HTTP client for the energy backend's JSON API.
///
/// Fetches return [`FetchOutcome`] so auth expiry is data, not an error.
/// Mutations unwrap the `{success, message}` envelope; a `success: false`
/// answer becomes [`Error::Api`] carrying the server's message.
pub struct EnergyApi {
    http: reqwest::Client,
    base_url: Url,
}

impl EnergyApi {
    /// Create a new client from a `TransportConfig`.
    ///
    /// If the config doesn't already include a cookie jar, one is created
    /// automatically (the backend uses session-cookie auth). The `base_url`
    /// should be the server root, e.g. `http://127.0.0.1:5000`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let http = config.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client (for the login flow).
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an `/api/{path}` endpoint.
    pub(crate) fn api_url(&self, path: &str) -> Url {
        let full = format!(
            "{}/api/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path
        );
        Url::parse(&full).expect("invalid API URL")
    }

    /// Build a full URL for a server-root path (login form).
    pub(crate) fn root_url(&self, path: &str) -> Url {
        let full = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&full).expect("invalid URL")
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and parse the JSON payload.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
    ) -> Result<FetchOutcome<T>, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        self.parse_fetch(resp).await
    }

    /// Send a POST with a form body and unwrap the mutation envelope.
    pub(crate) async fn post_form<F: Serialize + ?Sized>(
        &self,
        url: Url,
        form: &F,
    ) -> Result<MutationAck, Error> {
        debug!("POST {} (form)", url);

        let resp = self
            .http
            .post(url)
            .form(form)
            .send()
            .await
            .map_err(Error::Transport)?;
        self.parse_ack(resp).await
    }

    /// Send a POST with a JSON body and unwrap the mutation envelope.
    pub(crate) async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<MutationAck, Error> {
        debug!("POST {} (json)", url);

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        self.parse_ack(resp).await
    }

    /// Send a bare POST (no body) and unwrap the mutation envelope.
    pub(crate) async fn post_empty(&self, url: Url) -> Result<MutationAck, Error> {
        debug!("POST {}", url);

        let resp = self.http.post(url).send().await.map_err(Error::Transport)?;
        self.parse_ack(resp).await
    }

    /// Send a DELETE request and unwrap the mutation envelope.
    pub(crate) async fn delete(&self, url: Url) -> Result<MutationAck, Error> {
        debug!("DELETE {}", url);

        let resp = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(Error::Transport)?;
        self.parse_ack(resp).await
    }

    // ── Response parsing ─────────────────────────────────────────────

    /// Parse a fetch response: login redirect → `Unauthenticated`,
    /// non-OK → `RequestFailed`, otherwise JSON.
    async fn parse_fetch<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<FetchOutcome<T>, Error> {
        if on_login_page(resp.url()) {
            debug!("redirected to login page -- session expired");
            return Ok(FetchOutcome::Unauthenticated);
        }

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::RequestFailed {
                status: status.as_u16(),
                message: format!(
                    "server answered {status} for {}",
                    resp.url().path()
                ),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        let data = serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })?;
        Ok(FetchOutcome::Authenticated(data))
    }

    /// Parse a mutation response: the `{success, message}` envelope wins
    /// over the HTTP status, because the backend pairs `success: false`
    /// bodies with 4xx/5xx statuses and the message is the useful part.
    async fn parse_ack(&self, resp: reqwest::Response) -> Result<MutationAck, Error> {
        if on_login_page(resp.url()) {
            return Err(Error::AuthRequired);
        }

        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        let Ok(envelope) = serde_json::from_str::<MutationEnvelope>(&body) else {
            if status.is_success() {
                return Err(Error::Deserialization {
                    message: "mutation response was not a {success, message} envelope".into(),
                    body,
                });
            }
            return Err(Error::RequestFailed {
                status: status.as_u16(),
                message: format!("server answered {status}"),
            });
        };

        if envelope.success {
            Ok(MutationAck {
                message: envelope
                    .message
                    .unwrap_or_else(|| "operation completed".into()),
                current_usage_kwh: envelope.current_usage,
            })
        } else {
            Err(Error::Api {
                message: envelope
                    .message
                    .unwrap_or_else(|| format!("server rejected the request ({status})")),
            })
        }
    }
}

/// Whether a (post-redirect) final URL landed on the login page — the sole
/// authentication signal the backend emits.
pub(crate) fn on_login_page(url: &Url) -> bool {
    url.path().trim_end_matches('/').ends_with("/login")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_page_detection() {
        let hit: Url = "http://localhost:5000/login?next=%2Fdashboard"
            .parse()
            .expect("url");
        let miss: Url = "http://localhost:5000/api/alerts".parse().expect("url");
        assert!(on_login_page(&hit));
        assert!(!on_login_page(&miss));
    }

    #[test]
    fn fetch_outcome_map_preserves_tag() {
        let auth = FetchOutcome::Authenticated(2).map(|n| n * 10);
        assert_eq!(auth, FetchOutcome::Authenticated(20));

        let unauth: FetchOutcome<i32> = FetchOutcome::Unauthenticated;
        assert_eq!(unauth.map(|n| n * 10), FetchOutcome::Unauthenticated);
    }
}

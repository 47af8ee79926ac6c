// Session login.
//
// The backend has no token auth: a successful POST to /login sets a session
// cookie in the shared jar and redirects away from the login page. A failed
// login re-renders the login page, so the final URL is the verdict.

use tracing::debug;

use crate::client::{EnergyApi, on_login_page};
use crate::error::Error;

impl EnergyApi {
    /// Log in with username and password, populating the session cookie jar.
    ///
    /// `POST /login` (form-encoded)
    pub async fn login(&self, username: &str, password: &str) -> Result<(), Error> {
        let url = self.root_url("login");
        debug!("POST {} (login)", url);

        let resp = self
            .http()
            .post(url)
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::LoginFailed {
                message: format!("server answered {status}"),
            });
        }

        if on_login_page(resp.url()) {
            return Err(Error::LoginFailed {
                message: "invalid username or password".into(),
            });
        }

        debug!("session established");
        Ok(())
    }
}

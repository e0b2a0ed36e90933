// Session login/logout
//
// Login is a challenge-response: the password is digested with the
// client's nonce and the router answers with a `stok` token that must
// appear in the path of every later call.

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::client::{MiwifiClient, check_status, decode};
use crate::error::Error;
use crate::models::LoginResponse;
use crate::nonce::hash_password;

const LOGIN_PATH: &str = "/api/xqsystem/login";
const LOGOUT_PATH: &str = "/web/logout";

/// `logtype` value the web console sends for password logins.
const LOGIN_TYPE: &str = "2";

impl MiwifiClient {
    /// Authenticate and store the session token.
    ///
    /// `POST /cgi-bin/luci/api/xqsystem/login?username=&password=&logtype=2&nonce=`
    ///
    /// A non-success status, an undecodable body, or a missing or empty
    /// token all fail with `Error::Authentication` and leave the client
    /// unauthenticated.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        let url = self.public_url(LOGIN_PATH)?;
        debug!(%url, "login");

        let digest = hash_password(password.expose_secret(), self.nonce());
        let request = self.build(
            Method::POST,
            url,
            &[
                ("username", username),
                ("password", &digest),
                ("logtype", LOGIN_TYPE),
                ("nonce", self.nonce()),
            ],
        )?;
        let resp = self.execute(request).await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("login failed (HTTP {status}): {body}"),
            });
        }

        let login: LoginResponse = decode(resp).await.map_err(|e| Error::Authentication {
            message: format!("malformed login response: {e}"),
        })?;

        match login.token {
            Some(token) if !token.is_empty() => {
                self.set_token(token);
                debug!("session token received");
                Ok(())
            }
            _ => Err(Error::Authentication {
                message: "invalid token".into(),
            }),
        }
    }

    /// End the current session.
    ///
    /// `GET /cgi-bin/luci/;stok={token}/web/logout`
    ///
    /// The token is cleared only once the router confirms; a failed call
    /// leaves the session in place.
    pub async fn logout(&self) -> Result<(), Error> {
        let url = self.session_url(LOGOUT_PATH)?;
        debug!(%url, "logout");

        let request = self.build(Method::GET, url, &[])?;
        let resp = self.execute(request).await?;
        check_status(resp)?;

        self.clear_token();
        debug!("session closed");
        Ok(())
    }
}

// MiWiFi API HTTP client
//
// Wraps `reqwest::Client` with the router's URL layout, session token
// bookkeeping, bounded retries and status/JSON handling. Endpoint methods
// live in `auth` and `system` to keep this module focused on transport
// mechanics.

use std::sync::{PoisonError, RwLock};

use reqwest::header::ACCEPT;
use reqwest::{Method, Request, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::nonce::generate_nonce;
use crate::transport::{RetryPolicy, TransportConfig};

/// Management console prefix shared by every endpoint.
const BASE_PATH: &str = "/cgi-bin/luci";

const JSON: &str = "application/json";

/// Whether the client currently holds a session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
}

/// HTTP client for one router.
///
/// Starts `Unauthenticated`; `login` stores a token and `logout` clears it.
/// The nonce is generated once and reused for every login made through
/// this instance.
pub struct MiwifiClient {
    http: reqwest::Client,
    base_url: Url,
    nonce: String,
    retry: RetryPolicy,
    token: RwLock<Option<String>>,
}

impl MiwifiClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the router root (e.g. `http://192.168.31.1`) and
    /// `identity` a stable per-machine value, usually a MAC address.
    pub fn new(base_url: Url, identity: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            nonce: generate_nonce(identity),
            retry: transport.retry.clone(),
            token: RwLock::new(None),
        })
    }

    /// Create a client with a pre-built `reqwest::Client` and a fixed nonce.
    ///
    /// Requests are sent once; use [`with_retry`](Self::with_retry) to
    /// enable retries.
    pub fn with_client(http: reqwest::Client, base_url: Url, nonce: impl Into<String>) -> Self {
        Self {
            http,
            base_url,
            nonce: nonce.into(),
            retry: RetryPolicy::none(),
            token: RwLock::new(None),
        }
    }

    /// Replace the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The router base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The login nonce used by this client.
    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    pub fn session_state(&self) -> SessionState {
        if self.token().is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session_state() == SessionState::Authenticated
    }

    /// The current session token, if logged in.
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // ── Session token ────────────────────────────────────────────────

    pub(crate) fn set_token(&self, token: String) {
        debug!("storing session token");
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    pub(crate) fn clear_token(&self) {
        debug!("clearing session token");
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build an unauthenticated URL: `{base}/cgi-bin/luci{resource}`.
    pub(crate) fn public_url(&self, resource: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{BASE_PATH}{resource}"))?)
    }

    /// Build a session URL: `{base}/cgi-bin/luci/;stok={token}{resource}`.
    ///
    /// Fails with `NotAuthorized` when no token is held.
    pub(crate) fn session_url(&self, resource: &str) -> Result<Url, Error> {
        let token = self.token().ok_or(Error::NotAuthorized)?;
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!(
            "{base}{BASE_PATH}/;stok={token}{resource}"
        ))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Build a request with the JSON `Accept` header and query parameters.
    pub(crate) fn build(
        &self,
        method: Method,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<Request, Error> {
        let mut builder = self.http.request(method, url).header(ACCEPT, JSON);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        builder.build().map_err(Error::Transport)
    }

    /// Send a request, retrying transient failures per the retry policy.
    pub(crate) async fn execute(&self, request: Request) -> Result<Response, Error> {
        debug!("{} {}", request.method(), request.url());

        let mut attempt = 0;
        loop {
            let Some(try_request) = request.try_clone() else {
                return self.http.execute(request).await.map_err(Error::Transport);
            };
            let exhausted = attempt >= self.retry.max_retries;

            match self.http.execute(try_request).await {
                Ok(resp) if !exhausted && RetryPolicy::retries_status(resp.status()) => {
                    warn!(status = %resp.status(), attempt, "retrying {}", request.url());
                }
                Err(e) if !exhausted && RetryPolicy::retries_error(&e) => {
                    warn!(error = %e, attempt, "retrying {}", request.url());
                }
                outcome => return outcome.map_err(Error::Transport),
            }

            tokio::time::sleep(self.retry.backoff(attempt)).await;
            attempt += 1;
        }
    }

    /// Send a GET and decode the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<T, Error> {
        let request = self.build(Method::GET, url, query)?;
        let resp = self.execute(request).await?;
        let resp = check_status(resp)?;
        decode(resp).await
    }
}

/// Map any status >= 400 to `Error::Status`, leaving the body unread.
pub(crate) fn check_status(resp: Response) -> Result<Response, Error> {
    let status = resp.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(Error::Status {
            status: status.as_u16(),
            url: resp.url().to_string(),
        });
    }
    Ok(resp)
}

/// Read the body and deserialize it, keeping the raw text on failure.
pub(crate) async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, Error> {
    let body = resp.text().await.map_err(Error::Transport)?;
    serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.clone(),
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> MiwifiClient {
        MiwifiClient::with_client(reqwest::Client::new(), Url::parse(base).unwrap(), "nonce")
    }

    #[test]
    fn public_url_omits_token() {
        let client = client("http://192.168.31.1");
        let url = client.public_url("/api/xqsystem/login").unwrap();
        assert_eq!(
            url.as_str(),
            "http://192.168.31.1/cgi-bin/luci/api/xqsystem/login"
        );
    }

    #[test]
    fn session_url_inserts_token_segment() {
        let client = client("http://192.168.31.1/");
        client.set_token("abc".into());
        let url = client.session_url("/api/misystem/status").unwrap();
        assert_eq!(
            url.as_str(),
            "http://192.168.31.1/cgi-bin/luci/;stok=abc/api/misystem/status"
        );
    }

    #[test]
    fn session_url_requires_token() {
        let client = client("http://192.168.31.1");
        assert!(matches!(
            client.session_url("/web/logout"),
            Err(Error::NotAuthorized)
        ));
    }

    #[test]
    fn state_follows_token() {
        let client = client("http://192.168.31.1");
        assert_eq!(client.session_state(), SessionState::Unauthenticated);
        client.set_token("t".into());
        assert!(client.is_authenticated());
        client.clear_token();
        assert_eq!(client.session_state(), SessionState::Unauthenticated);
    }
}

use thiserror::Error;

/// Top-level error type for the `miwifi-api` crate.
///
/// Covers every failure mode of the router API: login, missing session,
/// transport, and response decoding. `miwifi-core` maps these into its
/// own taxonomy.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login failed (wrong credentials, empty token, malformed response).
    #[error("Router login rejected: {message}")]
    Authentication { message: String },

    /// An authorized call was attempted without a session token.
    #[error("client is not authorized")]
    NotAuthorized,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("Request to router failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The router answered with HTTP status >= 400.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup error while building the HTTP client.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// Body did not match the expected JSON shape; `body` keeps the raw text.
    #[error("Unexpected router response: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` for network failures and HTTP error statuses.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { .. })
    }

    /// Returns `true` if the response body could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Deserialization { .. })
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

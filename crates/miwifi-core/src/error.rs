// ── Core error types ──
//
// Errors surfaced by miwifi-core. The `From<miwifi_api::Error>` impl folds
// wire-level failures into four groups: authentication, missing session,
// transport and decode.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Session errors ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Not logged in to the router")]
    NotAuthorized,

    // ── Transport errors ─────────────────────────────────────────────
    #[error("Cannot connect to router at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Router request timed out")]
    Timeout,

    #[error("Router returned HTTP {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Transport error: {message}")]
    Transport { message: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Malformed router response: {message}")]
    Decode { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Network failures and HTTP error statuses.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed { .. } | Self::Timeout | Self::Http { .. } | Self::Transport { .. }
        )
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

// ── Conversion from wire-level errors ────────────────────────────────

impl From<miwifi_api::Error> for CoreError {
    fn from(err: miwifi_api::Error) -> Self {
        match err {
            miwifi_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            miwifi_api::Error::NotAuthorized => CoreError::NotAuthorized,
            miwifi_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Transport {
                        message: e.to_string(),
                    }
                }
            }
            miwifi_api::Error::Status { status, url } => CoreError::Http { status, url },
            miwifi_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid router URL: {e}"),
            },
            miwifi_api::Error::Tls(message) => CoreError::Config { message },
            miwifi_api::Error::Deserialization { message, .. } => CoreError::Decode { message },
        }
    }
}

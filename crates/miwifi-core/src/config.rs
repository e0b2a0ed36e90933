// ── Runtime router configuration ──
//
// Describes how to reach and poll one router. Built by the TUI from the
// config file and CLI flags; core never reads config files.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Configuration for one router session.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Router URL (e.g., `http://192.168.31.1`).
    pub url: Url,
    /// Stable identity mixed into the login nonce, usually a MAC address.
    pub identity: String,
    pub username: String,
    pub password: SecretString,
    /// Skip certificate checks for HTTPS consoles.
    pub accept_invalid_certs: bool,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Transport retries for transient failures.
    pub max_retries: u32,
    /// How often to poll `misystem/status`.
    pub status_interval: Duration,
    /// How often to poll `misystem/bandwidth_test`.
    pub bandwidth_interval: Duration,
}

impl RouterConfig {
    /// Config with default tuning: 10s timeout, 3 retries, 10s status
    /// and 60s bandwidth polling.
    pub fn new(url: Url, username: impl Into<String>, password: SecretString) -> Self {
        Self {
            url,
            identity: String::new(),
            username: username.into(),
            password,
            accept_invalid_certs: false,
            timeout: Duration::from_secs(10),
            max_retries: 3,
            status_interval: Duration::from_secs(10),
            bandwidth_interval: Duration::from_secs(60),
        }
    }
}

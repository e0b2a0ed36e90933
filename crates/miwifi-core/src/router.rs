// ── Router session facade ──
//
// Owns the API client for one router and exposes the session operations
// (connect/disconnect), one-shot reads, and poller constructors. Cheap to
// clone; pollers hold a clone and only ever read the session token.

use std::sync::Arc;

use secrecy::ExposeSecret;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use miwifi_api::{
    BandwidthResult, MiwifiClient, RetryPolicy, StatusSnapshot, TlsMode, TransportConfig,
};

use crate::config::RouterConfig;
use crate::error::CoreError;
use crate::poller::spawn_poller;
use crate::stream::LatestReceiver;

#[derive(Clone)]
pub struct Router {
    inner: Arc<RouterInner>,
}

struct RouterInner {
    config: RouterConfig,
    client: MiwifiClient,
}

impl Router {
    /// Build the HTTP client from `config`. Does not touch the network.
    pub fn new(config: RouterConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: if config.accept_invalid_certs {
                TlsMode::DangerAcceptInvalid
            } else {
                TlsMode::System
            },
            timeout: config.timeout,
            retry: RetryPolicy {
                max_retries: config.max_retries,
                ..RetryPolicy::default()
            },
            ..TransportConfig::default()
        };
        let client = MiwifiClient::new(config.url.clone(), &config.identity, &transport)?;
        Ok(Self::with_client(config, client))
    }

    /// Wrap an already built client.
    pub fn with_client(config: RouterConfig, client: MiwifiClient) -> Self {
        Self {
            inner: Arc::new(RouterInner { config, client }),
        }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.inner.config
    }

    pub fn client(&self) -> &MiwifiClient {
        &self.inner.client
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.client.is_authenticated()
    }

    // ── Session ──────────────────────────────────────────────────────

    /// Log in with the configured credentials.
    pub async fn connect(&self) -> Result<(), CoreError> {
        let config = &self.inner.config;
        info!(url = %config.url, username = %config.username, "connecting");
        self.inner
            .client
            .login(&config.username, &config.password)
            .await?;
        info!("connected");
        Ok(())
    }

    /// Log out. On failure the session token is kept.
    pub async fn disconnect(&self) -> Result<(), CoreError> {
        info!("disconnecting");
        self.inner.client.logout().await?;
        Ok(())
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub async fn status(&self) -> Result<StatusSnapshot, CoreError> {
        Ok(self.inner.client.status().await?)
    }

    /// Last cached bandwidth measurement (never starts a new test).
    pub async fn bandwidth(&self) -> Result<BandwidthResult, CoreError> {
        Ok(self.inner.client.bandwidth_test(true).await?)
    }

    // ── Pollers ──────────────────────────────────────────────────────

    /// Poll status every `status_interval` until `cancel` fires.
    pub fn poll_status(
        &self,
        cancel: &CancellationToken,
    ) -> (LatestReceiver<StatusSnapshot>, JoinHandle<()>) {
        let router = self.clone();
        spawn_poller(
            "status",
            self.inner.config.status_interval,
            cancel.clone(),
            move || {
                let router = router.clone();
                async move { router.status().await }
            },
        )
    }

    /// Poll the bandwidth result every `bandwidth_interval` until `cancel` fires.
    pub fn poll_bandwidth(
        &self,
        cancel: &CancellationToken,
    ) -> (LatestReceiver<BandwidthResult>, JoinHandle<()>) {
        let router = self.clone();
        spawn_poller(
            "bandwidth",
            self.inner.config.bandwidth_interval,
            cancel.clone(),
            move || {
                let router = router.clone();
                async move { router.bandwidth().await }
            },
        )
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("url", &self.inner.config.url.as_str())
            .field("username", &self.inner.config.username)
            .field("password_set", &!self.inner.config.password.expose_secret().is_empty())
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

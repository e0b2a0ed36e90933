//! Shared configuration for the MiWiFi TUI.
//!
//! A flat TOML file merged with `MIWIFI_*` environment variables and CLI
//! overrides, password and identity resolution, and translation to
//! `miwifi_core::RouterConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use miwifi_core::RouterConfig;

/// Environment variable holding the router password.
pub const PASSWORD_ENV: &str = "MIWIFI_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no router host configured")]
    MissingHost,

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config struct ──────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Router address, with or without scheme (e.g. "192.168.31.1").
    pub host: Option<String>,

    #[serde(default = "default_username")]
    pub username: String,

    /// Plaintext password. Prefer the env var or the prompt.
    pub password: Option<String>,

    /// Override for the login nonce identity (normally the MAC address).
    pub identity: Option<String>,

    /// Status polling interval, humantime format ("10s").
    #[serde(default = "default_interval")]
    pub interval: String,

    /// Bandwidth polling interval, humantime format ("1m").
    #[serde(default = "default_bandwidth_interval")]
    pub bandwidth_interval: String,

    /// Panel to show: dash, net, cpu, dev, info or mem.
    #[serde(default = "default_ui")]
    pub ui: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Transport retries for transient failures.
    #[serde(default = "default_retries")]
    pub retries: u32,

    #[serde(default)]
    pub insecure: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: None,
            username: default_username(),
            password: None,
            identity: None,
            interval: default_interval(),
            bandwidth_interval: default_bandwidth_interval(),
            ui: default_ui(),
            timeout: default_timeout(),
            retries: default_retries(),
            insecure: false,
        }
    }
}

fn default_username() -> String {
    "admin".into()
}
fn default_interval() -> String {
    "10s".into()
}
fn default_bandwidth_interval() -> String {
    "1m".into()
}
fn default_ui() -> String {
    "dash".into()
}
fn default_timeout() -> u64 {
    10
}
fn default_retries() -> u32 {
    3
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("", "", "miwifi").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("miwifi");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("MIWIFI_").ignore(&["password"]))
}

/// Load the Config from the default path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the Config from `path` + environment. A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    Ok(figment(path).extract()?)
}

/// Load from `path` + environment, then apply `overrides` on top.
///
/// `overrides` should skip unset fields when serialized so they do not
/// mask lower layers.
pub fn load_config_with<T: Serialize>(path: &Path, overrides: &T) -> Result<Config, ConfigError> {
    Ok(figment(path)
        .merge(Serialized::defaults(overrides))
        .extract()?)
}

// ── Host, password, identity ────────────────────────────────────────

/// Add `http://` when no scheme is given and drop trailing slashes.
pub fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.contains("://") {
        host.to_owned()
    } else {
        format!("http://{host}")
    }
}

/// Resolve the password: env var first, then plaintext in config.
///
/// `None` means the caller has to ask for it.
pub fn resolve_password(cfg: &Config) -> Option<SecretString> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Some(SecretString::from(pw));
        }
    }
    cfg.password
        .as_ref()
        .filter(|pw| !pw.is_empty())
        .map(|pw| SecretString::from(pw.clone()))
}

/// The configured identity, or the local hardware address, or "".
pub fn resolve_identity(cfg: &Config) -> String {
    cfg.identity
        .clone()
        .filter(|id| !id.is_empty())
        .or_else(local_identity)
        .unwrap_or_default()
}

/// First hardware address of an up, non-loopback interface.
///
/// Read from `/sys/class/net`, so only Linux has one; elsewhere set
/// `identity` in the config or `MIWIFI_IDENTITY`.
#[cfg(target_os = "linux")]
pub fn local_identity() -> Option<String> {
    identity_from_sysfs(Path::new("/sys/class/net"))
}

#[cfg(not(target_os = "linux"))]
pub fn local_identity() -> Option<String> {
    None
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn identity_from_sysfs(root: &Path) -> Option<String> {
    let mut names: Vec<PathBuf> = std::fs::read_dir(root)
        .ok()?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    names.sort();

    names.into_iter().find_map(|iface| {
        let up = std::fs::read_to_string(iface.join("operstate"))
            .is_ok_and(|state| state.trim() == "up");
        let address = std::fs::read_to_string(iface.join("address")).ok()?;
        let address = address.trim();
        let usable = up && !address.is_empty() && address != "00:00:00:00:00:00";
        usable.then(|| address.to_owned())
    })
}

// ── Translation to core config ──────────────────────────────────────

impl Config {
    /// Build a `RouterConfig`, validating host and intervals.
    pub fn to_router_config(
        &self,
        password: SecretString,
        identity: String,
    ) -> Result<RouterConfig, ConfigError> {
        let host = self
            .host
            .as_deref()
            .filter(|h| !h.trim().is_empty())
            .ok_or(ConfigError::MissingHost)?;
        let url: url::Url = normalize_host(host)
            .parse()
            .map_err(|e| ConfigError::Validation {
                field: "host".into(),
                reason: format!("{e}: {host}"),
            })?;

        let mut config = RouterConfig::new(url, self.username.clone(), password);
        config.identity = identity;
        config.accept_invalid_certs = self.insecure;
        config.timeout = Duration::from_secs(self.timeout.max(1));
        config.max_retries = self.retries;
        config.status_interval = parse_interval("interval", &self.interval)?;
        config.bandwidth_interval = parse_interval("bandwidth_interval", &self.bandwidth_interval)?;
        Ok(config)
    }
}

fn parse_interval(field: &str, value: &str) -> Result<Duration, ConfigError> {
    let duration = humantime::parse_duration(value).map_err(|e| ConfigError::Validation {
        field: field.into(),
        reason: format!("{e}: {value:?}"),
    })?;
    if duration.is_zero() {
        return Err(ConfigError::Validation {
            field: field.into(),
            reason: "must be greater than zero".into(),
        });
    }
    Ok(duration)
}

//! `miwifi-tui`: live terminal dashboard for Xiaomi MiWiFi routers.
//!
//! Logs in to the router's management API, polls status and bandwidth on
//! fixed intervals, and renders one panel (or the full dashboard) until
//! `q` is pressed. Logs go to a file so they never corrupt the screen.

mod action;
mod app;
mod event;
mod panel;
mod panels;
mod theme;
mod tui;
mod widgets;

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use secrecy::SecretString;
use serde::Serialize;
use strum::VariantNames;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use miwifi_core::Router;

use crate::app::App;
use crate::panel::PanelKind;

/// Terminal dashboard for monitoring a MiWiFi router.
#[derive(Parser, Debug)]
#[command(name = "miwifi-tui", version, about)]
struct Cli {
    /// Router address (e.g. 192.168.31.1)
    #[arg(long)]
    host: Option<String>,

    /// Login name
    #[arg(long)]
    username: Option<String>,

    /// Router password (prefer MIWIFI_PASSWORD or the prompt)
    #[arg(long)]
    password: Option<String>,

    /// Status polling interval (e.g. 10s)
    #[arg(long)]
    interval: Option<String>,

    /// Bandwidth polling interval (e.g. 1m)
    #[arg(long)]
    bandwidth_interval: Option<String>,

    /// Panel to show: dash, net, cpu, dev, info or mem
    #[arg(long)]
    ui: Option<String>,

    /// Transport retries for transient failures
    #[arg(long)]
    retries: Option<u32>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Accept self-signed certificates
    #[arg(long)]
    insecure: bool,

    /// Log at debug level
    #[arg(long)]
    debug: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log file path (defaults to miwifi-tui.log in the temp dir)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// CLI values layered over the config file. Unset flags are skipped so
/// they do not mask lower layers.
#[derive(Serialize)]
struct Overrides<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    host: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    interval: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bandwidth_interval: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ui: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retries: Option<u32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    insecure: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides<'_> {
        Overrides {
            host: self.host.as_deref(),
            username: self.username.as_deref(),
            interval: self.interval.as_deref(),
            bandwidth_interval: self.bandwidth_interval.as_deref(),
            ui: self.ui.as_deref(),
            retries: self.retries,
            insecure: self.insecure,
        }
    }
}

/// Set up file-based tracing. Nothing may be logged to stdout/stderr while
/// the terminal is in use. The guard must live until exit so logs flush.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match (cli.debug, cli.verbose) {
        (_, 3..) => "trace",
        (true, _) | (_, 2) => "debug",
        (_, 1) => "info",
        _ => "warn",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "miwifi_tui={log_level},miwifi_core={log_level},miwifi_api={log_level}"
        ))
    });

    let log_file = cli
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("miwifi-tui.log"));
    let log_dir = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let log_filename = log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("miwifi-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

fn prompt_host() -> Result<String> {
    print!("Router host: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let host = line.trim();
    if host.is_empty() {
        return Err(eyre!("no router host given"));
    }
    Ok(host.to_owned())
}

fn prompt_password() -> Result<SecretString> {
    let password = rpassword::prompt_password("Password: ").wrap_err("failed to read password")?;
    Ok(SecretString::from(password))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file; hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let path = cli
        .config
        .clone()
        .unwrap_or_else(miwifi_config::config_path);
    let mut cfg = miwifi_config::load_config_with(&path, &cli.overrides())
        .wrap_err_with(|| format!("failed to load {}", path.display()))?;

    let kind: PanelKind = cfg.ui.parse().map_err(|_| {
        eyre!(
            "unknown ui {:?} (expected one of: {})",
            cfg.ui,
            PanelKind::VARIANTS.join(", ")
        )
    })?;

    if cfg.host.as_deref().is_none_or(|h| h.trim().is_empty()) {
        cfg.host = Some(prompt_host()?);
    }

    let password = match cli.password.clone().filter(|p| !p.is_empty()) {
        Some(pw) => SecretString::from(pw),
        None => match miwifi_config::resolve_password(&cfg) {
            Some(pw) => pw,
            None => prompt_password()?,
        },
    };
    let identity = miwifi_config::resolve_identity(&cfg);

    info!(
        host = cfg.host.as_deref().unwrap_or_default(),
        ui = %kind,
        "starting miwifi-tui"
    );

    let router = Router::new(cfg.to_router_config(password, identity)?)?;
    Ok(App::new(router, kind).run().await)
}

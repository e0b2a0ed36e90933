//! Integration tests for the `miwifi-tui` binary.
//!
//! Nothing here needs a router: argument handling, config validation and
//! the login-failure exit path only.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command isolated from the user's config, env and log file.
fn miwifi_cmd(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("miwifi-tui");
    cmd.arg("--config")
        .arg(dir.path().join("config.toml"))
        .arg("--log-file")
        .arg(dir.path().join("miwifi-tui.log"))
        .env_remove("MIWIFI_HOST")
        .env_remove("MIWIFI_USERNAME")
        .env_remove("MIWIFI_PASSWORD")
        .env_remove("MIWIFI_UI")
        .env_remove("RUST_LOG");
    cmd
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn help_lists_options() {
    let dir = TempDir::new().unwrap();
    miwifi_cmd(&dir).arg("--help").assert().success().stdout(
        predicate::str::contains("--host")
            .and(predicate::str::contains("--ui"))
            .and(predicate::str::contains("--interval")),
    );
}

#[test]
fn version_flag() {
    let dir = TempDir::new().unwrap();
    miwifi_cmd(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ── Failures ────────────────────────────────────────────────────────

#[test]
fn unknown_ui_exits_with_failure() {
    let dir = TempDir::new().unwrap();
    miwifi_cmd(&dir)
        .args(["--host", "127.0.0.1", "--password", "x", "--ui", "graphs"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown ui"));
}

#[test]
fn invalid_interval_exits_with_failure() {
    let dir = TempDir::new().unwrap();
    miwifi_cmd(&dir)
        .args(["--host", "127.0.0.1", "--password", "x", "--interval", "soon"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("interval"));
}

#[test]
fn unreachable_router_exits_with_failure() {
    let dir = TempDir::new().unwrap();
    miwifi_cmd(&dir)
        .args(["--host", "127.0.0.1:1", "--password", "x", "--retries", "0"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Connecting..."))
        .stderr(predicate::str::contains("Connection error"));
}

#[test]
fn config_file_supplies_the_panel() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "ui = \"bogus\"\n").unwrap();
    miwifi_cmd(&dir)
        .args(["--host", "127.0.0.1", "--password", "x"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("\"bogus\""));
}

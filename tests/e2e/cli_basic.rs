//! Basic CLI tests for tabnav
//!
//! Tests for command-line argument parsing, help output, version display,
//! and error handling for invalid inputs.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary with an empty config directory, so user settings never leak in
pub fn tabnav(config_home: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("tabnav");
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path());
    cmd
}

// =============================================================================
// Help and Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    let home = TempDir::new().unwrap();
    tabnav(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("USAGE:"))
        .stdout(predicate::str::contains("--replay"))
        .stdout(predicate::str::contains("keymap.toml"));
}

#[test]
fn version_flag_shows_version() {
    let home = TempDir::new().unwrap();
    tabnav(&home)
        .arg("-V")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// =============================================================================
// Invalid Options (Exit Code 3)
// =============================================================================

#[test]
fn unknown_option_returns_exit_code_3() {
    let home = TempDir::new().unwrap();
    tabnav(&home)
        .arg("--unknown-option")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Unknown option"));
}

#[test]
fn missing_fixture_returns_exit_code_3() {
    let home = TempDir::new().unwrap();
    tabnav(&home)
        .args(["/nonexistent/tree.json", "--replay", "j"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn malformed_fixture_returns_exit_code_3() {
    let home = TempDir::new().unwrap();
    let fixture = home.path().join("tree.json");
    std::fs::write(&fixture, "{ not json").unwrap();
    tabnav(&home)
        .arg(&fixture)
        .args(["--replay", "j"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Fixture error"));
}

#[test]
fn bad_replay_key_returns_exit_code_2() {
    let home = TempDir::new().unwrap();
    tabnav(&home)
        .args(["--replay", "ctrl+space nonsense"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown key 'nonsense'"));
}

#[test]
fn invalid_config_file_returns_exit_code_3() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("bad.toml");
    std::fs::write(&config, "timeouts = {{{").unwrap();
    tabnav(&home)
        .args(["--config"])
        .arg(&config)
        .args(["--replay", "j"])
        .assert()
        .code(3);
}

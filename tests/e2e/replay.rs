//! E2E tests for replay mode
//!
//! Each test feeds a key script to the binary and checks the printed tree.

use std::fs;

use predicates::prelude::*;
use tempfile::TempDir;

use super::cli_basic::tabnav;

const FLAT: &str = r#"{ "items": [
    { "title": "one" }, { "title": "two" }, { "title": "three" }, { "title": "four" }
] }"#;

fn write_fixture(dir: &TempDir, json: &str) -> std::path::PathBuf {
    let path = dir.path().join("tree.json");
    fs::write(&path, json).unwrap();
    path
}

#[test]
fn replay_absolute_jump() {
    let home = TempDir::new().unwrap();
    let fixture = write_fixture(&home, FLAT);
    tabnav(&home)
        .arg(&fixture)
        .args(["--replay", "ctrl+space g 3 <wait>"])
        .assert()
        .success()
        .stdout(predicate::str::contains("current: three"))
        .stdout(predicate::str::contains("mode: INACTIVE"));
}

#[test]
fn replay_browse_leaves_mode_open() {
    let home = TempDir::new().unwrap();
    let fixture = write_fixture(&home, FLAT);
    tabnav(&home)
        .arg(&fixture)
        .args(["--replay", "ctrl+space j J"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mode: BROWSE"))
        .stdout(predicate::str::contains(" + two"))
        .stdout(predicate::str::contains(">+ three"));
}

#[test]
fn replay_move_with_yank_and_paste() {
    let home = TempDir::new().unwrap();
    let fixture = write_fixture(&home, FLAT);
    let output = tabnav(&home)
        .arg(&fixture)
        .args(["--replay", "ctrl+space k y G p esc"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let order: Vec<&str> = stdout
        .lines()
        .take(4)
        .map(|line| line[3..].trim())
        .collect();
    assert_eq!(order, vec!["two", "three", "four", "one"]);
}

#[test]
fn replay_root_timeout_with_config_file() {
    let home = TempDir::new().unwrap();
    let fixture = write_fixture(&home, FLAT);
    let config = home.path().join("config.toml");
    fs::write(&config, "[timeouts]\nroot_ms = 10\n").unwrap();
    tabnav(&home)
        .arg(&fixture)
        .arg("--config")
        .arg(&config)
        .args(["--replay", "ctrl+space <wait> j"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mode: INACTIVE"))
        .stdout(predicate::str::contains("current: one"));
}

#[test]
fn replay_uses_user_keymap() {
    let home = TempDir::new().unwrap();
    let fixture = write_fixture(&home, FLAT);
    let dir = home.path().join("tabnav");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("keymap.toml"), "[root]\n\"n\" = \"move_down\"\n").unwrap();
    tabnav(&home)
        .arg(&fixture)
        .args(["--replay", "ctrl+space n enter"])
        .assert()
        .success()
        .stdout(predicate::str::contains("current: two"));
}

#[test]
fn replay_builtin_sample_tree() {
    let home = TempDir::new().unwrap();
    tabnav(&home)
        .args(["--replay", "ctrl+space"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[-] work"))
        .stdout(predicate::str::contains("[+] reading"))
        .stdout(predicate::str::contains("mode: NAV"));
}

#[test]
fn replay_writes_log_file() {
    let home = TempDir::new().unwrap();
    let fixture = write_fixture(&home, FLAT);
    let log = home.path().join("tabnav.log");
    tabnav(&home)
        .env("TABNAV_LOG", "tabnav=debug")
        .arg(&fixture)
        .arg("--log")
        .arg(&log)
        .args(["--replay", "ctrl+space j"])
        .assert()
        .success();
    let content = fs::read_to_string(&log).unwrap();
    assert!(content.contains("mode change"), "{content}");
}

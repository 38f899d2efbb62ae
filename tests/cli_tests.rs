//! CLI integration tests

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn listendrift() -> Command {
    let mut cmd = Command::cargo_bin("listendrift").expect("binary should build");
    // Keep tests away from any real user config
    cmd.env("HOME", "/nonexistent")
        .env("XDG_CONFIG_HOME", "/nonexistent")
        .env_remove("LISTENDRIFT_API_URL")
        .env_remove("LISTENDRIFT_ACCESS_TOKEN");
    cmd
}

#[test]
fn help_output() {
    listendrift()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--record"))
        .stdout(predicate::str::contains("--audience"))
        .stdout(predicate::str::contains("--report"))
        .stdout(predicate::str::contains("--api-url"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn version_output() {
    listendrift()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("listendrift"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_source_is_a_usage_error() {
    listendrift()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Nothing to analyze"));
}

#[test]
fn file_and_record_conflict() {
    listendrift()
        .args(["talk.wav", "--record"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--record"));
}

#[test]
fn invalid_audience_lists_choices() {
    listendrift()
        .args(["talk.wav", "--audience", "astronauts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("astronauts"))
        .stderr(predicate::str::contains("students"));
}

#[test]
fn missing_file_fails_cleanly() {
    listendrift()
        .arg("/nonexistent/talk.wav")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn empty_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.wav");
    std::fs::File::create(&path).unwrap();

    listendrift()
        .arg(path.to_str().unwrap())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is empty"));
}

#[test]
fn oversized_file_is_rejected_without_uploading() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("huge.wav");
    let mut file = std::fs::File::create(&path).unwrap();
    let chunk = vec![0u8; 1024 * 1024];
    for _ in 0..51 {
        file.write_all(&chunk).unwrap();
    }
    drop(file);

    // The unroutable API URL proves the size check runs before any upload
    listendrift()
        .env("LISTENDRIFT_API_URL", "http://127.0.0.1:1/api")
        .arg(path.to_str().unwrap())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("File size too large (max 50MB)"));
}

#[test]
fn config_path_command() {
    listendrift()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("listendrift"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_list_without_config_file() {
    let dir = TempDir::new().unwrap();
    listendrift()
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("api_base_url"))
        .stdout(predicate::str::contains("(not set)"));
}

#[test]
fn config_set_and_get_round_trip() {
    let dir = TempDir::new().unwrap();

    listendrift()
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["config", "set", "poll_interval_ms", "500"])
        .assert()
        .success();

    listendrift()
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["config", "get", "poll_interval_ms"])
        .assert()
        .success()
        .stdout(predicate::str::contains("500"));
}

#[test]
fn config_get_masks_access_token() {
    let dir = TempDir::new().unwrap();

    listendrift()
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["config", "set", "access_token", "abcd1234efgh5678"])
        .assert()
        .success();

    listendrift()
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["config", "get", "access_token"])
        .assert()
        .success()
        .stdout(predicate::str::contains("abcd"))
        .stdout(predicate::str::contains("5678"))
        .stdout(predicate::str::contains("abcd1234efgh5678").not());
}

#[test]
fn config_rejects_unknown_key() {
    listendrift()
        .args(["config", "get", "frobnicate"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown key"));
}

#[test]
fn config_rejects_invalid_numeric_value() {
    let dir = TempDir::new().unwrap();
    listendrift()
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["config", "set", "max_upload_mb", "zero"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("positive integer"));
}

#[test]
fn config_rejects_zero_poll_interval() {
    let dir = TempDir::new().unwrap();
    listendrift()
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["config", "set", "poll_interval_ms", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("greater than zero"));
}

#[test]
fn config_rejects_unknown_audience() {
    let dir = TempDir::new().unwrap();
    listendrift()
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["config", "set", "audience", "astronauts"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("astronauts"));
}

//! Integration tests for the `homewatt` CLI binary.
//!
//! These validate argument parsing, help output, and error handling --
//! all without requiring a live backend.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `homewatt` binary with env isolation.
///
/// Points config directories at a nonexistent path and clears all
/// `HOMEWATT_*` env vars so tests never touch the user's real setup.
fn homewatt_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("homewatt");
    cmd.env("HOME", "/tmp/homewatt-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/homewatt-cli-test-nonexistent")
        .env_remove("HOMEWATT_SERVER")
        .env_remove("HOMEWATT_USERNAME")
        .env_remove("HOMEWATT_PASSWORD")
        .env_remove("HOMEWATT_OUTPUT")
        .env_remove("HOMEWATT_TIMEOUT");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn no_args_shows_help() {
    let output = homewatt_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "expected usage exit code");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "expected 'Usage' in output:\n{text}");
}

#[test]
fn help_lists_every_command() {
    homewatt_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("stats")
            .and(predicate::str::contains("rooms"))
            .and(predicate::str::contains("history"))
            .and(predicate::str::contains("readings"))
            .and(predicate::str::contains("alerts"))
            .and(predicate::str::contains("appliance"))
            .and(predicate::str::contains("simulate"))
            .and(predicate::str::contains("thresholds")),
    );
}

#[test]
fn version_flag_works() {
    homewatt_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("homewatt"));
}

#[test]
fn unknown_command_is_a_usage_error() {
    homewatt_cmd().arg("frobnicate").assert().code(2);
}

#[test]
fn invalid_output_format_is_rejected() {
    homewatt_cmd()
        .args(["stats", "--output", "xml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("xml"));
}

// ── Subcommand argument parsing ─────────────────────────────────────

#[test]
fn room_rename_requires_both_arguments() {
    homewatt_cmd().args(["room", "rename", "3"]).assert().code(2);
}

#[test]
fn appliance_add_requires_a_room() {
    let output = homewatt_cmd()
        .args(["appliance", "add", "Heater"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("--room"));
}

#[test]
fn thresholds_set_requires_numeric_values() {
    homewatt_cmd()
        .args(["thresholds", "set", "--warning", "abc", "--critical", "10"])
        .assert()
        .code(2);
}

#[test]
fn subcommand_help_shows_flags() {
    homewatt_cmd()
        .args(["rooms", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--detail"));
}

// ── Connection failures ─────────────────────────────────────────────

#[test]
fn unreachable_backend_degrades_a_read_command() {
    // Port 9 (discard) is never a homewatt backend. Reads absorb the
    // transport failure into the view and report it as a load error.
    let output = homewatt_cmd()
        .args(["--server", "http://127.0.0.1:9", "stats"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("Could not load"));
}

#[test]
fn unreachable_backend_fails_a_mutation_with_connection_exit_code() {
    let output = homewatt_cmd()
        .args(["--server", "http://127.0.0.1:9", "room", "add", "Kitchen"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(7), "expected connection exit");
}

#[test]
fn invalid_server_url_is_a_config_error() {
    let output = homewatt_cmd()
        .args(["--server", "not a url", "stats"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
}

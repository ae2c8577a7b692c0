// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Lenses CLI Authors

//! Integration tests for lensesctl no-argument behavior.

#![allow(deprecated)] // cargo_bin deprecation: replacement API not yet stable

use assert_cmd::Command;
use predicates::prelude::*;

/// Create a command that runs from a temporary directory where no config
/// files exist, ensuring predictable default behavior.
fn lensesctl_in_clean_dir(tmpdir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("lensesctl").unwrap(); //#[allow_ci]
    cmd.current_dir(tmpdir.path());
    // Point HOME to the temp dir so ~/.lenses/lensesctl.yml is not the
    // user's real file.
    cmd.env("HOME", tmpdir.path());
    cmd.env_remove("LENSESCTL_CONTEXT");
    cmd
}

#[test]
fn test_no_args_exits_successfully() {
    let tmpdir = tempfile::tempdir().unwrap(); //#[allow_ci]
    lensesctl_in_clean_dir(&tmpdir).assert().success();
}

#[test]
fn test_no_args_shows_config_summary() {
    let tmpdir = tempfile::tempdir().unwrap(); //#[allow_ci]
    lensesctl_in_clean_dir(&tmpdir)
        .assert()
        .success()
        .stderr(predicate::str::contains("Configuration:  (flags only)"))
        .stderr(predicate::str::contains("Context:        default"))
        .stderr(predicate::str::contains("No configuration file found."));
}

#[test]
fn test_no_args_shows_help_with_subcommands() {
    let tmpdir = tempfile::tempdir().unwrap(); //#[allow_ci]
    let output = lensesctl_in_clean_dir(&tmpdir).output().unwrap(); //#[allow_ci]

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Usage:"),
        "Expected 'Usage:' in help output on stdout, got: {stdout}"
    );
    for subcommand in ["context", "configure", "info", "api"] {
        assert!(
            stdout.contains(subcommand),
            "Expected '{subcommand}' subcommand in help output, got: {stdout}"
        );
    }
}

#[test]
fn test_no_args_with_flags_shows_resolved_profile() {
    let tmpdir = tempfile::tempdir().unwrap(); //#[allow_ci]
    lensesctl_in_clean_dir(&tmpdir)
        .args(["--host=https://lenses", "--user=u", "--pass=p"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Host:           https://lenses"))
        .stderr(predicate::str::contains("Authentication: basic"))
        .stderr(predicate::str::contains("Usable:         yes"));

    // Flags alone never create a configuration file
    assert!(!tmpdir.path().join(".lenses").exists());
}

#[test]
fn test_missing_explicit_config_fails() {
    let tmpdir = tempfile::tempdir().unwrap(); //#[allow_ci]
    lensesctl_in_clean_dir(&tmpdir)
        .args(["--config", "missing.yml", "info"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("CONFIG_ERROR"))
        .stdout(predicate::str::contains("missing.yml"));
}

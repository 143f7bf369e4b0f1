//! CLI help output (mirrors the teacher's `tests/specs/cli/help.rs`).

use assert_cmd::Command;

#[test]
fn agentflow_no_args_shows_usage_and_fails() {
    Command::cargo_bin("agentflow").unwrap().assert().failure().stderr(predicates::str::contains("Usage:"));
}

#[test]
fn agentflow_help_shows_every_subcommand() {
    Command::cargo_bin("agentflow")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains("send"))
        .stdout(predicates::str::contains("stream"))
        .stdout(predicates::str::contains("get"))
        .stdout(predicates::str::contains("cancel"))
        .stdout(predicates::str::contains("resubscribe"));
}

#[test]
fn agentflow_version_shows_a_version_string() {
    Command::cargo_bin("agentflow").unwrap().arg("--version").assert().success().stdout(predicates::str::contains("agentflow"));
}

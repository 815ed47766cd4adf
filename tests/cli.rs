/* tests/cli.rs */

use assert_cmd::Command;
use predicates::prelude::*;

fn better_commit() -> Command {
    Command::cargo_bin("better-commit").unwrap()
}

#[test]
fn non_tty_commit_prints_guidance_and_exits_zero() {
    better_commit()
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Interactive interface not supported in this terminal.",
        ))
        .stdout(predicate::str::contains("WSL terminal"));
}

#[test]
fn non_tty_config_prints_guidance_and_exits_zero() {
    better_commit()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Configuration interface not supported in this terminal.",
        ))
        .stdout(predicate::str::contains("Git Bash"));
}

#[test]
fn help_lists_flags_and_config_subcommand() {
    better_commit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--all"))
        .stdout(predicate::str::contains("--push"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn version_flag_reports_the_crate_version() {
    better_commit()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_flags_are_rejected() {
    better_commit().arg("--bogus").assert().failure();
}

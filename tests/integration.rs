use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_update-wiki")));
    cmd.env_remove("REZ_SOURCE_DIR").env_remove("RUST_LOG");
    cmd
}

// -- configuration errors --

#[test]
fn missing_source_dir_exits_one() {
    let out = TempDir::new().unwrap();

    cmd()
        .args(["--out", out.path().to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("REZ_SOURCE_DIR"));
}

#[test]
fn malformed_repo_exits_one() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    cmd()
        .env("REZ_SOURCE_DIR", src.path())
        .args(["--github-repo", "no-slash"])
        .args(["--out", out.path().to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("ERROR"))
        .stderr(predicate::str::contains("expected owner/name"));
}

#[test]
fn configuration_is_checked_before_cloning() {
    let out = TempDir::new().unwrap();

    cmd()
        .args(["--out", out.path().join("wiki").to_str().unwrap()])
        .assert()
        .failure();

    assert!(!out.path().join("wiki").exists());
}

#[test]
fn git_is_checked_before_configuration() {
    let empty = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    cmd()
        .env("PATH", empty.path())
        .args(["--out", out.path().to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("\"git\" needed but not found in PATH"))
        .stderr(predicate::str::contains("REZ_SOURCE_DIR").not());
}

// -- help --

#[test]
fn help_lists_flags() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--github-release"))
        .stdout(predicate::str::contains("--github-repo"))
        .stdout(predicate::str::contains("--github-branch"))
        .stdout(predicate::str::contains("--github-workflow"))
        .stdout(predicate::str::contains("--wiki-url"))
        .stdout(predicate::str::contains("--out"));
}

#[test]
fn unknown_flag_is_rejected() {
    cmd()
        .arg("--no-such-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--no-such-flag"));
}

//! Binary smoke tests for the cratemap CLI.

use assert_cmd::Command;
use predicates::prelude::*;

fn cratemap() -> Command {
    Command::cargo_bin("cratemap").unwrap()
}

#[test]
fn test_help() {
    cratemap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("inspect"))
        .stdout(predicate::str::contains("deps"));
}

#[test]
fn test_init_then_validate() {
    let dir = tempfile::tempdir().unwrap();

    cratemap()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Created example configuration: cratemap.yaml",
        ));

    // Refuses to overwrite an existing file
    cratemap()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    cratemap()
        .current_dir(dir.path())
        .args(["validate", "cratemap.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_validate_rejects_bad_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("bad.yaml"),
        "package: serde\ntraversal:\n  max_depth: -7\n",
    )
    .unwrap();

    cratemap()
        .current_dir(dir.path())
        .args(["validate", "bad.yaml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("max_depth"));
}

#[test]
fn test_inspect_offline() {
    let dir = tempfile::tempdir().unwrap();

    cratemap()
        .current_dir(dir.path())
        .args([
            "inspect", "serde", "--offline", "--max-depth", "1", "--no-color",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Root package : serde"))
        .stdout(predicate::str::contains("serde_derive"));
}

#[test]
fn test_inspect_without_package_fails() {
    let dir = tempfile::tempdir().unwrap();

    cratemap()
        .current_dir(dir.path())
        .args(["inspect", "--offline"])
        .assert()
        .code(20)
        .stderr(predicate::str::contains("package"));
}

#[test]
fn test_strict_mode_fails_on_cycles() {
    let dir = tempfile::tempdir().unwrap();

    // The offline fallback packages depend on themselves once expanded,
    // so an unlimited traversal from "A" contains cycles
    cratemap()
        .current_dir(dir.path())
        .args(["inspect", "A", "--offline", "--strict", "--no-color"])
        .assert()
        .code(1);
}

#[test]
fn test_deps_offline() {
    let dir = tempfile::tempdir().unwrap();

    cratemap()
        .current_dir(dir.path())
        .args(["deps", "tokio", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Direct dependencies of 'tokio'"))
        .stdout(predicate::str::contains("bytes"));
}

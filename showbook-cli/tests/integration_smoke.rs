//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn showbook() -> Command {
    let mut cmd = Command::cargo_bin("showbook").unwrap();
    cmd.env_remove("DATABASE_URL").env_remove("SHOWBOOK_BIND");
    cmd
}

#[test]
fn test_help_lists_commands() {
    showbook()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_serve_help() {
    showbook()
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--bind"))
        .stdout(predicate::str::contains("--database-url"))
        .stdout(predicate::str::contains("--max-connections"));
}

#[test]
fn test_migrate_help() {
    showbook()
        .args(["migrate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Database URL"));
}

#[test]
fn test_config_path_honors_env() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("showbook.toml");

    showbook()
        .env("SHOWBOOK_CONFIG", &path)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("showbook.toml"));
}

#[test]
fn test_config_init_then_show() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("showbook.toml");

    showbook()
        .env("SHOWBOOK_CONFIG", &path)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(path.exists());

    showbook()
        .env("SHOWBOOK_CONFIG", &path)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    showbook()
        .env("SHOWBOOK_CONFIG", &path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("127.0.0.1:5000"))
        .stdout(predicate::str::contains("max_connections = 5"));
}

#[test]
fn test_serve_without_database_url_fails() {
    let dir = tempfile::tempdir().unwrap();

    showbook()
        .env("SHOWBOOK_CONFIG", dir.path().join("absent.toml"))
        .arg("serve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL not set"));
}

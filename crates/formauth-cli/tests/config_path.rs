use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_command() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("formauth")
        .env("FORMAUTH_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_creates_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    assert!(!config_path.exists());

    cargo_bin_cmd!("formauth")
        .env("FORMAUTH_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("[auth]"));
    assert!(contents.contains("token_url ="));
    assert!(contents.contains("# dir ="));
}

#[test]
fn test_config_init_fails_if_exists() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "# existing config").unwrap();

    cargo_bin_cmd!("formauth")
        .env("FORMAUTH_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_generate_prints_defaults() {
    cargo_bin_cmd!("formauth")
        .args(["config", "generate"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "token_url = \"https://pannuaj.auth0.com/oauth/ro\"",
        ))
        .stdout(predicate::str::contains("file = \"storage.json\""));
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "[auth\n").unwrap();

    cargo_bin_cmd!("formauth")
        .env("FORMAUTH_HOME", dir.path())
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}

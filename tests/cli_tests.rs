//! CLI integration tests.

use std::io::Write;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use rebook::testkit::http::{closed_port_url, serve_once};
use tempfile::NamedTempFile;

fn rebook_cmd() -> Command {
    let mut cmd = cargo_bin_cmd!("rebook");
    cmd.env_remove("REBOOK_API_TOKEN")
        .env_remove("REBOOK_MARGIN")
        .env_remove("REBOOK_SOURCE_AMOUNT")
        .env_remove("RUST_LOG");
    cmd
}

fn write_config(api_url: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "[provider]\nprofile_id = \"1200\"\napi_url = \"{api_url}\"\n\n[strategy]\nmargin = \"0.0005\"\n"
    )
    .unwrap();
    file
}

#[test]
fn test_help_lists_commands() {
    rebook_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("rebook"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("once"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_version() {
    rebook_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rebook"));
}

#[test]
fn check_accepts_valid_config() {
    let config = write_config("https://api.transferwise.com");

    rebook_cmd()
        .env("REBOOK_API_TOKEN", "secret")
        .args(["check", "--config"])
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file is valid"))
        .stdout(predicate::str::contains("0.0005"))
        .stdout(predicate::str::contains("secret").not());
}

#[test]
fn check_rejects_missing_token() {
    let config = write_config("https://api.transferwise.com");

    rebook_cmd()
        .args(["check", "--config"])
        .arg(config.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("REBOOK_API_TOKEN"));
}

#[test]
fn check_rejects_unparseable_margin_override() {
    let config = write_config("https://api.transferwise.com");

    rebook_cmd()
        .env("REBOOK_API_TOKEN", "secret")
        .env("REBOOK_MARGIN", "a lot")
        .args(["check", "--config"])
        .arg(config.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("margin"));
}

#[tokio::test(flavor = "multi_thread")]
async fn once_reports_transport_failure_and_exits_nonzero() {
    let config = write_config(&closed_port_url().await);
    let path = config.path().to_path_buf();

    let assert = tokio::task::spawn_blocking(move || {
        rebook_cmd()
            .env("REBOOK_API_TOKEN", "secret")
            .args(["once", "--config"])
            .arg(&path)
            .assert()
    })
    .await
    .unwrap();

    assert
        .code(1)
        .stdout(predicate::str::contains("REBOOKING FAILED"))
        .stdout(predicate::str::contains("SELECT"))
        .stdout(predicate::str::contains("TransportFailure"));
}

#[tokio::test(flavor = "multi_thread")]
async fn once_json_prints_outcome_line() {
    let (url, server) = serve_once(200, "[]").await;
    let config = write_config(&url);
    let path = config.path().to_path_buf();

    let assert = tokio::task::spawn_blocking(move || {
        rebook_cmd()
            .env("REBOOK_API_TOKEN", "secret")
            .args(["--json", "once", "--config"])
            .arg(&path)
            .assert()
    })
    .await
    .unwrap();
    server.await.unwrap();

    let output = assert.code(1).get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();
    let line: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(line["type"], "outcome");
    assert_eq!(line["payload"]["outcome"]["outcome"], "failed");
    assert_eq!(line["payload"]["outcome"]["stage"], "SELECT");
    assert_eq!(line["payload"]["outcome"]["kind"], "NoManageableTransfer");
}

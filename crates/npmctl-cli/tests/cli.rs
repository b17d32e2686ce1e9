#![allow(deprecated)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Command with a clean environment: no NPM_* variables, no colors, and an
/// empty config directory.
fn npmctl_cmd(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("npmctl").unwrap();
    cmd.env_remove("NPM_API_URL")
        .env_remove("NPM_USERNAME")
        .env_remove("NPM_PASSWORD")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path());
    cmd
}

async fn mount_token(mock_server: &MockServer, status: u16) {
    Mock::given(method("POST"))
        .and(path("/api/tokens"))
        .respond_with(ResponseTemplate::new(status).set_body_json(serde_json::json!({
            "token": "tok"
        })))
        .expect(1)
        .mount(mock_server)
        .await;
}

#[test]
fn test_create_without_port_fails_fast() {
    let home = TempDir::new().unwrap();

    npmctl_cmd(&home)
        .args([
            "-a",
            "http://127.0.0.1:1/api",
            "create",
            "--domain",
            "example.com",
            "--forward-host",
            "192.168.1.100",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Error: domain, forward-host, and forward-port are required",
        ));
}

#[test]
fn test_delete_without_id_fails_fast() {
    let home = TempDir::new().unwrap();

    npmctl_cmd(&home)
        .args(["delete"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: id is required"));
}

#[test]
fn test_rejected_flag_values_use_error_prefix() {
    let home = TempDir::new().unwrap();
    let base = [
        "create",
        "--domain",
        "example.com",
        "--forward-host",
        "h",
    ];

    npmctl_cmd(&home)
        .args(base)
        .args(["--forward-port", "80", "--forward-scheme", "ftp"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::starts_with("Error: invalid value 'ftp'"))
        .stderr(predicate::str::contains("expected http or https"));

    npmctl_cmd(&home)
        .args(base)
        .args(["--forward-port", "abc"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error: invalid value 'abc'"));

    npmctl_cmd(&home)
        .args(["delete", "--id", "-3"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error: "));
}

#[test]
fn test_help_exits_cleanly() {
    let home = TempDir::new().unwrap();

    npmctl_cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_missing_explicit_config() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("nope.toml");

    npmctl_cmd(&home)
        .args(["--config", missing.to_str().unwrap(), "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("settings file not found"));
}

#[test]
fn test_unreachable_api() {
    let home = TempDir::new().unwrap();

    npmctl_cmd(&home)
        .args(["-a", "http://127.0.0.1:1/api", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: authentication failed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_with_env_settings() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, 200).await;

    Mock::given(method("GET"))
        .and(path("/api/nginx/proxy-hosts"))
        .and(header("Authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": 7,
            "domain_names": ["example.com"],
            "forward_scheme": "https",
            "forward_host": "backend",
            "forward_port": 443,
            "enabled": true,
            "ssl_forced": true
        }])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api_url = format!("{}/api", mock_server.uri());
    tokio::task::spawn_blocking(move || {
        let home = TempDir::new().unwrap();
        npmctl_cmd(&home)
            .env("NPM_API_URL", &api_url)
            .env("NPM_USERNAME", "admin@example.com")
            .env("NPM_PASSWORD", "changeme")
            .args(["list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Found 1 proxy hosts:"))
            .stdout(predicate::str::contains("ID: 7"))
            .stdout(predicate::str::contains("Forward: https://backend:443"));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_login_stops_before_resource_call() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, 401).await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&mock_server)
        .await;

    let api_url = format!("{}/api", mock_server.uri());
    tokio::task::spawn_blocking(move || {
        let home = TempDir::new().unwrap();
        npmctl_cmd(&home)
            .args(["-a", &api_url, "-u", "admin", "-p", "wrong", "delete", "--id", "3"])
            .assert()
            .failure()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains(
                "Error: authentication failed: authentication failed with status: 401",
            ));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_success() {
    let mock_server = MockServer::start().await;
    mount_token(&mock_server, 200).await;

    Mock::given(method("DELETE"))
        .and(path("/api/nginx/proxy-hosts/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api_url = format!("{}/api", mock_server.uri());
    tokio::task::spawn_blocking(move || {
        let home = TempDir::new().unwrap();
        npmctl_cmd(&home)
            .args(["-a", &api_url, "delete", "--id", "3"])
            .assert()
            .success()
            .stdout("Successfully deleted proxy host with ID: 3\n");
    })
    .await
    .unwrap();
}

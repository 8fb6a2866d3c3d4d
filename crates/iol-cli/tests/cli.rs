//! CLI tests against a mock InvertirOnline API.
//!
//! The mock server runs on the test runtime while the CLI binary is executed
//! on a blocking thread.

mod common;

use std::path::PathBuf;

use chrono::{Duration, Utc};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{run_cli_with_env, run_cli_with_env_success};

fn token_body(access: &str, refresh: &str) -> serde_json::Value {
    json!({
        "access_token": access,
        "token_type": "bearer",
        "expires_in": 899,
        "refresh_token": refresh
    })
}

async fn run(args: &'static [&'static str], home: PathBuf, api_url: String) -> std::process::Output {
    tokio::task::spawn_blocking(move || run_cli_with_env(args, &home, &api_url))
        .await
        .unwrap()
}

async fn run_success(args: &'static [&'static str], home: PathBuf, api_url: String) -> String {
    tokio::task::spawn_blocking(move || run_cli_with_env_success(args, &home, &api_url))
        .await
        .unwrap()
}

fn read_tokens(home: &TempDir) -> serde_json::Value {
    let contents = std::fs::read_to_string(home.path().join("tokens.json")).unwrap();
    serde_json::from_str(&contents).unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_authenticates_and_persists_token() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("cli-access", "cli-refresh")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/estadocuenta"))
        .and(header("authorization", "Bearer cli-access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "totalEnPesos": 1500.25 })))
        .expect(1)
        .mount(&server)
        .await;

    let stdout = run_success(
        &["get", "/api/v2/estadocuenta"],
        home.path().to_path_buf(),
        server.uri(),
    )
    .await;

    let body: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(body["totalEnPesos"], json!(1500.25));

    let tokens = read_tokens(&home);
    assert_eq!(tokens["access_token"], "cli-access");
    assert_eq!(tokens["refresh_token"], "cli-refresh");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_expired_token_is_refreshed_between_runs() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    let expired = json!({
        "access_token": "old-access",
        "refresh_token": "old-refresh",
        "expires_at": (Utc::now() - Duration::hours(1)).to_rfc3339()
    });
    std::fs::write(home.path().join("tokens.json"), expired.to_string()).unwrap();

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=old-refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("new-access", "new-refresh")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("unused", "unused")))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/portafolio"))
        .and(header("authorization", "Bearer new-access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "activos": [] })))
        .expect(1)
        .mount(&server)
        .await;

    run_success(&["portfolio"], home.path().to_path_buf(), server.uri()).await;

    assert_eq!(read_tokens(&home)["access_token"], "new-access");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_with_bad_credentials_fails() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Usuario o contraseña inválidos"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run(&["login"], home.path().to_path_buf(), server.uri()).await;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to login"), "stderr: {}", stderr);
    assert!(stderr.contains("Check IOL_USERNAME and IOL_PASSWORD"), "stderr: {}", stderr);
    assert!(!home.path().join("tokens.json").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_status_and_logout() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    let status = run_success(&["status"], home.path().to_path_buf(), server.uri()).await;
    assert!(status.contains("not logged in"), "stdout: {}", status);

    let valid = json!({
        "access_token": "access",
        "refresh_token": "refresh",
        "expires_at": (Utc::now() + Duration::minutes(10)).to_rfc3339()
    });
    std::fs::write(home.path().join("tokens.json"), valid.to_string()).unwrap();

    let status = run_success(&["status"], home.path().to_path_buf(), server.uri()).await;
    assert!(status.contains("authenticated"), "stdout: {}", status);

    run_success(&["logout"], home.path().to_path_buf(), server.uri()).await;
    assert!(!home.path().join("tokens.json").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_quotes_json_output() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("access", "refresh")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/Cotizaciones/BONOS/ARGENTINA/Todos"))
        .and(header("authorization", "Bearer access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "titulos": [{ "simbolo": "AL30", "ultimoPrecio": 61250.0 }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let stdout = run_success(
        &["quotes", "--instrument", "BONOS", "--json", "--no-persist"],
        home.path().to_path_buf(),
        server.uri(),
    )
    .await;

    let panel: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(panel["titulos"][0]["simbolo"], "AL30");
    assert!(!home.path().join("tokens.json").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_credentials_is_a_config_error() {
    let home = TempDir::new().unwrap();
    let home_path = home.path().to_path_buf();

    let output = tokio::task::spawn_blocking(move || {
        std::process::Command::new(env!("CARGO_BIN_EXE_iol"))
            .arg("status")
            .current_dir(&home_path)
            .env_remove("IOL_USERNAME")
            .env_remove("IOL_PASSWORD")
            .output()
            .expect("Failed to execute CLI")
    })
    .await
    .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("IOL_USERNAME"), "stderr: {}", stderr);
    assert!(!stderr.contains("then run `iol login`"), "stderr: {}", stderr);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_malformed_env_file_is_reported() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join(".env"), "this is not a dotenv line\n").unwrap();

    let output = run(&["status"], home.path().to_path_buf(), server.uri()).await;

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Ignoring unreadable .env file"), "stderr: {}", stderr);
}

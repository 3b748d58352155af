//! CLI integration tests using assert_cmd.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn matharena() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("matharena").unwrap();
    cmd.env_remove("MATHARENA_BASE_URL");
    cmd
}

/// Write a config pointing at `base_url` with the session kept in `dir`.
fn write_config(dir: &Path, base_url: &str) -> PathBuf {
    let config = dir.join("matharena.toml");
    let session = dir.join("session.json");
    std::fs::write(
        &config,
        format!(
            "base_url = \"{base_url}\"\ntimeout_secs = 2\nsession_file = \"{}\"\n",
            session.display()
        ),
    )
    .unwrap();
    config
}

fn write_session(dir: &Path) {
    std::fs::write(
        dir.join("session.json"),
        json!({
            "token": "Bearer jwt",
            "user_id": 7,
            "username": "alice",
            "signed_in_at": "2026-10-19T12:00:00Z"
        })
        .to_string(),
    )
    .unwrap();
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();

    matharena()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created matharena.toml"));

    let content = std::fs::read_to_string(dir.path().join("matharena.toml")).unwrap();
    assert!(content.contains("base_url"));
}

#[test]
fn init_skips_existing_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("matharena.toml"), "timeout_secs = 5\n").unwrap();

    matharena()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    let content = std::fs::read_to_string(dir.path().join("matharena.toml")).unwrap();
    assert_eq!(content, "timeout_secs = 5\n");
}

#[test]
fn missing_config_file_fails() {
    matharena()
        .arg("--config")
        .arg("nonexistent.toml")
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn whoami_without_session() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "http://127.0.0.1:9");

    matharena()
        .arg("--config")
        .arg(&config)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in."));
}

#[test]
fn logout_removes_session_file() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "http://127.0.0.1:9");
    write_session(dir.path());

    matharena()
        .arg("--config")
        .arg(&config)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out."));

    assert!(!dir.path().join("session.json").exists());
}

#[test]
fn unknown_route_falls_back_to_register() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "http://127.0.0.1:9");

    matharena()
        .arg("--config")
        .arg(&config)
        .arg("open")
        .arg("/nowhere")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("== Register =="));
}

#[test]
fn play_without_session_redirects_to_login() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "http://127.0.0.1:9");

    matharena()
        .arg("--config")
        .arg(&config)
        .arg("play")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("You are not logged in."))
        .stdout(predicate::str::contains("== Log In =="));
}

#[test]
fn register_rejects_malformed_email_locally() {
    let dir = TempDir::new().unwrap();
    // Nothing listens here; the form must fail before any request.
    let config = write_config(dir.path(), "http://127.0.0.1:9");

    matharena()
        .arg("--config")
        .arg(&config)
        .arg("register")
        .write_stdin("bob\nnot-an-email\nsecret\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Error: Please enter a valid email address",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn whoami_shows_profile() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "username": "alice",
            "email": "alice@example.com"
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &server.uri());
    write_session(dir.path());

    tokio::task::spawn_blocking(move || {
        matharena()
            .arg("--config")
            .arg(&config)
            .arg("whoami")
            .assert()
            .success()
            .stdout(predicate::str::contains("alice@example.com"))
            .stdout(predicate::str::contains("7"));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn login_play_and_log_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/signin"))
        .and(body_json(json!({"username": "alice", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "authorization": "Bearer jwt",
            "user_id": 7
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/session/create"))
        .and(body_json(json!({"user_id": 7})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session_id": "11",
            "time_left": 60_000_000_000_i64,
            "expression": "2+2",
            "score": 0
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/session/answer"))
        .and(body_json(json!({"session_id": "11", "user_id": 7, "answer": 4})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session_id": "11",
            "time_left": 58_000_000_000_i64,
            "expression": "3*3",
            "score": 1
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/session/finish"))
        .and(body_json(json!({"session_id": "11", "user_id": 7})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &server.uri());
    let session_file = dir.path().join("session.json");

    tokio::task::spawn_blocking(move || {
        matharena()
            .arg("--config")
            .arg(&config)
            .arg("login")
            .write_stdin("alice\nsecret\nc\n4\nq\nl\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Welcome back, alice!"))
            .stdout(predicate::str::contains("Math Expression: 2+2"))
            .stdout(predicate::str::contains("Math Expression: 3*3"))
            .stdout(predicate::str::contains("Your final score is: 1"))
            .stdout(predicate::str::contains("Logged out."));
    })
    .await
    .unwrap();

    assert!(!session_file.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_finish_reloads_home_page() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/signin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "authorization": "Bearer jwt",
            "user_id": 7
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/session/create"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session_id": "12",
            "time_left": 60_000_000_000_i64,
            "expression": "1+1",
            "score": 0
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/session/finish"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "session not found"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), &server.uri());

    tokio::task::spawn_blocking(move || {
        matharena()
            .arg("--config")
            .arg(&config)
            .arg("login")
            .write_stdin("alice\nsecret\nc\nq\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Error: Failed to finish game"))
            .stdout(predicate::function(|out: &str| {
                out.matches("== Welcome to the MathArena ==").count() == 2
            }));
    })
    .await
    .unwrap();
}

//! HTTP-level tests for the command-line driver.
//!
//! Each invocation is a fresh process, so the session secret lives in a
//! file between commands. These tests pin that lifecycle: a stored
//! secret must authenticate the very next command, and logout must
//! remove the file even when the platform call fails.

use serde_json::{json, Value};
use tempfile::TempDir;
use vellum::app_state::AppState;
use vellum::cli;
use vellum::config::{PlatformSettings, Settings};
use vellum::session_store::SessionStore;
use vellum::AppError;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn state_for(server: &MockServer) -> AppState {
    let settings = Settings {
        platform: PlatformSettings {
            endpoint: server.uri(),
            project_id: "test-project".to_string(),
            database_id: "blog".to_string(),
            collection_id: "posts".to_string(),
            bucket_id: "media".to_string(),
        },
    };
    AppState::initialize(settings).expect("mock server settings wire up")
}

fn store_in(dir: &TempDir) -> SessionStore {
    SessionStore::at(dir.path().join("session"))
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn user_body() -> Value {
    json!({
        "$id": "user1",
        "name": "Reader",
        "email": "reader@example.com",
        "$createdAt": "2024-05-01T12:00:00.000+00:00",
        "status": true,
        "emailVerification": false
    })
}

fn session_body() -> Value {
    json!({
        "$id": "sess1",
        "userId": "user1",
        "provider": "email",
        "expire": "2030-01-01T00:00:00.000+00:00",
        "secret": "s3cret"
    })
}

fn server_error_body() -> Value {
    json!({
        "message": "Internal server error",
        "code": 500,
        "type": "general_unknown"
    })
}

#[tokio::test]
async fn test_stored_secret_authenticates_the_next_command() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/account"))
        .and(header("X-Appwrite-Session", "s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("temp dir");
    let store = store_in(&dir);
    store.save("s3cret").expect("seed the session file");

    // The header matcher only passes when the file's secret was loaded
    // into the client before the command ran.
    cli::run(&state_for(&server), &store, args(&["whoami"]))
        .await
        .expect("whoami succeeds");
}

#[tokio::test]
async fn test_login_writes_the_session_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/account/sessions/email"))
        .respond_with(ResponseTemplate::new(201).set_body_json(session_body()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("temp dir");
    let store = store_in(&dir);
    assert!(store.load().is_none());

    cli::run(
        &state_for(&server),
        &store,
        args(&["login", "reader@example.com", "hunter2222"]),
    )
    .await
    .expect("login succeeds");

    assert_eq!(store.load().as_deref(), Some("s3cret"));
}

#[tokio::test]
async fn test_failed_logout_still_removes_the_session_file() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/account/sessions"))
        .and(header("X-Appwrite-Session", "s3cret"))
        .respond_with(ResponseTemplate::new(500).set_body_json(server_error_body()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("temp dir");
    let store = store_in(&dir);
    store.save("s3cret").expect("seed the session file");

    let err = cli::run(&state_for(&server), &store, args(&["logout"]))
        .await
        .expect_err("remote failure surfaces");
    assert!(matches!(err, AppError::Platform(_)));

    // The file is gone regardless, so the next command starts anonymous.
    assert!(store.load().is_none());
    assert!(!dir.path().join("session").exists());
}

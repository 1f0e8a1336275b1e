//! HTTP-level tests for session management.
//!
//! Coverage:
//! - sign-up registering and then logging in with the same credentials
//! - anonymous vs failed current-user lookups
//! - logout dropping the local secret even when the platform call fails

use appwrite_client::{Account, Appwrite};
use serde_json::{json, Value};
use vellum::services::SessionService;
use vellum::AppError;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(server: &MockServer) -> SessionService {
    let client = Appwrite::new(&server.uri(), "test-project").expect("mock server uri parses");
    SessionService::new(Account::new(client))
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

fn unauthorized_body() -> Value {
    json!({
        "message": "User (role: guests) missing scope (account)",
        "code": 401,
        "type": "general_unauthorized_scope"
    })
}

#[tokio::test]
async fn test_sign_up_registers_then_logs_in() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/account"))
        .and(body_string_contains("\"userId\""))
        .and(body_partial_json(json!({
            "email": "reader@example.com",
            "password": "hunter2222",
            "name": "Reader"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(user_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/account/sessions/email"))
        .and(body_partial_json(json!({
            "email": "reader@example.com",
            "password": "hunter2222"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(session_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/account"))
        .and(header("X-Appwrite-Session", "s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body()))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let session = service
        .sign_up("reader@example.com", "hunter2222", "Reader")
        .await
        .expect("sign-up ends logged in");
    assert_eq!(session.user_id, "user1");

    // The freshly established session authenticates the next call.
    let user = service
        .current_user()
        .await
        .expect("lookup succeeds")
        .expect("session is live");
    assert_eq!(user.id, "user1");
}

#[tokio::test]
async fn test_sign_up_stops_when_registration_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/account"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "A user with the same email already exists",
            "code": 409,
            "type": "user_already_exists"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = service_for(&server)
        .sign_up("reader@example.com", "hunter2222", "Reader")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Platform(_)));

    // No login attempt follows a failed registration.
    let requests = server.received_requests().await.expect("requests recorded");
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn test_current_user_is_none_when_anonymous() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(ResponseTemplate::new(401).set_body_json(unauthorized_body()))
        .mount(&server)
        .await;

    let user = service_for(&server)
        .current_user()
        .await
        .expect("anonymous is not an error");
    assert!(user.is_none());
}

#[tokio::test]
async fn test_current_user_failure_is_distinguishable_from_anonymous() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "Internal server error",
            "code": 500,
            "type": "general_unknown"
        })))
        .mount(&server)
        .await;

    let err = service_for(&server).current_user().await.unwrap_err();
    assert!(matches!(err, AppError::Platform(_)));
}

#[tokio::test]
async fn test_failed_logout_still_abandons_the_session_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/account/sessions/email"))
        .respond_with(ResponseTemplate::new(201).set_body_json(session_body()))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/account/sessions"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "Internal server error",
            "code": 500,
            "type": "general_unknown"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(ResponseTemplate::new(401).set_body_json(unauthorized_body()))
        .mount(&server)
        .await;

    let service = service_for(&server);
    service
        .login("reader@example.com", "hunter2222")
        .await
        .expect("login succeeds");
    service.logout().await.unwrap_err();

    // The dropped secret no longer rides on later requests.
    let user = service
        .current_user()
        .await
        .expect("anonymous is not an error");
    assert!(user.is_none());

    let requests = server.received_requests().await.expect("requests recorded");
    let last = requests.last().expect("at least one request");
    assert!(!last.headers.contains_key("X-Appwrite-Session"));
}

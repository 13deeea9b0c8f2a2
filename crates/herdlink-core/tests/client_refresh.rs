//! Integration tests for the refresh-and-retry behavior of the API client.
//!
//! Each test runs an isolated session store against a wiremock server, so
//! the full recovery sequence (401 -> refresh exchange -> single retry)
//! is exercised over real HTTP.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use herdlink_core::api::{ApiClient, ApiErrorKind, ApiRequest};
use herdlink_core::session::{Session, SessionStore};
use herdlink_types::Identity;

fn logged_in_store(access: &str, refresh: &str) -> SessionStore {
    SessionStore::with_session(Session::authenticated(
        access.to_string(),
        refresh.to_string(),
        Identity {
            user_id: 12,
            full_name: "Maya de Boer".to_string(),
            role_name: "herd-manager".to_string(),
        },
    ))
}

fn ok_envelope(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "code": 0,
        "message": "ok",
        "data": data,
    }))
}

#[tokio::test]
async fn attaches_current_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cows/7"))
        .and(header("Authorization", "Bearer A1"))
        .respond_with(ok_envelope(json!({"id": 7, "name": "Bella", "tagCode": "NL-0007"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), logged_in_store("A1", "R1"));
    let payload = client.send(&ApiRequest::get("/cows/7")).await.unwrap();
    assert_eq!(payload["name"], "Bella");
}

#[tokio::test]
async fn omits_authorization_header_when_logged_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/areas"))
        .respond_with(|req: &Request| {
            // A logged-out request must not carry an Authorization header.
            if req.headers.contains_key("authorization") {
                return ResponseTemplate::new(500);
            }
            ok_envelope(json!({"items": [], "total": 0, "page": 1, "pageSize": 20}))
        })
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), SessionStore::new());
    client.send(&ApiRequest::get("/areas")).await.unwrap();
}

/// Expired token "A1": 401 -> refresh with "R1" -> retry carries "A2",
/// payload reaches the caller, store holds the rotated token.
#[tokio::test]
async fn refresh_and_retry_recovers_a_first_401() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cows/7"))
        .and(header("Authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(body_partial_json(json!({"refreshToken": "R1"})))
        .respond_with(|req: &Request| {
            // The refresh exchange must not carry an Authorization header.
            if req.headers.contains_key("authorization") {
                return ResponseTemplate::new(500);
            }
            ok_envelope(json!({"accessToken": "A2"}))
        })
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/cows/7"))
        .and(header("Authorization", "Bearer A2"))
        .respond_with(ok_envelope(json!({"id": 7, "name": "Bella", "tagCode": "NL-0007"})))
        .expect(1)
        .mount(&server)
        .await;

    let store = logged_in_store("A1", "R1");
    let client = ApiClient::new(server.uri(), store.clone());

    let payload = client.send(&ApiRequest::get("/cows/7")).await.unwrap();
    assert_eq!(payload["id"], 7);

    let snap = store.snapshot();
    assert_eq!(snap.access_token, "A2");
    assert_eq!(snap.refresh_token, "R1");
    assert!(snap.is_authenticated);
}

/// Refresh rejected with 400: the caller sees the session-expired signal
/// (never the original 401) and the store is already reset.
#[tokio::test]
async fn failed_refresh_clears_session_and_signals_expiry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tasks"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"code": 9, "message": "refresh token revoked"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = logged_in_store("A1", "R1");
    let client = ApiClient::new(server.uri(), store.clone());

    let err = client.send(&ApiRequest::get("/tasks")).await.unwrap_err();
    assert!(err.is_session_expired());
    assert_eq!(store.snapshot(), Session::default());
}

/// A second 401 on the retried request is final: one refresh, no more.
#[tokio::test]
async fn second_401_after_retry_is_surfaced_without_another_refresh() {
    let server = MockServer::start().await;

    // Both the original and the retried request are rejected.
    Mock::given(method("GET"))
        .and(path("/pens"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ok_envelope(json!({"accessToken": "A2"})))
        .expect(1)
        .mount(&server)
        .await;

    let store = logged_in_store("A1", "R1");
    let client = ApiClient::new(server.uri(), store.clone());

    let err = client.send(&ApiRequest::get("/pens")).await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::HttpStatus);
    assert_eq!(err.status, Some(401));
    // The rotation from the one successful refresh is kept.
    assert_eq!(store.access_token(), "A2");
}

/// Non-401 failures propagate unchanged and never touch the refresh path.
#[tokio::test]
async fn non_401_errors_do_not_trigger_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/milk-batches"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "churn overflow"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ok_envelope(json!({"accessToken": "A2"})))
        .expect(0)
        .mount(&server)
        .await;

    let store = logged_in_store("A1", "R1");
    let client = ApiClient::new(server.uri(), store.clone());

    let err = client
        .send(&ApiRequest::get("/milk-batches"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::HttpStatus);
    assert_eq!(err.status, Some(500));
    assert_eq!(err.message, "HTTP 500: churn overflow");
    // Session untouched.
    assert_eq!(store.access_token(), "A1");
}

/// 401 with no stored refresh token fails fast with a clean store.
#[tokio::test]
async fn missing_refresh_token_expires_session_immediately() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cows/1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    // A session that somehow has an access token but no refresh token.
    let store = SessionStore::with_session(Session {
        access_token: "A1".to_string(),
        is_authenticated: true,
        ..Session::default()
    });
    let client = ApiClient::new(server.uri(), store.clone());

    let err = client.send(&ApiRequest::get("/cows/1")).await.unwrap_err();
    assert!(err.is_session_expired());
    assert_eq!(store.snapshot(), Session::default());
}

/// Two concurrent requests hitting 401 coalesce into a single refresh
/// exchange; both retries use the rotated token.
#[tokio::test]
async fn concurrent_401s_share_one_refresh_exchange() {
    let server = MockServer::start().await;

    for endpoint in ["/cows/7", "/tasks"] {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .and(header("Authorization", "Bearer A1"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path(endpoint))
            .and(header("Authorization", "Bearer A2"))
            .respond_with(ok_envelope(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;
    }

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ok_envelope(json!({"accessToken": "A2"})))
        .expect(1)
        .mount(&server)
        .await;

    let store = logged_in_store("A1", "R1");
    let client = ApiClient::new(server.uri(), store.clone());

    let req_a = ApiRequest::get("/cows/7");
    let req_b = ApiRequest::get("/tasks");
    let (a, b) = tokio::join!(client.send(&req_a), client.send(&req_b));
    a.unwrap();
    b.unwrap();
    assert_eq!(store.access_token(), "A2");
}

/// Transport failures surface as network errors and leave the session alone.
#[tokio::test]
async fn connection_failure_is_a_network_error() {
    // Bind-then-drop to get a port with no listener.
    let unreachable = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let store = logged_in_store("A1", "R1");
    let client = ApiClient::new(unreachable, store.clone());

    let err = client.send(&ApiRequest::get("/cows")).await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Network);
    assert_eq!(store.access_token(), "A1");
}

/// Typed wrappers ride the same recovery path as raw sends.
#[tokio::test]
async fn typed_wrapper_recovers_like_raw_send() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tasks"))
        .and(header("Authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ok_envelope(json!({"accessToken": "A2"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/tasks"))
        .and(header("Authorization", "Bearer A2"))
        .respond_with(ok_envelope(json!({
            "items": [
                {"id": 1, "title": "Morning milking", "assigneeId": 12,
                 "dueDate": "2026-08-24", "completed": false},
            ],
            "total": 1,
            "page": 1,
            "pageSize": 20,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri(), logged_in_store("A1", "R1"));
    let page = herdlink_core::ops::tasks::list(&client, 1, 20).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].title, "Morning milking");
}

#![allow(clippy::unwrap_used)]
// Integration tests for `EdgeSwitchClient` using wiremock.

use std::time::Duration;

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use edgeswitch_api::{EdgeSwitchClient, Error, FailureKind, TlsMode, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

const TOKEN: &str = "tok-123";

fn transport(timeout: Duration) -> TransportConfig {
    TransportConfig {
        tls: TlsMode::System,
        timeout,
    }
}

async fn setup() -> (MockServer, EdgeSwitchClient) {
    let server = MockServer::start().await;
    let client = EdgeSwitchClient::new(
        &server.uri(),
        "ubnt",
        SecretString::from("pw".to_string()),
        transport(Duration::from_secs(5)),
    )
    .unwrap();
    (server, client)
}

fn ok_envelope() -> serde_json::Value {
    json!({ "statusCode": 200, "error": 0, "detail": "success", "message": "success" })
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/v1.0/user/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-auth-token", TOKEN)
                .set_body_json(ok_envelope()),
        )
        .mount(server)
        .await;
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_login_success_sends_credentials_with_length() {
    let (server, mut client) = setup().await;

    let expected_body = r#"{"username":"ubnt","password":"pw"}"#;
    Mock::given(method("POST"))
        .and(path("/api/v1.0/user/login"))
        .and(body_json(json!({ "username": "ubnt", "password": "pw" })))
        .and(header("content-length", expected_body.len().to_string().as_str()))
        .and(header("content-type", "application/json;charset=UTF-8"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-auth-token", TOKEN)
                .set_body_json(ok_envelope()),
        )
        .expect(1)
        .mount(&server)
        .await;

    client.login().await.unwrap();
    assert!(client.is_logged_in());
}

#[tokio::test]
async fn test_login_sends_referer_and_user_agent() {
    let (server, mut client) = setup().await;

    let referer = format!("{}/", server.uri());
    Mock::given(method("POST"))
        .and(path("/api/v1.0/user/login"))
        .and(header("referer", referer.as_str()))
        .and(header(
            "user-agent",
            concat!("edgeswitch/", env!("CARGO_PKG_VERSION")),
        ))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-auth-token", TOKEN)
                .set_body_json(ok_envelope()),
        )
        .expect(1)
        .mount(&server)
        .await;

    client.login().await.unwrap();
}

#[tokio::test]
async fn test_login_without_token_is_auth_error() {
    let (server, mut client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1.0/user/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope()))
        .mount(&server)
        .await;

    let result = client.login().await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
    assert!(!client.is_logged_in());
}

#[tokio::test]
async fn test_login_rejected_uses_detail() {
    let (server, mut client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1.0/user/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "statusCode": 401,
            "error": 1,
            "detail": "Invalid credentials"
        })))
        .mount(&server)
        .await;

    match client.login().await {
        Err(Error::Authentication { message }) => {
            assert!(message.contains("Invalid credentials"), "got: {message}");
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_login_http_error_without_detail_reports_status() {
    let (server, mut client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1.0/user/login"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&server)
        .await;

    match client.login().await {
        Err(Error::Authentication { message }) => assert!(message.contains("HTTP 403")),
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_second_login_is_noop() {
    let (server, mut client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1.0/user/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-auth-token", TOKEN)
                .set_body_json(ok_envelope()),
        )
        .expect(1)
        .mount(&server)
        .await;

    client.login().await.unwrap();
    client.login().await.unwrap();
}

#[tokio::test]
async fn test_logout_clears_session() {
    let (server, mut client) = setup().await;
    mount_login(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/v1.0/user/logout"))
        .and(header("x-auth-token", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope()))
        .expect(1)
        .mount(&server)
        .await;

    client.login().await.unwrap();
    client.logout().await;

    assert!(!client.is_logged_in());
    assert!(!client.has_connection());
}

#[tokio::test]
async fn test_logout_failure_is_swallowed() {
    let (server, mut client) = setup().await;
    mount_login(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/v1.0/user/logout"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    client.login().await.unwrap();
    client.logout().await;

    assert!(!client.is_logged_in());
    let err = client.get_device_info().await.unwrap_err();
    assert!(matches!(err, Error::NotLoggedIn { .. }));
}

// ── Data endpoint tests ─────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_before_login_makes_no_request() {
    let (server, client) = setup().await;

    assert!(matches!(
        client.get_device_info().await,
        Err(Error::NotLoggedIn { .. })
    ));
    assert!(matches!(
        client.get_statistics().await,
        Err(Error::NotLoggedIn { .. })
    ));
    assert!(matches!(
        client.get_interfaces().await,
        Err(Error::NotLoggedIn { .. })
    ));

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_device_info_carries_token() {
    let (server, mut client) = setup().await;
    mount_login(&server).await;

    let device = json!({
        "statusCode": 200,
        "error": 0,
        "identification": { "mac": "fc:ec:da:00:00:01", "model": "ES-24-250W" }
    });
    Mock::given(method("GET"))
        .and(path("/api/v1.0/device"))
        .and(header("x-auth-token", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(&device))
        .expect(1)
        .mount(&server)
        .await;

    client.login().await.unwrap();
    let body = client.get_device_info().await.unwrap();
    assert_eq!(body, device);
}

#[tokio::test]
async fn test_embedded_auth_error_on_http_200() {
    let (server, mut client) = setup().await;
    mount_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/v1.0/device"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "statusCode": 401,
            "error": 1,
            "detail": "bad session"
        })))
        .mount(&server)
        .await;

    client.login().await.unwrap();
    match client.get_device_info().await {
        Err(Error::Authentication { message }) => assert!(message.contains("bad session")),
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_statistics_single_object_is_wrapped() {
    let (server, mut client) = setup().await;
    mount_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/v1.0/statistics"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "timestamp": 1_700_000_000 })),
        )
        .mount(&server)
        .await;

    client.login().await.unwrap();
    let stats = client.get_statistics().await.unwrap();
    assert_eq!(stats, vec![json!({ "timestamp": 1_700_000_000 })]);
}

#[tokio::test]
async fn test_interfaces_array_kept_in_order() {
    let (server, mut client) = setup().await;
    mount_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/v1.0/interfaces"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "identification": { "id": "0/1" } },
            { "identification": { "id": "0/2" } },
            { "identification": { "id": "3/1" } }
        ])))
        .mount(&server)
        .await;

    client.login().await.unwrap();
    let interfaces = client.get_interfaces().await.unwrap();
    let ids: Vec<_> = interfaces
        .iter()
        .map(|i| i["identification"]["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["0/1", "0/2", "3/1"]);
}

#[tokio::test]
async fn test_plain_text_body_is_wrapped() {
    let (server, mut client) = setup().await;
    mount_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/v1.0/device"))
        .respond_with(ResponseTemplate::new(200).set_body_string("maintenance mode"))
        .mount(&server)
        .await;

    client.login().await.unwrap();
    let body = client.get_device_info().await.unwrap();
    assert_eq!(body, json!({ "message": "maintenance mode" }));
}

#[tokio::test]
async fn test_http_server_error_is_http_error() {
    let (server, mut client) = setup().await;
    mount_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/v1.0/statistics"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    client.login().await.unwrap();
    let err = client.get_statistics().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Http {
            status: 503,
            ref message
        } if message == "Service Unavailable"
    ));
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    let mut client = EdgeSwitchClient::new(
        &server.uri(),
        "ubnt",
        SecretString::from("pw".to_string()),
        transport(Duration::from_secs(1)),
    )
    .unwrap();

    Mock::given(method("POST"))
        .and(path("/api/v1.0/user/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-auth-token", TOKEN)
                .set_body_json(ok_envelope())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let err = client.login().await.unwrap_err();
    assert!(matches!(err, Error::Timeout { timeout_secs: 1 }), "got: {err:?}");
}

// ── Connection test ─────────────────────────────────────────────────

#[tokio::test]
async fn test_connection_success_leaves_no_session() {
    let (server, mut client) = setup().await;
    mount_login(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/v1.0/user/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope()))
        .expect(1)
        .mount(&server)
        .await;

    let result = client.test_connection().await;
    assert!(result.success);
    assert_eq!(result.error_kind, None);
    assert!(!client.is_logged_in());
    assert!(!client.has_connection());
}

#[tokio::test]
async fn test_connection_bad_credentials_is_invalid_auth() {
    let (server, mut client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1.0/user/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "statusCode": 401,
            "error": 1,
            "detail": "Invalid credentials"
        })))
        .mount(&server)
        .await;

    let result = client.test_connection().await;
    assert!(!result.success);
    assert_eq!(result.error_kind, Some(FailureKind::InvalidAuth));
    assert!(!client.has_connection());
}

#[tokio::test]
async fn test_connection_refused_is_cannot_connect() {
    let result = EdgeSwitchClient::check_connection(
        "http://127.0.0.1:1",
        "ubnt",
        SecretString::from("pw".to_string()),
        transport(Duration::from_secs(2)),
    )
    .await;
    assert!(!result.success);
    assert_eq!(result.error_kind, Some(FailureKind::CannotConnect));
}

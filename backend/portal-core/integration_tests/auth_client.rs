use crate::helpers::{client_for, server_config};

use portal_core::auth_client::{AuthClient, AuthTransport, LoginResponseFormat};
use portal_core::error::AuthClientError;

use models::{Credentials, UserRecord};

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn alice() -> Credentials {
    Credentials::new("alice", "pw")
}

#[tokio::test]
async fn given_credentials_when_registering_then_posts_them_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .and(body_json(json!({ "username": "alice", "password": "pw" })))
        .respond_with(ResponseTemplate::new(201).set_body_string("created"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, AuthTransport::BearerHeader);

    client.register(&alice()).await.unwrap();
}

/// **VALUE**: A rejected register or login keeps the raw body text.
///
/// **BUG THIS CATCHES**: Would catch the body being parsed as JSON and lost
/// when the server answers with plain text.
#[tokio::test]
async fn given_rejected_register_when_called_then_error_carries_raw_body() {
    // GIVEN: A server refusing the username with a text body
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(409).set_body_string("User already exists"))
        .mount(&server)
        .await;

    // WHEN: Registering
    let error = client_for(&server, AuthTransport::BearerHeader)
        .register(&alice())
        .await
        .unwrap_err();

    // THEN: The body is the message
    assert_eq!(error.status_code(), Some(409));
    assert_eq!(error.server_message(), Some("User already exists"));
}

#[tokio::test]
async fn given_token_field_answer_when_logging_in_then_returns_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "abc.def.ghi" })))
        .mount(&server)
        .await;

    let token = client_for(&server, AuthTransport::BearerHeader)
        .login(&alice())
        .await
        .unwrap();

    assert_eq!(token.as_str(), "abc.def.ghi");
}

#[tokio::test]
async fn given_delimited_text_answer_when_logging_in_then_returns_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!("Login successful: abc.def.ghi")),
        )
        .mount(&server)
        .await;

    let mut config = server_config(&server.uri(), AuthTransport::BearerHeader);
    config.login_response = LoginResponseFormat::DelimitedText;
    let client = AuthClient::new(&config).unwrap();

    let token = client.login(&alice()).await.unwrap();

    assert_eq!(token.as_str(), "abc.def.ghi");
}

#[tokio::test]
async fn given_success_without_token_when_logging_in_then_response_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    let error = client_for(&server, AuthTransport::BearerHeader)
        .login(&alice())
        .await
        .unwrap_err();

    assert!(matches!(error, AuthClientError::Response { .. }));
    assert_eq!(error.server_message(), None);
}

#[tokio::test]
async fn given_bearer_transport_when_fetching_dashboard_then_sends_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/dashboard"))
        .and(header("Authorization", "Bearer tok.en.value"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{ "username": "bob", "role": "admin", "permissions": ["changeBackground"] }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let users = client_for(&server, AuthTransport::BearerHeader)
        .fetch_admin_dashboard("tok.en.value")
        .await
        .unwrap();

    assert_eq!(users, vec![UserRecord::new("bob", "admin", ["changeBackground"])]);
}

#[tokio::test]
async fn given_query_transport_when_authorizing_then_sends_token_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/authorize"))
        .and(query_param("token", "tok.en.value"))
        .and(body_json(json!({ "username": "carol" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "done" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, AuthTransport::QueryParameter);
    let message = client.authorize_user("tok.en.value", "carol").await.unwrap();

    assert_eq!(client.transport(), AuthTransport::QueryParameter);
    assert_eq!(message.as_deref(), Some("done"));
}

#[tokio::test]
async fn given_rejected_dashboard_when_fetched_then_error_carries_json_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/dashboard"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "message": "Admins only" })))
        .mount(&server)
        .await;

    let error = client_for(&server, AuthTransport::BearerHeader)
        .fetch_admin_dashboard("t.o.k")
        .await
        .unwrap_err();

    assert_eq!(error.server_message(), Some("Admins only"));
    assert_eq!(error.error_category(), "unauthorized");
}

#[tokio::test]
async fn given_rejection_without_json_when_authorizing_then_message_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/authorize"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let error = client_for(&server, AuthTransport::BearerHeader)
        .authorize_user("t.o.k", "bob")
        .await
        .unwrap_err();

    assert_eq!(error.status_code(), Some(500));
    assert_eq!(error.server_message(), None);
}

#[tokio::test]
async fn given_empty_success_body_when_authorizing_then_no_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/authorize"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let message = client_for(&server, AuthTransport::BearerHeader)
        .authorize_user("t.o.k", "bob")
        .await
        .unwrap();

    assert_eq!(message, None);
}

#[tokio::test]
async fn given_api_url_with_path_prefix_when_calling_then_prefix_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/register"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = server_config(&format!("{}/api", server.uri()), AuthTransport::BearerHeader);
    let client = AuthClient::new(&config).unwrap();

    client.register(&alice()).await.unwrap();
    assert!(client.base_url().as_str().ends_with("/api/"));
}

#[tokio::test]
async fn given_unreachable_server_when_logging_in_then_network_error() {
    // Port 9 (discard) on localhost is closed on test machines.
    let config = server_config("http://127.0.0.1:9", AuthTransport::BearerHeader);
    let client = AuthClient::new(&config).unwrap();

    let error = client.login(&alice()).await.unwrap_err();

    assert!(matches!(error, AuthClientError::Network { .. }));
    assert_eq!(error.server_message(), None);
}

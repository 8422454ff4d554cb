// End-to-end flows through Portal::dispatch against a mock server.

use crate::helpers::{logged_in_portal, mint_token, portal_at, portal_for, portal_with_storage};

use portal_core::portal::{
    AUTHORIZE_SUCCESS_ALERT, NOT_AUTHORIZED_ALERT, REGISTRATION_SUCCESS_ALERT,
    SESSION_INVALID_ALERT, UNAVAILABLE_ALERT, UNKNOWN_USER_ALERT,
};
use portal_core::storage::{MemoryStorage, Storage, TOKEN_KEY, USERS_KEY};
use portal_core::views::admin::UNREADABLE_CACHE_NOTICE;
use portal_core::views::{Background, ViewBody};
use portal_core::{Action, Route};

use models::Claims;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn admin_token() -> String {
    mint_token(&Claims::new("root", "admin", Vec::<String>::new()))
}

fn user_token(permissions: &[&str]) -> String {
    mint_token(&Claims::new("alice", "user", permissions.iter().copied()))
}

/// **VALUE**: A successful login stores the token and lands on Protected.
///
/// **WHY THIS MATTERS**: This is the main path into the gated part of the app.
///
/// **BUG THIS CATCHES**: Would catch the token staying in memory only, which
/// would log the visitor out on the next reload.
#[tokio::test]
async fn given_login_answer_with_token_when_logging_in_then_session_set_and_on_protected() {
    // GIVEN: A server issuing an opaque token
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({ "username": "alice", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "abc.def.ghi" })))
        .mount(&server)
        .await;

    let mut portal = portal_for(&server);
    portal.dispatch(Action::Navigate("/register".into())).await;
    portal.dispatch(Action::SetUsername("alice".into())).await;
    portal.dispatch(Action::SetPassword("pw".into())).await;

    // WHEN: Logging in
    let outcome = portal.dispatch(Action::Login).await;

    // THEN: Logged in, persisted, and on Protected
    assert!(outcome.alerts.is_empty());
    assert_eq!(portal.route(), Route::Protected);
    assert_eq!(portal.session().token(), Some("abc.def.ghi"));
    assert_eq!(
        portal.session().storage().get(TOKEN_KEY).unwrap().as_deref(),
        Some("abc.def.ghi")
    );
}

#[tokio::test]
async fn given_rejected_login_when_logging_in_then_alert_is_server_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid credentials"))
        .mount(&server)
        .await;

    let mut portal = portal_for(&server);
    portal.dispatch(Action::Navigate("/register".into())).await;

    let outcome = portal.dispatch(Action::Login).await;

    assert_eq!(outcome.last_alert(), Some("Invalid credentials"));
    assert_eq!(portal.route(), Route::RegisterLogin);
    assert!(!portal.session().is_logged_in());
}

#[tokio::test]
async fn given_successful_registration_when_registering_then_success_alert_and_no_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "message": "ok" })))
        .mount(&server)
        .await;

    let mut portal = portal_for(&server);
    portal.dispatch(Action::Navigate("/register".into())).await;
    portal.dispatch(Action::SetUsername("alice".into())).await;

    let outcome = portal.dispatch(Action::Register).await;

    assert_eq!(outcome.alerts, vec![REGISTRATION_SUCCESS_ALERT.to_string()]);
    assert_eq!(portal.route(), Route::RegisterLogin);
    assert!(!portal.session().is_logged_in());
}

#[tokio::test]
async fn given_unreachable_server_when_registering_then_generic_alert() {
    let mut portal = portal_at("http://127.0.0.1:9", MemoryStorage::new());
    portal.dispatch(Action::Navigate("/register".into())).await;

    let outcome = portal.dispatch(Action::Register).await;

    assert_eq!(
        outcome.last_alert(),
        Some("An error occurred during registration")
    );
}

#[tokio::test]
async fn given_no_session_when_opening_protected_then_lands_on_register() {
    let server = MockServer::start().await;
    let mut portal = portal_for(&server);

    let outcome = portal.dispatch(Action::Navigate("/protected".into())).await;

    assert_eq!(portal.route(), Route::RegisterLogin);
    assert!(outcome.navigation.is_some_and(|n| n.redirected()));
}

#[tokio::test]
async fn given_persisted_token_when_portal_starts_then_opens_on_protected() {
    let server = MockServer::start().await;

    let portal = logged_in_portal(&server, "abc.def.ghi");

    assert_eq!(portal.route(), Route::Protected);
    assert_eq!(portal.page().body, ViewBody::Protected);
}

#[tokio::test]
async fn given_valid_token_when_saying_hello_then_alert_greets_username() {
    let server = MockServer::start().await;
    let mut portal = logged_in_portal(&server, &user_token(&[]));

    let outcome = portal.dispatch(Action::SayHello).await;

    assert_eq!(outcome.alerts, vec!["Hello, alice".to_string()]);
    assert_eq!(portal.route(), Route::Protected);
}

#[tokio::test]
async fn given_permission_when_changing_background_then_background_is_blue() {
    let server = MockServer::start().await;
    let mut portal = logged_in_portal(&server, &user_token(&["changeBackground"]));

    let outcome = portal.dispatch(Action::ChangeBackground).await;

    assert!(outcome.alerts.is_empty());
    assert_eq!(portal.background(), Background::Blue);
}

#[tokio::test]
async fn given_no_permission_when_changing_background_then_not_authorized_alert() {
    let server = MockServer::start().await;
    let mut portal = logged_in_portal(&server, &user_token(&[]));

    let outcome = portal.dispatch(Action::ChangeBackground).await;

    assert_eq!(outcome.last_alert(), Some(NOT_AUTHORIZED_ALERT));
    assert_eq!(portal.background(), Background::Default);
}

/// **VALUE**: A token that cannot be verified ends the session.
///
/// **BUG THIS CATCHES**: Would catch claims being read from a forged or
/// garbage token instead of failing closed.
#[tokio::test]
async fn given_unverifiable_token_when_saying_hello_then_session_cleared_and_redirected() {
    // GIVEN: A session holding an opaque, undecodable token
    let server = MockServer::start().await;
    let mut portal = logged_in_portal(&server, "abc.def.ghi");

    // WHEN: Reading claims
    let outcome = portal.dispatch(Action::SayHello).await;

    // THEN: Logged out, on the login form, told why
    assert_eq!(outcome.last_alert(), Some(SESSION_INVALID_ALERT));
    assert_eq!(portal.route(), Route::RegisterLogin);
    assert!(!portal.session().is_logged_in());
    assert_eq!(portal.session().storage().get(TOKEN_KEY).unwrap(), None);
}

#[tokio::test]
async fn given_dashboard_answer_when_opening_admin_then_users_cached_and_rendered() {
    let server = MockServer::start().await;
    let token = admin_token();
    Mock::given(method("GET"))
        .and(path("/admin/dashboard"))
        .and(header("Authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{ "username": "bob", "role": "admin", "permissions": ["changeBackground"] }]
        })))
        .mount(&server)
        .await;

    let mut portal = logged_in_portal(&server, &token);

    let outcome = portal.dispatch(Action::OpenAdminDashboard).await;

    assert!(outcome.alerts.is_empty());
    assert_eq!(portal.route(), Route::Admin);
    assert!(portal.session().storage().contains_key(USERS_KEY));
    let page = portal.page();
    let view = page.admin_view().unwrap();
    assert_eq!(
        view.rows(),
        vec!["Username: bob, Role: admin, Permissions: changeBackground".to_string()]
    );
}

#[tokio::test]
async fn given_rejected_dashboard_when_opening_admin_then_stays_on_protected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/dashboard"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "message": "Forbidden" })))
        .mount(&server)
        .await;

    let mut portal = logged_in_portal(&server, &user_token(&[]));

    let outcome = portal.dispatch(Action::OpenAdminDashboard).await;

    assert_eq!(outcome.last_alert(), Some("Forbidden"));
    assert_eq!(portal.route(), Route::Protected);
}

/// **VALUE**: A rejected authorization shows exactly the server's message and
/// does not reload.
///
/// **BUG THIS CATCHES**: Would catch the generic text replacing a usable server
/// message, or a reload wiping the visitor's selection after a failure.
#[tokio::test]
async fn given_rejected_authorize_when_authorizing_then_alert_is_exact_message_and_no_reload() {
    // GIVEN: An admin on the dashboard with bob selected
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/authorize"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "message": "not allowed" })))
        .mount(&server)
        .await;

    let storage = MemoryStorage::new()
        .with_entry(TOKEN_KEY, admin_token())
        .with_entry(
            USERS_KEY,
            r#"[{"username":"bob","role":"user","permissions":[]}]"#,
        );
    let mut portal = portal_with_storage(&server, storage).starting_at("/admin");
    portal.dispatch(Action::SelectUser("bob".into())).await;

    // WHEN: Authorizing
    let outcome = portal.dispatch(Action::AuthorizeUser).await;

    // THEN: Exact message, no reload, selection kept
    assert_eq!(outcome.alerts, vec!["not allowed".to_string()]);
    assert!(!outcome.reloaded);
    assert_eq!(portal.page().admin_view().unwrap().selected, "bob");
}

#[tokio::test]
async fn given_accepted_authorize_when_authorizing_then_success_alert_and_reload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/authorize"))
        .and(body_json(json!({ "username": "bob" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let storage = MemoryStorage::new()
        .with_entry(TOKEN_KEY, admin_token())
        .with_entry(
            USERS_KEY,
            r#"[{"username":"bob","role":"user","permissions":[]}]"#,
        );
    let mut portal = portal_with_storage(&server, storage).starting_at("/admin");
    portal.dispatch(Action::SelectUser("bob".into())).await;

    let outcome = portal.dispatch(Action::AuthorizeUser).await;

    assert_eq!(outcome.alerts, vec![AUTHORIZE_SUCCESS_ALERT.to_string()]);
    assert!(outcome.reloaded);
    assert_eq!(portal.route(), Route::Admin);
    assert_eq!(portal.page().admin_view().unwrap().selected, "");
}

/// **VALUE**: The dashboard selector only takes names it lists.
///
/// **BUG THIS CATCHES**: Would catch an unlisted name being selected and then
/// sent to `/admin/authorize`.
#[tokio::test]
async fn given_unlisted_user_when_selected_then_alert_and_selection_kept() {
    // GIVEN: An admin on the dashboard with bob cached and selected
    let server = MockServer::start().await;
    let storage = MemoryStorage::new()
        .with_entry(TOKEN_KEY, admin_token())
        .with_entry(
            USERS_KEY,
            r#"[{"username":"bob","role":"user","permissions":[]}]"#,
        );
    let mut portal = portal_with_storage(&server, storage).starting_at("/admin");
    let listed = portal.dispatch(Action::SelectUser("bob".into())).await;

    // WHEN: Selecting a name that is not in the list
    let outcome = portal.dispatch(Action::SelectUser("mallory".into())).await;

    // THEN: Alerted, bob still selected, and the placeholder still selectable
    assert!(listed.alerts.is_empty());
    assert_eq!(outcome.alerts, vec![UNKNOWN_USER_ALERT.to_string()]);
    assert_eq!(portal.page().admin_view().unwrap().selected, "bob");
    assert!(portal.page().to_string().contains("options: Select a user | <bob>"));

    let cleared = portal.dispatch(Action::SelectUser(String::new())).await;
    assert!(cleared.alerts.is_empty());
    assert_eq!(portal.page().admin_view().unwrap().selected, "");
}

#[tokio::test]
async fn given_corrupt_user_cache_when_admin_rendered_then_shows_notice() {
    let server = MockServer::start().await;
    let storage = MemoryStorage::new()
        .with_entry(TOKEN_KEY, admin_token())
        .with_entry(USERS_KEY, "null");

    let portal = portal_with_storage(&server, storage).starting_at("/admin");

    let page = portal.page();
    let view = page.admin_view().unwrap();
    assert!(view.rows().is_empty());
    assert_eq!(view.notice.as_deref(), Some(UNREADABLE_CACHE_NOTICE));
}

#[tokio::test]
async fn given_blue_background_when_going_back_then_background_reset_and_on_protected() {
    let server = MockServer::start().await;
    let mut portal = logged_in_portal(&server, &admin_token());
    portal.dispatch(Action::ChangeBackground).await;
    assert_eq!(portal.background(), Background::Blue);
    portal.dispatch(Action::Navigate("/admin".into())).await;

    portal.dispatch(Action::GoBack).await;

    assert_eq!(portal.background(), Background::Default);
    assert_eq!(portal.route(), Route::Protected);
}

#[tokio::test]
async fn given_session_when_logging_out_then_token_removed_and_on_home() {
    let server = MockServer::start().await;
    let storage = MemoryStorage::new()
        .with_entry(TOKEN_KEY, admin_token())
        .with_entry(USERS_KEY, "[]");
    let mut portal = portal_with_storage(&server, storage);

    portal.dispatch(Action::Logout).await;

    assert_eq!(portal.route(), Route::Home);
    assert!(!portal.session().is_logged_in());
    assert!(!portal.session().storage().contains_key(TOKEN_KEY));
    assert!(portal.session().storage().contains_key(USERS_KEY));
    assert_eq!(portal.page().body, ViewBody::Welcome);
}

#[tokio::test]
async fn given_action_for_another_page_when_dispatched_then_unavailable_alert() {
    let server = MockServer::start().await;
    let mut portal = portal_for(&server);

    let outcome = portal.dispatch(Action::SayHello).await;

    assert_eq!(outcome.last_alert(), Some(UNAVAILABLE_ALERT));
    assert_eq!(portal.route(), Route::Home);
}

#[tokio::test]
async fn given_form_input_when_navigating_away_then_form_is_cleared() {
    let server = MockServer::start().await;
    let mut portal = portal_for(&server);
    portal.dispatch(Action::Navigate("/register".into())).await;
    portal.dispatch(Action::SetUsername("alice".into())).await;

    portal.dispatch(Action::Navigate("/contact".into())).await;
    portal.dispatch(Action::Navigate("/register".into())).await;

    assert_eq!(
        portal.page().body,
        ViewBody::RegisterLogin {
            username: String::new()
        }
    );
}

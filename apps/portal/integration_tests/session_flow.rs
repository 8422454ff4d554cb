use portal::app::build_portal;
use portal::console;
use portal::state::PortalState;

use portal_core::config::PortalConfig;
use portal_core::portal::Action;
use portal_core::storage::{MemoryStorage, Storage};
use portal_core::Route;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> PortalConfig {
    let mut config = PortalConfig::default();
    config.server.api_url = server.uri();
    config
}

async fn mock_login(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": token })))
        .mount(server)
        .await;
}

/// **VALUE**: Actions sent through the state actor are applied in order and
/// the page snapshot follows them.
///
/// **WHY THIS MATTERS**: The console only ever sees the snapshot. If it lags
/// behind the actor, the visitor sees the wrong page after login.
///
/// **BUG THIS CATCHES**: Would catch the snapshot being refreshed before the
/// action finished, or commands being dropped by the actor.
#[tokio::test]
async fn given_state_actor_when_logging_in_then_page_snapshot_is_protected() {
    // GIVEN: A server issuing tokens and a portal inside the actor
    let server = MockServer::start().await;
    mock_login(&server, "abc.def.ghi").await;

    let storage: Box<dyn Storage> = Box::new(MemoryStorage::new());
    let portal = build_portal(&config_for(&server), storage, None).unwrap();
    let state = PortalState::spawn(portal);

    // WHEN: Filling the form and logging in
    for action in [
        Action::Navigate("/register".into()),
        Action::SetUsername("alice".into()),
        Action::SetPassword("pw".into()),
    ] {
        state.dispatch(action).await.unwrap();
    }
    let outcome = state.dispatch(Action::Login).await.unwrap();

    // THEN: No alert, and the snapshot shows Protected
    assert!(outcome.alerts.is_empty());
    assert_eq!(state.page().await.route, Route::Protected);
}

#[tokio::test]
async fn given_script_when_console_runs_then_prints_alerts_and_pages() {
    let server = MockServer::start().await;
    mock_login(&server, "abc.def.ghi").await;
    Mock::given(method("GET"))
        .and(path("/admin/dashboard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{ "username": "bob", "role": "admin", "permissions": ["changeBackground"] }]
        })))
        .mount(&server)
        .await;

    let storage: Box<dyn Storage> = Box::new(MemoryStorage::new());
    let portal = build_portal(&config_for(&server), storage, None).unwrap();
    let state = PortalState::spawn(portal);

    let script = "go /register\nuser alice\npass pw\nlogin\nadmin\nfly\nquit\nlogout\n";
    let mut output = Vec::new();

    console::run(&state, script.as_bytes(), &mut output).await.unwrap();

    let printed = String::from_utf8(output).unwrap();
    assert!(printed.contains("Welcome"));
    assert!(printed.contains("Protected Page"));
    assert!(printed.contains("Username: bob, Role: admin, Permissions: changeBackground"));
    assert!(printed.contains("Unknown command 'fly'"));
    // Input after quit is never read
    assert_eq!(state.page().await.route, Route::Admin);
}

#[tokio::test]
async fn given_undecodable_token_when_saying_hello_through_console_then_session_ends() {
    let server = MockServer::start().await;
    mock_login(&server, "abc.def.ghi").await;

    let storage: Box<dyn Storage> = Box::new(MemoryStorage::new());
    let portal = build_portal(&config_for(&server), storage, Some("/register")).unwrap();
    let state = PortalState::spawn(portal);

    let script = "login\nhello\n";
    let mut output = Vec::new();

    console::run(&state, script.as_bytes(), &mut output).await.unwrap();

    let printed = String::from_utf8(output).unwrap();
    assert!(printed.contains("[alert] Your session is no longer valid"));
    assert_eq!(state.page().await.route, Route::RegisterLogin);
}

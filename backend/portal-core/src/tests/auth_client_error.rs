use crate::auth_client::Operation;
use crate::error::AuthClientError;

#[test]
fn given_rejection_with_message_when_inspected_then_message_is_verbatim() {
    let error = AuthClientError::rejected(Operation::AuthorizeUser, 403, "not allowed");

    assert_eq!(error.server_message(), Some("not allowed"));
    assert_eq!(error.status_code(), Some(403));
    assert_eq!(error.operation(), Some(Operation::AuthorizeUser));
    assert_eq!(error.error_category(), "unauthorized");
}

#[test]
fn given_rejection_without_message_when_inspected_then_server_message_is_none() {
    let error = AuthClientError::rejected(Operation::AdminDashboard, 500, "");

    assert_eq!(error.server_message(), None);
    assert_eq!(error.error_category(), "server_error");
}

#[test]
fn given_unparseable_success_when_inspected_then_no_server_message() {
    let error = AuthClientError::response(Operation::Login, "missing token");

    assert_eq!(error.server_message(), None);
    assert_eq!(error.status_code(), None);
    assert_eq!(error.error_category(), "response");
}

#[test]
fn given_bad_url_when_converted_then_becomes_url_parse_error() {
    let parse_error = url::Url::parse("not a url").unwrap_err();

    let error = AuthClientError::from(parse_error);

    assert!(matches!(error, AuthClientError::UrlParse { .. }));
    assert_eq!(error.operation(), None);
}

#[test]
fn given_each_operation_when_alerting_then_uses_its_generic_text() {
    assert_eq!(
        Operation::Register.failure_alert(),
        "An error occurred during registration"
    );
    assert_eq!(Operation::Login.failure_alert(), "An error occurred during login");
    assert_eq!(
        Operation::AdminDashboard.failure_alert(),
        "An error occurred while accessing admin dashboard"
    );
    assert_eq!(
        Operation::AuthorizeUser.failure_alert(),
        "An error occurred while authorizing user"
    );
}

#[test]
fn given_rejection_when_displayed_then_includes_status_and_location() {
    let error = AuthClientError::rejected(Operation::Register, 409, "User exists");

    let text = error.to_string();

    assert!(text.contains("409"));
    assert!(text.contains("User exists"));
    assert!(text.contains("auth_client_error.rs"));
}

use crate::HttpStatusCode;

#[test]
fn given_status_codes_when_categorized_then_ranges_are_exclusive() {
    assert!(HttpStatusCode(200).is_success());
    assert!(HttpStatusCode(204).is_success());
    assert!(!HttpStatusCode(302).is_success());

    assert!(HttpStatusCode(400).is_client_error());
    assert!(HttpStatusCode(499).is_client_error());
    assert!(!HttpStatusCode(500).is_client_error());

    assert!(HttpStatusCode(500).is_server_error());
    assert!(!HttpStatusCode(600).is_server_error());
}

#[test]
fn given_gated_endpoint_statuses_when_checked_then_only_401_and_403_are_auth_rejections() {
    assert!(HttpStatusCode(401).is_auth_rejection());
    assert!(HttpStatusCode(403).is_auth_rejection());
    assert!(!HttpStatusCode(404).is_auth_rejection());
    assert!(!HttpStatusCode(500).is_auth_rejection());
}

#[test]
fn given_status_when_displayed_then_prints_bare_number() {
    assert_eq!(HttpStatusCode::from(418).to_string(), "418");
}

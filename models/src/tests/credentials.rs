use crate::Credentials;

#[test]
fn given_filled_form_when_cleared_then_both_fields_are_empty() {
    let mut credentials = Credentials::new("alice", "s3cret");
    assert!(!credentials.is_blank());

    credentials.clear();

    assert!(credentials.username.is_empty());
    assert!(credentials.password.is_empty());
    assert!(credentials.is_blank());
}

#[test]
fn given_credentials_when_debug_formatted_then_password_is_hidden() {
    let mut credentials = Credentials::default();
    credentials.set_username("alice");
    credentials.set_password("s3cret");

    let debug = format!("{:?}", credentials);

    assert!(debug.contains("alice"));
    assert!(!debug.contains("s3cret"));
}

use crate::RedactedSecret;

/// **VALUE**: Debug and Display never print the secret.
///
/// **WHY THIS MATTERS**: Session tokens and passwords are held in structs that get
/// logged with `{:?}` during debugging. A leak here puts bearer tokens in log files.
///
/// **BUG THIS CATCHES**: Would catch a derived `Debug` replacing the manual impl.
#[test]
fn given_secret_when_formatted_then_value_is_redacted() {
    // GIVEN: A secret holding a token
    let secret = RedactedSecret::new("eyJhbGciOiJIUzI1NiJ9.e30.c2ln");

    // WHEN: Formatting with Debug and Display
    let debug = format!("{:?}", secret);
    let display = format!("{}", secret);

    // THEN: Neither contains the raw value
    assert!(!debug.contains("eyJ"));
    assert!(!display.contains("eyJ"));
    assert!(debug.contains("REDACTED"));
}

#[test]
fn given_secret_when_accessed_explicitly_then_returns_raw_value() {
    let secret = RedactedSecret::from("hunter2");

    assert_eq!(secret.as_str(), "hunter2");
    assert_eq!(secret.len(), 7);
    assert!(!secret.is_empty());
    assert!(RedactedSecret::default().is_empty());
}

/// **BUG THIS CATCHES**: Would catch a `#[derive(Serialize)]` sneaking back in and
/// writing tokens into JSON bodies or config files.
#[test]
fn given_secret_when_serialized_then_serialization_fails() {
    let secret = RedactedSecret::new("top-secret");

    let result = serde_json::to_string(&secret);

    assert!(result.is_err(), "RedactedSecret must refuse to serialize");
    assert!(!result.unwrap_err().to_string().contains("top-secret"));
}

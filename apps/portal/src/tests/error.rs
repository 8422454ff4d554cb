// Unit tests for error module

use crate::error::PortalAppError;

use portal_core::config::PortalConfig;
use portal_core::error::ConfigError;

/// **VALUE**: Errors serialize with their variant name and message.
///
/// **BUG THIS CATCHES**: Would catch if someone removes the `#[derive(Serialize)]`
/// or adds a field that cannot be serialized.
#[test]
fn given_portal_error_when_serialized_then_contains_variant_and_message() {
    // GIVEN: A command error
    let err = PortalAppError::command("Unknown command 'fly'");

    // WHEN: Serializing to JSON
    let json = serde_json::to_string(&err).unwrap();

    // THEN: Tagged with the variant, carrying the message and location
    assert!(json.contains("\"type\":\"Command\""), "got {json}");
    assert!(json.contains("Unknown command 'fly'"));
    assert!(json.contains("\"line\""));
}

#[test]
fn given_core_error_when_converted_then_becomes_core_variant_with_message() {
    let core: ConfigError = PortalConfig::from_toml_str("version = 9").unwrap_err();
    let core_message = core.to_string();

    let err = PortalAppError::from(core);

    match err {
        PortalAppError::Core { message, .. } => assert_eq!(message, core_message),
        other => panic!("expected Core error, got {other:?}"),
    }
}

#[test]
fn given_state_error_when_displayed_then_names_the_actor_problem() {
    let err = PortalAppError::state("State actor died");

    let text = err.to_string();

    assert!(text.starts_with("State Error: State actor died"));
    assert!(text.contains("error.rs"));
}

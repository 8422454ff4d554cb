use crate::ErrorLocation;
use std::panic::Location;

/// **VALUE**: Verifies that `ErrorLocation::from()` captures file, line, and column.
///
/// **WHY THIS MATTERS**: Every error enum in the workspace embeds an ErrorLocation.
/// If capture breaks, every alert that lands in the log loses its origin.
///
/// **BUG THIS CATCHES**: Would catch if file path or line extraction stops working.
#[test]
#[track_caller]
fn given_location_caller_when_error_location_created_then_captures_file_line_column() {
    // GIVEN: Current caller location
    // WHEN: Creating ErrorLocation from caller
    let location = ErrorLocation::from(Location::caller());

    // THEN: Should capture file, line, and column
    assert!(
        location.file.contains("error_location.rs"),
        "Should capture file path"
    );
    assert!(location.line > 0, "Should capture line number");
    assert!(location.column > 0, "Should capture column number");
}

#[test]
fn given_error_location_when_formatted_then_produces_bracketed_format() {
    let location = ErrorLocation {
        file: "src/session/mod.rs",
        line: 42,
        column: 7,
    };

    assert_eq!(location.to_string(), "[src/session/mod.rs:42:7]");
}

#[track_caller]
fn build_location() -> ErrorLocation {
    ErrorLocation::caller()
}

/// **VALUE**: `ErrorLocation::caller()` reports the call site, not its own body.
///
/// **BUG THIS CATCHES**: Would catch if `#[track_caller]` is dropped from `caller()`,
/// which would make every error point into `error_location.rs` line 24.
#[test]
fn given_track_caller_helper_when_caller_used_then_reports_call_site() {
    let expected_line = line!() + 1;
    let location = build_location();

    assert!(location.file.contains("tests"));
    assert_eq!(location.line, expected_line);
}

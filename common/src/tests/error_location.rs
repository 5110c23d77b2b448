use crate::ErrorLocation;

use std::panic::Location;

/// **VALUE**: Verifies that `ErrorLocation::here()` reports this file and line.
///
/// **WHY THIS MATTERS**: Every share error carries a location. A storage failure
/// that points at the wrong file sends whoever is debugging to the wrong step.
///
/// **BUG THIS CATCHES**: Would catch if `#[track_caller]` is dropped from `here()`,
/// making every location point inside `error_location.rs` of the common crate.
#[test]
fn given_tracked_call_when_capturing_here_then_reports_call_site() {
    // GIVEN/WHEN: Capturing the location on a known line
    let expected_line = line!() + 1;
    let location = ErrorLocation::here();

    // THEN: File and line belong to this test
    assert!(location.file.contains("tests"), "Should point at the test file");
    assert_eq!(location.line, expected_line);
    assert!(location.column > 0);
}

/// **VALUE**: Verifies the `[file:line:column]` display format.
///
/// **WHY THIS MATTERS**: Error messages embed the location verbatim; log readers
/// grep for the bracketed form.
///
/// **BUG THIS CATCHES**: Would catch a Display change that drops brackets or a field.
#[test]
fn given_error_location_when_formatted_then_produces_bracketed_format() {
    // GIVEN: A fixed location
    let location = ErrorLocation {
        file: "share_link.rs",
        line: 42,
        column: 7,
    };

    // WHEN: Formatting
    let formatted = location.to_string();

    // THEN: Exact bracketed format
    assert_eq!(formatted, "[share_link.rs:42:7]");
}

/// **VALUE**: Verifies that nested `#[track_caller]` helpers report their own callers.
///
/// **WHY THIS MATTERS**: Error constructors such as `ShareError::validation` are
/// helpers; the location must be the line that called the helper.
///
/// **BUG THIS CATCHES**: Would catch broken propagation, where two different call
/// sites would collapse onto one line.
#[test]
fn given_multiple_call_sites_when_capturing_location_then_each_has_unique_line() {
    #[track_caller]
    fn capture_location() -> ErrorLocation {
        ErrorLocation::from(Location::caller())
    }

    let first = capture_location();
    let second = capture_location();

    assert_eq!(first.file, second.file);
    assert_eq!(first.line + 1, second.line, "Lines should be sequential");
}

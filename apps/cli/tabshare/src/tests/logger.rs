// Unit tests for logger initialization.
// Only one test installs the global logger; file handling is tested directly.

use crate::error::CliError;
use crate::logger::{LogOptions, initialize, open_log_file};

use std::path::PathBuf;

/// **VALUE**: Verifies that calling initialize() multiple times doesn't panic or fail.
///
/// **WHY THIS MATTERS**: A second global logger install makes fern return an error;
/// a CLI that initializes from more than one path must not crash on startup.
///
/// **BUG THIS CATCHES**: Would catch if the Once or AtomicBool guards are removed.
#[test]
fn given_logger_initialized_when_called_again_then_returns_ok() {
    // GIVEN: A log file in a temporary directory
    let temp_dir = tempfile::tempdir().unwrap();
    let options = LogOptions {
        log_file: Some(temp_dir.path().join("tabshare.log")),
        ..LogOptions::default()
    };

    // WHEN: Calling initialize twice
    let result1 = initialize(&options);
    let result2 = initialize(&options);

    // THEN: Both return Ok
    assert!(result1.is_ok(), "First initialization should succeed");
    assert!(
        result2.is_ok(),
        "Second initialization should succeed (idempotent)"
    );
}

/// **VALUE**: Verifies that an unwritable log path is an error, not a panic.
///
/// **WHY THIS MATTERS**: `--log-file` is user input; a typo must not crash the CLI.
///
/// **BUG THIS CATCHES**: Would catch if `fern::log_file()` is unwrapped.
#[test]
fn given_invalid_log_path_when_opening_then_returns_logger_error() {
    // GIVEN: A path under a file, which cannot be a directory
    let invalid = PathBuf::from("/dev/null/invalid-path/tabshare.log");

    // WHEN: Opening it
    let result = open_log_file(&invalid);

    // THEN: Logger error naming the path
    match result {
        Err(CliError::Logger { message, .. }) => assert!(message.contains("invalid-path")),
        other => panic!("Expected Logger error, got {other:?}"),
    }
}

#[test]
fn given_existing_log_file_when_opening_then_appends() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("tabshare.log");
    std::fs::write(&path, "earlier\n").unwrap();

    let file = open_log_file(&path);

    assert!(file.is_ok());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "earlier\n");
}

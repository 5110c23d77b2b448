use crate::error::CliError;

use share_core::ShareError;
use share_core::error::ConfigError;
use share_core::error::share::StorageOperation;

use std::io::{Error as IoError, ErrorKind};

#[test]
fn given_share_error_when_wrapped_then_user_message_passes_through() {
    let error = CliError::from(ShareError::storage_status(StorageOperation::Read, 404, ""));

    assert_eq!(error.user_message(), "Could not load shared tabs (HTTP 404)");
}

/// **VALUE**: Verifies that a config failure reaches the CLI as a share config error.
///
/// **WHY THIS MATTERS**: Missing credentials are the most common first-run failure; the
/// message must say the service is not configured.
///
/// **BUG THIS CATCHES**: Would catch `From<ConfigError>` mapping to an unrelated variant.
#[test]
fn given_config_error_when_converted_then_reports_not_configured() {
    let error = CliError::from(ConfigError::validation("storage API key is not set"));

    assert!(matches!(error, CliError::Share(ShareError::Config(_))));
    assert!(error.user_message().starts_with("Share service is not configured"));
}

#[test]
fn given_io_error_when_converted_then_output_error_has_location() {
    let error = CliError::output(IoError::new(ErrorKind::BrokenPipe, "pipe closed"));

    match &error {
        CliError::Output { message, location } => {
            assert_eq!(message, "pipe closed");
            assert!(location.file.ends_with("error.rs"));
        }
        other => panic!("Expected Output error, got {other:?}"),
    }
    assert_eq!(error.user_message(), "Could not write output: pipe closed");
}

#[test]
fn given_open_failure_when_displayed_then_counts_shown() {
    let error = CliError::open_failed(1, 3);

    assert_eq!(error.user_message(), "1 of 3 tabs failed to open");
}

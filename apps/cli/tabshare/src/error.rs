use share_core::ShareError;
use share_core::error::ConfigError;

use common::ErrorLocation;

use std::io::Error as IoError;

use thiserror::Error;

/// Errors surfaced by the `tabshare` binary.
///
/// Library failures pass through as [`ShareError`]; everything else carries
/// the location where the CLI gave up.
#[derive(Debug, Error)]
pub enum CliError {
    /// Logger could not be installed
    #[error("Logger Error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    /// Bad command input (stdin, arguments the parser cannot check)
    #[error("Input Error: {message} {location}")]
    Input {
        message: String,
        location: ErrorLocation,
    },

    /// Writing to stdout failed
    #[error("Output Error: {message} {location}")]
    Output {
        message: String,
        location: ErrorLocation,
    },

    /// Some tabs could not be opened
    #[error("Open Error: {failed} of {total} tabs failed to open {location}")]
    Open {
        failed: usize,
        total: usize,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Share(#[from] ShareError),
}

impl CliError {
    #[track_caller]
    pub fn logger(message: impl Into<String>) -> Self {
        CliError::Logger {
            message: message.into(),
            location: ErrorLocation::here(),
        }
    }

    #[track_caller]
    pub fn input(message: impl Into<String>) -> Self {
        CliError::Input {
            message: message.into(),
            location: ErrorLocation::here(),
        }
    }

    #[track_caller]
    pub fn output(error: IoError) -> Self {
        CliError::Output {
            message: error.to_string(),
            location: ErrorLocation::here(),
        }
    }

    #[track_caller]
    pub fn open_failed(failed: usize, total: usize) -> Self {
        CliError::Open {
            failed,
            total,
            location: ErrorLocation::here(),
        }
    }

    /// One line for the terminal, without source locations.
    pub fn user_message(&self) -> String {
        match self {
            CliError::Logger { message, .. } => format!("Could not start logging: {message}"),
            CliError::Input { message, .. } => message.clone(),
            CliError::Output { message, .. } => format!("Could not write output: {message}"),
            CliError::Open { failed, total, .. } => {
                format!("{failed} of {total} tabs failed to open")
            }
            CliError::Share(e) => e.user_message(),
        }
    }
}

impl From<ConfigError> for CliError {
    #[track_caller]
    fn from(error: ConfigError) -> Self {
        CliError::Share(ShareError::from(error))
    }
}

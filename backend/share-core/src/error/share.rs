//! Error model for the share link protocol.
//!
//! Key design decisions:
//! - One variant per failure kind a caller must branch on
//! - HTTP status and body stored verbatim for diagnostics
//! - A shortening failure names the blob it left behind
//! - `#[track_caller]` constructors capture the error site

use crate::error::ConfigError;

use common::{ErrorLocation, HttpStatusCode};
use models::{ModelError, StorageReference};

use std::fmt;

use thiserror::Error as ThisError;

/// Which storage request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOperation {
    Create,
    Read,
}

impl fmt::Display for StorageOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageOperation::Create => write!(f, "create"),
            StorageOperation::Read => write!(f, "read"),
        }
    }
}

/// Stable discriminator for UIs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShareErrorKind {
    Validation,
    Storage,
    Shortening,
    Cancelled,
    Config,
}

impl ShareErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShareErrorKind::Validation => "validation",
            ShareErrorKind::Storage => "storage",
            ShareErrorKind::Shortening => "shortening",
            ShareErrorKind::Cancelled => "cancelled",
            ShareErrorKind::Config => "config",
        }
    }
}

impl fmt::Display for ShareErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, ThisError)]
pub enum ShareError {
    /// Caller input violated a precondition. No request was sent.
    #[error("Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Storage Error ({operation}): {message} {location}")]
    Storage {
        operation: StorageOperation,
        message: String,
        status_code: Option<HttpStatusCode>,
        body: Option<String>,
        is_timeout: bool,
        location: ErrorLocation,
    },

    /// The blob in `orphaned` exists remotely and is not cleaned up.
    #[error("Shortening Error: {message} (orphaned blob {orphaned}) {location}")]
    Shortening {
        message: String,
        status_code: Option<HttpStatusCode>,
        body: Option<String>,
        is_timeout: bool,
        orphaned: StorageReference,
        location: ErrorLocation,
    },

    #[error("Share Cancelled {location}")]
    Cancelled { location: ErrorLocation },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ShareError {
    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        ShareError::Validation {
            message: message.into(),
            location: ErrorLocation::here(),
        }
    }

    #[track_caller]
    pub fn cancelled() -> Self {
        ShareError::Cancelled {
            location: ErrorLocation::here(),
        }
    }

    /// Storage backend answered with a non-success status.
    #[track_caller]
    pub fn storage_status(operation: StorageOperation, status_code: u16, body: impl Into<String>) -> Self {
        ShareError::Storage {
            operation,
            message: format!("storage backend returned HTTP {status_code}"),
            status_code: Some(HttpStatusCode(status_code)),
            body: Some(body.into()),
            is_timeout: false,
            location: ErrorLocation::here(),
        }
    }

    /// Storage backend answered 2xx but the body was not what we expect.
    #[track_caller]
    pub fn storage_malformed(
        operation: StorageOperation,
        reason: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        ShareError::Storage {
            operation,
            message: format!("malformed storage response: {}", reason.into()),
            status_code: None,
            body: Some(body.into()),
            is_timeout: false,
            location: ErrorLocation::here(),
        }
    }

    /// Request never produced a response (DNS, connect, timeout, body read).
    #[track_caller]
    pub fn storage_transport(operation: StorageOperation, error: &reqwest::Error) -> Self {
        ShareError::Storage {
            operation,
            message: error.to_string(),
            status_code: error.status().map(|s| HttpStatusCode(s.as_u16())),
            body: None,
            is_timeout: error.is_timeout(),
            location: ErrorLocation::here(),
        }
    }

    #[track_caller]
    pub fn shortening_status(
        orphaned: StorageReference,
        status_code: u16,
        body: impl Into<String>,
    ) -> Self {
        ShareError::Shortening {
            message: format!("shortening backend returned HTTP {status_code}"),
            status_code: Some(HttpStatusCode(status_code)),
            body: Some(body.into()),
            is_timeout: false,
            orphaned,
            location: ErrorLocation::here(),
        }
    }

    #[track_caller]
    pub fn shortening_malformed(
        orphaned: StorageReference,
        reason: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        ShareError::Shortening {
            message: format!("malformed shortening response: {}", reason.into()),
            status_code: None,
            body: Some(body.into()),
            is_timeout: false,
            orphaned,
            location: ErrorLocation::here(),
        }
    }

    #[track_caller]
    pub fn shortening_transport(orphaned: StorageReference, error: &reqwest::Error) -> Self {
        ShareError::Shortening {
            message: error.to_string(),
            status_code: error.status().map(|s| HttpStatusCode(s.as_u16())),
            body: None,
            is_timeout: error.is_timeout(),
            orphaned,
            location: ErrorLocation::here(),
        }
    }

    pub fn kind(&self) -> ShareErrorKind {
        match self {
            ShareError::Validation { .. } => ShareErrorKind::Validation,
            ShareError::Storage { .. } => ShareErrorKind::Storage,
            ShareError::Shortening { .. } => ShareErrorKind::Shortening,
            ShareError::Cancelled { .. } => ShareErrorKind::Cancelled,
            ShareError::Config(_) => ShareErrorKind::Config,
        }
    }

    /// Worth retrying after a pause: timeouts and transient HTTP statuses only.
    ///
    /// Retrying a failed create stores a new blob; it never resumes the old one.
    pub fn is_retryable(&self) -> bool {
        match self {
            ShareError::Storage {
                is_timeout,
                status_code,
                ..
            }
            | ShareError::Shortening {
                is_timeout,
                status_code,
                ..
            } => *is_timeout || status_code.is_some_and(|code| code.is_retryable()),
            ShareError::Validation { .. } => false,
            ShareError::Cancelled { .. } => false,
            ShareError::Config(_) => false,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ShareError::Storage { status_code, .. } | ShareError::Shortening { status_code, .. } => {
                status_code.map(|code| code.0)
            }
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            ShareError::Storage { is_timeout, .. } | ShareError::Shortening { is_timeout, .. } => {
                *is_timeout
            }
            _ => false,
        }
    }

    /// Blob left behind by a failed shorten step.
    pub fn orphaned_reference(&self) -> Option<&StorageReference> {
        match self {
            ShareError::Shortening { orphaned, .. } => Some(orphaned),
            _ => None,
        }
    }

    /// Short status line for a transient UI message.
    pub fn user_message(&self) -> String {
        let status = |code: &Option<HttpStatusCode>, is_timeout: bool| match (code, is_timeout) {
            (_, true) => String::from(" (timed out)"),
            (Some(code), false) => format!(" (HTTP {code})"),
            (None, false) => String::new(),
        };

        match self {
            ShareError::Validation { message, .. } => format!("Invalid input: {message}"),
            ShareError::Storage {
                operation: StorageOperation::Create,
                status_code,
                is_timeout,
                ..
            } => format!("Could not store tabs{}", status(status_code, *is_timeout)),
            ShareError::Storage {
                operation: StorageOperation::Read,
                status_code,
                is_timeout,
                ..
            } => format!("Could not load shared tabs{}", status(status_code, *is_timeout)),
            ShareError::Shortening {
                status_code,
                is_timeout,
                ..
            } => format!(
                "Could not shorten link{}. Retrying will store another copy of the tabs.",
                status(status_code, *is_timeout)
            ),
            ShareError::Cancelled { .. } => String::from("Share cancelled"),
            ShareError::Config(e) => format!("Share service is not configured: {e}"),
        }
    }
}

impl From<ModelError> for ShareError {
    #[track_caller]
    fn from(error: ModelError) -> Self {
        ShareError::validation(error.message())
    }
}

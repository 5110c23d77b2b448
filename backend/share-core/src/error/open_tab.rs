use common::ErrorLocation;

use thiserror::Error as ThisError;

/// Failure to open a single tab. Never aborts the other tabs of a batch.
#[derive(Debug, ThisError)]
pub enum OpenTabError {
    /// The host environment refused the URL.
    #[error("Open Tab Rejected: {url}: {message} {location}")]
    Rejected {
        url: String,
        message: String,
        location: ErrorLocation,
    },

    /// The opener itself could not run (missing launcher, spawn failure).
    #[error("Open Tab Launch Error: {url}: {message} {location}")]
    Launch {
        url: String,
        message: String,
        location: ErrorLocation,
    },
}

impl OpenTabError {
    #[track_caller]
    pub fn rejected(url: impl Into<String>, message: impl Into<String>) -> Self {
        OpenTabError::Rejected {
            url: url.into(),
            message: message.into(),
            location: ErrorLocation::here(),
        }
    }

    #[track_caller]
    pub fn launch(url: impl Into<String>, message: impl Into<String>) -> Self {
        OpenTabError::Launch {
            url: url.into(),
            message: message.into(),
            location: ErrorLocation::here(),
        }
    }

    pub fn url(&self) -> &str {
        match self {
            OpenTabError::Rejected { url, .. } | OpenTabError::Launch { url, .. } => url,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            OpenTabError::Rejected { message, .. } | OpenTabError::Launch { message, .. } => message,
        }
    }
}

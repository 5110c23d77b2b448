use crate::ErrorLocation;

use thiserror::Error as ThisError;

/// Raised when code tries to turn a redacted secret back into data.
#[derive(Debug, ThisError)]
pub enum RedactError {
    #[error("Redacted Secret Serialization Error: {message} {location}")]
    Serialization {
        message: String,
        location: ErrorLocation,
    },
}

impl RedactError {
    #[track_caller]
    pub fn serialization(message: impl Into<String>) -> Self {
        RedactError::Serialization {
            message: message.into(),
            location: ErrorLocation::here(),
        }
    }
}

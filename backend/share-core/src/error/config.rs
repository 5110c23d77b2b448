use std::path::PathBuf;

use common::ErrorLocation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config Read Error: {}: {source} {location}", .path.display())]
    Read {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config Parse Error: {}: {reason} {location}", .path.display())]
    Parse {
        location: ErrorLocation,
        path: PathBuf,
        reason: String,
    },

    #[error("Config Validation Error: {reason} {location}")]
    Validation {
        location: ErrorLocation,
        reason: String,
    },

    #[error("HTTP Client Error: {reason} {location}")]
    Client {
        location: ErrorLocation,
        reason: String,
    },
}

impl ConfigError {
    #[track_caller]
    pub fn validation(reason: impl Into<String>) -> Self {
        ConfigError::Validation {
            location: ErrorLocation::here(),
            reason: reason.into(),
        }
    }

    #[track_caller]
    pub fn client(reason: impl Into<String>) -> Self {
        ConfigError::Client {
            location: ErrorLocation::here(),
            reason: reason.into(),
        }
    }
}

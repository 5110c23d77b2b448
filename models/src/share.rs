use crate::{ModelError, TabRecord};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Payload persisted to the storage backend: `{"urls": [...]}`.
///
/// Only URLs travel; titles and favicons are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareBundle {
    urls: Vec<String>,
}

impl ShareBundle {
    /// Build a bundle from tabs, rejecting an empty list or any invalid URL.
    #[track_caller]
    pub fn from_tabs(tabs: &[TabRecord]) -> Result<Self, ModelError> {
        if tabs.is_empty() {
            return Err(ModelError::validation(
                "Cannot share an empty tab list",
            ));
        }

        for (index, tab) in tabs.iter().enumerate() {
            tab.validate().map_err(|e| {
                ModelError::validation(format!("Tab {index}: {}", e.message()))
            })?;
        }

        Ok(Self {
            urls: tabs.iter().map(|tab| tab.url.clone()).collect(),
        })
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// Identifier the storage backend assigned to a bundle (`metadata.id`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageReference(String);

impl StorageReference {
    #[track_caller]
    pub fn new(id: impl Into<String>) -> Result<Self, ModelError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ModelError::validation("Storage reference cannot be empty"));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shortened URL exactly as the shortening backend returned it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortLink(String);

impl ShortLink {
    pub fn new(link: impl Into<String>) -> Self {
        Self(link.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ShortLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

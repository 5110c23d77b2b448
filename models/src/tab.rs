use crate::ModelError;

use serde::{Deserialize, Serialize};
use url::Url;

/// Title shown for tabs that report none.
pub const DEFAULT_TAB_TITLE: &str = "Untitled Tab";

/// Browser pseudo-pages that never make sense to share.
const NEW_TAB_URLS: &[&str] = &[
    "chrome://newtab/",
    "about:newtab",
    "edge://newtab/",
    "brave://newtab/",
    "chrome://startpageshared/",
    "about:home",
    "about:blank",
];

/// One browser tab as captured at snapshot time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabRecord {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, alias = "favIconUrl", skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
}

impl TabRecord {
    /// Record for `url`. Not validated here; see [`TabRecord::validate`].
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            favicon: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_favicon(mut self, favicon: impl Into<String>) -> Self {
        self.favicon = Some(favicon.into());
        self
    }

    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => DEFAULT_TAB_TITLE,
        }
    }

    /// Check that `url` is a non-empty absolute http(s) URL.
    #[track_caller]
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.url.trim().is_empty() {
            return Err(ModelError::validation("Tab URL cannot be empty"));
        }

        let parsed = Url::parse(&self.url)
            .map_err(|e| ModelError::validation(format!("Invalid tab URL '{}': {e}", self.url)))?;

        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ModelError::validation(format!(
                "Unsupported URL scheme '{other}' in '{}' (expected http or https)",
                self.url
            ))),
        }
    }
}

/// Whether a tab URL is worth sharing: not blank, not a new-tab page, web only.
pub fn is_shareable_url(url: &str) -> bool {
    !url.is_empty() && !NEW_TAB_URLS.contains(&url) && url.starts_with("http")
}

/// Keep only shareable tabs, in their original order.
pub fn filter_shareable<I>(tabs: I) -> Vec<TabRecord>
where
    I: IntoIterator<Item = TabRecord>,
{
    tabs.into_iter()
        .filter(|tab| is_shareable_url(&tab.url))
        .collect()
}

//! JSON request/response messages for hosts that talk to the share service
//! through a message channel (extension background script, stdin/stdout).
//!
//! Requests are tagged by `type`; responses are plain objects whose keys
//! identify them. Failures never escape as `Err`: they become an
//! `{"error", "kind"}` response.

use crate::opener::{TabOpener, open_tabs};
use crate::share_link::ShareLinkService;

use models::TabRecord;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShareRequest {
    CreateShareLink { tabs: Vec<TabRecord> },
    OpenTabs { urls: Vec<String> },
    ResolveShareLink { url: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShareResponse {
    ShortUrl {
        #[serde(rename = "shortUrl")]
        short_url: String,
    },
    Urls {
        urls: Vec<String>,
    },
    Opened {
        success: bool,
        opened: usize,
        failed: usize,
    },
    Error {
        error: String,
        kind: String,
    },
}

impl ShareResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, ShareResponse::Error { .. })
    }
}

pub async fn handle_request<O>(
    service: &ShareLinkService,
    opener: &O,
    request: ShareRequest,
) -> ShareResponse
where
    O: TabOpener + ?Sized,
{
    match request {
        ShareRequest::CreateShareLink { tabs } => {
            debug!("CREATE_SHARE_LINK with {} tabs", tabs.len());
            match service.create_share_link(&tabs).await {
                Ok(link) => ShareResponse::ShortUrl {
                    short_url: link.into_inner(),
                },
                Err(e) => {
                    warn!("CREATE_SHARE_LINK failed: {e}");
                    ShareResponse::Error {
                        error: e.user_message(),
                        kind: e.kind().as_str().to_string(),
                    }
                }
            }
        }
        ShareRequest::ResolveShareLink { url } => {
            debug!("RESOLVE_SHARE_LINK for {url}");
            match service.resolve_share_link(&url).await {
                Ok(urls) => ShareResponse::Urls { urls },
                Err(e) => {
                    warn!("RESOLVE_SHARE_LINK failed: {e}");
                    ShareResponse::Error {
                        error: e.user_message(),
                        kind: e.kind().as_str().to_string(),
                    }
                }
            }
        }
        ShareRequest::OpenTabs { urls } => {
            debug!("OPEN_TABS with {} urls", urls.len());
            let report = open_tabs(opener, &urls).await;
            let opened = report.opened();
            ShareResponse::Opened {
                success: report.all_opened(),
                opened,
                failed: report.len() - opened,
            }
        }
    }
}

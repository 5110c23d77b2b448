//! Opening resolved URLs as tabs.
//!
//! The actual "open a tab" capability belongs to the host (browser, OS);
//! this module only fans requests out and collects per-URL outcomes.

use crate::error::OpenTabError;

use async_trait::async_trait;
use futures_util::future::join_all;
use log::{debug, warn};

/// Host capability that opens one URL in a new tab.
#[async_trait]
pub trait TabOpener: Send + Sync {
    async fn open_tab(&self, url: &str) -> Result<(), OpenTabError>;
}

#[derive(Debug)]
pub struct OpenOutcome {
    pub url: String,
    pub result: Result<(), OpenTabError>,
}

/// Per-URL results of [`open_tabs`], in input order.
#[derive(Debug, Default)]
pub struct OpenTabsReport {
    outcomes: Vec<OpenOutcome>,
}

impl OpenTabsReport {
    pub fn outcomes(&self) -> &[OpenOutcome] {
        &self.outcomes
    }

    pub fn opened(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &OpenOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    pub fn all_opened(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Ask `opener` to open every URL, concurrently.
///
/// URLs are passed through unvalidated. One failure never stops the others.
pub async fn open_tabs<O, S>(opener: &O, urls: &[S]) -> OpenTabsReport
where
    O: TabOpener + ?Sized,
    S: AsRef<str>,
{
    debug!("Opening {} tabs", urls.len());

    let requests = urls.iter().map(|url| async move {
        let url = url.as_ref();
        let result = opener.open_tab(url).await;
        if let Err(e) = &result {
            warn!("Failed to open {url}: {e}");
        }
        OpenOutcome {
            url: url.to_string(),
            result,
        }
    });

    OpenTabsReport {
        outcomes: join_all(requests).await,
    }
}

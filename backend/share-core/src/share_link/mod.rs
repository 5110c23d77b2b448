//! Share link protocol client.
//!
//! Creating a link is two dependent requests: store the URL list as a blob,
//! then shorten the blob's long-form URL. Resolving reads the blob back.
//! Nothing is cached or retried and no state is kept between calls, so one
//! service can serve concurrent independent operations.

pub mod reference;
mod wire;

use crate::config::ShareConfig;
use crate::error::{ConfigError, ShareError};
use crate::error::share::StorageOperation;

use models::{ShareBundle, ShortLink, StorageReference, TabRecord};
use reference::{long_url, reference_from_url};
use wire::{CreateBlobResponse, ReadBlobResponse, ShortenRequest, ShortenResponse};

use std::future::Future;

use log::{debug, info, warn};
use reqwest::header::{AUTHORIZATION, HeaderName, HeaderValue};
use reqwest::{Client, Response};
use tokio_util::sync::CancellationToken;
use url::Url;

/// Result of a successful create: the short link plus what it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedLink {
    pub short_link: ShortLink,
    pub long_url: Url,
    pub reference: StorageReference,
}

#[derive(Clone)]
pub struct ShareLinkService {
    client: Client,
    storage_base_url: Url,
    shorten_base_url: Url,
    storage_key_header: HeaderName,
    storage_key_value: HeaderValue,
    shorten_auth_value: HeaderValue,
}

impl std::fmt::Debug for ShareLinkService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShareLinkService")
            .field("storage_base_url", &self.storage_base_url.as_str())
            .field("shorten_base_url", &self.shorten_base_url.as_str())
            .field("storage_key_header", &self.storage_key_header)
            .finish_non_exhaustive()
    }
}

impl ShareLinkService {
    /// Build the service and its HTTP client from validated config.
    pub fn new(config: ShareConfig) -> Result<Self, ShareError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ConfigError::client(format!("Failed to build HTTP client: {e}")))?;

        let storage_key_header = HeaderName::from_bytes(config.storage_api_key_header.as_bytes())
            .map_err(|e| ConfigError::validation(format!("Invalid storage key header: {e}")))?;
        let storage_key_value = sensitive_header(config.storage_api_key.expose())?;
        let shorten_auth_value = sensitive_header(&config.shorten_api_token.bearer())?;

        debug!(
            "Share service ready (storage: {}, shortener: {}, timeout: {:?})",
            config.storage_base_url, config.shorten_base_url, config.timeout
        );

        Ok(Self {
            client,
            storage_base_url: config.storage_base_url,
            shorten_base_url: config.shorten_base_url,
            storage_key_header,
            storage_key_value,
            shorten_auth_value,
        })
    }

    /// Store `tabs` and return a short link to them.
    pub async fn create_share_link(&self, tabs: &[TabRecord]) -> Result<ShortLink, ShareError> {
        self.create_share_link_with_long_url(tabs)
            .await
            .map(|shared| shared.short_link)
    }

    /// Like [`Self::create_share_link`], also returning the long-form URL and reference.
    pub async fn create_share_link_with_long_url(
        &self,
        tabs: &[TabRecord],
    ) -> Result<SharedLink, ShareError> {
        self.create_share_link_cancellable(tabs, &CancellationToken::new())
            .await
    }

    /// Create a share link, abandoning the in-flight request if `cancel` fires.
    ///
    /// A blob stored before cancellation stays stored.
    pub async fn create_share_link_cancellable(
        &self,
        tabs: &[TabRecord],
        cancel: &CancellationToken,
    ) -> Result<SharedLink, ShareError> {
        let bundle = ShareBundle::from_tabs(tabs)?;

        let reference = until_cancelled(cancel, self.store_bundle(&bundle)).await?;
        let long_url = long_url(&self.storage_base_url, &reference)?;

        let short_link = until_cancelled(cancel, self.shorten(&long_url, &reference)).await?;

        info!(
            "Created share link {short_link} for {} URLs (blob {reference})",
            bundle.len()
        );

        Ok(SharedLink {
            short_link,
            long_url,
            reference,
        })
    }

    /// Read back the URL list behind a long-form storage URL.
    pub async fn resolve_share_link(&self, url: &str) -> Result<Vec<String>, ShareError> {
        self.resolve_share_link_cancellable(url, &CancellationToken::new())
            .await
    }

    pub async fn resolve_share_link_cancellable(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>, ShareError> {
        let reference = reference_from_url(url)?;
        let read_url = long_url(&self.storage_base_url, &reference)?;

        if let Ok(given) = Url::parse(url.trim())
            && given.host_str() != read_url.host_str()
        {
            debug!("Share URL host {:?} differs from storage host, reading {read_url}", given.host_str());
        }

        let urls = until_cancelled(cancel, self.read_bundle(read_url, &reference)).await?;

        info!("Resolved blob {reference} to {} URLs", urls.len());
        Ok(urls)
    }

    async fn store_bundle(&self, bundle: &ShareBundle) -> Result<StorageReference, ShareError> {
        const OPERATION: StorageOperation = StorageOperation::Create;

        debug!("Storing {} URLs at {}", bundle.len(), self.storage_base_url);

        let response = self
            .client
            .post(self.storage_base_url.clone())
            .header(self.storage_key_header.clone(), self.storage_key_value.clone())
            .json(bundle)
            .send()
            .await
            .map_err(|e| {
                warn!("Storage create request failed: {e}");
                ShareError::storage_transport(OPERATION, &e)
            })?;

        let (status, body) = read_body(response)
            .await
            .map_err(|e| ShareError::storage_transport(OPERATION, &e))?;

        if !status.is_success() {
            warn!("Storage create rejected: HTTP {status}");
            return Err(ShareError::storage_status(OPERATION, status.as_u16(), body));
        }

        let parsed: CreateBlobResponse = serde_json::from_str(&body)
            .map_err(|e| ShareError::storage_malformed(OPERATION, format!("missing metadata.id: {e}"), body.clone()))?;

        StorageReference::new(parsed.metadata.id)
            .map_err(|e| ShareError::storage_malformed(OPERATION, e.message(), body))
    }

    async fn shorten(
        &self,
        long_url: &Url,
        reference: &StorageReference,
    ) -> Result<ShortLink, ShareError> {
        debug!("Shortening {long_url}");

        let response = self
            .client
            .post(self.shorten_base_url.clone())
            .header(AUTHORIZATION, self.shorten_auth_value.clone())
            .json(&ShortenRequest {
                long_url: long_url.as_str(),
            })
            .send()
            .await
            .map_err(|e| {
                warn!("Shorten request failed, blob {reference} is orphaned: {e}");
                ShareError::shortening_transport(reference.clone(), &e)
            })?;

        let (status, body) = read_body(response)
            .await
            .map_err(|e| ShareError::shortening_transport(reference.clone(), &e))?;

        if !status.is_success() {
            warn!("Shorten rejected: HTTP {status}, blob {reference} is orphaned");
            return Err(ShareError::shortening_status(
                reference.clone(),
                status.as_u16(),
                body,
            ));
        }

        let parsed: ShortenResponse = serde_json::from_str(&body).map_err(|e| {
            ShareError::shortening_malformed(reference.clone(), format!("missing link: {e}"), body.clone())
        })?;

        Ok(ShortLink::new(parsed.link))
    }

    async fn read_bundle(
        &self,
        read_url: Url,
        reference: &StorageReference,
    ) -> Result<Vec<String>, ShareError> {
        const OPERATION: StorageOperation = StorageOperation::Read;

        debug!("Reading blob {reference} from {read_url}");

        let response = self
            .client
            .get(read_url)
            .header(self.storage_key_header.clone(), self.storage_key_value.clone())
            .send()
            .await
            .map_err(|e| {
                warn!("Storage read request failed: {e}");
                ShareError::storage_transport(OPERATION, &e)
            })?;

        let (status, body) = read_body(response)
            .await
            .map_err(|e| ShareError::storage_transport(OPERATION, &e))?;

        if !status.is_success() {
            warn!("Storage read rejected: HTTP {status}");
            return Err(ShareError::storage_status(OPERATION, status.as_u16(), body));
        }

        let parsed: ReadBlobResponse = serde_json::from_str(&body).map_err(|e| {
            ShareError::storage_malformed(OPERATION, format!("missing record.urls: {e}"), body.clone())
        })?;

        Ok(parsed.record.urls)
    }
}

async fn read_body(response: Response) -> Result<(reqwest::StatusCode, String), reqwest::Error> {
    let status = response.status();
    let body = response.text().await?;
    Ok((status, body))
}

#[track_caller]
fn sensitive_header(value: &str) -> Result<HeaderValue, ConfigError> {
    let mut header = HeaderValue::from_str(value)
        .map_err(|_| ConfigError::validation("Credential is not a valid header value"))?;
    header.set_sensitive(true);
    Ok(header)
}

/// Run `operation` unless `cancel` fires first; a pending request is dropped.
async fn until_cancelled<T, F>(cancel: &CancellationToken, operation: F) -> Result<T, ShareError>
where
    F: Future<Output = Result<T, ShareError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            warn!("Share operation cancelled");
            Err(ShareError::cancelled())
        }
        result = operation => result,
    }
}

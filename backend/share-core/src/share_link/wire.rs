//! JSON bodies exchanged with the storage and shortening backends.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub(crate) struct CreateBlobResponse {
    pub metadata: BlobMetadata,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BlobMetadata {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReadBlobResponse {
    pub record: StoredRecord,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StoredRecord {
    pub urls: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ShortenRequest<'a> {
    pub long_url: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ShortenResponse {
    pub link: String,
}

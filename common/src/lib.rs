//! Shared building blocks for tabshare.
//!
//! Everything here is domain-neutral plumbing used by every other crate:
//!
//! - [`ErrorLocation`]: file/line/column captured at the error site
//! - [`HttpStatusCode`]: status classification for backend failures
//! - [`RedactedApiKey`]: backend credentials that never reach logs
//!
//! ## Architecture
//!
//! - **common** (this crate): cross-cutting utilities
//! - **models**: tab and share data types
//! - **share-core**: share link protocol client
//! - **tabshare**: command line front end

pub mod error;
pub mod http_status;
pub mod redacted_key;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_key::RedactedApiKey;

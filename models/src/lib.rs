//! Data types for sharing browser tabs.
//!
//! Pure data with validation, no I/O. The share-core crate moves these
//! values over the network; the CLI builds them from arguments.

pub mod error;
pub mod share;
pub mod share_string;
pub mod tab;

#[cfg(test)]
mod tests;

pub use error::model_error::ModelError;
pub use share::{ShareBundle, ShortLink, StorageReference};
pub use share_string::{SHARE_STRING_SEPARATOR, encode_share_string, parse_share_string};
pub use tab::{DEFAULT_TAB_TITLE, TabRecord, filter_shareable, is_shareable_url};

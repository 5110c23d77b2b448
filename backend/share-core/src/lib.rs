pub mod config;
pub mod error;
pub mod messages;
pub mod opener;
pub mod share_link;

#[cfg(test)]
mod tests;

pub use config::ShareConfig;
pub use error::ShareError;
pub use error::share::{ShareErrorKind, StorageOperation};
pub use opener::{OpenOutcome, OpenTabsReport, TabOpener, open_tabs};
pub use share_link::{ShareLinkService, SharedLink};

pub const JSONBIN_API_ROOT: &str = "https://api.jsonbin.io/v3";
pub const DEFAULT_STORAGE_BASE_URL: &str = const_format::concatcp!(JSONBIN_API_ROOT, "/b");
pub const BITLY_API_ROOT: &str = "https://api-ssl.bitly.com/v4";
pub const DEFAULT_SHORTEN_BASE_URL: &str = const_format::concatcp!(BITLY_API_ROOT, "/shorten");
pub const DEFAULT_STORAGE_API_KEY_HEADER: &str = "X-Master-Key";

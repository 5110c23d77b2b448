//! Plain-text sharing: URLs joined by `;` for copy and paste.

pub const SHARE_STRING_SEPARATOR: &str = ";";

pub fn encode_share_string<S: AsRef<str>>(urls: &[S]) -> String {
    urls.iter()
        .map(|url| url.as_ref())
        .collect::<Vec<_>>()
        .join(SHARE_STRING_SEPARATOR)
}

/// Split pasted text into URLs.
///
/// Entries are trimmed; anything not starting with `http` is dropped. A lone
/// URL without a separator is accepted.
pub fn parse_share_string(text: &str) -> Vec<String> {
    text.split(SHARE_STRING_SEPARATOR)
        .map(str::trim)
        .filter(|entry| entry.starts_with("http"))
        .map(String::from)
        .collect()
}

//! Config value checks.
//!
//! Secrets are checked for obvious placeholder values before any request
//! goes out, so a half-edited config fails here instead of as a 401.

use crate::error::ConfigError;

use common::RedactedApiKey;

use reqwest::header::{HeaderName, HeaderValue};
use url::Url;

static PLACEHOLDER_PATTERNS: &[&str] = &[
    "your_jsonbin_key",
    "your_bitly_token",
    "your-api-key",
    "your_api_key",
    "<your",
    "placeholder",
    "changeme",
    "replace-me",
    "replace_me",
];

/// Placeholders only when they are the whole secret: `.` and `x` runs occur
/// inside real bcrypt-alphabet JSONBin keys.
static PLACEHOLDER_VALUES: &[&str] = &["xxx", "...", "todo", "none", "null"];

#[track_caller]
pub fn validate_base_url(field: &str, value: &str) -> Result<Url, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::validation(format!("{field} cannot be empty")));
    }

    let url = Url::parse(trimmed)
        .map_err(|e| ConfigError::validation(format!("{field} is not a valid URL ({trimmed}): {e}")))?;

    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        _ => Err(ConfigError::validation(format!(
            "{field} must be an http(s) URL with a host, got {trimmed}"
        ))),
    }
}

/// Require a usable secret and wrap it.
#[track_caller]
pub fn validate_secret(field: &str, value: Option<String>) -> Result<RedactedApiKey, ConfigError> {
    let Some(value) = value else {
        return Err(ConfigError::validation(format!("{field} is not set")));
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::validation(format!("{field} is empty")));
    }

    if let Some(pattern) = detect_placeholder(trimmed) {
        return Err(ConfigError::validation(format!(
            "{field} looks like a placeholder (matched '{pattern}')"
        )));
    }

    if HeaderValue::from_str(trimmed).is_err() || trimmed.chars().any(char::is_whitespace) {
        return Err(ConfigError::validation(format!(
            "{field} contains characters that cannot be sent in a header"
        )));
    }

    Ok(RedactedApiKey::new(trimmed))
}

#[track_caller]
pub fn validate_header_name(field: &str, value: &str) -> Result<(), ConfigError> {
    HeaderName::from_bytes(value.as_bytes())
        .map(|_| ())
        .map_err(|_| ConfigError::validation(format!("{field} is not a valid header name: {value}")))
}

/// Matched placeholder pattern, if any.
pub fn detect_placeholder(value: &str) -> Option<&'static str> {
    let lower = value.to_lowercase();

    if let Some(pattern) = PLACEHOLDER_PATTERNS
        .iter()
        .find(|pattern| lower.contains(**pattern))
    {
        return Some(*pattern);
    }

    if let Some(whole) = PLACEHOLDER_VALUES.iter().find(|whole| lower == **whole) {
        return Some(*whole);
    }

    let mut chars = value.chars();
    if value.len() >= 8
        && let Some(first) = chars.next()
        && chars.all(|c| c == first)
    {
        return Some("repeated_char");
    }

    None
}

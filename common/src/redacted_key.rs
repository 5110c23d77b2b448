//! Backend credentials with redacted Debug/Display output.

use crate::RedactError;

use std::fmt;

use serde::ser::Error;
use zeroize::Zeroize;

/// A storage API key or shortener token.
///
/// The value is only reachable through [`RedactedApiKey::expose`], which is
/// meant for building request headers. Debug, Display and serde all refuse
/// to reveal it, and the buffer is zeroed on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct RedactedApiKey {
    inner: String,
}

impl RedactedApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self { inner: key.into() }
    }

    /// The raw secret, for placing into an outbound request header.
    #[inline]
    pub fn expose(&self) -> &str {
        &self.inner
    }

    /// `Bearer <secret>` for `Authorization` headers.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.inner)
    }

    /// Length in bytes (safe to log).
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for RedactedApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RedactedApiKey([REDACTED; {} bytes])", self.inner.len())
    }
}

impl fmt::Display for RedactedApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl Drop for RedactedApiKey {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

impl serde::Serialize for RedactedApiKey {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(RedactError::serialization(
            "credentials are never serialized; read them with expose() when building a request",
        )))
    }
}

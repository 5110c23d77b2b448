//! HTTP status classification for backend failures.

/// Status code returned by the storage or shortening backend.
///
/// Kept as the raw number so retry decisions never depend on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpStatusCode(pub u16);

impl HttpStatusCode {
    /// 4xx: the request itself was rejected (bad key, bad body, quota).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.0)
    }

    /// 5xx: the backend failed.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.0)
    }

    /// 401/403: credentials missing or rejected.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.0, 401 | 403)
    }

    /// Codes that usually clear up if the caller waits and tries again.
    pub fn is_retryable(&self) -> bool {
        matches!(self.0, 429 | 502 | 503 | 504)
    }
}

impl From<u16> for HttpStatusCode {
    fn from(code: u16) -> Self {
        HttpStatusCode(code)
    }
}

impl std::fmt::Display for HttpStatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

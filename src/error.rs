//! Error type shared by the gateway, auth session, and screen services.
//!
//! ERROR HANDLING
//! ==============
//! Only two failure classes matter to callers: the request never got an
//! answer (`Network`), or the server answered with a non-OK status
//! (`Status`). Everything else is local misuse or storage trouble. Nothing
//! here retries.

/// Message shown for any failure that never reached the server.
pub const CONNECTION_ERROR_MESSAGE: &str = "Error de conexión";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request could not be sent or its body could not be read.
    #[error("network request failed: {0}")]
    Network(#[source] reqwest::Error),

    /// The server answered with a non-OK status.
    #[error("server returned HTTP {status}{}", detail_suffix(.detail.as_deref()))]
    Status { status: u16, detail: Option<String> },

    /// A response body was not the JSON the caller expected.
    #[error("invalid JSON payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// The URL was neither absolute nor a `/`-rooted path.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A header value (usually the token) contained illegal bytes.
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// Reading or writing the persisted session token failed.
    #[error("token storage failed: {0}")]
    Storage(#[from] std::io::Error),

    /// An analysis period outside `week`/`month`.
    #[error("unsupported analysis period '{0}' (expected 'week' or 'month')")]
    InvalidPeriod(String),

    /// The server accepted a login but handed back no session token.
    #[error("server response carried no session token")]
    MissingToken,

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(#[source] reqwest::Error),

    /// A request could not be assembled from its parts.
    #[error("request build failed: {0}")]
    RequestBuild(#[source] reqwest::Error),
}

fn detail_suffix(detail: Option<&str>) -> String {
    detail.map(|d| format!(": {d}")).unwrap_or_default()
}

impl ApiError {
    /// HTTP status for `Status` errors.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-provided `detail` string, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Single line suitable for an alert dialog.
    ///
    /// Network failures always read as a connection error. Server rejections
    /// show the server's `detail` when it sent one, else `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Network(_) => CONNECTION_ERROR_MESSAGE.to_owned(),
            Self::Status { detail: Some(detail), .. } => detail.clone(),
            Self::Status { detail: None, .. } => fallback.to_owned(),
            other => other.to_string(),
        }
    }
}

/// Pull a human-readable `detail` out of an error body.
///
/// FastAPI sends `{"detail": "..."}` for handled errors and
/// `{"detail": [...]}` for validation failures; the latter is kept as JSON
/// text.
pub(crate) fn parse_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::String(_) | serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

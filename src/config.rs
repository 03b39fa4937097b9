//! Client configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";
pub const DEFAULT_AUTH_PORTAL_URL: &str = "https://auth.emergentagent.com/";
pub const DEFAULT_REDIRECT_URL: &str = "sinadicciones://";
pub const TOKEN_DIR_NAME: &str = "sinadicciones";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin without a trailing slash.
    pub backend_url: String,
    /// External login portal that hands back a `session_id`.
    pub auth_portal_url: String,
    /// Deep link the portal redirects to after login.
    pub redirect_url: String,
    /// Directory holding the persisted session token. `None` means the
    /// platform config directory.
    pub token_dir: Option<PathBuf>,
    /// Keep a cookie jar alongside the bearer header.
    pub send_cookies: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_owned(),
            auth_portal_url: DEFAULT_AUTH_PORTAL_URL.to_owned(),
            redirect_url: DEFAULT_REDIRECT_URL.to_owned(),
            token_dir: None,
            send_cookies: false,
        }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `RECOVERY_BACKEND_URL` (falls back to `EXPO_PUBLIC_BACKEND_URL`,
    ///   then `http://localhost:8001`)
    /// - `RECOVERY_AUTH_PORTAL_URL`: default `https://auth.emergentagent.com/`
    /// - `RECOVERY_REDIRECT_URL`: default `sinadicciones://`
    /// - `RECOVERY_TOKEN_DIR`: default platform config dir
    /// - `RECOVERY_SEND_COOKIES`: default false
    #[must_use]
    pub fn from_env() -> Self {
        let backend_url = env_non_empty("RECOVERY_BACKEND_URL")
            .or_else(|| env_non_empty("EXPO_PUBLIC_BACKEND_URL"))
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_owned());
        let auth_portal_url =
            env_non_empty("RECOVERY_AUTH_PORTAL_URL").unwrap_or_else(|| DEFAULT_AUTH_PORTAL_URL.to_owned());
        let redirect_url = env_non_empty("RECOVERY_REDIRECT_URL").unwrap_or_else(|| DEFAULT_REDIRECT_URL.to_owned());
        let token_dir = env_non_empty("RECOVERY_TOKEN_DIR").map(PathBuf::from);
        let send_cookies = env_bool("RECOVERY_SEND_COOKIES").unwrap_or(false);

        Self { backend_url: normalize_origin(&backend_url), auth_portal_url, redirect_url, token_dir, send_cookies }
    }

    /// Replace the backend origin, normalizing the trailing slash.
    #[must_use]
    pub fn with_backend_url(mut self, url: &str) -> Self {
        self.backend_url = normalize_origin(url);
        self
    }

    /// Resolve the token directory, falling back to the platform config dir.
    #[must_use]
    pub fn resolved_token_dir(&self) -> Option<PathBuf> {
        self.token_dir
            .clone()
            .or_else(|| dirs::config_dir().map(|dir| dir.join(TOKEN_DIR_NAME)))
    }
}

pub(crate) fn normalize_origin(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

// Flag values are case-insensitive; anything unrecognised reads as unset.
pub(crate) fn env_bool(key: &str) -> Option<bool> {
    let raw = env_non_empty(key)?.to_ascii_lowercase();
    match raw.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

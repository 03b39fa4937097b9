//! Auth-session lifecycle for the current device user.
//!
//! SYSTEM CONTEXT
//! ==============
//! On launch the stored token (if any) is checked against `/api/auth/me`.
//! The external login portal hands back a `session_id` in a callback URL,
//! which is exchanged for a session token and persisted. Email login and
//! registration return the token directly.
//!
//! TRADE-OFFS
//! ==========
//! Any non-OK answer from `/api/auth/me` clears the stored token and drops
//! to logged-out, with no retry and no notice. A connection failure only
//! drops the in-memory user; the token survives for the next attempt.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use reqwest::Method;
use reqwest::header::SET_COOKIE;
use serde_json::Value;

use crate::error::ApiError;
use crate::net::api::{ApiClient, read_json};
use crate::net::types::{AuthResponse, ChangePasswordRequest, LoginRequest, RegisterRequest, User};
use crate::state::store::TOKEN_KEY;

pub const LOGIN_FAILED_MESSAGE: &str = "Error al iniciar sesión";
pub const REGISTER_FAILED_MESSAGE: &str = "Error al registrarse";

const SESSION_ID_PARAM: &str = "session_id=";

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl Default for AuthState {
    /// Starts loading until the bootstrap has looked at the stored token.
    fn default() -> Self {
        Self { user: None, loading: true }
    }
}

impl AuthState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Pull the external `session_id` out of a login callback URL.
///
/// The fragment form (`#session_id=`) wins over the query form
/// (`?session_id=`). The value runs up to the next `&`.
#[must_use]
pub fn extract_session_id(url: &str) -> Option<String> {
    let tail = url
        .split_once(&format!("#{SESSION_ID_PARAM}"))
        .or_else(|| url.split_once(&format!("?{SESSION_ID_PARAM}")))
        .map(|(_, tail)| tail)?;
    let value = tail.split('&').next().unwrap_or_default();
    (!value.is_empty()).then(|| value.to_owned())
}

/// Find `session_token=<value>` in a `Set-Cookie` header.
#[must_use]
pub fn session_token_from_cookie(header: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == TOKEN_KEY && !value.is_empty()).then(|| value.to_owned())
    })
}

/// Build the external login portal URL for a given post-login redirect.
///
/// # Errors
///
/// Returns `ApiError::InvalidUrl` if `portal` is not an absolute URL.
pub fn login_url(portal: &str, redirect: &str) -> Result<String, ApiError> {
    reqwest::Url::parse_with_params(portal, &[("redirect", redirect)])
        .map(String::from)
        .map_err(|e| ApiError::InvalidUrl(format!("{portal}: {e}")))
}

/// Owns the gateway and the auth state built on top of it.
#[derive(Debug)]
pub struct AuthSession {
    api: ApiClient,
    state: AuthState,
}

impl AuthSession {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api, state: AuthState::default() }
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    #[must_use]
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.state.user.as_ref()
    }

    /// Launch-time session check.
    ///
    /// Without a stored token the session stays logged out and the server is
    /// not contacted. `loading` is cleared whatever the outcome.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`AuthSession::refresh_user`].
    pub async fn bootstrap(&mut self) -> Result<(), ApiError> {
        let result = match self.api.token() {
            Ok(None) => {
                tracing::info!("no stored session token");
                self.state.user = None;
                Ok(())
            }
            Ok(Some(_)) => self.refresh_user().await,
            Err(e) => Err(e),
        };
        self.state.loading = false;
        result
    }

    /// Re-fetch the current user with the stored token.
    ///
    /// # Errors
    ///
    /// Returns `Network` when the server is unreachable (token kept) and
    /// `Storage`/`Decode` for local failures. A non-OK answer is not an error:
    /// it clears the token and leaves the session logged out.
    pub async fn refresh_user(&mut self) -> Result<(), ApiError> {
        match self.api.get_json::<User>("/api/auth/me").await {
            Ok(user) => {
                tracing::info!(user_id = %user.user_id, "session valid");
                self.state.user = Some(user);
                Ok(())
            }
            Err(ApiError::Status { status, .. }) => {
                tracing::info!(status, "session rejected; clearing stored token");
                self.state.user = None;
                self.api.clear_session()?;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to refresh user");
                self.state.user = None;
                Err(e)
            }
        }
    }

    /// Handle a login callback URL. Returns whether it carried a session id.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`AuthSession::exchange_session_id`].
    pub async fn handle_callback_url(&mut self, url: &str) -> Result<bool, ApiError> {
        let Some(session_id) = extract_session_id(url) else {
            return Ok(false);
        };
        self.exchange_session_id(&session_id).await?;
        Ok(true)
    }

    /// Trade an external session id for a session token, persist it, and
    /// load the user.
    ///
    /// # Errors
    ///
    /// Returns `Status` if the server rejects the id, `MissingToken` if it
    /// accepts it without issuing a token, or any gateway error.
    pub async fn exchange_session_id(&mut self, session_id: &str) -> Result<(), ApiError> {
        let builder = self
            .api
            .builder(Method::POST, "/api/auth/session")?
            .header("X-Session-ID", session_id);
        let response = self.api.execute(builder).await?;
        self.accept_token_response(response).await
    }

    /// `POST /api/auth/login`, then load the user.
    ///
    /// # Errors
    ///
    /// Returns `Status` with the server's `detail` on rejection. Use
    /// `err.user_message(LOGIN_FAILED_MESSAGE)` for display.
    pub async fn login_with_email(&mut self, email: &str, password: &str) -> Result<(), ApiError> {
        tracing::info!("email login");
        let response = self
            .api
            .send_raw(Method::POST, "/api/auth/login", Some(&LoginRequest { email, password }))
            .await?;
        self.accept_token_response(response).await
    }

    /// `POST /api/auth/register`, then load the user.
    ///
    /// # Errors
    ///
    /// Same as [`AuthSession::login_with_email`]; display with
    /// `REGISTER_FAILED_MESSAGE`.
    pub async fn register_with_email(&mut self, email: &str, password: &str, name: &str) -> Result<(), ApiError> {
        tracing::info!("email registration");
        let response = self
            .api
            .send_raw(Method::POST, "/api/auth/register", Some(&RegisterRequest { email, password, name }))
            .await?;
        self.accept_token_response(response).await
    }

    /// # Errors
    ///
    /// Returns `Status` with the server's `detail` on rejection.
    pub async fn change_password(&self, current_password: &str, new_password: &str) -> Result<Value, ApiError> {
        self.api
            .post_json("/api/auth/change-password", &ChangePasswordRequest { current_password, new_password })
            .await
    }

    /// End the session. The server is told when a token exists, but local
    /// state is cleared even if that call fails.
    ///
    /// # Errors
    ///
    /// Only local storage failures are reported.
    pub async fn logout(&mut self) -> Result<(), ApiError> {
        if self.api.token()?.is_some() {
            if let Err(e) = self.api.post_empty::<Value>("/api/auth/logout").await {
                tracing::warn!(error = %e, "server logout failed; clearing local session anyway");
            }
        }
        self.api.clear_session()?;
        self.state.user = None;
        tracing::info!("logged out");
        Ok(())
    }

    async fn accept_token_response(&mut self, response: reqwest::Response) -> Result<(), ApiError> {
        let cookie_token = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(session_token_from_cookie);
        let body: AuthResponse = read_json(response).await?;

        let token = body
            .session_token
            .filter(|t| !t.trim().is_empty())
            .or(cookie_token)
            .ok_or(ApiError::MissingToken)?;
        self.api.store().store(&token)?;
        tracing::info!(user_id = ?body.user_id, "session token stored");

        self.refresh_user().await
    }
}

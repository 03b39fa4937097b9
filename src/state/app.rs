//! Root application store.
//!
//! DESIGN
//! ======
//! `App` is the single owner of the auth session and the current route.
//! State flows one way: an action runs against the server, then the route is
//! recomputed from the outcome. Nothing else mutates `AppState`.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use crate::error::ApiError;
use crate::net::api::ApiClient;
use crate::net::types::Role;
use crate::router::{self, Route};
use crate::services::profile;
use crate::state::auth::{AuthSession, AuthState};

/// Snapshot read by every screen.
#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    pub auth: AuthState,
    pub route: Route,
}

impl Default for AppState {
    fn default() -> Self {
        Self { auth: AuthState::default(), route: Route::Welcome }
    }
}

#[derive(Debug)]
pub struct App {
    session: AuthSession,
    state: AppState,
}

impl App {
    #[must_use]
    pub fn new(session: AuthSession) -> Self {
        Self { session, state: AppState::default() }
    }

    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub fn route(&self) -> Route {
        self.state.route
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        self.session.api()
    }

    #[must_use]
    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    /// Launch sequence: stored-token check, optional callback exchange, then
    /// routing.
    ///
    /// Server and connection failures leave the app logged out (or on the
    /// default home) and are only logged.
    ///
    /// # Errors
    ///
    /// Only token storage failures abort the launch.
    pub async fn launch(&mut self, callback_url: Option<&str>) -> Result<&AppState, ApiError> {
        if let Err(e) = self.session.bootstrap().await {
            tolerate(e, "session bootstrap failed")?;
        }
        if let Some(url) = callback_url {
            if let Err(e) = self.session.handle_callback_url(url).await {
                tolerate(e, "login callback exchange failed")?;
            }
        }
        self.reroute().await;
        Ok(&self.state)
    }

    /// # Errors
    ///
    /// Propagates [`AuthSession::handle_callback_url`] failures.
    pub async fn handle_callback_url(&mut self, url: &str) -> Result<&AppState, ApiError> {
        let result = self.session.handle_callback_url(url).await;
        self.reroute().await;
        result.map(|_| &self.state)
    }

    /// # Errors
    ///
    /// Propagates [`AuthSession::login_with_email`] failures; the route is
    /// recomputed either way.
    pub async fn login_with_email(&mut self, email: &str, password: &str) -> Result<&AppState, ApiError> {
        let result = self.session.login_with_email(email, password).await;
        self.reroute().await;
        result.map(|()| &self.state)
    }

    /// # Errors
    ///
    /// Propagates [`AuthSession::register_with_email`] failures.
    pub async fn register_with_email(&mut self, email: &str, password: &str, name: &str) -> Result<&AppState, ApiError> {
        let result = self.session.register_with_email(email, password, name).await;
        self.reroute().await;
        result.map(|()| &self.state)
    }

    /// Save the chosen role and move to its onboarding flow.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection; the route is left unchanged then.
    pub async fn select_role(
        &mut self,
        role: Role,
        country: Option<&str>,
        identification: Option<&str>,
    ) -> Result<&AppState, ApiError> {
        profile::set_role(self.session.api(), role, country, identification).await?;
        self.state.route = router::route_after_role_selection(role);
        tracing::info!(%role, route = %self.state.route, "role selected");
        Ok(&self.state)
    }

    /// Re-fetch the user and recompute the route, e.g. after an onboarding
    /// form was submitted.
    ///
    /// # Errors
    ///
    /// Propagates [`AuthSession::refresh_user`] failures.
    pub async fn refresh(&mut self) -> Result<&AppState, ApiError> {
        let result = self.session.refresh_user().await;
        self.reroute().await;
        result.map(|()| &self.state)
    }

    /// # Errors
    ///
    /// Only token storage failures are reported.
    pub async fn logout(&mut self) -> Result<&AppState, ApiError> {
        self.session.logout().await?;
        self.reroute().await;
        Ok(&self.state)
    }

    async fn reroute(&mut self) {
        self.state.auth = self.session.state().clone();
        self.state.route = if self.state.auth.is_authenticated() {
            let fetched = profile::get_profile(self.session.api()).await;
            router::resolve_profile_result(&fetched)
        } else {
            Route::Welcome
        };
        tracing::debug!(route = %self.state.route, "route resolved");
    }
}

fn tolerate(e: ApiError, context: &str) -> Result<(), ApiError> {
    match e {
        ApiError::Storage(_) => Err(e),
        other => {
            tracing::warn!(error = %other, "{context}");
            Ok(())
        }
    }
}

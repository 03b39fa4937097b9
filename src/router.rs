//! Role router: pick the landing route for a fetched profile.
//!
//! Precedence is fixed:
//! 1. no role → role selection
//! 2. role set, profile incomplete → that role's onboarding
//! 3. role set, profile complete → that role's home dashboard
//!
//! A failed profile fetch lands on the default home.

#[cfg(test)]
#[path = "router_test.rs"]
mod tests;

use std::fmt;

use crate::error::ApiError;
use crate::net::types::{Profile, Role};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// Logged-out landing screen.
    Welcome,
    RoleSelect,
    Onboarding(Role),
    Home(Role),
}

impl Route {
    /// Where a profile fetch failure lands.
    pub const DEFAULT_HOME: Self = Self::Home(Role::Patient);

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Welcome => "/",
            Self::RoleSelect => "/role-select",
            Self::Onboarding(Role::Patient) => "/onboarding",
            Self::Onboarding(Role::ActiveUser) => "/onboarding-active",
            Self::Onboarding(Role::Professional) => "/onboarding-professional",
            Self::Onboarding(Role::Family) => "/onboarding-family",
            Self::Home(Role::Patient) => "/(tabs)/home",
            Self::Home(Role::ActiveUser) => "/(tabs)/challenge-dashboard",
            Self::Home(Role::Professional) => "/professional-dashboard",
            Self::Home(Role::Family) => "/family-dashboard",
        }
    }

    /// Inverse of [`Route::path`].
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        Self::all().into_iter().find(|route| route.path() == path)
    }

    /// Every distinct route.
    #[must_use]
    pub fn all() -> Vec<Self> {
        let mut routes = vec![Self::Welcome, Self::RoleSelect];
        routes.extend(Role::ALL.map(Self::Onboarding));
        routes.extend(Role::ALL.map(Self::Home));
        routes
    }

    #[must_use]
    pub fn is_onboarding(self) -> bool {
        matches!(self, Self::Onboarding(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Map a fetched profile to its landing route.
#[must_use]
pub fn resolve(profile: &Profile) -> Route {
    match profile.role {
        None => Route::RoleSelect,
        Some(role) if !profile.profile_completed => Route::Onboarding(role),
        Some(role) => Route::Home(role),
    }
}

/// Map a profile fetch outcome to a route, falling back to the default home
/// when the fetch failed.
#[must_use]
pub fn resolve_profile_result(result: &Result<Profile, ApiError>) -> Route {
    match result {
        Ok(profile) => resolve(profile),
        Err(e) => {
            tracing::warn!(error = %e, fallback = %Route::DEFAULT_HOME, "profile fetch failed; using default home");
            Route::DEFAULT_HOME
        }
    }
}

/// Onboarding flow that follows a successful role selection.
#[must_use]
pub fn route_after_role_selection(role: Role) -> Route {
    Route::Onboarding(role)
}

//! Client-side application state.
//!
//! `store` persists the session token, `auth` owns the login lifecycle on top
//! of it, and `app` is the single root that combines auth state with the
//! current route.

pub mod app;
pub mod auth;
pub mod store;

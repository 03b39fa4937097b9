//! # recovery-client
//!
//! Rust client for the SinAdicciones recovery backend.
//!
//! This crate holds everything the mobile app decides on its own: the
//! persisted session token, the auth bootstrap, the role router, and the
//! bearer-token REST gateway. The `services` modules wrap the endpoints the
//! app's screens call. The server owns all business rules; this side only
//! forwards requests and routes on the answers.

pub mod config;
pub mod error;
pub mod net;
pub mod router;
pub mod services;
pub mod state;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use config::ClientConfig;
pub use error::ApiError;
pub use net::api::ApiClient;
pub use net::types::{Profile, Role, User};
pub use router::Route;
pub use state::app::{App, AppState};
pub use state::auth::{AuthSession, AuthState};
pub use state::store::{FileTokenStore, MemoryTokenStore, TokenStore};

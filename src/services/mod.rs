//! Endpoint wrappers used by the app's screens.
//!
//! DESIGN
//! ======
//! Each function maps to exactly one backend endpoint and goes through the
//! shared `ApiClient`, so the bearer token and origin are handled in one
//! place. Request and response bodies the server owns stay as
//! `serde_json::Value`; only fields the client routes on are typed.

pub mod admin;
pub mod challenge;
pub mod chat;
pub mod content;
pub mod emotional;
pub mod family;
pub mod habits;
pub mod notifications;
pub mod patient;
pub mod professional;
pub mod profile;
pub mod purpose;

//! Network layer: the authenticated REST gateway and its wire types.

pub mod api;
pub mod types;

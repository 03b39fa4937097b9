//! Dashboard aggregates and public reference content.

#[cfg(test)]
#[path = "content_test.rs"]
mod tests;

use serde_json::Value;

use crate::error::ApiError;
use crate::net::api::ApiClient;

/// # Errors
///
/// Returns gateway errors.
pub async fn integrated_dashboard(api: &ApiClient) -> Result<Value, ApiError> {
    api.get_json("/api/dashboard/integrated").await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn dashboard_stats(api: &ApiClient) -> Result<Value, ApiError> {
    api.get_json("/api/dashboard/stats").await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn education_content(api: &ApiClient) -> Result<Value, ApiError> {
    api.get_json("/api/education/content").await
}

/// Treatment centers directory.
///
/// # Errors
///
/// Returns gateway errors.
pub async fn centers(api: &ApiClient) -> Result<Value, ApiError> {
    api.get_json("/api/centers").await
}

/// Liveness probe; needs no session.
///
/// # Errors
///
/// Returns gateway errors.
pub async fn health(api: &ApiClient) -> Result<Value, ApiError> {
    api.get_json("/api/health").await
}

//! Family member endpoints.

#[cfg(test)]
#[path = "family_test.rs"]
mod tests;

use serde_json::{Value, json};

use crate::error::ApiError;
use crate::net::api::ApiClient;

/// Ask to link with a relative by their account email. The relative must
/// approve the request before stats become visible.
///
/// # Errors
///
/// Returns gateway errors.
pub async fn link_relative(api: &ApiClient, relative_email: &str) -> Result<Value, ApiError> {
    api.post_json("/api/family/link-relative", &json!({ "relative_email": relative_email }))
        .await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn relative_stats(api: &ApiClient) -> Result<Value, ApiError> {
    api.get_json("/api/family/relative-stats").await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn education(api: &ApiClient) -> Result<Value, ApiError> {
    api.get_json("/api/family/education").await
}

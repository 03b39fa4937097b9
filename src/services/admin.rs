//! Admin console endpoints. The server rejects callers that are not admins.

#[cfg(test)]
#[path = "admin_test.rs"]
mod tests;

use serde_json::Value;

use crate::error::ApiError;
use crate::net::api::ApiClient;
use crate::net::types::Role;

pub const DEFAULT_USER_LIMIT: u32 = 50;

/// # Errors
///
/// Returns gateway errors.
pub async fn stats(api: &ApiClient) -> Result<Value, ApiError> {
    api.get_json("/api/admin/stats").await
}

/// List users, optionally filtered by role.
///
/// # Errors
///
/// Returns gateway errors.
pub async fn users(api: &ApiClient, role: Option<Role>, limit: u32) -> Result<Value, ApiError> {
    let mut query = vec![("limit", limit.to_string())];
    if let Some(role) = role {
        query.push(("role", role.to_string()));
    }
    api.get_query("/api/admin/users", &query).await
}

/// # Errors
///
/// Returns gateway errors.
pub async fn activity(api: &ApiClient) -> Result<Value, ApiError> {
    api.get_json("/api/admin/activity").await
}

/// Change another user's role. Parameters travel in the query string.
///
/// # Errors
///
/// Returns gateway errors.
pub async fn set_user_role(api: &ApiClient, user_id: &str, new_role: Role) -> Result<Value, ApiError> {
    api.post_query(
        "/api/admin/set-role",
        &[("user_id", user_id.to_owned()), ("new_role", new_role.to_string())],
    )
    .await
}
